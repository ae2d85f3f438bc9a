//! Utilidades de validación
//! 
//! Validadores personalizados usados por los DTOs de la API.

use validator::ValidationError;

/// Validar que un string no esté vacío ni sea solo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("This field may not be blank.".into());
        return Err(error);
    }
    Ok(())
}

/// Redondear a dos decimales, como se guardan millas y horas
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Denver, CO").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_round_hundredths() {
        assert_eq!(round_hundredths(1553.4258), 1553.43);
        assert_eq!(round_hundredths(14.504), 14.5);
        assert_eq!(round_hundredths(0.0), 0.0);
    }
}
