use anyhow::{bail, Context, Result};
use colored::*;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Serialize)]
struct TripRequest {
    current_location: String,
    pickup_location: String,
    dropoff_location: String,
    current_cycle_hours: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚚 HOS Trip Planner Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("TRIP_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    println!("{} {}", "🌐 API:".bright_blue(), base_url);

    let client = reqwest::Client::new();

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🩺 Health check");
        println!("2. 🗺️ Planificar viaje");
        println!("3. 📋 Listar viajes");
        println!("4. 🔍 Ver viaje");
        println!("5. 📒 Ver registro de un día");
        println!("6. 🗑️ Eliminar viaje");
        println!("7. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-7): ")?;

        let result = match choice.as_str() {
            "1" => health_check(&client, &base_url).await,
            "2" => plan_trip(&client, &base_url).await,
            "3" => list_trips(&client, &base_url).await,
            "4" => show_trip(&client, &base_url).await,
            "5" => show_day_log(&client, &base_url).await,
            "6" => delete_trip(&client, &base_url).await,
            "7" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{} {:#}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn health_check(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let body = get_json(client, &format!("{}/health", base_url)).await?;
    println!("{} {}", "✅ Servidor:".bright_green(), body["status"]);
    Ok(())
}

async fn plan_trip(client: &reqwest::Client, base_url: &str) -> Result<()> {
    println!("{}", "🗺️ NUEVO VIAJE".bright_cyan().bold());
    println!("{}", "==============".bright_cyan());

    let request = TripRequest {
        current_location: prompt("Ubicación actual: ")?,
        pickup_location: prompt("Recogida: ")?,
        dropoff_location: prompt("Entrega: ")?,
        current_cycle_hours: prompt("Horas del ciclo usadas: ")?
            .parse()
            .context("las horas del ciclo deben ser un número")?,
    };

    println!();
    println!("{}", "📦 Payload:".bright_blue());
    println!("{}", serde_json::to_string_pretty(&request)?);

    let response = client
        .post(format!("{}/api/trips", base_url))
        .json(&request)
        .send()
        .await?;
    let body = read_body(response).await?;

    print_trip(&body["data"]);
    Ok(())
}

async fn list_trips(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let body = get_json(client, &format!("{}/api/trips", base_url)).await?;
    println!("{} {}", "📋 Viajes:".bright_blue().bold(), body["count"]);

    for trip in body["data"].as_array().into_iter().flatten() {
        println!(
            "  {} {} → {} ({} mi, {} h, {} días)",
            trip["id"].as_str().unwrap_or("?").bright_white(),
            trip["pickup_location"].as_str().unwrap_or("?"),
            trip["dropoff_location"].as_str().unwrap_or("?"),
            trip["total_distance_miles"],
            trip["total_drive_hours"],
            trip["estimated_days"]
        );
    }
    Ok(())
}

async fn show_trip(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let id = prompt("ID del viaje: ")?;
    let body = get_json(client, &format!("{}/api/trips/{}", base_url, id)).await?;
    print_trip(&body["data"]);
    Ok(())
}

async fn show_day_log(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let id = prompt("ID del viaje: ")?;
    let day = prompt("Número de día: ")?;
    let body = get_json(client, &format!("{}/api/trips/{}/days/{}/logs", base_url, id, day)).await?;
    let log = &body["data"];

    println!(
        "{} día {} ({} h conduciendo, {} h en servicio)",
        "📒 Registro:".bright_blue().bold(),
        log["day_number"],
        log["total_driving_hours"],
        log["total_on_duty_hours"]
    );
    for entry in log["log_entries"].as_array().into_iter().flatten() {
        println!(
            "  {:>5} → {:>5}  {}",
            entry["start_hour"],
            entry["end_hour"],
            entry["status"].as_str().unwrap_or("?").bright_white()
        );
    }
    Ok(())
}

async fn delete_trip(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let id = prompt("ID del viaje: ")?;
    let response = client.delete(format!("{}/api/trips/{}", base_url, id)).send().await?;
    read_body(response).await?;
    println!("{}", "🗑️ Viaje eliminado".bright_green());
    Ok(())
}

async fn get_json(client: &reqwest::Client, url: &str) -> Result<Value> {
    let response = client.get(url).send().await?;
    read_body(response).await
}

async fn read_body(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    let body: Value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).with_context(|| format!("respuesta no JSON: {}", text))?
    };

    if !status.is_success() {
        bail!("{} {}", status, body["message"].as_str().or(body["error"].as_str()).unwrap_or(&text));
    }
    Ok(body)
}

fn print_trip(trip: &Value) {
    println!();
    println!("{}", "✅ VIAJE".bright_green().bold());
    println!("{}", "========".bright_green());
    println!("ID: {}", trip["id"].as_str().unwrap_or("?"));
    println!(
        "Distancia: {} mi | Conducción: {} h | Días estimados: {}",
        trip["total_distance_miles"], trip["total_drive_hours"], trip["estimated_days"]
    );

    println!("{}", "🛑 Paradas:".bright_blue());
    for stop in trip["stops"].as_array().into_iter().flatten() {
        println!(
            "  [{}] {} @ milla {} ({} h)",
            stop["stop_type"].as_str().unwrap_or("?"),
            stop["location"].as_str().unwrap_or("?"),
            stop["mile_marker"],
            stop["duration_hours"]
        );
    }

    println!("{}", "📅 Plan diario:".bright_blue());
    for day in trip["daily_schedules"].as_array().into_iter().flatten() {
        println!(
            "  Día {}: {} h conduciendo, {} h en servicio, {} h libre",
            day["day_number"], day["driving_hours"], day["on_duty_hours"], day["off_duty_hours"]
        );
    }
}
