use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::daily_schedule::DailySchedule;
use crate::models::stop::Stop;
use crate::models::trip::{NewTrip, Trip, TripUpdate};
use crate::utils::errors::{internal_error, AppError};

/// Almacenamiento del agregado Trip.
///
/// `insert_trip` escribe el viaje, sus paradas y sus días como una sola
/// unidad: o se ve todo o no se ve nada.
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn insert_trip(&self, trip: NewTrip) -> Result<Trip, AppError>;

    /// Todos los viajes, del más reciente al más antiguo
    async fn list_trips(&self) -> Result<Vec<Trip>, AppError>;

    async fn find_trip(&self, id: Uuid) -> Result<Option<Trip>, AppError>;

    async fn find_schedule(&self, trip_id: Uuid, day_number: i32) -> Result<Option<DailySchedule>, AppError>;

    async fn update_trip(&self, id: Uuid, update: TripUpdate) -> Result<Option<Trip>, AppError>;

    /// Borra el viaje con sus paradas y días. Devuelve false si no existía.
    async fn delete_trip(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct TripRow {
    id: Uuid,
    current_location: String,
    pickup_location: String,
    dropoff_location: String,
    current_cycle_hours: f64,
    total_distance_miles: f64,
    total_drive_hours: f64,
    estimated_days: i32,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct StopRow {
    id: i64,
    trip_id: Uuid,
    stop_type: String,
    location: String,
    mile_marker: Option<f64>,
    duration_hours: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct ScheduleRow {
    id: i64,
    trip_id: Uuid,
    day_number: i32,
    driving_hours: f64,
    on_duty_hours: f64,
    off_duty_hours: f64,
    notes: Option<String>,
}

impl TryFrom<StopRow> for Stop {
    type Error = AppError;

    fn try_from(row: StopRow) -> Result<Self, Self::Error> {
        Ok(Stop {
            id: row.id,
            stop_type: row.stop_type.parse().map_err(|e: String| internal_error(&e))?,
            location: row.location,
            mile_marker: row.mile_marker,
            duration_hours: row.duration_hours,
        })
    }
}

impl From<ScheduleRow> for DailySchedule {
    fn from(row: ScheduleRow) -> Self {
        DailySchedule {
            id: row.id,
            day_number: row.day_number,
            driving_hours: row.driving_hours,
            on_duty_hours: row.on_duty_hours,
            off_duty_hours: row.off_duty_hours,
            notes: row.notes,
        }
    }
}

const TRIP_COLUMNS: &str = "id, current_location, pickup_location, dropoff_location, current_cycle_hours, \
     total_distance_miles, total_drive_hours, estimated_days, created_at";

pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cargar paradas y días de varios viajes y montar los agregados
    async fn assemble(&self, rows: Vec<TripRow>) -> Result<Vec<Trip>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let stop_rows = sqlx::query_as::<_, StopRow>(
            "SELECT id, trip_id, stop_type, location, mile_marker, duration_hours \
             FROM stops WHERE trip_id = ANY($1) ORDER BY trip_id, position",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let schedule_rows = sqlx::query_as::<_, ScheduleRow>(
            "SELECT id, trip_id, day_number, driving_hours, on_duty_hours, off_duty_hours, notes \
             FROM daily_schedules WHERE trip_id = ANY($1) ORDER BY trip_id, day_number",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut stops: HashMap<Uuid, Vec<Stop>> = HashMap::new();
        for row in stop_rows {
            let trip_id = row.trip_id;
            stops.entry(trip_id).or_default().push(Stop::try_from(row)?);
        }

        let mut schedules: HashMap<Uuid, Vec<DailySchedule>> = HashMap::new();
        for row in schedule_rows {
            schedules.entry(row.trip_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| Trip {
                stops: stops.remove(&row.id).unwrap_or_default(),
                daily_schedules: schedules.remove(&row.id).unwrap_or_default(),
                id: row.id,
                current_location: row.current_location,
                pickup_location: row.pickup_location,
                dropoff_location: row.dropoff_location,
                current_cycle_hours: row.current_cycle_hours,
                total_distance_miles: row.total_distance_miles,
                total_drive_hours: row.total_drive_hours,
                estimated_days: row.estimated_days,
                created_at: row.created_at,
            })
            .collect())
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn insert_trip(&self, trip: NewTrip) -> Result<Trip, AppError> {
        let trip_id = trip.id;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO trips (id, current_location, pickup_location, dropoff_location, current_cycle_hours,
                               total_distance_miles, total_drive_hours, estimated_days, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(trip.id)
        .bind(&trip.current_location)
        .bind(&trip.pickup_location)
        .bind(&trip.dropoff_location)
        .bind(trip.current_cycle_hours)
        .bind(trip.total_distance_miles)
        .bind(trip.total_drive_hours)
        .bind(trip.estimated_days)
        .bind(trip.created_at)
        .execute(&mut *tx)
        .await?;

        if !trip.stops.is_empty() {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO stops (trip_id, position, stop_type, location, mile_marker, duration_hours) ",
            );
            builder.push_values(trip.stops.iter().enumerate(), |mut b, (position, stop)| {
                b.push_bind(trip_id)
                    .push_bind(position as i32)
                    .push_bind(stop.stop_type.as_str())
                    .push_bind(&stop.location)
                    .push_bind(stop.mile_marker)
                    .push_bind(stop.duration_hours);
            });
            builder.build().execute(&mut *tx).await?;
        }

        if !trip.daily_schedules.is_empty() {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO daily_schedules (trip_id, day_number, driving_hours, on_duty_hours, off_duty_hours, notes) ",
            );
            builder.push_values(trip.daily_schedules.iter(), |mut b, day| {
                b.push_bind(trip_id)
                    .push_bind(day.day_number)
                    .push_bind(day.driving_hours)
                    .push_bind(day.on_duty_hours)
                    .push_bind(day.off_duty_hours)
                    .push_bind(&day.notes);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        log::info!(
            "💾 Trip {} stored with {} stops and {} days",
            trip_id,
            trip.stops.len(),
            trip.daily_schedules.len()
        );

        self.find_trip(trip_id)
            .await?
            .ok_or_else(|| internal_error("trip disappeared right after insert"))
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {} FROM trips ORDER BY created_at DESC",
            TRIP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn find_trip(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let row = sqlx::query_as::<_, TripRow>(&format!("SELECT {} FROM trips WHERE id = $1", TRIP_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_schedule(&self, trip_id: Uuid, day_number: i32) -> Result<Option<DailySchedule>, AppError> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            "SELECT id, trip_id, day_number, driving_hours, on_duty_hours, off_duty_hours, notes \
             FROM daily_schedules WHERE trip_id = $1 AND day_number = $2",
        )
        .bind(trip_id)
        .bind(day_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DailySchedule::from))
    }

    async fn update_trip(&self, id: Uuid, update: TripUpdate) -> Result<Option<Trip>, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE trips
            SET current_location = $2, pickup_location = $3, dropoff_location = $4, current_cycle_hours = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.current_location)
        .bind(update.pickup_location)
        .bind(update.dropoff_location)
        .bind(update.current_cycle_hours)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_trip(id).await
    }

    async fn delete_trip(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
