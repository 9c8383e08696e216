use sqlx::PgPool;

use crate::dto::stop_dto::CreateStopRequest;
use crate::models::Stop;
use crate::utils::errors::AppError;

const STOP_COLUMNS: &str = "id, name, first_name, address, zip, city, phone, email, payment_method, note, lat, lng, territory_id, status, sequence";

/// Cambios parciales sobre un stop.
///
/// En los campos anulables `None` conserva el valor actual y `Some(None)` lo vacía.
#[derive(Debug, Default)]
pub struct StopChanges {
    pub status: Option<String>,
    pub sequence: Option<i32>,
    pub territory_id: Option<Option<i64>>,
    pub lat: Option<Option<f64>>,
    pub lng: Option<Option<f64>>,
    pub note: Option<Option<String>>,
}

impl StopChanges {
    /// Aplica los cambios sobre la fila actual
    pub fn apply_to(self, mut stop: Stop) -> Stop {
        if let Some(status) = self.status {
            stop.status = status;
        }
        if let Some(sequence) = self.sequence {
            stop.sequence = sequence;
        }
        if let Some(territory_id) = self.territory_id {
            stop.territory_id = territory_id;
        }
        if let Some(lat) = self.lat {
            stop.lat = lat;
        }
        if let Some(lng) = self.lng {
            stop.lng = lng;
        }
        if let Some(note) = self.note {
            stop.note = note;
        }
        stop
    }
}

pub struct StopRepository {
    pool: PgPool,
}

impl StopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta todos los stops en una transacción (estado `open`, secuencia 0)
    pub async fn create_many(&self, stops: Vec<CreateStopRequest>) -> Result<Vec<Stop>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(stops.len());

        for stop in stops {
            let row = sqlx::query_as::<_, Stop>(&format!(
                r#"
                INSERT INTO stops (name, first_name, address, zip, city, phone, email, payment_method, note, lat, lng, territory_id, status, sequence)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'open', 0)
                RETURNING {}
                "#,
                STOP_COLUMNS
            ))
            .bind(stop.name)
            .bind(stop.first_name)
            .bind(stop.address)
            .bind(stop.zip)
            .bind(stop.city)
            .bind(stop.phone)
            .bind(stop.email)
            .bind(stop.payment_method)
            .bind(stop.note)
            .bind(stop.lat)
            .bind(stop.lng)
            .bind(stop.territory_id)
            .fetch_one(&mut *tx)
            .await?;

            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Stop>, AppError> {
        let stop = sqlx::query_as::<_, Stop>(&format!("SELECT {} FROM stops WHERE id = $1", STOP_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(stop)
    }

    pub async fn find_by_territory(&self, territory_id: i64) -> Result<Vec<Stop>, AppError> {
        let stops = sqlx::query_as::<_, Stop>(&format!(
            "SELECT {} FROM stops WHERE territory_id = $1 ORDER BY sequence ASC, id ASC",
            STOP_COLUMNS
        ))
        .bind(territory_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stops)
    }

    pub async fn find_all(&self) -> Result<Vec<Stop>, AppError> {
        let stops = sqlx::query_as::<_, Stop>(&format!("SELECT {} FROM stops ORDER BY id", STOP_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(stops)
    }

    pub async fn update(&self, id: i64, changes: StopChanges) -> Result<Stop, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Stop {} not found", id)))?;
        let next = changes.apply_to(current);

        let stop = sqlx::query_as::<_, Stop>(&format!(
            r#"
            UPDATE stops
            SET status = $2, sequence = $3, territory_id = $4, lat = $5, lng = $6, note = $7
            WHERE id = $1
            RETURNING {}
            "#,
            STOP_COLUMNS
        ))
        .bind(id)
        .bind(next.status)
        .bind(next.sequence)
        .bind(next.territory_id)
        .bind(next.lat)
        .bind(next.lng)
        .bind(next.note)
        .fetch_one(&self.pool)
        .await?;

        Ok(stop)
    }

    /// Escribe las secuencias en una transacción; ningún lector ve una numeración a medias
    pub async fn set_sequences(&self, territory_id: i64, order: &[(i64, i32)]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for &(stop_id, sequence) in order {
            sqlx::query("UPDATE stops SET sequence = $1 WHERE id = $2 AND territory_id = $3")
                .bind(sequence)
                .bind(stop_id)
                .bind(territory_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = sqlx::query("DELETE FROM stops WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM stops")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_null_unassigns_stop() {
        let stop = Stop::new(5, "Ringstr. 4").located_at(49.4, 11.8).in_territory(2);
        let changes = StopChanges {
            territory_id: Some(None),
            ..StopChanges::default()
        };

        let updated = changes.apply_to(stop);

        assert_eq!(updated.territory_id, None);
        assert_eq!(updated.lat, Some(49.4));
    }

    #[test]
    fn test_absent_fields_keep_current_values() {
        let mut stop = Stop::new(5, "Ringstr. 4").located_at(49.4, 11.8).in_territory(2);
        stop.note = Some("Hinterhof".to_string());
        let changes = StopChanges {
            status: Some("collected".to_string()),
            lat: Some(None),
            lng: Some(None),
            ..StopChanges::default()
        };

        let updated = changes.apply_to(stop);

        assert_eq!(updated.status, "collected");
        assert_eq!(updated.territory_id, Some(2));
        assert_eq!(updated.note.as_deref(), Some("Hinterhof"));
        assert!(!updated.is_located());
    }
}
