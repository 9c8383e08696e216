use sqlx::PgPool;

use crate::models::{CampaignEntry, CampaignStatus, StopStatus};
use crate::utils::errors::AppError;

const ENTRY_COLUMNS: &str = "id, name, address, phone, status, last_updated";

pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Las tocadas más recientemente primero
    pub async fn find_all(&self) -> Result<Vec<CampaignEntry>, AppError> {
        let entries = sqlx::query_as::<_, CampaignEntry>(&format!(
            "SELECT {} FROM campaign_entries ORDER BY last_updated DESC, id",
            ENTRY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn update_status(&self, id: i64, status: CampaignStatus) -> Result<bool, AppError> {
        let updated = sqlx::query("UPDATE campaign_entries SET status = $1, last_updated = NOW() WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM campaign_entries")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    /// Todas las entradas vuelven a `open`, también las registradas y borradas
    pub async fn reset_statuses(&self) -> Result<u64, AppError> {
        let updated = sqlx::query("UPDATE campaign_entries SET status = $1, last_updated = NOW()")
            .bind(CampaignStatus::Open.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated)
    }

    /// Crea el stop y marca la entrada como registrada en una transacción.
    ///
    /// Devuelve `None` si la entrada no existe; en ese caso no se inserta nada.
    pub async fn register(
        &self,
        entry_id: i64,
        name: String,
        address: String,
        phone: Option<String>,
    ) -> Result<Option<i64>, AppError> {
        let mut tx = self.pool.begin().await?;

        let marked = sqlx::query("UPDATE campaign_entries SET status = $1, last_updated = NOW() WHERE id = $2")
            .bind(CampaignStatus::Registered.as_str())
            .bind(entry_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if marked == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let stop_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO stops (name, address, phone, status, sequence)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(StopStatus::Open.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(stop_id))
    }
}
