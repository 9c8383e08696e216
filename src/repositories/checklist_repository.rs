use sqlx::PgPool;

use crate::models::{ChecklistItem, DEFAULT_CHECKLIST};
use crate::utils::errors::{not_found_error, AppError};

const CHECKLIST_COLUMNS: &str = "id, text, target_date, responsible, is_completed";

/// Cambios parciales sobre una tarea; `Some(None)` vacía la columna
#[derive(Debug, Default)]
pub struct ChecklistChanges {
    pub text: Option<String>,
    pub target_date: Option<Option<String>>,
    pub responsible: Option<Option<String>>,
    pub is_completed: Option<bool>,
}

impl ChecklistChanges {
    pub fn apply_to(self, mut item: ChecklistItem) -> ChecklistItem {
        if let Some(text) = self.text {
            item.text = text;
        }
        if let Some(target_date) = self.target_date {
            item.target_date = target_date;
        }
        if let Some(responsible) = self.responsible {
            item.responsible = responsible;
        }
        if let Some(is_completed) = self.is_completed {
            item.is_completed = is_completed;
        }
        item
    }
}

pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<ChecklistItem>, AppError> {
        let items = sqlx::query_as::<_, ChecklistItem>(&format!(
            "SELECT {} FROM checklist_items ORDER BY id",
            CHECKLIST_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn create(
        &self,
        text: String,
        target_date: Option<String>,
        responsible: Option<String>,
    ) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO checklist_items (text, target_date, responsible) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(text)
        .bind(target_date)
        .bind(responsible)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update(&self, id: i64, changes: ChecklistChanges) -> Result<ChecklistItem, AppError> {
        let current = sqlx::query_as::<_, ChecklistItem>(&format!(
            "SELECT {} FROM checklist_items WHERE id = $1",
            CHECKLIST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Checklist item", id))?;
        let next = changes.apply_to(current);

        let item = sqlx::query_as::<_, ChecklistItem>(&format!(
            r#"
            UPDATE checklist_items
            SET text = $2, target_date = $3, responsible = $4, is_completed = $5
            WHERE id = $1
            RETURNING {}
            "#,
            CHECKLIST_COLUMNS
        ))
        .bind(id)
        .bind(next.text)
        .bind(next.target_date)
        .bind(next.responsible)
        .bind(next.is_completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = sqlx::query("DELETE FROM checklist_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    /// Borra todas las tareas y vuelve a la lista por defecto en una transacción
    pub async fn reset_to_defaults(&self) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM checklist_items").execute(&mut *tx).await?;
        for text in DEFAULT_CHECKLIST {
            sqlx::query("INSERT INTO checklist_items (text) VALUES ($1)")
                .bind(text)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(DEFAULT_CHECKLIST.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ChecklistItem {
        ChecklistItem {
            id: 1,
            text: "Flyer erstellen".to_string(),
            target_date: Some("15.12.".to_string()),
            responsible: Some("Lea".to_string()),
            is_completed: false,
        }
    }

    #[test]
    fn test_null_clears_responsible_only() {
        let changes = ChecklistChanges {
            responsible: Some(None),
            is_completed: Some(true),
            ..ChecklistChanges::default()
        };

        let updated = changes.apply_to(item());

        assert_eq!(updated.responsible, None);
        assert_eq!(updated.target_date.as_deref(), Some("15.12."));
        assert!(updated.is_completed);
    }

    #[test]
    fn test_default_list_starts_with_date() {
        assert_eq!(DEFAULT_CHECKLIST.len(), 13);
        assert!(DEFAULT_CHECKLIST[0].starts_with("Termin Festlegen"));
    }
}
