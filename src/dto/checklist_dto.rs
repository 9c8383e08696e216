use serde::Deserialize;
use validator::Validate;

use super::nullable::double_option;

// Request para añadir una tarea
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChecklistItemRequest {
    #[validate(length(min = 1, max = 300))]
    pub text: String,

    pub target_date: Option<String>,
    pub responsible: Option<String>,
}

// Request para actualizar una tarea; `null` vacía fecha o responsable
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateChecklistItemRequest {
    #[validate(length(min = 1, max = 300))]
    pub text: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub target_date: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub responsible: Option<Option<String>>,

    pub is_completed: Option<bool>,
}

impl UpdateChecklistItemRequest {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.target_date.is_none() && self.responsible.is_none() && self.is_completed.is_none()
    }
}

/// Cadena vacía equivale a no informar el campo
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
