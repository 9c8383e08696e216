//! Modelo de Poster
//!
//! Un cartel colgado en la ciudad, marcado en el mapa para retirarlo después.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Poster {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}
