//! Modelo de Stop
//!
//! Un stop es un árbol registrado para recogida. Mapea a la tabla `stops`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::coordinate::{Coordinate, Located};

/// Estado de recogida en campo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    Open,
    Collected,
    NotFound,
}

impl StopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopStatus::Open => "open",
            StopStatus::Collected => "collected",
            StopStatus::NotFound => "not_found",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(StopStatus::Open),
            "collected" => Some(StopStatus::Collected),
            "not_found" => Some(StopStatus::NotFound),
            _ => None,
        }
    }
}

/// Stop principal - mapea exactamente a la tabla stops
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Stop {
    pub id: i64,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub address: String,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub territory_id: Option<i64>,
    pub status: String,
    pub sequence: i32,
}

impl Stop {
    /// Stop mínimo, sin ubicar ni asignar
    pub fn new(id: i64, address: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            first_name: None,
            address: address.into(),
            zip: None,
            city: None,
            phone: None,
            email: None,
            payment_method: None,
            note: None,
            lat: None,
            lng: None,
            territory_id: None,
            status: StopStatus::Open.as_str().to_string(),
            sequence: 0,
        }
    }

    pub fn located_at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn in_territory(mut self, territory_id: i64) -> Self {
        self.territory_id = Some(territory_id);
        self
    }

    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn is_located(&self) -> bool {
        self.coordinate().is_some()
    }
}

impl Located for Stop {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.lat, self.lng)
    }
}
