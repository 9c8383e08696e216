//! Modelo de Territory
//!
//! Polígono de reparto con su conductor y la última geometría de ruta calculada.
//! `polygon` y `route_geometry` se guardan como JSON `[[lat, lng], ...]`.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::coordinate::Coordinate;

/// Territory principal - mapea a la tabla territories
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Territory {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub polygon: Json<Vec<[f64; 2]>>,
    pub route_geometry: Option<Json<Vec<[f64; 2]>>>,
    pub driver_name: Option<String>,
}

impl Territory {
    pub fn new(id: i64, name: impl Into<String>, color: impl Into<String>, polygon: &[Coordinate]) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            polygon: to_stored_path(polygon),
            route_geometry: None,
            driver_name: None,
        }
    }

    pub fn polygon_coordinates(&self) -> Vec<Coordinate> {
        self.polygon.0.iter().copied().map(Coordinate::from_pair).collect()
    }

    pub fn route_coordinates(&self) -> Option<Vec<Coordinate>> {
        self.route_geometry
            .as_ref()
            .map(|path| path.0.iter().copied().map(Coordinate::from_pair).collect())
    }
}

/// Territory con contadores de stops para el listado
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TerritorySummary {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub polygon: Json<Vec<[f64; 2]>>,
    pub route_geometry: Option<Json<Vec<[f64; 2]>>>,
    pub driver_name: Option<String>,
    pub total_stops: i64,
    pub open_stops: i64,
    pub collected_stops: i64,
}

/// Convierte una ruta al formato de almacenamiento
pub fn to_stored_path(path: &[Coordinate]) -> Json<Vec<[f64; 2]>> {
    Json(path.iter().map(|c| c.to_pair()).collect())
}
