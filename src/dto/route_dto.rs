use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

// Request para optimizar la ruta de un territorio
#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRouteRequest {
    /// Punto fijo de salida; sin él se empieza por el stop más al norte
    pub start_point: Option<Coordinate>,
}

/// Operación masiva sobre todos los territorios
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BatchAction {
    Optimize,
    Calculate,
}

#[derive(Debug, Deserialize)]
pub struct BatchRouteRequest {
    pub action: BatchAction,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub action: BatchAction,
    pub processed: usize,
    pub failed: usize,
}
