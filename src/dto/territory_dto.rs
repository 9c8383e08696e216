use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Request para crear un territorio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTerritoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 32))]
    pub color: String,

    #[validate(custom = "validate_polygon")]
    pub polygon: Vec<[f64; 2]>,
}

// Request para actualizar un territorio (solo los campos presentes)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTerritoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 32))]
    pub color: Option<String>,

    #[validate(custom = "validate_polygon")]
    pub polygon: Option<Vec<[f64; 2]>>,

    /// Cadena vacía para quitar el conductor
    pub driver_name: Option<String>,
}

impl UpdateTerritoryRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.polygon.is_none() && self.driver_name.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Un polígono necesita al menos tres vértices con coordenadas válidas
fn validate_polygon(polygon: &[[f64; 2]]) -> Result<(), ValidationError> {
    if polygon.len() < 3 {
        return Err(ValidationError::new("polygon_too_small"));
    }
    let in_range = polygon.iter().all(|[lat, lng]| {
        lat.is_finite() && lng.is_finite() && lat.abs() <= 90.0 && lng.abs() <= 180.0
    });
    if !in_range {
        return Err(ValidationError::new("polygon_out_of_range"));
    }
    Ok(())
}
