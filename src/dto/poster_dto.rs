use serde::Deserialize;
use validator::Validate;

// Request para marcar o mover un cartel
#[derive(Debug, Deserialize, Validate)]
pub struct PosterRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,

    /// Ausente equivale a nota vacía
    pub note: Option<String>,
}
