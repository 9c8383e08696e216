use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::nullable::double_option;

// Request para crear un stop desde el panel de organización
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStopRequest {
    pub name: Option<String>,
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub address: String,

    pub zip: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub payment_method: Option<String>,
    pub note: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,

    pub territory_id: Option<i64>,
}

/// El endpoint acepta un stop o una lista
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateStopsPayload {
    Many(Vec<CreateStopRequest>),
    One(CreateStopRequest),
}

impl CreateStopsPayload {
    pub fn into_vec(self) -> Vec<CreateStopRequest> {
        match self {
            CreateStopsPayload::Many(stops) => stops,
            CreateStopsPayload::One(stop) => vec![stop],
        }
    }
}

// Request de registro de un vecino
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStopRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub address: String,

    #[validate(length(min = 1, max = 16))]
    pub zip: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub payment_method: Option<String>,
    pub note: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
}

impl From<RegisterStopRequest> for CreateStopRequest {
    fn from(request: RegisterStopRequest) -> Self {
        Self {
            name: Some(request.name),
            first_name: request.first_name,
            address: request.address,
            zip: Some(request.zip),
            city: Some(request.city),
            phone: request.phone,
            email: request.email,
            payment_method: Some(request.payment_method.unwrap_or_else(|| "Bar".to_string())),
            note: request.note,
            lat: request.lat,
            lng: request.lng,
            territory_id: None,
        }
    }
}

// Request para actualizar un stop en campo o desde el panel.
// `territory_id`, `lat`, `lng` y `note` aceptan `null` para vaciar la columna.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStopRequest {
    pub status: Option<String>,
    pub sequence: Option<i32>,

    #[serde(default, deserialize_with = "double_option")]
    pub territory_id: Option<Option<i64>>,

    #[serde(default, deserialize_with = "double_option")]
    pub lat: Option<Option<f64>>,

    #[serde(default, deserialize_with = "double_option")]
    pub lng: Option<Option<f64>>,

    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
}

impl UpdateStopRequest {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.sequence.is_none()
            && self.territory_id.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.note.is_none()
    }
}

impl Validate for UpdateStopRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(Some(lat)) = self.lat {
            if !(-90.0..=90.0).contains(&lat) {
                errors.add("lat", ValidationError::new("range"));
            }
        }
        if let Some(Some(lng)) = self.lng {
            if !(-180.0..=180.0).contains(&lng) {
                errors.add("lng", ValidationError::new("range"));
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// Filtro del listado
#[derive(Debug, Deserialize)]
pub struct StopQuery {
    pub territory_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accepts_single_and_list() {
        let one: CreateStopsPayload = serde_json::from_str(r#"{"address":"Hauptstr. 1"}"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: CreateStopsPayload =
            serde_json::from_str(r#"[{"address":"Hauptstr. 1"},{"address":"Hauptstr. 2"}]"#).unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_registration_requires_city() {
        let request: RegisterStopRequest = serde_json::from_str(
            r#"{"name":"Meier","address":"Hauptstr. 1","zip":"92637","city":""}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_registration_defaults_payment_method() {
        let request: RegisterStopRequest = serde_json::from_str(
            r#"{"name":"Meier","address":"Hauptstr. 1","zip":"92637","city":"Weiden"}"#,
        )
        .unwrap();
        let stop: CreateStopRequest = request.into();
        assert_eq!(stop.payment_method.as_deref(), Some("Bar"));
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let cleared: UpdateStopRequest = serde_json::from_str(r#"{"territory_id":null}"#).unwrap();
        assert!(!cleared.is_empty());
        assert_eq!(cleared.territory_id, Some(None));
        assert_eq!(cleared.lat, None);

        let moved: UpdateStopRequest = serde_json::from_str(r#"{"territory_id":3,"note":null}"#).unwrap();
        assert_eq!(moved.territory_id, Some(Some(3)));
        assert_eq!(moved.note, Some(None));

        let empty: UpdateStopRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_update_rejects_out_of_range_coordinates() {
        let request: UpdateStopRequest = serde_json::from_str(r#"{"lat":91.0,"lng":null}"#).unwrap();
        assert!(request.validate().is_err());

        let cleared: UpdateStopRequest = serde_json::from_str(r#"{"lat":null,"lng":null}"#).unwrap();
        assert!(cleared.validate().is_ok());
    }
}
