use serde::{Deserialize, Serialize};
use validator::Validate;

/// Acciones masivas sobre la lista de llamadas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignAction {
    DeleteAll,
    /// Reinicio para el año siguiente: todas las entradas vuelven a `open`
    ResetStatus,
}

impl CampaignAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "delete_all" => Some(CampaignAction::DeleteAll),
            "reset_status" => Some(CampaignAction::ResetStatus),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CampaignActionRequest {
    pub action: String,
}

// Request para anotar el resultado de una llamada
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCampaignEntryRequest {
    #[validate(required)]
    pub id: Option<i64>,

    #[validate(required, length(min = 1))]
    pub status: Option<String>,
}

// Request para convertir una entrada en stop
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCampaignEntryRequest {
    #[validate(required)]
    pub id: Option<i64>,

    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(required, length(min = 1, max = 300))]
    pub address: Option<String>,

    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CampaignRegistrationResponse {
    pub entry_id: i64,
    pub stop_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CampaignActionResponse {
    pub affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_action_is_not_parsed() {
        assert_eq!(CampaignAction::parse("reset_status"), Some(CampaignAction::ResetStatus));
        assert_eq!(CampaignAction::parse("archive"), None);
    }

    #[test]
    fn test_entry_update_requires_status() {
        let request: UpdateCampaignEntryRequest = serde_json::from_str(r#"{"id":4}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_registration_requires_address() {
        let request: RegisterCampaignEntryRequest =
            serde_json::from_str(r#"{"id":4,"name":"Huber","phone":"0961 123"}"#).unwrap();
        assert!(request.validate().is_err());

        let request: RegisterCampaignEntryRequest =
            serde_json::from_str(r#"{"id":4,"name":"Huber","address":"Ringstr. 2"}"#).unwrap();
        assert!(request.validate().is_ok());
    }
}
