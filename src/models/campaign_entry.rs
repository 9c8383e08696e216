//! Modelo de la campaña telefónica
//!
//! Vecinos de años anteriores a los que se llama para que vuelvan a registrar
//! su árbol. Mapea a la tabla `campaign_entries`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado de la llamada
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Open,
    Called,
    NotReached,
    Registered,
    Deleted,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Open => "open",
            CampaignStatus::Called => "called",
            CampaignStatus::NotReached => "not_reached",
            CampaignStatus::Registered => "registered",
            CampaignStatus::Deleted => "deleted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(CampaignStatus::Open),
            "called" => Some(CampaignStatus::Called),
            "not_reached" => Some(CampaignStatus::NotReached),
            "registered" => Some(CampaignStatus::Registered),
            "deleted" => Some(CampaignStatus::Deleted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CampaignEntry {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub status: String,
    pub last_updated: DateTime<Utc>,
}
