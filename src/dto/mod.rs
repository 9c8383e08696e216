//! DTOs de la API y de los servicios externos

pub mod api_response;
pub mod campaign_dto;
pub mod checklist_dto;
pub mod nullable;
pub mod osrm_dto;
pub mod poster_dto;
pub mod route_dto;
pub mod stop_dto;
pub mod territory_dto;

pub use api_response::ApiResponse;
