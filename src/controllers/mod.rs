pub mod campaign_controller;
pub mod checklist_controller;
pub mod poster_controller;
pub mod route_controller;
pub mod stop_controller;
pub mod territory_controller;
