//! Repositorios
//! 
//! Acceso a PostgreSQL con SQLx y el contrato `RouteStore` que usa el núcleo
//! de rutas.

pub mod campaign_repository;
pub mod checklist_repository;
pub mod memory_route_store;
pub mod pg_route_store;
pub mod poster_repository;
pub mod route_store;
pub mod stop_repository;
pub mod territory_repository;

pub use memory_route_store::InMemoryRouteStore;
pub use pg_route_store::PgRouteStore;
pub use route_store::RouteStore;
