//! Services module
//! 
//! Este módulo contiene la lógica de negocio del planificador de rutas.
//! Los algoritmos puros (distancia, vecino más cercano, 2-opt) no tocan la
//! persistencia; los servicios de ruta hablan con `RouteStore` y con OSRM.

pub mod distance;
pub mod nearest_neighbor;
pub mod osrm_client;
pub mod route_geometry_service;
pub mod route_sequencer;
pub mod territory_assignment;
pub mod territory_batch_service;
pub mod trip_solver;
pub mod two_opt;

pub use osrm_client::{ExternalOutcome, OsrmClient};
pub use route_geometry_service::{DirectionsProvider, GeometryOutcome, RouteGeometryService};
pub use route_sequencer::{RouteSequencer, SequenceOutcome, SequencerSettings, SequencingStrategy};
pub use territory_batch_service::TerritoryBatchService;
pub use trip_solver::TripSolver;
