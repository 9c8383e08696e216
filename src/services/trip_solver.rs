//! Adaptador del servicio trip de OSRM
//!
//! Construye la lista de puntos (salida fija o stop más al norte primero),
//! delega el orden a OSRM y reconcilia `waypoint_index` con los stops originales.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Coordinate, Located};

use super::nearest_neighbor::northernmost_index;
use super::osrm_client::{ExternalOutcome, OsrmClient};

/// Cualquier fallo del solver externo; el llamador siempre cae a la heurística
#[derive(Error, Debug, Clone, PartialEq)]
#[error("trip solver unavailable: {0}")]
pub struct SolverUnavailable(pub String);

/// Servicio externo que ordena puntos en un viaje abierto empezando por el primero
#[async_trait]
pub trait TripSolver: Send + Sync {
    /// Para cada punto de entrada, su posición en el viaje
    async fn trip_positions(&self, points: &[Coordinate]) -> ExternalOutcome<Vec<usize>>;
}

#[async_trait]
impl TripSolver for OsrmClient {
    async fn trip_positions(&self, points: &[Coordinate]) -> ExternalOutcome<Vec<usize>> {
        self.trip(points).await
    }
}

/// Punto enviado al solver; `stop` es `None` para la salida sintética
#[derive(Debug, Clone)]
pub struct TripPoint<T> {
    pub coordinate: Coordinate,
    pub stop: Option<T>,
}

/// Lista de puntos para el solver en el orden en que se envían
pub fn build_trip_points<T: Located>(stops: Vec<T>, start: Option<Coordinate>) -> Vec<TripPoint<T>> {
    let mut points = Vec::with_capacity(stops.len() + 1);
    let mut stops = stops;

    match start {
        Some(anchor) => points.push(TripPoint { coordinate: anchor, stop: None }),
        None if !stops.is_empty() => {
            let first = stops.remove(northernmost_index(&stops));
            push_stop(&mut points, first);
        }
        None => {}
    }

    for stop in stops {
        push_stop(&mut points, stop);
    }

    points
}

fn push_stop<T: Located>(points: &mut Vec<TripPoint<T>>, stop: T) {
    if let Some(coordinate) = stop.coordinate() {
        points.push(TripPoint { coordinate, stop: Some(stop) });
    }
}

/// Reordena los puntos según las posiciones devueltas y descarta la salida sintética
pub fn reconcile_trip<T>(points: Vec<TripPoint<T>>, positions: &[usize]) -> Result<Vec<T>, SolverUnavailable> {
    if positions.len() != points.len() {
        return Err(SolverUnavailable(format!(
            "{} positions for {} points",
            positions.len(),
            points.len()
        )));
    }

    let mut slots: Vec<Option<TripPoint<T>>> = (0..points.len()).map(|_| None).collect();
    for (point, &position) in points.into_iter().zip(positions) {
        match slots.get_mut(position) {
            Some(slot) if slot.is_none() => *slot = Some(point),
            _ => return Err(SolverUnavailable(format!("invalid trip position {}", position))),
        }
    }

    Ok(slots
        .into_iter()
        .flatten()
        .filter_map(|point| point.stop)
        .collect())
}

/// Ordena los stops con el solver externo.
///
/// No reintenta: cualquier fallo (timeout, HTTP, 429, payload) termina en
/// `SolverUnavailable`.
pub async fn solve_with_trip_service<T: Located>(
    solver: &dyn TripSolver,
    stops: Vec<T>,
    start: Option<Coordinate>,
) -> Result<Vec<T>, SolverUnavailable> {
    let points = build_trip_points(stops, start);
    let coordinates: Vec<Coordinate> = points.iter().map(|p| p.coordinate).collect();

    match solver.trip_positions(&coordinates).await {
        ExternalOutcome::Success(positions) => reconcile_trip(points, &positions),
        ExternalOutcome::RateLimited => Err(SolverUnavailable("rate limited".to_string())),
        ExternalOutcome::Failed(reason) => Err(SolverUnavailable(reason)),
    }
}
