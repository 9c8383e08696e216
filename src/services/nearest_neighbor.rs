//! Construcción inicial por vecino más cercano

use crate::models::{Coordinate, Located};

use super::distance::distance;

/// Ordena los stops saltando siempre al más cercano no visitado.
///
/// El primero es el más cercano a `start` si existe; si no, el más al norte.
/// Los empates se resuelven por orden de entrada. Los stops deben venir con
/// coordenadas válidas.
pub fn nearest_neighbor<T: Located>(stops: Vec<T>, start: Option<Coordinate>) -> Vec<T> {
    let mut remaining = stops;
    let mut sorted = Vec::with_capacity(remaining.len());

    if remaining.is_empty() {
        return sorted;
    }

    let first = match start {
        Some(anchor) => closest_index(&remaining, &anchor),
        None => northernmost_index(&remaining),
    };
    sorted.push(remaining.remove(first));

    while !remaining.is_empty() {
        let Some(current) = sorted.last() else { break };
        let next = closest_index(&remaining, current);
        sorted.push(remaining.remove(next));
    }

    sorted
}

/// Índice del stop con mayor latitud (el primero en caso de empate)
pub fn northernmost_index<T: Located>(stops: &[T]) -> usize {
    let mut best_idx = 0;
    let mut best_lat = f64::NEG_INFINITY;
    for (idx, stop) in stops.iter().enumerate() {
        if let Some(coordinate) = stop.coordinate() {
            if coordinate.lat > best_lat {
                best_lat = coordinate.lat;
                best_idx = idx;
            }
        }
    }
    best_idx
}

fn closest_index<T: Located, P: Located>(candidates: &[T], from: &P) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, candidate) in candidates.iter().enumerate() {
        let d = distance(from, candidate);
        if d < best_dist {
            best_dist = d;
            best_idx = idx;
        }
    }
    best_idx
}
