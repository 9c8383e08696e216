//! Asignación de stops a territorios por polígono

use crate::models::{Coordinate, Territory};

/// Ray casting sobre el polígono `[lat, lng]`
pub fn point_in_polygon(point: Coordinate, polygon: &[Coordinate]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let (x, y) = (point.lat, point.lng);
    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].lat, polygon[i].lng);
        let (xj, yj) = (polygon[j].lat, polygon[j].lng);

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Primer territorio cuyo polígono contiene el punto
pub fn assign_territory(point: Coordinate, territories: &[Territory]) -> Option<i64> {
    territories
        .iter()
        .find(|territory| point_in_polygon(point, &territory.polygon_coordinates()))
        .map(|territory| territory.id)
}
