//! Distancia de círculo máximo (haversine)

use crate::models::Located;

/// Radio terrestre en metros
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distancia en metros entre dos puntos.
///
/// Si alguno de los dos no tiene coordenadas válidas devuelve `f64::INFINITY`,
/// que los algoritmos tratan como "inalcanzable".
pub fn distance<A: Located, B: Located>(a: &A, b: &B) -> f64 {
    let (Some(from), Some(to)) = (a.coordinate(), b.coordinate()) else {
        return f64::INFINITY;
    };

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Longitud total de un recorrido abierto, en metros
pub fn route_length<T: Located>(route: &[T]) -> f64 {
    route.windows(2).map(|pair| distance(&pair[0], &pair[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Stop};

    #[test]
    fn test_same_point_is_zero() {
        let a = Coordinate::new(49.40, 11.80);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (Coordinate::new(49.40, 11.80), Coordinate::new(49.41, 11.82)),
            (Coordinate::new(-33.86, 151.21), Coordinate::new(51.51, -0.13)),
            (Coordinate::new(0.0, 179.9), Coordinate::new(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance(&a, &b), distance(&b, &a));
        }
    }

    #[test]
    fn test_known_distance() {
        // Un grado de latitud son ~111.2 km
        let d = distance(&Coordinate::new(49.0, 11.8), &Coordinate::new(50.0, 11.8));
        assert!((d - 111_195.0).abs() < 100.0, "got {}", d);
    }

    #[test]
    fn test_unlocated_is_infinite() {
        let located = Stop::new(1, "Hauptstr. 1").located_at(49.4, 11.8);
        let unlocated = Stop::new(2, "Hauptstr. 2");
        assert_eq!(distance(&located, &unlocated), f64::INFINITY);
        assert_eq!(distance(&unlocated, &located), f64::INFINITY);
    }

    #[test]
    fn test_route_length_of_short_routes() {
        let single = [Coordinate::new(49.4, 11.8)];
        assert_eq!(route_length(&single), 0.0);
        assert_eq!(route_length::<Coordinate>(&[]), 0.0);
    }
}
