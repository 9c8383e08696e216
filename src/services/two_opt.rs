//! Mejora 2-opt sobre un recorrido abierto

use crate::models::Located;

use super::distance::distance;

/// Tope de pasadas por defecto
pub const DEFAULT_MAX_PASSES: usize = 50;

/// Aplica 2-opt hasta que una pasada completa no mejora o se llega a `max_passes`.
///
/// Para cada par de aristas no adyacentes `(i, i+1)` y `(j, j+1)` invierte el
/// tramo `i+1..=j` si eso acorta el recorrido. Con menos de 4 stops no hay
/// movimiento posible y la ruta se devuelve tal cual.
pub fn two_opt<T: Located>(mut route: Vec<T>, max_passes: usize) -> Vec<T> {
    let n = route.len();
    if n < 4 {
        return route;
    }

    let mut passes = 0;
    let mut improved = true;

    while improved && passes < max_passes {
        improved = false;
        passes += 1;

        for i in 0..n - 2 {
            for j in i + 2..n - 1 {
                let current = distance(&route[i], &route[i + 1]) + distance(&route[j], &route[j + 1]);
                let swapped = distance(&route[i], &route[j]) + distance(&route[i + 1], &route[j + 1]);

                if swapped < current {
                    route[i + 1..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    if improved {
        log::debug!("🔁 2-opt detenido tras {} pasadas sin converger", passes);
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::services::distance::route_length;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_route(rng: &mut StdRng, n: usize) -> Vec<Coordinate> {
        (0..n)
            .map(|_| Coordinate::new(rng.gen_range(49.35..49.45), rng.gen_range(11.75..11.90)))
            .collect()
    }

    #[test]
    fn test_short_routes_are_unchanged() {
        let route = vec![
            Coordinate::new(49.40, 11.80),
            Coordinate::new(49.41, 11.82),
            Coordinate::new(49.40, 11.81),
        ];
        assert_eq!(two_opt(route.clone(), DEFAULT_MAX_PASSES), route);
    }

    #[test]
    fn test_untangles_crossing() {
        // Cuadrado recorrido en zig-zag: 0 -> 2 -> 1 -> 3 cruza consigo mismo
        let route = vec![
            Coordinate::new(49.40, 11.80),
            Coordinate::new(49.41, 11.81),
            Coordinate::new(49.41, 11.80),
            Coordinate::new(49.40, 11.81),
        ];
        let before = route_length(&route);
        let refined = two_opt(route, DEFAULT_MAX_PASSES);
        assert!(route_length(&refined) < before);
        assert_eq!(refined[0], Coordinate::new(49.40, 11.80));
    }

    #[test]
    fn test_never_makes_routes_longer() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 4..30 {
            let route = random_route(&mut rng, n);
            let before = route_length(&route);
            let refined = two_opt(route, DEFAULT_MAX_PASSES);
            assert_eq!(refined.len(), n);
            assert!(route_length(&refined) <= before + 1e-6);
        }
    }

    #[test]
    fn test_second_run_is_a_fixed_point() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [4, 6, 8, 10, 12] {
            let refined = two_opt(random_route(&mut rng, n), DEFAULT_MAX_PASSES);
            let again = two_opt(refined.clone(), DEFAULT_MAX_PASSES);
            assert_eq!(again, refined);
        }
    }

    #[test]
    fn test_zero_passes_leaves_route_alone() {
        let mut rng = StdRng::seed_from_u64(3);
        let route = random_route(&mut rng, 10);
        assert_eq!(two_opt(route.clone(), 0), route);
    }
}
