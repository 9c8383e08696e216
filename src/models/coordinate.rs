//! Coordenadas WGS84
//!
//! Todo el núcleo trabaja en `(lat, lng)` en grados. El orden `lng,lat` solo
//! aparece en el borde con OSRM.

use serde::{Deserialize, Serialize};

/// Punto geográfico en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construye una coordenada solo si ambos componentes existen y son finitos
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(Self { lat, lng }),
            _ => None,
        }
    }

    /// Par `[lat, lng]` tal como se guarda en las columnas JSON
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self { lat: pair[0], lng: pair[1] }
    }

    /// Formato `lng,lat` que esperan los endpoints de OSRM
    pub fn to_lng_lat(self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

/// Cualquier cosa que pueda (o no) ubicarse en el mapa
pub trait Located {
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Self::from_parts(Some(self.lat), Some(self.lng))
    }
}

impl<T: Located> Located for &T {
    fn coordinate(&self) -> Option<Coordinate> {
        (*self).coordinate()
    }
}

/// Lista de coordenadas separada por `;` para las URLs de OSRM
pub fn osrm_coordinate_list(points: &[Coordinate]) -> String {
    points
        .iter()
        .map(|p| p.to_lng_lat())
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both_components() {
        assert!(Coordinate::from_parts(Some(49.4), None).is_none());
        assert!(Coordinate::from_parts(None, Some(11.8)).is_none());
        assert!(Coordinate::from_parts(Some(f64::NAN), Some(11.8)).is_none());
        assert_eq!(
            Coordinate::from_parts(Some(49.4), Some(11.8)),
            Some(Coordinate::new(49.4, 11.8))
        );
    }

    #[test]
    fn test_osrm_coordinate_list_uses_lng_lat_order() {
        let points = vec![Coordinate::new(49.40, 11.80), Coordinate::new(49.41, 11.81)];
        assert_eq!(osrm_coordinate_list(&points), "11.8,49.4;11.81,49.41");
    }
}
