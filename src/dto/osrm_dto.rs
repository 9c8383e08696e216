//! DTOs para la API de OSRM (trip y route)
//!
//! Las respuestas se validan aquí mismo: hacia los servicios solo salen
//! posiciones de viaje (`Vec<usize>`) y caminos en `[lat, lng]`.

use serde::Deserialize;

use crate::models::Coordinate;

/// Response del servicio trip de OSRM
#[derive(Debug, Deserialize)]
pub struct OsrmTripResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub waypoints: Option<Vec<OsrmWaypoint>>,
}

/// Waypoint en la respuesta trip, en el mismo orden que las coordenadas enviadas
#[derive(Debug, Deserialize)]
pub struct OsrmWaypoint {
    /// Posición de este punto dentro del viaje calculado
    pub waypoint_index: usize,
}

impl OsrmTripResponse {
    /// Validar la respuesta y devolver, para cada punto de entrada, su posición en el viaje
    pub fn into_trip_positions(self, expected: usize) -> Result<Vec<usize>, String> {
        if self.code != "Ok" {
            return Err(format!(
                "OSRM trip code {}: {}",
                self.code,
                self.message.unwrap_or_default()
            ));
        }

        let waypoints = match self.waypoints {
            Some(waypoints) if !waypoints.is_empty() => waypoints,
            _ => return Err("OSRM trip response without waypoints".to_string()),
        };

        if waypoints.len() != expected {
            return Err(format!(
                "OSRM trip returned {} waypoints for {} points",
                waypoints.len(),
                expected
            ));
        }

        let mut seen = vec![false; expected];
        let mut positions = Vec::with_capacity(expected);
        for waypoint in waypoints {
            let position = waypoint.waypoint_index;
            if position >= expected || seen[position] {
                return Err(format!("OSRM trip waypoint_index {} is out of range or repeated", position));
            }
            seen[position] = true;
            positions.push(position);
        }

        Ok(positions)
    }
}

/// Response del servicio route de OSRM con `geometries=geojson`
#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: OsrmGeometry,
}

/// LineString GeoJSON, coordenadas en `[lng, lat]`
#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    pub coordinates: Vec<Vec<f64>>,
}

impl OsrmRouteResponse {
    /// Extraer la primera ruta como camino `[lat, lng]`
    pub fn into_path(self) -> Result<Vec<Coordinate>, String> {
        if let Some(code) = self.code.as_deref() {
            if code != "Ok" {
                return Err(format!("OSRM route code {}", code));
            }
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| "OSRM route response without routes".to_string())?;

        let path = route
            .geometry
            .coordinates
            .iter()
            .map(|point| match point.as_slice() {
                [lng, lat, ..] => Coordinate::from_parts(Some(*lat), Some(*lng))
                    .ok_or_else(|| "OSRM geometry with non-finite coordinate".to_string()),
                _ => Err("OSRM geometry point with fewer than two values".to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if path.len() < 2 {
            return Err(format!("OSRM geometry has only {} points", path.len()));
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_positions_from_minimal_response() {
        let body = r#"{"code":"Ok","waypoints":[{"waypoint_index":1},{"waypoint_index":0}]}"#;
        let response: OsrmTripResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_trip_positions(2).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_trip_rejects_non_ok_code() {
        let body = r#"{"code":"NoTrips","message":"no trip","waypoints":[]}"#;
        let response: OsrmTripResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_trip_positions(2).is_err());
    }

    #[test]
    fn test_trip_rejects_missing_waypoints() {
        let response: OsrmTripResponse = serde_json::from_str(r#"{"code":"Ok"}"#).unwrap();
        assert!(response.into_trip_positions(2).is_err());
    }

    #[test]
    fn test_trip_rejects_repeated_positions() {
        let body = r#"{"code":"Ok","waypoints":[{"waypoint_index":0},{"waypoint_index":0}]}"#;
        let response: OsrmTripResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_trip_positions(2).is_err());
    }

    #[test]
    fn test_route_path_swaps_axes() {
        let body = r#"{"code":"Ok","routes":[{"geometry":{"type":"LineString","coordinates":[[11.8,49.4],[11.81,49.41]]}}]}"#;
        let response: OsrmRouteResponse = serde_json::from_str(body).unwrap();
        let path = response.into_path().unwrap();
        assert_eq!(path, vec![Coordinate::new(49.4, 11.8), Coordinate::new(49.41, 11.81)]);
    }

    #[test]
    fn test_route_without_routes_is_an_error() {
        let response: OsrmRouteResponse = serde_json::from_str(r#"{"code":"Ok","routes":[]}"#).unwrap();
        assert!(response.into_path().is_err());
    }

    #[test]
    fn test_full_osrm_payloads_ignore_unused_fields() {
        let trip = r#"{"code":"Ok","waypoints":[{"waypoint_index":0,"trips_index":0,"location":[11.8,49.4]},{"waypoint_index":1,"trips_index":0,"location":[11.81,49.41]}],"trips":[{"distance":812.4,"duration":95.1}]}"#;
        let response: OsrmTripResponse = serde_json::from_str(trip).unwrap();
        assert_eq!(response.into_trip_positions(2).unwrap(), vec![0, 1]);

        let route = r#"{"code":"Ok","routes":[{"distance":812.4,"duration":95.1,"geometry":{"coordinates":[[11.8,49.4],[11.81,49.41]]}}]}"#;
        let response: OsrmRouteResponse = serde_json::from_str(route).unwrap();
        assert_eq!(response.into_path().unwrap().len(), 2);
    }
}
