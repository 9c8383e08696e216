//! Secuenciación completa sobre el store en memoria y un OSRM local falso

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use tree_collection_routing::config::RoutingConfig;
use tree_collection_routing::models::{Coordinate, Stop, Territory};
use tree_collection_routing::repositories::InMemoryRouteStore;
use tree_collection_routing::services::{
    GeometryOutcome, OsrmClient, RouteGeometryService, RouteSequencer, SequencerSettings, SequencingStrategy,
};

#[derive(Clone, Default)]
struct FakeOsrm {
    trip_calls: Arc<AtomicUsize>,
    route_calls: Arc<AtomicUsize>,
}

/// Deja el primer punto fijo e invierte el resto
async fn trip(State(fake): State<FakeOsrm>, Path(coords): Path<String>) -> Json<serde_json::Value> {
    fake.trip_calls.fetch_add(1, Ordering::SeqCst);
    let n = coords.split(';').count();
    let waypoints: Vec<_> = (0..n)
        .map(|i| json!({ "waypoint_index": if i == 0 { 0 } else { n - i } }))
        .collect();
    Json(json!({ "code": "Ok", "waypoints": waypoints }))
}

async fn rate_limited_route(State(fake): State<FakeOsrm>) -> Response {
    fake.route_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response()
}

async fn spawn_osrm(fake: FakeOsrm) -> String {
    let router = Router::new()
        .route("/trip/v1/driving/:coords", get(trip))
        .route("/route/v1/driving/:coords", get(rate_limited_route))
        .with_state(fake);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn sequencer_for(store: Arc<InMemoryRouteStore>, base_url: String) -> RouteSequencer {
    let config = RoutingConfig {
        osrm_base_url: base_url,
        osrm_timeout: Duration::from_secs(2),
        ..RoutingConfig::default()
    };
    let osrm = Arc::new(OsrmClient::new(&config).unwrap());
    let geometry = RouteGeometryService::new(store.clone(), osrm.clone());
    RouteSequencer::new(store, osrm, geometry, SequencerSettings::from(&config))
}

async fn store_with_three_stops() -> Arc<InMemoryRouteStore> {
    let store = Arc::new(InMemoryRouteStore::new());
    store.insert_territory(Territory::new(1, "Altstadt", "#aa0000", &[])).await;
    store.insert_stop(Stop::new(1, "Marktplatz 1").located_at(49.40, 11.80).in_territory(1)).await;
    store.insert_stop(Stop::new(2, "Marktplatz 2").located_at(49.41, 11.80).in_territory(1)).await;
    store.insert_stop(Stop::new(3, "Marktplatz 3").located_at(49.40, 11.82).in_territory(1)).await;
    store.insert_stop(Stop::new(4, "Ohne Koordinaten").in_territory(1).with_sequence(9)).await;
    store
}

#[tokio::test]
async fn optimize_uses_trip_service_and_straight_line_on_rate_limit() {
    let fake = FakeOsrm::default();
    let base_url = spawn_osrm(fake.clone()).await;
    let store = store_with_three_stops().await;

    let outcome = sequencer_for(store.clone(), base_url).optimize_territory(1, None).await.unwrap();

    assert_eq!(outcome.strategy, SequencingStrategy::TripService);
    assert_eq!(outcome.geometry, GeometryOutcome::StraightLine { points: 3 });
    assert_eq!(fake.trip_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fake.route_calls.load(Ordering::SeqCst), 1);

    // Enviado: 2 (más al norte), 1, 3; viaje devuelto: 2, 3, 1
    let order: Vec<i64> = {
        let mut stops = vec![
            store.stop(1).await.unwrap(),
            store.stop(2).await.unwrap(),
            store.stop(3).await.unwrap(),
        ];
        stops.sort_by_key(|stop| stop.sequence);
        stops.iter().map(|stop| stop.id).collect()
    };
    assert_eq!(order, vec![2, 3, 1]);
    assert_eq!(store.stop(4).await.unwrap().sequence, 9);

    let geometry = store.territory(1).await.unwrap().route_coordinates().unwrap();
    assert_eq!(
        geometry,
        vec![
            Coordinate::new(49.41, 11.80),
            Coordinate::new(49.40, 11.82),
            Coordinate::new(49.40, 11.80),
        ]
    );
}

#[tokio::test]
async fn start_point_is_sent_first_and_excluded_from_result() {
    let fake = FakeOsrm::default();
    let base_url = spawn_osrm(fake.clone()).await;
    let store = store_with_three_stops().await;

    let start = Coordinate::new(49.39, 11.79);
    let outcome = sequencer_for(store.clone(), base_url).optimize_territory(1, Some(start)).await.unwrap();

    // Enviado: salida, 1, 2, 3; viaje: salida, 3, 2, 1
    assert_eq!(outcome.sequenced_stops, 3);
    assert_eq!(store.stop(3).await.unwrap().sequence, 0);
    assert_eq!(store.stop(2).await.unwrap().sequence, 1);
    assert_eq!(store.stop(1).await.unwrap().sequence, 2);
}

#[tokio::test]
async fn unreachable_osrm_falls_back_to_heuristic() {
    let store = store_with_three_stops().await;

    let outcome = sequencer_for(store.clone(), "http://127.0.0.1:9".to_string())
        .optimize_territory(1, None)
        .await
        .unwrap();

    assert_eq!(outcome.strategy, SequencingStrategy::Heuristic);
    assert_eq!(outcome.geometry, GeometryOutcome::StraightLine { points: 3 });
    assert_eq!(store.stop(2).await.unwrap().sequence, 0);
    assert_eq!(store.stop(1).await.unwrap().sequence, 1);
    assert_eq!(store.stop(3).await.unwrap().sequence, 2);
}

#[tokio::test]
async fn large_territory_never_reaches_trip_endpoint() {
    let fake = FakeOsrm::default();
    let base_url = spawn_osrm(fake.clone()).await;
    let store = Arc::new(InMemoryRouteStore::new());
    store.insert_territory(Territory::new(7, "Groß", "#00aa00", &[])).await;
    for i in 0..120i64 {
        let lat = 49.30 + (i % 12) as f64 * 0.002;
        let lng = 11.70 + (i / 12) as f64 * 0.003;
        store.insert_stop(Stop::new(i + 1, format!("Weg {}", i)).located_at(lat, lng).in_territory(7)).await;
    }

    let outcome = sequencer_for(store.clone(), base_url).optimize_territory(7, None).await.unwrap();

    assert_eq!(outcome.strategy, SequencingStrategy::Heuristic);
    assert_eq!(outcome.sequenced_stops, 120);
    assert_eq!(fake.trip_calls.load(Ordering::SeqCst), 0);

    let mut sequences = Vec::new();
    for id in 1..=120 {
        sequences.push(store.stop(id).await.unwrap().sequence);
    }
    sequences.sort_unstable();
    assert_eq!(sequences, (0..120).collect::<Vec<i32>>());
}
