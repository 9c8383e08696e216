use std::collections::BTreeSet;

use sqlx::PgPool;
use validator::Validate;

use crate::dto::stop_dto::{CreateStopRequest, RegisterStopRequest, UpdateStopRequest};
use crate::dto::territory_dto::CreatedResponse;
use crate::dto::ApiResponse;
use crate::models::{Coordinate, Stop, StopStatus};
use crate::repositories::stop_repository::{StopChanges, StopRepository};
use crate::repositories::territory_repository::TerritoryRepository;
use crate::services::territory_assignment::assign_territory;
use crate::services::RouteGeometryService;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct StopController {
    stops: StopRepository,
    territories: TerritoryRepository,
    geometry: RouteGeometryService,
}

impl StopController {
    pub fn new(pool: PgPool, geometry: RouteGeometryService) -> Self {
        Self {
            stops: StopRepository::new(pool.clone()),
            territories: TerritoryRepository::new(pool),
            geometry,
        }
    }

    pub async fn list(&self, territory_id: Option<i64>) -> Result<Vec<Stop>, AppError> {
        match territory_id {
            Some(id) => self.stops.find_by_territory(id).await,
            None => self.stops.find_all().await,
        }
    }

    /// Inserta los stops, los asigna por polígono y recalcula la geometría afectada
    pub async fn create(&self, requests: Vec<CreateStopRequest>) -> Result<ApiResponse<Vec<Stop>>, AppError> {
        if requests.is_empty() {
            return Err(bad_request_error("No stops provided"));
        }
        for request in &requests {
            request.validate()?;
        }

        let territories = self.territories.find_all().await?;
        let requests: Vec<CreateStopRequest> = requests
            .into_iter()
            .map(|mut request| {
                if request.territory_id.is_none() {
                    if let Some(point) = Coordinate::from_parts(request.lat, request.lng) {
                        request.territory_id = assign_territory(point, &territories);
                    }
                }
                request
            })
            .collect();

        let created = self.stops.create_many(requests).await?;
        log::info!("🌲 {} stops creados", created.len());

        // Los stops ya están guardados; la geometría se recalcula sin afectar la respuesta
        let affected: BTreeSet<i64> = created.iter().filter_map(|stop| stop.territory_id).collect();
        self.geometry.rebuild_after_write(affected).await;

        Ok(ApiResponse::success(created))
    }

    /// Alta desde el formulario público
    pub async fn register(&self, request: RegisterStopRequest) -> Result<ApiResponse<CreatedResponse>, AppError> {
        request.validate()?;

        let response = self.create(vec![request.into()]).await?;
        let id = response
            .data
            .and_then(|stops| stops.first().map(|stop| stop.id))
            .ok_or_else(|| AppError::Internal("registration returned no stop".to_string()))?;

        Ok(ApiResponse::success_with_message(
            CreatedResponse { id },
            "Registration received".to_string(),
        ))
    }

    pub async fn update(&self, id: i64, request: UpdateStopRequest) -> Result<ApiResponse<Stop>, AppError> {
        if request.is_empty() {
            return Err(bad_request_error("No fields to update"));
        }
        request.validate()?;

        let status = match request.status {
            Some(value) => match StopStatus::parse(&value) {
                Some(status) => Some(status.as_str().to_string()),
                None => return Err(bad_request_error(&format!("Unknown status '{}'", value))),
            },
            None => None,
        };

        let stop = self
            .stops
            .update(
                id,
                StopChanges {
                    status,
                    sequence: request.sequence,
                    territory_id: request.territory_id,
                    lat: request.lat,
                    lng: request.lng,
                    note: request.note,
                },
            )
            .await?;

        Ok(ApiResponse::success(stop))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.stops.delete(id).await? {
            return Err(not_found_error("Stop", id));
        }
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let deleted = self.stops.delete_all().await?;
        log::warn!("🗑️ Todos los stops eliminados ({})", deleted);
        Ok(deleted)
    }
}
