use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    application::usecases::parking_lots::ParkingLotsUseCase,
    domain::{
        repositories::parking_store::ParkingStoreGateway,
        value_objects::parking_lots::CreateParkingLotModel,
    },
    infrastructure::axum_http::error_responses::ApiError,
};

pub fn routes<S>(parking_store: Arc<S>) -> Router
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    let parking_lots_usecase = ParkingLotsUseCase::new(parking_store);

    Router::new()
        .route("/", post(create_lot::<S>))
        .route("/:lot_id/available-spots", get(count_available_spots::<S>))
        .route("/:lot_id/available-spots/list", get(list_available_spots::<S>))
        .with_state(Arc::new(parking_lots_usecase))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLotRequest {
    pub lot_name: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub levels: Option<i32>,
}

pub async fn create_lot<T>(
    State(parking_lots_usecase): State<Arc<ParkingLotsUseCase<T>>>,
    payload: Result<Json<CreateLotRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Json(request) = payload?;

    let (Some(lot_name), Some(capacity)) = (request.lot_name, request.capacity) else {
        return Err(ApiError::BadRequest(
            "lotName and capacity are required".to_string(),
        ));
    };

    let created = parking_lots_usecase
        .create_lot_with_default_rates(CreateParkingLotModel {
            lot_name,
            capacity,
            location: request.location.filter(|location| !location.trim().is_empty()),
            levels: request.levels.unwrap_or(1),
        })
        .await?;

    Ok(Json(created))
}

pub async fn count_available_spots<T>(
    State(parking_lots_usecase): State<Arc<ParkingLotsUseCase<T>>>,
    lot_id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Path(lot_id) = lot_id?;
    let available = parking_lots_usecase.count_available_spots(lot_id).await?;

    Ok(Json(available))
}

pub async fn list_available_spots<T>(
    State(parking_lots_usecase): State<Arc<ParkingLotsUseCase<T>>>,
    lot_id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Path(lot_id) = lot_id?;
    let spots = parking_lots_usecase.list_available_spots(lot_id).await?;

    Ok(Json(spots))
}
