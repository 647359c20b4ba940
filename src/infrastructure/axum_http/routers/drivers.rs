use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::drivers::DriversUseCase,
    domain::repositories::parking_store::ParkingStoreGateway,
    infrastructure::axum_http::error_responses::ApiError,
};

pub fn routes<S>(parking_store: Arc<S>) -> Router
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    let drivers_usecase = DriversUseCase::new(parking_store);

    Router::new()
        .route("/:driver_id/total-spent", get(total_spent::<S>))
        .with_state(Arc::new(drivers_usecase))
}

pub async fn total_spent<T>(
    State(drivers_usecase): State<Arc<DriversUseCase<T>>>,
    driver_id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Path(driver_id) = driver_id?;
    let total_spent = drivers_usecase.total_spent(driver_id).await?;

    Ok(Json(total_spent))
}
