use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    application::usecases::ticket_lifecycle::TicketLifecycleUseCase,
    domain::{
        repositories::parking_store::ParkingStoreGateway,
        value_objects::{enums::payment_methods::PaymentMethod, tickets::parse_entry_time},
    },
    infrastructure::axum_http::error_responses::ApiError,
};

pub fn routes<S>(parking_store: Arc<S>) -> Router
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    let ticket_lifecycle_usecase = TicketLifecycleUseCase::new(parking_store);

    Router::new()
        .route("/", post(open_ticket::<S>))
        .route("/swap-spot", post(swap_spot::<S>))
        .route("/process-exit", post(process_exit::<S>))
        .route("/:ticket_id/estimate-exit", get(estimate_exit::<S>))
        .with_state(Arc::new(ticket_lifecycle_usecase))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTicketRequest {
    pub license_plate: Option<String>,
    pub spot_id: Option<i32>,
    pub rate_id: Option<i32>,
    pub entry_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapSpotRequest {
    pub ticket_id: Option<i32>,
    pub new_spot_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessExitRequest {
    pub ticket_id: Option<i32>,
    pub amount_paid: Option<Decimal>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct StatusOk {
    status: &'static str,
}

pub async fn open_ticket<T>(
    State(ticket_lifecycle_usecase): State<Arc<TicketLifecycleUseCase<T>>>,
    payload: Result<Json<OpenTicketRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Json(request) = payload?;

    let (Some(license_plate), Some(spot_id), Some(rate_id)) =
        (request.license_plate, request.spot_id, request.rate_id)
    else {
        return Err(ApiError::BadRequest(
            "licensePlate, spotId and rateId are required".to_string(),
        ));
    };

    let entry_time = match request.entry_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_entry_time(raw).ok_or_else(|| {
            ApiError::BadRequest(format!("entryTime is not a valid timestamp: {raw}"))
        })?),
    };

    let opened = ticket_lifecycle_usecase
        .open_ticket(license_plate, spot_id, rate_id, entry_time)
        .await?;

    Ok(Json(opened))
}

pub async fn swap_spot<T>(
    State(ticket_lifecycle_usecase): State<Arc<TicketLifecycleUseCase<T>>>,
    payload: Result<Json<SwapSpotRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Json(request) = payload?;

    let (Some(ticket_id), Some(new_spot_number)) = (request.ticket_id, request.new_spot_number)
    else {
        return Err(ApiError::BadRequest(
            "ticketId and newSpotNumber are required".to_string(),
        ));
    };

    ticket_lifecycle_usecase
        .swap_spot(ticket_id, new_spot_number)
        .await?;

    Ok(Json(StatusOk { status: "ok" }))
}

pub async fn estimate_exit<T>(
    State(ticket_lifecycle_usecase): State<Arc<TicketLifecycleUseCase<T>>>,
    ticket_id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Path(ticket_id) = ticket_id?;
    let estimate = ticket_lifecycle_usecase.estimate_exit(ticket_id).await?;

    Ok(Json(estimate))
}

pub async fn process_exit<T>(
    State(ticket_lifecycle_usecase): State<Arc<TicketLifecycleUseCase<T>>>,
    payload: Result<Json<ProcessExitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: ParkingStoreGateway + Send + Sync + 'static,
{
    let Json(request) = payload?;

    let (Some(ticket_id), Some(amount_paid), Some(payment_method)) =
        (request.ticket_id, request.amount_paid, request.payment_method)
    else {
        return Err(ApiError::BadRequest(
            "ticketId, amountPaid and paymentMethod are required".to_string(),
        ));
    };

    let payment_method =
        PaymentMethod::try_from(payment_method.trim()).map_err(ApiError::BadRequest)?;

    let processed = ticket_lifecycle_usecase
        .process_exit(ticket_id, amount_paid, payment_method)
        .await?;

    Ok(Json(processed))
}
