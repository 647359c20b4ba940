use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    application::{
        billing::{
            exit_validator::{self, ExitValidationError},
            fee_calculator::{FeeError, calculate_fee},
        },
        errors::FailureKind,
    },
    domain::{
        entities::{parking_rates::ParkingRateEntity, parking_tickets::ParkingTicketEntity},
        repositories::parking_store::{ParkingStoreGateway, StoreError},
        value_objects::{
            enums::payment_methods::PaymentMethod,
            tickets::{EstimateExitDto, OpenTicketDto, OpenTicketModel, ProcessExitDto, ProcessExitModel},
        },
    },
};

#[derive(Debug, Error)]
pub enum TicketLifecycleError {
    #[error("Ticket not found")]
    TicketNotFound(i32),
    #[error("Spot not found: {0}")]
    SpotNotFound(String),
    #[error("Rate not found for ticket")]
    RateNotFound(i32),
    #[error("Ticket has no entry time")]
    MissingEntryTime(i32),
    #[error("Spot {0} is already occupied")]
    SpotOccupied(String),
    #[error("Ticket {0} is not open")]
    TicketNotOpen(i32),
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error(
        "Payment amount ({submitted:.2}) does not match required fee ({expected:.2}). Please pay the exact amount."
    )]
    AmountMismatch { submitted: Decimal, expected: Decimal },
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TicketLifecycleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TicketLifecycleError::TicketNotFound(_)
            | TicketLifecycleError::SpotNotFound(_)
            | TicketLifecycleError::RateNotFound(_) => FailureKind::NotFound,
            TicketLifecycleError::MissingEntryTime(_)
            | TicketLifecycleError::SpotOccupied(_)
            | TicketLifecycleError::TicketNotOpen(_) => FailureKind::InvalidState,
            TicketLifecycleError::InvalidReference(_)
            | TicketLifecycleError::AmountMismatch { .. }
            | TicketLifecycleError::InvalidInput(_) => FailureKind::Validation,
            TicketLifecycleError::Internal(_) => FailureKind::StoreFailure,
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        self.kind().status_code()
    }
}

impl From<StoreError> for TicketLifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TicketNotFound(ticket_id) => TicketLifecycleError::TicketNotFound(ticket_id),
            StoreError::SpotNotFound(spot) => TicketLifecycleError::SpotNotFound(spot),
            StoreError::SpotOccupied(spot) => TicketLifecycleError::SpotOccupied(spot),
            StoreError::TicketNotOpen(ticket_id) => TicketLifecycleError::TicketNotOpen(ticket_id),
            StoreError::InvalidReference(reference) => {
                TicketLifecycleError::InvalidReference(reference)
            }
            StoreError::DuplicateLotName(name) => {
                TicketLifecycleError::Internal(anyhow!("unexpected duplicate lot name: {name}"))
            }
            StoreError::Internal(err) => TicketLifecycleError::Internal(err),
        }
    }
}

impl From<ExitValidationError> for TicketLifecycleError {
    fn from(err: ExitValidationError) -> Self {
        match err {
            ExitValidationError::TicketNotFound(ticket_id) => {
                TicketLifecycleError::TicketNotFound(ticket_id)
            }
            ExitValidationError::MissingEntryTime(ticket_id) => {
                TicketLifecycleError::MissingEntryTime(ticket_id)
            }
            ExitValidationError::RateNotFound(ticket_id) => {
                TicketLifecycleError::RateNotFound(ticket_id)
            }
            ExitValidationError::AmountMismatch {
                submitted,
                expected,
            } => TicketLifecycleError::AmountMismatch {
                submitted,
                expected,
            },
            ExitValidationError::Fee(err) => TicketLifecycleError::from(err),
        }
    }
}

impl From<FeeError> for TicketLifecycleError {
    fn from(err: FeeError) -> Self {
        TicketLifecycleError::Internal(anyhow::Error::new(err).context("fee calculation failed"))
    }
}

pub type UseCaseResult<T> = std::result::Result<T, TicketLifecycleError>;

/// A ticket that has everything billing needs.
struct BillableTicket {
    ticket: ParkingTicketEntity,
    entry_time: DateTime<Utc>,
    rate: ParkingRateEntity,
}

pub struct TicketLifecycleUseCase<S>
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    parking_store: Arc<S>,
}

impl<S> TicketLifecycleUseCase<S>
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    pub fn new(parking_store: Arc<S>) -> Self {
        Self { parking_store }
    }

    pub async fn open_ticket(
        &self,
        license_plate: String,
        spot_id: i32,
        rate_id: i32,
        entry_time: Option<DateTime<Utc>>,
    ) -> UseCaseResult<OpenTicketDto> {
        let license_plate = license_plate.trim().to_string();
        if license_plate.is_empty() {
            return Err(TicketLifecycleError::InvalidInput(
                "licensePlate must not be empty".to_string(),
            ));
        }

        let open_ticket_model = OpenTicketModel {
            license_plate,
            spot_id,
            rate_id,
            entry_time: entry_time.unwrap_or_else(Utc::now),
        };

        info!(
            spot_id,
            rate_id,
            license_plate = %open_ticket_model.license_plate,
            "tickets: opening ticket"
        );

        let ticket_id = self
            .parking_store
            .open_ticket(open_ticket_model)
            .await
            .map_err(|err| {
                Self::log_store_failure(&err, "tickets: failed to open ticket");
                TicketLifecycleError::from(err)
            })?;

        info!(ticket_id, spot_id, "tickets: ticket opened and spot occupied");

        Ok(OpenTicketDto {
            status: "ok",
            ticket_id,
        })
    }

    pub async fn swap_spot(&self, ticket_id: i32, new_spot_number: String) -> UseCaseResult<()> {
        let new_spot_number = new_spot_number.trim().to_string();
        if new_spot_number.is_empty() {
            return Err(TicketLifecycleError::InvalidInput(
                "newSpotNumber must not be empty".to_string(),
            ));
        }

        info!(ticket_id, new_spot_number = %new_spot_number, "tickets: swapping spot");

        self.parking_store
            .swap_spot(ticket_id, new_spot_number.clone())
            .await
            .map_err(|err| {
                Self::log_store_failure(&err, "tickets: failed to swap spot");
                TicketLifecycleError::from(err)
            })?;

        info!(ticket_id, new_spot_number = %new_spot_number, "tickets: spot swapped");
        Ok(())
    }

    pub async fn estimate_exit(&self, ticket_id: i32) -> UseCaseResult<EstimateExitDto> {
        self.estimate_exit_at(ticket_id, Utc::now()).await
    }

    pub async fn process_exit(
        &self,
        ticket_id: i32,
        amount_paid: Decimal,
        payment_method: PaymentMethod,
    ) -> UseCaseResult<ProcessExitDto> {
        self.process_exit_at(ticket_id, amount_paid, payment_method, Utc::now())
            .await
    }

    async fn estimate_exit_at(
        &self,
        ticket_id: i32,
        now: DateTime<Utc>,
    ) -> UseCaseResult<EstimateExitDto> {
        let billable = self.load_billable_ticket(ticket_id).await?;

        if !billable.ticket.is_open() {
            // The exit is final; the estimate below is informational.
            info!(ticket_id, "tickets: estimating exit for an already closed ticket");
        }

        let breakdown = calculate_fee(billable.entry_time, now, billable.rate.rate_per_hour)?;

        info!(
            ticket_id,
            billed_hours = breakdown.billed_hours,
            estimated_total = %breakdown.fee,
            "tickets: exit estimated"
        );

        Ok(EstimateExitDto {
            status: "ok",
            ticket_id,
            entry_time: billable.entry_time,
            estimated_hours: breakdown.duration_hours,
            billed_hours: breakdown.billed_hours,
            rate_per_hour: billable.rate.rate_per_hour,
            estimated_total: breakdown.fee,
        })
    }

    async fn process_exit_at(
        &self,
        ticket_id: i32,
        amount_paid: Decimal,
        payment_method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> UseCaseResult<ProcessExitDto> {
        if amount_paid.is_sign_negative() && !amount_paid.is_zero() {
            return Err(TicketLifecycleError::InvalidInput(
                "amountPaid must not be negative".to_string(),
            ));
        }

        let billable = self.load_billable_ticket(ticket_id).await?;

        if !billable.ticket.is_open() {
            warn!(ticket_id, "tickets: exit requested for a ticket that is not open");
            return Err(TicketLifecycleError::TicketNotOpen(ticket_id));
        }

        let breakdown =
            exit_validator::validate_payment(billable.entry_time, &billable.rate, amount_paid, now)
                .map_err(|err| {
                    warn!(
                        ticket_id,
                        submitted = %amount_paid,
                        error = %err,
                        "tickets: exit payment rejected"
                    );
                    TicketLifecycleError::from(err)
                })?;

        let process_exit_model = ProcessExitModel {
            ticket_id,
            amount: amount_paid.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            payment_method,
            exited_at: now,
        };

        let payment_status = self
            .parking_store
            .process_exit(process_exit_model)
            .await
            .map_err(|err| {
                Self::log_store_failure(&err, "tickets: failed to process exit");
                TicketLifecycleError::from(err)
            })?;

        info!(
            ticket_id,
            billed_hours = breakdown.billed_hours,
            amount = %amount_paid,
            payment_method = %payment_method,
            payment_status = %payment_status,
            "tickets: exit processed"
        );

        Ok(ProcessExitDto {
            status: "ok",
            ticket_id,
            payment_status,
        })
    }

    async fn load_billable_ticket(&self, ticket_id: i32) -> UseCaseResult<BillableTicket> {
        let ticket = self.parking_store.get_ticket(ticket_id).await.map_err(|err| {
            error!(ticket_id, db_error = ?err, "tickets: failed to load ticket");
            TicketLifecycleError::from(err)
        })?;
        let ticket = exit_validator::require_ticket(ticket_id, ticket)?;
        ticket.status().map_err(|err| {
            error!(ticket_id, error = %err, "tickets: stored ticket has an unrecognised payment status");
            TicketLifecycleError::Internal(anyhow!("ticket {ticket_id}: {err}"))
        })?;
        let entry_time = exit_validator::require_entry_time(&ticket)?;

        let rate = match ticket.rate_id {
            Some(rate_id) => self.parking_store.get_rate(rate_id).await.map_err(|err| {
                error!(ticket_id, rate_id, db_error = ?err, "tickets: failed to load rate");
                TicketLifecycleError::from(err)
            })?,
            None => None,
        };
        let rate = exit_validator::require_rate(&ticket, rate)?;

        Ok(BillableTicket {
            ticket,
            entry_time,
            rate,
        })
    }

    fn log_store_failure(err: &StoreError, message: &'static str) {
        match err {
            StoreError::Internal(cause) => error!(db_error = ?cause, "{}", message),
            other => warn!(error = %other, "{}", message),
        }
    }
}
