use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use super::fee_calculator::{FeeBreakdown, FeeError, calculate_fee};
use crate::domain::entities::{parking_rates::ParkingRateEntity, parking_tickets::ParkingTicketEntity};

/// Absolute allowance between a submitted payment and the computed fee: one cent.
pub const PAYMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Error, PartialEq)]
pub enum ExitValidationError {
    #[error("Ticket not found")]
    TicketNotFound(i32),
    #[error("Ticket has no entry time")]
    MissingEntryTime(i32),
    #[error("Rate not found for ticket")]
    RateNotFound(i32),
    #[error(
        "Payment amount ({submitted:.2}) does not match required fee ({expected:.2}). Please pay the exact amount."
    )]
    AmountMismatch { submitted: Decimal, expected: Decimal },
    #[error(transparent)]
    Fee(#[from] FeeError),
}

pub fn require_ticket(
    ticket_id: i32,
    ticket: Option<ParkingTicketEntity>,
) -> Result<ParkingTicketEntity, ExitValidationError> {
    ticket.ok_or(ExitValidationError::TicketNotFound(ticket_id))
}

pub fn require_entry_time(ticket: &ParkingTicketEntity) -> Result<DateTime<Utc>, ExitValidationError> {
    ticket
        .entry_time
        .ok_or(ExitValidationError::MissingEntryTime(ticket.ticket_id))
}

pub fn require_rate(
    ticket: &ParkingTicketEntity,
    rate: Option<ParkingRateEntity>,
) -> Result<ParkingRateEntity, ExitValidationError> {
    rate.ok_or(ExitValidationError::RateNotFound(ticket.ticket_id))
}

pub fn is_within_tolerance(submitted: Decimal, expected: Decimal) -> bool {
    (submitted - expected).abs() <= PAYMENT_TOLERANCE
}

/// Computes the fee owed at `now` and accepts `submitted` only if it matches within one cent.
pub fn validate_payment(
    entry_time: DateTime<Utc>,
    rate: &ParkingRateEntity,
    submitted: Decimal,
    now: DateTime<Utc>,
) -> Result<FeeBreakdown, ExitValidationError> {
    let breakdown = calculate_fee(entry_time, now, rate.rate_per_hour)?;

    if !is_within_tolerance(submitted, breakdown.fee) {
        return Err(ExitValidationError::AmountMismatch {
            submitted,
            expected: breakdown.fee,
        });
    }

    Ok(breakdown)
}
