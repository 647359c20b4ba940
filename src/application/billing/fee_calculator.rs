use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

const SECONDS_PER_HOUR: i64 = 3600;
const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;
const CURRENCY_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Error, PartialEq)]
pub enum FeeError {
    #[error("rate per hour must not be negative (got {0})")]
    NegativeRate(Decimal),
    #[error("fee for {billed_hours} hours at {rate_per_hour}/hour overflows")]
    Overflow {
        billed_hours: i64,
        rate_per_hour: Decimal,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeBreakdown {
    pub duration_hours: f64,
    pub billed_hours: i64,
    pub fee: Decimal,
}

/// Bills every started hour between `entry` and `now` at `rate_per_hour`.
///
/// An evaluation instant before `entry` counts as zero elapsed time.
pub fn calculate_fee(
    entry: DateTime<Utc>,
    now: DateTime<Utc>,
    rate_per_hour: Decimal,
) -> Result<FeeBreakdown, FeeError> {
    if rate_per_hour.is_sign_negative() && !rate_per_hour.is_zero() {
        return Err(FeeError::NegativeRate(rate_per_hour));
    }

    let elapsed = (now - entry).max(TimeDelta::zero());
    let whole_seconds = elapsed.num_seconds();
    let subsec_nanos = i64::from(elapsed.subsec_nanos());

    let started_partial_hour = whole_seconds % SECONDS_PER_HOUR != 0 || subsec_nanos > 0;
    let billed_hours = whole_seconds / SECONDS_PER_HOUR + i64::from(started_partial_hour);

    let duration_hours =
        whole_seconds as f64 / SECONDS_PER_HOUR as f64 + subsec_nanos as f64 / NANOS_PER_HOUR;

    let fee = Decimal::from(billed_hours)
        .checked_mul(rate_per_hour)
        .ok_or(FeeError::Overflow {
            billed_hours,
            rate_per_hour,
        })?
        .round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    Ok(FeeBreakdown {
        duration_hours,
        billed_hours,
        fee,
    })
}
