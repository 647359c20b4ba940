use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    entities::{parking_tickets::InsertParkingTicketEntity, payments::InsertPaymentEntity},
    value_objects::enums::{
        payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
        transaction_statuses::TransactionStatus,
    },
};

const NAIVE_ENTRY_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq)]
pub struct OpenTicketModel {
    pub license_plate: String,
    pub spot_id: i32,
    pub rate_id: i32,
    pub entry_time: DateTime<Utc>,
}

impl OpenTicketModel {
    pub fn to_entity(&self) -> InsertParkingTicketEntity {
        InsertParkingTicketEntity {
            entry_time: Some(self.entry_time),
            payment_status: PaymentStatus::Unpaid.to_string(),
            license_plate: Some(self.license_plate.clone()),
            spot_id: Some(self.spot_id),
            rate_id: Some(self.rate_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessExitModel {
    pub ticket_id: i32,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub exited_at: DateTime<Utc>,
}

impl ProcessExitModel {
    pub fn to_payment_entity(&self) -> InsertPaymentEntity {
        InsertPaymentEntity {
            amount: self.amount,
            payment_method: self.payment_method.to_string(),
            transaction_status: TransactionStatus::Success.to_string(),
            payment_timestamp: self.exited_at,
            ticket_id: self.ticket_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenTicketDto {
    pub status: &'static str,
    pub ticket_id: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateExitDto {
    pub status: &'static str,
    pub ticket_id: i32,
    pub entry_time: DateTime<Utc>,
    pub estimated_hours: f64,
    pub billed_hours: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate_per_hour: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_total: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessExitDto {
    pub status: &'static str,
    pub ticket_id: i32,
    pub payment_status: PaymentStatus,
}

/// Accepts RFC 3339 or the naive forms HTML forms submit; naive values are read as UTC.
pub fn parse_entry_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_ENTRY_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_entry_time("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_form_values_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_entry_time("2024-05-01 10:30:00"), Some(expected));
        assert_eq!(parse_entry_time("2024-05-01T10:30"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_entry_time("yesterday"), None);
    }

    #[test]
    fn new_ticket_starts_unpaid() {
        let model = OpenTicketModel {
            license_plate: "KA01AB1234".to_string(),
            spot_id: 3,
            rate_id: 1,
            entry_time: Utc::now(),
        };
        let entity = model.to_entity();
        assert_eq!(entity.payment_status, "Unpaid");
        assert_eq!(entity.spot_id, Some(3));
    }
}
