use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::{
    domain::value_objects::enums::payment_statuses::PaymentStatus,
    infrastructure::postgres::schema::parking_tickets,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(ticket_id))]
#[diesel(table_name = parking_tickets)]
pub struct ParkingTicketEntity {
    pub ticket_id: i32,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub payment_status: String,
    pub total_fee: Option<Decimal>,
    pub license_plate: Option<String>,
    pub spot_id: Option<i32>,
    pub rate_id: Option<i32>,
}

impl ParkingTicketEntity {
    /// A ticket stays open until exit processing stamps its exit time.
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }

    pub fn status(&self) -> Result<PaymentStatus, String> {
        PaymentStatus::try_from(self.payment_status.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = parking_tickets)]
pub struct InsertParkingTicketEntity {
    pub entry_time: Option<DateTime<Utc>>,
    pub payment_status: String,
    pub license_plate: Option<String>,
    pub spot_id: Option<i32>,
    pub rate_id: Option<i32>,
}
