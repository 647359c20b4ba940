use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::infrastructure::postgres::schema::parking_rates;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(rate_id))]
#[diesel(table_name = parking_rates)]
pub struct ParkingRateEntity {
    pub rate_id: i32,
    pub rate_per_hour: Decimal,
    pub vehicle_type: String,
    pub spot_type: String,
    /// Stored for the rate card; the fee formula does not apply it.
    pub grace_minutes: i32,
    pub lot_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = parking_rates)]
pub struct InsertParkingRateEntity {
    pub rate_per_hour: Decimal,
    pub vehicle_type: String,
    pub spot_type: String,
    pub grace_minutes: i32,
    pub lot_id: Option<i32>,
}
