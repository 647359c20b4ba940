use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverTotalSpentDto {
    pub status: &'static str,
    pub driver_id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
}
