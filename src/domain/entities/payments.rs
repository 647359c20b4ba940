use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::{
    domain::value_objects::enums::transaction_statuses::TransactionStatus,
    infrastructure::postgres::schema::payments,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(payment_id))]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub payment_id: i32,
    pub amount: Decimal,
    pub payment_method: String,
    pub transaction_status: String,
    pub payment_timestamp: DateTime<Utc>,
    pub ticket_id: i32,
}

impl PaymentEntity {
    pub fn status(&self) -> Result<TransactionStatus, String> {
        TransactionStatus::try_from(self.transaction_status.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub amount: Decimal,
    pub payment_method: String,
    pub transaction_status: String,
    pub payment_timestamp: DateTime<Utc>,
    pub ticket_id: i32,
}
