use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    entities::{
        parking_lots::InsertParkingLotEntity, parking_rates::ParkingRateEntity,
        parking_spots::ParkingSpotEntity, parking_tickets::ParkingTicketEntity,
    },
    value_objects::{
        enums::payment_statuses::PaymentStatus,
        tickets::{OpenTicketModel, ProcessExitModel},
    },
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ticket {0} not found")]
    TicketNotFound(i32),
    #[error("spot {0} not found")]
    SpotNotFound(String),
    #[error("spot {0} is already occupied")]
    SpotOccupied(String),
    #[error("ticket {0} is not open")]
    TicketNotOpen(i32),
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("parking lot name already exists: {0}")]
    DuplicateLotName(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Transactional persistence boundary of the parking workflow.
///
/// Every mutating operation is atomic: it applies all of its effects or none,
/// and concurrent calls racing for the same spot observe a single winner.
#[automock]
#[async_trait]
pub trait ParkingStoreGateway {
    /// Inserts an unpaid ticket and marks its spot occupied.
    async fn open_ticket(&self, open_ticket_model: OpenTicketModel) -> StoreResult<i32>;

    /// Frees the ticket's current spot and moves the ticket onto the spot
    /// numbered `new_spot_number` in the same lot.
    async fn swap_spot(&self, ticket_id: i32, new_spot_number: String) -> StoreResult<()>;

    /// Closes the ticket, frees its spot and records the settling payment.
    async fn process_exit(&self, process_exit_model: ProcessExitModel)
    -> StoreResult<PaymentStatus>;

    async fn get_ticket(&self, ticket_id: i32) -> StoreResult<Option<ParkingTicketEntity>>;

    async fn get_rate(&self, rate_id: i32) -> StoreResult<Option<ParkingRateEntity>>;

    /// Inserts the lot together with its default rate card.
    async fn create_lot_with_default_rates(
        &self,
        insert_lot_entity: InsertParkingLotEntity,
    ) -> StoreResult<i32>;

    async fn count_available_spots(&self, lot_id: i32) -> StoreResult<i64>;

    async fn list_available_spots(&self, lot_id: i32) -> StoreResult<Vec<ParkingSpotEntity>>;

    /// Sum of successful payments on tickets of vehicles owned by the driver.
    async fn driver_total_spent(&self, driver_id: i32) -> StoreResult<Decimal>;
}
