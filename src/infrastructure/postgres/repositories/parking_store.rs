use anyhow::anyhow;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl,
    dsl::{count_star, sum},
    insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    update,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::task;

use crate::{
    domain::{
        entities::{
            parking_lots::InsertParkingLotEntity, parking_rates::ParkingRateEntity,
            parking_spots::ParkingSpotEntity, parking_tickets::ParkingTicketEntity,
        },
        repositories::parking_store::{ParkingStoreGateway, StoreError, StoreResult},
        value_objects::{
            enums::{payment_statuses::PaymentStatus, transaction_statuses::TransactionStatus},
            parking_lots::default_rates_for_lot,
            tickets::{OpenTicketModel, ProcessExitModel},
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{parking_lots, parking_rates, parking_spots, parking_tickets, payments, vehicles},
    },
};

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::UniqueViolation,
                info,
            ) => StoreError::InvalidReference(
                info.constraint_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| info.message().to_string()),
            ),
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                StoreError::Internal(anyhow!(
                    "transaction could not be serialized, retry the operation: {}",
                    info.message()
                ))
            }
            other => StoreError::Internal(other.into()),
        }
    }
}

pub struct ParkingStorePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ParkingStorePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    /// Runs `operation` in one serializable transaction on the blocking pool.
    ///
    /// Diesel is synchronous, so database work must not run on the Tokio workers.
    async fn in_transaction<T, F>(&self, operation: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
    {
        let db_pool = Arc::clone(&self.db_pool);

        task::spawn_blocking(move || -> StoreResult<T> {
            let mut conn = db_pool.get().map_err(|err| StoreError::Internal(err.into()))?;
            conn.build_transaction().serializable().run(operation)
        })
        .await
        .map_err(|err| StoreError::Internal(err.into()))?
    }

    async fn read<T, F>(&self, query: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
    {
        let db_pool = Arc::clone(&self.db_pool);

        task::spawn_blocking(move || -> StoreResult<T> {
            let mut conn = db_pool.get().map_err(|err| StoreError::Internal(err.into()))?;
            query(&mut conn)
        })
        .await
        .map_err(|err| StoreError::Internal(err.into()))?
    }
}

fn lock_spot(conn: &mut PgConnection, spot_id: i32) -> StoreResult<Option<ParkingSpotEntity>> {
    let spot = parking_spots::table
        .filter(parking_spots::spot_id.eq(spot_id))
        .select(ParkingSpotEntity::as_select())
        .for_update()
        .first::<ParkingSpotEntity>(conn)
        .optional()?;
    Ok(spot)
}

fn lock_ticket(conn: &mut PgConnection, ticket_id: i32) -> StoreResult<ParkingTicketEntity> {
    parking_tickets::table
        .filter(parking_tickets::ticket_id.eq(ticket_id))
        .select(ParkingTicketEntity::as_select())
        .for_update()
        .first::<ParkingTicketEntity>(conn)
        .optional()?
        .ok_or(StoreError::TicketNotFound(ticket_id))
}

fn set_spot_occupied(conn: &mut PgConnection, spot_id: i32, is_occupied: bool) -> StoreResult<()> {
    update(parking_spots::table.filter(parking_spots::spot_id.eq(spot_id)))
        .set(parking_spots::is_occupied.eq(is_occupied))
        .execute(conn)?;
    Ok(())
}

#[async_trait]
impl ParkingStoreGateway for ParkingStorePostgres {
    async fn open_ticket(&self, open_ticket_model: OpenTicketModel) -> StoreResult<i32> {
        self.in_transaction(move |tx| {
            let spot_id = open_ticket_model.spot_id;
            let spot = lock_spot(tx, spot_id)?
                .ok_or_else(|| StoreError::InvalidReference(format!("spot {spot_id} does not exist")))?;

            if spot.is_occupied {
                return Err(StoreError::SpotOccupied(spot.spot_number));
            }

            let vehicle_exists = vehicles::table
                .filter(vehicles::license_plate.eq(&open_ticket_model.license_plate))
                .select(count_star())
                .first::<i64>(tx)?
                > 0;
            if !vehicle_exists {
                return Err(StoreError::InvalidReference(format!(
                    "vehicle {} does not exist",
                    open_ticket_model.license_plate
                )));
            }

            let ticket_id = insert_into(parking_tickets::table)
                .values(&open_ticket_model.to_entity())
                .returning(parking_tickets::ticket_id)
                .get_result::<i32>(tx)?;

            set_spot_occupied(tx, spot_id, true)?;

            Ok(ticket_id)
        })
        .await
    }

    async fn swap_spot(&self, ticket_id: i32, new_spot_number: String) -> StoreResult<()> {
        self.in_transaction(move |tx| {
            let ticket = lock_ticket(tx, ticket_id)?;
            if !ticket.is_open() {
                return Err(StoreError::TicketNotOpen(ticket_id));
            }

            let current_spot = match ticket.spot_id {
                Some(spot_id) => lock_spot(tx, spot_id)?,
                None => None,
            }
            .ok_or_else(|| {
                StoreError::Internal(anyhow!("open ticket {ticket_id} does not hold a spot"))
            })?;

            let new_spot = parking_spots::table
                .filter(parking_spots::lot_id.eq(current_spot.lot_id))
                .filter(parking_spots::spot_number.eq(&new_spot_number))
                .select(ParkingSpotEntity::as_select())
                .for_update()
                .first::<ParkingSpotEntity>(tx)
                .optional()?
                .ok_or_else(|| StoreError::SpotNotFound(new_spot_number.clone()))?;

            if new_spot.is_occupied {
                return Err(StoreError::SpotOccupied(new_spot.spot_number));
            }

            set_spot_occupied(tx, current_spot.spot_id, false)?;
            update(parking_tickets::table.filter(parking_tickets::ticket_id.eq(ticket_id)))
                .set(parking_tickets::spot_id.eq(Some(new_spot.spot_id)))
                .execute(tx)?;
            set_spot_occupied(tx, new_spot.spot_id, true)?;

            Ok(())
        })
        .await
    }

    async fn process_exit(
        &self,
        process_exit_model: ProcessExitModel,
    ) -> StoreResult<PaymentStatus> {
        self.in_transaction(move |tx| {
            let ticket_id = process_exit_model.ticket_id;
            let ticket = lock_ticket(tx, ticket_id)?;
            if !ticket.is_open() {
                return Err(StoreError::TicketNotOpen(ticket_id));
            }

            update(parking_tickets::table.filter(parking_tickets::ticket_id.eq(ticket_id)))
                .set((
                    parking_tickets::exit_time.eq(Some(process_exit_model.exited_at)),
                    parking_tickets::payment_status.eq(PaymentStatus::Paid.to_string()),
                    parking_tickets::total_fee.eq(Some(process_exit_model.amount)),
                ))
                .execute(tx)?;

            if let Some(spot_id) = ticket.spot_id {
                set_spot_occupied(tx, spot_id, false)?;
            }

            insert_into(payments::table)
                .values(&process_exit_model.to_payment_entity())
                .execute(tx)?;

            Ok(PaymentStatus::Paid)
        })
        .await
    }

    async fn get_ticket(&self, ticket_id: i32) -> StoreResult<Option<ParkingTicketEntity>> {
        self.read(move |conn| {
            let ticket = parking_tickets::table
                .filter(parking_tickets::ticket_id.eq(ticket_id))
                .select(ParkingTicketEntity::as_select())
                .first::<ParkingTicketEntity>(conn)
                .optional()?;
            Ok(ticket)
        })
        .await
    }

    async fn get_rate(&self, rate_id: i32) -> StoreResult<Option<ParkingRateEntity>> {
        self.read(move |conn| {
            let rate = parking_rates::table
                .filter(parking_rates::rate_id.eq(rate_id))
                .select(ParkingRateEntity::as_select())
                .first::<ParkingRateEntity>(conn)
                .optional()?;
            Ok(rate)
        })
        .await
    }

    async fn create_lot_with_default_rates(
        &self,
        insert_lot_entity: InsertParkingLotEntity,
    ) -> StoreResult<i32> {
        self.in_transaction(move |tx| {
            let lot_id = insert_into(parking_lots::table)
                .values(&insert_lot_entity)
                .returning(parking_lots::lot_id)
                .get_result::<i32>(tx)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateLotName(insert_lot_entity.lot_name.clone())
                    }
                    other => StoreError::from(other),
                })?;

            insert_into(parking_rates::table)
                .values(&default_rates_for_lot(lot_id))
                .execute(tx)?;

            Ok(lot_id)
        })
        .await
    }

    async fn count_available_spots(&self, lot_id: i32) -> StoreResult<i64> {
        self.read(move |conn| {
            let available = parking_spots::table
                .filter(parking_spots::lot_id.eq(lot_id))
                .filter(parking_spots::is_occupied.eq(false))
                .select(count_star())
                .first::<i64>(conn)?;
            Ok(available)
        })
        .await
    }

    async fn list_available_spots(&self, lot_id: i32) -> StoreResult<Vec<ParkingSpotEntity>> {
        self.read(move |conn| {
            let spots = parking_spots::table
                .filter(parking_spots::lot_id.eq(lot_id))
                .filter(parking_spots::is_occupied.eq(false))
                .order(parking_spots::spot_number.asc())
                .select(ParkingSpotEntity::as_select())
                .load::<ParkingSpotEntity>(conn)?;
            Ok(spots)
        })
        .await
    }

    async fn driver_total_spent(&self, driver_id: i32) -> StoreResult<Decimal> {
        self.read(move |conn| {
            let total = payments::table
                .inner_join(parking_tickets::table.inner_join(vehicles::table))
                .filter(vehicles::driver_id.eq(driver_id))
                .filter(payments::transaction_status.eq(TransactionStatus::Success.to_string()))
                .select(sum(payments::amount))
                .first::<Option<Decimal>>(conn)?;
            Ok(total.unwrap_or(Decimal::ZERO))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;

    #[derive(Debug)]
    struct ViolationInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ViolationInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(ViolationInfo {
                message: "violates constraint",
                constraint,
            }),
        )
    }

    #[test]
    fn foreign_key_violation_is_invalid_reference() {
        let err = StoreError::from(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("parking_tickets_license_plate_fkey"),
        ));
        assert!(
            matches!(err, StoreError::InvalidReference(ref name) if name == "parking_tickets_license_plate_fkey")
        );
    }

    #[test]
    fn unique_violation_without_constraint_falls_back_to_message() {
        let err = StoreError::from(database_error(DatabaseErrorKind::UniqueViolation, None));
        assert!(matches!(err, StoreError::InvalidReference(ref message) if message == "violates constraint"));
    }

    #[test]
    fn serialization_failure_is_internal_and_retryable() {
        let err = StoreError::from(database_error(DatabaseErrorKind::SerializationFailure, None));
        match err {
            StoreError::Internal(cause) => assert!(cause.to_string().contains("retry")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn other_diesel_errors_are_internal() {
        assert!(matches!(
            StoreError::from(DieselError::NotFound),
            StoreError::Internal(_)
        ));
        assert!(matches!(
            StoreError::from(database_error(DatabaseErrorKind::CheckViolation, None)),
            StoreError::Internal(_)
        ));
    }
}
