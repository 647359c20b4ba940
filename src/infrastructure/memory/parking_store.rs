use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard},
};

use anyhow::anyhow;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    entities::{
        parking_lots::{InsertParkingLotEntity, ParkingLotEntity},
        parking_rates::{InsertParkingRateEntity, ParkingRateEntity},
        parking_spots::ParkingSpotEntity,
        parking_tickets::ParkingTicketEntity,
        payments::PaymentEntity,
        vehicles::VehicleEntity,
    },
    repositories::parking_store::{ParkingStoreGateway, StoreError, StoreResult},
    value_objects::{
        enums::{
            payment_methods::PaymentMethod, payment_statuses::PaymentStatus, spot_types::SpotType,
            transaction_statuses::TransactionStatus,
        },
        parking_lots::default_rates_for_lot,
        tickets::{OpenTicketModel, ProcessExitModel},
    },
};

#[derive(Debug, Default)]
struct ParkingState {
    lots: BTreeMap<i32, ParkingLotEntity>,
    spots: BTreeMap<i32, ParkingSpotEntity>,
    rates: BTreeMap<i32, ParkingRateEntity>,
    tickets: BTreeMap<i32, ParkingTicketEntity>,
    payments: BTreeMap<i32, PaymentEntity>,
    vehicles: HashMap<String, VehicleEntity>,
}

fn next_id<V>(table: &BTreeMap<i32, V>) -> i32 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

impl ParkingState {
    fn insert_rate(&mut self, rate: InsertParkingRateEntity) -> i32 {
        let rate_id = next_id(&self.rates);
        self.rates.insert(
            rate_id,
            ParkingRateEntity {
                rate_id,
                rate_per_hour: rate.rate_per_hour,
                vehicle_type: rate.vehicle_type,
                spot_type: rate.spot_type,
                grace_minutes: rate.grace_minutes,
                lot_id: rate.lot_id,
            },
        );
        rate_id
    }

    fn spot_mut(&mut self, spot_id: i32) -> StoreResult<&mut ParkingSpotEntity> {
        self.spots
            .get_mut(&spot_id)
            .ok_or_else(|| StoreError::Internal(anyhow!("spot {spot_id} vanished mid-operation")))
    }
}

/// Process-local store with the same atomicity as the Postgres gateway.
///
/// The whole state sits behind one mutex and every operation checks all of its
/// preconditions before the first write, so a failed call changes nothing.
#[derive(Debug, Default)]
pub struct InMemoryParkingStore {
    state: Mutex<ParkingState>,
}

impl InMemoryParkingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> StoreResult<MutexGuard<'_, ParkingState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Internal(anyhow!("parking state lock poisoned")))
    }

    pub fn add_vehicle(&self, vehicle: VehicleEntity) -> StoreResult<()> {
        vehicle.kind().map_err(StoreError::InvalidReference)?;

        let mut state = self.state()?;
        if state.vehicles.contains_key(&vehicle.license_plate) {
            return Err(StoreError::InvalidReference(format!(
                "vehicle {} already exists",
                vehicle.license_plate
            )));
        }
        state.vehicles.insert(vehicle.license_plate.clone(), vehicle);
        Ok(())
    }

    pub fn add_spot(&self, lot_id: i32, spot_number: &str, spot_type: SpotType) -> StoreResult<i32> {
        let mut state = self.state()?;
        if !state.lots.contains_key(&lot_id) {
            return Err(StoreError::InvalidReference(format!("lot {lot_id} does not exist")));
        }

        let spot_id = next_id(&state.spots);
        state.spots.insert(
            spot_id,
            ParkingSpotEntity {
                spot_id,
                spot_number: spot_number.to_string(),
                spot_type: spot_type.to_string(),
                is_occupied: false,
                lot_id,
            },
        );
        Ok(spot_id)
    }

    pub fn add_rate(&self, rate: InsertParkingRateEntity) -> StoreResult<i32> {
        let mut state = self.state()?;
        Ok(state.insert_rate(rate))
    }

    /// Edits a stored ticket in place, for simulating rows written by other tools.
    pub fn edit_ticket<F>(&self, ticket_id: i32, edit: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ParkingTicketEntity),
    {
        let mut state = self.state()?;
        let ticket = state
            .tickets
            .get_mut(&ticket_id)
            .ok_or(StoreError::TicketNotFound(ticket_id))?;
        edit(ticket);
        Ok(())
    }

    pub fn spot(&self, spot_id: i32) -> StoreResult<Option<ParkingSpotEntity>> {
        Ok(self.state()?.spots.get(&spot_id).cloned())
    }

    pub fn tickets(&self) -> StoreResult<Vec<ParkingTicketEntity>> {
        Ok(self.state()?.tickets.values().cloned().collect())
    }

    pub fn rates_for_lot(&self, lot_id: i32) -> StoreResult<Vec<ParkingRateEntity>> {
        Ok(self
            .state()?
            .rates
            .values()
            .filter(|rate| rate.lot_id == Some(lot_id))
            .cloned()
            .collect())
    }

    pub fn payments_for_ticket(&self, ticket_id: i32) -> StoreResult<Vec<PaymentEntity>> {
        Ok(self
            .state()?
            .payments
            .values()
            .filter(|payment| payment.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    /// Records a payment outside the exit workflow, e.g. a failed card attempt.
    pub fn add_payment(&self, payment: PaymentEntity) -> StoreResult<i32> {
        payment.status().map_err(StoreError::InvalidReference)?;
        PaymentMethod::try_from(payment.payment_method.as_str())
            .map_err(StoreError::InvalidReference)?;

        let mut state = self.state()?;
        if !state.tickets.contains_key(&payment.ticket_id) {
            return Err(StoreError::InvalidReference(format!(
                "ticket {} does not exist",
                payment.ticket_id
            )));
        }
        let payment_id = next_id(&state.payments);
        state.payments.insert(payment_id, PaymentEntity { payment_id, ..payment });
        Ok(payment_id)
    }
}

#[async_trait]
impl ParkingStoreGateway for InMemoryParkingStore {
    async fn open_ticket(&self, open_ticket_model: OpenTicketModel) -> StoreResult<i32> {
        let mut state = self.state()?;
        let spot_id = open_ticket_model.spot_id;

        let spot = state
            .spots
            .get(&spot_id)
            .ok_or_else(|| StoreError::InvalidReference(format!("spot {spot_id} does not exist")))?;
        if spot.is_occupied {
            return Err(StoreError::SpotOccupied(spot.spot_number.clone()));
        }
        if !state.vehicles.contains_key(&open_ticket_model.license_plate) {
            return Err(StoreError::InvalidReference(format!(
                "vehicle {} does not exist",
                open_ticket_model.license_plate
            )));
        }
        if !state.rates.contains_key(&open_ticket_model.rate_id) {
            return Err(StoreError::InvalidReference(format!(
                "rate {} does not exist",
                open_ticket_model.rate_id
            )));
        }

        let entity = open_ticket_model.to_entity();
        let ticket_id = next_id(&state.tickets);
        state.tickets.insert(
            ticket_id,
            ParkingTicketEntity {
                ticket_id,
                entry_time: entity.entry_time,
                exit_time: None,
                payment_status: entity.payment_status,
                total_fee: None,
                license_plate: entity.license_plate,
                spot_id: entity.spot_id,
                rate_id: entity.rate_id,
            },
        );
        state.spot_mut(spot_id)?.is_occupied = true;

        Ok(ticket_id)
    }

    async fn swap_spot(&self, ticket_id: i32, new_spot_number: String) -> StoreResult<()> {
        let mut state = self.state()?;

        let ticket = state
            .tickets
            .get(&ticket_id)
            .ok_or(StoreError::TicketNotFound(ticket_id))?;
        if !ticket.is_open() {
            return Err(StoreError::TicketNotOpen(ticket_id));
        }

        let current_spot = ticket
            .spot_id
            .and_then(|spot_id| state.spots.get(&spot_id))
            .ok_or_else(|| {
                StoreError::Internal(anyhow!("open ticket {ticket_id} does not hold a spot"))
            })?;
        let (current_spot_id, lot_id) = (current_spot.spot_id, current_spot.lot_id);

        let new_spot = state
            .spots
            .values()
            .find(|spot| spot.lot_id == lot_id && spot.spot_number == new_spot_number)
            .ok_or_else(|| StoreError::SpotNotFound(new_spot_number.clone()))?;
        if new_spot.is_occupied {
            return Err(StoreError::SpotOccupied(new_spot.spot_number.clone()));
        }
        let new_spot_id = new_spot.spot_id;

        state.spot_mut(current_spot_id)?.is_occupied = false;
        state.spot_mut(new_spot_id)?.is_occupied = true;
        if let Some(ticket) = state.tickets.get_mut(&ticket_id) {
            ticket.spot_id = Some(new_spot_id);
        }

        Ok(())
    }

    async fn process_exit(
        &self,
        process_exit_model: ProcessExitModel,
    ) -> StoreResult<PaymentStatus> {
        let mut state = self.state()?;
        let ticket_id = process_exit_model.ticket_id;

        let ticket = state
            .tickets
            .get(&ticket_id)
            .ok_or(StoreError::TicketNotFound(ticket_id))?;
        if !ticket.is_open() {
            return Err(StoreError::TicketNotOpen(ticket_id));
        }
        let spot_id = ticket.spot_id.filter(|spot_id| state.spots.contains_key(spot_id));

        if let Some(spot_id) = spot_id {
            state.spot_mut(spot_id)?.is_occupied = false;
        }
        if let Some(ticket) = state.tickets.get_mut(&ticket_id) {
            ticket.exit_time = Some(process_exit_model.exited_at);
            ticket.payment_status = PaymentStatus::Paid.to_string();
            ticket.total_fee = Some(process_exit_model.amount);
        }

        let payment = process_exit_model.to_payment_entity();
        let payment_id = next_id(&state.payments);
        state.payments.insert(
            payment_id,
            PaymentEntity {
                payment_id,
                amount: payment.amount,
                payment_method: payment.payment_method,
                transaction_status: payment.transaction_status,
                payment_timestamp: payment.payment_timestamp,
                ticket_id: payment.ticket_id,
            },
        );

        Ok(PaymentStatus::Paid)
    }

    async fn get_ticket(&self, ticket_id: i32) -> StoreResult<Option<ParkingTicketEntity>> {
        Ok(self.state()?.tickets.get(&ticket_id).cloned())
    }

    async fn get_rate(&self, rate_id: i32) -> StoreResult<Option<ParkingRateEntity>> {
        Ok(self.state()?.rates.get(&rate_id).cloned())
    }

    async fn create_lot_with_default_rates(
        &self,
        insert_lot_entity: InsertParkingLotEntity,
    ) -> StoreResult<i32> {
        let mut state = self.state()?;

        if state
            .lots
            .values()
            .any(|lot| lot.lot_name == insert_lot_entity.lot_name)
        {
            return Err(StoreError::DuplicateLotName(insert_lot_entity.lot_name));
        }

        let lot_id = next_id(&state.lots);
        state.lots.insert(
            lot_id,
            ParkingLotEntity {
                lot_id,
                lot_name: insert_lot_entity.lot_name,
                capacity: insert_lot_entity.capacity,
                location: insert_lot_entity.location,
                levels: insert_lot_entity.levels,
            },
        );
        for rate in default_rates_for_lot(lot_id) {
            state.insert_rate(rate);
        }

        Ok(lot_id)
    }

    async fn count_available_spots(&self, lot_id: i32) -> StoreResult<i64> {
        let state = self.state()?;
        let available = state
            .spots
            .values()
            .filter(|spot| spot.lot_id == lot_id && !spot.is_occupied)
            .count();
        i64::try_from(available).map_err(|err| StoreError::Internal(err.into()))
    }

    async fn list_available_spots(&self, lot_id: i32) -> StoreResult<Vec<ParkingSpotEntity>> {
        let state = self.state()?;
        let mut spots: Vec<ParkingSpotEntity> = state
            .spots
            .values()
            .filter(|spot| spot.lot_id == lot_id && !spot.is_occupied)
            .cloned()
            .collect();
        spots.sort_by(|a, b| a.spot_number.cmp(&b.spot_number));
        Ok(spots)
    }

    async fn driver_total_spent(&self, driver_id: i32) -> StoreResult<Decimal> {
        let state = self.state()?;

        let mut total = Decimal::ZERO;
        for payment in state.payments.values() {
            let belongs_to_driver = state
                .tickets
                .get(&payment.ticket_id)
                .and_then(|ticket| ticket.license_plate.as_ref())
                .and_then(|plate| state.vehicles.get(plate))
                .is_some_and(|vehicle| vehicle.driver_id == Some(driver_id));
            if !belongs_to_driver {
                continue;
            }

            let status = payment.status().map_err(|err| {
                StoreError::Internal(anyhow!("payment {}: {err}", payment.payment_id))
            })?;
            if status == TransactionStatus::Success {
                total += payment.amount;
            }
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    use crate::domain::value_objects::enums::vehicle_types::VehicleType;

    struct Fixture {
        store: Arc<InMemoryParkingStore>,
        lot_id: i32,
        spot_a1: i32,
        spot_a2: i32,
        rate_id: i32,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryParkingStore::new());
        let lot_id = store
            .create_lot_with_default_rates(InsertParkingLotEntity {
                lot_name: "Central".to_string(),
                capacity: 10,
                location: None,
                levels: 1,
            })
            .await
            .unwrap();
        let spot_a1 = store.add_spot(lot_id, "A1", SpotType::Standard).unwrap();
        let spot_a2 = store.add_spot(lot_id, "A2", SpotType::Standard).unwrap();
        let rate_id = store.rates_for_lot(lot_id).unwrap()[0].rate_id;

        for (plate, driver_id) in [("KA01AB1234", 1), ("KA02CD5678", 2)] {
            store
                .add_vehicle(VehicleEntity {
                    license_plate: plate.to_string(),
                    vehicle_type: VehicleType::Car.to_string(),
                    model: None,
                    colour: None,
                    driver_id: Some(driver_id),
                })
                .unwrap();
        }

        Fixture {
            store,
            lot_id,
            spot_a1,
            spot_a2,
            rate_id,
        }
    }

    fn open_model(plate: &str, spot_id: i32, rate_id: i32) -> OpenTicketModel {
        OpenTicketModel {
            license_plate: plate.to_string(),
            spot_id,
            rate_id,
            entry_time: Utc::now() - Duration::hours(1),
        }
    }

    #[tokio::test]
    async fn open_ticket_occupies_spot() {
        let fx = fixture().await;
        let ticket_id = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();

        let ticket = fx.store.get_ticket(ticket_id).await.unwrap().unwrap();
        assert!(ticket.is_open());
        assert_eq!(ticket.payment_status, "Unpaid");
        assert!(fx.store.spot(fx.spot_a1).unwrap().unwrap().is_occupied);
        assert_eq!(fx.store.count_available_spots(fx.lot_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn occupied_spot_rejects_second_ticket_without_side_effects() {
        let fx = fixture().await;
        fx.store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();

        let err = fx
            .store
            .open_ticket(open_model("KA02CD5678", fx.spot_a1, fx.rate_id))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::SpotOccupied(ref number) if number == "A1"));
        assert_eq!(fx.store.tickets().unwrap().len(), 1);
        assert!(fx.store.spot(fx.spot_a1).unwrap().unwrap().is_occupied);
    }

    #[tokio::test]
    async fn unknown_references_are_invalid() {
        let fx = fixture().await;

        let unknown_vehicle = fx
            .store
            .open_ticket(open_model("ZZ99ZZ9999", fx.spot_a1, fx.rate_id))
            .await
            .unwrap_err();
        let unknown_rate = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, 999))
            .await
            .unwrap_err();
        let unknown_spot = fx
            .store
            .open_ticket(open_model("KA01AB1234", 999, fx.rate_id))
            .await
            .unwrap_err();

        assert!(matches!(unknown_vehicle, StoreError::InvalidReference(_)));
        assert!(matches!(unknown_rate, StoreError::InvalidReference(_)));
        assert!(matches!(unknown_spot, StoreError::InvalidReference(_)));
        assert!(fx.store.tickets().unwrap().is_empty());
        assert!(!fx.store.spot(fx.spot_a1).unwrap().unwrap().is_occupied);
    }

    #[tokio::test]
    async fn concurrent_opens_on_one_spot_have_a_single_winner() {
        let fx = fixture().await;

        let first = {
            let store = Arc::clone(&fx.store);
            let model = open_model("KA01AB1234", fx.spot_a1, fx.rate_id);
            tokio::spawn(async move { store.open_ticket(model).await })
        };
        let second = {
            let store = Arc::clone(&fx.store);
            let model = open_model("KA02CD5678", fx.spot_a1, fx.rate_id);
            tokio::spawn(async move { store.open_ticket(model).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let winners = results.iter().filter(|result| result.is_ok()).count();
        let occupied = results
            .iter()
            .filter(|result| matches!(result, Err(StoreError::SpotOccupied(_))))
            .count();

        assert_eq!(winners, 1);
        assert_eq!(occupied, 1);
        assert_eq!(fx.store.tickets().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn swap_moves_ticket_and_occupancy() {
        let fx = fixture().await;
        let ticket_id = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();

        fx.store.swap_spot(ticket_id, "A2".to_string()).await.unwrap();

        let ticket = fx.store.get_ticket(ticket_id).await.unwrap().unwrap();
        assert_eq!(ticket.spot_id, Some(fx.spot_a2));
        assert!(!fx.store.spot(fx.spot_a1).unwrap().unwrap().is_occupied);
        assert!(fx.store.spot(fx.spot_a2).unwrap().unwrap().is_occupied);
    }

    #[tokio::test]
    async fn swap_failures_leave_assignment_untouched() {
        let fx = fixture().await;
        let first = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();
        fx.store
            .open_ticket(open_model("KA02CD5678", fx.spot_a2, fx.rate_id))
            .await
            .unwrap();

        let occupied = fx.store.swap_spot(first, "A2".to_string()).await.unwrap_err();
        let missing = fx.store.swap_spot(first, "Z9".to_string()).await.unwrap_err();
        let no_ticket = fx.store.swap_spot(999, "A2".to_string()).await.unwrap_err();

        assert!(matches!(occupied, StoreError::SpotOccupied(_)));
        assert!(matches!(missing, StoreError::SpotNotFound(ref number) if number == "Z9"));
        assert!(matches!(no_ticket, StoreError::TicketNotFound(999)));

        let ticket = fx.store.get_ticket(first).await.unwrap().unwrap();
        assert_eq!(ticket.spot_id, Some(fx.spot_a1));
        assert!(fx.store.spot(fx.spot_a1).unwrap().unwrap().is_occupied);
    }

    #[tokio::test]
    async fn process_exit_is_one_shot() {
        let fx = fixture().await;
        let ticket_id = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();
        let exit = ProcessExitModel {
            ticket_id,
            amount: Decimal::new(5000, 2),
            payment_method: PaymentMethod::Cash,
            exited_at: Utc::now(),
        };

        let status = fx.store.process_exit(exit.clone()).await.unwrap();
        let again = fx.store.process_exit(exit).await.unwrap_err();

        assert_eq!(status, PaymentStatus::Paid);
        assert!(matches!(again, StoreError::TicketNotOpen(id) if id == ticket_id));
        assert_eq!(fx.store.payments_for_ticket(ticket_id).unwrap().len(), 1);
        assert!(!fx.store.spot(fx.spot_a1).unwrap().unwrap().is_occupied);

        let swap = fx.store.swap_spot(ticket_id, "A2".to_string()).await.unwrap_err();
        assert!(matches!(swap, StoreError::TicketNotOpen(_)));
    }

    #[tokio::test]
    async fn duplicate_lot_name_adds_nothing() {
        let fx = fixture().await;
        let rates_before = fx.store.rates_for_lot(fx.lot_id).unwrap().len();

        let err = fx
            .store
            .create_lot_with_default_rates(InsertParkingLotEntity {
                lot_name: "Central".to_string(),
                capacity: 5,
                location: None,
                levels: 1,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateLotName(_)));
        assert_eq!(fx.store.rates_for_lot(fx.lot_id).unwrap().len(), rates_before);
        assert!(fx.store.rates_for_lot(fx.lot_id + 1).unwrap().is_empty());
    }

    #[tokio::test]
    async fn driver_total_counts_only_successful_payments() {
        let fx = fixture().await;
        let ticket_id = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();
        fx.store
            .add_payment(PaymentEntity {
                payment_id: 0,
                amount: Decimal::new(999, 2),
                payment_method: PaymentMethod::CreditCard.to_string(),
                transaction_status: TransactionStatus::Failed.to_string(),
                payment_timestamp: Utc::now(),
                ticket_id,
            })
            .unwrap();
        fx.store
            .process_exit(ProcessExitModel {
                ticket_id,
                amount: Decimal::new(5000, 2),
                payment_method: PaymentMethod::Cash,
                exited_at: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(fx.store.driver_total_spent(1).await.unwrap(), Decimal::new(5000, 2));
        assert_eq!(fx.store.driver_total_spent(2).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn available_spots_are_sorted_by_number() {
        let fx = fixture().await;
        fx.store.add_spot(fx.lot_id, "A0", SpotType::Ev).unwrap();

        let numbers: Vec<String> = fx
            .store
            .list_available_spots(fx.lot_id)
            .await
            .unwrap()
            .into_iter()
            .map(|spot| spot.spot_number)
            .collect();

        assert_eq!(numbers, vec!["A0", "A1", "A2"]);
    }

    #[tokio::test]
    async fn process_exit_settles_ticket_and_records_payment() {
        let fx = fixture().await;
        let ticket_id = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();
        let exited_at = Utc::now();

        fx.store
            .process_exit(ProcessExitModel {
                ticket_id,
                amount: Decimal::new(15000, 2),
                payment_method: PaymentMethod::Cash,
                exited_at,
            })
            .await
            .unwrap();

        let ticket = fx.store.get_ticket(ticket_id).await.unwrap().unwrap();
        assert_eq!(ticket.status(), Ok(PaymentStatus::Paid));
        assert_eq!(ticket.total_fee, Some(Decimal::new(15000, 2)));
        assert_eq!(ticket.exit_time, Some(exited_at));

        let payments = fx.store.payments_for_ticket(ticket_id).unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, Decimal::new(15000, 2));
        assert_eq!(payments[0].payment_method, "Cash");
        assert_eq!(payments[0].status(), Ok(TransactionStatus::Success));
        assert_eq!(payments[0].payment_timestamp, exited_at);
        assert!(!fx.store.spot(fx.spot_a1).unwrap().unwrap().is_occupied);
    }

    #[tokio::test]
    async fn seeding_rejects_unrecognised_enum_values() {
        let fx = fixture().await;
        let ticket_id = fx
            .store
            .open_ticket(open_model("KA01AB1234", fx.spot_a1, fx.rate_id))
            .await
            .unwrap();

        let vehicle = fx
            .store
            .add_vehicle(VehicleEntity {
                license_plate: "MH12XY0001".to_string(),
                vehicle_type: "Hovercraft".to_string(),
                model: None,
                colour: None,
                driver_id: Some(1),
            })
            .unwrap_err();
        let payment = fx
            .store
            .add_payment(PaymentEntity {
                payment_id: 0,
                amount: Decimal::new(500, 2),
                payment_method: PaymentMethod::Upi.to_string(),
                transaction_status: "Reversed".to_string(),
                payment_timestamp: Utc::now(),
                ticket_id,
            })
            .unwrap_err();

        assert!(matches!(vehicle, StoreError::InvalidReference(ref msg) if msg.contains("Hovercraft")));
        assert!(matches!(payment, StoreError::InvalidReference(ref msg) if msg.contains("Reversed")));
        assert!(fx.store.payments_for_ticket(ticket_id).unwrap().is_empty());
    }
}
