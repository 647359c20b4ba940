use std::sync::Arc;

use anyhow::anyhow;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    application::errors::FailureKind,
    domain::{
        entities::parking_lots::InsertParkingLotEntity,
        repositories::parking_store::{ParkingStoreGateway, StoreError},
        value_objects::parking_lots::{
            AvailableSpotDto, AvailableSpotsCountDto, AvailableSpotsDto, CreateParkingLotDto,
            CreateParkingLotModel,
        },
    },
};

#[derive(Debug, Error)]
pub enum ParkingLotError {
    #[error("Parking lot name already exists: {0}")]
    DuplicateName(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ParkingLotError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ParkingLotError::DuplicateName(_) => FailureKind::InvalidState,
            ParkingLotError::InvalidInput(_) => FailureKind::Validation,
            ParkingLotError::Internal(_) => FailureKind::StoreFailure,
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        self.kind().status_code()
    }
}

impl From<StoreError> for ParkingLotError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateLotName(name) => ParkingLotError::DuplicateName(name),
            StoreError::InvalidReference(reference) => ParkingLotError::InvalidInput(reference),
            StoreError::Internal(err) => ParkingLotError::Internal(err),
            other => ParkingLotError::Internal(anyhow!(other.to_string())),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ParkingLotError>;

pub struct ParkingLotsUseCase<S>
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    parking_store: Arc<S>,
}

impl<S> ParkingLotsUseCase<S>
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    pub fn new(parking_store: Arc<S>) -> Self {
        Self { parking_store }
    }

    pub async fn create_lot_with_default_rates(
        &self,
        create_lot_model: CreateParkingLotModel,
    ) -> UseCaseResult<CreateParkingLotDto> {
        let lot_name = create_lot_model.lot_name.trim().to_string();
        if lot_name.is_empty() {
            return Err(ParkingLotError::InvalidInput(
                "lotName must not be empty".to_string(),
            ));
        }
        if create_lot_model.capacity <= 0 {
            return Err(ParkingLotError::InvalidInput(
                "capacity must be a positive number".to_string(),
            ));
        }
        if create_lot_model.levels < 1 {
            return Err(ParkingLotError::InvalidInput(
                "levels must be at least 1".to_string(),
            ));
        }

        info!(lot_name = %lot_name, capacity = create_lot_model.capacity, "lots: creating lot with default rates");

        let lot_id = self
            .parking_store
            .create_lot_with_default_rates(InsertParkingLotEntity {
                lot_name: lot_name.clone(),
                capacity: create_lot_model.capacity,
                location: create_lot_model.location,
                levels: create_lot_model.levels,
            })
            .await
            .map_err(|err| {
                match &err {
                    StoreError::Internal(cause) => {
                        error!(lot_name = %lot_name, db_error = ?cause, "lots: failed to create lot")
                    }
                    other => warn!(lot_name = %lot_name, error = %other, "lots: lot rejected"),
                }
                ParkingLotError::from(err)
            })?;

        info!(lot_id, lot_name = %lot_name, "lots: lot created");

        Ok(CreateParkingLotDto {
            status: "ok",
            lot_id,
        })
    }

    pub async fn count_available_spots(&self, lot_id: i32) -> UseCaseResult<AvailableSpotsCountDto> {
        let available = self
            .parking_store
            .count_available_spots(lot_id)
            .await
            .map_err(|err| {
                error!(lot_id, db_error = ?err, "lots: failed to count available spots");
                ParkingLotError::from(err)
            })?;

        Ok(AvailableSpotsCountDto { lot_id, available })
    }

    pub async fn list_available_spots(&self, lot_id: i32) -> UseCaseResult<AvailableSpotsDto> {
        let spots = self
            .parking_store
            .list_available_spots(lot_id)
            .await
            .map_err(|err| {
                error!(lot_id, db_error = ?err, "lots: failed to list available spots");
                ParkingLotError::from(err)
            })?;

        let spots = spots
            .into_iter()
            .map(AvailableSpotDto::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                error!(lot_id, error = %err, "lots: stored spot has an unrecognised type");
                ParkingLotError::Internal(anyhow!(err))
            })?;

        info!(lot_id, available = spots.len(), "lots: available spots listed");

        Ok(AvailableSpotsDto { lot_id, spots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::parking_spots::ParkingSpotEntity,
        repositories::parking_store::MockParkingStoreGateway,
        value_objects::enums::spot_types::SpotType,
    };

    fn create_model(name: &str, capacity: i32) -> CreateParkingLotModel {
        CreateParkingLotModel {
            lot_name: name.to_string(),
            capacity,
            location: Some("North gate".to_string()),
            levels: 1,
        }
    }

    #[tokio::test]
    async fn creates_lot_through_store() {
        let mut parking_store = MockParkingStoreGateway::new();
        parking_store
            .expect_create_lot_with_default_rates()
            .withf(|lot| lot.lot_name == "Central" && lot.capacity == 40)
            .times(1)
            .returning(|_| Ok(5));

        let usecase = ParkingLotsUseCase::new(Arc::new(parking_store));
        let created = usecase
            .create_lot_with_default_rates(create_model(" Central ", 40))
            .await
            .unwrap();

        assert_eq!(created.lot_id, 5);
    }

    #[tokio::test]
    async fn duplicate_name_is_invalid_state() {
        let mut parking_store = MockParkingStoreGateway::new();
        parking_store
            .expect_create_lot_with_default_rates()
            .returning(|lot| Err(StoreError::DuplicateLotName(lot.lot_name)));

        let usecase = ParkingLotsUseCase::new(Arc::new(parking_store));
        let err = usecase
            .create_lot_with_default_rates(create_model("Central", 40))
            .await
            .unwrap_err();

        assert!(matches!(err, ParkingLotError::DuplicateName(ref name) if name == "Central"));
        assert_eq!(err.kind(), FailureKind::InvalidState);
    }

    #[tokio::test]
    async fn rejects_non_positive_capacity() {
        let mut parking_store = MockParkingStoreGateway::new();
        parking_store.expect_create_lot_with_default_rates().never();

        let usecase = ParkingLotsUseCase::new(Arc::new(parking_store));
        let err = usecase
            .create_lot_with_default_rates(create_model("Central", 0))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Validation);
    }

    #[tokio::test]
    async fn lists_spots_with_typed_spot_kind() {
        let mut parking_store = MockParkingStoreGateway::new();
        parking_store.expect_list_available_spots().returning(|lot_id| {
            Ok(vec![ParkingSpotEntity {
                spot_id: 9,
                spot_number: "A1".to_string(),
                spot_type: "EV".to_string(),
                is_occupied: false,
                lot_id,
            }])
        });

        let usecase = ParkingLotsUseCase::new(Arc::new(parking_store));
        let listed = usecase.list_available_spots(2).await.unwrap();

        assert_eq!(listed.lot_id, 2);
        assert_eq!(listed.spots.len(), 1);
        assert_eq!(listed.spots[0].spot_type, SpotType::Ev);
    }
}
