use std::sync::Arc;

use anyhow::anyhow;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    application::errors::FailureKind,
    domain::{
        repositories::parking_store::{ParkingStoreGateway, StoreError},
        value_objects::drivers::DriverTotalSpentDto,
    },
};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DriverError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DriverError::Internal(_) => FailureKind::StoreFailure,
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        self.kind().status_code()
    }
}

impl From<StoreError> for DriverError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Internal(err) => DriverError::Internal(err),
            other => DriverError::Internal(anyhow!(other.to_string())),
        }
    }
}

pub struct DriversUseCase<S>
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    parking_store: Arc<S>,
}

impl<S> DriversUseCase<S>
where
    S: ParkingStoreGateway + Send + Sync + 'static,
{
    pub fn new(parking_store: Arc<S>) -> Self {
        Self { parking_store }
    }

    pub async fn total_spent(&self, driver_id: i32) -> Result<DriverTotalSpentDto, DriverError> {
        let total_spent = self
            .parking_store
            .driver_total_spent(driver_id)
            .await
            .map_err(|err| {
                error!(driver_id, db_error = ?err, "drivers: failed to sum driver payments");
                DriverError::from(err)
            })?;

        info!(driver_id, total_spent = %total_spent, "drivers: total spent computed");

        Ok(DriverTotalSpentDto {
            status: "ok",
            driver_id,
            total_spent: total_spent.round_dp(2),
        })
    }
}
