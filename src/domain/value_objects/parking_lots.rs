use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    entities::{parking_rates::InsertParkingRateEntity, parking_spots::ParkingSpotEntity},
    value_objects::enums::{spot_types::SpotType, vehicle_types::VehicleType},
};

pub const DEFAULT_GRACE_MINUTES: i32 = 15;

/// Rate card every new lot starts with: (vehicle type, spot type, rate per hour in cents).
const DEFAULT_RATE_CARD: [(VehicleType, SpotType, i64); 5] = [
    (VehicleType::Car, SpotType::Standard, 5000),
    (VehicleType::Bike, SpotType::Bike, 2000),
    (VehicleType::Truck, SpotType::Large, 10000),
    (VehicleType::Handicap, SpotType::Handicap, 3000),
    (VehicleType::Car, SpotType::Ev, 6000),
];

pub fn default_rates_for_lot(lot_id: i32) -> Vec<InsertParkingRateEntity> {
    DEFAULT_RATE_CARD
        .iter()
        .map(|(vehicle_type, spot_type, cents)| InsertParkingRateEntity {
            rate_per_hour: Decimal::new(*cents, 2),
            vehicle_type: vehicle_type.to_string(),
            spot_type: spot_type.to_string(),
            grace_minutes: DEFAULT_GRACE_MINUTES,
            lot_id: Some(lot_id),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateParkingLotModel {
    pub lot_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub levels: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateParkingLotDto {
    pub status: &'static str,
    pub lot_id: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSpotsCountDto {
    pub lot_id: i32,
    pub available: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSpotDto {
    pub spot_id: i32,
    pub spot_number: String,
    pub spot_type: SpotType,
}

impl TryFrom<ParkingSpotEntity> for AvailableSpotDto {
    type Error = String;

    fn try_from(entity: ParkingSpotEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            spot_type: SpotType::try_from(entity.spot_type.as_str())?,
            spot_id: entity.spot_id,
            spot_number: entity.spot_number,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSpotsDto {
    pub lot_id: i32,
    pub spots: Vec<AvailableSpotDto>,
}
