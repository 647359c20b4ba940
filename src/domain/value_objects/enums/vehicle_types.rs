use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleType {
    Car,
    Bike,
    Truck,
    Handicap,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Bike => "Bike",
            VehicleType::Truck => "Truck",
            VehicleType::Handicap => "Handicap",
        }
    }
}

impl TryFrom<&str> for VehicleType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Car" => Ok(VehicleType::Car),
            "Bike" => Ok(VehicleType::Bike),
            "Truck" => Ok(VehicleType::Truck),
            "Handicap" => Ok(VehicleType::Handicap),
            other => Err(format!("unknown vehicle type: {other}")),
        }
    }
}

impl Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
