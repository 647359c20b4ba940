use diesel::prelude::*;

use crate::{
    domain::value_objects::enums::vehicle_types::VehicleType,
    infrastructure::postgres::schema::vehicles,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(license_plate))]
#[diesel(table_name = vehicles)]
pub struct VehicleEntity {
    pub license_plate: String,
    pub vehicle_type: String,
    pub model: Option<String>,
    pub colour: Option<String>,
    pub driver_id: Option<i32>,
}

impl VehicleEntity {
    pub fn kind(&self) -> Result<VehicleType, String> {
        VehicleType::try_from(self.vehicle_type.as_str())
    }
}
