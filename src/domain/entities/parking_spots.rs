use diesel::prelude::*;

use crate::infrastructure::postgres::schema::parking_spots;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(spot_id))]
#[diesel(table_name = parking_spots)]
pub struct ParkingSpotEntity {
    pub spot_id: i32,
    pub spot_number: String,
    pub spot_type: String,
    pub is_occupied: bool,
    pub lot_id: i32,
}
