use diesel::prelude::*;

use crate::infrastructure::postgres::schema::parking_lots;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(lot_id))]
#[diesel(table_name = parking_lots)]
pub struct ParkingLotEntity {
    pub lot_id: i32,
    pub lot_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub levels: i32,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = parking_lots)]
pub struct InsertParkingLotEntity {
    pub lot_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub levels: i32,
}
