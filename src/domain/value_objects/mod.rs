pub mod drivers;
pub mod enums;
pub mod parking_lots;
pub mod tickets;
