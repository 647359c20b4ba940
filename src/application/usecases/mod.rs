pub mod drivers;
pub mod parking_lots;
pub mod ticket_lifecycle;
