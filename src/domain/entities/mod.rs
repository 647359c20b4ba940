pub mod parking_lots;
pub mod parking_rates;
pub mod parking_spots;
pub mod parking_tickets;
pub mod payments;
pub mod vehicles;
