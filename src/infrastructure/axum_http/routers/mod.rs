pub mod drivers;
pub mod lots;
pub mod tickets;
