pub mod payment_methods;
pub mod payment_statuses;
pub mod spot_types;
pub mod transaction_statuses;
pub mod vehicle_types;
