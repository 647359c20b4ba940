pub mod parking_store;
