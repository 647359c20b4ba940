pub mod billing;
pub mod errors;
pub mod usecases;
