pub mod exit_validator;
pub mod fee_calculator;
