pub mod payment;
pub mod processor;
