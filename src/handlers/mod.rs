pub mod info;
pub mod payments;
