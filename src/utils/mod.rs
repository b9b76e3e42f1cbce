pub mod client_ip;
pub mod document;
pub mod money;
