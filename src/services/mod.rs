pub mod normalizer;
pub mod payment_processor_client;
pub mod payment_service;
pub mod response_mapper;

pub use normalizer::CallerContext;
pub use payment_processor_client::{PaymentProcessorClient, TransactionGateway};
pub use payment_service::PaymentService;
