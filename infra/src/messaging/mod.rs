//! Messaging module - delivery of OTP codes through the external
//! messaging API, plus an in-memory mock for development and tests.

pub mod gateway;
pub mod mock;

pub use gateway::MessageGateway;
pub use mock::MockMessageGateway;
