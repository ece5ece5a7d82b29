//! Route handlers grouped by resource.

pub mod audit;
pub mod otp;
