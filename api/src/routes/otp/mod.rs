//! OTP lifecycle endpoints.

pub mod resend;
pub mod send;
pub mod status;
pub mod verify;
