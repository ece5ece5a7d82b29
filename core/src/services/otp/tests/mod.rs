//! Tests for the OTP lifecycle service
