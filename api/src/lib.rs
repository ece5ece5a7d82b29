//! # API Layer
//!
//! HTTP surface for the OTP client verification flow, built on actix-web.
//! Routes delegate to the core `OtpService`; this layer owns request
//! validation, error-to-status mapping, and response shaping only.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
