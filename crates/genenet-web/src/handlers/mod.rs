//! HTTP handlers for all API routes.

pub mod status;
pub mod upload;
