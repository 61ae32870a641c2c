//! genenet-web — HTTP front end for the gene network analysis.
//! Serves:
//!   - `GET /`         liveness message
//!   - `GET /status/`  reference dataset readiness
//!   - `POST /upload/` genes sheet in, node/edge graph out

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
