//! Embedded HTTP API.
//!
//! A JSON API served over localhost by default: session-based auth,
//! the booking day view, the appointment lifecycle, clients, services,
//! employees, sales and the dashboard. Static photo uploads are served
//! under `/uploads/`.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::ApiServer;
pub use types::{ApiContext, UserContext};
