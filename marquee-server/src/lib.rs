//! # Marquee Server
//!
//! Thin axum surface over the title query engine. Authentication happens
//! upstream; requests arrive with the caller's identity in trusted headers.

pub mod errors;
pub mod handlers;
pub mod identity;
pub mod routes;
pub mod seed;
pub mod state;

pub use routes::create_app;
pub use state::AppState;
