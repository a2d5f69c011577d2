//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod error;
pub mod ids;
pub mod overlay;
pub mod page;
pub mod title;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{TitleID, UserID};
pub use overlay::{OverlayFlags, OverlayList, TitleWithOverlay};
pub use page::Page;
pub use title::{ContentType, Title};
pub use user::{AccessLevel, UserRole, Viewer};
