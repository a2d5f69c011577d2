//! Map-backed stores. Used by tests and the server's in-memory mode.

pub mod titles;
pub mod user_overlays;

pub use titles::InMemoryTitleRepository;
pub use user_overlays::InMemoryUserOverlayRepository;
