pub mod infrastructure;
pub mod ports;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use infrastructure::memory::{InMemoryTitleRepository, InMemoryUserOverlayRepository};
#[cfg(feature = "postgres")]
pub use postgres::PostgresDatabase;
