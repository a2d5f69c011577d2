pub mod titles;
pub mod user_overlays;

pub use titles::PostgresTitleRepository;
pub use user_overlays::PostgresUserOverlayRepository;
