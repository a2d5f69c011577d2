pub mod titles;
pub mod user_overlays;

pub use titles::TitleRepository;
pub use user_overlays::UserOverlayRepository;
