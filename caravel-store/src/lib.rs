pub mod app_config;
pub mod booking_repo;
pub mod receipt;

pub use app_config::Config;
pub use booking_repo::JsonBookingStore;
pub use receipt::TextReceiptRenderer;
