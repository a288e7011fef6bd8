pub mod carrier;
pub mod ids;
pub mod synthesizer;

pub use ids::IdFactory;
pub use synthesizer::{BookingError, BookingOutcome, BookingSynthesizer};
