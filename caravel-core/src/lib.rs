pub mod booking;
pub mod models;
pub mod repository;
pub mod supplier;
pub mod traveler;

pub use booking::BookingRecord;
pub use models::{
    Dictionaries, FlightOffer, Itinerary, OfferPrice, SearchRequest, SearchResponse, Segment,
};
pub use repository::BookingRepository;
pub use supplier::{BoxError, FlightSupplier, ReceiptRenderer};
pub use traveler::{Traveler, TravelerDraft};
