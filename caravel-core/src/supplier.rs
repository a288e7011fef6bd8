use async_trait::async_trait;
use std::path::PathBuf;

use crate::booking::BookingRecord;
use crate::models::{SearchRequest, SearchResponse};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boundary to the flight search/price service.
///
/// Implementations own credentials, transport, and timeouts; callers see a
/// blocking-per-turn call that either returns offers or fails outright.
#[async_trait]
pub trait FlightSupplier: Send + Sync {
    /// Search for offers matching the request.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BoxError>;

    /// Re-quote with identical parameters to confirm pricing.
    async fn verify_price(&self, request: &SearchRequest) -> Result<SearchResponse, BoxError>;

    /// Cheap connectivity probe, used by the "test connection" command.
    async fn health_check(&self) -> Result<(), BoxError>;
}

/// Boundary to the artifact renderer producing a receipt for a booking.
#[async_trait]
pub trait ReceiptRenderer: Send + Sync {
    /// Render a receipt and return the path of the produced artifact.
    async fn render(&self, record: &BookingRecord) -> Result<PathBuf, BoxError>;
}
