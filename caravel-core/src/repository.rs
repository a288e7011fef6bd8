use async_trait::async_trait;
use std::path::Path;

use crate::booking::BookingRecord;
use crate::supplier::BoxError;

/// Repository trait for durable booking-record access.
///
/// Records are keyed by booking id and retrievable for the remainder of the
/// process lifetime. A record is written once on creation and rewritten only
/// to attach the rendered-receipt path.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, record: &BookingRecord) -> Result<(), BoxError>;

    async fn get(&self, booking_id: &str) -> Result<Option<BookingRecord>, BoxError>;

    async fn attach_receipt(&self, booking_id: &str, path: &Path) -> Result<(), BoxError>;
}
