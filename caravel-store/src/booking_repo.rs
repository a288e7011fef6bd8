use async_trait::async_trait;
use std::path::{Path, PathBuf};

use caravel_core::booking::BookingRecord;
use caravel_core::repository::BookingRepository;
use caravel_core::supplier::BoxError;

/// Booking repository over a directory of `<booking_id>.json` files.
///
/// The durable record of truth for "booking details" queries within the
/// process lifetime. Records are written once and rewritten only to attach
/// the rendered-receipt path.
pub struct JsonBookingStore {
    dir: PathBuf,
}

impl JsonBookingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, booking_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", booking_id))
    }
}

#[async_trait]
impl BookingRepository for JsonBookingStore {
    async fn save(&self, record: &BookingRecord) -> Result<(), BoxError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.record_path(&record.booking_id);
        let json = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, json).await?;
        tracing::info!(booking_id = %record.booking_id, path = %path.display(), "saved booking record");
        Ok(())
    }

    async fn get(&self, booking_id: &str) -> Result<Option<BookingRecord>, BoxError> {
        match tokio::fs::read(self.record_path(booking_id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn attach_receipt(&self, booking_id: &str, path: &Path) -> Result<(), BoxError> {
        let mut record = self
            .get(booking_id)
            .await?
            .ok_or_else(|| format!("no booking record for id {}", booking_id))?;
        record.receipt_path = Some(path.to_path_buf());
        self.save(&record).await
    }
}
