use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::FlightOffer;
use crate::traveler::Traveler;

/// The durable record of one completed booking.
///
/// Created exactly once per successful booking call and never mutated after
/// creation, except to attach the rendered-receipt path once available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Time-derived id, unique to the second of creation.
    pub booking_id: String,
    /// 6-character uppercase booking locator.
    pub pnr: String,
    /// 13-digit carrier-prefixed ticket number.
    pub eticket_number: String,
    pub traveler: Traveler,
    /// The offer as retained from the search that produced it.
    pub offer: FlightOffer,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_path: Option<PathBuf>,
}
