//! Booking synthesis: traveler validation, identifier generation,
//! persistence, and the receipt-rendering request.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use caravel_core::booking::BookingRecord;
use caravel_core::repository::BookingRepository;
use caravel_core::supplier::ReceiptRenderer;
use caravel_core::traveler::TravelerDraft;
use caravel_offer::display::{format_datetime, pretty_duration};
use caravel_offer::SelectedOffer;

use crate::carrier::extract_carrier_code;
use crate::ids::IdFactory;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing traveler information: {}", .0.join(", "))]
    MissingTravelerFields(Vec<&'static str>),

    #[error("Failed to persist booking record: {0}")]
    Persistence(String),
}

/// Result of a successful booking call: the persisted record and the
/// confirmation text to echo back, including a non-fatal note when the
/// receipt could not be rendered.
#[derive(Debug)]
pub struct BookingOutcome {
    pub record: BookingRecord,
    pub confirmation: String,
}

/// Fabricates internally consistent reservation records from a selected
/// offer and traveler data.
pub struct BookingSynthesizer {
    repository: Arc<dyn BookingRepository>,
    renderer: Arc<dyn ReceiptRenderer>,
    ids: Mutex<IdFactory>,
}

impl BookingSynthesizer {
    pub fn new(repository: Arc<dyn BookingRepository>, renderer: Arc<dyn ReceiptRenderer>) -> Self {
        Self::with_ids(repository, renderer, IdFactory::from_entropy())
    }

    /// Construct with a seeded factory for deterministic identifiers.
    pub fn with_ids(
        repository: Arc<dyn BookingRepository>,
        renderer: Arc<dyn ReceiptRenderer>,
        ids: IdFactory,
    ) -> Self {
        Self { repository, renderer, ids: Mutex::new(ids) }
    }

    /// Book the selected offer for the traveler described by `draft`.
    ///
    /// Validation failures name exactly the missing fields and persist
    /// nothing. Rendering failure never fails the booking; the outcome's
    /// confirmation carries a note instead of a receipt path.
    pub async fn book(
        &self,
        selected: &SelectedOffer,
        draft: TravelerDraft,
    ) -> Result<BookingOutcome, BookingError> {
        let traveler = draft.validate().map_err(|missing| {
            tracing::error!(missing = ?missing, "booking rejected: incomplete traveler information");
            BookingError::MissingTravelerFields(missing)
        })?;

        let offer = selected.offer().clone();
        let carrier_code = extract_carrier_code(&offer);
        let created_at = Utc::now();

        let (booking_id, pnr, eticket_number) = {
            let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
            (ids.booking_id(created_at), ids.pnr(), ids.eticket_number(&carrier_code))
        };

        tracing::info!(%booking_id, %pnr, carrier = %carrier_code, "creating booking");

        let mut record = BookingRecord {
            booking_id,
            pnr,
            eticket_number,
            traveler,
            offer,
            created_at,
            receipt_path: None,
        };

        self.repository.save(&record).await.map_err(|e| {
            tracing::error!(error = %e, "failed to persist booking record");
            BookingError::Persistence(e.to_string())
        })?;

        let receipt_note = match self.renderer.render(&record).await {
            Ok(path) => {
                if let Err(e) = self.repository.attach_receipt(&record.booking_id, &path).await {
                    tracing::warn!(error = %e, "could not attach receipt path to stored record");
                }
                let note = format!(
                    "**E-Ticket**: Your e-ticket has been generated and saved to: {}",
                    path.display()
                );
                record.receipt_path = Some(path);
                note
            }
            Err(e) => {
                tracing::warn!(error = %e, "receipt rendering failed; booking stands");
                "Note: your e-ticket receipt could not be generated right now. Your booking is still confirmed.".to_string()
            }
        };

        let confirmation = format_confirmation(&record, &receipt_note);
        Ok(BookingOutcome { record, confirmation })
    }
}

/// Render the confirmation block echoed to the traveler.
fn format_confirmation(record: &BookingRecord, receipt_note: &str) -> String {
    let mut out = String::from("## Flight Booking Confirmation\n\n");

    out.push_str(&format!("**Booking Reference**: {}\n", record.booking_id));
    out.push_str(&format!("**PNR**: {}\n", record.pnr));
    out.push_str(&format!("**E-Ticket Number**: {}\n\n", record.eticket_number));

    out.push_str("**Passenger Information**:\n");
    out.push_str(&format!("- Passenger 1: {}\n", record.traveler.full_name()));
    out.push_str(&format!("  Date of Birth: {}\n", record.traveler.date_of_birth));
    out.push_str(&format!("  Gender: {}\n\n", record.traveler.gender));

    out.push_str("**Flight Details**:\n");
    let (total, currency) = record.offer.display_total();
    out.push_str(&format!("**Total Price**: {} {}\n\n", total, currency));

    let itinerary_count = record.offer.itineraries.len();
    for (i, itinerary) in record.offer.itineraries.iter().enumerate() {
        let trip_type = if itinerary_count == 1 {
            "Flight"
        } else if i == 0 {
            "Outbound"
        } else {
            "Return"
        };
        out.push_str(&format!("**{} Journey**:\n", trip_type));

        for segment in &itinerary.segments {
            let carrier = segment.carrier_code.as_deref().unwrap_or("");
            let number = segment.number.as_deref().unwrap_or("");
            out.push_str(&format!("- Flight: {}{}\n", carrier, number));

            out.push_str(&format!("  From: {}", segment.departure.iata_code));
            if let Some(terminal) = &segment.departure.terminal {
                out.push_str(&format!(" Terminal {}", terminal));
            }
            if let Some(at) = &segment.departure.at {
                out.push_str(&format!(" at {}", format_datetime(at)));
            }
            out.push('\n');

            out.push_str(&format!("  To: {}", segment.arrival.iata_code));
            if let Some(terminal) = &segment.arrival.terminal {
                out.push_str(&format!(" Terminal {}", terminal));
            }
            if let Some(at) = &segment.arrival.at {
                out.push_str(&format!(" at {}", format_datetime(at)));
            }
            out.push('\n');

            if let Some(duration) = &segment.duration {
                out.push_str(&format!("  Duration: {}\n", pretty_duration(duration)));
            }
            if let Some(aircraft) = &segment.aircraft {
                out.push_str(&format!("  Aircraft: {}\n", aircraft.code));
            }
            out.push('\n');
        }
    }

    out.push_str(receipt_note);
    out.push_str("\n\n**Important**: Please arrive at the airport at least 2 hours before your flight.\n");
    out.push_str("Thank you for booking with us!\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use caravel_core::models::SearchRequest;
    use caravel_core::supplier::BoxError;
    use caravel_offer::{MockFlightSupplier, OfferOrchestrator, SearchOutcome};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    struct MemoryRepository {
        records: Mutex<HashMap<String, BookingRecord>>,
    }

    impl MemoryRepository {
        fn new() -> Self {
            Self { records: Mutex::new(HashMap::new()) }
        }

        fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn get_sync(&self, id: &str) -> Option<BookingRecord> {
            self.records.lock().unwrap().get(id).cloned()
        }
    }

    #[async_trait]
    impl BookingRepository for MemoryRepository {
        async fn save(&self, record: &BookingRecord) -> Result<(), BoxError> {
            self.records.lock().unwrap().insert(record.booking_id.clone(), record.clone());
            Ok(())
        }

        async fn get(&self, booking_id: &str) -> Result<Option<BookingRecord>, BoxError> {
            Ok(self.get_sync(booking_id))
        }

        async fn attach_receipt(&self, booking_id: &str, path: &Path) -> Result<(), BoxError> {
            let mut records = self.records.lock().unwrap();
            let record = records.get_mut(booking_id).ok_or("unknown booking")?;
            record.receipt_path = Some(path.to_path_buf());
            Ok(())
        }
    }

    struct StubRenderer {
        fail: bool,
    }

    #[async_trait]
    impl ReceiptRenderer for StubRenderer {
        async fn render(&self, record: &BookingRecord) -> Result<PathBuf, BoxError> {
            if self.fail {
                return Err("renderer unavailable".into());
            }
            Ok(PathBuf::from(format!("receipts/eticket_{}.txt", record.pnr)))
        }
    }

    async fn selected_offer() -> SelectedOffer {
        let orchestrator = OfferOrchestrator::new(Arc::new(MockFlightSupplier::new()));
        let request =
            SearchRequest::new("JFK", "LAX", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        match orchestrator.search(request).await.unwrap() {
            SearchOutcome::Found { batch, .. } => batch.select(2).unwrap(),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    fn complete_draft() -> TravelerDraft {
        TravelerDraft {
            first_name: Some("Jane".into()),
            last_name: Some("Smith".into()),
            email: Some("jane.smith@example.com".into()),
            phone: Some("5551234567".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 11, 2),
            gender: Some("FEMALE".into()),
        }
    }

    #[tokio::test]
    async fn test_successful_booking_persists_consistent_record() {
        let repository = Arc::new(MemoryRepository::new());
        let synthesizer = BookingSynthesizer::with_ids(
            repository.clone(),
            Arc::new(StubRenderer { fail: false }),
            IdFactory::seeded(42),
        );

        let outcome = synthesizer.book(&selected_offer().await, complete_draft()).await.unwrap();

        assert!(outcome.record.booking_id.starts_with("ORDER_"));
        assert_eq!(outcome.record.pnr.len(), 6);
        assert!(outcome.record.pnr.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(outcome.record.eticket_number.len(), 13);
        // Offer 2 in the mock batch is a Delta flight.
        assert!(outcome.record.eticket_number.starts_with("006"));

        // Re-reading by booking id reproduces the same identifiers.
        let stored = repository.get_sync(&outcome.record.booking_id).unwrap();
        assert_eq!(stored.pnr, outcome.record.pnr);
        assert_eq!(stored.eticket_number, outcome.record.eticket_number);
        assert_eq!(stored.receipt_path, outcome.record.receipt_path);

        assert!(outcome.confirmation.contains("## Flight Booking Confirmation"));
        assert!(outcome.confirmation.contains(&outcome.record.pnr));
        assert!(outcome.confirmation.contains("Jane Smith"));
        assert!(outcome.confirmation.contains("e-ticket has been generated"));
    }

    #[tokio::test]
    async fn test_missing_fields_persist_nothing() {
        let repository = Arc::new(MemoryRepository::new());
        let synthesizer = BookingSynthesizer::with_ids(
            repository.clone(),
            Arc::new(StubRenderer { fail: false }),
            IdFactory::seeded(42),
        );

        let draft = TravelerDraft {
            email: None,
            date_of_birth: None,
            ..complete_draft()
        };
        let err = synthesizer.book(&selected_offer().await, draft).await.unwrap_err();

        match err {
            BookingError::MissingTravelerFields(missing) => {
                assert_eq!(missing, vec!["email", "date_of_birth"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(repository.count(), 0);
    }

    #[tokio::test]
    async fn test_renderer_failure_is_non_fatal() {
        let repository = Arc::new(MemoryRepository::new());
        let synthesizer = BookingSynthesizer::with_ids(
            repository.clone(),
            Arc::new(StubRenderer { fail: true }),
            IdFactory::seeded(42),
        );

        let outcome = synthesizer.book(&selected_offer().await, complete_draft()).await.unwrap();

        assert!(outcome.record.receipt_path.is_none());
        assert!(outcome.confirmation.contains("could not be generated"));
        assert!(outcome.confirmation.contains("still confirmed"));
        // The record itself is persisted regardless.
        assert_eq!(repository.count(), 1);
    }

    #[tokio::test]
    async fn test_seeded_synthesizers_produce_identical_identifiers() {
        let selected = selected_offer().await;
        let mut identifiers = Vec::new();
        for _ in 0..2 {
            let synthesizer = BookingSynthesizer::with_ids(
                Arc::new(MemoryRepository::new()),
                Arc::new(StubRenderer { fail: false }),
                IdFactory::seeded(99),
            );
            let outcome = synthesizer.book(&selected, complete_draft()).await.unwrap();
            identifiers.push((outcome.record.pnr, outcome.record.eticket_number));
        }
        assert_eq!(identifiers[0], identifiers[1]);
    }
}
