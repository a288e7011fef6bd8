//! Offer search orchestration and selection.
//!
//! Drives the opaque search/price supplier: one search call retains the
//! full offer collection in the order the supplier ranked it, then a
//! best-effort price-verification call may upgrade the display text without
//! ever touching the retained order. Selection is by 1-based display index
//! into the retained batch.

use std::sync::Arc;

use caravel_core::models::{Dictionaries, FlightOffer, SearchRequest, SearchResponse};
use caravel_core::supplier::{BoxError, FlightSupplier};

use crate::display;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Error connecting to flight search service: {0}")]
    Upstream(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No flight options available. Please search for flights first.")]
    EmptyBatch,

    #[error("Invalid option. Please select a number between 1 and {max}.")]
    OutOfRange { max: usize },
}

/// The retained result of one search: offers in supplier ranking order plus
/// the request that produced them and the display-label dictionaries.
#[derive(Debug, Clone)]
pub struct OfferBatch {
    request: SearchRequest,
    offers: Vec<FlightOffer>,
    dictionaries: Dictionaries,
}

impl OfferBatch {
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn offers(&self) -> &[FlightOffer] {
        &self.offers
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Select an offer by its 1-based display index.
    ///
    /// Indices refer to the retained search order, never to whatever the
    /// verification call displayed. Out-of-range indices fail without
    /// touching anything.
    pub fn select(&self, display_index: usize) -> Result<SelectedOffer, SelectionError> {
        if self.offers.is_empty() {
            return Err(SelectionError::EmptyBatch);
        }
        if display_index < 1 || display_index > self.offers.len() {
            return Err(SelectionError::OutOfRange { max: self.offers.len() });
        }
        Ok(SelectedOffer {
            offer: self.offers[display_index - 1].clone(),
            display_index,
        })
    }
}

/// An offer chosen out of a retained batch.
///
/// Only `OfferBatch::select` constructs this, so any selected offer is
/// traceable to a prior search.
#[derive(Debug, Clone)]
pub struct SelectedOffer {
    offer: FlightOffer,
    display_index: usize,
}

impl SelectedOffer {
    pub fn offer(&self) -> &FlightOffer {
        &self.offer
    }

    pub fn display_index(&self) -> usize {
        self.display_index
    }

    /// Confirmation line echoed to the traveler after selection.
    pub fn confirmation(&self) -> String {
        let (total, currency) = self.offer.display_total();
        format!(
            "You've selected flight option {} for {} {}. Please provide passenger information to complete the booking.",
            self.display_index, total, currency
        )
    }
}

/// Outcome of one search turn.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The supplier answered with zero offers. Not an error; the traveler is
    /// nudged to vary the date or airports.
    NoFlights { request: SearchRequest },
    /// Offers were found and retained. `display` is the verified-price text
    /// when verification succeeded, otherwise the raw search listing.
    Found { batch: OfferBatch, display: String },
}

impl SearchOutcome {
    /// The reply text for this outcome.
    pub fn display(&self) -> String {
        match self {
            SearchOutcome::NoFlights { request } => format!(
                "No flights found for {} to {} on {}. Please try different dates or airports.",
                request.origin, request.destination, request.departure_date
            ),
            SearchOutcome::Found { display, .. } => display.clone(),
        }
    }
}

/// Orchestrates search and price verification against the supplier.
pub struct OfferOrchestrator {
    supplier: Arc<dyn FlightSupplier>,
}

impl OfferOrchestrator {
    pub fn new(supplier: Arc<dyn FlightSupplier>) -> Self {
        Self { supplier }
    }

    /// Search for offers, retain them, and attempt price verification.
    ///
    /// Verification is best-effort: a successful non-empty verification
    /// supersedes the raw search display, any failure leaves the raw result
    /// standing. Supplier failure on the primary search surfaces as
    /// `SearchError::Upstream` for this call only.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, SearchError> {
        tracing::info!(
            origin = %request.origin,
            destination = %request.destination,
            date = %request.departure_date,
            "searching flights"
        );

        let response = self.supplier.search(&request).await.map_err(|e| {
            tracing::error!(error = %e, "flight search failed");
            SearchError::Upstream(e.to_string())
        })?;

        if response.data.is_empty() {
            tracing::info!("search returned no offers");
            return Ok(SearchOutcome::NoFlights { request });
        }

        let dictionaries = response.dictionaries.unwrap_or_default();
        tracing::info!(count = response.data.len(), "retrieved flight offers");

        let mut display = display::format_offer_list(&response.data, &dictionaries);

        match self.supplier.verify_price(&request).await {
            Ok(verified) if !verified.data.is_empty() => {
                let verified_dicts = verified.dictionaries.unwrap_or_default();
                display = display::format_verified_prices(&verified.data, &verified_dicts);
            }
            Ok(_) => {
                tracing::warn!("price verification returned no offers; keeping search results");
            }
            Err(e) => {
                tracing::warn!(error = %e, "price verification failed; keeping search results");
            }
        }

        Ok(SearchOutcome::Found {
            batch: OfferBatch { request, offers: response.data, dictionaries },
            display,
        })
    }

    /// Probe supplier connectivity for the "test connection" command.
    pub async fn test_connection(&self) -> String {
        match self.supplier.health_check().await {
            Ok(()) => "Flight search service connection successful. Ready to search flights.".to_string(),
            Err(e) => format!("Flight search service connection error: {}", e),
        }
    }
}

// ============================================================================
// Mock supplier
// ============================================================================

/// In-process supplier producing canned offers for any route. Used by the
/// CLI demo and by tests across the workspace.
pub struct MockFlightSupplier {
    /// When set, `search` answers with zero offers.
    pub empty: bool,
    /// When set, every call fails as if the service were unreachable.
    pub unreachable: bool,
}

impl MockFlightSupplier {
    pub fn new() -> Self {
        Self { empty: false, unreachable: false }
    }
}

impl Default for MockFlightSupplier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FlightSupplier for MockFlightSupplier {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BoxError> {
        if self.unreachable {
            return Err("connection refused".into());
        }
        if self.empty {
            return Ok(SearchResponse { data: vec![], dictionaries: None });
        }

        let carriers = [("AA", "447.20"), ("DL", "462.85"), ("UA", "489.00")];
        let data = carriers
            .iter()
            .enumerate()
            .map(|(i, (code, total))| {
                let depart_hour = 7 + 3 * i;
                canned_offer(
                    &(i + 1).to_string(),
                    code,
                    total,
                    &request.origin,
                    &request.destination,
                    &format!("{}T{:02}:15:00", request.departure_date, depart_hour),
                    &format!("{}T{:02}:40:00", request.departure_date, depart_hour + 6),
                )
            })
            .collect();

        let mut dictionaries = Dictionaries::default();
        dictionaries.carriers.insert("AA".into(), "AMERICAN AIRLINES".into());
        dictionaries.carriers.insert("DL".into(), "DELTA AIR LINES".into());
        dictionaries.carriers.insert("UA".into(), "UNITED AIRLINES".into());
        dictionaries.aircraft.insert("321".into(), "AIRBUS A321".into());

        Ok(SearchResponse { data, dictionaries: Some(dictionaries) })
    }

    async fn verify_price(&self, request: &SearchRequest) -> Result<SearchResponse, BoxError> {
        self.search(request).await
    }

    async fn health_check(&self) -> Result<(), BoxError> {
        if self.unreachable {
            return Err("connection refused".into());
        }
        Ok(())
    }
}

fn canned_offer(
    id: &str,
    carrier: &str,
    total: &str,
    origin: &str,
    destination: &str,
    departs: &str,
    arrives: &str,
) -> FlightOffer {
    use caravel_core::models::{
        AircraftRef, CheckedBags, FareDetail, Itinerary, OfferPrice, Segment, SegmentPoint,
        TravelerPricing,
    };

    FlightOffer {
        id: id.to_string(),
        carrier: None,
        price: OfferPrice {
            currency: "USD".into(),
            total: None,
            grand_total: Some(total.into()),
            base: None,
        },
        itineraries: vec![Itinerary {
            duration: Some("PT6H25M".into()),
            segments: vec![Segment {
                carrier_code: Some(carrier.into()),
                number: Some(format!("{}2", 40 + id.parse::<u32>().unwrap_or(0))),
                departure: SegmentPoint {
                    iata_code: origin.into(),
                    terminal: None,
                    at: Some(departs.into()),
                },
                arrival: SegmentPoint {
                    iata_code: destination.into(),
                    terminal: None,
                    at: Some(arrives.into()),
                },
                aircraft: Some(AircraftRef { code: "321".into() }),
                duration: Some("PT6H25M".into()),
            }],
        }],
        traveler_pricings: vec![TravelerPricing {
            fare_details_by_segment: vec![FareDetail {
                cabin: Some("ECONOMY".into()),
                included_checked_bags: Some(CheckedBags {
                    quantity: Some(1),
                    weight: None,
                    weight_unit: None,
                }),
            }],
        }],
        validating_airline_codes: vec![carrier.into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> SearchRequest {
        SearchRequest::new("NYC", "LAX", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn orchestrator(supplier: MockFlightSupplier) -> OfferOrchestrator {
        OfferOrchestrator::new(Arc::new(supplier))
    }

    #[tokio::test]
    async fn test_search_retains_offers_in_order() {
        let outcome = orchestrator(MockFlightSupplier::new()).search(request()).await.unwrap();
        match outcome {
            SearchOutcome::Found { batch, display } => {
                assert_eq!(batch.len(), 3);
                assert_eq!(batch.offers()[0].id, "1");
                assert_eq!(batch.offers()[2].id, "3");
                // Verification succeeded, so the display is the verified text.
                assert!(display.starts_with("## Verified Flight Prices"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_offers_is_not_an_error() {
        let supplier = MockFlightSupplier { empty: true, unreachable: false };
        let outcome = orchestrator(supplier).search(request()).await.unwrap();
        match outcome {
            SearchOutcome::NoFlights { .. } => {
                let text = outcome.display();
                assert!(text.contains("No flights found for NYC to LAX on 2025-06-01"));
                assert!(text.contains("different dates or airports"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_supplier_is_upstream_error() {
        let supplier = MockFlightSupplier { empty: false, unreachable: true };
        let err = orchestrator(supplier).search(request()).await.unwrap_err();
        assert!(matches!(err, SearchError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_select_in_range() {
        let outcome = orchestrator(MockFlightSupplier::new()).search(request()).await.unwrap();
        let SearchOutcome::Found { batch, .. } = outcome else {
            panic!("expected offers");
        };
        let selected = batch.select(2).unwrap();
        assert_eq!(selected.display_index(), 2);
        assert_eq!(selected.offer().id, "2");
        assert!(selected.confirmation().contains("option 2 for 462.85 USD"));
    }

    #[tokio::test]
    async fn test_select_out_of_range() {
        let outcome = orchestrator(MockFlightSupplier::new()).search(request()).await.unwrap();
        let SearchOutcome::Found { batch, .. } = outcome else {
            panic!("expected offers");
        };
        assert!(matches!(batch.select(0), Err(SelectionError::OutOfRange { max: 3 })));
        assert!(matches!(batch.select(4), Err(SelectionError::OutOfRange { max: 3 })));
        assert!(batch.select(3).is_ok());
    }

    #[test]
    fn test_select_on_empty_batch() {
        let batch = OfferBatch {
            request: request(),
            offers: vec![],
            dictionaries: Dictionaries::default(),
        };
        assert!(matches!(batch.select(1), Err(SelectionError::EmptyBatch)));
    }

    #[tokio::test]
    async fn test_connection_probe() {
        let ok = orchestrator(MockFlightSupplier::new()).test_connection().await;
        assert!(ok.contains("connection successful"));

        let supplier = MockFlightSupplier { empty: false, unreachable: true };
        let bad = orchestrator(supplier).test_connection().await;
        assert!(bad.contains("connection error"));
    }
}
