use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Supplier wire models (flight-offers search shape)
// ============================================================================

/// One priced itinerary option as returned by the search supplier.
///
/// The engine never mutates offer content; it only indexes into the returned
/// collection by 1-based display order. Fields the supplier omits deserialize
/// to their defaults so partial payloads stay usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    #[serde(default)]
    pub id: String,
    /// Explicit carrier label, either an airline name or a 2-letter code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    pub price: OfferPrice,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traveler_pricings: Vec<TravelerPricing>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validating_airline_codes: Vec<String>,
}

impl FlightOffer {
    /// Total price preferring the all-in figure over the base total.
    pub fn display_total(&self) -> (&str, &str) {
        let amount = self
            .price
            .grand_total
            .as_deref()
            .or(self.price.total.as_deref())
            .unwrap_or("N/A");
        (amount, &self.price.currency)
    }

    /// Cabin of the first fare detail, if the supplier priced one.
    pub fn cabin(&self) -> Option<&str> {
        self.traveler_pricings
            .iter()
            .flat_map(|tp| tp.fare_details_by_segment.iter())
            .find_map(|fd| fd.cabin.as_deref())
    }

    /// Included checked-bag quantity of the first fare detail carrying one.
    pub fn checked_bags(&self) -> Option<u32> {
        self.traveler_pricings
            .iter()
            .flat_map(|tp| tp.fare_details_by_segment.iter())
            .find_map(|fd| fd.included_checked_bags.as_ref().and_then(|b| b.quantity))
    }
}

/// Monetary amounts are carried as strings, exactly as the supplier sends
/// them; the engine never does arithmetic on prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    #[serde(default)]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<String>,
    /// Flight number without the carrier prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default)]
    pub departure: SegmentPoint,
    #[serde(default)]
    pub arrival: SegmentPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<AircraftRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPoint {
    #[serde(default)]
    pub iata_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    /// ISO-8601 local timestamp, e.g. "2025-06-01T08:15:00".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftRef {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPricing {
    #[serde(default)]
    pub fare_details_by_segment: Vec<FareDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_checked_bags: Option<CheckedBags>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedBags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
}

// ============================================================================
// Search request / response
// ============================================================================

/// Parameters for one search (and for its price-verification twin, which
/// reuses the request verbatim).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    /// ECONOMY, PREMIUM_ECONOMY, BUSINESS, or FIRST.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<String>,
    #[serde(default)]
    pub non_stop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl SearchRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date: date,
            return_date: None,
            adults: 1,
            children: 0,
            infants: 0,
            travel_class: None,
            non_stop: false,
            currency: None,
            max_price: None,
            max_results: Some(10),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Dictionaries>,
}

/// Display-label lookups shipped alongside the offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionaries {
    #[serde(default)]
    pub carriers: HashMap<String, String>,
    #[serde(default)]
    pub aircraft: HashMap<String, String>,
}

impl Dictionaries {
    pub fn carrier_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.carriers.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn aircraft_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.aircraft.get(code).map(String::as_str).unwrap_or(code)
    }
}
