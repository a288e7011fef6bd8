use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;

use caravel_booking::carrier::{airline_display, extract_carrier_code};
use caravel_core::booking::BookingRecord;
use caravel_core::supplier::{BoxError, ReceiptRenderer};
use caravel_offer::display::{format_datetime, pretty_duration};

/// Receipt renderer writing a plain-text e-ticket per booking.
///
/// Stands in for the document-rendering subsystem behind the
/// [`ReceiptRenderer`] boundary; the artifact is a text file named
/// `eticket_<PNR>_<booking_id>.txt`.
pub struct TextReceiptRenderer {
    dir: PathBuf,
}

impl TextReceiptRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ReceiptRenderer for TextReceiptRenderer {
    async fn render(&self, record: &BookingRecord) -> Result<PathBuf, BoxError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self
            .dir
            .join(format!("eticket_{}_{}.txt", record.pnr, record.booking_id));
        tokio::fs::write(&path, receipt_text(record)).await?;
        tracing::info!(booking_id = %record.booking_id, path = %path.display(), "rendered e-ticket receipt");
        Ok(path)
    }
}

fn receipt_text(record: &BookingRecord) -> String {
    let carrier_code = extract_carrier_code(&record.offer);
    let (carrier_name, carrier_phone) =
        airline_display(&carrier_code, record.offer.carrier.as_deref());

    let mut out = String::new();
    out.push_str(&format!("{} E-Ticket Receipt\n", carrier_name));
    out.push_str("=====================================\n\n");

    out.push_str("Booking Information\n");
    out.push_str("-------------------\n");
    out.push_str(&format!("Booking Reference (PNR): {}\n", record.pnr));
    out.push_str(&format!("E-Ticket Number: {}\n", record.eticket_number));
    out.push_str(&format!("Booking Date: {}\n", record.created_at.format("%d %b %Y")));
    out.push_str(&format!("Passenger Name: {}\n\n", record.traveler.full_name()));

    out.push_str("Flight Information\n");
    out.push_str("------------------\n");
    let itinerary_count = record.offer.itineraries.len();
    for (i, itinerary) in record.offer.itineraries.iter().enumerate() {
        let trip_type = if itinerary_count == 1 {
            "Flight"
        } else if i == 0 {
            "Outbound"
        } else {
            "Return"
        };
        out.push_str(&format!("{} Journey\n", trip_type));

        for segment in &itinerary.segments {
            let code = segment.carrier_code.as_deref().unwrap_or(&carrier_code);
            let number = segment.number.as_deref().unwrap_or("");
            let (segment_airline, _) = airline_display(code, record.offer.carrier.as_deref());
            out.push_str(&format!("Flight: {} {}{}\n", segment_airline, code, number));

            out.push_str(&format!("From: {}", segment.departure.iata_code));
            if let Some(terminal) = &segment.departure.terminal {
                out.push_str(&format!(" Terminal {}", terminal));
            }
            out.push('\n');
            if let Some(at) = &segment.departure.at {
                out.push_str(&format!("Departure: {}\n", format_datetime(at)));
            }

            out.push_str(&format!("To: {}", segment.arrival.iata_code));
            if let Some(terminal) = &segment.arrival.terminal {
                out.push_str(&format!(" Terminal {}", terminal));
            }
            out.push('\n');
            if let Some(at) = &segment.arrival.at {
                out.push_str(&format!("Arrival: {}\n", format_datetime(at)));
            }

            if let Some(aircraft) = &segment.aircraft {
                out.push_str(&format!("Aircraft: {}\n", aircraft.code));
            }
            if let Some(duration) = &segment.duration {
                out.push_str(&format!("Duration: {}\n", pretty_duration(duration)));
            }

            let cabin = record.offer.cabin().unwrap_or("ECONOMY");
            out.push_str(&format!("Cabin: {}\n", cabin));
            let bags = record.offer.checked_bags().unwrap_or(0);
            out.push_str(&format!("Checked Baggage: {} bag(s)\n\n", bags));
        }
    }

    out.push_str("Fare Information\n");
    out.push_str("----------------\n");
    let (total, currency) = record.offer.display_total();
    if let Some(base) = &record.offer.price.base {
        out.push_str(&format!("Base Fare: {} {}\n", base, currency));
    }
    out.push_str(&format!("Total: {} {}\n\n", total, currency));

    out.push_str("Important Information\n");
    out.push_str("---------------------\n");
    out.push_str("- Please arrive at the airport at least 2 hours before your flight departure time.\n");
    out.push_str("- Please check the latest travel requirements and restrictions.\n");
    out.push_str("- This electronic ticket is valid for the flights, date, and passenger listed only.\n");
    out.push_str(&format!(
        "- In case of any issues, please contact {} at {}.\n\n",
        carrier_name, carrier_phone
    ));

    out.push_str("This e-ticket was issued automatically.\n");
    out.push_str(&format!("Generated on {}\n", Utc::now().format("%Y-%m-%d %H:%M:%S")));
    out
}
