//! Human-readable rendering of offer collections.

use caravel_core::models::{Dictionaries, FlightOffer, Itinerary};
use chrono::NaiveDateTime;

/// Render the retained search results as a numbered option list.
pub fn format_offer_list(offers: &[FlightOffer], dictionaries: &Dictionaries) -> String {
    format_offers("## Available Flight Options", offers, dictionaries)
}

/// Render a price-verification response. Same body as the search listing
/// under a header that tells the traveler these prices are confirmed.
pub fn format_verified_prices(offers: &[FlightOffer], dictionaries: &Dictionaries) -> String {
    format_offers("## Verified Flight Prices", offers, dictionaries)
}

fn format_offers(header: &str, offers: &[FlightOffer], dictionaries: &Dictionaries) -> String {
    let mut out = Vec::new();
    out.push(format!("{}\n", header));

    for (i, offer) in offers.iter().enumerate().take(10) {
        let (total, currency) = offer.display_total();
        out.push(format!("### Option {}: {} {} (ID: {})", i + 1, total, currency, offer.id));

        for (j, itinerary) in offer.itineraries.iter().enumerate() {
            out.push(format_itinerary(itinerary, j, offer.itineraries.len(), dictionaries));
        }

        out.push("**Pricing**:".to_string());
        if let Some(base) = &offer.price.base {
            out.push(format!("- Base Fare: {} {}", base, currency));
        }
        out.push(format!("- Total (inc. taxes): {} {}", total, currency));

        if let Some(quantity) = offer.checked_bags() {
            out.push(format!("**Baggage**: Checked Bags: {} included", quantity));
        }
        let cabin = offer.cabin().unwrap_or("ECONOMY");
        out.push(format!("**Cabin**: {}", capitalize(cabin)));

        out.push("\n---\n".to_string());
    }

    out.join("\n")
}

fn format_itinerary(
    itinerary: &Itinerary,
    index: usize,
    itinerary_count: usize,
    dictionaries: &Dictionaries,
) -> String {
    let trip_type = if itinerary_count == 1 {
        "Flight"
    } else if index == 0 {
        "Outbound"
    } else {
        "Return"
    };

    let stops = itinerary.segments.len().saturating_sub(1);
    let stop_text = match stops {
        0 => "Nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{} stops", n),
    };
    let duration = itinerary.duration.as_deref().map(pretty_duration).unwrap_or_default();

    let mut lines = vec![format!("**{}**: {} | {}", trip_type, stop_text, duration)];

    for (k, segment) in itinerary.segments.iter().enumerate() {
        let carrier_code = segment.carrier_code.as_deref().unwrap_or("");
        let carrier_name = dictionaries.carrier_name(carrier_code);
        let number = segment.number.as_deref().unwrap_or("");
        lines.push(format!("**Flight**: {} {}{}", carrier_name, carrier_code, number));

        let mut dep = format!("**From**: {}", segment.departure.iata_code);
        if let Some(terminal) = &segment.departure.terminal {
            dep.push_str(&format!(" Terminal {}", terminal));
        }
        if let Some(at) = &segment.departure.at {
            dep.push_str(&format!(" at {}", format_datetime(at)));
        }
        lines.push(dep);

        let mut arr = format!("**To**: {}", segment.arrival.iata_code);
        if let Some(terminal) = &segment.arrival.terminal {
            arr.push_str(&format!(" Terminal {}", terminal));
        }
        if let Some(at) = &segment.arrival.at {
            arr.push_str(&format!(" at {}", format_datetime(at)));
        }
        lines.push(arr);

        if let Some(duration) = &segment.duration {
            lines.push(format!("**Duration**: {}", pretty_duration(duration)));
        }
        if let Some(aircraft) = &segment.aircraft {
            lines.push(format!("**Aircraft**: {}", dictionaries.aircraft_name(&aircraft.code)));
        }
        if k + 1 < itinerary.segments.len() {
            lines.push("*Connection*\n".to_string());
        }
    }

    lines.join("\n")
}

/// "PT7H25M" -> "7h 25m".
pub fn pretty_duration(iso: &str) -> String {
    iso.replace("PT", "").replace('H', "h ").replace('M', "m").trim().to_string()
}

/// ISO timestamp -> "Sun, Jun 01, 08:15"; unparseable input passes through.
pub fn format_datetime(timestamp: &str) -> String {
    NaiveDateTime::parse_from_str(timestamp.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.format("%a, %b %d, %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}
