//! Carrier identification for ticket numbering and receipt labeling.

use caravel_core::models::FlightOffer;

/// Full airline names mapped to their 2-letter codes.
static AIRLINE_CODES: &[(&str, &str)] = &[
    ("ALASKA AIRLINES", "AS"),
    ("AMERICAN AIRLINES", "AA"),
    ("DELTA AIR LINES", "DL"),
    ("UNITED AIRLINES", "UA"),
    ("SOUTHWEST AIRLINES", "WN"),
    ("JETBLUE AIRWAYS", "B6"),
    ("FRONTIER AIRLINES", "F9"),
    ("SPIRIT AIRLINES", "NK"),
    ("LUFTHANSA", "LH"),
    ("BRITISH AIRWAYS", "BA"),
    ("AIR FRANCE", "AF"),
    ("KLM", "KL"),
];

/// 3-digit ticketing prefixes by carrier code.
static ETICKET_PREFIXES: &[(&str, &str)] = &[
    ("AS", "027"),
    ("AA", "001"),
    ("DL", "006"),
    ("UA", "016"),
    ("WN", "526"),
    ("B6", "279"),
    ("LH", "220"),
    ("BA", "125"),
];

/// Display name and service phone line per carrier code, for receipts.
static AIRLINE_INFO: &[(&str, &str, &str)] = &[
    ("AS", "Alaska Airlines", "1-800-252-7522"),
    ("AA", "American Airlines", "1-800-433-7300"),
    ("DL", "Delta Air Lines", "1-800-221-1212"),
    ("UA", "United Airlines", "1-800-864-8331"),
    ("WN", "Southwest Airlines", "1-800-435-9792"),
    ("B6", "JetBlue Airways", "1-800-538-2583"),
    ("LH", "Lufthansa", "1-800-645-3880"),
    ("BA", "British Airways", "1-800-247-9297"),
];

/// Carrier used when nothing on the offer identifies one.
pub const FALLBACK_CARRIER: &str = "AS";

/// Extract the primary carrier code from an offer.
///
/// Precedence: the explicit carrier label (full-name table, then partial
/// containment, then a literal 2-letter code, then a "2 letters + digits"
/// flight-number shape), then the first itinerary segment carrying a code,
/// then the first validating airline, then the fallback carrier.
pub fn extract_carrier_code(offer: &FlightOffer) -> String {
    if let Some(carrier) = &offer.carrier {
        let upper = carrier.trim().to_uppercase();

        if let Some((_, code)) = AIRLINE_CODES.iter().find(|(name, _)| *name == upper) {
            return (*code).to_string();
        }
        if let Some((_, code)) = AIRLINE_CODES
            .iter()
            .find(|(name, _)| upper.contains(name) || name.contains(upper.as_str()))
        {
            return (*code).to_string();
        }
        if upper.len() == 2 && upper.chars().all(|c| c.is_ascii_alphabetic()) {
            return upper;
        }
        if upper.len() > 2 && upper.is_char_boundary(2) {
            let (head, tail) = upper.split_at(2);
            if head.chars().all(|c| c.is_ascii_alphabetic())
                && tail.chars().all(|c| c.is_ascii_digit())
            {
                return head.to_string();
            }
        }
    }

    for itinerary in &offer.itineraries {
        for segment in &itinerary.segments {
            if let Some(code) = &segment.carrier_code {
                return code.clone();
            }
        }
    }

    if let Some(code) = offer.validating_airline_codes.first() {
        return code.clone();
    }

    FALLBACK_CARRIER.to_string()
}

/// Ticketing prefix for a carrier code, "000" when unknown.
pub fn eticket_prefix(carrier_code: &str) -> &'static str {
    ETICKET_PREFIXES
        .iter()
        .find(|(code, _)| *code == carrier_code)
        .map(|(_, prefix)| *prefix)
        .unwrap_or("000")
}

/// Display name and contact line for a carrier code. Unknown codes fall back
/// to the offer's explicit carrier label or a generic "<code> Airlines".
pub fn airline_display(carrier_code: &str, explicit_carrier: Option<&str>) -> (String, String) {
    if let Some((_, name, phone)) = AIRLINE_INFO.iter().find(|(code, _, _)| *code == carrier_code) {
        return ((*name).to_string(), (*phone).to_string());
    }
    let name = explicit_carrier
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} Airlines", carrier_code));
    (name, "Please check airline website for contact information".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caravel_core::models::{Itinerary, OfferPrice, Segment, SegmentPoint};

    fn bare_offer() -> FlightOffer {
        FlightOffer {
            id: "1".into(),
            carrier: None,
            price: OfferPrice {
                currency: "USD".into(),
                total: None,
                grand_total: Some("450.00".into()),
                base: None,
            },
            itineraries: vec![],
            traveler_pricings: vec![],
            validating_airline_codes: vec![],
        }
    }

    fn offer_with_carrier(label: &str) -> FlightOffer {
        FlightOffer { carrier: Some(label.into()), ..bare_offer() }
    }

    #[test]
    fn test_full_name_exact() {
        assert_eq!(extract_carrier_code(&offer_with_carrier("Delta Air Lines")), "DL");
        assert_eq!(extract_carrier_code(&offer_with_carrier("LUFTHANSA")), "LH");
    }

    #[test]
    fn test_partial_name_containment() {
        assert_eq!(extract_carrier_code(&offer_with_carrier("Delta Air Lines Inc.")), "DL");
        assert_eq!(extract_carrier_code(&offer_with_carrier("Jetblue")), "B6");
    }

    #[test]
    fn test_literal_two_letter_code() {
        assert_eq!(extract_carrier_code(&offer_with_carrier("ba")), "BA");
    }

    #[test]
    fn test_flight_number_shape() {
        assert_eq!(extract_carrier_code(&offer_with_carrier("AS435")), "AS");
    }

    #[test]
    fn test_segment_scan() {
        let mut offer = bare_offer();
        offer.itineraries = vec![Itinerary {
            duration: None,
            segments: vec![Segment {
                carrier_code: Some("UA".into()),
                number: None,
                departure: SegmentPoint::default(),
                arrival: SegmentPoint::default(),
                aircraft: None,
                duration: None,
            }],
        }];
        assert_eq!(extract_carrier_code(&offer), "UA");
    }

    #[test]
    fn test_validating_airline() {
        let mut offer = bare_offer();
        offer.validating_airline_codes = vec!["AF".into(), "KL".into()];
        assert_eq!(extract_carrier_code(&offer), "AF");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(extract_carrier_code(&bare_offer()), "AS");
    }

    #[test]
    fn test_eticket_prefixes() {
        assert_eq!(eticket_prefix("DL"), "006");
        assert_eq!(eticket_prefix("AS"), "027");
        assert_eq!(eticket_prefix("XX"), "000");
    }

    #[test]
    fn test_airline_display_known() {
        let (name, phone) = airline_display("BA", None);
        assert_eq!(name, "British Airways");
        assert_eq!(phone, "1-800-247-9297");
    }

    #[test]
    fn test_airline_display_unknown_uses_label() {
        let (name, phone) = airline_display("ZZ", Some("Zeta Air"));
        assert_eq!(name, "Zeta Air");
        assert!(phone.contains("airline website"));

        let (name, _) = airline_display("ZZ", None);
        assert_eq!(name, "ZZ Airlines");
    }
}
