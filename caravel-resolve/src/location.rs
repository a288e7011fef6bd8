//! Free-text location resolution.
//!
//! Turns a phrase like "san fran", "Heathrow", or "fly out of JFK" into a
//! reference-table entry, walking a ladder of increasingly loose matches.

use regex::Regex;
use std::sync::LazyLock;

use crate::table::{entry_for_alias, entry_for_code, LocationEntry, ALIASES, LOCATIONS};

/// Fuzzy candidates scoring at or below this are discarded.
const FUZZY_THRESHOLD: f64 = 0.7;
/// A top fuzzy candidate above this is returned directly.
const FUZZY_DIRECT: f64 = 0.9;
/// Country listings are capped at this many candidates.
const COUNTRY_CAP: usize = 10;
/// Fuzzy disambiguation lists are capped at this many candidates.
const FUZZY_CAP: usize = 5;

static CODE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{3}\b").expect("Invalid code token regex"));

/// Result of resolving a free-text location phrase.
#[derive(Debug, PartialEq)]
pub enum LocationOutcome {
    Found(&'static LocationEntry),
    /// Multiple plausible entries; `omitted` counts matches beyond the cap.
    Ambiguous {
        candidates: Vec<&'static LocationEntry>,
        omitted: usize,
    },
    NotFound,
}

impl LocationOutcome {
    pub fn found(&self) -> Option<&'static LocationEntry> {
        match self {
            LocationOutcome::Found(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Resolve free text to a location entry.
///
/// Resolution order, first success wins: exact code, alias table, exact
/// city, name substring, country substring (capped), fuzzy match over alias
/// phrases, and finally a scan for any embedded 3-letter code token.
/// Pure function over the static reference data.
pub fn resolve_location(text: &str) -> LocationOutcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return LocationOutcome::NotFound;
    }
    let upper = trimmed.to_uppercase();
    let lower = trimmed.to_lowercase();

    // 1. Exact code.
    if let Some(entry) = entry_for_code(&upper) {
        return LocationOutcome::Found(entry);
    }

    // 2. Alias table.
    if let Some(entry) = entry_for_alias(&lower) {
        return LocationOutcome::Found(entry);
    }

    // 3. Exact city match.
    let city_matches: Vec<_> = LOCATIONS
        .iter()
        .filter(|e| e.city.eq_ignore_ascii_case(trimmed))
        .collect();
    match city_matches.len() {
        0 => {}
        1 => return LocationOutcome::Found(city_matches[0]),
        _ => {
            return LocationOutcome::Ambiguous { candidates: city_matches, omitted: 0 };
        }
    }

    // 4. Name substring match.
    let name_matches: Vec<_> = LOCATIONS
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&lower))
        .collect();
    match name_matches.len() {
        0 => {}
        1 => return LocationOutcome::Found(name_matches[0]),
        _ => {
            return LocationOutcome::Ambiguous { candidates: name_matches, omitted: 0 };
        }
    }

    // 5. Country substring match, capped with an omitted count.
    let country_matches: Vec<_> = LOCATIONS
        .iter()
        .filter(|e| e.country.to_lowercase().contains(&lower))
        .collect();
    if !country_matches.is_empty() {
        let omitted = country_matches.len().saturating_sub(COUNTRY_CAP);
        let candidates = country_matches.into_iter().take(COUNTRY_CAP).collect();
        return LocationOutcome::Ambiguous { candidates, omitted };
    }

    // 6. Fuzzy match over alias phrases.
    let mut scored: Vec<(f64, &'static LocationEntry)> = ALIASES
        .iter()
        .filter_map(|(phrase, code)| {
            let score = similarity(&lower, phrase);
            if score > FUZZY_THRESHOLD {
                entry_for_code(code).map(|entry| (score, entry))
            } else {
                None
            }
        })
        .collect();
    if !scored.is_empty() {
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        if scored.len() == 1 || scored[0].0 > FUZZY_DIRECT {
            return LocationOutcome::Found(scored[0].1);
        }
        // Several alias phrases can point at the same entry; keep the
        // best-scoring occurrence of each.
        let mut candidates: Vec<&'static LocationEntry> = Vec::new();
        for (_, entry) in scored {
            if !candidates.iter().any(|c| c.code == entry.code) {
                candidates.push(entry);
            }
            if candidates.len() == FUZZY_CAP {
                break;
            }
        }
        return LocationOutcome::Ambiguous { candidates, omitted: 0 };
    }

    // 7. Last resort: any embedded 3-letter token that is a known code.
    for token in CODE_TOKEN_RE.find_iter(&upper) {
        if let Some(entry) = entry_for_code(token.as_str()) {
            return LocationOutcome::Found(entry);
        }
    }

    LocationOutcome::NotFound
}

/// Similarity score in [0, 1] between two phrases.
///
/// Identical normalized strings score 1.0; one string contained in the other
/// scores `len(shorter)/len(longer)`; otherwise the score is
/// `2 * common / (len(a) + len(b))` where `common` counts characters of `a`
/// also present in `b`.
fn similarity(a: &str, b: &str) -> f64 {
    let a: String = a.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase();
    let b: String = b.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if b.contains(&a) {
        return a.chars().count() as f64 / b.chars().count() as f64;
    }
    if a.contains(&b) {
        return b.chars().count() as f64 / a.chars().count() as f64;
    }

    let common = a.chars().filter(|c| b.contains(*c)).count();
    let total = a.chars().count() + b.chars().count();
    (2 * common) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_code_any_case() {
        assert_eq!(resolve_location("JFK").found().unwrap().code, "JFK");
        assert_eq!(resolve_location("jfk").found().unwrap().code, "JFK");
        assert_eq!(resolve_location("  lhr  ").found().unwrap().code, "LHR");
    }

    #[test]
    fn test_alias_lookup() {
        assert_eq!(resolve_location("la").found().unwrap().code, "LAX");
        assert_eq!(resolve_location("SF").found().unwrap().code, "SFO");
        assert_eq!(resolve_location("washington d.c.").found().unwrap().code, "WAS");
    }

    #[test]
    fn test_alias_beats_city_search() {
        // "washington" is an alias for the WAS metro code, so the two
        // Washington airports never surface as an ambiguity.
        assert_eq!(resolve_location("Washington").found().unwrap().code, "WAS");
    }

    #[test]
    fn test_city_with_single_airport() {
        assert_eq!(resolve_location("Denver").found().unwrap().code, "DEN");
    }

    #[test]
    fn test_multi_airport_city_goes_through_metro_alias() {
        // Every multi-airport city carries an alias to its metro code, so a
        // plain city name lands on the metro entry instead of an ambiguity.
        assert_eq!(resolve_location("New York").found().unwrap().code, "NYC");
        assert_eq!(resolve_location("Newark").found().unwrap().code, "EWR");
    }

    #[test]
    fn test_name_substring() {
        assert_eq!(resolve_location("Heathrow").found().unwrap().code, "LHR");
        assert_eq!(resolve_location("changi").found().unwrap().code, "SIN");
    }

    #[test]
    fn test_name_substring_with_multiple_hits_is_ambiguous() {
        match resolve_location("intercontinental") {
            LocationOutcome::Found(e) => assert_eq!(e.code, "IAH"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        match resolve_location("international airport") {
            LocationOutcome::Ambiguous { candidates, omitted } => {
                assert!(candidates.len() > 1);
                assert_eq!(omitted, 0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_country_search_caps_at_ten_with_omitted_count() {
        match resolve_location("United States") {
            LocationOutcome::Ambiguous { candidates, omitted } => {
                assert_eq!(candidates.len(), 10);
                assert!(omitted > 0);
                assert!(candidates.iter().all(|e| e.country == "United States"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_country_search_small_country() {
        match resolve_location("Qatar") {
            LocationOutcome::Ambiguous { candidates, omitted } => {
                assert_eq!(candidates.len(), 1);
                assert_eq!(candidates[0].code, "DOH");
                assert_eq!(omitted, 0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_fuzzy_typo_resolves_directly() {
        // "chicgo" scores 12/13 against the "chicago" alias, above the
        // direct-match bar.
        assert_eq!(resolve_location("chicgo").found().unwrap().code, "CHI");
    }

    #[test]
    fn test_fuzzy_single_survivor_resolves_directly() {
        // "xanadu" shares enough characters with the "dubai" alias (8/11) to
        // clear the threshold, and nothing else does, so the lone candidate
        // is returned outright.
        assert_eq!(resolve_location("xanadu").found().unwrap().code, "DXB");
    }

    #[test]
    fn test_embedded_code_token() {
        assert_eq!(resolve_location("flying out of JFK please").found().unwrap().code, "JFK");
    }

    #[test]
    fn test_not_found() {
        assert_eq!(resolve_location("xyzzy"), LocationOutcome::NotFound);
        assert_eq!(resolve_location(""), LocationOutcome::NotFound);
        assert_eq!(resolve_location("   "), LocationOutcome::NotFound);
    }

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("paris", "paris"), 1.0);
        assert_eq!(similarity("Paris", "paris"), 1.0);
    }

    #[test]
    fn test_similarity_containment() {
        assert!((similarity("york", "new york") - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_common_characters() {
        // "chicgo" vs "chicago": all 6 input chars occur in the candidate.
        assert!((similarity("chicgo", "chicago") - 12.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_empty() {
        assert_eq!(similarity("", "paris"), 0.0);
    }
}
