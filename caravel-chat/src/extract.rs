//! Field extraction from free-text messages.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use caravel_core::traveler::{TravelerDraft, DEFAULT_GENDER};

static OPTION_AFTER_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:option|flight|number|select|choose|book)\s*(\d+)")
        .expect("Invalid option regex")
});

static ANY_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid number regex"));

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("Invalid ISO date regex"));

static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"day after tomorrow|tomorrow|today|next week|next month|(?:next|this)\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)",
    )
    .expect("Invalid relative date regex")
});

/// Extract origin and destination phrases from "from X to Y" text.
///
/// Returns the text between "from" and the following "to", and the first
/// token after that "to".
pub fn extract_route(text: &str) -> Option<(String, String)> {
    let lower = text.to_lowercase();
    let from_idx = lower.find("from")? + "from ".len();
    let tail = lower.get(from_idx..)?;
    let to_idx = tail.find("to").map(|i| i + from_idx)?;

    let origin = lower.get(from_idx..to_idx)?.trim().to_string();
    let destination = lower
        .get(to_idx + "to ".len()..)
        .unwrap_or("")
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string();

    if origin.is_empty() || destination.is_empty() {
        return None;
    }
    Some((origin, destination))
}

/// Pull the fragment of the message that looks like a date expression.
///
/// Tried in order: an explicit YYYY-MM-DD anywhere, the 20 characters after
/// "on ", then a relative keyword ("tomorrow", "next friday", ...).
pub fn find_date_expression(text: &str) -> Option<String> {
    let lower = text.to_lowercase();

    if let Some(m) = ISO_DATE_RE.find(&lower) {
        return Some(m.as_str().to_string());
    }

    if let Some(idx) = lower.find(" on ") {
        let start = idx + " on ".len();
        let fragment: String = lower[start..].chars().take(20).collect();
        let fragment = fragment.trim().to_string();
        if !fragment.is_empty() {
            return Some(fragment);
        }
    }

    RELATIVE_DATE_RE.find(&lower).map(|m| m.as_str().to_string())
}

/// Extract a 1-based option number.
///
/// Checks numbers following a selection keyword, then a message that is
/// nothing but a number, then any number anywhere.
pub fn extract_option_number(text: &str) -> Option<usize> {
    let lower = text.to_lowercase();

    if let Some(caps) = OPTION_AFTER_KEYWORD_RE.captures(&lower) {
        return caps[1].parse().ok();
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    ANY_NUMBER_RE.find(&lower).and_then(|m| m.as_str().parse().ok())
}

/// Extract traveler fields from comma- or newline-separated text.
///
/// The first part with at least two words is the name; an "@" part with a
/// dotted domain is the email; a YYYY-MM-DD match is the date of birth; the
/// first remaining part with digits is the phone; "female"/"male" keywords
/// set the gender.
pub fn extract_traveler(text: &str) -> TravelerDraft {
    let parts: Vec<&str> = if text.contains(',') {
        text.split(',').map(str::trim).filter(|p| !p.is_empty()).collect()
    } else {
        text.lines().map(str::trim).filter(|p| !p.is_empty()).collect()
    };

    let mut draft = TravelerDraft::default();

    if let Some(first) = parts.first() {
        let words: Vec<&str> = first.split_whitespace().collect();
        if words.len() >= 2 {
            draft.first_name = Some(words[0].to_string());
            draft.last_name = Some(words[1..].join(" "));
        }
    }

    for part in &parts {
        if draft.email.is_none() {
            if let Some((_, domain)) = part.split_once('@') {
                if domain.contains('.') {
                    draft.email = Some(part.to_string());
                }
            }
        }
    }

    for part in &parts {
        if let Some(m) = ISO_DATE_RE.find(part) {
            if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d") {
                draft.date_of_birth = Some(date);
                break;
            }
        }
    }

    for part in &parts {
        // A part that is the date of birth is not a phone number.
        if ISO_DATE_RE.is_match(part) {
            continue;
        }
        if part.chars().any(|c| c.is_ascii_digit()) {
            let phone: String = part
                .chars()
                .filter(|c| c.is_ascii_digit() || "+-() ".contains(*c))
                .collect();
            let phone = phone.trim().to_string();
            if !phone.is_empty() {
                draft.phone = Some(phone);
                break;
            }
        }
    }

    for part in &parts {
        let lower = part.to_lowercase();
        if lower.contains("female") {
            draft.gender = Some("FEMALE".to_string());
            break;
        }
        if lower.contains("male") {
            draft.gender = Some("MALE".to_string());
            break;
        }
    }
    // A bare "gender" mention without a value falls back to the
    // conventional default; the value itself is never validated.
    if draft.gender.is_none() && text.to_lowercase().contains("gender") {
        draft.gender = Some(DEFAULT_GENDER.to_string());
    }

    draft
}
