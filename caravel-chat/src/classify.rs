//! Per-state message classification.
//!
//! Keyword/regex heuristics decide whether the current message satisfies the
//! current state's requirements. Classification is total: every (state,
//! message) pair yields an intent, and an unsatisfied heuristic classifies
//! as `Unrecognized` so the engine can re-prompt without advancing.

use crate::session::FlowState;

/// Direct commands that bypass the state machine and probe connectivity.
static CONNECTIVITY_COMMANDS: &[&str] = &["debug", "test connection", "check api"];

static FLIGHT_TERMS: &[&str] = &["flight", "travel", "trip", "book"];
static DATE_TERMS: &[&str] = &["on", "date", "depart", "leave", "return"];
static SELECTION_TERMS: &[&str] = &["select", "choose", "book", "option", "flight"];
static GENDER_TERMS: &[&str] = &["male", "female", "gender"];
static DOB_TERMS: &[&str] = &["birth", "dob", "born"];

static REFERENCE_TERMS: &[&str] = &["pnr", "reference", "details", "confirmation"];
static RECEIPT_TERMS: &[&str] = &["pdf", "document", "ticket", "receipt"];

/// What the engine should do with the current message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnIntent {
    /// "debug" / "test connection": report supplier connectivity.
    Connectivity,
    /// Message looks like a complete flight-search request.
    SearchRequest,
    /// Message looks like an option selection.
    Selection,
    /// Message looks like it carries traveler details.
    TravelerInfo,
    /// Post-booking: show the booking reference / PNR.
    ShowReference,
    /// Post-booking: show or generate the receipt artifact.
    ShowReceipt,
    /// Post-booking: anything else gets a confirmation acknowledgment.
    Ack,
    /// The message does not satisfy the current state's heuristic.
    Unrecognized,
}

/// Classify a message against the current flow state.
pub fn classify(state: FlowState, text: &str) -> TurnIntent {
    let lower = text.trim().to_lowercase();

    if CONNECTIVITY_COMMANDS.contains(&lower.as_str()) {
        return TurnIntent::Connectivity;
    }

    match state {
        FlowState::AwaitingSearch => {
            if looks_like_search(&lower) {
                TurnIntent::SearchRequest
            } else {
                TurnIntent::Unrecognized
            }
        }
        FlowState::AwaitingSelection => {
            if looks_like_selection(&lower) {
                TurnIntent::Selection
            } else {
                TurnIntent::Unrecognized
            }
        }
        FlowState::AwaitingTravelerInfo => {
            if looks_like_traveler_info(text) {
                TurnIntent::TravelerInfo
            } else {
                TurnIntent::Unrecognized
            }
        }
        FlowState::Completed => {
            if REFERENCE_TERMS.iter().any(|t| lower.contains(t)) {
                TurnIntent::ShowReference
            } else if RECEIPT_TERMS.iter().any(|t| lower.contains(t)) {
                TurnIntent::ShowReceipt
            } else {
                TurnIntent::Ack
            }
        }
    }
}

/// A search request either names both endpoints ("from ... to ...") or talks
/// about flights together with a date.
fn looks_like_search(lower: &str) -> bool {
    let has_from_to = lower.contains("from") && lower.contains("to");
    let has_flight_terms = FLIGHT_TERMS.iter().any(|t| lower.contains(t));
    let has_date_terms = DATE_TERMS.iter().any(|t| lower.contains(t));
    has_from_to || (has_flight_terms && has_date_terms)
}

/// A selection either uses a selection word or carries a digit.
fn looks_like_selection(lower: &str) -> bool {
    SELECTION_TERMS.iter().any(|t| lower.contains(t)) || lower.chars().any(|c| c.is_ascii_digit())
}

/// Traveler info needs a plausible name plus either an email address or a
/// gender/date-of-birth indicator.
fn looks_like_traveler_info(text: &str) -> bool {
    let lower = text.to_lowercase();

    let has_email = match lower.split_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    };
    let has_name = text.split_whitespace().count() >= 2;
    let has_gender = GENDER_TERMS.iter().any(|t| lower.contains(t));
    let has_dob =
        text.contains('-') || text.contains('/') || DOB_TERMS.iter().any(|t| lower.contains(t));

    (has_email && has_name) || (has_name && (has_gender || has_dob))
}
