//! The turn engine: executes one conversational turn against the session.
//!
//! Every (state, intent) pair has a defined action. Unsatisfied heuristics
//! re-prompt without advancing; state only advances on the recognized
//! success signal of the current stage.

use std::sync::Arc;

use chrono::Local;

use caravel_booking::{BookingError, BookingSynthesizer, IdFactory};
use caravel_core::models::SearchRequest;
use caravel_core::repository::BookingRepository;
use caravel_core::supplier::{FlightSupplier, ReceiptRenderer};
use caravel_offer::{OfferOrchestrator, SearchOutcome};
use caravel_resolve::{resolve_date, resolve_location, LocationOutcome};

use crate::classify::{classify, TurnIntent};
use crate::error::ChatError;
use crate::extract::{extract_option_number, extract_route, extract_traveler, find_date_expression};
use crate::session::{CompletedBooking, ConversationSession, FlowState};

const DEFAULT_MAX_MESSAGE_LENGTH: usize = 2000;
const DEFAULT_MAX_RESULTS: u32 = 10;

/// Drives conversations: holds the immutable component stack while each
/// caller owns its session exclusively.
pub struct TurnEngine {
    orchestrator: OfferOrchestrator,
    synthesizer: BookingSynthesizer,
    repository: Arc<dyn BookingRepository>,
    renderer: Arc<dyn ReceiptRenderer>,
    max_message_length: usize,
    max_results: u32,
}

impl TurnEngine {
    pub fn new(
        supplier: Arc<dyn FlightSupplier>,
        repository: Arc<dyn BookingRepository>,
        renderer: Arc<dyn ReceiptRenderer>,
    ) -> Self {
        Self::with_id_factory(supplier, repository, renderer, IdFactory::from_entropy())
    }

    /// Construct with a seeded identifier factory for deterministic tests.
    pub fn with_id_factory(
        supplier: Arc<dyn FlightSupplier>,
        repository: Arc<dyn BookingRepository>,
        renderer: Arc<dyn ReceiptRenderer>,
        ids: IdFactory,
    ) -> Self {
        Self {
            orchestrator: OfferOrchestrator::new(supplier),
            synthesizer: BookingSynthesizer::with_ids(repository.clone(), renderer.clone(), ids),
            repository,
            renderer,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn max_message_length(mut self, limit: usize) -> Self {
        self.max_message_length = limit;
        self
    }

    pub fn max_results(mut self, limit: u32) -> Self {
        self.max_results = limit;
        self
    }

    /// Handle one turn: classify, act, and reply.
    ///
    /// Errors only on caller-contract violations (empty or oversized
    /// messages); everything else, including upstream failures, becomes a
    /// formatted reply.
    pub async fn handle(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Result<String, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if trimmed.len() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }

        let intent = classify(session.state(), trimmed);
        tracing::debug!(session = %session.id, state = ?session.state(), intent = ?intent, "classified turn");

        let reply = match intent {
            TurnIntent::Connectivity => self.orchestrator.test_connection().await,
            TurnIntent::SearchRequest => self.handle_search(session, trimmed).await,
            TurnIntent::Selection => self.handle_selection(session, trimmed),
            TurnIntent::TravelerInfo => self.handle_booking(session, trimmed).await,
            TurnIntent::ShowReference => self.show_reference(session).await,
            TurnIntent::ShowReceipt => self.show_receipt(session).await,
            TurnIntent::Ack => {
                "Your booking is confirmed. Is there anything else you would like to know about your booking?".to_string()
            }
            TurnIntent::Unrecognized => reprompt(session.state()),
        };
        Ok(reply)
    }

    async fn handle_search(&self, session: &mut ConversationSession, text: &str) -> String {
        let Some((origin_phrase, destination_phrase)) = extract_route(text) else {
            return "I need both origin and destination to search for flights. Please provide details like 'flights from NYC to LAX'.".to_string();
        };

        let origin = match resolve_endpoint("departure city", &origin_phrase) {
            Ok(code) => code,
            Err(reply) => return reply,
        };
        let destination = match resolve_endpoint("destination", &destination_phrase) {
            Ok(code) => code,
            Err(reply) => return reply,
        };

        let Some(expression) = find_date_expression(text) else {
            return "Please provide a specific departure date for your flight search.".to_string();
        };
        let anchor = Local::now().date_naive();
        let resolved = match resolve_date(&expression, anchor) {
            Ok(resolved) => resolved,
            Err(e) => return e.to_string(),
        };
        if resolved.offset_days < 0 {
            return format!("{} Please choose a future travel date.", resolved.describe());
        }

        let mut request = SearchRequest::new(origin, destination, resolved.date);
        request.max_results = Some(self.max_results);

        match self.orchestrator.search(request).await {
            Err(e) => e.to_string(),
            Ok(outcome @ SearchOutcome::NoFlights { .. }) => outcome.display(),
            Ok(SearchOutcome::Found { batch, display }) => {
                session.advance_to_selection(batch);
                format!(
                    "{}\n\n{}\nReply with the option number you'd like to select.",
                    resolved.describe(),
                    display
                )
            }
        }
    }

    fn handle_selection(&self, session: &mut ConversationSession, text: &str) -> String {
        let Some(number) = extract_option_number(text) else {
            return "Please specify which flight option you'd like to select (e.g., 'option 1').".to_string();
        };
        let Some(batch) = session.batch() else {
            return "No flight options available. Please search for flights first.".to_string();
        };
        match batch.select(number) {
            Err(e) => e.to_string(),
            Ok(selected) => {
                let confirmation = selected.confirmation();
                session.advance_to_traveler(selected);
                confirmation
            }
        }
    }

    async fn handle_booking(&self, session: &mut ConversationSession, text: &str) -> String {
        let Some(selected) = session.selected().cloned() else {
            return "No flight has been selected. Please select a flight option first.".to_string();
        };
        let draft = extract_traveler(text);

        match self.synthesizer.book(&selected, draft).await {
            Err(e @ BookingError::MissingTravelerFields(_)) => {
                format!("{}. Please provide complete details.", e)
            }
            Err(e) => format!("Error creating booking: {}", e),
            Ok(outcome) => {
                session.complete(CompletedBooking {
                    booking_id: outcome.record.booking_id.clone(),
                    pnr: outcome.record.pnr.clone(),
                    receipt_path: outcome.record.receipt_path.clone(),
                });
                outcome.confirmation
            }
        }
    }

    async fn show_reference(&self, session: &ConversationSession) -> String {
        let Some(completed) = session.completed() else {
            return "No booking information available.".to_string();
        };
        match self.repository.get(&completed.booking_id).await {
            Ok(Some(record)) => {
                let (total, currency) = record.offer.display_total();
                format!(
                    "Booking Reference: {}\nPNR: {}\nE-Ticket Number: {}\nTotal Price: {} {}",
                    record.booking_id, record.pnr, record.eticket_number, total, currency
                )
            }
            Ok(None) => "No booking information available.".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read booking record");
                "Could not read your booking record right now. Please try again.".to_string()
            }
        }
    }

    async fn show_receipt(&self, session: &mut ConversationSession) -> String {
        let Some(completed) = session.completed().cloned() else {
            return "No booking information available.".to_string();
        };

        if let Some(path) = &completed.receipt_path {
            return format!("Your e-ticket is available at: {}", path.display());
        }

        // Not rendered at booking time; try again on demand.
        match self.repository.get(&completed.booking_id).await {
            Ok(Some(record)) => match self.renderer.render(&record).await {
                Ok(path) => {
                    if let Err(e) = self.repository.attach_receipt(&record.booking_id, &path).await
                    {
                        tracing::warn!(error = %e, "could not attach receipt path to stored record");
                    }
                    session.set_receipt_path(path.clone());
                    format!("Your e-ticket has been generated and saved to: {}", path.display())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "on-demand receipt rendering failed");
                    "Could not generate the e-ticket receipt right now. Your booking is still confirmed.".to_string()
                }
            },
            _ => "No booking information available.".to_string(),
        }
    }
}

/// Resolve one endpoint phrase to a location code, or produce the reply that
/// asks the traveler to disambiguate or rephrase.
fn resolve_endpoint(role: &str, phrase: &str) -> Result<String, String> {
    match resolve_location(phrase) {
        LocationOutcome::Found(entry) => Ok(entry.code.to_string()),
        LocationOutcome::Ambiguous { candidates, omitted } => {
            let mut reply = format!("Multiple airports found for '{}':\n\n", phrase);
            for entry in &candidates {
                reply.push_str(&format!(
                    "- {}: {}, {}, {}\n",
                    entry.code, entry.name, entry.city, entry.country
                ));
            }
            if omitted > 0 {
                reply.push_str(&format!("\n...and {} more airports.\n", omitted));
            }
            reply.push_str(&format!("\nPlease restate your {} using one of the codes above.", role));
            Err(reply)
        }
        LocationOutcome::NotFound => Err(format!(
            "No airport information found for '{}'. Please try a different search term, a city name, or a valid 3-letter IATA airport code.",
            phrase
        )),
    }
}

/// What to ask for when the message does not satisfy the current state.
fn reprompt(state: FlowState) -> String {
    match state {
        FlowState::AwaitingSearch => {
            "Please provide your travel details including departure city, destination, and travel date.".to_string()
        }
        FlowState::AwaitingSelection => {
            "Please select one of the flight options by number.".to_string()
        }
        FlowState::AwaitingTravelerInfo => {
            "Please provide traveler information: full name, date of birth (YYYY-MM-DD), email, phone, and gender.".to_string()
        }
        FlowState::Completed => {
            "Your booking is confirmed. Is there anything else you would like to know about your booking?".to_string()
        }
    }
}
