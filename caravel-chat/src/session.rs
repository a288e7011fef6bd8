//! Caller-owned conversation state.

use std::path::PathBuf;
use uuid::Uuid;

use caravel_offer::{OfferBatch, SelectedOffer};

/// The conversation's stage in the search -> select -> book progression.
/// Strictly forward: once a stage is passed there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    AwaitingSearch,
    AwaitingSelection,
    AwaitingTravelerInfo,
    Completed,
}

/// Reference to the booking a session completed with.
#[derive(Debug, Clone)]
pub struct CompletedBooking {
    pub booking_id: String,
    pub pnr: String,
    pub receipt_path: Option<PathBuf>,
}

/// Per-conversation mutable state, owned exclusively by the caller driving
/// the turns. Created on first interaction, mutated in place across turns,
/// discarded when the caller's session ends.
#[derive(Debug)]
pub struct ConversationSession {
    pub id: Uuid,
    state: FlowState,
    batch: Option<OfferBatch>,
    selected: Option<SelectedOffer>,
    completed: Option<CompletedBooking>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: FlowState::AwaitingSearch,
            batch: None,
            selected: None,
            completed: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn batch(&self) -> Option<&OfferBatch> {
        self.batch.as_ref()
    }

    pub fn selected(&self) -> Option<&SelectedOffer> {
        self.selected.as_ref()
    }

    pub fn completed(&self) -> Option<&CompletedBooking> {
        self.completed.as_ref()
    }

    pub(crate) fn advance_to_selection(&mut self, batch: OfferBatch) {
        self.batch = Some(batch);
        self.state = FlowState::AwaitingSelection;
    }

    pub(crate) fn advance_to_traveler(&mut self, selected: SelectedOffer) {
        self.selected = Some(selected);
        self.state = FlowState::AwaitingTravelerInfo;
    }

    pub(crate) fn complete(&mut self, booking: CompletedBooking) {
        self.completed = Some(booking);
        self.state = FlowState::Completed;
    }

    pub(crate) fn set_receipt_path(&mut self, path: PathBuf) {
        if let Some(completed) = &mut self.completed {
            completed.receipt_path = Some(path);
        }
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}
