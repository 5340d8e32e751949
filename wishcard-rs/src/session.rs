//! Share-session lifecycle.
//!
//! One session tracks one share surface. Each share attempt gets a
//! generation token; a render that finishes after the surface was closed
//! (or after a newer attempt started) carries a stale token and its result
//! is discarded.

use crate::card::CardImage;

/// Where the share surface currently is.
#[derive(Debug, Clone, Default)]
pub enum ShareState {
    /// No share in progress.
    #[default]
    Idle,
    /// A card is being generated.
    Loading,
    /// The finished card, ready to preview or download.
    Ready(CardImage),
}

/// State machine for the share surface.
#[derive(Debug, Default)]
pub struct ShareSession {
    state: ShareState,
    generation: u64,
}

impl ShareSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &ShareState {
        &self.state
    }

    /// Start a share attempt. Returns the token the eventual
    /// [`complete`](Self::complete) call must present.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = ShareState::Loading;
        self.generation
    }

    /// Deliver a finished card. Returns false (and drops the card) when the
    /// token is stale or the session is no longer loading.
    pub fn complete(&mut self, token: u64, card: CardImage) -> bool {
        if token != self.generation || !matches!(self.state, ShareState::Loading) {
            log::debug!("Discarding stale card for share generation {token}");
            return false;
        }
        self.state = ShareState::Ready(card);
        true
    }

    /// Close the share surface, invalidating any in-flight render.
    pub fn close(&mut self) {
        self.generation += 1;
        self.state = ShareState::Idle;
    }

    /// The finished card, if one is ready.
    pub fn ready_card(&self) -> Option<&CardImage> {
        match &self.state {
            ShareState::Ready(card) => Some(card),
            _ => None,
        }
    }
}
