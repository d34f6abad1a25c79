//! Outbound notifications.
//!
//! The orchestrator publishes a `GameEvent` after every state change.
//! Presentation either drains the `EventLog` outbox each frame or registers
//! an `EventListener` to be called synchronously.

use serde::{Deserialize, Serialize};

use crate::board::{LinePattern, Mark};
use crate::cards::Card;
use crate::combat::Score;
use crate::core::Side;

/// Semantic color of a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Neutral,
    Positive,
    Negative,
}

/// Status line shown to the human, as a message key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "key")]
pub enum StatusMessage {
    YourTurn,
    PlayCard,
    EndTurnPrompt,
    OpponentThinking,
    PlayerCombo { lines: usize, damage: i32 },
    OpponentCombo { lines: usize, damage: i32 },
    Tie,
    Victory,
    Defeat,
}

impl StatusMessage {
    /// The tone this message is shown in.
    #[must_use]
    pub fn tone(self) -> StatusTone {
        match self {
            StatusMessage::PlayerCombo { .. } | StatusMessage::Victory => StatusTone::Positive,
            StatusMessage::OpponentCombo { .. } | StatusMessage::Defeat => StatusTone::Negative,
            _ => StatusTone::Neutral,
        }
    }
}

/// A state change presentation may react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum GameEvent {
    CellFilled { index: usize, mark: Mark },
    LinesCompleted { lines: Vec<LinePattern>, mark: Mark },
    LinesCleared { cells: Vec<usize> },
    DamageApplied { target: Side, amount: i32 },
    HandChanged { side: Side, hand: Vec<Card> },
    ScoreChanged { score: Score },
    StatusChanged { message: StatusMessage, tone: StatusTone },
    GameOver { winner: Side },
    TieDetected,
    BoardReset,
}

impl GameEvent {
    /// Status event with the message's own tone.
    #[must_use]
    pub fn status(message: StatusMessage) -> Self {
        GameEvent::StatusChanged {
            message,
            tone: message.tone(),
        }
    }
}

/// Receives every event as it is published.
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventListener for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Event outbox plus synchronous listeners.
#[derive(Default)]
pub struct EventLog {
    pending: Vec<GameEvent>,
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener called for every later event.
    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Notify listeners and queue the event for draining.
    pub fn publish(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
        self.pending.push(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Queued events, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("pending", &self.pending.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
