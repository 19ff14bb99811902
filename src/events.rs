// Append-only narration of everything that changes game state
//
// The presentation layer polls the log (see `EventLog::since`) to show
// messages; tests use the event kinds to check which rules fired.

use log::debug;
use serde::{Deserialize, Serialize};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameStarted,
    GameReset,
    TurnStarted,
    TurnSkipped,
    Prediction,
    DiceRolled,
    CorrectPrediction,
    RewardChosen,
    /// First correct opponent: mover loses their next turn
    OpponentSkip,
    /// Second correct opponent: mover is pushed back by the roll
    OpponentPushBack,
    /// Third and later correct opponents: token only
    OpponentToken,
    Moved,
    Overshoot,
    LadderClimbed,
    SnakeEncountered,
    SnakeNeutralized,
    SlidDown,
    BonusRoll,
    Won,
    /// Turn abandoned after an internal error
    Recovered,
}

/// Single narrated state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub seq: u64,
    pub kind: EventKind,
    /// Player the event is about, if any
    pub player: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its sequence number
    pub fn push(&mut self, kind: EventKind, player: Option<usize>, message: impl Into<String>) -> u64 {
        let message = message.into();
        debug!("[{:?}] {}", kind, message);

        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(GameEvent {
            seq,
            kind,
            player,
            message,
        });
        seq
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events with a sequence number of at least `seq`
    pub fn since(&self, seq: u64) -> &[GameEvent] {
        let start = self.events.partition_point(|e| e.seq < seq);
        &self.events[start..]
    }

    /// Sequence number the next event will get
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all events; sequence numbers keep increasing
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
