//! Conversation memory.
//!
//! Keeps the ordered log of turns for one conversation and serves the
//! rolling window of recent turns that accompanies each new request.

use tabletalk_core::{ConversationTurn, Role};

// =============================================================================
// ConversationMemory
// =============================================================================

/// Ordered log of conversation turns, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
    /// Hard cap on stored turns; oldest turns are dropped beyond it.
    max_turns: Option<usize>,
}

impl ConversationMemory {
    /// Create an empty, unbounded memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty memory that keeps at most `max_turns` turns.
    pub fn with_max_turns(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns: Some(max_turns),
        }
    }

    /// Append a turn.
    pub fn add(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);

        // Trim to capacity
        if let Some(max) = self.max_turns {
            if self.turns.len() > max {
                let excess = self.turns.len() - max;
                self.turns.drain(..excess);
            }
        }
    }

    /// Append a user utterance.
    pub fn add_user(&mut self, content: impl Into<String>) {
        self.add(ConversationTurn::new(Role::User, content));
    }

    /// Append an assistant utterance.
    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.add(ConversationTurn::new(Role::Assistant, content));
    }

    /// The last `n` turns, oldest first. Shorter if fewer are stored.
    pub fn window(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// The last `n` turns rendered one per line as `Role: content`.
    pub fn render(&self, n: usize) -> String {
        render_turns(self.window(n))
    }

    /// Drop every stored turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Every stored turn, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }
}

/// Render turns one per line as `Role: content`.
pub fn render_turns(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Tests
// =============================================================================
