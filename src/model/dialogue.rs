//! Dialogue transcript types.

use serde::{Deserialize, Serialize};

/// Who a dialogue turn is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// A user prompt
    User,
    /// Any other content, including assistant replies
    Content,
}

/// A contiguous run of transcript lines attributed to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    /// Turn role
    pub role: TurnRole,

    /// Accumulated text, continuation lines joined by a single space
    pub text: String,
}

impl DialogueTurn {
    /// Start a new turn.
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Merge a continuation line into this turn.
    pub fn append(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }

    /// Check if this is a user turn.
    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}

/// Metadata derived from the whole transcript text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// Candidate document title
    pub title: Option<String>,

    /// Distinct topical keywords in category order
    pub keywords: Vec<String>,
}

impl KeyInfo {
    /// Check if any keywords were found.
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}
