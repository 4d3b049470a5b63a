use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A round's topic prompt, shown to everyone.
pub type Theme = String;

/// A secret number handed to exactly one participant in a round.
pub type Card = u32;

/// Upper bound of the card range used by the game (`[1, 100]`).
pub const DEFAULT_CARD_MAX: Card = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Private-delivery address (a chat platform user id).
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub bot: bool,
}

impl Participant {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            bot: false,
        }
    }

    pub fn bot(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            bot: true,
            ..Self::new(user_id, display_name)
        }
    }
}

/// The theme that was announced for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum AnnouncedTheme {
    Drawn(Theme),
    /// The catalog was empty; the text is the fallback shown to the group.
    Fallback(String),
}

impl AnnouncedTheme {
    pub fn text(&self) -> &str {
        match self {
            AnnouncedTheme::Drawn(theme) => theme,
            AnnouncedTheme::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnnouncedTheme::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Delivered { card: Card },
    /// The deck ran out; the participant got a "no cards left" notice.
    CardsExhausted,
    /// `card` is `None` when the failed message was the exhausted notice.
    DeliveryFailed { card: Option<Card>, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantOutcome {
    pub user_id: String,
    pub display_name: String,
    #[serde(flatten)]
    pub outcome: DeliveryOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub theme: AnnouncedTheme,
    /// One entry per eligible participant, in roster order.
    pub outcomes: Vec<ParticipantOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
