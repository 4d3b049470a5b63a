use crate::domain::model::Card;
use serde::{Deserialize, Serialize};

/// User-facing texts for a round. `{theme}` and `{card}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub theme_announcement: String,
    pub theme_fallback: String,
    pub card: String,
    pub cards_exhausted: String,
    pub cards_dealt: String,
    pub delivery_failures_header: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            theme_announcement: "**Theme:** {theme}".to_string(),
            theme_fallback: "Could not load a theme. Please agree on one together.".to_string(),
            card: "Your number card is **{card}**.".to_string(),
            cards_exhausted: "Sorry, we have run out of number cards.".to_string(),
            cards_dealt: "Number cards have been dealt.".to_string(),
            delivery_failures_header: "Failed to send a DM to the following users:".to_string(),
        }
    }
}

impl Messages {
    pub fn theme(&self, theme: &str) -> String {
        self.theme_announcement.replace("{theme}", theme)
    }

    pub fn card(&self, card: Card) -> String {
        self.card.replace("{card}", &card.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_substitute_placeholders() {
        let messages = Messages::default();
        assert_eq!(messages.theme("宇宙"), "**Theme:** 宇宙");
        assert_eq!(messages.card(42), "Your number card is **42**.");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let messages: Messages =
            toml::from_str("card = \"あなたのナンバーカードは **{card}** です。\"").unwrap();
        assert_eq!(messages.card(7), "あなたのナンバーカードは **7** です。");
        assert_eq!(messages.cards_dealt, Messages::default().cards_dealt);
    }
}
