use crate::core::card_deck::CardDeck;
use crate::core::messages::Messages;
use crate::core::theme_catalog::ThemeCatalog;
use crate::domain::model::{
    AnnouncedTheme, Card, DeliveryOutcome, Participant, ParticipantOutcome, RoundReport,
    DEFAULT_CARD_MAX,
};
use crate::domain::ports::{DeliveryChannel, GroupAnnouncer};
use crate::utils::error::{DealerError, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::Instrument;

/// Runs game rounds: theme announcement, unique card per participant,
/// private delivery and the final report.
///
/// Each call to [`start_round`](Self::start_round) builds its own deck, so
/// concurrent rounds on one dispatcher share nothing mutable. Must be called
/// from within a tokio runtime.
pub struct RoundDispatcher<D: DeliveryChannel, A: GroupAnnouncer> {
    catalog: Arc<ThemeCatalog>,
    delivery: Arc<D>,
    announcer: Arc<A>,
    messages: Messages,
    card_max: Card,
}

impl<D, A> RoundDispatcher<D, A>
where
    D: DeliveryChannel + 'static,
    A: GroupAnnouncer,
{
    pub fn new(catalog: Arc<ThemeCatalog>, delivery: Arc<D>, announcer: Arc<A>) -> Self {
        Self {
            catalog,
            delivery,
            announcer,
            messages: Messages::default(),
            card_max: DEFAULT_CARD_MAX,
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_card_max(mut self, card_max: Card) -> Self {
        self.card_max = card_max;
        self
    }

    pub fn card_max(&self) -> Card {
        self.card_max
    }

    /// Bot members are dropped first; if nobody is left the round fails with
    /// [`DealerError::NoEligibleParticipants`] before anything is announced or drawn.
    pub async fn start_round(&self, roster: &[Participant]) -> Result<RoundReport> {
        let eligible: Vec<Participant> = roster.iter().filter(|p| !p.bot).cloned().collect();
        if eligible.is_empty() {
            tracing::warn!(
                "❌ No eligible participants ({} members, all bots or none)",
                roster.len()
            );
            return Err(DealerError::NoEligibleParticipants);
        }

        let span = tracing::info_span!("round", participants = eligible.len());
        self.run_round(eligible).instrument(span).await
    }

    async fn run_round(&self, roster: Vec<Participant>) -> Result<RoundReport> {
        let started_at = Utc::now();
        tracing::info!("🎲 Starting round at {}", started_at.to_rfc3339());

        let theme = match self.catalog.pick_theme() {
            Some(theme) => AnnouncedTheme::Drawn(theme.clone()),
            None => {
                tracing::warn!("⚠️ Theme catalog is empty, announcing fallback");
                AnnouncedTheme::Fallback(self.messages.theme_fallback.clone())
            }
        };
        self.announce(&self.messages.theme(theme.text())).await;

        let outcomes = self.deal(&roster).await;

        self.announce(&self.messages.cards_dealt).await;

        let report = RoundReport {
            theme,
            outcomes,
            started_at,
            finished_at: Utc::now(),
        };

        if let Some(failures) =
            report.failure_announcement(&self.messages.delivery_failures_header)
        {
            tracing::warn!("⚠️ {} deliveries failed", report.failed_count());
            self.announce(&failures).await;
        }

        tracing::info!("✅ {}", report.summary());
        Ok(report)
    }

    /// Draws in roster order, then fans the deliveries out and joins all of them.
    ///
    /// Each delivery runs as its own detached task, so dropping the round
    /// future does not cancel sends that are already in flight.
    async fn deal(&self, roster: &[Participant]) -> Vec<ParticipantOutcome> {
        let mut deck = CardDeck::new(self.card_max);
        let mut deliveries = Vec::with_capacity(roster.len());

        for participant in roster {
            let card = deck.draw();
            let message = match card {
                Some(card) => self.messages.card(card),
                None => {
                    tracing::warn!(
                        "⚠️ Deck exhausted, sending notice to {}",
                        participant.display_name
                    );
                    self.messages.cards_exhausted.clone()
                }
            };

            let delivery = Arc::clone(&self.delivery);
            let recipient = participant.clone();
            let handle = tokio::spawn(async move {
                delivery.send_private(&recipient, &message).await
            });
            deliveries.push((card, handle));
        }

        let mut outcomes = Vec::with_capacity(roster.len());
        for (participant, (card, handle)) in roster.iter().zip(deliveries) {
            let failure = match handle.await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(join_error) => Some(format!("delivery task failed: {}", join_error)),
            };

            let outcome = match (failure, card) {
                (None, Some(card)) => {
                    tracing::debug!("📨 Delivered card to {}", participant.display_name);
                    DeliveryOutcome::Delivered { card }
                }
                (None, None) => DeliveryOutcome::CardsExhausted,
                (Some(reason), card) => {
                    tracing::warn!(
                        "❌ Delivery to {} failed: {}",
                        participant.display_name,
                        reason
                    );
                    DeliveryOutcome::DeliveryFailed { card, reason }
                }
            };

            outcomes.push(ParticipantOutcome {
                user_id: participant.user_id.clone(),
                display_name: participant.display_name.clone(),
                outcome,
            });
        }
        outcomes
    }

    async fn announce(&self, message: &str) {
        if let Err(e) = self.announcer.announce(message).await {
            tracing::warn!("⚠️ Group announcement failed: {}", e);
        }
    }
}
