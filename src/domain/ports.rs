use crate::domain::model::Participant;
use crate::utils::error::{DeliveryError, Result};
use async_trait::async_trait;

/// Sends one private message to one participant.
///
/// Implementations report every failure (bad address, unreachable user,
/// timeout) as a [`DeliveryError`]; the engine records it and moves on.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn send_private(
        &self,
        participant: &Participant,
        message: &str,
    ) -> std::result::Result<(), DeliveryError>;
}

/// Broadcasts a message to the whole group (the channel the round was started from).
#[async_trait]
pub trait GroupAnnouncer: Send + Sync {
    async fn announce(&self, message: &str) -> Result<()>;
}
