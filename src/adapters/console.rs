use crate::domain::model::Participant;
use crate::domain::ports::{DeliveryChannel, GroupAnnouncer};
use crate::utils::error::{DeliveryError, Result};
use async_trait::async_trait;

/// Dry-run adapter: everything goes to stdout and nothing fails.
#[derive(Debug, Clone, Default)]
pub struct ConsoleChannel;

#[async_trait]
impl DeliveryChannel for ConsoleChannel {
    async fn send_private(
        &self,
        participant: &Participant,
        message: &str,
    ) -> std::result::Result<(), DeliveryError> {
        println!("[DM -> {}] {}", participant.display_name, message);
        Ok(())
    }
}

#[async_trait]
impl GroupAnnouncer for ConsoleChannel {
    async fn announce(&self, message: &str) -> Result<()> {
        println!("[group] {}", message);
        Ok(())
    }
}
