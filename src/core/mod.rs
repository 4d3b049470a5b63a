pub mod card_deck;
pub mod dispatcher;
pub mod messages;
pub mod report;
pub mod theme_catalog;

pub use crate::domain::model::{
    AnnouncedTheme, Card, DeliveryOutcome, Participant, ParticipantOutcome, RoundReport, Theme,
};
pub use crate::domain::ports::{DeliveryChannel, GroupAnnouncer};
pub use crate::utils::error::Result;
