pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{ConsoleChannel, DiscordRest};
pub use core::{
    card_deck::CardDeck, dispatcher::RoundDispatcher, messages::Messages,
    theme_catalog::ThemeCatalog,
};
pub use domain::model::{AnnouncedTheme, DeliveryOutcome, Participant, RoundReport};
pub use utils::error::{DealerError, DeliveryError, Result};
