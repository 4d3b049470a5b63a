// Adapters layer: concrete implementations of the delivery and announcement ports.

pub mod console;
pub mod discord;

pub use console::ConsoleChannel;
pub use discord::DiscordRest;
