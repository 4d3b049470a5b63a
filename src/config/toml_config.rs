use crate::core::messages::Messages;
use crate::core::theme_catalog::ThemeCatalog;
use crate::domain::model::{Card, Participant, DEFAULT_CARD_MAX};
use crate::utils::error::{DealerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
/// The deck holds the whole range in memory, so it is capped.
pub const MAX_CARD_MAX: Card = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub messages: Messages,
    #[serde(default)]
    pub roster: Vec<Participant>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    pub token: Option<String>,
    pub api_base: Option<String>,
    pub announce_channel_id: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub card_max: Option<Card>,
    pub themes_file: Option<String>,
    pub themes: Option<Vec<String>>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DealerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DealerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DealerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("bot.api_base", self.api_base())?;
        validation::validate_positive_number(
            "bot.request_timeout_seconds",
            self.request_timeout_seconds(),
            1,
        )?;
        validation::validate_range("game.card_max", self.card_max(), 1, MAX_CARD_MAX)?;

        if let Some(channel_id) = &self.bot.announce_channel_id {
            validation::validate_snowflake("bot.announce_channel_id", channel_id)?;
        }
        if let Some(path) = &self.game.themes_file {
            validation::validate_non_empty_string("game.themes_file", path)?;
        }
        for participant in &self.roster {
            validation::validate_non_empty_string(
                "roster.display_name",
                &participant.display_name,
            )?;
        }

        Ok(())
    }

    /// The bot token, rejecting placeholders whose variable was not set.
    pub fn token(&self) -> Result<&str> {
        let token = validation::validate_required_field("bot.token", &self.bot.token)?.as_str();
        validation::validate_non_empty_string("bot.token", token)?;
        if token.starts_with("${") {
            return Err(DealerError::ConfigValidationError {
                field: "bot.token".to_string(),
                message: format!("Environment variable for {} is not set", token),
            });
        }
        Ok(token)
    }

    pub fn announce_channel_id(&self) -> Result<&str> {
        validation::validate_required_field(
            "bot.announce_channel_id",
            &self.bot.announce_channel_id,
        )
        .map(String::as_str)
    }

    pub fn api_base(&self) -> &str {
        self.bot.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.bot
            .request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS)
    }

    pub fn card_max(&self) -> Card {
        self.game.card_max.unwrap_or(DEFAULT_CARD_MAX)
    }

    /// Themes from `themes_file` first, then the inline `themes` list.
    pub fn load_theme_catalog(&self) -> Result<ThemeCatalog> {
        let mut catalog = match &self.game.themes_file {
            Some(path) => ThemeCatalog::from_json_file(path)?,
            None => ThemeCatalog::default(),
        };
        if let Some(themes) = &self.game.themes {
            catalog.extend(themes.iter().cloned());
        }

        if catalog.is_empty() {
            tracing::warn!("⚠️ No themes configured, rounds will use the fallback announcement");
        } else {
            tracing::info!("📚 Loaded {} themes", catalog.len());
        }
        Ok(catalog)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[bot]
token = "abc.def"
announce_channel_id = "123456789"
request_timeout_seconds = 5

[game]
card_max = 50
themes = ["海", "宇宙"]

[messages]
card = "Card: {card}"

[[roster]]
user_id = "1"
display_name = "alice"

[[roster]]
user_id = "2"
display_name = "ito-dealer"
bot = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.token().unwrap(), "abc.def");
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
        assert_eq!(config.request_timeout_seconds(), 5);
        assert_eq!(config.card_max(), 50);
        assert_eq!(config.messages.card(3), "Card: 3");
        assert_eq!(config.roster.len(), 2);
        assert!(!config.roster[0].bot);
        assert!(config.roster[1].bot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.card_max(), 100);
        assert_eq!(config.request_timeout_seconds(), 10);
        assert!(config.roster.is_empty());
        assert!(config.load_theme_catalog().unwrap().is_empty());
        assert!(matches!(
            config.token(),
            Err(DealerError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ITO_DEALER_TEST_TOKEN", "secret-token");

        let config = TomlConfig::from_toml_str(
            r#"
[bot]
token = "${ITO_DEALER_TEST_TOKEN}"
"#,
        )
        .unwrap();
        assert_eq!(config.token().unwrap(), "secret-token");

        std::env::remove_var("ITO_DEALER_TEST_TOKEN");
    }

    #[test]
    fn test_unset_token_variable_is_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[bot]
token = "${ITO_DEALER_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.token(),
            Err(DealerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[bot]\napi_base = \"invalid-url\"").unwrap();
        assert!(bad_url.validate().is_err());

        let zero_cards = TomlConfig::from_toml_str("[game]\ncard_max = 0").unwrap();
        assert!(zero_cards.validate().is_err());

        let huge_deck = TomlConfig::from_toml_str("[game]\ncard_max = 4294967295").unwrap();
        assert!(matches!(
            huge_deck.validate(),
            Err(DealerError::InvalidConfigValueError { .. })
        ));

        let largest_deck = TomlConfig::from_toml_str("[game]\ncard_max = 10000").unwrap();
        assert!(largest_deck.validate().is_ok());

        let bad_channel =
            TomlConfig::from_toml_str("[bot]\nannounce_channel_id = \"general\"").unwrap();
        assert!(bad_channel.validate().is_err());
    }

    #[test]
    fn test_theme_file_and_inline_themes_are_merged() {
        let mut themes_file = NamedTempFile::new().unwrap();
        themes_file
            .write_all(r#"{"themes": ["海", "宇宙"]}"#.as_bytes())
            .unwrap();

        let toml_content = format!(
            "[game]\nthemes_file = {:?}\nthemes = [\"未来\"]\n",
            themes_file.path().to_str().unwrap()
        );
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        let catalog = config.load_theme_catalog().unwrap();

        assert_eq!(catalog.themes(), &["海", "宇宙", "未来"]);
    }

    #[test]
    fn test_missing_theme_file_is_error() {
        let config =
            TomlConfig::from_toml_str("[game]\nthemes_file = \"/nonexistent/themes.json\"").unwrap();
        assert!(matches!(
            config.load_theme_catalog(),
            Err(DealerError::IoError(_))
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[game]\ncard_max = 10\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.card_max(), 10);
    }
}
