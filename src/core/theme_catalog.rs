use crate::domain::model::Theme;
use crate::utils::error::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

/// The configured round themes. Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

#[derive(Debug, Deserialize)]
struct ThemesFile {
    #[serde(default)]
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    pub fn new(themes: Vec<Theme>) -> Self {
        Self { themes }
    }

    /// Parses `{"themes": [...]}`. A document without the `themes` key is an empty catalog.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ThemesFile = serde_json::from_str(content)?;
        if file.themes.is_empty() {
            tracing::warn!("⚠️ Theme file contains no themes");
        }
        Ok(Self::new(file.themes))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded theme file: {}", path.as_ref().display());
        Self::from_json_str(&content)
    }

    pub fn extend(&mut self, themes: impl IntoIterator<Item = Theme>) {
        self.themes.extend(themes);
    }

    /// Uniform draw; `None` when the catalog is empty.
    pub fn pick_theme(&self) -> Option<&Theme> {
        self.pick_theme_with(&mut rand::thread_rng())
    }

    pub fn pick_theme_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Theme> {
        self.themes.choose(rng)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }
}
