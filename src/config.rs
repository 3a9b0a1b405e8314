use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::search::{PrefixRegistry, SearchMode, SearchSource};

/// Prefijo personalizado declarado en la configuración
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomPrefix {
    pub prefix: String,
    /// Payload sent to the server; defaults to the prefix itself.
    pub mode: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Búsqueda
    pub default_search_mode: SearchMode,
    pub custom_prefixes: Vec<CustomPrefix>,
    pub disabled_prefixes: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            default_search_mode: parse_mode(
                &std::env::var("DEFAULT_SEARCH_MODE").unwrap_or_else(|_| "ytsearch".to_string()),
            )?,
            custom_prefixes: parse_custom_prefixes(
                &std::env::var("CUSTOM_SEARCH_PREFIXES").unwrap_or_default(),
            ),
            disabled_prefixes: split_list(
                &std::env::var("DISABLED_SEARCH_PREFIXES").unwrap_or_default(),
            )
            .map(str::to_string)
            .collect(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validates configuration values for correctness.
    ///
    /// # Validation Rules
    ///
    /// - Custom prefixes and their modes must not be empty
    /// - Custom prefixes must not contain `:`, the parser cuts at the first colon
    ///   so such a prefix could never be detected
    pub fn validate(&self) -> Result<()> {
        for custom in &self.custom_prefixes {
            if custom.prefix.trim().is_empty() {
                anyhow::bail!("Custom search prefix must not be empty");
            }
            if custom.prefix.contains(':') {
                anyhow::bail!(
                    "Custom search prefix cannot contain ':', got: {}",
                    custom.prefix
                );
            }
            if custom.mode.trim().is_empty() {
                anyhow::bail!("Search mode for prefix '{}' must not be empty", custom.prefix);
            }
        }

        Ok(())
    }

    /// Applies removals first, then custom prefixes, to `registry`.
    pub fn apply(&self, registry: &PrefixRegistry) -> Result<()> {
        for prefix in &self.disabled_prefixes {
            if !registry.unregister(prefix) {
                warn!("⚠️ Prefijo deshabilitado no registrado: {}", prefix);
            }
        }

        for custom in &self.custom_prefixes {
            let mode = SearchMode::custom(custom.mode.clone())
                .with_context(|| format!("Invalid search mode for prefix '{}'", custom.prefix))?;
            registry
                .register(&custom.prefix, mode, SearchSource::Custom)
                .with_context(|| format!("Could not register prefix '{}'", custom.prefix))?;
        }

        info!(
            "🔖 Registro de prefijos listo: {} entradas ({} personalizadas, {} deshabilitadas)",
            registry.len(),
            self.custom_prefixes.len(),
            self.disabled_prefixes.len()
        );
        Ok(())
    }

    /// Returns a summary of the current configuration for logging.
    pub fn summary(&self) -> String {
        let custom = self
            .custom_prefixes
            .iter()
            .map(|c| format!("{}={}", c.prefix, c.mode))
            .collect::<Vec<_>>();

        format!(
            "Config Summary:\n  \
            Default mode: {}\n  \
            Custom prefixes: [{}]\n  \
            Disabled prefixes: [{}]",
            self.default_search_mode,
            custom.join(", "),
            self.disabled_prefixes.join(", ")
        )
    }
}

/// Default configuration values.
///
/// Used as fallbacks when environment variables are not provided.
impl Default for Config {
    fn default() -> Self {
        Self {
            default_search_mode: SearchMode::YOUTUBE,
            custom_prefixes: Vec::new(),
            disabled_prefixes: Vec::new(),
        }
    }
}

fn parse_mode(raw: &str) -> Result<SearchMode> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(SearchMode::NONE);
    }
    SearchMode::custom(raw).context("DEFAULT_SEARCH_MODE is invalid")
}

/// `ndsearch,music=mssearch` -> [ndsearch=ndsearch, music=mssearch]
fn parse_custom_prefixes(raw: &str) -> Vec<CustomPrefix> {
    split_list(raw)
        .map(|item| match item.split_once('=') {
            Some((prefix, mode)) => CustomPrefix {
                prefix: prefix.trim().to_string(),
                mode: mode.trim().to_string(),
            },
            None => CustomPrefix {
                prefix: item.to_string(),
                mode: item.to_string(),
            },
        })
        .collect()
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}
