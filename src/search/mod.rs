//! # Search Module
//!
//! Prefix-based search routing for Lavalink-style audio clients.
//!
//! A user query such as `jfsearch:Bohemian Rhapsody` carries the backend it
//! wants in front of the first colon. This module resolves that prefix against
//! a shared [`PrefixRegistry`], falls back to URL detection, and finally to a
//! default search mode.
//!
//! ## Components
//!
//! - [`SearchMode`]: the opaque tag the remote server understands (`ytsearch`, ...)
//! - [`SearchSource`]: the platform a query is aimed at
//! - [`PrefixRegistry`]: concurrent prefix table, pre-populated with the defaults
//! - [`parser`]: the classification routine and its [`ParsedQuery`] result
//! - [`load`]: glue that hands a parsed query to a [`TrackLoader`]
//!
//! ## Example
//!
//! ```rust
//! use lava_query::search::{PrefixRegistry, SearchMode, SearchSource};
//!
//! let registry = PrefixRegistry::new();
//! let parsed = registry.parse("jfsearch:Bohemian Rhapsody", &SearchMode::NONE);
//!
//! assert!(parsed.has_prefix());
//! assert_eq!(parsed.source(), SearchSource::Jellyfin);
//! assert_eq!(parsed.query(), "Bohemian Rhapsody");
//! ```

pub mod load;
pub mod parser;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::error::QueryError;

pub use load::{QueryParser, SearchExt, TrackLoadRequest, TrackLoader};
pub use parser::{ParsedQuery, SimpleQuery};
pub use registry::PrefixRegistry;

/// Tag de modo de búsqueda.
///
/// Wraps the prefix the remote server expects (without the colon). Two modes
/// are equal when their payloads are equal, compared case-sensitively.
/// Deserialization goes through [`SearchMode::custom`], so a blank payload is
/// rejected there too; `null` reads as [`SearchMode::NONE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub struct SearchMode(Option<Cow<'static, str>>);

impl SearchMode {
    /// Unset mode. Used for direct URLs and as the "no preference" default.
    pub const NONE: SearchMode = SearchMode(None);
    pub const YOUTUBE: SearchMode = SearchMode::builtin("ytsearch");
    pub const YOUTUBE_MUSIC: SearchMode = SearchMode::builtin("ytmsearch");
    pub const SOUNDCLOUD: SearchMode = SearchMode::builtin("scsearch");
    pub const SPOTIFY: SearchMode = SearchMode::builtin("spsearch");
    pub const APPLE_MUSIC: SearchMode = SearchMode::builtin("amsearch");
    pub const DEEZER: SearchMode = SearchMode::builtin("dzsearch");
    pub const YANDEX_MUSIC: SearchMode = SearchMode::builtin("ymsearch");
    pub const JELLYFIN: SearchMode = SearchMode::builtin("jfsearch");

    const fn builtin(prefix: &'static str) -> Self {
        SearchMode(Some(Cow::Borrowed(prefix)))
    }

    /// Builds a mode for a server-side plugin the defaults do not know about.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidArgument`] if `prefix` is empty or only whitespace.
    pub fn custom(prefix: impl Into<String>) -> Result<Self, QueryError> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(QueryError::empty_prefix());
        }
        Ok(SearchMode(Some(Cow::Owned(prefix))))
    }

    /// Payload sent to the server, `None` for [`SearchMode::NONE`].
    pub fn prefix(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl TryFrom<Option<String>> for SearchMode {
    type Error = QueryError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(prefix) => SearchMode::custom(prefix),
            None => Ok(SearchMode::NONE),
        }
    }
}

impl From<SearchMode> for Option<String> {
    fn from(mode: SearchMode) -> Self {
        mode.0.map(Cow::into_owned)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix().unwrap_or("none"))
    }
}

/// Plataforma de origen de una query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchSource {
    #[default]
    None,
    YouTube,
    YouTubeMusic,
    SoundCloud,
    Spotify,
    AppleMusic,
    Deezer,
    YandexMusic,
    Jellyfin,
    Custom,
}

impl SearchSource {
    /// Human-readable name; direct URLs and unknown origins read as "Direct".
    pub fn display_name(&self) -> &'static str {
        match self {
            SearchSource::Jellyfin => "Jellyfin",
            SearchSource::YouTube => "YouTube",
            SearchSource::YouTubeMusic => "YouTube Music",
            SearchSource::SoundCloud => "SoundCloud",
            SearchSource::Spotify => "Spotify",
            SearchSource::AppleMusic => "Apple Music",
            SearchSource::Deezer => "Deezer",
            SearchSource::YandexMusic => "Yandex Music",
            SearchSource::Custom => "Custom",
            SearchSource::None => "Direct",
        }
    }
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_equality_by_payload() {
        let custom = SearchMode::custom("ytsearch").unwrap();
        assert_eq!(custom, SearchMode::YOUTUBE);
        assert_ne!(SearchMode::custom("YTSEARCH").unwrap(), SearchMode::YOUTUBE);
        assert_eq!(SearchMode::default(), SearchMode::NONE);
    }

    #[test]
    fn test_custom_mode_rejects_blank() {
        assert!(matches!(
            SearchMode::custom(""),
            Err(QueryError::InvalidArgument(_))
        ));
        assert!(matches!(
            SearchMode::custom("   \t"),
            Err(QueryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mode_prefix_and_display() {
        assert_eq!(SearchMode::JELLYFIN.prefix(), Some("jfsearch"));
        assert_eq!(SearchMode::NONE.prefix(), None);
        assert!(SearchMode::NONE.is_none());
        assert_eq!(SearchMode::DEEZER.to_string(), "dzsearch");
        assert_eq!(SearchMode::NONE.to_string(), "none");
    }

    #[test]
    fn test_mode_serde_round_trip() {
        let json = serde_json::to_string(&SearchMode::SPOTIFY).unwrap();
        assert_eq!(json, "\"spsearch\"");
        let back: SearchMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SearchMode::SPOTIFY);
        assert_eq!(serde_json::to_string(&SearchMode::NONE).unwrap(), "null");
    }

    #[test]
    fn test_mode_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<SearchMode>("\"  \"").is_err());
        assert!(serde_json::from_str::<SearchMode>("\"\"").is_err());
        assert_eq!(
            serde_json::from_str::<SearchMode>("null").unwrap(),
            SearchMode::NONE
        );
    }

    #[test]
    fn test_source_display_names() {
        assert_eq!(SearchSource::YouTubeMusic.display_name(), "YouTube Music");
        assert_eq!(SearchSource::AppleMusic.display_name(), "Apple Music");
        assert_eq!(SearchSource::YandexMusic.display_name(), "Yandex Music");
        assert_eq!(SearchSource::Custom.display_name(), "Custom");
        assert_eq!(SearchSource::None.display_name(), "Direct");
        assert_eq!(SearchSource::Jellyfin.to_string(), "Jellyfin");
    }
}
