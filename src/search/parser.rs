use serde::Serialize;
use url::Url;

use super::{PrefixRegistry, SearchMode, SearchSource};

/// Resultado inmutable de clasificar una query.
///
/// Exactly one classification applies: a registered prefix was found
/// (`has_prefix`), the input is a direct URL (`is_url`), or neither and the
/// default mode was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    search_mode: SearchMode,
    source: SearchSource,
    query: String,
    original_query: String,
    detected_prefix: Option<String>,
    is_url: bool,
    has_prefix: bool,
}

impl ParsedQuery {
    fn fallback(registry: &PrefixRegistry, query: &str, default_mode: &SearchMode) -> Self {
        let mode = effective_default(default_mode);
        Self {
            source: registry.reverse_lookup_source(&mode),
            search_mode: mode,
            query: query.to_string(),
            original_query: query.to_string(),
            detected_prefix: None,
            is_url: false,
            has_prefix: false,
        }
    }

    // Getters
    pub fn search_mode(&self) -> &SearchMode {
        &self.search_mode
    }
    pub fn source(&self) -> SearchSource {
        self.source
    }
    /// Query text without the prefix and its colon.
    pub fn query(&self) -> &str {
        &self.query
    }
    pub fn original_query(&self) -> &str {
        &self.original_query
    }
    /// Prefix exactly as typed by the user, casing preserved.
    pub fn detected_prefix(&self) -> Option<&str> {
        self.detected_prefix.as_deref()
    }
    pub fn is_url(&self) -> bool {
        self.is_url
    }
    pub fn has_prefix(&self) -> bool {
        self.has_prefix
    }

    pub fn is_jellyfin(&self) -> bool {
        self.source == SearchSource::Jellyfin
    }

    pub fn is_youtube_family(&self) -> bool {
        matches!(
            self.source,
            SearchSource::YouTube | SearchSource::YouTubeMusic
        )
    }

    pub fn source_display_name(&self) -> &'static str {
        self.source.display_name()
    }

    /// Drops the metadata, keeping only what a loader needs.
    pub fn into_simple(self) -> SimpleQuery {
        SimpleQuery {
            search_mode: self.search_mode,
            query: self.query,
        }
    }
}

/// Versión reducida: solo modo y texto limpio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleQuery {
    pub search_mode: SearchMode,
    pub query: String,
}

impl PrefixRegistry {
    /// Classifies `query` against this registry.
    ///
    /// Precedence: blank input, registered prefix, direct URL, default mode.
    /// A [`SearchMode::NONE`] default means YouTube. Never fails.
    pub fn parse(&self, query: &str, default_mode: &SearchMode) -> ParsedQuery {
        if query.trim().is_empty() {
            return ParsedQuery::fallback(self, "", default_mode);
        }

        if let Some(parsed) = self.parse_prefixed(query) {
            return parsed;
        }

        if is_http_url(query) {
            return ParsedQuery {
                search_mode: SearchMode::NONE,
                source: SearchSource::None,
                query: query.to_string(),
                original_query: query.to_string(),
                detected_prefix: None,
                is_url: true,
                has_prefix: false,
            };
        }

        ParsedQuery::fallback(self, query, default_mode)
    }

    pub fn simple_parse(&self, query: &str, default_mode: &SearchMode) -> SimpleQuery {
        self.parse(query, default_mode).into_simple()
    }

    fn parse_prefixed(&self, query: &str) -> Option<ParsedQuery> {
        // Un ':' en la posición 0 no deja candidato
        let colon = query.find(':').filter(|&idx| idx > 0)?;
        let candidate = &query[..colon];
        let (mode, source) = self.lookup(candidate)?;

        Some(ParsedQuery {
            search_mode: mode,
            source,
            query: query[colon + 1..].trim_start().to_string(),
            original_query: query.to_string(),
            detected_prefix: Some(candidate.to_string()),
            is_url: false,
            has_prefix: true,
        })
    }
}

fn effective_default(default_mode: &SearchMode) -> SearchMode {
    if default_mode.is_none() {
        SearchMode::YOUTUBE
    } else {
        default_mode.clone()
    }
}

fn is_http_url(query: &str) -> bool {
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        query
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    });

    has_scheme && Url::parse(query).is_ok()
}
