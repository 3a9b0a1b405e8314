use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::{ParsedQuery, PrefixRegistry, SearchMode, SearchSource, SimpleQuery};

/// Parser listo para usar: registro compartido + modo por defecto configurado
#[derive(Debug, Clone)]
pub struct QueryParser {
    registry: Arc<PrefixRegistry>,
    default_mode: SearchMode,
}

impl QueryParser {
    pub fn new(registry: Arc<PrefixRegistry>, default_mode: SearchMode) -> Self {
        Self {
            registry,
            default_mode,
        }
    }

    pub fn registry(&self) -> &Arc<PrefixRegistry> {
        &self.registry
    }

    pub fn default_mode(&self) -> &SearchMode {
        &self.default_mode
    }

    pub fn parse(&self, query: &str) -> ParsedQuery {
        self.registry.parse(query, &self.default_mode)
    }

    /// Same as [`QueryParser::parse`] but with a one-off default mode.
    pub fn parse_with_default(&self, query: &str, default_mode: &SearchMode) -> ParsedQuery {
        self.registry.parse(query, default_mode)
    }

    pub fn simple_parse(&self, query: &str) -> SimpleQuery {
        self.registry.simple_parse(query, &self.default_mode)
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(Arc::new(PrefixRegistry::new()), SearchMode::NONE)
    }
}

/// Petición lista para el endpoint de carga de tracks del servidor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackLoadRequest {
    /// Identifier in the `mode:query` form the server expects, or the raw URL.
    pub identifier: String,
    pub search_mode: SearchMode,
    pub source: SearchSource,
    pub is_url: bool,
}

impl From<&ParsedQuery> for TrackLoadRequest {
    fn from(parsed: &ParsedQuery) -> Self {
        let identifier = match parsed.search_mode().prefix() {
            Some(mode) if !parsed.is_url() => format!("{}:{}", mode, parsed.query()),
            _ => parsed.query().to_string(),
        };

        Self {
            identifier,
            search_mode: parsed.search_mode().clone(),
            source: parsed.source(),
            is_url: parsed.is_url(),
        }
    }
}

/// Punto de integración con el cliente de audio envuelto.
///
/// Implementations forward the request to whatever transport the host uses;
/// this crate never talks to the server itself.
#[cfg_attr(test, mockall::automock(type Tracks = Vec<String>;))]
#[async_trait]
pub trait TrackLoader {
    type Tracks: Send;

    async fn load_tracks(&self, request: &TrackLoadRequest) -> Result<Self::Tracks>;
}

/// Métodos de conveniencia sobre cualquier [`TrackLoader`]
#[async_trait]
pub trait SearchExt: TrackLoader + Sync {
    /// Parses `raw` and loads the resulting identifier.
    ///
    /// Blank queries are rejected instead of being sent as a bare prefix.
    async fn search(&self, parser: &QueryParser, raw: &str) -> Result<Self::Tracks> {
        let parsed = parser.parse(raw);
        if parsed.query().trim().is_empty() {
            anyhow::bail!("Query vacía, nada que buscar");
        }

        let request = TrackLoadRequest::from(&parsed);
        debug!(
            "🔍 Cargando '{}' vía {} ({})",
            request.identifier,
            parsed.source_display_name(),
            request.search_mode
        );
        self.load_tracks(&request).await
    }

    /// Loads `query` with an explicit mode, skipping prefix detection.
    ///
    /// The source is resolved from the parser's registry the same way the
    /// default-mode fallback does it.
    async fn search_with_mode(
        &self,
        parser: &QueryParser,
        mode: &SearchMode,
        query: &str,
    ) -> Result<Self::Tracks> {
        let request = TrackLoadRequest {
            identifier: match mode.prefix() {
                Some(prefix) => format!("{}:{}", prefix, query),
                None => query.to_string(),
            },
            search_mode: mode.clone(),
            source: parser.registry().reverse_lookup_source(mode),
            is_url: false,
        };
        self.load_tracks(&request).await
    }
}

impl<T: TrackLoader + Sync + ?Sized> SearchExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_from_prefixed_query() {
        let parser = QueryParser::default();
        let request = TrackLoadRequest::from(&parser.parse("jfsearch:  Bohemian Rhapsody"));
        assert_eq!(
            request,
            TrackLoadRequest {
                identifier: "jfsearch:Bohemian Rhapsody".to_string(),
                search_mode: SearchMode::JELLYFIN,
                source: SearchSource::Jellyfin,
                is_url: false,
            }
        );
    }

    #[test]
    fn test_request_from_url_passes_through() {
        let parser = QueryParser::default();
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        let request = TrackLoadRequest::from(&parser.parse(url));
        assert_eq!(request.identifier, url);
        assert!(request.is_url);
        assert_eq!(request.search_mode, SearchMode::NONE);
    }

    #[test]
    fn test_request_from_plain_query_uses_default() {
        let parser = QueryParser::new(Arc::new(PrefixRegistry::new()), SearchMode::SOUNDCLOUD);
        let request = TrackLoadRequest::from(&parser.parse("lofi beats"));
        assert_eq!(request.identifier, "scsearch:lofi beats");
        assert_eq!(request.source, SearchSource::SoundCloud);
    }

    #[test]
    fn test_parser_shares_registry() {
        let registry = Arc::new(PrefixRegistry::new());
        let parser = QueryParser::new(Arc::clone(&registry), SearchMode::NONE);

        registry
            .register_custom("ndsearch", SearchMode::custom("ndsearch").unwrap())
            .unwrap();

        assert!(parser.parse("ndsearch:My Song").has_prefix());
        assert_eq!(
            parser.parse_with_default("My Song", &SearchMode::DEEZER).search_mode(),
            &SearchMode::DEEZER
        );
        assert_eq!(parser.simple_parse("My Song").search_mode, SearchMode::YOUTUBE);
    }

    #[tokio::test]
    async fn test_search_delegates_to_loader() {
        let mut loader = MockTrackLoader::new();
        loader
            .expect_load_tracks()
            .withf(|request| request.identifier == "dzsearch:Around the World")
            .times(1)
            .returning(|_| Ok(vec!["Around the World".to_string()]));

        let parser = QueryParser::default();
        let tracks = loader
            .search(&parser, "dzsearch:Around the World")
            .await
            .unwrap();
        assert_eq!(tracks, vec!["Around the World".to_string()]);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let mut loader = MockTrackLoader::new();
        loader.expect_load_tracks().never();

        let parser = QueryParser::default();
        assert!(loader.search(&parser, "   ").await.is_err());
        assert!(loader.search(&parser, "ytsearch:   ").await.is_err());
    }

    #[tokio::test]
    async fn test_search_propagates_loader_error() {
        let mut loader = MockTrackLoader::new();
        loader
            .expect_load_tracks()
            .returning(|_| Err(anyhow::anyhow!("node offline")));

        let parser = QueryParser::default();
        let err = loader.search(&parser, "some song").await.unwrap_err();
        assert_eq!(err.to_string(), "node offline");
    }

    #[tokio::test]
    async fn test_search_with_mode() {
        let expected = TrackLoadRequest {
            identifier: "ymsearch:Kino".to_string(),
            search_mode: SearchMode::YANDEX_MUSIC,
            source: SearchSource::YandexMusic,
            is_url: false,
        };

        let mut loader = MockTrackLoader::new();
        loader
            .expect_load_tracks()
            .with(eq(expected))
            .returning(|_| Ok(Vec::new()));

        let parser = QueryParser::default();
        let tracks = loader
            .search_with_mode(&parser, &SearchMode::YANDEX_MUSIC, "Kino")
            .await
            .unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_search_with_unregistered_mode_has_no_source() {
        let mode = SearchMode::custom("ndsearch").unwrap();
        let mut loader = MockTrackLoader::new();
        loader
            .expect_load_tracks()
            .withf(|request| {
                request.identifier == "ndsearch:My Song" && request.source == SearchSource::None
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let parser = QueryParser::default();
        loader
            .search_with_mode(&parser, &mode, "My Song")
            .await
            .unwrap();
    }
}
