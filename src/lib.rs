//! # lava-query
//!
//! Search-prefix routing for Lavalink-style audio-streaming clients.
//!
//! Users type queries such as `jfsearch:Bohemian Rhapsody`,
//! `https://youtu.be/dQw4w9WgXcQ` or just `bohemian rhapsody`. This crate
//! classifies them into a search mode, a source platform and a cleaned query,
//! and hands the result to whatever client actually loads tracks.
//!
//! ```rust
//! use lava_query::search::{QueryParser, SearchSource};
//!
//! let parser = QueryParser::default();
//! let parsed = parser.parse("scsearch: lofi beats");
//!
//! assert_eq!(parsed.source(), SearchSource::SoundCloud);
//! assert_eq!(parsed.query(), "lofi beats");
//! ```

pub mod config;
pub mod error;
pub mod search;

pub use config::Config;
pub use error::QueryError;
pub use search::{
    ParsedQuery, PrefixRegistry, QueryParser, SearchExt, SearchMode, SearchSource, SimpleQuery,
    TrackLoadRequest, TrackLoader,
};
