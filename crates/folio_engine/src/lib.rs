//! Folio engine: fetches and parses blog posts from a content host.
mod decode;
mod engine;
mod excerpt;
mod fetch;
mod frontmatter;
mod loader;
mod post;
mod types;

pub use decode::decode_document;
pub use engine::EngineHandle;
pub use excerpt::{build_excerpt, MAX_EXCERPT_CHARS};
pub use fetch::{FetchSettings, Fetcher, NullProgressSink, ProgressSink, ReqwestFetcher};
pub use frontmatter::{parse_frontmatter, strip_frontmatter, Frontmatter};
pub use loader::{BlogLoader, Clock, LoaderSettings, DEFAULT_API_BASE};
pub use post::{build_post, is_post_file, parse_post_date, slug_from_file_name, sort_posts};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, LoadError, LoadProgress,
    RemoteFile, Stage,
};
