use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::{BlogPost, ContentSource, LoadId};
use folio_logging::{folio_debug, folio_info, folio_warn};
use futures_util::future::try_join_all;
use url::Url;

use crate::decode::decode_document;
use crate::fetch::{Fetcher, ProgressSink};
use crate::post::{build_post, is_post_file, sort_posts};
use crate::{EngineEvent, LoadError, LoadProgress, RemoteFile, Stage};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct LoaderSettings {
    /// Root of the contents API; tests point this at a mock server.
    pub api_base: Url,
    /// Supplies the date of posts without one.
    pub now: Clock,
}

impl LoaderSettings {
    pub fn new(api_base: Url) -> Self {
        Self {
            api_base,
            now: Arc::new(Utc::now),
        }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_API_BASE).expect("default api base is a valid url"))
    }
}

impl fmt::Debug for LoaderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderSettings")
            .field("api_base", &self.api_base.as_str())
            .finish_non_exhaustive()
    }
}

/// Lists a post directory, fetches every post concurrently, and returns them
/// newest first. One failed document fails the whole load.
#[derive(Clone)]
pub struct BlogLoader {
    fetcher: Arc<dyn Fetcher>,
    settings: LoaderSettings,
}

impl BlogLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: LoaderSettings) -> Self {
        Self { fetcher, settings }
    }

    pub async fn load(
        &self,
        load_id: LoadId,
        source: &ContentSource,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<BlogPost>, LoadError> {
        emit(sink, load_id, Stage::Listing, None);
        let files = self.list(source).await?;

        let candidates: Vec<(String, String)> = files
            .into_iter()
            .filter(|file| is_post_file(&file.name))
            .filter_map(|file| match file.download_url {
                Some(url) => Some((file.name, url)),
                None => {
                    folio_debug!("Skipping {} without a download url", file.name);
                    None
                }
            })
            .collect();
        folio_info!(
            "Load {} for {}: {} post documents",
            load_id,
            source,
            candidates.len()
        );

        emit(sink, load_id, Stage::Downloading, Some(candidates.len()));
        let documents = try_join_all(
            candidates
                .iter()
                .map(|(name, url)| self.fetch_document(name, url)),
        )
        .await?;

        emit(sink, load_id, Stage::Parsing, Some(documents.len()));
        let now = (self.settings.now)();
        let mut posts: Vec<BlogPost> = candidates
            .iter()
            .zip(documents)
            .map(|((name, _), content)| build_post(name, content, now))
            .collect();
        sort_posts(&mut posts);

        emit(sink, load_id, Stage::Done, Some(posts.len()));
        Ok(posts)
    }

    async fn list(&self, source: &ContentSource) -> Result<Vec<RemoteFile>, LoadError> {
        let url = source
            .listing_url(&self.settings.api_base)
            .ok_or_else(|| LoadError::InvalidSource(source.clone()))?;
        let output = self.fetcher.fetch(url.as_str()).await.map_err(|err| {
            folio_warn!("Listing {} failed: {}", url, err);
            LoadError::Listing(err)
        })?;
        serde_json::from_slice(&output.bytes).map_err(|err| {
            folio_warn!("Listing {} is not a directory listing: {}", url, err);
            LoadError::MalformedListing(err.to_string())
        })
    }

    async fn fetch_document(&self, name: &str, url: &str) -> Result<String, LoadError> {
        let output = self.fetcher.fetch(url).await.map_err(|error| {
            folio_warn!("Fetching {} failed: {}", name, error);
            LoadError::Document {
                name: name.to_string(),
                error,
            }
        })?;
        folio_debug!(
            "Fetched {} ({} bytes, {} redirects)",
            name,
            output.metadata.byte_len,
            output.metadata.redirect_count
        );
        Ok(decode_document(
            &output.bytes,
            output.metadata.content_type.as_deref(),
        ))
    }
}

fn emit(sink: &dyn ProgressSink, load_id: LoadId, stage: Stage, documents: Option<usize>) {
    sink.emit(EngineEvent::Progress(LoadProgress {
        load_id,
        stage,
        documents,
    }));
}
