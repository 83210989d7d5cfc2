use crate::view_model::{FeedViewModel, FALLBACK_ERROR};
use crate::ContentSource;

pub type LoadId = u64;

/// A post as presented on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    /// Raw document text, metadata block included.
    pub content: String,
    /// ISO-8601 date taken from metadata, or the fetch time when absent.
    pub date: String,
    /// File name without the `.md` extension; unique within one load.
    pub slug: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(Vec<BlogPost>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    source: Option<ContentSource>,
    load: LoadState,
    current_load: Option<LoadId>,
    next_load_id: LoadId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            next_load_id: 1,
            ..Self::default()
        }
    }

    pub fn view(&self) -> FeedViewModel {
        let (posts, loading, error) = match &self.load {
            LoadState::Loading => (Vec::new(), true, None),
            LoadState::Loaded(posts) => (posts.clone(), false, None),
            LoadState::Failed(message) => (Vec::new(), false, Some(message.clone())),
        };
        FeedViewModel {
            source: self.source.clone(),
            posts,
            loading,
            error,
            dirty: self.dirty,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn source(&self) -> Option<&ContentSource> {
        self.source.as_ref()
    }

    pub fn current_load(&self) -> Option<LoadId> {
        self.current_load
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replaces the whole load state with `Loading` for `source` and allocates a load id.
    pub(crate) fn begin_load(&mut self, source: ContentSource) -> LoadId {
        let load_id = self.next_load_id.max(1);
        self.next_load_id = load_id + 1;
        self.source = Some(source);
        self.current_load = Some(load_id);
        self.load = LoadState::Loading;
        self.dirty = true;
        load_id
    }

    /// True only for the completion of the most recent load of the current tuple.
    pub(crate) fn is_current(&self, load_id: LoadId, source: &ContentSource) -> bool {
        self.current_load == Some(load_id) && self.source.as_ref() == Some(source)
    }

    pub(crate) fn finish_load(&mut self, result: Result<Vec<BlogPost>, String>) {
        self.current_load = None;
        self.load = match result {
            Ok(posts) => LoadState::Loaded(posts),
            Err(message) if message.trim().is_empty() => {
                LoadState::Failed(FALLBACK_ERROR.to_string())
            }
            Err(message) => LoadState::Failed(message),
        };
        self.dirty = true;
    }
}
