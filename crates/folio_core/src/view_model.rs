use crate::{BlogPost, ContentSource};

/// Number of post cards shown before the "view all posts" link takes over.
pub const POSTS_PER_PAGE: usize = 6;

/// Message used when a failure arrives without one.
pub const FALLBACK_ERROR: &str = "An error occurred";

/// Appended to every failure message shown to the reader.
pub const GUIDANCE_SUFFIX: &str =
    ". Make sure your GitHub repository and blog posts are set up correctly.";

/// Observable load state: `{ posts, loading, error }`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedViewModel {
    pub source: Option<ContentSource>,
    pub posts: Vec<BlogPost>,
    pub loading: bool,
    pub error: Option<String>,
    pub dirty: bool,
}

/// The three mutually exclusive presentations, with the post grid split into
/// its empty and non-empty forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPresentation<'a> {
    Loading,
    Failed { message: &'a str, guidance: String },
    Empty,
    Posts { shown: &'a [BlogPost], hidden: usize },
}

impl FeedViewModel {
    pub fn presentation(&self, limit: usize) -> FeedPresentation<'_> {
        if self.loading {
            return FeedPresentation::Loading;
        }
        if let Some(message) = self.error.as_deref() {
            return FeedPresentation::Failed {
                message,
                guidance: format!("{message}{GUIDANCE_SUFFIX}"),
            };
        }
        if self.posts.is_empty() {
            return FeedPresentation::Empty;
        }
        let shown = limit.min(self.posts.len());
        FeedPresentation::Posts {
            shown: &self.posts[..shown],
            hidden: self.posts.len() - shown,
        }
    }
}
