use std::fmt;

use url::Url;

/// Extension a listing entry must carry to be treated as a post.
pub const POST_EXTENSION: &str = ".md";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSource {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Coordinates of a post directory on the content host.
///
/// Two sources are equal only when all four fields match; pending loads are
/// keyed by this tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentSource {
    account: String,
    repository: String,
    branch: String,
    subdirectory: String,
}

impl ContentSource {
    pub fn new(
        account: impl Into<String>,
        repository: impl Into<String>,
        branch: impl Into<String>,
        subdirectory: impl Into<String>,
    ) -> Result<Self, InvalidSource> {
        let account = required("account", account.into())?;
        let repository = required("repository", repository.into())?;
        let branch = required("branch", branch.into())?;
        let subdirectory = required("subdirectory", subdirectory.into())?;
        let subdirectory = subdirectory.trim_matches('/').to_string();
        if subdirectory.is_empty() {
            return Err(InvalidSource::EmptyField {
                field: "subdirectory",
            });
        }
        Ok(Self {
            account,
            repository,
            branch,
            subdirectory,
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn subdirectory(&self) -> &str {
        &self.subdirectory
    }

    /// Directory listing endpoint:
    /// `{api_base}/repos/{account}/{repository}/contents/{subdirectory}?ref={branch}`.
    ///
    /// Returns `None` when `api_base` cannot carry a path (e.g. `mailto:`).
    pub fn listing_url(&self, api_base: &Url) -> Option<Url> {
        let mut url = api_base.clone();
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments
                .pop_if_empty()
                .push("repos")
                .push(&self.account)
                .push(&self.repository)
                .push("contents");
            segments.extend(self.subdirectory_segments());
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("ref", &self.branch);
        Some(url)
    }

    /// Page of a single post on the host, used for "read more" links.
    pub fn post_url(&self, host_base: &Url, slug: &str) -> Option<Url> {
        let file_name = format!("{slug}{POST_EXTENSION}");
        self.host_url(host_base, "blob", Some(&file_name))
    }

    /// Directory view on the host, used for the "view all posts" link.
    pub fn tree_url(&self, host_base: &Url) -> Option<Url> {
        self.host_url(host_base, "tree", None)
    }

    fn host_url(&self, host_base: &Url, view: &str, leaf: Option<&str>) -> Option<Url> {
        let mut url = host_base.clone();
        url.set_query(None);
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments
                .pop_if_empty()
                .push(&self.account)
                .push(&self.repository)
                .push(view)
                .push(&self.branch);
            segments.extend(self.subdirectory_segments());
            if let Some(leaf) = leaf {
                segments.push(leaf);
            }
        }
        Some(url)
    }

    fn subdirectory_segments(&self) -> impl Iterator<Item = &str> {
        self.subdirectory.split('/').filter(|part| !part.is_empty())
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{}:{}",
            self.account, self.repository, self.branch, self.subdirectory
        )
    }
}

fn required(field: &'static str, value: String) -> Result<String, InvalidSource> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(InvalidSource::EmptyField { field })
    } else {
        Ok(trimmed.to_string())
    }
}
