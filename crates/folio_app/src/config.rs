use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use folio_core::{ContentSource, POSTS_PER_PAGE};
use folio_engine::{FetchSettings, LoaderSettings, DEFAULT_API_BASE};
use serde::Deserialize;
use url::Url;

use crate::cli::Cli;

pub const DEFAULT_HOST_BASE: &str = "https://github.com";

/// Feed settings as written in the RON configuration file.
///
/// ```ron
/// (
///     account: Some("octo"),
///     repository: Some("site"),
///     branch: "main",
///     subdirectory: "blogs",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub account: Option<String>,
    pub repository: Option<String>,
    pub branch: String,
    pub subdirectory: String,
    pub api_base: String,
    pub host_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub user_agent: Option<String>,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            account: None,
            repository: None,
            branch: "main".to_string(),
            subdirectory: "blogs".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            host_base: DEFAULT_HOST_BASE.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            user_agent: None,
            limit: POSTS_PER_PAGE,
        }
    }
}

impl FeedConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        ron::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Config file (when given) with command line flags layered on top.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(account) = &cli.account {
            config.account = Some(account.clone());
        }
        if let Some(repository) = &cli.repository {
            config.repository = Some(repository.clone());
        }
        if let Some(branch) = &cli.branch {
            config.branch = branch.clone();
        }
        if let Some(subdirectory) = &cli.subdirectory {
            config.subdirectory = subdirectory.clone();
        }
        if let Some(limit) = cli.limit {
            config.limit = limit;
        }
        Ok(config)
    }

    pub fn source(&self) -> Result<ContentSource> {
        let account = self
            .account
            .as_deref()
            .context("no account given (use --account or the config file)")?;
        let repository = self
            .repository
            .as_deref()
            .context("no repository given (use --repository or the config file)")?;
        ContentSource::new(account, repository, &self.branch, &self.subdirectory)
            .context("invalid content source")
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        };
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        settings
    }

    pub fn loader_settings(&self) -> Result<LoaderSettings> {
        let api_base = Url::parse(&self.api_base)
            .with_context(|| format!("invalid api_base {:?}", self.api_base))?;
        Ok(LoaderSettings::new(api_base))
    }

    pub fn host_base(&self) -> Result<Url> {
        Url::parse(&self.host_base)
            .with_context(|| format!("invalid host_base {:?}", self.host_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("(account: Some(\"octo\"), repository: Some(\"site\"))");
        let config = FeedConfig::load(file.path()).unwrap();

        assert_eq!(
            config,
            FeedConfig {
                account: Some("octo".to_string()),
                repository: Some("site".to_string()),
                ..FeedConfig::default()
            }
        );
        assert_eq!(
            config.source().unwrap(),
            ContentSource::new("octo", "site", "main", "blogs").unwrap()
        );
    }

    #[test]
    fn flags_override_file_values() {
        let file = write_config("(account: Some(\"octo\"), branch: \"dev\", limit: 3)");
        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::parse_from([
            "folio",
            "--config",
            path.as_str(),
            "--repository",
            "site",
            "--path",
            "notes",
        ]);

        let config = FeedConfig::resolve(&cli).unwrap();
        assert_eq!(config.account.as_deref(), Some("octo"));
        assert_eq!(config.repository.as_deref(), Some("site"));
        assert_eq!(config.branch, "dev");
        assert_eq!(config.subdirectory, "notes");
        assert_eq!(config.limit, 3);
    }

    #[test]
    fn missing_repository_is_an_error() {
        let config = FeedConfig {
            account: Some("octo".to_string()),
            ..FeedConfig::default()
        };
        let err = config.source().unwrap_err();
        assert!(err.to_string().contains("no repository given"));
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = FeedConfig::load(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.ron"));
    }

    #[test]
    fn fetch_settings_follow_config() {
        let config = FeedConfig {
            request_timeout_secs: 3,
            user_agent: Some("tester".to_string()),
            ..FeedConfig::default()
        };
        let settings = config.fetch_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.user_agent, "tester");
    }
}
