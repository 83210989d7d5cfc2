#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use folio_core::ContentSource;
use folio_engine::{EngineEvent, LoaderSettings, ProgressSink};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_PATH: &str = "/repos/octo/site/contents/blogs";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(folio_logging::initialize_for_tests);
}

pub fn source() -> ContentSource {
    ContentSource::new("octo", "site", "main", "blogs").unwrap()
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

pub fn settings_for(server: &MockServer) -> LoaderSettings {
    let mut settings = LoaderSettings::new(Url::parse(&server.uri()).unwrap());
    settings.now = Arc::new(fixed_now);
    settings
}

/// Mounts a directory listing for `names`; every entry downloads from `/raw/{name}`.
pub async fn mount_listing(server: &MockServer, names: &[&str]) {
    let entries: Vec<_> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "path": format!("blogs/{name}"),
                "sha": format!("sha-{name}"),
                "type": "file",
                "download_url": format!("{}/raw/{name}", server.uri()),
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}

pub async fn mount_document(server: &MockServer, name: &str, body: &str) {
    mount_document_with_delay(server, name, body, Duration::ZERO).await;
}

pub async fn mount_document_with_delay(
    server: &MockServer,
    name: &str,
    body: &str,
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path(format!("/raw/{name}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(delay)
                .set_body_raw(body.to_string(), "text/plain; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[derive(Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
