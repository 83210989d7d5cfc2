use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use folio_core::{Effect, Msg};
use folio_engine::{EngineEvent, EngineHandle, FetchSettings, LoaderSettings, Stage};
use folio_logging::{folio_debug, folio_info, folio_warn};

/// Executes core effects on the engine and forwards engine events back as messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(fetch: FetchSettings, settings: LoaderSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = Arc::new(EngineHandle::new(fetch, settings));
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartLoad { load_id, source } => {
                    folio_info!("StartLoad load_id={} source={}", load_id, source);
                    self.engine.start_load(load_id, source);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(50)) else {
                continue;
            };
            let msg = match event {
                EngineEvent::Progress(progress) => {
                    folio_debug!(
                        "Load {} {}{}",
                        progress.load_id,
                        stage_label(progress.stage),
                        progress
                            .documents
                            .map(|n| format!(" ({n} documents)"))
                            .unwrap_or_default()
                    );
                    continue;
                }
                EngineEvent::LoadCompleted {
                    load_id,
                    source,
                    result,
                } => {
                    if let Err(err) = &result {
                        folio_warn!("Load {} for {} failed: {}", load_id, source, err);
                    }
                    Msg::LoadFinished {
                        load_id,
                        source,
                        result: result.map_err(|err| err.to_string()),
                    }
                }
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        });
    }
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Listing => "listing",
        Stage::Downloading => "downloading",
        Stage::Parsing => "parsing",
        Stage::Done => "done",
    }
}
