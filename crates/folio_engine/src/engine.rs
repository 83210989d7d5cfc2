use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use folio_core::{ContentSource, LoadId};
use folio_logging::folio_error;

use crate::fetch::{ChannelProgressSink, FetchSettings, Fetcher, ReqwestFetcher};
use crate::loader::{BlogLoader, LoaderSettings};
use crate::EngineEvent;

enum EngineCommand {
    Load {
        load_id: LoadId,
        source: ContentSource,
    },
}

/// Runs loads on a background tokio runtime and hands results back over a channel.
///
/// Superseded loads are not cancelled; their completions still arrive and are
/// expected to be discarded by the consumer.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(fetch: FetchSettings, settings: LoaderSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(fetch)), settings)
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, settings: LoaderSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let loader = BlogLoader::new(fetcher, settings);

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    folio_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let loader = loader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&loader, command, event_tx).await;
                });
            }
            // Let loads already in flight report before the runtime drops.
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn start_load(&self, load_id: LoadId, source: ContentSource) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Load { load_id, source });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    loader: &BlogLoader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load { load_id, source } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = loader.load(load_id, &source, &sink).await;
            let _ = event_tx.send(EngineEvent::LoadCompleted {
                load_id,
                source,
                result,
            });
        }
    }
}
