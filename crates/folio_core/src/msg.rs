#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The content host coordinates changed (or were set for the first time).
    SourceChanged(crate::ContentSource),
    /// User asked for a fresh load of the current coordinates.
    ReloadRequested,
    /// Engine completion for a load.
    LoadFinished {
        load_id: crate::LoadId,
        source: crate::ContentSource,
        result: Result<Vec<crate::BlogPost>, String>,
    },
    /// Render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
