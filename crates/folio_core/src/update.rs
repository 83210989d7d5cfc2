use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourceChanged(source) => {
            // Same tuple as the one being shown or loaded: nothing to refetch.
            if state.source() == Some(&source) {
                return (state, Vec::new());
            }
            let load_id = state.begin_load(source.clone());
            vec![Effect::StartLoad { load_id, source }]
        }
        Msg::ReloadRequested => match state.source().cloned() {
            Some(source) => {
                let load_id = state.begin_load(source.clone());
                vec![Effect::StartLoad { load_id, source }]
            }
            None => Vec::new(),
        },
        Msg::LoadFinished {
            load_id,
            source,
            result,
        } => {
            if state.is_current(load_id, &source) {
                state.finish_load(result);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
