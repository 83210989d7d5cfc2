#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the listing and every post for `source`, reporting back with `load_id`.
    StartLoad {
        load_id: crate::LoadId,
        source: crate::ContentSource,
    },
}
