//! Folio core: pure blog feed state machine and view-model helpers.
mod effect;
mod msg;
mod source;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use source::{ContentSource, InvalidSource, POST_EXTENSION};
pub use state::{AppState, BlogPost, LoadId, LoadState};
pub use update::update;
pub use view_model::{
    FeedPresentation, FeedViewModel, FALLBACK_ERROR, GUIDANCE_SUFFIX, POSTS_PER_PAGE,
};
