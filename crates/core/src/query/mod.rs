//! Search query construction from show and episode descriptions.

mod builder;
mod naming;
mod types;

pub use builder::QueryBuilder;
pub use naming::{EpisodeNaming, SceneNaming};
pub use types::*;
