//! View-model: search filter, form drafts and the in-memory user list.

mod draft;
mod fallback;
mod list_state;
mod search;

pub use draft::*;
pub use fallback::*;
pub use list_state::*;
pub use search::*;
