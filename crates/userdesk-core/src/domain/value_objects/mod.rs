//! Value objects carried by the user entity.

mod directory;
mod metadata;
mod picture;

pub use directory::*;
pub use metadata::*;
pub use picture::*;
