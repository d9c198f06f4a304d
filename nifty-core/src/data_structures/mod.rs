pub mod events;
pub mod metadata;

pub use events::*;
pub use metadata::*;
