pub mod collection;
pub mod crypto;
pub mod data_structures;
pub mod receiver;
pub mod types;
pub mod utils;

pub use collection::*;
pub use crypto::*;
pub use data_structures::*;
pub use receiver::*;
pub use types::*;
