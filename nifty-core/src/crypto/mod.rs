pub mod blake2b;
pub mod domain_separators;

pub use blake2b::*;
pub use domain_separators::*;
