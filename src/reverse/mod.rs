//! Reverse search engine and the inversion problem built on top of it

pub mod error;
pub mod explorer;
pub mod problem;
pub mod solution;
pub mod validator;

mod reconstruct;
mod tree;

pub use error::InputError;
pub use explorer::SearchStatistics;
pub use problem::{
    reverse_hash, reverse_hash_with_statistics, InversionProblem, SearchSizeEstimate,
};
pub use solution::{Preimage, PreimageMetadata, PreimageSummary};
pub use validator::{PreimageValidator, ValidationResult};
