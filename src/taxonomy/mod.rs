//! Occupation taxonomy data model and loading.

pub mod loader;
pub mod types;

pub use loader::{load_programs, load_taxonomy, parse_programs, parse_taxonomy};
pub use types::{OccupationEntry, QueryRecord};
