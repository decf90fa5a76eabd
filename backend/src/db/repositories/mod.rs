//! Known-set repository implementations:
//! - `file`: JSON file with atomic replacement, used by the CLI
//! - `local`: in-memory implementation for unit testing and dry runs
pub mod file;
pub mod local;

pub use file::{FileStateRepository, STATE_FILE_NAME};
pub use local::LocalStateRepository;
