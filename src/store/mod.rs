//! Local persistence: domain models, the file-backed cache, and paths.
//!
//! The cache mirrors remote state for operations that succeeded while
//! online and is the sole data source while offline. It never expires or
//! evicts entries on its own.

mod cache;
mod models;
pub mod paths;
pub mod util;


pub use cache::CacheStore;
pub use models::{Board, Column, Id, Task, TaskPatch};
