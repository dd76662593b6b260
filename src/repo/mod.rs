//! Offline-first repositories, one instantiation per entity type.

mod repository;
mod resource;


pub use repository::Repository;
pub use resource::Resource;
