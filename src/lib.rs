//! Offline-first client for a kanban board service.
//!
//! Boards own ordered columns; columns own ordered tasks. Reads and writes
//! go to the remote service while the [`connectivity`] monitor reports
//! online, and to the file-backed [`store`] cache while offline; the cache
//! is kept in sync with every successful remote write. The [`ordering`]
//! module restores contiguous positions after a move, and [`workspace`]
//! fans the resulting updates out as independent, non-transactional writes.

pub mod cli;
pub mod connectivity;
pub mod ordering;
pub mod projection;
pub mod remote;
pub mod repo;
pub mod store;
pub mod workspace;
