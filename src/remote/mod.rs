//! The remote service boundary: an opaque request/response HTTP client.
//!
//! Per entity kind the server exposes:
//! - `GET /v1/<kind>` (boards) or `GET /v1/<kind>/from/{parentId}` (columns,
//!   tasks)
//! - `POST /v1/<kind>` -> created entity (the server may assign the id)
//! - `PUT /v1/<kind>/{id}` -> updated entity or bare confirmation
//! - `DELETE /v1/<kind>/{id}` -> deletion confirmation

mod client;
mod error;

pub use client::ApiClient;
pub use error::{RemoteError, RemoteResult};
