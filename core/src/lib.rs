//! Client core for a remote "users" REST collection.
//!
//! # Overview
//! `UsersClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `RemoteCollection`
//! pairs it with a `Transport` to perform exactly one round trip per call.
//! `UserScreen` is the list-and-form controller that native views bind to.
//!
//! # Design
//! - `UsersClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the FFI crate can expose it unchanged.
//! - Nothing is retried or cached across calls. `RemoteCollection::list`
//!   degrades to an empty vector on failure; `try_list` does not.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod remote;
pub mod screen;
pub mod snapshot;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::UsersClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use form::{FormMode, FormSession, Submission};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use remote::RemoteCollection;
pub use screen::{Notice, NoticeKind, UserScreen};
pub use snapshot::LocalSnapshot;
pub use transport::{Transport, UreqTransport};
pub use types::{User, UserInput};
