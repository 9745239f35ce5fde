//! Client core for the hosted todo API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and layers on top of that a
//! sync loop that mirrors the remote collection in an owned cache and
//! re-renders a view model after every change.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. `SyncLoop` crosses it through a `Transport`.
//! - Responses are `{ data: ... }` envelopes; see [`envelope`].
//! - Rendering is pure (`render::render`), HTML is a separate step.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod cache;
pub mod client;
pub mod due;
pub mod envelope;
pub mod error;
pub mod form;
pub mod html;
pub mod http;
pub mod render;
pub mod sync;
pub mod types;

pub use cache::TodoCache;
pub use client::{TodoClient, DEFAULT_BASE_URL};
pub use envelope::Envelope;
pub use error::{ApiError, Operation, SyncError, ValidationError};
pub use form::CreateForm;
pub use html::{render_html, HtmlView, Theme};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use render::{render, ListView, RowView, ViewModel};
pub use sync::{parse_id, Outcome, Prompter, SyncLoop};
pub use types::{CreateTodo, Priority, RecordFields, Todo, TodoId, UpdateFields, UpdateTodo};
