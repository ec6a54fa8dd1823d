//! Client core for a REST collection of clothing items.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), validates form input before
//! any write, renders records to escaped markup, and drives the list, detail,
//! and form pages through the `Transport` and `View` seams.
//!
//! # Design
//! - `ClothingClient` is stateless; it holds only the collection URL.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit; `*_via` methods join them over a `Transport`.
//! - Local pages never cache records: every page load and every successful
//!   mutation goes back to the backend or drops the local copy.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod page;
pub mod render;
pub mod route;
pub mod types;
pub mod validation;

pub use client::ClothingClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notify::{Notification, Severity};
pub use page::{
    ActionOutcome, Control, ControlState, DetailController, FormController, FormMode, ListController,
    PageContext, PageError, PageState, SubmitOutcome, View,
};
pub use render::{escape_attr, escape_html, CurrencyFormat, Renderer};
pub use route::{query_id, Route};
pub use types::{Candidate, ClothingItem, ItemDraft, ItemForm, ItemId, Size, SizeLabel};
pub use validation::validate;
