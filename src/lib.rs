//! Client for schema-driven REST forms
//!
//! The server convention is DRF-style: OPTIONS on a resource describes (and
//! validates) its form as a field schema, POST/PATCH/DELETE write, GET
//! lists. This crate provides the client half:
//! - A tagged field schema model (`Leaf`/`Group`) with a programmatic
//!   builder
//! - A schema walk turning live form state into a values payload
//! - A strict JSON transport (statuses {200, 201, 202} only)
//! - A CRUD controller that validates over OPTIONS first and either
//!   re-renders (validation errors) or navigates (success)
//!
//! Rendering, routing, and prompts stay behind [`context`] traits injected
//! at construction; no ambient application global.
//!
//! ```no_run
//! use restform::{ClientConfig, ResourceController, RestClient};
//! use restform::context::RecordingContext;
//! use restform::form::MemoryForm;
//! use std::sync::Arc;
//!
//! # async fn run() -> restform::RestformResult<()> {
//! let client = RestClient::new(ClientConfig::new("http://127.0.0.1:8080/api"))?;
//! let shell = Arc::new(RecordingContext::new());
//! let context = shell.clone().into_app_context(Arc::new(MemoryForm::new()));
//!
//! let mut widgets = ResourceController::new("widget", client, context);
//! widgets.create().await?;
//! widgets.create_save().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod context;
pub mod controller;
pub mod error;
pub mod form;
pub mod schema;
pub mod values;

pub use client::{ClientConfig, RestClient};
pub use context::{AppContext, Navigator, Prompter, Renderer};
pub use controller::ResourceController;
pub use error::{RestformError, RestformResult};
pub use form::{FormSource, MemoryForm, fields_values};
pub use schema::{Descriptor, Field, GroupField, LeafField, Schema, SchemaError};
pub use values::{FormValue, ValuesMap};
