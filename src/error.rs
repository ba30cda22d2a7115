//! Error taxonomy for the restform client.
//!
//! Validation failures are deliberately absent here: a response that carries
//! an `errors` key is a successful round-trip whose outcome is a re-render,
//! not an error. See [`crate::schema::Descriptor::has_errors`].

use reqwest::Method;
use thiserror::Error;

use crate::schema::SchemaError;

pub type RestformResult<T> = Result<T, RestformError>;

#[derive(Debug, Error)]
pub enum RestformError {
	/// The server answered with a status outside {200, 201, 202}.
	///
	/// The display form matches the alert text shown to the user.
	#[error("{method}: {url} failed")]
	RequestFailed {
		method: Method,
		url: String,
		status: u16,
	},

	#[error("HTTP transport error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Query string error: {0}")]
	Query(#[from] serde_urlencoded::ser::Error),

	/// An item operation ran without an `id` path parameter in the active
	/// route, or a create response carried no id to navigate to.
	#[error("no resource id available")]
	MissingId,

	#[error(transparent)]
	Schema(#[from] SchemaError),
}

impl RestformError {
	/// Returns true for the non-2xx-status failure kind.
	pub fn is_request_failed(&self) -> bool {
		matches!(self, RestformError::RequestFailed { .. })
	}
}
