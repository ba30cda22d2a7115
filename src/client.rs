//! JSON REST transport.
//!
//! One request, one decoded body. The server convention is schema-driven
//! CRUD: OPTIONS describes (and validates) the form, POST/PATCH/DELETE
//! write, GET lists. Status handling is strict: anything outside
//! {200, 201, 202} is a [`RestformError::RequestFailed`].

use crate::error::{RestformError, RestformResult};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// API root, e.g. `http://127.0.0.1:8080/api`.
	pub api_root: String,

	/// Per-request timeout (default: 30 seconds).
	pub timeout: Duration,
}

impl ClientConfig {
	pub fn new(api_root: impl Into<String>) -> Self {
		Self {
			api_root: api_root.into(),
			timeout: Duration::from_secs(30),
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

/// Thin wrapper over [`reqwest::Client`] speaking the schema-driven CRUD
/// convention.
#[derive(Debug, Clone)]
pub struct RestClient {
	config: ClientConfig,
	client: reqwest::Client,
}

impl RestClient {
	pub fn new(config: ClientConfig) -> RestformResult<Self> {
		let client = reqwest::Client::builder().timeout(config.timeout).build()?;
		Ok(Self { config, client })
	}

	pub fn api_root(&self) -> &str {
		&self.config.api_root
	}

	/// Issue one JSON request and decode the response body.
	///
	/// GET sends no body; any other verb without a caller body sends `{}`,
	/// which the server convention expects from bodyless OPTIONS and
	/// DELETE. Statuses outside {200, 201, 202} come back as
	/// [`RestformError::RequestFailed`] carrying method, URL, and status.
	pub async fn rest(
		&self,
		method: Method,
		url: &str,
		body: Option<&Value>,
	) -> RestformResult<Value> {
		tracing::debug!(method = %method, url, "rest request");
		let mut request = self
			.client
			.request(method.clone(), url)
			.header(CONTENT_TYPE, "application/json");
		match body {
			Some(body) => request = request.json(body),
			None if method != Method::GET => request = request.json(&Value::Object(Default::default())),
			None => {}
		}

		let response = request.send().await?;
		let status = response.status().as_u16();
		if !matches!(status, 200 | 201 | 202) {
			tracing::debug!(method = %method, url, status, "rest request failed");
			return Err(RestformError::RequestFailed {
				method,
				url: url.to_string(),
				status,
			});
		}
		// PATCH and DELETE responses may carry no body at all
		let bytes = response.bytes().await?;
		if bytes.is_empty() {
			return Ok(Value::Null);
		}
		Ok(serde_json::from_slice(&bytes)?)
	}

	/// Collection URL for a resource, with an optional query string.
	pub fn collection_url(
		&self,
		singular: &str,
		params: &[(&str, &str)],
	) -> RestformResult<String> {
		let base = format!("{}/{}", self.config.api_root.trim_end_matches('/'), singular);
		if params.is_empty() {
			Ok(base)
		} else {
			Ok(format!("{}?{}", base, serde_urlencoded::to_string(params)?))
		}
	}

	/// Item URL: collection URL plus `/{id}`.
	pub fn item_url(&self, singular: &str, id: &str) -> String {
		format!(
			"{}/{}/{}",
			self.config.api_root.trim_end_matches('/'),
			singular,
			id
		)
	}

	/// Fetch the deployment group advertised at `{api_root}/group`, seeded
	/// once at application start.
	pub async fn fetch_group(&self) -> RestformResult<String> {
		let url = format!("{}/group", self.config.api_root.trim_end_matches('/'));
		let body = self.rest(Method::GET, &url, None).await?;
		Ok(body
			.get("group")
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string())
	}
}
