//! The resource controller: translates a server-described field schema into
//! form values, submits them via typed REST verbs, and decides between
//! re-render (validation errors) and navigation (success).
//!
//! Every operation is one atomic outcome: fetch, then exactly one of
//! render-error, render-success, or navigate. `&mut self` keeps actions
//! sequential; no concurrent in-flight requests exist per controller.

use crate::client::RestClient;
use crate::context::AppContext;
use crate::error::{RestformError, RestformResult};
use crate::form;
use crate::schema::Descriptor;
use crate::values::ValuesMap;
use reqwest::Method;
use serde_json::Value;

/// CRUD controller for one REST resource.
///
/// The `singular` name keys request and response payloads (the convention's
/// `{"widget": {...}}` envelope) and prefixes route names
/// (`widget_retrieve`, `widget_list`).
pub struct ResourceController {
	singular: String,
	client: RestClient,
	context: AppContext,
	it: Option<Descriptor>,
}

impl ResourceController {
	pub fn new(singular: impl Into<String>, client: RestClient, context: AppContext) -> Self {
		Self {
			singular: singular.into(),
			client,
			context,
			it: None,
		}
	}

	pub fn singular(&self) -> &str {
		&self.singular
	}

	/// The descriptor driving the current view, if any fetch has run.
	pub fn descriptor(&self) -> Option<&Descriptor> {
		self.it.as_ref()
	}

	/// Collection URL, with a query string when `params` is non-empty.
	pub fn url(&self, params: &[(&str, &str)]) -> RestformResult<String> {
		self.client.collection_url(&self.singular, params)
	}

	/// Item URL for the active route's `id` path parameter.
	pub fn id_url(&self) -> RestformResult<String> {
		let id = self
			.context
			.navigator
			.current_id()
			.ok_or(RestformError::MissingId)?;
		Ok(self.client.item_url(&self.singular, &id))
	}

	/// Render the landing view from the current descriptor, no fetch.
	pub fn home(&self) {
		let empty = Descriptor::default();
		self.context
			.renderer
			.render(self.it.as_ref().unwrap_or(&empty));
	}

	/// GET the collection, store it, render.
	pub async fn list(&mut self) -> RestformResult<()> {
		let url = self.url(&[])?;
		let body = self.fetch(Method::GET, &url, None).await?;
		self.assign(body)?;
		self.render_current();
		Ok(())
	}

	/// OPTIONS the collection with current form values, store, render.
	/// This is the dependent-field refresh: trigger fields re-drive the
	/// schema so the server can grow or shrink the field set.
	pub async fn fields_change(&mut self) -> RestformResult<()> {
		let request = self.fields_request()?;
		let url = self.url(&[])?;
		let body = self.fetch(Method::OPTIONS, &url, Some(&request)).await?;
		self.assign(body)?;
		self.render_current();
		Ok(())
	}

	/// OPTIONS the collection for a fresh create form, store, render.
	pub async fn create(&mut self) -> RestformResult<()> {
		let url = self.url(&[])?;
		let body = self.fetch(Method::OPTIONS, &url, None).await?;
		self.assign(body)?;
		self.render_current();
		Ok(())
	}

	/// Validate over OPTIONS, then POST and navigate to retrieve.
	///
	/// A response carrying an `errors` key re-renders instead of writing,
	/// so repeated calls with unchanged invalid input never create a
	/// resource. On success the new id is taken from the POST response
	/// under the singular key.
	pub async fn create_save(&mut self) -> RestformResult<()> {
		let request = self.fields_request()?;
		let url = self.url(&[])?;
		let body = self.fetch(Method::OPTIONS, &url, Some(&request)).await?;
		self.assign(body)?;
		if self.has_errors() {
			self.render_current();
			return Ok(());
		}
		let created = self.fetch(Method::POST, &url, Some(&request)).await?;
		let id = resource_id(&created, &self.singular).ok_or(RestformError::MissingId)?;
		self.go("retrieve", Some(&id));
		Ok(())
	}

	/// OPTIONS the item URL for the retrieve view, store, render.
	pub async fn retrieve(&mut self) -> RestformResult<()> {
		let url = self.id_url()?;
		let body = self.fetch(Method::OPTIONS, &url, None).await?;
		self.assign(body)?;
		self.render_current();
		Ok(())
	}

	/// OPTIONS the item URL for the update form, store, render.
	pub async fn update(&mut self) -> RestformResult<()> {
		let url = self.id_url()?;
		let body = self.fetch(Method::OPTIONS, &url, None).await?;
		self.assign(body)?;
		self.render_current();
		Ok(())
	}

	/// Validate over OPTIONS on the item URL, then PATCH and navigate back
	/// to retrieve for the already-known id. The PATCH body is discarded.
	pub async fn update_save(&mut self) -> RestformResult<()> {
		let request = self.fields_request()?;
		let url = self.id_url()?;
		let body = self.fetch(Method::OPTIONS, &url, Some(&request)).await?;
		self.assign(body)?;
		if self.has_errors() {
			self.render_current();
			return Ok(());
		}
		self.fetch(Method::PATCH, &url, Some(&request)).await?;
		let id = self
			.context
			.navigator
			.current_id()
			.ok_or(RestformError::MissingId)?;
		self.go("retrieve", Some(&id));
		Ok(())
	}

	/// Confirm, DELETE the item, navigate to the list. A declined
	/// confirmation issues zero network calls.
	pub async fn delete(&mut self) -> RestformResult<()> {
		if !self.context.prompter.confirm("Are you sure?") {
			return Ok(());
		}
		let url = self.id_url()?;
		self.fetch(Method::DELETE, &url, None).await?;
		self.go("list", None);
		Ok(())
	}

	/// Walk the current descriptor's schema against the live form.
	pub fn fields_values(&self) -> ValuesMap {
		match &self.it {
			Some(it) => form::fields_values(self.context.form.as_ref(), &[], &it.fields),
			None => ValuesMap::new(),
		}
	}

	/// Wrap the walked values under the singular name, the shape every
	/// write request carries.
	pub fn fields_request(&self) -> RestformResult<Value> {
		let mut request = serde_json::Map::new();
		request.insert(self.singular.clone(), serde_json::to_value(self.fields_values())?);
		Ok(Value::Object(request))
	}

	/// Issue one request, surfacing a non-2xx failure as a user alert
	/// before propagating it. Validation responses are not failures and
	/// never reach this path's error branch.
	async fn fetch(
		&self,
		method: Method,
		url: &str,
		body: Option<&Value>,
	) -> RestformResult<Value> {
		match self.client.rest(method, url, body).await {
			Ok(body) => Ok(body),
			Err(err) if err.is_request_failed() => {
				self.context.prompter.alert(&err.to_string());
				Err(err)
			}
			Err(err) => Err(err),
		}
	}

	fn assign(&mut self, body: Value) -> RestformResult<()> {
		self.it = Some(serde_json::from_value(body)?);
		Ok(())
	}

	fn has_errors(&self) -> bool {
		self.it.as_ref().is_some_and(Descriptor::has_errors)
	}

	fn render_current(&self) {
		if let Some(it) = &self.it {
			self.context.renderer.render(it);
		}
	}

	fn go(&self, action: &str, id: Option<&str>) {
		let route = format!("{}_{}", self.singular, action);
		tracing::debug!(route = %route, id = ?id, "navigate");
		self.context.navigator.go(&route, id);
	}
}

fn resource_id(body: &Value, singular: &str) -> Option<String> {
	match body.get(singular)?.get("id")? {
		Value::String(id) => Some(id.clone()),
		Value::Number(id) => Some(id.to_string()),
		_ => None,
	}
}
