//! Application context: the seams the controller drives instead of touching
//! a window-global application object.
//!
//! Rendering, navigation, and user prompts stay behind traits so the
//! controller can run against a browser shell, a desktop shell, or the
//! recording double below.

use crate::form::FormSource;
use crate::schema::Descriptor;
use parking_lot::Mutex;
use std::sync::Arc;

/// Template re-render of the current descriptor.
pub trait Renderer: Send + Sync {
	fn render(&self, descriptor: &Descriptor);
}

/// Router seam. Route names follow the `{singular}_{action}` convention,
/// e.g. `widget_retrieve`.
pub trait Navigator: Send + Sync {
	fn go(&self, route: &str, id: Option<&str>);

	/// The `id` path parameter of the active route, if any.
	fn current_id(&self) -> Option<String>;
}

/// Interactive confirmation and failure surfacing.
pub trait Prompter: Send + Sync {
	fn confirm(&self, message: &str) -> bool;

	fn alert(&self, message: &str);
}

/// Everything a controller needs from its host, injected at construction.
#[derive(Clone)]
pub struct AppContext {
	pub form: Arc<dyn FormSource>,
	pub renderer: Arc<dyn Renderer>,
	pub navigator: Arc<dyn Navigator>,
	pub prompter: Arc<dyn Prompter>,
}

impl AppContext {
	pub fn new(
		form: Arc<dyn FormSource>,
		renderer: Arc<dyn Renderer>,
		navigator: Arc<dyn Navigator>,
		prompter: Arc<dyn Prompter>,
	) -> Self {
		Self {
			form,
			renderer,
			navigator,
			prompter,
		}
	}
}

/// Context double that records renders, navigations, and alerts, with a
/// scripted confirm answer. Implements all three context traits so one
/// `Arc<RecordingContext>` can serve a whole [`AppContext`].
pub struct RecordingContext {
	renders: Mutex<Vec<Descriptor>>,
	navigations: Mutex<Vec<(String, Option<String>)>>,
	alerts: Mutex<Vec<String>>,
	confirm_answer: Mutex<bool>,
	route_id: Mutex<Option<String>>,
}

impl Default for RecordingContext {
	fn default() -> Self {
		Self::new()
	}
}

impl RecordingContext {
	/// Fresh double; confirmations answer `true` until scripted otherwise.
	pub fn new() -> Self {
		Self {
			renders: Mutex::new(Vec::new()),
			navigations: Mutex::new(Vec::new()),
			alerts: Mutex::new(Vec::new()),
			confirm_answer: Mutex::new(true),
			route_id: Mutex::new(None),
		}
	}

	/// Build an [`AppContext`] over this double and the given form.
	pub fn into_app_context(self: Arc<Self>, form: Arc<dyn FormSource>) -> AppContext {
		AppContext::new(form, self.clone(), self.clone(), self)
	}

	/// Script the answer future `confirm` calls will get.
	pub fn answer_confirm(&self, answer: bool) {
		*self.confirm_answer.lock() = answer;
	}

	/// Set the `id` path parameter of the simulated active route.
	pub fn set_route_id(&self, id: impl Into<String>) {
		*self.route_id.lock() = Some(id.into());
	}

	pub fn renders(&self) -> Vec<Descriptor> {
		self.renders.lock().clone()
	}

	pub fn navigations(&self) -> Vec<(String, Option<String>)> {
		self.navigations.lock().clone()
	}

	pub fn alerts(&self) -> Vec<String> {
		self.alerts.lock().clone()
	}
}

impl Renderer for RecordingContext {
	fn render(&self, descriptor: &Descriptor) {
		self.renders.lock().push(descriptor.clone());
	}
}

impl Navigator for RecordingContext {
	fn go(&self, route: &str, id: Option<&str>) {
		self.navigations
			.lock()
			.push((route.to_string(), id.map(str::to_string)));
	}

	fn current_id(&self) -> Option<String> {
		self.route_id.lock().clone()
	}
}

impl Prompter for RecordingContext {
	fn confirm(&self, _message: &str) -> bool {
		*self.confirm_answer.lock()
	}

	fn alert(&self, message: &str) {
		self.alerts.lock().push(message.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::form::MemoryForm;

	#[test]
	fn recording_context_captures_calls() {
		let recording = Arc::new(RecordingContext::new());
		let context = recording.clone().into_app_context(Arc::new(MemoryForm::new()));

		context.renderer.render(&Descriptor::default());
		context.navigator.go("widget_list", None);
		context.prompter.alert("GET: /api/widget failed");
		recording.answer_confirm(false);

		assert_eq!(recording.renders().len(), 1);
		assert_eq!(recording.navigations(), vec![("widget_list".to_string(), None)]);
		assert_eq!(recording.alerts(), vec!["GET: /api/widget failed".to_string()]);
		assert!(!context.prompter.confirm("Are you sure?"));
	}
}
