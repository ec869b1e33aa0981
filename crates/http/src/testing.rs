//! In-memory backend for tests.
//!
//! Routes are matched on method and path only; query parameters are recorded and
//! can be inspected by responders. Unrouted requests answer `404`.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Client, Error, HttpClient, Method, Request};

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
	Json(Value),
	Status(u16),
}

type Responder = Arc<dyn Fn(&Request) -> Reply + Send + Sync>;

#[derive(Clone, Default)]
pub struct FakeBackend {
	routes: Arc<Mutex<HashMap<(Method, String), Responder>>>,
	calls: Arc<Mutex<Vec<Request>>>,
}

impl FakeBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
		self.on_with(method, path, move |_| reply.clone())
	}

	pub fn on_with(
		&self,
		method: Method,
		path: &str,
		responder: impl Fn(&Request) -> Reply + Send + Sync + 'static,
	) -> &Self {
		self.routes
			.lock()
			.insert((method, path.to_string()), Arc::new(responder));
		self
	}

	pub fn client(&self) -> Client {
		Arc::new(self.clone())
	}

	/// Every request received so far, in arrival order.
	pub fn calls(&self) -> Vec<Request> {
		self.calls.lock().clone()
	}

	pub fn calls_to(&self, method: Method, path: &str) -> usize {
		self.calls
			.lock()
			.iter()
			.filter(|r| r.method == method && r.path == path)
			.count()
	}
}

#[async_trait]
impl HttpClient for FakeBackend {
	async fn send(&self, request: Request) -> Result<Value, Error> {
		self.calls.lock().push(request.clone());

		let responder = self
			.routes
			.lock()
			.get(&(request.method, request.path.clone()))
			.cloned();

		let reply = match responder {
			Some(responder) => responder(&request),
			None => Reply::Status(404),
		};

		match reply {
			Reply::Json(value) => Ok(value),
			Reply::Status(status) => Err(Error::Status {
				method: request.method,
				url: request.path,
				status,
			}),
		}
	}
}
