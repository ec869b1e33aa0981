//! Configuration-driven screens
//!
//! Record types that need no hand-written surface are described by a
//! [`ScreenConfig`] in the static registry. One list, form and view implementation
//! serves all of them; what differs per screen (cascading fields, submission
//! gates) comes from the [`behavior`] table keyed by screen key.

pub mod behavior;
pub mod config;
pub mod form;
pub mod list;
pub mod record;
pub mod registry;
pub mod view;

pub use config::{Field, InputType, ScreenConfig, SelectOption};
pub use form::ScreenForm;
pub use list::ScreenList;
pub use record::Record;
pub use registry::{screen, screens};
pub use view::ScreenView;

use od_http::HttpClient;
use thiserror::Error;
use tracing::{error, info};

use crate::messages;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
	#[error("unknown screen `{0}`")]
	UnknownScreen(String),
}

impl ScreenError {
	pub fn message(&self) -> &'static str {
		match self {
			Self::UnknownScreen(_) => messages::SCREEN_CONFIG_FAILED,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
	List,
	New,
	Edit(i64),
	View(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRoute {
	pub key: String,
	pub mode: RouteMode,
}

impl ScreenRoute {
	pub fn new(key: impl Into<String>, mode: RouteMode) -> Self {
		Self {
			key: key.into(),
			mode,
		}
	}
}

#[derive(Debug)]
pub enum ScreenState {
	List(ScreenList),
	Form(ScreenForm),
	View(ScreenView),
}

/// An opened screen. Navigating to another key means opening a new one.
#[derive(Debug)]
pub struct Screen {
	pub config: &'static ScreenConfig,
	pub state: ScreenState,
}

impl Screen {
	/// Resolves the route's config and builds the state for its mode. An unknown key
	/// fails before any request is made.
	pub async fn open(
		client: &dyn HttpClient,
		route: &ScreenRoute,
		page_size: usize,
	) -> Result<Self, ScreenError> {
		let Some(config) = registry::screen(&route.key) else {
			error!(key = %route.key, "Screen is not registered");
			return Err(ScreenError::UnknownScreen(route.key.clone()));
		};

		info!(screen = config.key, mode = ?route.mode, "Opening screen");

		let state = match route.mode {
			RouteMode::List => {
				ScreenState::List(ScreenList::open(client, config, page_size).await)
			}
			RouteMode::New => ScreenState::Form(ScreenForm::open(client, config, None).await),
			RouteMode::Edit(id) => {
				ScreenState::Form(ScreenForm::open(client, config, Some(id)).await)
			}
			RouteMode::View(id) => ScreenState::View(ScreenView::open(client, config, id).await),
		};

		Ok(Self { config, state })
	}
}
