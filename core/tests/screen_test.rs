use od_core::{
	messages,
	screen::{
		RouteMode, Screen, ScreenError, ScreenForm, ScreenRoute, ScreenState, ScreenView,
		SelectOption,
	},
	Navigation,
};
use od_http::{
	testing::{FakeBackend, Reply},
	Method,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tracing_test::traced_test;

fn config(key: &str) -> &'static od_core::screen::ScreenConfig {
	od_core::screen::screen(key).unwrap()
}

fn echo_body(backend: &FakeBackend, method: Method, path: &str) {
	backend.on_with(method, path, |request| {
		Reply::Json(request.body.clone().unwrap_or(Value::Null))
	});
}

fn writes(backend: &FakeBackend) -> usize {
	backend
		.calls()
		.iter()
		.filter(|request| matches!(request.method, Method::Post | Method::Put))
		.count()
}

fn claro_sites(backend: &FakeBackend) {
	backend.on(Method::Get, "/api/claro-sites/all", Reply::Json(json!([
		{ "id": 7, "siteName": "North Tower", "address": { "id": 31 } },
		{ "id": 8, "siteCode": "S-08", "addressId": 32 }
	])));
}

#[tokio::test]
#[traced_test]
async fn test_unknown_screen_is_fatal() {
	let backend = FakeBackend::new();

	let err = Screen::open(
		backend.client().as_ref(),
		&ScreenRoute::new("nope", RouteMode::List),
		10,
	)
	.await
	.unwrap_err();

	assert_eq!(err, ScreenError::UnknownScreen("nope".to_string()));
	assert_eq!(err.message(), messages::SCREEN_CONFIG_FAILED);
	assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_list_mode_uses_listed_columns() {
	let backend = FakeBackend::new();
	backend.on(Method::Get, "/api/clients", Reply::Json(json!({
		"content": [{
			"id": 1,
			"name": "Acme",
			"document": "123",
			"email": "a@acme.io",
			"phone": "555"
		}],
		"page": { "size": 10, "totalElements": 1, "totalPages": 1, "number": 0 }
	})));

	let screen = Screen::open(
		backend.client().as_ref(),
		&ScreenRoute::new("clients", RouteMode::List),
		10,
	)
	.await
	.unwrap();

	let ScreenState::List(list) = screen.state else {
		panic!("expected a list");
	};
	let columns = list.columns().iter().map(|field| field.key).collect::<Vec<_>>();

	assert_eq!(columns, vec!["name", "document", "email", "phone"]);
	assert_eq!(list.rows(), vec![vec!["Acme", "123", "a@acme.io", "555"]]);
	assert_eq!(list.state.total_items, 1);
}

#[tokio::test]
#[traced_test]
async fn test_site_type_is_matched_ignoring_case() {
	let backend = FakeBackend::new();
	claro_sites(&backend);
	let client = backend.client();

	let mut form = ScreenForm::open(client.as_ref(), config("contract-registrations"), None).await;
	assert!(backend.calls().is_empty());

	form.update_field(client.as_ref(), "siteType", json!("Claro")).await;
	assert_eq!(backend.calls_to(Method::Get, "/api/claro-sites/all"), 1);
	assert_eq!(
		form.options_for("site"),
		vec![SelectOption::new("7", "North Tower"), SelectOption::new("8", "S-08")]
	);

	let calls = backend.calls().len();
	form.update_field(client.as_ref(), "siteType", json!("OI")).await;
	assert!(form.site_options.is_empty());
	assert_eq!(backend.calls().len(), calls);
}

#[tokio::test]
async fn test_site_selection_back_fills_ids() {
	let backend = FakeBackend::new();
	claro_sites(&backend);
	let client = backend.client();

	let mut form = ScreenForm::open(client.as_ref(), config("contract-registrations"), None).await;
	form.update_field(client.as_ref(), "siteType", json!("CLARO")).await;

	form.update_field(client.as_ref(), "site", json!("7")).await;
	assert_eq!(form.draft.get("siteId"), Some(&json!(7)));
	assert_eq!(form.draft.get("addressId"), Some(&json!(31)));

	form.update_field(client.as_ref(), "site", json!("8")).await;
	assert_eq!(form.draft.get("siteId"), Some(&json!(8)));
	assert_eq!(form.draft.get("addressId"), Some(&json!(32)));
}

#[tokio::test]
#[traced_test]
async fn test_ticket_without_projects_is_gated() {
	let backend = FakeBackend::new();
	backend.on(Method::Get, "/api/projects/all", Reply::Json(json!([])));
	let client = backend.client();

	let mut form = ScreenForm::open(client.as_ref(), config("tickets"), None).await;
	form.draft.set("projectId", json!(1));
	form.draft.set("title", json!("Antenna down"));

	assert_eq!(form.submit(client.as_ref()).await, None);
	assert_eq!(form.error, Some("Complete the prerequisite records before proceeding."));
	assert_eq!(writes(&backend), 0);
}

#[tokio::test]
async fn test_required_fields_checked_before_create() {
	let backend = FakeBackend::new();
	claro_sites(&backend);
	echo_body(&backend, Method::Post, "/api/contract-registrations");
	let client = backend.client();

	let mut form = ScreenForm::open(client.as_ref(), config("contract-registrations"), None).await;
	form.update_field(client.as_ref(), "siteType", json!("claro")).await;
	form.update_field(client.as_ref(), "site", json!("7")).await;
	form.update_field(client.as_ref(), "contractNumber", json!("CN-1")).await;
	form.update_field(client.as_ref(), "clientName", json!("Acme")).await;

	assert_eq!(form.submit(client.as_ref()).await, None);
	assert_eq!(form.error, Some(messages::REQUIRED_FIELDS_MISSING));
	assert_eq!(writes(&backend), 0);

	form.update_field(client.as_ref(), "startDate", json!("2026-01-01")).await;
	assert_eq!(
		form.submit(client.as_ref()).await,
		Some(Navigation::to("/contract-registrations"))
	);
	assert_eq!(form.error, None);
	assert_eq!(backend.calls_to(Method::Post, "/api/contract-registrations"), 1);
}

#[tokio::test]
#[traced_test]
async fn test_project_selection_prefills_ticket() {
	let backend = FakeBackend::new();
	backend
		.on(Method::Get, "/api/projects/all", Reply::Json(json!([
			{ "id": 3, "projectName": "Backbone" },
			{ "id": 4, "projectName": "" }
		])))
		.on(Method::Get, "/api/projects/3", Reply::Json(json!({
			"id": 3,
			"projectName": "Backbone",
			"address": { "id": 31 }
		})))
		.on(Method::Get, "/api/projects/3/contract", Reply::Json(json!({
			"contractNumber": "CN-9",
			"clientName": null,
			"siteType": "TIM",
			"siteId": 12
		})));
	let client = backend.client();

	let mut form = ScreenForm::open(client.as_ref(), config("tickets"), None).await;
	assert_eq!(
		form.options_for("projectId"),
		vec![SelectOption::new("3", "Backbone"), SelectOption::new("4", "4")]
	);

	form.update_field(client.as_ref(), "clientName", json!("Typed by hand")).await;
	form.update_field(client.as_ref(), "projectId", json!("3")).await;

	assert_eq!(form.draft.text("projectName"), "Backbone");
	assert_eq!(form.draft.get("addressId"), Some(&json!(31)));
	assert_eq!(form.draft.text("contractNumber"), "CN-9");
	assert_eq!(form.draft.text("clientName"), "Typed by hand");
	assert_eq!(form.draft.text("siteType"), "TIM");
	assert_eq!(form.draft.get("siteId"), Some(&json!(12)));
	assert_eq!(form.error, None);
}

#[tokio::test]
#[traced_test]
async fn test_prefill_survives_missing_contract() {
	let backend = FakeBackend::new();
	backend
		.on(
			Method::Get,
			"/api/projects/all",
			Reply::Json(json!([{ "id": 3, "projectName": "Backbone" }])),
		)
		.on(
			Method::Get,
			"/api/projects/3",
			Reply::Json(json!({ "id": 3, "projectName": "Backbone" })),
		);
	let client = backend.client();

	let mut form = ScreenForm::open(client.as_ref(), config("billings"), None).await;
	form.update_field(client.as_ref(), "projectId", json!(3)).await;

	assert_eq!(form.draft.text("projectName"), "Backbone");
	assert_eq!(form.draft.get("contractNumber"), Some(&json!("")));
	assert_eq!(form.error, Some(messages::RELATIONS_FAILED));
	assert_eq!(backend.calls_to(Method::Get, "/api/projects/3"), 1);
	assert_eq!(backend.calls_to(Method::Get, "/api/projects/3/contract"), 1);
}

#[tokio::test]
#[traced_test]
async fn test_edit_merges_over_blank_draft() {
	let backend = FakeBackend::new();
	backend.on(Method::Get, "/api/clients/4", Reply::Json(json!({ "id": 4, "name": "Acme" })));
	backend.on(Method::Put, "/api/clients/4", Reply::Status(500));
	let client = backend.client();

	let screen = Screen::open(
		client.as_ref(),
		&ScreenRoute::new("clients", RouteMode::Edit(4)),
		10,
	)
	.await
	.unwrap();
	let ScreenState::Form(mut form) = screen.state else {
		panic!("expected a form");
	};

	assert!(form.is_edit);
	assert_eq!(form.title(), "Edit Client");
	assert_eq!(form.draft.text("name"), "Acme");
	assert_eq!(form.draft.get("document"), Some(&json!("")));
	assert_eq!(form.draft.get("phone"), Some(&json!("")));

	form.update_field(client.as_ref(), "document", json!("99")).await;
	assert_eq!(form.submit(client.as_ref()).await, None);
	assert_eq!(form.error, Some("Failed to update record."));
	assert_eq!(form.draft.text("document"), "99");
	assert_eq!(backend.calls_to(Method::Put, "/api/clients/4"), 1);
}

#[tokio::test]
async fn test_edit_reloads_sites_for_stored_type() {
	let backend = FakeBackend::new();
	claro_sites(&backend);
	backend.on(Method::Get, "/api/contract-registrations/2", Reply::Json(json!({
		"id": 2,
		"contractNumber": "CN-2",
		"siteType": "claro",
		"site": "7"
	})));

	let client = backend.client();
	let form = ScreenForm::open(client.as_ref(), config("contract-registrations"), Some(2)).await;

	assert_eq!(form.site_options.len(), 2);
	assert_eq!(form.error, None);
}

#[test]
fn test_optional_fields_toggle() {
	let mut form = ScreenForm::new(config("tickets"));
	let visible = |form: &ScreenForm| {
		form.visible_fields()
			.iter()
			.any(|field| field.key == "description")
	};

	assert!(!visible(&form));
	assert!(form.toggle_optional("description"));
	assert!(visible(&form));
	assert!(!form.toggle_optional("description"));
	assert!(!visible(&form));

	assert!(!form.toggle_optional("title"));
	assert!(form.visible_fields().iter().any(|field| field.key == "title"));
}

#[tokio::test]
#[traced_test]
async fn test_view_mode() {
	let backend = FakeBackend::new();
	backend.on(Method::Get, "/api/tim-sites/5", Reply::Json(json!({
		"id": 5,
		"siteCode": "T-5",
		"siteName": "Hill",
		"city": "Recife"
	})));
	let client = backend.client();

	let view = ScreenView::open(client.as_ref(), config("tim-sites"), 5).await;
	assert_eq!(view.title(), "TIM Site Details");
	assert_eq!(
		view.rows(),
		vec![
			("Site code", "T-5".to_string()),
			("Site name", "Hill".to_string()),
			("Address", String::new()),
			("City", "Recife".to_string()),
			("State", String::new()),
		]
	);

	let missing = ScreenView::open(client.as_ref(), config("tim-sites"), 6).await;
	assert_eq!(missing.record, None);
	assert!(!missing.loading);
	assert_eq!(missing.error, Some("Failed to load record."));
}
