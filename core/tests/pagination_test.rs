use std::sync::{Arc, Mutex};

use od_core::{
	entity::{owner, Owner, OWNERS},
	fetch_all, fetch_page,
	page::FETCH_ALL_FALLBACK_SIZE,
	screen::Record,
	ListState, Page, Resource,
};
use od_http::{
	testing::{FakeBackend, Reply},
	Method,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tracing_test::traced_test;

fn records(count: i64) -> Vec<Value> {
	(1..=count).map(|id| json!({ "id": id, "name": format!("Record {id}") })).collect()
}

fn ids<T: od_core::Entity>(items: &[T]) -> Vec<i64> {
	items.iter().filter_map(|item| item.id()).collect()
}

/// A backend that serves `path` as a bare array and deletes from it.
fn collection(backend: &FakeBackend, path: &str, items: Vec<Value>) -> Arc<Mutex<Vec<Value>>> {
	let store = Arc::new(Mutex::new(items));

	let rows = Arc::clone(&store);
	backend.on_with(Method::Get, path, move |_| {
		Reply::Json(Value::Array(rows.lock().unwrap().clone()))
	});

	for id in 1..=100 {
		let rows = Arc::clone(&store);
		backend.on_with(Method::Delete, &format!("{path}/{id}"), move |_| {
			rows.lock().unwrap().retain(|row| row["id"] != json!(id));
			Reply::Json(Value::Null)
		});
	}

	store
}

#[tokio::test]
#[traced_test]
async fn test_bare_array_is_sliced_and_clamped() {
	let backend = FakeBackend::new();
	backend.on(Method::Get, "/api/things", Reply::Json(Value::Array(records(25))));
	let client = backend.client();

	let page: Page<Record> = fetch_page(client.as_ref(), "/api/things", 2, 10).await.unwrap();
	assert_eq!(page.page_index, 2);
	assert_eq!(page.total_items, 25);
	assert_eq!(page.total_pages, 3);
	assert_eq!(ids(&page.items), vec![21, 22, 23, 24, 25]);

	let clamped: Page<Record> = fetch_page(client.as_ref(), "/api/things", 3, 10).await.unwrap();
	assert_eq!(clamped, page);

	let calls = backend.calls();
	let request = &calls[0];
	assert_eq!(request.query_param("page"), Some("2"));
	assert_eq!(request.query_param("size"), Some("10"));
}

#[tokio::test]
async fn test_empty_collection_is_consistent() {
	let backend = FakeBackend::new();
	backend.on(Method::Get, "/api/things", Reply::Json(json!([])));

	let page: Page<Record> = fetch_page(backend.client().as_ref(), "/api/things", 4, 10)
		.await
		.unwrap();

	assert_eq!(page, Page::empty(10));
}

#[tokio::test]
async fn test_both_envelope_shapes() {
	let backend = FakeBackend::new();
	backend
		.on(
			Method::Get,
			"/api/flat",
			Reply::Json(json!({
				"content": records(2),
				"totalElements": 12,
				"totalPages": 6,
				"size": 2,
				"number": 3
			})),
		)
		.on(
			Method::Get,
			"/api/nested",
			Reply::Json(json!({
				"content": records(2),
				"page": { "size": 2, "totalElements": 12, "totalPages": 6, "number": 3 }
			})),
		);
	let client = backend.client();

	let flat: Page<Record> = fetch_page(client.as_ref(), "/api/flat", 3, 2).await.unwrap();
	let nested: Page<Record> = fetch_page(client.as_ref(), "/api/nested", 3, 2).await.unwrap();

	assert_eq!(flat, nested);
	assert_eq!(flat.page_index, 3);
	assert_eq!(flat.total_items, 12);
	assert_eq!(flat.total_pages, 6);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_all_falls_back_to_one_large_page() {
	let backend = FakeBackend::new();
	backend
		.on(Method::Get, "/api/owners/all", Reply::Status(500))
		.on(Method::Get, "/api/owners", Reply::Json(json!([
			{ "id": 1, "name": "Ana" },
			{ "id": 2, "name": "Bruno" }
		])));
	let client = backend.client();

	let fallback: Vec<Owner> = fetch_all(client.as_ref(), "/api/owners").await.unwrap();
	assert_eq!(ids(&fallback), vec![1, 2]);

	let paged = backend
		.calls()
		.into_iter()
		.find(|request| request.path == "/api/owners")
		.unwrap();
	assert_eq!(paged.query_param("page"), Some("0"));
	assert_eq!(
		paged.query_param("size"),
		Some(FETCH_ALL_FALLBACK_SIZE.to_string().as_str())
	);

	let healthy = FakeBackend::new();
	healthy.on(Method::Get, "/api/owners/all", Reply::Json(json!([
		{ "id": 1, "name": "Ana" },
		{ "id": 2, "name": "Bruno" }
	])));
	let direct = OWNERS.all(healthy.client().as_ref()).await.unwrap();

	assert_eq!(direct, fallback);
	assert_eq!(healthy.calls().len(), 1);
}

#[tokio::test]
async fn test_fetch_all_surfaces_fallback_failure() {
	let backend = FakeBackend::new();

	let result = fetch_all::<Owner>(backend.client().as_ref(), "/api/owners").await;

	assert!(result.is_err());
	assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_list_navigation_and_range() {
	let backend = FakeBackend::new();
	collection(&backend, "/api/owners", records(25));
	let client = backend.client();

	let mut list = owner::list(10);
	list.refresh(client.as_ref(), 0).await;
	assert_eq!((list.range_start(), list.range_end()), (1, 10));

	list.next_page(client.as_ref()).await;
	list.next_page(client.as_ref()).await;
	assert_eq!(list.page_index, 2);
	assert_eq!((list.range_start(), list.range_end()), (21, 25));

	let calls = backend.calls().len();
	list.next_page(client.as_ref()).await;
	assert_eq!(backend.calls().len(), calls);

	list.previous_page(client.as_ref()).await;
	assert_eq!(list.page_index, 1);
	assert_eq!(list.find(15).map(|owner| owner.name.as_str()), Some("Record 15"));
}

#[tokio::test]
async fn test_page_size_input() {
	let backend = FakeBackend::new();
	collection(&backend, "/api/owners", records(25));
	let client = backend.client();

	let mut list = owner::list(10);
	list.refresh(client.as_ref(), 2).await;

	assert!(!list.set_page_size(client.as_ref(), "abc").await);
	assert!(!list.set_page_size(client.as_ref(), "0").await);
	assert!(!list.set_page_size(client.as_ref(), "-3").await);
	assert!(!list.set_page_size(client.as_ref(), "10").await);
	assert_eq!(list.page_index, 2);

	assert!(list.set_page_size(client.as_ref(), " 5 ").await);
	assert_eq!(list.page_index, 0);
	assert_eq!(list.page_size, 5);
	assert_eq!(list.total_pages, 5);
}

#[tokio::test]
#[traced_test]
async fn test_deleting_last_row_retreats_one_page() {
	let backend = FakeBackend::new();
	let store = collection(&backend, "/api/things", records(21));
	let client = backend.client();

	let mut list =
		ListState::<Record>::new(Resource::new("/api/things"), od_core::messages::RECORD, 10);
	list.refresh(client.as_ref(), 2).await;
	assert_eq!(ids(&list.items), vec![21]);

	list.delete(client.as_ref(), 21).await;

	assert_eq!(store.lock().unwrap().len(), 20);
	assert_eq!(list.page_index, 1);
	assert_eq!(list.items.len(), 10);
	assert_eq!(list.error, None);
	assert!(!list.is_deleting(21));
}

#[tokio::test]
async fn test_deletes_on_different_rows_overlap() {
	let backend = FakeBackend::new();
	collection(&backend, "/api/owners", records(5));
	let client = backend.client();

	let mut list = owner::list(10);
	list.refresh(client.as_ref(), 0).await;

	assert!(list.begin_delete(1));
	assert!(list.begin_delete(2));
	assert!(!list.begin_delete(1));
	assert!(list.is_deleting(1) && list.is_deleting(2));

	let second = OWNERS.delete(client.as_ref(), 2).await;
	assert_eq!(list.finish_delete(2, second), Some(0));
	assert!(list.is_deleting(1));
	assert!(!list.is_deleting(2));

	let first = OWNERS.delete(client.as_ref(), 404).await;
	assert_eq!(list.finish_delete(1, first), None);
	assert!(!list.is_deleting(1));
	assert_eq!(list.error, Some("Failed to delete owner."));
}

#[tokio::test]
#[traced_test]
async fn test_failed_load_reports_noun() {
	let backend = FakeBackend::new();
	backend.on(Method::Get, "/api/owners", Reply::Status(503));

	let mut list = owner::list(10);
	list.refresh(backend.client().as_ref(), 0).await;

	assert!(!list.loading);
	assert!(list.items.is_empty());
	assert_eq!(list.error, Some("Failed to load owners."));
}
