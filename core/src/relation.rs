//! Relation resolution
//!
//! A parent entity's related values (an owner's address, a project's files, ...)
//! are fetched concurrently, each one supervised on its own: a failing relation
//! falls back to its empty value and records an error, and never cancels or fails
//! its siblings.

use std::{future::Future, pin::Pin};

use futures_concurrency::future::Join;
use tracing::warn;

use crate::{messages, resource::Entity, Result};

/// A relation slot as surfaces render it.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation<R> {
	pub value: R,
	pub loading: bool,
	pub error: Option<String>,
}

impl<R> Relation<R> {
	pub fn new(value: R) -> Self {
		Self {
			value,
			loading: false,
			error: None,
		}
	}

	/// Called right before the fetch is dispatched.
	pub fn begin(&mut self) {
		self.loading = true;
		self.error = None;
	}

	pub fn settle(&mut self, resolved: Resolved<R>) {
		self.value = resolved.value;
		self.error = resolved.error;
		self.loading = false;
	}

	/// Empties the slot and forces loading off.
	pub fn reset(&mut self, fallback: R) {
		self.value = fallback;
		self.error = None;
		self.loading = false;
	}

	pub fn failed(&self) -> bool {
		self.error.is_some()
	}
}

impl<R: Default> Default for Relation<R> {
	fn default() -> Self {
		Self::new(R::default())
	}
}

/// Outcome of one supervised relation fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<R> {
	pub value: R,
	pub error: Option<String>,
}

pub type RelationFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R>> + Send + 'a>>;

pub struct RelationSpec<'a, R> {
	pub name: &'static str,
	pub fetch: Box<dyn FnOnce(i64) -> RelationFuture<'a, R> + Send + 'a>,
	pub fallback: R,
}

impl<'a, R> RelationSpec<'a, R> {
	pub fn new<F, Fut>(name: &'static str, fetch: F, fallback: R) -> Self
	where
		F: FnOnce(i64) -> Fut + Send + 'a,
		Fut: Future<Output = Result<R>> + Send + 'a,
	{
		Self {
			name,
			fetch: Box::new(move |id| Box::pin(fetch(id))),
			fallback,
		}
	}
}

pub async fn resolve<R>(fetch: impl Future<Output = Result<R>>, fallback: R) -> Resolved<R> {
	match fetch.await {
		Ok(value) => Resolved { value, error: None },
		Err(e) => {
			warn!(error = %e, "Relation failed to load");
			Resolved {
				value: fallback,
				error: Some(e.to_string()),
			}
		}
	}
}

/// Runs every relation fetch against `parent_id` concurrently and waits for all of them,
/// results in input order.
pub async fn resolve_all<R>(parent_id: i64, specs: Vec<RelationSpec<'_, R>>) -> Vec<Resolved<R>> {
	specs
		.into_iter()
		.map(|RelationSpec { name, fetch, fallback }| {
			let fetch = fetch(parent_id);
			async move {
				let resolved = resolve(fetch, fallback).await;
				if resolved.error.is_some() {
					warn!(parent_id, relation = name, "Using fallback for relation");
				}
				resolved
			}
		})
		.collect::<Vec<_>>()
		.join()
		.await
}

/// One shared message no matter how many relations failed.
pub fn combined_error(failed: impl IntoIterator<Item = bool>) -> Option<&'static str> {
	failed
		.into_iter()
		.any(|failed| failed)
		.then_some(messages::RELATIONS_FAILED)
}

/// Rebuilds a to-many relation for an update payload from the picker selection.
/// An empty candidate list means the picker never loaded, so the relation last
/// fetched for the parent is kept as is.
pub fn reconcile_many<T: Entity + Clone>(
	candidates: &[T],
	selected: &[i64],
	fetched: &[T],
) -> Vec<T> {
	if candidates.is_empty() {
		return fetched.to_vec();
	}

	candidates
		.iter()
		.filter(|candidate| candidate.id().is_some_and(|id| selected.contains(&id)))
		.cloned()
		.collect()
}

/// Single-valued counterpart of [`reconcile_many`].
pub fn reconcile_one<T: Entity + Clone>(
	candidates: &[T],
	selected: Option<i64>,
	fetched: Option<&T>,
) -> Option<T> {
	if candidates.is_empty() {
		return fetched.cloned();
	}

	let selected = selected?;
	candidates
		.iter()
		.find(|candidate| candidate.id() == Some(selected))
		.cloned()
}

/// Parses ids coming from picker inputs, silently dropping anything that is not a
/// finite whole number.
pub fn parse_ids<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Vec<i64> {
	tokens.into_iter().filter_map(parse_id).collect()
}

pub fn parse_id(token: &str) -> Option<i64> {
	let token = token.trim();
	if token.is_empty() {
		return None;
	}

	let value = token.parse::<f64>().ok()?;
	let integral = value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64;
	integral.then_some(value as i64)
}

#[cfg(test)]
mod tests {
	use super::*;

	use pretty_assertions::assert_eq;

	#[derive(Debug, Clone, PartialEq)]
	struct Item(Option<i64>);

	impl Entity for Item {
		fn id(&self) -> Option<i64> {
			self.0
		}
	}

	#[test]
	fn test_parse_ids_drops_garbage() {
		assert_eq!(
			parse_ids(["1", " 2 ", "abc", "", "NaN", "inf", "3.5", "4.0", "-7"]),
			vec![1, 2, 4, -7]
		);
	}

	#[test]
	fn test_reconcile_many_uses_candidates() {
		let candidates = vec![Item(Some(1)), Item(Some(2)), Item(Some(3)), Item(None)];
		let fetched = vec![Item(Some(9))];

		assert_eq!(
			reconcile_many(&candidates, &[3, 1], &fetched),
			vec![Item(Some(1)), Item(Some(3))]
		);
		assert!(reconcile_many(&candidates, &[], &fetched).is_empty());
	}

	#[test]
	fn test_reconcile_falls_back_without_candidates() {
		let fetched = vec![Item(Some(9))];

		assert_eq!(reconcile_many(&[], &[1], &fetched), fetched);
		assert_eq!(
			reconcile_one(&[], Some(1), Some(&Item(Some(9)))),
			Some(Item(Some(9)))
		);
		assert_eq!(reconcile_one::<Item>(&[], Some(1), None), None);
	}

	#[test]
	fn test_reconcile_one_follows_selection() {
		let candidates = vec![Item(Some(1)), Item(Some(2))];

		assert_eq!(
			reconcile_one(&candidates, Some(2), Some(&Item(Some(1)))),
			Some(Item(Some(2)))
		);
		assert_eq!(reconcile_one(&candidates, None, Some(&Item(Some(1)))), None);
	}

	#[test]
	fn test_slot_lifecycle() {
		let mut slot = Relation::<Vec<i64>>::default();

		slot.begin();
		assert!(slot.loading);

		slot.settle(Resolved {
			value: vec![],
			error: Some("boom".to_string()),
		});
		assert!(!slot.loading);
		assert!(slot.failed());

		slot.reset(vec![]);
		assert!(!slot.failed());
		assert_eq!(combined_error([false, slot.failed()]), None);
		assert_eq!(combined_error([true, true]), Some(messages::RELATIONS_FAILED));
	}
}
