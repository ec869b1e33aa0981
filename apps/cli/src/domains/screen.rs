use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use od_core::{
	messages,
	screen::{
		self, Record, RouteMode, Screen, ScreenConfig, ScreenError, ScreenList, ScreenRoute,
		ScreenState,
	},
	Entity, Page, Resource,
};
use tracing::warn;

use crate::context::Context;

fn lookup(key: &str) -> Result<&'static ScreenConfig, ScreenError> {
	screen::screen(key).ok_or_else(|| ScreenError::UnknownScreen(key.to_string()))
}

pub fn screens(ctx: &Context) -> Result<()> {
	if ctx.is_json() {
		return ctx.print_json(&screen::screens());
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Key", "Title", "Endpoint", "Fields"]);
	for config in screen::screens() {
		table.add_row(vec![
			config.key,
			config.title,
			config.base_url,
			&config.fields.len().to_string(),
		]);
	}
	println!("{}", table);

	Ok(())
}

pub async fn list(ctx: &Context, key: &str, page: usize, size: Option<usize>) -> Result<()> {
	let config = lookup(key)?;
	let mut list = ScreenList::new(config, size.unwrap_or_else(|| ctx.page_size()));
	list.state.refresh(ctx.client(), page).await;

	if let Some(error) = list.state.error {
		bail!(error);
	}

	if ctx.is_json() {
		return ctx.print_json(&Page {
			items: list.state.items.clone(),
			page_index: list.state.page_index,
			page_size: list.state.page_size,
			total_items: list.state.total_items,
			total_pages: list.state.total_pages,
		});
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(
		std::iter::once("ID")
			.chain(list.columns().iter().map(|field| field.label))
			.collect::<Vec<_>>(),
	);
	for (record, cells) in list.state.items.iter().zip(list.rows()) {
		let id = record.id().map(|id| id.to_string()).unwrap_or_default();
		table.add_row(std::iter::once(id).chain(cells).collect::<Vec<_>>());
	}

	println!("{}", table);
	println!(
		"Showing {}-{} of {} (page {} of {})",
		list.state.range_start(),
		list.state.range_end(),
		list.state.total_items,
		list.state.page_index + 1,
		list.state.total_pages.max(1)
	);

	Ok(())
}

pub async fn view(ctx: &Context, key: &str, id: i64) -> Result<()> {
	let route = ScreenRoute::new(key, RouteMode::View(id));
	let opened = Screen::open(ctx.client(), &route, ctx.page_size()).await?;
	let ScreenState::View(view) = opened.state else {
		bail!(messages::SCREEN_CONFIG_FAILED);
	};

	if let Some(error) = view.error {
		bail!(error);
	}

	if ctx.is_json() {
		return ctx.print_json(&view.record);
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Field", "Value"]);
	for (label, value) in view.rows() {
		table.add_row(vec![label.to_string(), value]);
	}

	println!("{}", view.title());
	println!("{}", table);

	Ok(())
}

pub async fn delete(ctx: &Context, key: &str, id: i64) -> Result<()> {
	let config = lookup(key)?;

	if let Err(e) = Resource::<Record>::new(config.base_url)
		.delete(ctx.client(), id)
		.await
	{
		warn!(screen = config.key, id, error = %e, "Delete failed");
		bail!(messages::RECORD.delete);
	}

	println!("Deleted {} {}", config.title, id);

	Ok(())
}
