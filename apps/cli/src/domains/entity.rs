use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use od_core::entity::{Address, OwnerView, ProjectView};
use serde_json::json;

use crate::context::Context;

fn address_line(address: Option<&Address>) -> String {
	match address {
		Some(a) => format!("{}, {} - {}/{} {}", a.street, a.number, a.city, a.state, a.zip_code)
			.trim()
			.to_string(),
		None => "(none)".to_string(),
	}
}

fn names<'a>(names: impl Iterator<Item = &'a str>) -> String {
	let joined = names.collect::<Vec<_>>().join(", ");
	if joined.is_empty() {
		"(none)".to_string()
	} else {
		joined
	}
}

pub async fn owner(ctx: &Context, id: i64) -> Result<()> {
	let view = OwnerView::open(ctx.client(), id).await;
	let (Some(owner), None) = (&view.owner, view.error) else {
		bail!(view.error.unwrap_or(od_core::messages::OWNER.load_one));
	};
	let relations = &view.relations;

	if ctx.is_json() {
		return ctx.print_json(&json!({
			"owner": owner,
			"address": relations.address.value,
			"projects": relations.projects.value,
			"relationsError": relations.error,
		}));
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Field", "Value"]);
	table.add_row(vec!["Name".to_string(), owner.name.clone()]);
	table.add_row(vec!["Email".to_string(), owner.email.clone()]);
	table.add_row(vec![
		"Address".to_string(),
		address_line(relations.address.value.as_ref()),
	]);
	table.add_row(vec![
		"Projects".to_string(),
		names(relations.projects.value.iter().map(|p| p.project_name.as_str())),
	]);

	println!("{}", table);
	if let Some(error) = relations.error {
		eprintln!("{}", error);
	}

	Ok(())
}

pub async fn project(ctx: &Context, id: i64) -> Result<()> {
	let view = ProjectView::open(ctx.client(), id).await;
	let (Some(project), None) = (&view.project, view.error) else {
		bail!(view.error.unwrap_or(od_core::messages::PROJECT.load_one));
	};
	let relations = &view.relations;

	if ctx.is_json() {
		return ctx.print_json(&json!({
			"project": project,
			"address": relations.address.value,
			"owners": relations.owners.value,
			"files": relations.files.value,
			"relationsError": relations.error,
		}));
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Field", "Value"]);
	table.add_row(vec!["Name".to_string(), project.project_name.clone()]);
	table.add_row(vec![
		"Address".to_string(),
		address_line(relations.address.value.as_ref()),
	]);
	table.add_row(vec![
		"Owners".to_string(),
		names(relations.owners.value.iter().map(|o| o.name.as_str())),
	]);
	table.add_row(vec![
		"Files".to_string(),
		names(relations.files.value.iter().map(|f| f.filename.as_str())),
	]);

	println!("{}", table);
	if let Some(error) = relations.error {
		eprintln!("{}", error);
	}

	Ok(())
}
