use std::sync::LazyLock;

use super::{
	behavior::{PROJECT_ID, SITE, SITE_ID, SITE_TYPE},
	config::{Field, ScreenConfig},
};

const SITE_TYPES: &[(&str, &str)] = &[("CLARO", "Claro"), ("TIM", "TIM"), ("VIVO", "Vivo")];

static SCREENS: LazyLock<Vec<ScreenConfig>> = LazyLock::new(|| {
	vec![
		ScreenConfig {
			key: "tickets",
			title: "Ticket",
			base_url: "/api/tickets",
			route: "tickets",
			fields: vec![
				Field::select(PROJECT_ID, "Project").required(),
				Field::text("projectName", "Project name").read_only().hidden_in_list(),
				Field::text("contractNumber", "Contract").read_only(),
				Field::text("clientName", "Client").read_only(),
				Field::select(SITE_TYPE, "Site type").options(SITE_TYPES),
				Field::text(SITE_ID, "Site").read_only(),
				Field::text("addressId", "Address").read_only().hidden_in_list(),
				Field::text("title", "Title").required(),
				Field::text("description", "Description")
					.optional()
					.hidden_in_list(),
				Field::select("priority", "Priority").options(&[
					("LOW", "Low"),
					("MEDIUM", "Medium"),
					("HIGH", "High"),
				]),
				Field::select("status", "Status").options(&[
					("OPEN", "Open"),
					("IN_PROGRESS", "In progress"),
					("CLOSED", "Closed"),
				]),
			],
		},
		ScreenConfig {
			key: "billings",
			title: "Billing",
			base_url: "/api/billings",
			route: "billings",
			fields: vec![
				Field::select(PROJECT_ID, "Project").required(),
				Field::text("projectName", "Project name").read_only().hidden_in_list(),
				Field::text("contractNumber", "Contract").read_only(),
				Field::text("clientName", "Client").read_only(),
				Field::select(SITE_TYPE, "Site type").options(SITE_TYPES).hidden_in_list(),
				Field::text(SITE_ID, "Site").read_only().hidden_in_list(),
				Field::text("addressId", "Address").read_only().hidden_in_list(),
				Field::text("amount", "Amount").required().placeholder("0.00"),
				Field::text("dueDate", "Due date").required().placeholder("YYYY-MM-DD"),
				Field::select("status", "Status").options(&[
					("PENDING", "Pending"),
					("PAID", "Paid"),
					("OVERDUE", "Overdue"),
				]),
				Field::text("notes", "Notes").optional().hidden_in_list(),
			],
		},
		ScreenConfig {
			key: "contract-registrations",
			title: "Contract Registration",
			base_url: "/api/contract-registrations",
			route: "contract-registrations",
			fields: vec![
				Field::text("contractNumber", "Contract number").required(),
				Field::text("clientName", "Client").required(),
				Field::select(SITE_TYPE, "Site type").required().options(SITE_TYPES),
				Field::select(SITE, "Site").required().hidden_in_list(),
				Field::text(SITE_ID, "Site id").read_only(),
				Field::text("addressId", "Address").read_only().hidden_in_list(),
				Field::text("startDate", "Start date").required().placeholder("YYYY-MM-DD"),
				Field::text("endDate", "End date")
					.optional()
					.placeholder("YYYY-MM-DD"),
			],
		},
		site_screen("claro-sites", "Claro Site", "/api/claro-sites"),
		site_screen("tim-sites", "TIM Site", "/api/tim-sites"),
		site_screen("vivo-sites", "Vivo Site", "/api/vivo-sites"),
		ScreenConfig {
			key: "clients",
			title: "Client",
			base_url: "/api/clients",
			route: "clients",
			fields: vec![
				Field::text("name", "Name").required(),
				Field::text("document", "Document").required(),
				Field::text("email", "Email").placeholder("name@example.com"),
				Field::text("phone", "Phone").optional(),
			],
		},
		ScreenConfig {
			key: "user-registrations",
			title: "User Registration",
			base_url: "/api/user-registrations",
			route: "user-registrations",
			fields: vec![
				Field::text("username", "Username").required(),
				Field::text("email", "Email").required(),
				Field::select("role", "Role").required().options(&[
					("ADMIN", "Administrator"),
					("OPERATOR", "Operator"),
					("VIEWER", "Viewer"),
				]),
				Field::text("department", "Department").optional().hidden_in_list(),
			],
		},
	]
});

fn site_screen(key: &'static str, title: &'static str, base_url: &'static str) -> ScreenConfig {
	ScreenConfig {
		key,
		title,
		base_url,
		route: key,
		fields: vec![
			Field::text("siteCode", "Site code").required(),
			Field::text("siteName", "Site name").required(),
			Field::text("addressId", "Address").hidden_in_list(),
			Field::text("city", "City"),
			Field::text("state", "State"),
		],
	}
}

pub fn screens() -> &'static [ScreenConfig] {
	&SCREENS
}

pub fn screen(key: &str) -> Option<&'static ScreenConfig> {
	SCREENS.iter().find(|screen| screen.key == key)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::screen::behavior::site_endpoint;

	#[test]
	fn test_screen_keys_are_unique() {
		let keys = screens().iter().map(|s| s.key).collect::<HashSet<_>>();
		assert_eq!(keys.len(), screens().len());
	}

	#[test]
	fn test_field_keys_are_unique_per_screen() {
		for screen in screens() {
			let keys = screen.fields.iter().map(|f| f.key).collect::<HashSet<_>>();
			assert_eq!(keys.len(), screen.fields.len(), "duplicate field in {}", screen.key);
		}
	}

	#[test]
	fn test_site_screens_match_site_endpoints() {
		for (site_type, _) in SITE_TYPES {
			let endpoint = site_endpoint(site_type).unwrap();
			assert!(screens().iter().any(|s| s.base_url == endpoint));
		}
	}

	#[test]
	fn test_unknown_key() {
		assert!(screen("tickets").is_some());
		assert!(screen("nope").is_none());
	}
}
