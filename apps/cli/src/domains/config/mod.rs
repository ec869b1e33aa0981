use anyhow::{anyhow, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use od_config::{ConsoleConfig, CONFIG_FILE};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
	/// Show all configuration
	Show,
	/// Set a configuration value
	Set {
		/// Configuration key (e.g., "api_url", "page_size")
		key: String,
		/// Configuration value
		value: String,
	},
}

pub fn run(mut config: ConsoleConfig, cmd: ConfigCmd) -> Result<()> {
	match cmd {
		ConfigCmd::Show => {
			let mut table = Table::new();
			table.load_preset(UTF8_BORDERS_ONLY);
			table.set_header(vec!["Key", "Value"]);

			table.add_row(vec!["api_url", config.api_url.as_str()]);
			table.add_row(vec!["log_level", config.log_level.as_str()]);
			table.add_row(vec!["page_size", &config.page_size.to_string()]);
			table.add_row(vec![
				"request_timeout_secs",
				&config.request_timeout_secs.to_string(),
			]);
			table.add_row(vec![
				"auth",
				if config.auth.is_some() { "(set)" } else { "(not set)" },
			]);

			println!("{}", table);
			if config.resolved_api_url() != config.api_url {
				println!("api_url overridden for this run: {}", config.resolved_api_url());
			}
			println!();
			println!("Config file: {}", config.data_dir.join(CONFIG_FILE).display());
		}
		ConfigCmd::Set { key, value } => {
			match key.as_str() {
				"api_url" => config.api_url = value.clone(),
				"log_level" => config.log_level = value.clone(),
				"page_size" => {
					config.page_size = value
						.parse::<usize>()
						.ok()
						.filter(|size| *size > 0)
						.ok_or_else(|| anyhow!("page_size must be a positive integer"))?
				}
				"request_timeout_secs" => {
					config.request_timeout_secs = value
						.parse()
						.map_err(|_| anyhow!("request_timeout_secs must be a number of seconds"))?
				}
				_ => return Err(anyhow!("Cannot set key: {}", key)),
			}

			config.save()?;
			println!("Set {} = {}", key, value);
		}
	}

	Ok(())
}
