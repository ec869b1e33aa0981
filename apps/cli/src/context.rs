use anyhow::Result;
use od_core::Console;
use od_http::HttpClient;
use serde::Serialize;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

pub struct Context {
	pub console: Console,
	pub format: OutputFormat,
}

impl Context {
	pub fn new(console: Console, format: OutputFormat) -> Self {
		Self { console, format }
	}

	pub fn client(&self) -> &dyn HttpClient {
		self.console.client()
	}

	pub fn page_size(&self) -> usize {
		self.console.config.page_size
	}

	pub fn is_json(&self) -> bool {
		matches!(self.format, OutputFormat::Json)
	}

	pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
		println!("{}", serde_json::to_string_pretty(value)?);
		Ok(())
	}
}
