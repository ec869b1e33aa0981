use std::path::Path;

use anyhow::Context;
use tracing_appender::{
	non_blocking::WorkerGuard,
	rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: console output on stderr and a daily rolling file
/// under `logs_dir`. `RUST_LOG` overrides `default_level`. Keep the returned guard
/// alive for as long as file output should be flushed.
pub fn init(logs_dir: &Path, default_level: &str) -> anyhow::Result<WorkerGuard> {
	std::fs::create_dir_all(logs_dir)
		.with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;

	let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, "opsdesk.log");
	let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		let directives = ["od_core", "od_http", "od_config", "opsdesk"]
			.iter()
			.map(|target| format!("{target}={default_level}"))
			.collect::<Vec<_>>()
			.join(",");
		EnvFilter::new(format!("warn,{directives}"))
	});

	tracing_subscriber::registry()
		.with(env_filter)
		.with(fmt::layer().with_target(true).with_writer(std::io::stderr))
		.with(
			fmt::layer()
				.with_target(true)
				.with_thread_ids(true)
				.with_ansi(false)
				.with_writer(file_writer),
		)
		.try_init()
		.context("Failed to initialize tracing")?;

	Ok(guard)
}
