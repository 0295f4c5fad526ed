//! This module contains the main entrypoint to the automl cli.

use clap::Parser;
use colored::Colorize;
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(
	about = "Browse AutoML training results and reports.",
	disable_help_subcommand = true
)]
enum Options {
	#[command(name = "app")]
	App(Box<AppOptions>),
}

#[derive(Parser, Debug)]
#[command(about = "run the app")]
#[command(long_about = "run the web app that presents training results and reports")]
struct AppOptions {
	#[arg(long, default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[arg(long, env = "PORT", default_value = "8080")]
	port: u16,
	/// the base url of the results service
	#[arg(
		long,
		env = "RESULTS_SERVICE_URL",
		default_value = "http://localhost:5000/api"
	)]
	service_url: Url,
	/// abandon results service requests after this many seconds
	#[arg(long = "service-timeout-secs", env = "RESULTS_SERVICE_TIMEOUT")]
	service_timeout: Option<u64>,
	/// the directory holding the built browser client
	#[arg(long, env = "AUTOML_CLIENT_DIR")]
	client_dir: Option<PathBuf>,
}

fn main() {
	setup_tracing();
	let options = Options::parse();
	let result = match options {
		Options::App(options) => cli_app(*options),
	};
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn setup_tracing() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.init();
}

fn cli_app(options: AppOptions) -> anyhow::Result<()> {
	tracing::debug!(?options, "starting app");
	automl_app::run(app_options(options))
}

fn app_options(options: AppOptions) -> automl_app::Options {
	automl_app::Options {
		host: options.host,
		port: options.port,
		service_url: options.service_url,
		service_timeout: options.service_timeout.map(Duration::from_secs),
		client_dir: options.client_dir,
	}
}

#[test]
fn test_options() {
	use clap::CommandFactory;
	Options::command().debug_assert();
}

#[test]
fn test_app_options() {
	let options = Options::try_parse_from(&[
		"automl",
		"app",
		"--port",
		"9000",
		"--service-url",
		"http://results.internal:5000/api",
		"--service-timeout-secs",
		"30",
	])
	.unwrap();
	let Options::App(options) = options;
	let options = app_options(*options);
	assert_eq!(options.port, 9000);
	assert_eq!(options.service_url.as_str(), "http://results.internal:5000/api");
	assert_eq!(options.service_timeout, Some(Duration::from_secs(30)));
	assert_eq!(options.host.to_string(), "0.0.0.0");
}
