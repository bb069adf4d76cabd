use clap::{Arg, Command};
use log::LevelFilter;
use phishguard::analyzer::Analyzer;
use phishguard::{api, Config};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let matches = Command::new("phishguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing-likelihood scorer for raw emails")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("phishguard.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-email")
                .long("test-email")
                .value_name("FILE")
                .help("Analyze a raw email file and print the report as JSON")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("share-body")
                .long("share-body")
                .help("Allow sending body text to the generative classifier")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("listen")
                .short('l')
                .long("listen")
                .value_name("ADDR")
                .help("Listen address for the analysis API (overrides config)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        match Config::default().to_file(generate_path) {
            Ok(()) => println!("Default configuration written to {generate_path}"),
            Err(e) => {
                eprintln!("Error writing configuration: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let config_path = matches.get_one::<String>("config").expect("has default");
    let mut config = if std::path::Path::new(config_path).exists() {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration from {config_path}: {e}");
                process::exit(1);
            }
        }
    } else {
        log::debug!("no configuration file at {}, using defaults", config_path);
        Config::default()
    };
    config.apply_env();

    if let Some(listen) = matches.get_one::<String>("listen") {
        config.listen = listen.clone();
    }

    let analyzer = Arc::new(Analyzer::from_config(&config));

    if let Some(email_file) = matches.get_one::<String>("test-email") {
        let raw = match std::fs::read_to_string(email_file) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Error reading {email_file}: {e}");
                process::exit(1);
            }
        };

        let report = analyzer.analyze(&raw, matches.get_flag("share-body")).await;
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = api::serve(&config.listen, analyzer).await {
        log::error!("API server failed: {e}");
        process::exit(1);
    }
}
