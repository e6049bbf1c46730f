/**
 * Registry Docgen - docgen
 *
 * Scans the registry, extracts component metadata and writes the
 * per-folder definition files plus the Markdown documentation tree.
 */
use clap::{Arg, ArgAction, Command};
use registry_docgen_cli::config::RegistryConfig;
use registry_docgen_cli::logging::{ConsoleLogger, LogLevel};
use registry_docgen_cli::scanner::Scanner;
use std::path::PathBuf;
use std::process;

fn main() {
    let matches = Command::new("docgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Component registry documentation generator")
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PATH")
                .help("Project root (defaults to the current directory)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the registry config file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .get_matches();

    let project_root = matches
        .get_one::<String>("project")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| project_root.join("registry.config.json"));

    let level = if matches.get_flag("verbose") {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let logger = ConsoleLogger::new(level);

    let config = match RegistryConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: cannot load {}: {}", config_path.display(), error);
            process::exit(1);
        }
    };

    let scanner = Scanner::new(config, project_root, &logger);
    let summary = scanner.run();

    println!(
        "Done: {} succeeded, {} failed",
        summary.succeeded(),
        summary.errors.len()
    );

    if !summary.errors.is_empty() {
        eprintln!("Failures:");
        for failure in &summary.errors {
            eprintln!("  {}: {}", failure.folder, failure.error);
        }
        process::exit(1);
    }
}
