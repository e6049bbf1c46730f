/**
 * Registry Docgen - registry-build
 *
 * Aggregates the per-folder definition files into registry.json.
 */
use clap::{Arg, Command};
use registry_docgen_cli::config::RegistryConfig;
use registry_docgen_cli::logging::{ConsoleLogger, LogLevel};
use registry_docgen_cli::output;
use std::path::PathBuf;
use std::process;

fn main() {
    let matches = Command::new("registry-build")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Aggregates component definition files into registry.json")
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
        .get_matches();

    let project_root = matches
        .get_one::<String>("project")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| project_root.join("registry.config.json"));

    let logger = ConsoleLogger::new(LogLevel::Info);

    let result = RegistryConfig::load_or_default(&config_path)
        .and_then(|config| {
            let registry = output::aggregate_registry(&project_root, &config, &logger)?;
            let path = output::write_registry(&project_root, &registry)?;
            Ok((registry.items.len(), path))
        });

    match result {
        Ok((count, path)) => {
            println!("Wrote {} items to {}", count, path.display());
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}
