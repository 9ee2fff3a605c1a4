mod report;

use anyhow::Result;
use markdown_codelink_config::Config;
use markdown_codelink_engine::{CodeLinkSettings, io};
use std::{env, path::PathBuf, process};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Determine docs path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .cloned()
        .unwrap_or_else(|| "markdown-codelink-cli".to_string());
    let config_path = Config::config_path();

    let config = match args.len() {
        2 => {
            // CLI argument provided - settings still come from the config file if present
            let docs_path = PathBuf::from(&args[1]);
            match Config::load() {
                Ok(Some(config)) => Config {
                    docs_path,
                    ..config
                },
                Ok(None) => Config::new(docs_path),
                Err(e) => {
                    eprintln!("Error: Failed to load config file: {e}");
                    process::exit(1);
                }
            }
        }
        1 => match Config::load() {
            Ok(Some(config)) => {
                log::info!("Loaded docs path from config: {}", config.docs_path.display());
                config
            }
            Ok(None) => {
                eprintln!("Error: No docs path provided and no config file found");
                eprintln!("Usage: {program_name} <docs-folder-path>");
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {program_name} <docs-folder-path>");
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {program_name} [docs-folder-path]");
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_docs_dir(&config.docs_path) {
        eprintln!(
            "Error: Docs path '{}' is invalid: {e}",
            config.docs_path.display()
        );
        process::exit(1);
    }

    let settings = CodeLinkSettings {
        keyword: config.keyword.clone(),
        project_extension: config.project_extension.clone(),
    };

    let files = io::scan_markdown_files(&config.docs_path)?;
    log::info!(
        "Checking {} markdown file(s) in {}",
        files.len(),
        config.docs_path.display()
    );

    let mut diagnostics = 0;
    for file in &files {
        let file_report = report::check_file(&config.docs_path, file, &settings)?;
        diagnostics += file_report.diagnostic_count();
        print!("{file_report}");
    }

    if diagnostics > 0 {
        log::warn!("{diagnostics} diagnostic(s) reported");
        process::exit(1);
    }

    log::info!("All code links resolved");
    Ok(())
}
