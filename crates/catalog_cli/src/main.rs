//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `catalog_core` linkage and database reachability.
//! - Keep output deterministic for quick local sanity checks.

use catalog_core::{
    core_version, init_logging, CatalogConfig, CategoryRepository, SqliteCategoryRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("catalog_core version={}", core_version());

    let config = CatalogConfig::from_env();
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging init failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let result = config
        .connection_provider()
        .map_err(|err| err.to_string())
        .and_then(|provider| {
            SqliteCategoryRepository::try_new(provider).map_err(|err| err.to_string())
        })
        .and_then(|repo| repo.list_all().map_err(|err| err.to_string()));

    match result {
        Ok(categories) => {
            println!("catalog_core categories={}", categories.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("catalog probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}
