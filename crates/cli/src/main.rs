// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use literalura_catalog::{http_source, CatalogService, ServiceConfig};
use literalura_config::{AppConfig, ConfigManager, LogLevel};
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("literalura")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Literalura Contributors")
        .about("Catalog of public domain books and their authors, fed by Gutendex")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to the catalog database (overrides the config file)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the catalog database and apply migrations"))
        .subcommand(
            Command::new("search")
                .about("Search Gutendex by title and store the best match")
                .arg(
                    Arg::new("title")
                        .required(true)
                        .num_args(1..)
                        .value_name("TITLE")
                        .help("Words of the title to search for"),
                ),
        )
        .subcommand(Command::new("books").about("List every book in the catalog"))
        .subcommand(Command::new("authors").about("List every author with their books"))
        .subcommand(
            Command::new("alive")
                .about("List authors alive in a given year")
                .arg(
                    Arg::new("year")
                        .required(true)
                        .value_name("YEAR")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i32))
                        .help("Year to check"),
                ),
        )
        .subcommand(
            Command::new("language")
                .about("List books written in a language")
                .arg(
                    Arg::new("code")
                        .required(true)
                        .value_name("CODE")
                        .help("Language code, see `languages`"),
                ),
        )
        .subcommand(Command::new("languages").about("Show the supported language codes"))
        .subcommand(
            Command::new("config")
                .about("Inspect or reset the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(
                    Command::new("validate").about("Check the config file for invalid values"),
                )
                .subcommand(Command::new("init").about("Write a default config file if missing"))
                .subcommand(
                    Command::new("reset")
                        .about("Overwrite the config file with defaults")
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .help("Skip confirmation prompt")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    let manager = match matches.get_one::<String>("config") {
        Some(dir) => ConfigManager::with_directory(PathBuf::from(dir)),
        None => ConfigManager::new(),
    };
    manager.context("Failed to locate config directory")
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();
}

/// Config commands never parse the file up front, so a broken one can be reset
fn run_config_command(manager: &ConfigManager, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => commands::config_show(manager),
        Some(("validate", _)) => commands::config_validate(manager),
        Some(("init", _)) => commands::config_init(manager),
        Some(("reset", reset_matches)) => {
            commands::config_reset(manager, reset_matches.get_flag("force"))
        }
        _ => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    let Some((name, sub_matches)) = matches.subcommand() else {
        build_cli().print_help()?;
        return Ok(());
    };

    if name == "config" {
        init_logging(AppConfig::default().log_level);
        return run_config_command(&manager, sub_matches);
    }

    let mut config = manager
        .load_with_env_overrides()
        .context("Failed to load configuration (`literalura config reset` restores defaults)")?;
    if let Some(db_path) = matches.get_one::<String>("database") {
        config.app.database_path = PathBuf::from(db_path);
    }

    init_logging(config.app.log_level);

    let source = http_source(&config.source).context("Failed to build HTTP client")?;
    let service = CatalogService::open(&ServiceConfig::from(&config), source)
        .await
        .with_context(|| {
            format!(
                "Failed to open catalog at {}",
                config.app.database_path.display()
            )
        })?;

    match name {
        "init" => commands::init(&service, &config).await,
        "search" => {
            let words: Vec<String> = sub_matches
                .get_many::<String>("title")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            commands::search(&service, &words).await
        }
        "books" => commands::list_books(&service).await,
        "authors" => commands::list_authors(&service).await,
        "alive" => {
            let year = *sub_matches
                .get_one::<i32>("year")
                .ok_or_else(|| anyhow::anyhow!("Year is required"))?;
            commands::authors_alive(&service, year).await
        }
        "language" => {
            let code = sub_matches
                .get_one::<String>("code")
                .ok_or_else(|| anyhow::anyhow!("Language code is required"))?;
            commands::books_in_language(&service, code).await
        }
        "languages" => {
            commands::list_languages(&service);
            Ok(())
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_search_collects_words() {
        let matches = build_cli()
            .try_get_matches_from(["literalura", "search", "don", "quijote"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let words: Vec<&String> = sub.get_many::<String>("title").unwrap().collect();
        assert_eq!(words, ["don", "quijote"]);
    }

    #[test]
    fn test_alive_accepts_negative_year() {
        let matches = build_cli()
            .try_get_matches_from(["literalura", "alive", "-50"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<i32>("year"), Some(&-50));
    }

    #[test]
    fn test_alive_rejects_text() {
        let result = build_cli().try_get_matches_from(["literalura", "alive", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_reset_replaces_unparsable_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "this is [not toml").unwrap();
        let dir_arg = dir.path().to_str().unwrap();

        let matches = build_cli()
            .try_get_matches_from([
                "literalura",
                "--config",
                dir_arg,
                "config",
                "reset",
                "--force",
            ])
            .unwrap();
        let manager = config_manager(&matches).unwrap();
        assert!(manager.load().is_err());

        let (_, config_matches) = matches.subcommand().unwrap();
        run_config_command(&manager, config_matches).unwrap();

        assert_eq!(manager.load().unwrap(), literalura_config::Config::default());
    }

    #[test]
    fn test_global_database_flag() {
        let matches = build_cli()
            .try_get_matches_from(["literalura", "books", "--database", "/tmp/x.db"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("database").map(String::as_str),
            Some("/tmp/x.db")
        );
    }
}
