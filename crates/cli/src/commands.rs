// FILE: crates/cli/src/commands.rs

use anyhow::{Context, Result};
use console::style;
use literalura_catalog::CatalogService;
use literalura_config::{Config, ConfigManager};
use literalura_content_sources::BookSource;
use literalura_core::{AppError, AuthorSummary, Book, ErrorSeverity};

/// Create the database if needed and report what it holds
pub async fn init<S: BookSource>(service: &CatalogService<S>, config: &Config) -> Result<()> {
    let books = service
        .store()
        .count_books()
        .await
        .context("Failed to count books")?;
    let authors = service
        .store()
        .count_authors()
        .await
        .context("Failed to count authors")?;

    println!(
        "{} Catalog ready at {}",
        style("✓").green().bold(),
        config.app.database_path.display()
    );
    println!("  {} books, {} authors", books, authors);
    Ok(())
}

/// Fetch the best match for a title and store it
pub async fn search<S: BookSource>(service: &CatalogService<S>, words: &[String]) -> Result<()> {
    let query = words.join(" ");

    let Some(ingested) = report(service.fetch_and_store(&query).await, "Failed to fetch book")?
    else {
        return Ok(());
    };

    if ingested.was_new {
        println!("{} Added to catalog", style("✓").green().bold());
    } else {
        println!("{}", style("This book is already in the catalog").yellow());
    }
    println!("{}", render_book(&ingested.book));
    Ok(())
}

pub async fn list_books<S: BookSource>(service: &CatalogService<S>) -> Result<()> {
    let books = service.list_books().await.context("Failed to list books")?;
    print_books(&books, "No books in the catalog. Use 'search' to add one.");
    Ok(())
}

pub async fn list_authors<S: BookSource>(service: &CatalogService<S>) -> Result<()> {
    let authors = service
        .list_authors()
        .await
        .context("Failed to list authors")?;
    print_authors(&authors, "No authors in the catalog.");
    Ok(())
}

pub async fn authors_alive<S: BookSource>(service: &CatalogService<S>, year: i32) -> Result<()> {
    let authors = service
        .authors_alive_in(year)
        .await
        .context("Failed to query authors")?;
    print_authors(&authors, &format!("No authors alive in {}.", year));
    Ok(())
}

pub async fn books_in_language<S: BookSource>(
    service: &CatalogService<S>,
    code: &str,
) -> Result<()> {
    let Some(books) = report(
        service.books_by_language(code).await,
        "Failed to query books",
    )?
    else {
        return Ok(());
    };

    print_books(&books, &format!("No books in '{}'.", code.trim()));
    Ok(())
}

pub fn list_languages<S: BookSource>(service: &CatalogService<S>) {
    println!("\n{}", style("Supported languages").bold().cyan());
    for language in service.languages() {
        println!("  {}", language);
    }
}

pub fn config_show(manager: &ConfigManager) -> Result<()> {
    let config = manager
        .load_with_env_overrides()
        .context("Failed to load configuration (`literalura config reset` restores defaults)")?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    println!(
        "{} {}",
        style("# Config file:").dim(),
        manager.config_path().display()
    );
    println!("{}", rendered);
    Ok(())
}

/// Lists invalid values in the config file; returns an error when there are any
pub fn config_validate(manager: &ConfigManager) -> Result<()> {
    let problems = manager.validate().context("Failed to load configuration")?;

    if problems.is_empty() {
        println!(
            "{} {} is valid",
            style("✓").green().bold(),
            manager.config_path().display()
        );
        return Ok(());
    }

    for problem in &problems {
        println!("  {} {}", style("✗").red().bold(), problem);
    }
    anyhow::bail!(
        "{} invalid value(s) in {}",
        problems.len(),
        manager.config_path().display()
    )
}

pub fn config_init(manager: &ConfigManager) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to write default configuration")?;

    if created {
        println!(
            "{} Wrote {}",
            style("✓").green().bold(),
            manager.config_path().display()
        );
    } else {
        println!(
            "Config file already exists at {}",
            manager.config_path().display()
        );
    }
    Ok(())
}

pub fn config_reset(manager: &ConfigManager, force: bool) -> Result<()> {
    if !force {
        println!(
            "Overwrite {} with defaults? (y/N)",
            manager.config_path().display()
        );
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    manager.reset().context("Failed to reset configuration")?;
    println!("{} Configuration reset", style("✓").green().bold());
    Ok(())
}

/// Prints input problems for the user and turns everything else into an error
fn report<T>(result: literalura_core::Result<T>, context: &'static str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_user_error(&e) => {
            log::debug!("{}", e);
            println!("{}", style(e.user_message()).yellow());
            Ok(None)
        }
        Err(e) => Err(anyhow::Error::new(e).context(context)),
    }
}

fn is_user_error(err: &AppError) -> bool {
    err.severity() == ErrorSeverity::UserInput
}

fn print_books(books: &[Book], empty_message: &str) {
    if books.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for book in books {
        println!("{}", render_book(book));
    }
}

fn print_authors(authors: &[AuthorSummary], empty_message: &str) {
    if authors.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for summary in authors {
        println!("{}", render_author(summary));
    }
}

fn render_book(book: &Book) -> String {
    format!(
        "--------- BOOK ---------\n\
         Title: {}\n\
         Author(s): {}\n\
         Language: {}\n\
         Downloads: {}\n\
         ------------------------",
        book.title,
        book.author_names(),
        book.language.name(),
        format_optional(book.download_count),
    )
}

fn render_author(summary: &AuthorSummary) -> String {
    format!(
        "Author: {}\n\
         Born: {}\n\
         Died: {}\n\
         Books: [{}]\n",
        summary.author.name,
        format_optional(summary.author.birth_year),
        format_optional(summary.author.death_year),
        summary.titles.join(", "),
    )
}

fn format_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unknown".to_string(),
    }
}
