// FILE: crates/catalog/tests/query_tests.rs
//! Integration tests for catalog queries

use literalura_catalog::{CatalogService, ServiceConfig};
use literalura_content_sources::StaticSource;
use literalura_core::{AppError, AuthorPolicy, Language, RemoteAuthor, RemoteBook};
use literalura_database::StorePolicy;
use tempfile::TempDir;

type Result<T> = std::result::Result<T, AppError>;

fn seeded_source() -> StaticSource {
    StaticSource::default()
        .with_book(
            RemoteBook::new("Don Quijote")
                .with_language("es")
                .with_author(RemoteAuthor::new(
                    "Cervantes Saavedra, Miguel de",
                    Some(1547),
                    Some(1616),
                )),
        )
        .with_book(
            RemoteBook::new("Pride and Prejudice")
                .with_language("en")
                .with_author(RemoteAuthor::new("Austen, Jane", Some(1775), Some(1817))),
        )
        .with_book(
            RemoteBook::new("La Regenta")
                .with_language("es")
                .with_author(RemoteAuthor::new("Alas, Leopoldo", Some(1852), Some(1901))),
        )
        .with_book(
            RemoteBook::new("Lifespan Test")
                .with_language("fr")
                .with_author(RemoteAuthor::new("Mortal, A.", Some(1800), Some(1850)))
                .with_author(RemoteAuthor::new("Undying, B.", Some(1800), None)),
        )
}

async fn seeded_service(config: &ServiceConfig) -> Result<CatalogService<StaticSource>> {
    let service = CatalogService::open(config, seeded_source()).await?;
    for title in ["Don Quijote", "Pride and Prejudice", "La Regenta", "Lifespan Test"] {
        service.fetch_and_store(title).await?;
    }
    Ok(service)
}

#[tokio::test]
async fn test_list_books_in_insertion_order() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;

    let titles: Vec<_> = service
        .list_books()
        .await?
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(
        titles,
        vec!["Don Quijote", "Pride and Prejudice", "La Regenta", "Lifespan Test"]
    );
    Ok(())
}

#[tokio::test]
async fn test_books_by_language_filters_exactly() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;

    let spanish = service.books_by_language("es").await?;
    assert_eq!(spanish.len(), 2);
    assert!(spanish.iter().all(|b| b.language == Language::Spanish));

    let upper = service.books_by_language("EN").await?;
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].title, "Pride and Prejudice");

    assert!(service.books_by_language("pt").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_books_by_unknown_language() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;

    match service.books_by_language("de").await {
        Err(AppError::UnsupportedLanguage { code }) => assert_eq!(code, "de"),
        other => panic!("expected UnsupportedLanguage, got {other:?}"),
    }
    Ok(())
}

async fn alive_names(service: &CatalogService<StaticSource>, year: i32) -> Result<Vec<String>> {
    Ok(service
        .authors_alive_in(year)
        .await?
        .into_iter()
        .map(|summary| summary.author.name)
        .collect())
}

#[tokio::test]
async fn test_authors_alive_boundaries() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;

    assert_eq!(alive_names(&service, 1849).await?, vec!["Mortal, A."]);
    assert_eq!(
        alive_names(&service, 1800).await?,
        vec!["Austen, Jane", "Mortal, A."]
    );
    assert_eq!(alive_names(&service, 1799).await?, vec!["Austen, Jane"]);
    assert!(alive_names(&service, 1850).await?.is_empty());
    assert_eq!(alive_names(&service, 1860).await?, vec!["Alas, Leopoldo"]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_death_year_never_alive() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;

    for year in [1800, 1849, 1900, 2024, 2500] {
        let names = alive_names(&service, year).await?;
        assert!(!names.contains(&"Undying, B.".to_string()), "year {year}");
    }
    Ok(())
}

#[tokio::test]
async fn test_alive_includes_titles() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;

    let alive = service.authors_alive_in(1600).await?;
    assert_eq!(alive.len(), 1);
    assert_eq!(alive[0].titles, vec!["Don Quijote".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_negative_year_accepted() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;
    assert!(service.authors_alive_in(-500).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_authors_with_titles() -> Result<()> {
    let service = seeded_service(&ServiceConfig::in_memory()).await?;

    let authors = service.list_authors().await?;
    assert_eq!(authors.len(), 5);

    let austen = authors
        .iter()
        .find(|a| a.author.name == "Austen, Jane")
        .expect("Austen listed");
    assert_eq!(austen.titles, vec!["Pride and Prejudice".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_reuse_by_name_shares_author_rows() -> Result<()> {
    let source = StaticSource::default()
        .with_book(
            RemoteBook::new("Emma")
                .with_language("en")
                .with_author(RemoteAuthor::new("Austen, Jane", Some(1775), Some(1817))),
        )
        .with_book(
            RemoteBook::new("Persuasion")
                .with_language("en")
                .with_author(RemoteAuthor::new("Austen, Jane", Some(1775), Some(1817))),
        );

    let per_book = CatalogService::open(&ServiceConfig::in_memory(), source.clone()).await?;
    per_book.fetch_and_store("Emma").await?;
    per_book.fetch_and_store("Persuasion").await?;
    assert_eq!(per_book.list_authors().await?.len(), 2);

    let config = ServiceConfig::in_memory()
        .with_policy(StorePolicy::default().with_author_policy(AuthorPolicy::ReuseByName));
    let shared = CatalogService::open(&config, source).await?;
    shared.fetch_and_store("Emma").await?;
    shared.fetch_and_store("Persuasion").await?;

    let authors = shared.list_authors().await?;
    assert_eq!(authors.len(), 1);
    assert_eq!(
        authors[0].titles,
        vec!["Emma".to_string(), "Persuasion".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_catalog_file_persists_between_sessions() -> Result<()> {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("catalog.db");
    let config = ServiceConfig::new(path.to_string_lossy());

    {
        let service = seeded_service(&config).await?;
        assert_eq!(service.list_books().await?.len(), 4);
    }

    let reopened = CatalogService::open(&config, StaticSource::default()).await?;
    let books = reopened.list_books().await?;
    assert_eq!(books.len(), 4);
    assert_eq!(reopened.books_by_language("fr").await?[0].title, "Lifespan Test");
    Ok(())
}
