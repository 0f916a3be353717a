// src/server/mod.rs

//! JSON API over the catalog cache.
//!
//! Every handler is a read-only projection of cache and scheduler state,
//! except the manual scrape trigger, which funnels into the same refresh
//! path as the timer.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::cache::CatalogCache;
use crate::error::Result;
use crate::models::{BookRecord, Config};
use crate::pipeline::RefreshScheduler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<CatalogCache>,
    pub scheduler: Arc<RefreshScheduler>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        cache: Arc<CatalogCache>,
        scheduler: Arc<RefreshScheduler>,
    ) -> Self {
        Self {
            config,
            cache,
            scheduler,
            started_at: Utc::now(),
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/books", get(books_handler))
        .route("/api/books/{id}", get(book_handler))
        .route("/api/scrape", get(scrape_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

/// Bind and serve the API until the process exits.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.bind_addr, state.config.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("API listening on http://{}", addr);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let stats = state.cache.stats();
    Json(json!({
        "status": "online",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "scraping": {
            "active": state.scheduler.is_active(),
            "source": state.config.scraper.source_label,
            "last_refreshed": state.cache.last_refreshed_at(),
            "categories": stats.categories,
            "total_books": stats.total_books,
            "auto_refresh_secs": state.config.refresh.interval_secs,
        },
        "timestamp": Utc::now(),
        "uptime_secs": (Utc::now() - state.started_at).num_seconds(),
    }))
}

async fn categories_handler(State(state): State<AppState>) -> Json<Value> {
    let categories = state.cache.categories();
    Json(json!({
        "count": categories.len(),
        "categories": categories,
    }))
}

#[derive(Debug, Deserialize)]
struct BooksQuery {
    category: Option<String>,
}

async fn books_handler(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> Json<Value> {
    let books = state.cache.books(query.category.as_deref());
    Json(json!({
        "source": state.config.scraper.source_label,
        "scraped_at": state.cache.last_refreshed_at(),
        "count": books.len(),
        "books": books,
    }))
}

async fn book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<BookRecord>, (StatusCode, Json<Value>)> {
    match state.cache.book(&id) {
        Some(book) => Ok(Json(book)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "book not found", "id": id })),
        )),
    }
}

async fn scrape_handler(State(state): State<AppState>) -> Json<Value> {
    let outcome = state.scheduler.refresh_now().await;
    Json(json!({
        "message": "Manual refresh complete",
        "scraped_at": outcome.refreshed_at,
        "total_books": outcome.total_books,
        "scraped_categories": outcome.scraped_categories,
        "fallback_categories": outcome.fallback_categories,
    }))
}

async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::services::Fetch;

    struct EmptyFetcher;

    #[async_trait]
    impl Fetch for EmptyFetcher {
        async fn fetch(&self, _url: &str) -> String {
            String::new()
        }
    }

    fn state() -> AppState {
        let config = Arc::new(Config::default());
        let cache = Arc::new(CatalogCache::new());
        let scheduler = Arc::new(RefreshScheduler::new(
            Arc::clone(&config),
            Arc::new(EmptyFetcher),
            Arc::clone(&cache),
        ));
        AppState::new(config, cache, scheduler)
    }

    #[tokio::test]
    async fn router_accepts_every_handler() {
        // Route registration checks the axum Handler bound on each
        // handler future, including the scrape -> refresh chain.
        let _router = build_router(state());
    }

    #[tokio::test]
    async fn health_reflects_cache_counts() {
        let state = state();
        state.scheduler.refresh_now().await;

        let Json(body) = health_handler(State(state.clone())).await;
        assert_eq!(body["status"], "online");
        assert_eq!(body["scraping"]["active"], false);
        assert_eq!(
            body["scraping"]["categories"],
            state.config.categories.len()
        );
        assert!(body["scraping"]["total_books"].as_u64().unwrap() > 0);
        assert!(!body["scraping"]["last_refreshed"].is_null());
    }

    #[tokio::test]
    async fn health_before_first_cycle_has_no_timestamp() {
        let Json(body) = health_handler(State(state())).await;
        assert!(body["scraping"]["last_refreshed"].is_null());
        assert_eq!(body["scraping"]["total_books"], 0);
    }

    #[tokio::test]
    async fn books_endpoint_filters_by_category() {
        let state = state();
        state.scheduler.refresh_now().await;

        let Json(all) = books_handler(
            State(state.clone()),
            Query(BooksQuery { category: None }),
        )
        .await;
        let Json(fiction) = books_handler(
            State(state.clone()),
            Query(BooksQuery {
                category: Some("fiction".to_string()),
            }),
        )
        .await;
        let Json(unknown) = books_handler(
            State(state),
            Query(BooksQuery {
                category: Some("poetry".to_string()),
            }),
        )
        .await;

        assert!(all["count"].as_u64().unwrap() > fiction["count"].as_u64().unwrap());
        assert_eq!(fiction["count"], 3);
        assert_eq!(unknown["count"], 0);
        assert_eq!(unknown["books"], json!([]));
    }

    #[tokio::test]
    async fn book_lookup_returns_404_for_unknown_id() {
        let state = state();
        state.scheduler.refresh_now().await;

        let found = book_handler(State(state.clone()), Path("fiction-1".to_string())).await;
        assert_eq!(found.unwrap().0.title, "The Thursday Murder Club");

        let missing = book_handler(State(state), Path("fiction-99".to_string())).await;
        let (status, Json(body)) = missing.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "book not found");
    }

    #[tokio::test]
    async fn scrape_endpoint_triggers_a_cycle() {
        let state = state();
        assert!(state.cache.last_refreshed_at().is_none());

        let Json(body) = scrape_handler(State(state.clone())).await;
        assert_eq!(body["fallback_categories"], state.config.categories.len());
        assert!(state.cache.last_refreshed_at().is_some());
    }
}
