mod database;
mod error;
mod handlers;
mod models;
mod sku_code;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use dotenvy::dotenv;
use std::env;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use database::{create_database_pool, init_schema, Database};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    // Initialize database
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    let db = create_database_pool(&database_url).await
        .expect("Failed to connect to database");

    init_schema(&db).await
        .expect("Failed to initialize database schema");

    // Build the application router
    let app = create_router(db);

    // Get port from environment or use default (4000, where the SKU
    // frontend expects the backend)
    let port = env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    let addr = format!("0.0.0.0:{}", port);

    println!("🚀 SKU backend starting on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn create_router(db: Database) -> Router {
    Router::new()
        // Status indicator poll
        .route("/health", get(handlers::health))

        // Location registry
        .route("/api/getLocations", get(handlers::locations::get_locations))
        .route("/api/addLocation", post(handlers::locations::add_location))
        .route("/api/removeLocation", post(handlers::locations::remove_location))

        // SKU records
        .route("/api/getSKUs", get(handlers::skus::get_skus))
        .route("/api/checkSKU", get(handlers::skus::check_sku))
        .route("/api/generateSKU", post(handlers::skus::generate_sku))
        .route("/api/saveSKU", post(handlers::skus::save_sku))
        .route("/api/updateSKU/:id", put(handlers::skus::update_sku))

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB
        )
        .with_state(db)
}
