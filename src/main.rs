use analytics_backend::{
    AppState,
    config::Config,
    db::create_pool,
    init_tracing,
    jobs::RedisExportQueue,
    middleware::request_tracking_middleware,
    routes::create_router,
};
use axum::{
    Server,
    http::{HeaderValue, Method, header},
    middleware::from_fn,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(origins)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config.logging());

    let db = create_pool(&config.database())?;

    let redis = redis::Client::open(config.redis_url.as_str())?;
    let export_queue = RedisExportQueue::new(redis, config.export().queue_key);

    let server = config.server();
    let cors = cors_layer(&server.cors_origins);
    let addr: SocketAddr = server.address().parse()?;

    let state = Arc::new(AppState::new(db, config, Arc::new(export_queue)));

    let app = create_router(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware));

    info!(address = %addr, "Analytics server listening");
    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
