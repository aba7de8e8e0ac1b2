use actix_web::{App, HttpServer, middleware, web};

use portal_admin::api::ApiClient;
use portal_admin::auth::middleware::route_guard;
use portal_admin::config::AppConfig;
use portal_admin::{AppState, routes, session_middleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let api = ApiClient::new(&config.api_base_url, config.api_timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    let secret_key = config.cookie_key();
    let secure = config.cookie_secure;
    let bind_addr = config.bind_addr.clone();

    log::info!("API at {}", config.api_base_url);
    log::info!("Starting server at http://{bind_addr}");

    let state = web::Data::new(AppState { api, config });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::from_fn(route_guard))
            .wrap(session_middleware(secret_key.clone(), secure))
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
