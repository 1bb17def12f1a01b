//! Single binary web server: fixtures REST API, plus an optional built SPA served at `/`.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Settings come from `fixtures.toml` (or the file named
//! by FIXTURES_CONFIG); HOST, PORT and STATIC_DIR env vars override it.

use actix_files::Files;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use std::sync::RwLock;
use tournament_fixtures_web::{api, AppConfig, FixtureStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::load().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!(
        "Default match config: best of {}, {} points, deuce {} (cap {}), court {}",
        config.match_defaults.max_sets,
        config.match_defaults.points_to_win,
        config.match_defaults.deuce,
        config.match_defaults.deciding_point,
        config.match_defaults.court_number
    );

    let state = Data::new(RwLock::new(FixtureStore::new(config.match_defaults)));
    let static_dir = config.static_dir.clone();
    if let Some(dir) = &static_dir {
        log::info!("Serving static files from {}", dir.display());
    }

    HttpServer::new(move || {
        let app = App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure);
        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind(bind)?
    .run()
    .await
}
