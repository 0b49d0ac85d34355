use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizsmith_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
    services::launcher::spawn_ui_launcher,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    config.validate_for_production().map_err(std::io::Error::other)?;

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let development = config.is_development();

    let state = AppState::new(config.clone())
        .await
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(state);

    log::info!("Starting quiz server on http://{}:{}", host, port);
    log::info!("Model: {}", config.openai_model);

    let server = HttpServer::new(move || {
        let cors = if development {
            Cors::permissive()
        } else {
            Cors::default()
        };

        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run();

    spawn_ui_launcher(&config);

    server.await
}
