use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use meal_menu::config::{ServerConfig, SiteConfig};
use meal_menu::provider::MenuSource;

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let server = ServerConfig::from_env();
    let source = MenuSource::from_env();
    let state = web::Data::new(api::ApiState::load(&source, SiteConfig::from_env()).await);

    tracing::info!(bind = %server.bind, ?source, "serving menu");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
            .app_data(state.clone())
            .service(api::index)
            .service(api::menu)
            .service(api::category)
    })
    .bind(server.bind.as_str())?
    .run()
    .await?;
    Ok(())
}
