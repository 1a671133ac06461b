use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_locale::LocaleConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("catalog=info".parse()?))
        .init();

    let config = LocaleConfig::from_env()?;
    info!(
        locales = ?config.locales.iter().collect::<Vec<_>>(),
        default = config.locales.default_locale(),
        cookie = %config.cookie.name,
        "Locale routing configured"
    );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    let app = catalog_web::build_router(config);

    info!("Catalog web server starting on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
