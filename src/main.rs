use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use groq_relay::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ConfigLoader::new()?.into_config();
    let listen: SocketAddr = config.listen_addr.parse()?;

    if std::env::var_os(&config.api_keys_env).is_none() {
        tracing::warn!(
            var = %config.api_keys_env,
            "API key variable is not set; requests will fail until it is"
        );
    }

    tracing::info!(
        flavor = ?config.flavor,
        path = %config.route_path,
        upstream = %config.upstream_url,
        "starting relay"
    );
    let app = groq_relay::app_from_config(config)?;

    let listener = TcpListener::bind(listen).await?;
    tracing::info!(%listen, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
