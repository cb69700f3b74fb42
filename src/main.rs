use std::{env, net::IpAddr, net::SocketAddr};

use log::{info, warn};
use shipi18n::{
    Shipi18nClient,
    config::{self, API_KEY_VAR, ExecutionContext},
    proxy,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    config::load_dotenv();

    let host: IpAddr = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string())
        .parse()?;
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()?;

    let client = Shipi18nClient::from_env(ExecutionContext::Trusted);
    if client.config().key().is_none() {
        warn!("{API_KEY_VAR} is not set, translation requests will fail until it is");
    }

    let addr = SocketAddr::from((host, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Translation proxy listening on http://{addr}");

    axum::serve(listener, proxy::router(client)).await?;

    Ok(())
}
