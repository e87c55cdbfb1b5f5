use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use crate::{
    app::envy::{Envy, DEFAULT_PORT},
    media::{
        apis::jimeng::{client::JimengClient, transport::ReqwestTransport},
        poller::PollConfig,
    },
};

mod app;
mod media;

#[derive(Clone)]
pub struct AppState {
    pub jimeng: Arc<JimengClient>,
    pub poll_config: PollConfig,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    tracing::debug!(?envy, "loaded configuration");

    // vendor client
    let transport = match ReqwestTransport::new(Duration::from_secs(envy.jimeng_timeout_secs())) {
        Ok(transport) => transport,
        Err(e) => panic!("failed to build http client: {}", e),
    };
    let jimeng = JimengClient::new(
        envy.credentials(),
        envy.jimeng_api_host(),
        Arc::new(transport),
    );

    let state = AppState {
        jimeng: Arc::new(jimeng),
        poll_config: PollConfig::default(),
    };

    // app
    let app = app::router::create_router(state);

    let port = envy.port.unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    if let Err(e) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(%e, "server exited");
    }
}
