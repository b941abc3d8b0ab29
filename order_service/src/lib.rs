use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    http::Method,
    routing::{get, MethodRouter},
    Router,
};
use deploy_config::DeploymentConfig;
use ethers::providers::Middleware;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::{config::ServiceConfig, state::AppState};

pub mod config;
pub mod ethers_client;
pub mod handlers;
pub mod state;

/// The API accepts its query-string parameters on both GET and POST.
fn get_or_post<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: axum::handler::Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    get(handler.clone()).post(handler)
}

pub fn router<M: Middleware + 'static>(state: Arc<AppState<M>>) -> Router {
    use handlers::{customer, health, merchant, utilities};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(
            "/api/getCustomerAvailableBalance",
            get_or_post(customer::get_available_balance::<M>),
        )
        .route("/api/createOrder", get_or_post(customer::create_order::<M>))
        .route(
            "/api/getOrderStatus",
            get_or_post(customer::get_order_status::<M>),
        )
        .route("/api/cancelOrder", get_or_post(merchant::cancel_order::<M>))
        .route(
            "/api/getCustomerPublicAddress",
            get_or_post(customer::get_public_address::<M>),
        )
        .route(
            "/api/getTransactionStatus",
            get_or_post(utilities::get_transaction_status::<M>),
        )
        .route("/api/mintTokens", get_or_post(utilities::mint_tokens::<M>))
        .route(
            "/api/transferTokens",
            get_or_post(utilities::transfer_tokens::<M>),
        )
        .route("/health", get(health::handler::<M>))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

pub async fn bootstrap(config: ServiceConfig) -> anyhow::Result<()> {
    let deployment = DeploymentConfig::load(&config.deploy_config).with_context(|| {
        format!(
            "failed to load deployment config {}",
            config.deploy_config.display()
        )
    })?;
    let profile = deployment.network(&config.network)?;
    let secrets = profile.secrets_from_env();

    let (order_book, main_wallet) = ethers_client::get_order_book_client(
        profile,
        &secrets,
        &config.contract_network_config(),
    )?;
    ethers_client::check_chain_id(&order_book, profile).await;
    info!("order book contract at {:?}", order_book.address());

    let app = router(Arc::new(AppState::new(order_book, main_wallet)));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Running order service on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        return std::future::pending().await;
    }
    info!("shutting down");
}
