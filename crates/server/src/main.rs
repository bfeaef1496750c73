use std::{any::Any, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use frame_api::{
    handle_post, mint::build_mint_transaction, render_get, reset_document, to_html, FrameContext,
};
use serde::Deserialize;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{FramePostBody, MintRequestBody, MintTransaction},
};
use spell_generation::{HttpSpellGenerator, MissingSpellGenerator, SpellGenerator};
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, Settings};

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Deserialize)]
struct MintQuery {
    #[serde(rename = "tokenURI")]
    token_uri: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let generator = build_generator(&settings)?;
    let frame = FrameContext::new(settings.public_url.clone(), generator, settings.mint_config());
    if settings.contract_address.is_none() {
        warn!("no contract address configured; mint requests will fail");
    }

    let app = build_router(Arc::new(AppState { frame }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, public_url = %settings.public_url, "frame server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_generator(settings: &Settings) -> anyhow::Result<Arc<dyn SpellGenerator>> {
    let Some(endpoint) = settings.generation_url.as_deref() else {
        warn!("no generation url configured; generate requests will restart the wizard");
        return Ok(Arc::new(MissingSpellGenerator));
    };
    info!(
        %endpoint,
        timeout_secs = settings.generation_timeout_secs,
        "spell generation enabled"
    );
    let generator = HttpSpellGenerator::new(
        endpoint,
        Duration::from_secs(settings.generation_timeout_secs),
    )?;
    Ok(Arc::new(generator))
}

fn build_router(state: Arc<AppState>) -> Router {
    let reset_html = to_html(&reset_document(&state.frame));
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/frame", get(frame_get).post(frame_post))
        .route("/frame", get(frame_get).post(frame_post))
        .route("/api/mint", post(mint_transaction))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(
            move |_panic: Box<dyn Any + Send + 'static>| panic_response(&reset_html),
        ))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn frame_get(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Html<String> {
    let param = query.as_deref().and_then(state_param);
    Html(to_html(&render_get(&state.frame, param)))
}

async fn frame_post(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Html<String> {
    let param = query.as_deref().and_then(state_param);
    let body = parse_frame_body(&body);
    let doc = handle_post(&state.frame, param, &body).await;
    Html(to_html(&doc))
}

async fn mint_transaction(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MintQuery>,
    body: Bytes,
) -> Result<Json<MintTransaction>, (StatusCode, Json<ApiError>)> {
    let token_uri = q
        .token_uri
        .filter(|uri| !uri.trim().is_empty())
        .or_else(|| {
            serde_json::from_slice::<MintRequestBody>(&body)
                .ok()
                .and_then(|b| b.token_uri)
        });

    build_mint_transaction(&state.frame.mint, token_uri.as_deref())
        .map(Json)
        .map_err(|e| {
            let status = match e.code {
                ErrorCode::Validation => StatusCode::BAD_REQUEST,
                ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(error = %e, "mint transaction rejected");
            (status, Json(ApiError::from(e)))
        })
}

/// Raw, still percent-encoded value of `state` in a query string.
fn state_param(query: &str) -> Option<&str> {
    query.split('&').find_map(|pair| pair.strip_prefix("state="))
}

/// Frame clients post arbitrary JSON; anything unreadable counts as no input.
fn parse_frame_body(raw: &[u8]) -> FramePostBody {
    if raw.is_empty() {
        return FramePostBody::default();
    }
    serde_json::from_slice(raw).unwrap_or_else(|err| {
        debug!(%err, "unreadable frame body; treating as empty");
        FramePostBody::default()
    })
}

fn panic_response(reset_html: &str) -> Response {
    error!("frame handler panicked; restarting wizard");
    Html(reset_html.to_string()).into_response()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
