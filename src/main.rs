//! Server hosting the fitdesk admin console

#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::{extract::DefaultBodyLimit, routing::any, Router};
    use fitdesk::app::*;
    use fitdesk_server::proxy::{forward, Upstream, UPLOAD_LIMIT};
    use fitdesk_server::signal_handler::{shutdown_channel, signal_handler, wait_for_shutdown};
    use fitdesk_shared::urls::{API_BASE_URL, MEDIA_BASE_URL};
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing::{debug, error, info};

    let config = match fitdesk_server::config::Config::try_create() {
        Ok(x) => x,
        Err(e) => {
            panic!("Error reading config: {e}.");
        }
    };

    // keeps the log file writer alive until main returns
    let _log_guard = match fitdesk_server::tracing_setup::init(&config) {
        Ok(x) => x,
        Err(e) => {
            panic!("Unable to install tracing subscriber: {e}.");
        }
    };
    debug!("Tracing enabled.");

    let proxy_router = |base_url: &str| match Upstream::new(base_url) {
        Ok(upstream) => Router::new()
            .route("/{*path}", any(forward))
            .layer(DefaultBodyLimit::max(UPLOAD_LIMIT))
            .with_state(upstream),
        Err(e) => {
            panic!("Cannot forward to {base_url}: {e}.");
        }
    };
    info!(
        "forwarding {API_BASE_URL} to {} and {MEDIA_BASE_URL} to {}",
        config.backend.api_url, config.backend.media_url
    );

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    let leptos_options = config.leptos_options.clone();
    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options.clone())
        .nest(API_BASE_URL, proxy_router(&config.backend.api_url))
        .nest(MEDIA_BASE_URL, proxy_router(&config.backend.media_url))
        .layer(TraceLayer::new_for_http());

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signals = tokio::spawn(signal_handler(shutdown_rx.clone(), shutdown_tx.clone()));

    info!("listening on http://{}", &leptos_options.site_addr);
    let listener = match tokio::net::TcpListener::bind(&leptos_options.site_addr).await {
        Ok(x) => x,
        Err(e) => {
            panic!("Unable to bind to {}: {e}.", leptos_options.site_addr);
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
        .await
    {
        error!("Server stopped with error: {e}");
    }
    // stop the signal handler as well if the server ended on its own
    shutdown_tx.send_replace(fitdesk_server::signal_handler::InShutdown::Yes);
    if let Ok(Err(e)) = signals.await {
        error!("Signal handler failed: {e}");
    }
    info!("Shut down.");
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
