//! Blog HTTP server.
//!
//! Built on `tiny_http`, with a fixed pool of workers pulling requests from
//! one shared listener:
//!
//! ```text
//!                ┌──────────────────────┐
//!                │  tiny_http::Server   │
//!                └──────────┬───────────┘
//!          ┌────────────────┼────────────────┐
//!          ▼                ▼                ▼
//!     ┌─────────┐      ┌─────────┐      ┌─────────┐
//!     │worker 0 │      │worker 1 │  …   │worker N │   rayon pool
//!     └────┬────┘      └────┬────┘      └────┬────┘
//!          └────────────────┼────────────────┘
//!                           ▼
//!                  App::handle (router)
//!                           │
//!                           ▼
//!                  SqliteStore / GeoLocator
//! ```
//!
//! Ctrl+C unblocks every worker and the server returns.

use crate::{
    config::SiteConfig,
    http::{HttpRequest, HttpResponse},
    log,
    router::App,
};
use anyhow::{Context, Result, anyhow};
use std::{
    io::Read,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Largest request body read into memory.
const MAX_BODY_BYTES: u64 = 1 << 20;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve the blog until Ctrl+C.
///
/// 1. Binds to the configured interface and port (with auto-retry on port conflict)
/// 2. Sets up Ctrl+C handler for graceful shutdown
/// 3. Runs `[serve] workers` request loops on a rayon pool
pub fn serve_site(config: Arc<SiteConfig>) -> Result<()> {
    let interface = config.bind_addr()?;
    let workers = config.serve.workers.max(1);
    let app = App::open(Arc::clone(&config))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        // one wake-up per blocked worker
        for _ in 0..workers {
            server_for_signal.unblock();
        }
    })
    .context("Failed to set Ctrl+C handler")?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("jotter-worker-{i}"))
        .build()
        .context("Failed to build worker pool")?;

    log!("serve"; "http://{} ({} workers)", addr, workers);

    pool.scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|_| worker_loop(&server, &app));
        }
    });

    Ok(())
}

/// Pull and answer requests until the server is unblocked.
fn worker_loop(server: &Server, app: &App) {
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, app) {
            log!("serve"; "request error: {e}");
        }
    }
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Buffer a `tiny_http` request, route it and send the response.
fn handle_request(mut request: Request, app: &App) -> Result<()> {
    let incoming = read_request(&mut request)?;
    let response = app.handle(&incoming);
    respond(request, response)
}

fn read_request(request: &mut Request) -> Result<HttpRequest> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut body)
        .context("Failed to read request body")?;

    Ok(HttpRequest {
        method: request.method().clone(),
        url: request.url().to_owned(),
        headers: request
            .headers()
            .iter()
            .map(|h| (h.field.as_str().to_string(), h.value.as_str().to_owned()))
            .collect(),
        body,
        remote_addr: request.remote_addr().map(SocketAddr::ip),
    })
}

fn respond(request: Request, response: HttpResponse) -> Result<()> {
    let mut out = Response::from_data(response.body).with_status_code(StatusCode(response.status));

    if let Some(content_type) = response.content_type {
        out.add_header(header("Content-Type", content_type)?);
    }
    if let Some(location) = &response.location {
        out.add_header(header("Location", location)?);
    }

    request.respond(out)?;
    Ok(())
}

fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header {field}: {value}"))
}
