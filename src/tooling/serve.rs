//! HTTP service mode.
//!
//! `GET /occurrences?searchTerm=<type>[&user=<name>]` answers with the
//! occurrences as JSON, `GET /node-types` with the searchable types.
//! Requests are served one at a time on the calling thread.

use crate::tooling::cli::CliContext;
use crate::tooling::format::to_json;
use anyhow::{anyhow, Result};
use std::net::{IpAddr, SocketAddr};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

/// Status and JSON body of a routed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    pub status: u16,
    pub body: String,
}

impl JsonResponse {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: impl std::fmt::Display) -> Self {
        let body = serde_json::json!({ "error": message.to_string() }).to_string();
        Self { status, body }
    }
}

/// Bind and serve until the process is stopped.
pub fn run(context: &CliContext, interface: IpAddr, port: u16) -> Result<()> {
    let addr = SocketAddr::new(interface, port);
    let server = Server::http(addr).map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
    info!(%addr, "Serving occurrence search");
    println!("Listening on http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(context, request) {
            warn!("request error: {e}");
        }
    }
    Ok(())
}

fn handle_request(context: &CliContext, request: Request) -> Result<()> {
    debug!(method = %request.method(), url = request.url(), "Request");
    let response = if *request.method() == Method::Get {
        route(context, request.url())
    } else {
        JsonResponse::error(405, "Method not allowed")
    };
    send_json(request, response)
}

fn send_json(request: Request, response: JsonResponse) -> Result<()> {
    let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| anyhow!("invalid Content-Type header"))?;
    let http = Response::from_string(response.body)
        .with_status_code(StatusCode(response.status))
        .with_header(content_type);
    request.respond(http)?;
    Ok(())
}

/// Route a request target (`/path?query`) to its JSON response.
pub fn route(context: &CliContext, target: &str) -> JsonResponse {
    let url = match Url::parse("http://localhost/").and_then(|base| base.join(target)) {
        Ok(url) => url,
        Err(e) => return JsonResponse::error(400, format!("Invalid request target: {}", e)),
    };
    match url.path() {
        "/occurrences" => occurrences(context, &url),
        "/node-types" => match to_json(&context.finder().relevant_node_types()) {
            Ok(body) => JsonResponse::ok(body),
            Err(e) => JsonResponse::error(500, e),
        },
        _ => JsonResponse::error(404, "Not found"),
    }
}

fn occurrences(context: &CliContext, url: &Url) -> JsonResponse {
    let mut search_term = None;
    let mut user = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "searchTerm" => search_term = Some(value.into_owned()),
            "user" => user = Some(value.into_owned()),
            _ => {}
        }
    }
    let search_term = search_term.unwrap_or_default();
    if search_term.trim().is_empty() {
        return JsonResponse::ok("[]".to_string());
    }

    let render = match context.config().site.render_context(user.as_deref(), None) {
        Ok(render) => render,
        Err(e) => return JsonResponse::error(400, e),
    };
    let report = match context.finder().find_occurrences(search_term.trim(), &render) {
        Ok(report) => report,
        Err(e) => return JsonResponse::error(500, e),
    };
    if report.all_dimensions_failed() {
        warn!(node_type = %report.node_type, "Search failed in every dimension combination");
    }
    match to_json(&report.occurrences) {
        Ok(body) => JsonResponse::ok(body),
        Err(e) => JsonResponse::error(500, e),
    }
}
