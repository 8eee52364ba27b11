//! Embedded dashboard server.

#![allow(missing_docs)]

use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{debug, info, warn};

use crate::config::WebConfig;
use crate::context::DashContext;
use crate::controls::ControlValues;
use crate::error::DashError;
use crate::layout::ComponentId;
use crate::summary::DatasetSummary;

const INDEX_HTML: &str = include_str!("web/ui/index.html");
const APP_JS: &str = include_str!("web/ui/app.js");
const APP_CSS: &str = include_str!("web/ui/styles.css");

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    changed: Vec<String>,
    #[serde(default)]
    inputs: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateResponse {
    id: u64,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl UpdateResponse {
    fn ok(id: u64, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: u64, error: String) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Handles one `/api/update` body. Never fails: problems are reported in the response.
pub(crate) fn handle_update(body: &str, ctx: &DashContext) -> UpdateResponse {
    let request: UpdateRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => return UpdateResponse::error(0, format!("invalid request: {err}")),
    };
    let mut changed = Vec::with_capacity(request.changed.len());
    for name in &request.changed {
        match ComponentId::parse(name) {
            Some(id) => changed.push(id),
            None => {
                return UpdateResponse::error(request.id, format!("unknown component '{name}'"));
            }
        }
    }
    let values = request.inputs.into_iter().collect::<ControlValues>();
    let outputs = ctx
        .dispatch(&changed, &values)
        .into_iter()
        .map(|(id, chart)| {
            let chart = serde_json::to_value(chart).unwrap_or(Value::Null);
            (id.as_str().to_string(), chart)
        })
        .collect::<Map<_, _>>();
    UpdateResponse::ok(request.id, json!({ "outputs": outputs }))
}

pub struct WebServer {
    handle: thread::JoinHandle<()>,
    pub listen: String,
}

impl WebServer {
    /// Blocks until the accept loop ends.
    pub fn join(self) -> Result<(), DashError> {
        self.handle
            .join()
            .map_err(|_| DashError::Web("web server thread panicked".into()))
    }
}

pub fn start_web_server(config: &WebConfig, ctx: Arc<DashContext>) -> Result<WebServer, DashError> {
    let server = Server::http(config.listen.as_str())
        .map_err(|err| DashError::Web(format!("web bind {}: {err}", config.listen).into()))?;
    let listen = server
        .server_addr()
        .to_ip()
        .map_or_else(|| config.listen.to_string(), |addr| addr.to_string());
    info!(listen = %listen, "dashboard server started");

    let handle = thread::Builder::new()
        .name("launch-dash-web".to_string())
        .spawn(move || {
            for request in server.incoming_requests() {
                handle_request(request, &ctx);
            }
            debug!("web accept loop stopped");
        })
        .map_err(|err| DashError::Web(format!("spawn web thread: {err}").into()))?;

    Ok(WebServer { handle, listen })
}

fn handle_request(mut request: Request, ctx: &DashContext) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("");
    debug!(method = %method, path, "request");

    match (&method, path) {
        (Method::Get, "/") => respond(request, 200, "text/html; charset=utf-8", INDEX_HTML),
        (Method::Get, "/app.js") => respond(request, 200, "application/javascript", APP_JS),
        (Method::Get, "/styles.css") => respond(request, 200, "text/css", APP_CSS),
        (Method::Get, "/api/layout") => {
            let body = serde_json::to_string(ctx.layout()).unwrap_or_else(|_| "{}".to_string());
            respond(request, 200, "application/json", body);
        }
        (Method::Get, "/api/summary") => {
            let summary = DatasetSummary::from_table(ctx.table());
            let body = serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string());
            respond(request, 200, "application/json", body);
        }
        (Method::Post, "/api/update") => {
            let mut body = String::new();
            if let Err(err) = request.as_reader().read_to_string(&mut body) {
                warn!(error = %err, "unreadable update body");
                let payload = json!({ "ok": false, "error": "invalid body" }).to_string();
                respond(request, 400, "application/json", payload);
                return;
            }
            let response = handle_update(&body, ctx);
            if let Some(error) = &response.error {
                warn!(error = %error, "rejected update");
            }
            let status = if response.ok { 200 } else { 400 };
            let payload = serde_json::to_string(&response)
                .unwrap_or_else(|_| json!({ "ok": false, "error": "encode" }).to_string());
            respond(request, status, "application/json", payload);
        }
        _ => respond(request, 404, "text/plain", "not found"),
    }
}

fn respond(request: Request, status: u16, content_type: &str, body: impl Into<String>) {
    let mut response = Response::from_string(body).with_status_code(StatusCode(status));
    if let Ok(header) = Header::from_bytes("Content-Type", content_type) {
        response.add_header(header);
    }
    if let Err(err) = request.respond(response) {
        debug!(error = %err, "client went away");
    }
}
