//! HTTP server and request routing

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::tutor::Tutor;

/// Maximum request body size (1MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// API HTTP server
pub struct ApiServer {
    tutor: Arc<Tutor>,
    port: u16,
}

impl ApiServer {
    pub fn new(tutor: Arc<Tutor>, port: u16) -> Self {
        Self { tutor, port }
    }

    /// Bind and start serving; returns the bound port (useful with port 0)
    pub async fn start(&self) -> Result<u16> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| anyhow!("Failed to bind to port {}: {}", self.port, e))?;
        let port = listener.local_addr()?.port();

        info!("edital-tutor server started: http://localhost:{}", port);

        let tutor = self.tutor.clone();

        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let io = TokioIo::new(stream);
                let tutor = tutor.clone();

                tokio::spawn(async move {
                    let service = service_fn(|req| {
                        let tutor = tutor.clone();
                        async move { handle_request(req, tutor).await }
                    });

                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        if !e.to_string().contains("connection closed") {
                            error!("Error serving connection: {}", e);
                        }
                    }
                });
            }
        });

        Ok(port)
    }
}

/// Route one HTTP request
async fn handle_request(
    req: Request<Incoming>,
    tutor: Arc<Tutor>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // Handle CORS preflight
    if method == Method::OPTIONS {
        return Ok(cors_response(
            Response::builder()
                .status(StatusCode::OK)
                .body(Full::new(Bytes::new()))
                .unwrap(),
        ));
    }

    let response = match (method, path.as_str()) {
        (Method::GET, "/health") => json_response(StatusCode::OK, r#"{"status":"ok"}"#),
        (method, "/api/generate") => handle_generate(method, req, tutor).await,
        _ => json_response(StatusCode::NOT_FOUND, r#"{"error":"Not Found"}"#),
    };

    Ok(cors_response(response))
}

/// Handle the generate endpoint
///
/// Check order mirrors the invocation contract: credential first (a missing
/// key answers 500 no matter what was sent), then method, then body.
async fn handle_generate(
    method: Method,
    req: Request<Incoming>,
    tutor: Arc<Tutor>,
) -> Response<Full<Bytes>> {
    let request_id = Uuid::new_v4();
    info!("[{}] {} /api/generate", request_id, method);

    if !tutor.is_configured() {
        return api_error_response(ApiError::MissingApiKey);
    }

    if method != Method::POST {
        return api_error_response(ApiError::MethodNotAllowed);
    }

    let body = match read_body_with_limit(req, MAX_BODY_SIZE).await {
        Ok(b) => b,
        Err(_) => {
            return api_error_response(ApiError::InvalidBody);
        }
    };

    match tutor.generate(&body).await {
        Ok(markdown) => {
            info!("[{}] generation succeeded", request_id);
            json_response(
                StatusCode::OK,
                &serde_json::to_string(&json!({ "markdown": markdown })).unwrap(),
            )
        }
        Err(e) => {
            error!("[{}] generation failed: {}", request_id, e);
            api_error_response(e)
        }
    }
}

/// Add CORS headers
fn cors_response(mut response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Origin", "*".parse().unwrap());
    headers.insert(
        "Access-Control-Allow-Methods",
        "GET, POST, OPTIONS".parse().unwrap(),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        "Content-Type".parse().unwrap(),
    );
    response
}

/// Read request body with size limit
async fn read_body_with_limit(req: Request<Incoming>, max_size: usize) -> Result<Bytes, String> {
    let limited = Limited::new(req.into_body(), max_size);
    match limited.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            let err_str = e.to_string();
            if err_str.contains("length limit exceeded") {
                Err(format!("Request body too large (max {} bytes)", max_size))
            } else {
                Err("Failed to read body".to_string())
            }
        }
    }
}

/// Create the JSON error response for an [`ApiError`]
fn api_error_response(error: ApiError) -> Response<Full<Bytes>> {
    let body = serde_json::to_string(&json!({ "error": error.to_string() })).unwrap();
    json_response(error.status(), &body)
}

/// Create JSON response
fn json_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
