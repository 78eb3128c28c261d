//! HTTP transport for batch requests
//!
//! Every request path is served by the same handler: validate the request,
//! hand the body to the [`BatchProcessor`] on the blocking pool and map the
//! outcome onto a status code.

use crate::validation::{read_body, validate_content_type, validate_method, RequestRejection};
use anyhow::Result;
use functions::{BatchProcessor, DispatchError};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use statefun_config::{ServerConfig, CONTENT_TYPE as OCTET_STREAM};
use std::convert::Infallible;
use std::net::TcpListener;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

/// Failure while serving one request
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Rejected(#[from] RequestRejection),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("batch worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl ServeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServeError::Rejected(rejection) => rejection.status_code(),
            ServeError::Dispatch(dispatch) if dispatch.is_client_error() => StatusCode::BAD_REQUEST,
            ServeError::Dispatch(_) | ServeError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Per-request logic shared by every connection
#[derive(Debug)]
pub struct RequestHandler {
    processor: Arc<BatchProcessor>,
    max_request_bytes: u64,
}

impl RequestHandler {
    pub fn new(processor: Arc<BatchProcessor>, max_request_bytes: u64) -> Self {
        Self {
            processor,
            max_request_bytes,
        }
    }

    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        match self.dispatch(request).await {
            Ok(body) => response(StatusCode::OK, OCTET_STREAM, body),
            Err(err) => {
                let status = err.status_code();
                if status.is_server_error() {
                    error!(status = status.as_u16(), error = %err, "Batch failed");
                } else {
                    warn!(status = status.as_u16(), error = %err, "Request rejected");
                }
                response(status, "text/plain; charset=utf-8", err.to_string())
            }
        }
    }

    async fn dispatch(&self, request: Request<Body>) -> Result<Vec<u8>, ServeError> {
        let (parts, body) = request.into_parts();
        debug!(method = %parts.method, path = %parts.uri.path(), "Request received");

        validate_method(&parts.method)?;
        validate_content_type(&parts.headers)?;
        let body = read_body(&parts.headers, body, self.max_request_bytes).await?;

        let processor = Arc::clone(&self.processor);
        let reply = tokio::task::spawn_blocking(move || processor.process_bytes(&body)).await??;
        Ok(reply)
    }
}

fn response(status: StatusCode, content_type: &'static str, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// HTTP server wrapping a [`RequestHandler`]
pub struct FunctionServer {
    config: ServerConfig,
    handler: Arc<RequestHandler>,
}

impl FunctionServer {
    pub fn new(config: ServerConfig, processor: BatchProcessor) -> Self {
        let handler = Arc::new(RequestHandler::new(
            Arc::new(processor),
            config.max_request_bytes,
        ));
        Self { config, handler }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn handler(&self) -> Arc<RequestHandler> {
        Arc::clone(&self.handler)
    }

    /// Bind the configured address and serve until the server fails
    pub async fn start(&self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;
        let handler = Arc::clone(&self.handler);

        let make_svc = make_service_fn(move |_conn| {
            let handler = Arc::clone(&handler);
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    let handler = Arc::clone(&handler);
                    async move { Ok::<_, Infallible>(handler.handle(req).await) }
                }))
            }
        });

        let server = Server::from_tcp(listener)?.serve(make_svc);

        info!("Function server listening on http://{}", local_addr);
        info!(
            functions = ?self.handler.processor.registry().function_types(),
            max_request_bytes = self.config.max_request_bytes,
            "Serving functions"
        );

        server.await?;
        Ok(())
    }
}
