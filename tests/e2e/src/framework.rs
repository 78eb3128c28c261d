//! Live server harness

use anyhow::{Context, Result};
use codec::EnvelopeCodec;
use function_server::FunctionServer;
use functions::{BatchProcessor, FunctionRegistry};
use statefun_config::{ServerConfig, CONTENT_TYPE};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Once};
use tokio::task::JoinHandle;
use tracing::info;
use types::{FromFunction, ToFunction};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Function server bound to `127.0.0.1:0`, stopped on drop
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
    handle: JoinHandle<Result<()>>,
}

impl TestServer {
    pub async fn start(registry: FunctionRegistry) -> Result<Self> {
        Self::start_with_config(registry, ServerConfig::default()).await
    }

    pub async fn start_with_config(registry: FunctionRegistry, config: ServerConfig) -> Result<Self> {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let server = FunctionServer::new(config, BatchProcessor::new(Arc::new(registry)));
        let handle = tokio::spawn(async move { server.serve(listener).await });
        info!("Test server started on {}", addr);

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            handle,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}/statefun", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST raw bytes with the protocol content type
    pub async fn post_bytes(&self, body: Vec<u8>) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url())
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .send()
            .await?)
    }

    /// Encode `request`, POST it and decode a successful reply
    pub async fn invoke(&self, request: &ToFunction) -> Result<FromFunction> {
        let codec = EnvelopeCodec::default();
        let response = self.post_bytes(codec.encode_request(request)?).await?;

        let status = response.status();
        let body = response.bytes().await?;
        anyhow::ensure!(
            status.is_success(),
            "server answered {}: {}",
            status,
            String::from_utf8_lossy(&body)
        );

        Ok(codec.decode_response(&body)?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
