//! HTTP-backed product source.
//!
//! One read endpoint returning a JSON array of products; no auth, no
//! pagination, no schema versioning. After the payload is decoded the
//! loader holds it back for a fixed delay so downstream loading states
//! stay observable against fast endpoints.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use stockroom_core::{FetchError, Product, ProductSource};

/// Environment variable naming the product endpoint.
pub const ENDPOINT_ENV: &str = "STOCKROOM_PRODUCTS_URL";

/// Latency imposed after the response is otherwise ready.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Fetches the product collection over HTTP.
///
/// No retries, no timeout, no cancellation: a failed fetch surfaces a
/// [`FetchError`] for the view to swallow into its failed-load state, and
/// a hung endpoint hangs the loading state until the caller gives up.
pub struct RemoteLoader {
    client: Client,
    endpoint: Url,
    post_fetch_delay: Duration,
}

impl RemoteLoader {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            post_fetch_delay: DEFAULT_DELAY,
        }
    }

    /// Build a loader from `STOCKROOM_PRODUCTS_URL`, loading `.env` first.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        let raw = std::env::var(ENDPOINT_ENV)
            .with_context(|| format!("{ENDPOINT_ENV} not set"))?;
        let endpoint = Url::parse(&raw)
            .with_context(|| format!("{ENDPOINT_ENV} is not a valid URL: {raw}"))?;
        Ok(Self::new(endpoint))
    }

    /// Override the simulated latency. Tests drop it to zero.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.post_fetch_delay = delay;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// GET the endpoint, decode the product array, then impose the
    /// simulated latency. The delay comes after the payload is ready, not
    /// before the request starts, and only on the success path.
    pub async fn fetch(&self) -> Result<Vec<Product>, FetchError> {
        debug!(endpoint = %self.endpoint, "fetching product collection");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(FetchError::network)?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "product endpoint answered non-2xx");
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::network)?;
        let products: Vec<Product> =
            serde_json::from_slice(&body).map_err(FetchError::malformed)?;

        sleep(self.post_fetch_delay).await;

        debug!(count = products.len(), "product collection ready");
        Ok(products)
    }
}

#[async_trait]
impl ProductSource for RemoteLoader {
    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        self.fetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    /// Serve exactly one canned HTTP response on a loopback port and
    /// report when the response bytes were written.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, oneshot::Receiver<Instant>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (written_tx, written_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            let _ = written_tx.send(Instant::now());
        });

        let url = Url::parse(&format!("http://{addr}/products")).unwrap();
        (url, written_rx)
    }

    const PAYLOAD: &str = r#"[
        {"id": 1, "category": "Fruits", "name": "Apple", "price": "$1", "stocked": true},
        {"id": 4, "category": "Vegetables", "name": "Spinach", "price": "$2", "stocked": true}
    ]"#;

    #[tokio::test]
    async fn fetch_decodes_product_array() {
        init_tracing();
        let (url, _written) = serve_once("200 OK", PAYLOAD).await;
        let loader = RemoteLoader::new(url).with_delay(Duration::ZERO);

        let products = loader.fetch().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Apple");
        assert_eq!(products[1].category, "Vegetables");
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        init_tracing();
        let (url, _written) = serve_once("503 Service Unavailable", "").await;
        let loader = RemoteLoader::new(url).with_delay(Duration::ZERO);

        match loader.fetch().await {
            Err(FetchError::Status { status }) => assert_eq!(status, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_payload_error() {
        init_tracing();
        let (url, _written) = serve_once("200 OK", r#"{"not": "an array"}"#).await;
        let loader = RemoteLoader::new(url).with_delay(Duration::ZERO);

        match loader.fetch().await {
            Err(FetchError::MalformedPayload { .. }) => {}
            other => panic!("expected payload error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delay_applies_after_the_response_is_ready() {
        init_tracing();
        let (url, written) = serve_once("200 OK", PAYLOAD).await;
        let delay = Duration::from_millis(200);
        let loader = RemoteLoader::new(url).with_delay(delay);

        let started = Instant::now();
        let products = loader.fetch().await.unwrap();
        let finished = Instant::now();
        assert_eq!(products.len(), 2);

        // The response itself arrived well before the collection did; the
        // gap between the two is the simulated latency.
        let written_at = written.await.unwrap();
        assert!(finished.duration_since(started) >= delay);
        assert!(finished.duration_since(written_at) >= delay - Duration::from_millis(10));
    }

    #[tokio::test]
    async fn failure_path_skips_the_delay() {
        init_tracing();
        let (url, _written) = serve_once("500 Internal Server Error", "").await;
        // Keep the full default delay: the error must come back without it.
        let loader = RemoteLoader::new(url);

        let started = Instant::now();
        let result = loader.fetch().await;
        assert!(matches!(result, Err(FetchError::Status { status: 500 })));
        assert!(started.elapsed() < DEFAULT_DELAY);
    }

    #[test]
    fn from_env_requires_the_endpoint_variable() {
        std::env::remove_var(ENDPOINT_ENV);
        assert!(RemoteLoader::from_env().is_err());
    }
}
