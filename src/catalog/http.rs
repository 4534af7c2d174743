//! HTTP-backed catalog service.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::model::{Addon, Vehicle, VehicleId};

use super::{CatalogService, FetchError};

/// Catalog served over HTTP as JSON.
///
/// Expects `GET {base}/vehicles` and `GET {base}/addons?vehicleId={id}`.
/// Error responses may carry a `{"message": ...}` body, surfaced verbatim
/// as [`FetchError::ServerError`].
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpCatalog {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "catalog request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "catalog request failed");
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "An error occurred".to_string());
            return Err(FetchError::ServerError(message));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Unexpected(e.to_string()))
    }
}

/// Collapse transport failures into the closed taxonomy. A host that
/// tracks connectivity can preempt requests with [`FetchError::Offline`];
/// at this layer a dead link is indistinguishable from a broken one.
fn map_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::NetworkError
    } else {
        FetchError::Unexpected(error.to_string())
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        self.get_json("/vehicles").await
    }

    async fn fetch_addons(&self, vehicle: VehicleId) -> Result<Vec<Addon>, FetchError> {
        self.get_json(&format!("/addons?vehicleId={vehicle}")).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn config(base: &str) -> Config {
        Config {
            api_base_url: base.to_string(),
            request_timeout: Duration::from_millis(500),
            ..Config::default()
        }
    }

    /// Serve exactly one canned HTTP response on a local port, returning
    /// the base URL to reach it.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).await;
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let catalog = HttpCatalog::new(&config("http://localhost:8000/api/v1/")).unwrap();
        assert_eq!(catalog.base_url, "http://localhost:8000/api/v1");
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_error() {
        // reserved TEST-NET-1 address, nothing listens there
        let catalog = HttpCatalog::new(&config("http://192.0.2.1:9")).unwrap();
        let result = catalog.fetch_vehicles().await;
        assert!(matches!(
            result,
            Err(FetchError::NetworkError | FetchError::Timeout)
        ));
    }

    #[tokio::test]
    async fn server_error_message_is_carried_verbatim() {
        let base = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"message":"vehicle 7 is retired"}"#,
        )
        .await;
        let catalog = HttpCatalog::new(&config(&base)).unwrap();

        assert_eq!(
            catalog.fetch_vehicles().await,
            Err(FetchError::ServerError("vehicle 7 is retired".into()))
        );
    }

    #[tokio::test]
    async fn server_error_without_message_falls_back() {
        let base = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;
        let catalog = HttpCatalog::new(&config(&base)).unwrap();

        assert_eq!(
            catalog.fetch_vehicles().await,
            Err(FetchError::ServerError("An error occurred".into()))
        );
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back() {
        let base = serve_once("HTTP/1.1 500 Internal Server Error", "it broke").await;
        let catalog = HttpCatalog::new(&config(&base)).unwrap();

        assert_eq!(
            catalog.fetch_addons(1).await,
            Err(FetchError::ServerError("An error occurred".into()))
        );
    }
}
