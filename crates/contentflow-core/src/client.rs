//! HTTP access to the content API.
//!
//! [`ContentApi`] is the seam between the studio and the network. The
//! [`HttpContentApi`] implementation makes exactly one request per call and
//! never retries.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ContentError;
use crate::wire::{ApiEnvelope, ApiErrorBody, CREATE_CONTENT_PATH, CreateContentBody};

const USER_AGENT: &str = concat!("contentflow/", env!("CARGO_PKG_VERSION"));
const GENERIC_HTTP_FAILURE: &str = "Failed to create content";

/// A backend that turns a creation request into a response envelope.
///
/// Implementations must return [`ContentError::Transport`] when, and only
/// when, the backend could not be reached. Every other failure is reported
/// as an application or decode error.
#[async_trait::async_trait]
pub trait ContentApi: Send + Sync + 'static {
    /// Submit one creation request.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Transport`] if the backend is unreachable.
    /// - [`ContentError::Application`] for a non-2xx response, or a body
    ///   that broke off after the status line.
    /// - [`ContentError::Decode`] for a 2xx body that is not an envelope.
    async fn create_content(&self, body: &CreateContentBody) -> Result<ApiEnvelope, ContentError>;
}

/// [`ContentApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpContentApi {
    /// Build a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if the base URL is empty, or
    /// [`ContentError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ContentError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ContentError::Config(
                "missing API URL: set CONTENTFLOW_API_URL or pass a base URL".to_owned(),
            ));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if is_loopback(base_url) {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ContentError::Transport)?;

        Ok(Self {
            endpoint: format!("{base_url}{CREATE_CONTENT_PATH}"),
            client,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ContentApi for HttpContentApi {
    async fn create_content(&self, body: &CreateContentBody) -> Result<ApiEnvelope, ContentError> {
        debug!(url = %self.endpoint, topic = %body.topic, "posting content request");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(ContentError::Transport)?;

        let status = resp.status();
        // Status line received: a broken body is an application failure.
        let text = resp.text().await.map_err(|e| ContentError::Application {
            status: Some(status.as_u16()),
            message: format!("failed to read response from content API: {e}"),
        })?;
        debug!(status = status.as_u16(), bytes = text.len(), "content API responded");

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_HTTP_FAILURE.to_owned());
            return Err(ContentError::Application {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Local endpoints are never routed through a system proxy.
fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .is_some_and(|host| host == "localhost" || host == "127.0.0.1" || host == "[::1]")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use crate::request::ContentForm;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn api(base_url: String) -> HttpContentApi {
        HttpContentApi::new(&ClientConfig {
            base_url,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn body() -> CreateContentBody {
        let req = ContentForm {
            topic: "Rust".to_owned(),
            keywords: "safety, speed".to_owned(),
            ..ContentForm::default()
        }
        .validate()
        .unwrap();
        CreateContentBody::from(&req)
    }

    #[tokio::test]
    async fn posts_json_and_decodes_envelope() {
        let app = Router::new().route(
            CREATE_CONTENT_PATH,
            post(|axum::Json(v): axum::Json<serde_json::Value>| async move {
                let topic = v["topic"].clone();
                let platforms = v["platforms"].clone();
                axum::Json(serde_json::json!({
                    "success": true,
                    "data": { "topic": topic, "platforms": platforms }
                }))
            }),
        );
        let envelope = api(serve(app).await).create_content(&body()).await.unwrap();
        assert_eq!(envelope.success, Some(true));
        let data = envelope.data.unwrap();
        assert_eq!(data.topic.as_deref(), Some("Rust"));
        assert_eq!(data.platforms, Some(vec!["blog".to_owned()]));
    }

    #[tokio::test]
    async fn non_2xx_maps_to_application_error() {
        let app = Router::new().route(
            CREATE_CONTENT_PATH,
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(serde_json::json!({ "error": "topic too long" })),
                )
            }),
        );
        let err = api(serve(app).await).create_content(&body()).await.unwrap_err();
        match err {
            ContentError::Application { status, message } => {
                assert_eq!(status, Some(400));
                assert_eq!(message, "topic too long");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_gets_generic_message() {
        let app = Router::new().route(
            CREATE_CONTENT_PATH,
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let err = api(serve(app).await).create_content(&body()).await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_HTTP_FAILURE);
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let app = Router::new().route(CREATE_CONTENT_PATH, post(|| async { "<html>ok</html>" }));
        let err = api(serve(app).await).create_content(&body()).await.unwrap_err();
        assert!(matches!(err, ContentError::Decode(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = api(format!("http://{addr}")).create_content(&body()).await.unwrap_err();
        assert!(err.is_unreachable(), "expected transport error, got {err:?}");
    }

    #[tokio::test]
    async fn truncated_body_is_not_treated_as_unreachable() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"succ",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
        });

        let err = api(format!("http://{addr}")).create_content(&body()).await.unwrap_err();
        assert!(!err.is_unreachable(), "server answered, got {err:?}");
        match err {
            ContentError::Application { status, .. } => assert_eq!(status, Some(200)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_base_url_is_config_error() {
        let err = HttpContentApi::new(&ClientConfig {
            base_url: "  ".to_owned(),
            ..ClientConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ContentError::Config(_)));
    }

    #[test]
    fn loopback_detection() {
        assert!(is_loopback("http://localhost:8000"));
        assert!(is_loopback("http://127.0.0.1:19999"));
        assert!(!is_loopback("https://ai-multi-agent-systems-backend.onrender.com"));
        assert!(!is_loopback("not a url"));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = api("http://localhost:8000/".to_owned());
        assert_eq!(api.endpoint(), "http://localhost:8000/api/create-content");
    }
}
