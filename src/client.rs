// File: src/client.rs
use crate::config::Config;
use crate::error::ApiError;
use crate::model::Task;

use http::{header, Method, Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use std::sync::Arc;

type HttpsClient = Client<
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    String,
>;

#[derive(Serialize)]
struct CreateBody<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct UpdateBody {
    completed: bool,
}

/// Consumer of the Remote Collection API (`/api/todos`).
///
/// One HTTP call per method, no retries, no caching. Every failure is folded
/// into [`ApiError`] so the store can report it and move on.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: HttpsClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        let _: Uri = base_url
            .parse()
            .map_err(|e: http::uri::InvalidUri| ApiError::InvalidArgument(e.to_string()))?;

        let https_connector = if config.allow_insecure_certs {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            if root_store.is_empty() {
                return Err(ApiError::InvalidArgument(
                    "no valid system certificates found".to_string(),
                ));
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let client = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/api/todos/{}", self.base_url, id)
    }

    // --- READ OPERATIONS ---

    pub async fn list_todos(&self) -> Result<Vec<Task>, ApiError> {
        let bytes = self.send(Method::GET, self.collection_url(), None).await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Body(e.to_string()))
    }

    pub async fn get_todo(&self, id: &str) -> Result<Task, ApiError> {
        let bytes = self.send(Method::GET, self.item_url(id), None).await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Body(e.to_string()))
    }

    // --- WRITE OPERATIONS ---

    /// Create a todo. The server assigns `_id` and defaults `completed` to
    /// false; the request body carries the title only.
    pub async fn create_todo(&self, title: &str) -> Result<Task, ApiError> {
        let body = serde_json::to_string(&CreateBody { title })
            .map_err(|e| ApiError::Body(e.to_string()))?;
        let bytes = self
            .send(Method::POST, self.collection_url(), Some(body))
            .await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Body(e.to_string()))
    }

    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<Task, ApiError> {
        let body = serde_json::to_string(&UpdateBody { completed })
            .map_err(|e| ApiError::Body(e.to_string()))?;
        let bytes = self.send(Method::PUT, self.item_url(id), Some(body)).await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Body(e.to_string()))
    }

    /// Delete responds with a status line only; any 2xx is success.
    pub async fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.item_url(id), None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<String>,
    ) -> Result<hyper::body::Bytes, ApiError> {
        let uri: Uri = url
            .parse()
            .map_err(|e: http::uri::InvalidUri| ApiError::InvalidArgument(e.to_string()))?;

        tracing::debug!(%method, %url, "sending request");

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.unwrap_or_default())
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Body(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(bytes)
    }
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_tolerate_trailing_slash() {
        let client = ApiClient::new(&Config::new("http://localhost:5000/")).unwrap();
        assert_eq!(client.collection_url(), "http://localhost:5000/api/todos");
        assert_eq!(client.item_url("42"), "http://localhost:5000/api/todos/42");
    }

    #[test]
    fn create_body_carries_title_only() {
        let json = serde_json::to_value(CreateBody { title: "buy milk" }).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "buy milk" }));
    }
}
