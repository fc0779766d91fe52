use crate::Result;
use reqwest::Client as HttpClient;
use settee_core::{Credentials, RawResponse};
use std::time::Duration;

/// HttpTransport sends one request and hands back the completed response.
///
/// Connection failures and timeouts come back as `Err`; any status code,
/// including 4xx and 5xx, comes back as `Ok`.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, auth: Option<&Credentials>) -> Result<RawResponse>;
    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: &str,
        auth: Option<&Credentials>,
    ) -> Result<RawResponse>;
    async fn delete(&self, url: &str, auth: Option<&Credentials>) -> Result<RawResponse>;
}

/// reqwest-backed transport. Credentials go in an `Authorization: Basic` header.
pub struct ReqwestTransport {
    client: HttpClient,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>, insecure_skip_verify: bool) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: HttpClient) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        auth: Option<&Credentials>,
    ) -> Result<RawResponse> {
        let request = match auth {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            body,
            headers,
        })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, auth: Option<&Credentials>) -> Result<RawResponse> {
        self.send(self.client.get(url), auth).await
    }

    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: &str,
        auth: Option<&Credentials>,
    ) -> Result<RawResponse> {
        let request = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);
        self.send(request, auth).await
    }

    async fn delete(&self, url: &str, auth: Option<&Credentials>) -> Result<RawResponse> {
        self.send(self.client.delete(url), auth).await
    }
}
