use crate::transport::{HttpTransport, ReqwestTransport};
use crate::Result;
use settee_core::models::UserDocument;
use settee_core::{classify, classify_delete, urls};
use settee_core::{Config, Connection, Credentials, DocResult, HeaderMode, RawResponse};
use std::sync::Arc;
use std::time::Duration;

pub(crate) const JSON: &str = "application/json";

/// Settee REST API Client
///
/// Holds no state between calls beyond the connection, optional credentials
/// and the transport. Cloning is cheap and clones share the transport.
#[derive(Clone)]
pub struct Client {
    conn: Connection,
    auth: Option<Credentials>,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    /// Create a new client for the given database using the reqwest transport
    pub fn new(conn: Connection) -> Result<Self> {
        let transport = ReqwestTransport::new(None, false)?;
        Ok(Self::with_transport(conn, Arc::new(transport)))
    }

    /// Build a client from a loaded config file
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(
            Some(Duration::from_secs(config.timeout_secs)),
            config.insecure_skip_verify,
        )?;

        let client = Self::with_transport(config.connection(), Arc::new(transport));
        Ok(match config.credentials() {
            Some(creds) => client.with_credentials(creds),
            None => client,
        })
    }

    pub fn with_transport(conn: Connection, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            conn,
            auth: None,
            transport,
        }
    }

    /// Authenticate every request with HTTP basic auth
    pub fn with_credentials(mut self, creds: Credentials) -> Self {
        self.auth = Some(creds);
        self
    }

    /// A copy of this client acting as a different user, e.g. a server admin
    pub fn as_user(&self, creds: Credentials) -> Self {
        self.clone().with_credentials(creds)
    }

    /// A copy of this client pointed at another database on the same server
    pub fn database(&self, name: impl Into<String>) -> Self {
        Self {
            conn: self.conn.with_database(name),
            ..self.clone()
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn auth(&self) -> Option<&Credentials> {
        self.auth.as_ref()
    }

    pub(crate) async fn get_raw(
        &self,
        url: &str,
        auth: Option<&Credentials>,
    ) -> Result<RawResponse> {
        tracing::debug!(method = "GET", url = %url, "Sending request");
        let response = self.transport.get(url, auth).await?;
        tracing::debug!(status = response.status, "Response received");
        Ok(response)
    }

    pub(crate) async fn put_raw(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<RawResponse> {
        tracing::debug!(method = "PUT", url = %url, bytes = body.len(), "Sending request");
        let response = self
            .transport
            .put(url, body, content_type, self.auth())
            .await?;
        tracing::debug!(status = response.status, "Response received");
        Ok(response)
    }

    pub(crate) async fn delete_raw(&self, url: &str) -> Result<RawResponse> {
        tracing::debug!(method = "DELETE", url = %url, "Sending request");
        let response = self.transport.delete(url, self.auth()).await?;
        tracing::debug!(status = response.status, "Response received");
        Ok(response)
    }

    /// Server welcome document
    pub async fn server_info(&self) -> Result<DocResult> {
        let url = urls::server_url(&self.conn, None);
        let response = self.get_raw(&url, self.auth()).await?;
        Ok(classify(response, HeaderMode::Exclude))
    }

    /// Names of all databases on the server
    pub async fn all_databases(&self) -> Result<DocResult> {
        let url = urls::all_dbs_url(&self.conn, None);
        let response = self.get_raw(&url, self.auth()).await?;
        Ok(classify(response, HeaderMode::Exclude))
    }

    /// Create the client's database
    pub async fn create_database(&self) -> Result<DocResult> {
        let url = urls::database_url(&self.conn, None);
        let response = self.put_raw(&url, Vec::new(), JSON).await?;
        Ok(classify(response, HeaderMode::Include))
    }

    /// Delete the client's database and everything in it
    pub async fn delete_database(&self) -> Result<DocResult> {
        let url = urls::database_url(&self.conn, None);
        let response = self.delete_raw(&url).await?;
        Ok(classify_delete(response))
    }

    /// Register a user in `_users`
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        roles: Vec<String>,
    ) -> Result<DocResult> {
        let url = urls::user_url(&self.conn, None, username);
        let doc = UserDocument::new(username, password, roles);
        let response = self.put_raw(&url, serde_json::to_vec(&doc)?, JSON).await?;
        Ok(classify(response, HeaderMode::Include))
    }

    /// Add a server admin. Once one exists, this call itself needs admin credentials.
    pub async fn create_admin(&self, username: &str, password: &str) -> Result<DocResult> {
        let url = urls::admin_url(&self.conn, None, username);
        let body = serde_json::to_vec(password)?;
        let response = self.put_raw(&url, body, JSON).await?;
        Ok(classify(response, HeaderMode::Include))
    }

    /// Current security object of the database
    pub async fn get_security(&self) -> Result<DocResult> {
        let url = urls::security_url(&self.conn, None);
        let response = self.get_raw(&url, self.auth()).await?;
        Ok(classify(response, HeaderMode::Exclude))
    }

    /// Replace the security object of the database
    pub async fn set_security(&self, json: &str) -> Result<DocResult> {
        let url = urls::security_url(&self.conn, None);
        let response = self.put_raw(&url, json.as_bytes().to_vec(), JSON).await?;
        Ok(classify(response, HeaderMode::Include))
    }
}
