//! Settee Client Library
//!
//! HTTP client for CouchDB-style document servers.
//!
//! ```rust,no_run
//! use settee_rs::{Client, Connection, Credentials};
//!
//! # async fn run() -> settee_rs::Result<()> {
//! let conn = Connection::new("http", "localhost", 5984, "orders");
//! let client = Client::new(conn)?.with_credentials(Credentials::new("app", "secret"));
//!
//! let created = client.create(r#"{"total": 12}"#, "order-1").await?;
//! if created.is_conflict() {
//!     println!("order-1 already exists");
//! }
//!
//! let doc = client.get("order-1").await?;
//! println!("{}", doc.body());
//! # Ok(())
//! # }
//! ```

mod client;
mod reader;
mod transport;
mod writer;

pub use client::Client;
pub use settee_core::payload::PayloadError;
pub use settee_core::{
    urls, Connection, Credentials, DocResult, HeaderMode, RawResponse, Reply, Staleness,
};
pub use transport::{HttpTransport, ReqwestTransport};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Document has no \"_id\" field and no id was given")]
    MissingId,

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl From<PayloadError> for ClientError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Malformed(e) => ClientError::Serialization(e),
            PayloadError::MissingId => ClientError::MissingId,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
