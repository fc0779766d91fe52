use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection describes where a database lives: `{protocol}://{host}:{port}/{database}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Connection {
    pub fn new(
        protocol: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port,
            database: database.into(),
        }
    }

    /// Same server, different database
    pub fn with_database(&self, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..self.clone()
        }
    }
}

/// Credentials for HTTP basic auth.
///
/// `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Staleness controls whether a view query may return an outdated index
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Staleness {
    #[default]
    Ok,
    UpdateAfter,
}

impl Staleness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Staleness::Ok => "ok",
            Staleness::UpdateAfter => "update_after",
        }
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Staleness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Staleness::Ok),
            "update_after" => Ok(Staleness::UpdateAfter),
            other => Err(format!("unknown staleness '{}'", other)),
        }
    }
}

/// Whether classification keeps the response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    Include,
    Exclude,
}

pub type Headers = Vec<(String, String)>;

/// RawResponse is a completed HTTP exchange as handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub headers: Headers,
}

/// Reply carries the body (and optionally headers) of a classified response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub headers: Option<Headers>,
}

impl Reply {
    /// First header value matching `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// DocResult is the outcome of every request: success or error, each with its reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocResult {
    Ok(Reply),
    Error(Reply),
}

impl DocResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, DocResult::Ok(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    pub fn reply(&self) -> &Reply {
        match self {
            DocResult::Ok(reply) | DocResult::Error(reply) => reply,
        }
    }

    pub fn into_reply(self) -> Reply {
        match self {
            DocResult::Ok(reply) | DocResult::Error(reply) => reply,
        }
    }

    pub fn body(&self) -> &str {
        &self.reply().body
    }

    pub fn status(&self) -> u16 {
        self.reply().status
    }

    pub fn headers(&self) -> Option<&Headers> {
        self.reply().headers.as_ref()
    }

    pub fn is_not_found(&self) -> bool {
        self.is_error() && self.status() == 404
    }

    pub fn is_conflict(&self) -> bool {
        self.is_error() && self.status() == 409
    }

    pub fn is_unauthorized(&self) -> bool {
        self.is_error() && matches!(self.status(), 401 | 403)
    }
}

/// Body of `GET /_uuids`
#[derive(Debug, Clone, Deserialize)]
pub struct UuidResponse {
    pub uuids: Vec<String>,
}

/// Document stored in the `_users` database
#[derive(Debug, Clone, Serialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub password: String,
    pub roles: Vec<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl UserDocument {
    pub fn new(name: &str, password: &str, roles: Vec<String>) -> Self {
        Self {
            id: format!("org.couchdb.user:{}", name),
            name: name.to_string(),
            password: password.to_string(),
            roles,
            doc_type: "user".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16) -> Reply {
        Reply {
            status,
            body: "{}".to_string(),
            headers: Some(vec![("ETag".to_string(), "\"1-abc\"".to_string())]),
        }
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("admin", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_staleness_round_trips_through_str() {
        assert_eq!(Staleness::Ok.to_string(), "ok");
        assert_eq!(Staleness::UpdateAfter.to_string(), "update_after");
        assert_eq!("update_after".parse::<Staleness>(), Ok(Staleness::UpdateAfter));
        assert!("fresh".parse::<Staleness>().is_err());
    }

    #[test]
    fn test_doc_result_refinements() {
        assert!(DocResult::Error(reply(404)).is_not_found());
        assert!(DocResult::Error(reply(409)).is_conflict());
        assert!(DocResult::Error(reply(401)).is_unauthorized());
        assert!(!DocResult::Ok(reply(200)).is_not_found());
    }

    #[test]
    fn test_reply_header_lookup_is_case_insensitive() {
        let r = reply(201);
        assert_eq!(r.header("etag"), Some("\"1-abc\""));
        assert_eq!(r.header("location"), None);
    }

    #[test]
    fn test_user_document_shape() {
        let doc = UserDocument::new("bob", "secret", vec!["reader".to_string()]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_id"], "org.couchdb.user:bob");
        assert_eq!(value["type"], "user");
        assert_eq!(value["roles"][0], "reader");
    }
}
