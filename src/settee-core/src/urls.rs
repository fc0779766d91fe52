//! URL construction for server, database, document, attachment, view,
//! user, admin and security resources.
//!
//! Every builder is a pure string composition. Nothing is validated: a bad
//! hostname or an id with reserved characters yields a bad URL, and the
//! caller owns that. The only value that gets encoded is the view key in
//! [`query_path`].
//!
//! Builders that take `Option<&Credentials>` embed them as `user:password@`
//! in the authority, for callers composing their own requests. The client in
//! `settee-rs` always passes `None` and sends an `Authorization` header
//! instead.

use crate::models::{Connection, Credentials, Staleness};
use url::form_urlencoded;

/// `{protocol}://[{user}:{password}@]{host}:{port}`
pub fn server_url(conn: &Connection, auth: Option<&Credentials>) -> String {
    match auth {
        Some(creds) => format!(
            "{}://{}:{}@{}:{}",
            conn.protocol, creds.username, creds.password, conn.host, conn.port
        ),
        None => format!("{}://{}:{}", conn.protocol, conn.host, conn.port),
    }
}

/// `{server_url}/{database}`
pub fn database_url(conn: &Connection, auth: Option<&Credentials>) -> String {
    format!("{}/{}", server_url(conn, auth), conn.database)
}

/// `{database_url}/{id}`
pub fn document_url(conn: &Connection, auth: Option<&Credentials>, id: &str) -> String {
    format!("{}/{}", database_url(conn, auth), id)
}

/// `{document_url}?rev={rev}`, the form DELETE expects
pub fn document_rev_url(
    conn: &Connection,
    auth: Option<&Credentials>,
    id: &str,
    rev: &str,
) -> String {
    format!("{}?rev={}", document_url(conn, auth, id), rev)
}

/// `{document_url}/{name}[?rev={rev}]`
///
/// Writes need the revision, reads leave it out.
pub fn attachment_url(
    conn: &Connection,
    auth: Option<&Credentials>,
    id: &str,
    name: &str,
    rev: Option<&str>,
) -> String {
    let base = format!("{}/{}", document_url(conn, auth, id), name);
    match rev {
        Some(rev) => format!("{}?rev={}", base, rev),
        None => base,
    }
}

/// `{server_url}/_uuids?count={count}`
///
/// The server hands out uuids without authentication, so there is no
/// credentials parameter.
pub fn uuid_url(conn: &Connection, count: i64) -> String {
    format!("{}/_uuids?count={}", server_url(conn, None), count)
}

/// `{server_url}/_all_dbs`
pub fn all_dbs_url(conn: &Connection, auth: Option<&Credentials>) -> String {
    format!("{}/_all_dbs", server_url(conn, auth))
}

/// `{database_url}/_design/{design}`
pub fn design_url(conn: &Connection, auth: Option<&Credentials>, design: &str) -> String {
    format!("{}/_design/{}", database_url(conn, auth), design)
}

/// `{design_url}/_view/{view}`
pub fn view_url(
    conn: &Connection,
    auth: Option<&Credentials>,
    design: &str,
    view: &str,
) -> String {
    format!("{}/_view/{}", design_url(conn, auth, design), view)
}

/// Append `?key="{key}"&stale={staleness}` to a view URL.
///
/// The quoted key is form-encoded, so `café` becomes `%22caf%C3%A9%22`.
pub fn query_path(view_base_url: &str, key: &str, staleness: Staleness) -> String {
    let quoted = format!("\"{}\"", key);
    let encoded: String = form_urlencoded::byte_serialize(quoted.as_bytes()).collect();
    format!("{}?key={}&stale={}", view_base_url, encoded, staleness)
}

/// `{server_url}/_users/org.couchdb.user:{username}`
pub fn user_url(conn: &Connection, admin_auth: Option<&Credentials>, username: &str) -> String {
    format!(
        "{}/_users/org.couchdb.user:{}",
        server_url(conn, admin_auth),
        username
    )
}

/// `{server_url}/_config/admins/{username}`
pub fn admin_url(conn: &Connection, admin_auth: Option<&Credentials>, username: &str) -> String {
    format!("{}/_config/admins/{}", server_url(conn, admin_auth), username)
}

/// `{database_url}/_security`
pub fn security_url(conn: &Connection, admin_auth: Option<&Credentials>) -> String {
    format!("{}/_security", database_url(conn, admin_auth))
}
