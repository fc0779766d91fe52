use crate::client::{Client, JSON};
use crate::{ClientError, Result};
use settee_core::payload::{extract_id, first_uuid, strip_id};
use settee_core::{classify, classify_delete, urls, DocResult, HeaderMode};

impl Client {
    /// Create a document under `id`.
    ///
    /// A top-level `_id` in `json` is dropped first; the id in the URL wins.
    pub async fn create(&self, json: &str, id: &str) -> Result<DocResult> {
        let body = strip_id(json)?;
        let url = urls::document_url(self.connection(), None, id);
        let response = self.put_raw(&url, body.into_bytes(), JSON).await?;
        Ok(classify(response, HeaderMode::Include))
    }

    /// Create a document under a server-generated id
    pub async fn create_generate(&self, json: &str) -> Result<DocResult> {
        let body = self.fetch_uuid().await?;
        let id = first_uuid(&body)?.ok_or_else(|| {
            ClientError::InvalidResponse(format!("no uuid in /_uuids response: {}", body))
        })?;
        self.create(json, &id).await
    }

    /// Update a document. Without `id`, the payload's `_id` is used and
    /// [`ClientError::MissingId`] is returned, before any request, if it has none.
    pub async fn update(&self, json: &str, id: Option<&str>) -> Result<DocResult> {
        let id = match id {
            Some(id) => id.to_string(),
            None => extract_id(json)?,
        };

        let url = urls::document_url(self.connection(), None, &id);
        let response = self
            .put_raw(&url, json.as_bytes().to_vec(), JSON)
            .await?;
        Ok(classify(response, HeaderMode::Include))
    }

    /// Store `json` as attachment `name` on revision `rev` of a document.
    /// Without `id`, the payload's `_id` names the document.
    pub async fn update_attachment(
        &self,
        json: &str,
        id: Option<&str>,
        name: &str,
        rev: &str,
    ) -> Result<DocResult> {
        let id = match id {
            Some(id) => id.to_string(),
            None => extract_id(json)?,
        };

        self.update_attachment_bytes(&id, name, rev, json.as_bytes().to_vec(), JSON)
            .await
    }

    /// Store arbitrary bytes as an attachment
    pub async fn update_attachment_bytes(
        &self,
        id: &str,
        name: &str,
        rev: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<DocResult> {
        let url = urls::attachment_url(self.connection(), None, id, name, Some(rev));
        let response = self.put_raw(&url, content, content_type).await?;
        Ok(classify(response, HeaderMode::Include))
    }

    /// Delete revision `rev` of a document
    pub async fn destroy(&self, id: &str, rev: &str) -> Result<DocResult> {
        let url = urls::document_rev_url(self.connection(), None, id, rev);
        let response = self.delete_raw(&url).await?;
        Ok(classify_delete(response))
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::*;
    use crate::ClientError;

    fn sent_json(body: &Option<Vec<u8>>) -> serde_json::Value {
        serde_json::from_slice(body.as_ref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_strips_conflicting_id() {
        let (client, fake) = client_with(
            FakeTransport::default().respond(201, r#"{"ok":true,"id":"doc-1","rev":"1-a"}"#),
        );

        let result = client
            .create(r#"{"_id":"other","value":1}"#, "doc-1")
            .await
            .unwrap();
        assert!(result.is_ok());
        assert_eq!(result.reply().header("ETag"), Some("\"1-abc\""));

        let request = &fake.recorded()[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(request.url, "http://localhost:5984/test_db/doc-1");
        let body = sent_json(&request.body);
        assert!(body.get("_id").is_none());
        assert_eq!(body["value"], 1);
    }

    #[tokio::test]
    async fn test_create_conflict_keeps_headers() {
        let (client, _) =
            client_with(FakeTransport::default().respond(409, r#"{"error":"conflict"}"#));

        let result = client.create(r#"{"value":1}"#, "doc-1").await.unwrap();
        assert!(result.is_conflict());
        assert!(result.headers().is_some());
    }

    #[tokio::test]
    async fn test_create_malformed_json_sends_nothing() {
        let (client, fake) = client_with(FakeTransport::default());

        let err = client.create("{oops", "doc-1").await.unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
        assert!(fake.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_create_generate_uses_first_uuid() {
        let (client, fake) = client_with(
            FakeTransport::default()
                .respond(200, r#"{"uuids":["u-1"]}"#)
                .respond(201, r#"{"ok":true}"#),
        );

        assert!(client.create_generate(r#"{"a":1}"#).await.unwrap().is_ok());

        let requests = fake.recorded();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url, "http://localhost:5984/test_db/u-1");
    }

    #[tokio::test]
    async fn test_create_generate_rejects_unexpected_uuid_shape() {
        let (client, fake) = client_with(FakeTransport::default().respond(200, r#"{"ids":[]}"#));

        let err = client.create_generate(r#"{"a":1}"#).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert_eq!(fake.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_update_reads_id_from_payload() {
        let (client, fake) = client_with(FakeTransport::default().respond(201, r#"{"ok":true}"#));

        let json = r#"{"_id":"doc-7","_rev":"1-a","value":2}"#;
        client.update(json, None).await.unwrap();

        let request = &fake.recorded()[0];
        assert_eq!(request.url, "http://localhost:5984/test_db/doc-7");
        assert_eq!(request.body.as_deref(), Some(json.as_bytes()));
    }

    #[tokio::test]
    async fn test_update_without_id_fails_before_request() {
        let (client, fake) = client_with(FakeTransport::default());

        let err = client.update(r#"{"value": 1}"#, None).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingId));
        assert!(fake.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_update_with_explicit_id() {
        let (client, fake) = client_with(FakeTransport::default().respond(201, r#"{"ok":true}"#));

        client.update(r#"{"value": 1}"#, Some("doc-2")).await.unwrap();
        assert_eq!(
            fake.recorded()[0].url,
            "http://localhost:5984/test_db/doc-2"
        );
    }

    #[tokio::test]
    async fn test_update_attachment_carries_rev() {
        let (client, fake) = client_with(
            FakeTransport::default()
                .respond(201, r#"{"ok":true}"#)
                .respond(201, r#"{"ok":true}"#),
        );

        client
            .update_attachment(r#"{"_id":"doc","x":1}"#, None, "data.json", "3-c")
            .await
            .unwrap();
        client
            .update_attachment_bytes("doc", "logo.png", "4-d", vec![0x89, 0x50], "image/png")
            .await
            .unwrap();

        let requests = fake.recorded();
        assert_eq!(
            requests[0].url,
            "http://localhost:5984/test_db/doc/data.json?rev=3-c"
        );
        assert_eq!(requests[1].content_type.as_deref(), Some("image/png"));
        assert_eq!(requests[1].body.as_deref(), Some(&[0x89u8, 0x50][..]));
    }

    #[tokio::test]
    async fn test_update_attachment_without_id_fails() {
        let (client, fake) = client_with(FakeTransport::default());

        let err = client
            .update_attachment(r#"{"x":1}"#, None, "data.json", "1-a")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingId));
        assert!(fake.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_destroy_classification() {
        let (client, fake) = client_with(
            FakeTransport::default()
                .respond(200, r#"{"ok":true}"#)
                .respond(202, r#"{"ok":true}"#)
                .respond(409, r#"{"error":"conflict"}"#)
                .respond(204, ""),
        );

        assert!(client.destroy("doc", "1-a").await.unwrap().is_ok());
        assert!(client.destroy("doc", "1-a").await.unwrap().is_ok());
        assert!(client.destroy("doc", "1-a").await.unwrap().is_conflict());
        let no_content = client.destroy("doc", "1-a").await.unwrap();
        assert!(no_content.is_error());
        assert_eq!(no_content.headers(), None);

        let request = &fake.recorded()[0];
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.url, "http://localhost:5984/test_db/doc?rev=1-a");
    }
}
