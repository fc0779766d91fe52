use crate::client::Client;
use crate::{ClientError, Result};
use settee_core::{attachment_exists, classify, urls, DocResult, HeaderMode, Staleness};

impl Client {
    /// Get a document by ID
    pub async fn get(&self, id: &str) -> Result<DocResult> {
        let url = urls::document_url(self.connection(), None, id);
        let response = self.get_raw(&url, self.auth()).await?;
        Ok(classify(response, HeaderMode::Exclude))
    }

    /// Get an attachment body
    pub async fn get_attachment(
        &self,
        id: &str,
        name: &str,
        rev: Option<&str>,
    ) -> Result<DocResult> {
        let url = urls::attachment_url(self.connection(), None, id, name, rev);
        let response = self.get_raw(&url, self.auth()).await?;
        Ok(classify(response, HeaderMode::Exclude))
    }

    pub async fn has_attachment(&self, id: &str, name: &str, rev: Option<&str>) -> Result<bool> {
        let result = self.get_attachment(id, name, rev).await?;
        Ok(attachment_exists(&result))
    }

    /// Raw `/_uuids` body holding a single server-generated id.
    ///
    /// Always sent without credentials.
    pub async fn fetch_uuid(&self) -> Result<String> {
        self.fetch_uuids(1).await
    }

    pub async fn fetch_uuids(&self, count: i64) -> Result<String> {
        let url = urls::uuid_url(self.connection(), count);
        let response = self.get_raw(&url, None).await?;

        match classify(response, HeaderMode::Exclude) {
            DocResult::Ok(reply) => Ok(reply.body),
            DocResult::Error(reply) => Err(ClientError::Server {
                status: reply.status,
                message: reply.body,
            }),
        }
    }

    /// Query a view for one key
    pub async fn query_view(
        &self,
        design: &str,
        view: &str,
        key: &str,
        staleness: Staleness,
    ) -> Result<DocResult> {
        let base = urls::view_url(self.connection(), None, design, view);
        let url = urls::query_path(&base, key, staleness);
        let response = self.get_raw(&url, self.auth()).await?;
        Ok(classify(response, HeaderMode::Exclude))
    }
}
