use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{ApiRequest, DataResponse, NovuClient, Page, Result};

/// Pending change to promote between environments.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Change {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_creatorId")]
    pub creator_id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    #[serde(rename = "_entityId")]
    pub entity_id: String,
    #[serde(rename = "_parentId")]
    pub parent_id: Option<String>,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub change: JsonValue,
    pub created_at: Option<String>,
}

/// Filters for [`ChangesApi::list`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangesQuery {
    pub page: u32,
    pub limit: u32,
    pub promoted: bool,
}

impl Default for ChangesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            promoted: false,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkApplyRequest<'a> {
    change_ids: &'a [String],
}

#[allow(async_fn_in_trait)]
pub trait ChangesApi {
    async fn count(&self) -> Result<DataResponse<u64>>;
    async fn list(&self, query: &ChangesQuery) -> Result<Page<Change>>;
    async fn apply(&self, change_id: &str) -> Result<DataResponse<Vec<Change>>>;
    async fn apply_bulk(&self, change_ids: &[String]) -> Result<DataResponse<Vec<Change>>>;
}

#[derive(Clone, Copy, Debug)]
pub struct ChangeService<'a> {
    client: &'a NovuClient,
}

impl<'a> ChangeService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl ChangesApi for ChangeService<'_> {
    async fn count(&self) -> Result<DataResponse<u64>> {
        let request = ApiRequest::get(["changes", "count"]);
        Ok(self.client.send(request).await?.data)
    }

    async fn list(&self, query: &ChangesQuery) -> Result<Page<Change>> {
        let request = ApiRequest::get(["changes"])
            .query("page", query.page)
            .query("limit", query.limit)
            .query("promoted", query.promoted);
        Ok(self.client.send(request).await?.data)
    }

    async fn apply(&self, change_id: &str) -> Result<DataResponse<Vec<Change>>> {
        let request = ApiRequest::post(["changes", change_id, "apply"]);
        Ok(self.client.send(request).await?.data)
    }

    async fn apply_bulk(&self, change_ids: &[String]) -> Result<DataResponse<Vec<Change>>> {
        let request =
            ApiRequest::post(["changes", "bulk", "apply"]).json(&BulkApplyRequest { change_ids })?;
        Ok(self.client.send(request).await?.data)
    }
}
