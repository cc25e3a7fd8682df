use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{ApiRequest, DataResponse, NovuClient, Page, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub name: String,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<JsonValue>,
    pub is_default: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    #[serde(rename = "_creatorId")]
    pub creator_id: String,
    pub name: String,
    pub identifier: String,
    pub description: Option<String>,
    pub channel: String,
    pub content: String,
    pub content_type: String,
    pub variables: Vec<JsonValue>,
    pub is_default: bool,
    pub is_deleted: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreatedLayout {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Paging and ordering for [`LayoutsApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListLayoutsOptions {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub order_by: Option<i8>,
}

#[allow(async_fn_in_trait)]
pub trait LayoutsApi {
    async fn create(&self, request: &LayoutRequest) -> Result<DataResponse<CreatedLayout>>;
    async fn list(&self, options: &ListLayoutsOptions) -> Result<Page<Layout>>;
    async fn get(&self, layout_id: &str) -> Result<Layout>;
    async fn update(&self, layout_id: &str, request: &LayoutRequest) -> Result<Layout>;
    async fn delete(&self, layout_id: &str) -> Result<()>;
    async fn set_default(&self, layout_id: &str) -> Result<()>;
}

#[derive(Clone, Copy, Debug)]
pub struct LayoutService<'a> {
    client: &'a NovuClient,
}

impl<'a> LayoutService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl LayoutsApi for LayoutService<'_> {
    async fn create(&self, request: &LayoutRequest) -> Result<DataResponse<CreatedLayout>> {
        let request = ApiRequest::post(["layouts"]).json(request)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn list(&self, options: &ListLayoutsOptions) -> Result<Page<Layout>> {
        let request = ApiRequest::get(["layouts"])
            .query_opt("page", options.page)
            .query_opt("pageSize", options.page_size)
            .query_opt("sortBy", options.sort_by.as_deref())
            .query_opt("orderBy", options.order_by);
        Ok(self.client.send(request).await?.data)
    }

    async fn get(&self, layout_id: &str) -> Result<Layout> {
        let request = ApiRequest::get(["layouts", layout_id]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update(&self, layout_id: &str, request: &LayoutRequest) -> Result<Layout> {
        let request = ApiRequest::patch(["layouts", layout_id]).json(request)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn delete(&self, layout_id: &str) -> Result<()> {
        let request = ApiRequest::delete(["layouts", layout_id]);
        self.client.send::<JsonValue>(request).await?;
        Ok(())
    }

    async fn set_default(&self, layout_id: &str) -> Result<()> {
        let request = ApiRequest::post(["layouts", layout_id, "default"]);
        self.client.send::<JsonValue>(request).await?;
        Ok(())
    }
}
