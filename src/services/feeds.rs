use serde::{Deserialize, Serialize};

use crate::{ApiRequest, DataResponse, NovuClient, Result};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feed {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub identifier: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
}

#[derive(Serialize)]
struct CreateFeedRequest<'a> {
    name: &'a str,
}

#[allow(async_fn_in_trait)]
pub trait FeedsApi {
    async fn create(&self, name: &str) -> Result<DataResponse<Feed>>;
    async fn list(&self) -> Result<DataResponse<Vec<Feed>>>;
    async fn delete(&self, feed_id: &str) -> Result<DataResponse<Vec<Feed>>>;
}

#[derive(Clone, Copy, Debug)]
pub struct FeedService<'a> {
    client: &'a NovuClient,
}

impl<'a> FeedService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl FeedsApi for FeedService<'_> {
    async fn create(&self, name: &str) -> Result<DataResponse<Feed>> {
        let request = ApiRequest::post(["feeds"]).json(&CreateFeedRequest { name })?;
        Ok(self.client.send(request).await?.data)
    }

    async fn list(&self) -> Result<DataResponse<Vec<Feed>>> {
        Ok(self.client.send(ApiRequest::get(["feeds"])).await?.data)
    }

    async fn delete(&self, feed_id: &str) -> Result<DataResponse<Vec<Feed>>> {
        let request = ApiRequest::delete(["feeds", feed_id]);
        Ok(self.client.send(request).await?.data)
    }
}
