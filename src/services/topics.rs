use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{ApiRequest, JsonResponse, NovuClient, Page, Result};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Topic {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    pub key: String,
    pub name: String,
    pub subscribers: Vec<String>,
}

pub type TopicList = Page<Topic>;

/// Filters for [`TopicsApi::list`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListTopicsOptions {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub key: Option<String>,
}

#[derive(Serialize)]
struct CreateTopicRequest<'a> {
    key: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct RenameTopicRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct TopicSubscribersRequest<'a> {
    subscribers: &'a [String],
}

/// Topic management. A topic fans a trigger out to all its subscribers.
#[allow(async_fn_in_trait)]
pub trait TopicsApi {
    /// Creates a topic. Fails with [`NovuError::UnexpectedStatus`](crate::NovuError::UnexpectedStatus)
    /// unless the server answers `201 Created`.
    async fn create(&self, key: &str, name: &str) -> Result<()>;
    async fn list(&self, options: Option<&ListTopicsOptions>) -> Result<TopicList>;
    async fn add_subscribers(&self, key: &str, subscribers: &[String]) -> Result<JsonResponse>;
    async fn remove_subscribers(&self, key: &str, subscribers: &[String]) -> Result<()>;
    async fn get(&self, key: &str) -> Result<Topic>;
    async fn rename(&self, key: &str, name: &str) -> Result<Topic>;
}

#[derive(Clone, Copy, Debug)]
pub struct TopicService<'a> {
    client: &'a NovuClient,
}

impl<'a> TopicService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl TopicsApi for TopicService<'_> {
    async fn create(&self, key: &str, name: &str) -> Result<()> {
        let request = ApiRequest::post(["topics"]).json(&CreateTopicRequest { key, name })?;
        self.client
            .send::<JsonResponse>(request)
            .await?
            .require_status(StatusCode::CREATED)?;
        Ok(())
    }

    async fn list(&self, options: Option<&ListTopicsOptions>) -> Result<TopicList> {
        let mut request = ApiRequest::get(["topics"]);
        if let Some(options) = options {
            request = request
                .query_opt("page", options.page)
                .query_opt("pageSize", options.page_size)
                .query_opt("key", options.key.as_deref());
        }
        Ok(self.client.send(request).await?.data)
    }

    async fn add_subscribers(&self, key: &str, subscribers: &[String]) -> Result<JsonResponse> {
        let request = ApiRequest::post(["topics", key, "subscribers"])
            .json(&TopicSubscribersRequest { subscribers })?;
        Ok(self.client.send(request).await?.data)
    }

    async fn remove_subscribers(&self, key: &str, subscribers: &[String]) -> Result<()> {
        let request = ApiRequest::post(["topics", key, "subscribers", "removal"])
            .json(&TopicSubscribersRequest { subscribers })?;
        self.client.send::<JsonResponse>(request).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Topic> {
        let request = ApiRequest::get(["topics", key]);
        Ok(self.client.send(request).await?.data)
    }

    async fn rename(&self, key: &str, name: &str) -> Result<Topic> {
        let request = ApiRequest::patch(["topics", key]).json(&RenameTopicRequest { name })?;
        Ok(self.client.send(request).await?.data)
    }
}
