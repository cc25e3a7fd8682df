use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{ApiRequest, DataResponse, NovuClient, Result};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkflowGroup {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    #[serde(rename = "_parentId")]
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeleteWorkflowGroup {
    pub acknowledged: bool,
    pub status: String,
}

pub type WorkflowGroupResponse = DataResponse<WorkflowGroup>;

#[derive(Serialize)]
struct NamedGroup<'a> {
    name: &'a str,
}

#[allow(async_fn_in_trait)]
pub trait WorkflowGroupsApi {
    /// Creates a group. Anything but `201 Created` is reported as an error.
    async fn create(&self, name: &str) -> Result<WorkflowGroupResponse>;
    async fn list(&self) -> Result<DataResponse<Vec<WorkflowGroup>>>;
    async fn get(&self, group_id: &str) -> Result<WorkflowGroupResponse>;
    async fn update(&self, group_id: &str, name: &str) -> Result<WorkflowGroupResponse>;
    async fn delete(&self, group_id: &str) -> Result<DataResponse<DeleteWorkflowGroup>>;
}

#[derive(Clone, Copy, Debug)]
pub struct WorkflowGroupService<'a> {
    client: &'a NovuClient,
}

impl<'a> WorkflowGroupService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

const GROUPS: &str = "notification-groups";

impl WorkflowGroupsApi for WorkflowGroupService<'_> {
    async fn create(&self, name: &str) -> Result<WorkflowGroupResponse> {
        let request = ApiRequest::post([GROUPS]).json(&NamedGroup { name })?;
        let response = self.client.send(request).await?;
        Ok(response.require_status(StatusCode::CREATED)?.data)
    }

    async fn list(&self) -> Result<DataResponse<Vec<WorkflowGroup>>> {
        Ok(self.client.send(ApiRequest::get([GROUPS])).await?.data)
    }

    async fn get(&self, group_id: &str) -> Result<WorkflowGroupResponse> {
        let request = ApiRequest::get([GROUPS, group_id]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update(&self, group_id: &str, name: &str) -> Result<WorkflowGroupResponse> {
        let request = ApiRequest::patch([GROUPS, group_id]).json(&NamedGroup { name })?;
        Ok(self.client.send(request).await?.data)
    }

    async fn delete(&self, group_id: &str) -> Result<DataResponse<DeleteWorkflowGroup>> {
        let request = ApiRequest::delete([GROUPS, group_id]);
        Ok(self.client.send(request).await?.data)
    }
}
