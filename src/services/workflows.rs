use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{ApiRequest, DataResponse, NovuClient, Page, Result};

/// Per-channel switches of a workflow's default preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub email: bool,
    pub sms: bool,
    pub chat: bool,
    pub in_app: bool,
    pub push: bool,
}

/// Workflow definition, used both as request body and response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workflow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_group_id: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<JsonValue>,
    pub active: bool,
    pub critical: bool,
    pub preference_settings: ChannelSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blueprint_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

/// Paging for [`WorkflowsApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListWorkflowsOptions {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub type WorkflowResponse = DataResponse<Workflow>;

#[allow(async_fn_in_trait)]
pub trait WorkflowsApi {
    async fn list(&self, options: &ListWorkflowsOptions) -> Result<Page<Workflow>>;
    async fn create(&self, workflow: &Workflow) -> Result<WorkflowResponse>;
    async fn get(&self, workflow_id: &str) -> Result<WorkflowResponse>;
    async fn update(&self, workflow_id: &str, workflow: &Workflow) -> Result<WorkflowResponse>;
    async fn delete(&self, workflow_id: &str) -> Result<DataResponse<bool>>;
    /// Toggles the workflow between active and inactive.
    async fn update_status(&self, workflow_id: &str) -> Result<WorkflowResponse>;
}

#[derive(Clone, Copy, Debug)]
pub struct WorkflowService<'a> {
    client: &'a NovuClient,
}

impl<'a> WorkflowService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl WorkflowsApi for WorkflowService<'_> {
    async fn list(&self, options: &ListWorkflowsOptions) -> Result<Page<Workflow>> {
        let request = ApiRequest::get(["workflows"])
            .query_opt("page", options.page)
            .query_opt("limit", options.limit);
        Ok(self.client.send(request).await?.data)
    }

    async fn create(&self, workflow: &Workflow) -> Result<WorkflowResponse> {
        let request = ApiRequest::post(["workflows"]).json(workflow)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn get(&self, workflow_id: &str) -> Result<WorkflowResponse> {
        let request = ApiRequest::get(["workflows", workflow_id]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update(&self, workflow_id: &str, workflow: &Workflow) -> Result<WorkflowResponse> {
        let request = ApiRequest::put(["workflows", workflow_id]).json(workflow)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn delete(&self, workflow_id: &str) -> Result<DataResponse<bool>> {
        let request = ApiRequest::delete(["workflows", workflow_id]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update_status(&self, workflow_id: &str) -> Result<WorkflowResponse> {
        let request = ApiRequest::put(["workflows", workflow_id, "status"]);
        Ok(self.client.send(request).await?.data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ChannelSettings, Workflow};

    #[test]
    fn new_workflow_omits_unset_ids() {
        let workflow = Workflow {
            name: "welcome".to_owned(),
            preference_settings: ChannelSettings {
                email: true,
                in_app: true,
                ..ChannelSettings::default()
            },
            ..Workflow::default()
        };
        let value = serde_json::to_value(&workflow).unwrap();
        assert!(value.get("_id").is_none());
        assert!(value.get("blueprintId").is_none());
        assert_eq!(value["preferenceSettings"]["in_app"], json!(true));
        assert_eq!(value["preferenceSettings"]["sms"], json!(false));
    }
}
