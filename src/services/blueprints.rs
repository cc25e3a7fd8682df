use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::{ApiRequest, NovuClient, Result};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlueprintCategory {
    pub name: String,
    pub blueprints: Vec<Blueprint>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintGroups {
    pub general: Vec<BlueprintCategory>,
    pub popular: Option<BlueprintCategory>,
}

/// A workflow template published by Novu.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blueprint {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub draft: bool,
    pub critical: bool,
    pub tags: Vec<String>,
    pub steps: Vec<JsonValue>,
    pub triggers: Vec<JsonValue>,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    #[serde(rename = "_notificationGroupId")]
    pub notification_group_id: Option<String>,
    pub is_blueprint: bool,
    pub blueprint_id: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait BlueprintsApi {
    async fn group_by_category(&self) -> Result<BlueprintGroups>;
    async fn get(&self, template_id: &str) -> Result<Blueprint>;
}

#[derive(Clone, Copy, Debug)]
pub struct BlueprintService<'a> {
    client: &'a NovuClient,
}

impl<'a> BlueprintService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl BlueprintsApi for BlueprintService<'_> {
    async fn group_by_category(&self) -> Result<BlueprintGroups> {
        let request = ApiRequest::get(["blueprints", "group-by-category"]);
        Ok(self.client.send(request).await?.data)
    }

    async fn get(&self, template_id: &str) -> Result<Blueprint> {
        let request = ApiRequest::get(["blueprints", template_id]);
        Ok(self.client.send(request).await?.data)
    }
}
