use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::{ApiRequest, NovuClient, Page, Result};

/// A single query filter. List values are sent comma-joined under one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn list<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let value = values
            .into_iter()
            .map(|value| value.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(",");
        Self::new(key, value)
    }
}

fn with_params(request: ApiRequest, params: &[QueryParam]) -> ApiRequest {
    params
        .iter()
        .fold(request, |request, param| request.query(param.key.as_str(), &param.value))
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    pub transaction_id: String,
    pub created_at: Option<String>,
    pub channels: JsonValue,
    pub subscriber: JsonValue,
    pub template: JsonValue,
    pub jobs: Vec<JsonValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationStats {
    pub weekly_sent: u64,
    pub monthly_sent: u64,
    pub yearly_sent: u64,
}

/// Daily bucket of sent notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationGraphStats {
    #[serde(rename = "_id")]
    pub id: String,
    pub count: u64,
    pub templates: Vec<String>,
    pub channels: Vec<String>,
}

#[allow(async_fn_in_trait)]
pub trait NotificationsApi {
    async fn list(&self, params: &[QueryParam]) -> Result<Page<Notification>>;
    async fn get(&self, notification_id: &str) -> Result<Notification>;
    async fn graph_stats(&self, params: &[QueryParam]) -> Result<Vec<NotificationGraphStats>>;
    async fn stats(&self) -> Result<NotificationStats>;
}

#[derive(Clone, Copy, Debug)]
pub struct NotificationService<'a> {
    client: &'a NovuClient,
}

impl<'a> NotificationService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl NotificationsApi for NotificationService<'_> {
    async fn list(&self, params: &[QueryParam]) -> Result<Page<Notification>> {
        let request = with_params(ApiRequest::get(["notifications"]), params);
        Ok(self.client.send(request).await?.data)
    }

    async fn get(&self, notification_id: &str) -> Result<Notification> {
        let request = ApiRequest::get(["notifications", notification_id]);
        Ok(self.client.send(request).await?.data)
    }

    async fn graph_stats(&self, params: &[QueryParam]) -> Result<Vec<NotificationGraphStats>> {
        let request = with_params(ApiRequest::get(["notifications", "graph", "stats"]), params);
        Ok(self.client.send(request).await?.data)
    }

    async fn stats(&self) -> Result<NotificationStats> {
        let request = ApiRequest::get(["notifications", "stats"]);
        Ok(self.client.send(request).await?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::{with_params, QueryParam};
    use crate::ApiRequest;

    #[test]
    fn list_param_joins_with_commas() {
        let param = QueryParam::list("channels", ["email", "sms"]);
        assert_eq!(param, QueryParam::new("channels", "email,sms"));
    }

    #[test]
    fn params_keep_their_order() {
        let request = with_params(
            ApiRequest::get(["notifications"]),
            &[QueryParam::new("page", "0"), QueryParam::list("templates", ["a"])],
        );
        assert_eq!(
            request.query_pairs(),
            [
                ("page".to_owned(), "0".to_owned()),
                ("templates".to_owned(), "a".to_owned()),
            ]
        );
    }
}
