use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    merge_field, ApiRequest, ChannelType, DataResponse, JsonResponse, NovuClient, NovuError, Page,
    Result,
};

/// Subscriber attributes accepted by identify, update and inline triggers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscriber {
    #[serde(rename = "_id")]
    pub id: String,
    pub subscriber_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub locale: Option<String>,
    pub data: Option<JsonValue>,
    pub channels: Vec<JsonValue>,
    pub is_online: Option<bool>,
    pub last_online_at: Option<String>,
    pub deleted: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

pub type SubscriberResponse = DataResponse<Subscriber>;

/// Provider credentials of a subscriber (push tokens, chat webhooks).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberCredentials {
    pub provider_id: String,
    pub credentials: ProviderCredentials,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_identifier: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub device_tokens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub status: String,
}

/// Filters for [`SubscribersApi::notification_feed`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedOptions {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub feed_identifier: Option<String>,
    pub seen: Option<bool>,
    pub read: Option<bool>,
    /// Matches messages whose trigger payload contains these fields.
    pub payload: Option<JsonValue>,
}

impl FeedOptions {
    fn apply(&self, request: ApiRequest) -> Result<ApiRequest> {
        let payload = match &self.payload {
            Some(payload) => {
                let json = serde_json::to_vec(payload).map_err(NovuError::Encode)?;
                Some(base64::engine::general_purpose::STANDARD.encode(json))
            }
            None => None,
        };
        Ok(request
            .query_opt("page", self.page)
            .query_opt("limit", self.limit)
            .query_opt("feedIdentifier", self.feed_identifier.as_deref())
            .query_opt("seen", self.seen)
            .query_opt("read", self.read)
            .query_opt("payload", payload))
    }
}

pub type FeedResponse = Page<JsonValue>;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnseenCount {
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkMessageOptions {
    pub message_id: String,
    pub seen: bool,
    pub read: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubscriberPreference {
    pub template: JsonValue,
    pub preference: Preference,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Preference {
    pub enabled: bool,
    pub channels: BTreeMap<String, bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdatePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelPreference>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelPreference {
    #[serde(rename = "type")]
    pub channel: ChannelType,
    pub enabled: bool,
}

#[derive(Serialize)]
struct BulkCreateRequest<'a> {
    subscribers: &'a [SubscriberPayload],
}

/// Subscriber management, feeds and preferences.
#[allow(async_fn_in_trait)]
pub trait SubscribersApi {
    /// Creates or updates `subscriber_id` with the fields of `payload`.
    ///
    /// `payload` must serialize to a JSON object; its `subscriberId` is
    /// always replaced by `subscriber_id`.
    async fn identify<P>(&self, subscriber_id: &str, payload: &P) -> Result<SubscriberResponse>
    where
        P: Serialize + ?Sized;
    async fn bulk_create(&self, subscribers: &[SubscriberPayload]) -> Result<JsonResponse>;
    async fn get(&self, subscriber_id: &str) -> Result<SubscriberResponse>;
    async fn update<P>(&self, subscriber_id: &str, payload: &P) -> Result<SubscriberResponse>
    where
        P: Serialize + ?Sized;
    async fn update_credentials(
        &self,
        subscriber_id: &str,
        credentials: &SubscriberCredentials,
    ) -> Result<SubscriberResponse>;
    async fn delete(&self, subscriber_id: &str) -> Result<DataResponse<DeleteResult>>;
    async fn notification_feed(
        &self,
        subscriber_id: &str,
        options: Option<&FeedOptions>,
    ) -> Result<FeedResponse>;
    async fn unseen_count(
        &self,
        subscriber_id: &str,
        seen: Option<bool>,
    ) -> Result<DataResponse<UnseenCount>>;
    async fn mark_message_seen(
        &self,
        subscriber_id: &str,
        options: &MarkMessageOptions,
    ) -> Result<JsonResponse>;
    async fn preferences(
        &self,
        subscriber_id: &str,
    ) -> Result<DataResponse<Vec<SubscriberPreference>>>;
    async fn update_preferences(
        &self,
        subscriber_id: &str,
        template_id: &str,
        update: Option<&UpdatePreferences>,
    ) -> Result<DataResponse<SubscriberPreference>>;
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberService<'a> {
    client: &'a NovuClient,
}

impl<'a> SubscriberService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl SubscribersApi for SubscriberService<'_> {
    async fn identify<P>(&self, subscriber_id: &str, payload: &P) -> Result<SubscriberResponse>
    where
        P: Serialize + ?Sized,
    {
        let body = merge_field(payload, "subscriberId", subscriber_id)?;
        let request = ApiRequest::post(["subscribers"]).json(&body)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn bulk_create(&self, subscribers: &[SubscriberPayload]) -> Result<JsonResponse> {
        let request =
            ApiRequest::post(["subscribers", "bulk"]).json(&BulkCreateRequest { subscribers })?;
        Ok(self.client.send(request).await?.data)
    }

    async fn get(&self, subscriber_id: &str) -> Result<SubscriberResponse> {
        let request = ApiRequest::get(["subscribers", subscriber_id]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update<P>(&self, subscriber_id: &str, payload: &P) -> Result<SubscriberResponse>
    where
        P: Serialize + ?Sized,
    {
        let request = ApiRequest::put(["subscribers", subscriber_id]).json(payload)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn update_credentials(
        &self,
        subscriber_id: &str,
        credentials: &SubscriberCredentials,
    ) -> Result<SubscriberResponse> {
        let request =
            ApiRequest::put(["subscribers", subscriber_id, "credentials"]).json(credentials)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn delete(&self, subscriber_id: &str) -> Result<DataResponse<DeleteResult>> {
        let request = ApiRequest::delete(["subscribers", subscriber_id]);
        Ok(self.client.send(request).await?.data)
    }

    async fn notification_feed(
        &self,
        subscriber_id: &str,
        options: Option<&FeedOptions>,
    ) -> Result<FeedResponse> {
        let mut request = ApiRequest::get(["subscribers", subscriber_id, "notifications", "feed"]);
        if let Some(options) = options {
            request = options.apply(request)?;
        }
        Ok(self.client.send(request).await?.data)
    }

    async fn unseen_count(
        &self,
        subscriber_id: &str,
        seen: Option<bool>,
    ) -> Result<DataResponse<UnseenCount>> {
        let request = ApiRequest::get(["subscribers", subscriber_id, "notifications", "unseen"])
            .query_opt("seen", seen);
        Ok(self.client.send(request).await?.data)
    }

    async fn mark_message_seen(
        &self,
        subscriber_id: &str,
        options: &MarkMessageOptions,
    ) -> Result<JsonResponse> {
        let request =
            ApiRequest::post(["subscribers", subscriber_id, "messages", "markAs"]).json(options)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn preferences(
        &self,
        subscriber_id: &str,
    ) -> Result<DataResponse<Vec<SubscriberPreference>>> {
        let request = ApiRequest::get(["subscribers", subscriber_id, "preferences"]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update_preferences(
        &self,
        subscriber_id: &str,
        template_id: &str,
        update: Option<&UpdatePreferences>,
    ) -> Result<DataResponse<SubscriberPreference>> {
        let mut request = ApiRequest::patch(["subscribers", subscriber_id, "preferences", template_id]);
        if let Some(update) = update {
            request = request.json(update)?;
        }
        Ok(self.client.send(request).await?.data)
    }
}
