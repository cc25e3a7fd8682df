use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::SubscriberPayload;
use crate::{ApiRequest, DataResponse, NovuClient, Result};

/// A single notification recipient.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recipient {
    /// An existing subscriber, referenced by id.
    SubscriberId(String),
    /// A subscriber created or updated inline.
    Subscriber(SubscriberPayload),
    /// Every subscriber of a topic.
    Topic(TopicRecipient),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecipient {
    pub topic_key: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl Recipient {
    pub fn topic(topic_key: impl Into<String>) -> Self {
        Self::Topic(TopicRecipient {
            topic_key: topic_key.into(),
            kind: "Topic",
        })
    }
}

impl From<&str> for Recipient {
    fn from(subscriber_id: &str) -> Self {
        Self::SubscriberId(subscriber_id.to_owned())
    }
}

impl From<String> for Recipient {
    fn from(subscriber_id: String) -> Self {
        Self::SubscriberId(subscriber_id)
    }
}

impl From<SubscriberPayload> for Recipient {
    fn from(subscriber: SubscriberPayload) -> Self {
        Self::Subscriber(subscriber)
    }
}

/// Who a triggered workflow is delivered to.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recipients {
    One(Recipient),
    Many(Vec<Recipient>),
}

impl From<Recipient> for Recipients {
    fn from(recipient: Recipient) -> Self {
        Self::One(recipient)
    }
}

impl From<&str> for Recipients {
    fn from(subscriber_id: &str) -> Self {
        Self::One(subscriber_id.into())
    }
}

impl From<String> for Recipients {
    fn from(subscriber_id: String) -> Self {
        Self::One(subscriber_id.into())
    }
}

impl From<SubscriberPayload> for Recipients {
    fn from(subscriber: SubscriberPayload) -> Self {
        Self::One(subscriber.into())
    }
}

impl From<Vec<Recipient>> for Recipients {
    fn from(recipients: Vec<Recipient>) -> Self {
        Self::Many(recipients)
    }
}

/// Options for [`EventsApi::trigger`].
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerPayload {
    pub to: Recipients,
    pub payload: JsonValue,
    pub overrides: Option<JsonValue>,
    pub transaction_id: Option<String>,
    pub actor: Option<Recipient>,
    pub tenant: Option<JsonValue>,
}

impl TriggerPayload {
    pub fn new(to: impl Into<Recipients>, payload: JsonValue) -> Self {
        Self {
            to: to.into(),
            payload,
            overrides: None,
            transaction_id: None,
            actor: None,
            tenant: None,
        }
    }

    #[must_use]
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: JsonValue) -> Self {
        self.overrides = Some(overrides);
        self
    }

    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<Recipient>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant: JsonValue) -> Self {
        self.tenant = Some(tenant);
        self
    }
}

/// Options for [`EventsApi::broadcast`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastPayload {
    pub payload: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<JsonValue>,
}

/// One event of a bulk trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerEvent {
    pub name: String,
    pub payload: TriggerPayload,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRequest<'a> {
    name: &'a str,
    to: &'a Recipients,
    payload: &'a JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    overrides: Option<&'a JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actor: Option<&'a Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<&'a JsonValue>,
}

impl<'a> EventRequest<'a> {
    fn new(name: &'a str, data: &'a TriggerPayload) -> Self {
        Self {
            name,
            to: &data.to,
            payload: &data.payload,
            overrides: data.overrides.as_ref(),
            transaction_id: data.transaction_id.as_deref(),
            actor: data.actor.as_ref(),
            tenant: data.tenant.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct BulkEventRequest<'a> {
    events: Vec<EventRequest<'a>>,
}

#[derive(Serialize)]
struct BroadcastRequest<'a> {
    name: &'a str,
    #[serde(flatten)]
    data: &'a BroadcastPayload,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerResult {
    pub acknowledged: bool,
    pub status: String,
    pub transaction_id: Option<String>,
    pub error: Vec<String>,
}

pub type EventResponse = DataResponse<TriggerResult>;

/// Triggering and cancelling workflow events.
#[allow(async_fn_in_trait)]
pub trait EventsApi {
    /// Triggers the workflow identified by `name`.
    async fn trigger(&self, name: &str, data: TriggerPayload) -> Result<EventResponse>;
    /// Triggers several workflows in one request.
    async fn trigger_bulk(&self, events: Vec<TriggerEvent>) -> Result<DataResponse<Vec<TriggerResult>>>;
    /// Triggers `name` for every subscriber in the environment.
    async fn broadcast(&self, name: &str, data: BroadcastPayload) -> Result<EventResponse>;
    /// Cancels delayed or digested deliveries of a transaction.
    async fn cancel(&self, transaction_id: &str) -> Result<DataResponse<bool>>;
}

#[derive(Clone, Copy, Debug)]
pub struct EventService<'a> {
    client: &'a NovuClient,
}

impl<'a> EventService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl EventsApi for EventService<'_> {
    async fn trigger(&self, name: &str, data: TriggerPayload) -> Result<EventResponse> {
        let request = ApiRequest::post(["events", "trigger"]).json(&EventRequest::new(name, &data))?;
        Ok(self.client.send(request).await?.data)
    }

    async fn trigger_bulk(&self, events: Vec<TriggerEvent>) -> Result<DataResponse<Vec<TriggerResult>>> {
        let body = BulkEventRequest {
            events: events
                .iter()
                .map(|event| EventRequest::new(&event.name, &event.payload))
                .collect(),
        };
        let request = ApiRequest::post(["events", "trigger", "bulk"]).json(&body)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn broadcast(&self, name: &str, data: BroadcastPayload) -> Result<EventResponse> {
        let body = BroadcastRequest { name, data: &data };
        let request = ApiRequest::post(["events", "trigger", "broadcast"]).json(&body)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn cancel(&self, transaction_id: &str) -> Result<DataResponse<bool>> {
        let request = ApiRequest::delete(["events", "trigger", transaction_id]);
        Ok(self.client.send(request).await?.data)
    }
}
