use crate::{ApiRequest, ChannelType, JsonResponse, NovuClient, Result};

/// Filters for [`MessagesApi::list`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessagesQuery {
    pub channel: Option<ChannelType>,
    pub subscriber_id: Option<String>,
    pub transaction_ids: Vec<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MessagesQuery {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        let request = request
            .query_opt("channel", self.channel)
            .query_opt("subscriberId", self.subscriber_id.as_deref());
        self.transaction_ids
            .iter()
            .fold(request, |request, id| request.query("transactionId", id))
            .query_opt("page", self.page)
            .query_opt("limit", self.limit)
    }
}

#[allow(async_fn_in_trait)]
pub trait MessagesApi {
    async fn list(&self, query: &MessagesQuery) -> Result<JsonResponse>;
    async fn delete(&self, message_id: &str) -> Result<JsonResponse>;
}

#[derive(Clone, Copy, Debug)]
pub struct MessageService<'a> {
    client: &'a NovuClient,
}

impl<'a> MessageService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl MessagesApi for MessageService<'_> {
    async fn list(&self, query: &MessagesQuery) -> Result<JsonResponse> {
        let request = query.apply(ApiRequest::get(["messages"]));
        Ok(self.client.send(request).await?.data)
    }

    async fn delete(&self, message_id: &str) -> Result<JsonResponse> {
        let request = ApiRequest::delete(["messages", message_id]);
        Ok(self.client.send(request).await?.data)
    }
}
