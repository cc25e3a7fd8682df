use serde::Deserialize;

use crate::{ApiRequest, DataResponse, NovuClient, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MxRecordStatus {
    pub mx_record_configured: bool,
}

#[allow(async_fn_in_trait)]
pub trait InboundParserApi {
    /// Whether the inbound-parse MX record is configured for the environment.
    async fn mx_status(&self) -> Result<DataResponse<MxRecordStatus>>;
}

#[derive(Clone, Copy, Debug)]
pub struct InboundParserService<'a> {
    client: &'a NovuClient,
}

impl<'a> InboundParserService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl InboundParserApi for InboundParserService<'_> {
    async fn mx_status(&self) -> Result<DataResponse<MxRecordStatus>> {
        let request = ApiRequest::get(["inbound-parse", "mx", "status"]);
        Ok(self.client.send(request).await?.data)
    }
}
