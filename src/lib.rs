//! `novu-http` is an async HTTP client for the Novu notification REST API.
//!
//! Every call goes through one executor, [`NovuClient::send`], which:
//! - authenticates with `Authorization: ApiKey <key>`
//! - stamps a single `Idempotency-Key` shared by all retries of the call
//! - retries with exponential backoff when a [`RetryPolicy`] is configured
//! - classifies failures into [`NovuError`]
//!
//! Resource services (`events()`, `subscribers()`, `topics()`, ...) are thin
//! views over the client. Their methods live on traits, so import the
//! [`prelude`] to call them:
//!
//! ```no_run
//! use novu_http::{prelude::*, NovuClient, TriggerPayload};
//!
//! # async fn demo() -> novu_http::Result<()> {
//! let client = NovuClient::from_env()?;
//! let payload = TriggerPayload::new("subscriber-1", serde_json::json!({ "name": "Ada" }));
//! let result = client.events().trigger("welcome", payload).await?;
//! println!("{:?}", result.data.transaction_id);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod options;
mod request;
mod retry;
mod services;
mod types;

pub use client::{resolve_backend_url, NovuClient, API_VERSION, DEFAULT_BACKEND_URL};
pub use error::NovuError;
pub use options::ClientOptions;
pub use request::{merge_field, ApiRequest, ApiResponse};
pub use retry::{RetryPolicy, SleepFuture, Sleeper, TokioSleeper};
pub use services::*;
pub use types::{ChannelType, DataResponse, JsonResponse, Page};

pub type Result<T> = std::result::Result<T, NovuError>;

/// Brings every resource trait into scope.
pub mod prelude {
    pub use crate::services::{
        BlueprintsApi, ChangesApi, EventsApi, ExecutionsApi, FeedsApi, InboundParserApi,
        IntegrationsApi, LayoutsApi, MessagesApi, NotificationsApi, SubscribersApi, TenantsApi,
        TopicsApi, WorkflowGroupsApi, WorkflowsApi,
    };
}
