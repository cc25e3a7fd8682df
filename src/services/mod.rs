//! Resource services.
//!
//! Each service is a borrowed view over a [`NovuClient`] and implements a
//! capability trait for its resource. Import [`crate::prelude`] to bring
//! every trait into scope.

mod blueprints;
mod changes;
mod events;
mod executions;
mod feeds;
mod inbound_parser;
mod integrations;
mod layouts;
mod messages;
mod notifications;
mod subscribers;
mod tenants;
mod topics;
mod workflow_groups;
mod workflows;

pub use blueprints::*;
pub use changes::*;
pub use events::*;
pub use executions::*;
pub use feeds::*;
pub use inbound_parser::*;
pub use integrations::*;
pub use layouts::*;
pub use messages::*;
pub use notifications::*;
pub use subscribers::*;
pub use tenants::*;
pub use topics::*;
pub use workflow_groups::*;
pub use workflows::*;

use crate::NovuClient;

impl NovuClient {
    pub fn blueprints(&self) -> BlueprintService<'_> {
        BlueprintService::new(self)
    }

    pub fn changes(&self) -> ChangeService<'_> {
        ChangeService::new(self)
    }

    pub fn events(&self) -> EventService<'_> {
        EventService::new(self)
    }

    pub fn executions(&self) -> ExecutionService<'_> {
        ExecutionService::new(self)
    }

    pub fn feeds(&self) -> FeedService<'_> {
        FeedService::new(self)
    }

    pub fn inbound_parser(&self) -> InboundParserService<'_> {
        InboundParserService::new(self)
    }

    pub fn integrations(&self) -> IntegrationService<'_> {
        IntegrationService::new(self)
    }

    pub fn layouts(&self) -> LayoutService<'_> {
        LayoutService::new(self)
    }

    pub fn messages(&self) -> MessageService<'_> {
        MessageService::new(self)
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService::new(self)
    }

    pub fn subscribers(&self) -> SubscriberService<'_> {
        SubscriberService::new(self)
    }

    pub fn tenants(&self) -> TenantService<'_> {
        TenantService::new(self)
    }

    pub fn topics(&self) -> TopicService<'_> {
        TopicService::new(self)
    }

    pub fn workflow_groups(&self) -> WorkflowGroupService<'_> {
        WorkflowGroupService::new(self)
    }

    pub fn workflows(&self) -> WorkflowService<'_> {
        WorkflowService::new(self)
    }
}
