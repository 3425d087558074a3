// Library exports for the ontoctl client and CLI

pub mod api;
pub mod cli;
pub mod output;
pub mod utils;

// Re-export commonly used types
pub use api::client::AgentClient;
pub use api::error::{ApiError, ApiResult};
pub use api::payload::{
    AgendaPayload, Filler, FramePayload, GoalPayload, GoalStatus, ImpassePayload,
    KnowledgeResource, OntoLangResult, OptionPayload, OptionStatus, PlanPayload, PlanStatus,
    ReportPayload, ReportStatus, ResolutionPayload, SignalAnchor, SignalPayload, SignalStatus,
    Speaker, StepPayload, StepStatus,
};
pub use utils::config::Config;
