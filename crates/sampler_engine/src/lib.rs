//! Sampler engine: remote job gateway, poll timer and effect execution.
mod engine;
mod gateway;
mod timer;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use gateway::{GatewaySettings, RemoteJobGateway, ReqwestGateway};
pub use types::{
    EngineEvent, FailureKind, Generation, IssueReport, SampleParams, StatusReport, TaskId,
    TransportError,
};
