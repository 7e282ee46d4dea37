use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{FailureKind, StatusReport, TaskId, TransportError};

#[derive(Debug, Deserialize)]
struct SubmitBody {
    #[serde(default)]
    task_id: Value,
}

#[derive(Debug, Deserialize)]
struct ProgressBody {
    #[serde(default, deserialize_with = "lenient")]
    stage: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    eta_human: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    eta_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    download_link: Option<String>,
}

/// Keeps a field only when it has the expected JSON type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn parse_object(bytes: &[u8]) -> Result<Value, TransportError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| TransportError::new(FailureKind::Malformed, err.to_string()))?;
    if !value.is_object() {
        return Err(TransportError::new(
            FailureKind::Malformed,
            "expected a JSON object",
        ));
    }
    Ok(value)
}

pub(crate) fn parse_submit(bytes: &[u8]) -> Result<TaskId, TransportError> {
    let body: SubmitBody = serde_json::from_value(parse_object(bytes)?)
        .map_err(|err| TransportError::new(FailureKind::Malformed, err.to_string()))?;
    let id = match body.task_id {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        _ => String::new(),
    };
    if id.trim().is_empty() {
        return Err(TransportError::new(FailureKind::Malformed, "missing task_id"));
    }
    Ok(TaskId(id))
}

pub(crate) fn parse_progress(bytes: &[u8]) -> Result<StatusReport, TransportError> {
    let body: ProgressBody = serde_json::from_value(parse_object(bytes)?)
        .map_err(|err| TransportError::new(FailureKind::Malformed, err.to_string()))?;
    Ok(StatusReport {
        stage: body.stage,
        percent: body.percent,
        eta_human: body.eta_human,
        eta_seconds: body.eta_seconds,
        download_link: body.download_link,
    })
}
