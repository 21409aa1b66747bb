//! Defines the JSON protocol used for communication between icalplan
//! and draft-generator binaries over stdin/stdout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::ScheduleCategory;
use crate::generator::draft::RawDraftEvent;
use crate::preferences::{RecurringTask, WorkHours};

pub trait GeneratorCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    GenerateEvents,
}

/// Request sent from the CLI to a generator.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a generator to the CLI.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// Everything a generator needs to draft candidate events: the user's
/// ask, which categories to draw from, the fixed commitments to plan
/// around, and the window to plan within.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    pub prompt: String,
    pub categories: Vec<ScheduleCategory>,
    pub work_hours: Option<WorkHours>,
    pub recurring_tasks: Vec<RecurringTask>,
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
}

impl GeneratorCommand for DraftRequest {
    type Response = Vec<RawDraftEvent>;
    fn command() -> Command {
        Command::GenerateEvents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_round_trip() {
        let wire = Response::success(vec!["a".to_string(), "b".to_string()]);
        let parsed: Response<Vec<String>> = serde_json::from_str(&wire).unwrap();
        match parsed {
            Response::Success { data } => assert_eq!(data, vec!["a", "b"]),
            Response::Error { error } => panic!("unexpected error: {error}"),
        }
    }

    #[test]
    fn test_error_response_round_trip() {
        let wire = Response::error("model unavailable");
        let parsed: Response<()> = serde_json::from_str(&wire).unwrap();
        match parsed {
            Response::Success { .. } => panic!("expected error"),
            Response::Error { error } => assert_eq!(error, "model unavailable"),
        }
    }

    #[test]
    fn test_request_command_is_snake_case_on_the_wire() {
        let request = Request {
            command: Command::GenerateEvents,
            params: serde_json::json!({"prompt": "plan my week"}),
        };
        let wire = serde_json::to_string(&request).unwrap();
        assert!(wire.contains("\"generate_events\""), "wire: {wire}");
    }
}
