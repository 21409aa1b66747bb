//! Draft generator subprocess boundary.
//!
//! This module handles communication with external generator binaries
//! (e.g., `icalplan-generator-openai`) using JSON over stdin/stdout.
//!
//! The protocol is designed to be language-agnostic: any executable
//! that speaks the JSON protocol can draft events. Generators manage
//! their own credentials; core just sends the request context and
//! normalizes what comes back.

pub mod draft;
pub mod protocol;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{PlanError, PlanResult};
use crate::event::CalendarEvent;
use crate::generator::draft::normalize_batch;
use crate::generator::protocol::{Command, DraftRequest, GeneratorCommand, Request, Response};

/// Drafting usually involves a remote model, so the window is generous.
const GENERATOR_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Generator(String);

impl Generator {
    pub fn from_name(name: &str) -> Self {
        Generator(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Generators are discovered as `icalplan-generator-<name>` on PATH.
    fn binary_path(&self) -> PlanResult<std::path::PathBuf> {
        let binary_name = format!("icalplan-generator-{}", self.0);
        let binary_path = which::which(&binary_name)
            .map_err(|_| PlanError::GeneratorNotInstalled(self.0.clone()))?;
        Ok(binary_path)
    }

    /// Ask the generator for draft events within the request's range.
    ///
    /// Candidates are normalized before they are returned; the caller is
    /// expected to run them through the resolver, so a failed call never
    /// touches any store.
    pub async fn generate(&self, request: DraftRequest) -> PlanResult<Vec<CalendarEvent>> {
        let raw = self.call(request).await?;
        normalize_batch(raw)
    }

    /// Call a typed generator command and return the result.
    ///
    /// The response type is inferred from the command's associated type,
    /// ensuring compile-time type safety.
    async fn call<C: GeneratorCommand>(&self, cmd: C) -> PlanResult<C::Response> {
        timeout(GENERATOR_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| PlanError::GeneratorTimeout(GENERATOR_TIMEOUT.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> PlanResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| PlanError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| PlanError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                PlanError::GenerationFailed(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        // Wait for process and collect output
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(PlanError::GenerationFailed(format!(
                "Generator exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.is_empty() {
            return Err(PlanError::GenerationFailed(
                "Generator returned no response".into(),
            ));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| PlanError::GenerationFailed(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(PlanError::GenerationFailed(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn request() -> DraftRequest {
        DraftRequest {
            prompt: "plan my evenings".to_string(),
            categories: Vec::new(),
            work_hours: None,
            recurring_tasks: Vec::new(),
            range_start: Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap(),
            range_end: Utc.with_ymd_and_hms(2025, 4, 3, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_missing_binary_is_a_typed_error() {
        let generator = Generator::from_name("definitely-not-installed");
        let result = generator.binary_path();
        assert!(matches!(result, Err(PlanError::GeneratorNotInstalled(_))));
    }

    #[tokio::test]
    async fn test_generate_against_missing_binary_fails_cleanly() {
        let generator = Generator::from_name("definitely-not-installed");
        let result = generator.generate(request()).await;
        assert!(matches!(result, Err(PlanError::GeneratorNotInstalled(_))));
    }
}
