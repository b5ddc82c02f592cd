use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stage a progress event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Extraction,
    Fraud,
    Policy,
    Decision,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Extraction => "extraction",
            StageName::Fraud => "fraud",
            StageName::Policy => "policy",
            StageName::Decision => "decision",
        }
    }
}

/// Lifecycle status of a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Started,
    Completed,
    Failed,
}

/// Best-effort per-stage progress notification.
///
/// Emitted before and after each pipeline stage for live progress
/// display. This channel never influences pipeline behavior or output;
/// absence of subscribers is not an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// Submission the event belongs to
    pub submission_id: Uuid,
    pub stage: StageName,
    pub status: StageStatus,
    /// Small partial-result payload for display (field counts, scores)
    pub detail: serde_json::Value,
    pub at: DateTime<Utc>,
}

impl StageEvent {
    pub fn new(
        submission_id: Uuid,
        stage: StageName,
        status: StageStatus,
        detail: serde_json::Value,
    ) -> Self {
        Self {
            submission_id,
            stage,
            status,
            detail,
            at: Utc::now(),
        }
    }
}
