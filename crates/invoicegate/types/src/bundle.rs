use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decision::Decision;
use crate::fraud::FraudAssessment;
use crate::invoice::ExtractedInvoice;
use crate::policy::PolicyAssessment;

/// Complete output of one pipeline invocation.
///
/// The four-entity bundle handed to the persistence collaborator:
/// suitable for one invoice record, one assessment record and one
/// decision record keyed by the submission id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionBundle {
    /// Key for all downstream records of this submission
    pub submission_id: Uuid,
    /// Character count of the recognized text (informational only)
    pub text_length: usize,
    pub extraction: ExtractedInvoice,
    pub fraud: FraudAssessment,
    pub policy: PolicyAssessment,
    pub decision: Decision,
    pub completed_at: DateTime<Utc>,
}
