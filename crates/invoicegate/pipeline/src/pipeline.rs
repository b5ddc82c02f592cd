//! The four-stage orchestrator.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use invoicegate_decision::DecisionFuser;
use invoicegate_extract::Extractor;
use invoicegate_fraud::{FraudConfig, FraudScorer, InMemoryLedger, LedgerStore};
use invoicegate_policy::{PolicyConfig, PolicyEvaluator};
use invoicegate_types::{DecisionBundle, StageName, StageStatus};

use crate::error::PipelineError;
use crate::progress::ProgressBus;

/// Tunables for the analysis stages.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    pub fraud: FraudConfig,
    pub policy: PolicyConfig,
}

/// One extraction, fraud, policy and decision engine wired together.
///
/// The pipeline is stateless across submissions except for the fraud
/// ledger; a single instance can serve concurrent submissions.
pub struct Pipeline {
    extractor: Extractor,
    fraud: FraudScorer,
    policy: PolicyEvaluator,
    fuser: DecisionFuser,
    progress: ProgressBus,
}

impl Pipeline {
    /// Pipeline with a fresh in-memory ledger.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        Self::with_ledger(config, Arc::new(InMemoryLedger::new()))
    }

    /// Pipeline sharing an externally owned ledger, so multiple
    /// pipelines (or tests) can observe the same submission history.
    pub fn with_ledger(
        config: PipelineConfig,
        ledger: Arc<dyn LedgerStore>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            extractor: Extractor::new()?,
            fraud: FraudScorer::new(config.fraud, ledger),
            policy: PolicyEvaluator::new(config.policy),
            fuser: DecisionFuser::new(),
            progress: ProgressBus::new(),
        })
    }

    /// Receiver for per-stage progress events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<invoicegate_types::StageEvent> {
        self.progress.subscribe()
    }

    /// Run the full pipeline on one recognized invoice text.
    ///
    /// Total: empty or garbled text degrades to an error-status
    /// extraction and still reaches a decision (held for low
    /// confidence). Fraud and policy run concurrently on the shared
    /// extraction result; the fraud ledger append happens inside the
    /// fraud stage regardless of the eventual decision.
    pub async fn process(&self, raw_text: &str) -> DecisionBundle {
        let submission_id = Uuid::new_v4();
        let text_length = raw_text.chars().count();

        info!(%submission_id, text_length, "processing submission");

        self.progress.emit(
            submission_id,
            StageName::Extraction,
            StageStatus::Started,
            json!({ "text_length": text_length }),
        );
        let extraction = self.extractor.extract(raw_text);
        self.progress.emit(
            submission_id,
            StageName::Extraction,
            StageStatus::Completed,
            json!({
                "status": extraction.status,
                "confidence": extraction.confidence,
                "invoice_number": extraction.invoice_number,
                "vendor": extraction.vendor,
                "total_amount": extraction.total_amount,
            }),
        );

        self.progress.emit(
            submission_id,
            StageName::Fraud,
            StageStatus::Started,
            json!({}),
        );
        self.progress.emit(
            submission_id,
            StageName::Policy,
            StageStatus::Started,
            json!({}),
        );

        // Both stages read the same immutable extraction; neither sees
        // the other's output.
        let (fraud, policy) = tokio::join!(
            async { self.fraud.assess(&extraction) },
            async { self.policy.evaluate(&extraction) },
        );

        self.progress.emit(
            submission_id,
            StageName::Fraud,
            StageStatus::Completed,
            json!({
                "risk_score": fraud.risk_score,
                "risk_level": fraud.risk_level,
                "flags": fraud.flags.len(),
            }),
        );
        self.progress.emit(
            submission_id,
            StageName::Policy,
            StageStatus::Completed,
            json!({
                "compliant": policy.compliant,
                "violations": policy.violations.len(),
                "warnings": policy.warnings.len(),
                "approval_level": policy.approval_level,
            }),
        );

        self.progress.emit(
            submission_id,
            StageName::Decision,
            StageStatus::Started,
            json!({}),
        );
        let decision = self.fuser.fuse(&extraction, &fraud, &policy);
        self.progress.emit(
            submission_id,
            StageName::Decision,
            StageStatus::Completed,
            json!({
                "status": decision.status,
                "confidence": decision.confidence,
            }),
        );

        debug!(
            %submission_id,
            status = %decision.status,
            "submission decided"
        );

        DecisionBundle {
            submission_id,
            text_length,
            extraction,
            fraud,
            policy,
            decision,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use invoicegate_types::DecisionStatus;

    fn clean_invoice() -> String {
        let date = (Utc::now() - Duration::days(5)).format("%m/%d/%Y");
        format!(
            "Acme Corporation Inc.\n\
             Invoice Number: INV-2025-0042\n\
             Date: {date}\n\
             PO Number: PO-77812\n\
             Tax: $211.42\n\
             Total: $2,345.67\n"
        )
    }

    #[tokio::test]
    async fn clean_invoice_approves() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let text = clean_invoice();
        let bundle = pipeline.process(&text).await;

        assert_eq!(bundle.decision.status, DecisionStatus::Approve);
        assert!(bundle.policy.compliant);
        assert!(!bundle.fraud.is_suspicious);
        assert_eq!(bundle.text_length, text.chars().count());
    }

    #[tokio::test]
    async fn empty_text_is_rejected_on_missing_fields() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let bundle = pipeline.process("   \n  ").await;

        assert_eq!(bundle.extraction.confidence, 0.0);
        // Required-field violations outrank the low-confidence hold.
        assert!(!bundle.policy.compliant);
        assert_eq!(bundle.decision.status, DecisionStatus::Reject);
    }

    #[tokio::test]
    async fn stage_events_arrive_in_order() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let mut rx = pipeline.subscribe();
        let bundle = pipeline.process(&clean_invoice()).await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 8);
        assert!(events.iter().all(|e| e.submission_id == bundle.submission_id));

        assert_eq!(events[0].stage, StageName::Extraction);
        assert_eq!(events[0].status, StageStatus::Started);
        assert_eq!(events[1].stage, StageName::Extraction);
        assert_eq!(events[1].status, StageStatus::Completed);
        assert_eq!(events[6].stage, StageName::Decision);
        assert_eq!(events[7].status, StageStatus::Completed);
        assert_eq!(events[7].detail["status"], "APPROVE");
    }
}
