//! Best-effort progress notifications over a broadcast channel.

use tokio::sync::broadcast;
use uuid::Uuid;

use invoicegate_types::{StageEvent, StageName, StageStatus};

const CHANNEL_CAPACITY: usize = 256;

/// Fan-out channel for [`StageEvent`]s.
///
/// Delivery is fire-and-forget: sends to a bus with no subscribers are
/// dropped silently, and a slow subscriber that falls behind loses the
/// oldest events rather than stalling the pipeline.
pub struct ProgressBus {
    sender: broadcast::Sender<StageEvent>,
}

impl ProgressBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publish one event; no subscribers is not an error.
    pub fn publish(&self, event: StageEvent) {
        let _ = self.sender.send(event);
    }

    pub(crate) fn emit(
        &self,
        submission_id: Uuid,
        stage: StageName,
        status: StageStatus,
        detail: serde_json::Value,
    ) {
        self.publish(StageEvent::new(submission_id, stage, status, detail));
    }
}

impl Default for ProgressBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn subscriber_receives_published_events() {
        let bus = ProgressBus::new();
        let mut rx = bus.subscribe();
        let id = Uuid::new_v4();

        bus.emit(id, StageName::Extraction, StageStatus::Started, json!({}));
        bus.emit(
            id,
            StageName::Extraction,
            StageStatus::Completed,
            json!({ "fields_found": 4 }),
        );

        let first = rx.recv().await.unwrap();
        assert_eq!(first.submission_id, id);
        assert_eq!(first.stage, StageName::Extraction);
        assert_eq!(first.status, StageStatus::Started);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.status, StageStatus::Completed);
        assert_eq!(second.detail["fields_found"], 4);
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = ProgressBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.emit(
            Uuid::new_v4(),
            StageName::Decision,
            StageStatus::Completed,
            json!({}),
        );
    }
}
