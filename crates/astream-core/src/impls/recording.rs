//! RecordingTransport - テスト・デモ用の送信記録
//!
//! 実際には何も送らず、`deliver` に渡された URL と payload を
//! そのまま貯めます。fire-and-forget な送信をテストから観測するために
//! 使います。

use std::sync::Mutex;

use crate::domain::payload::EventPayload;
use crate::ports::{Transport, TransportError};

/// 送信内容を記録するだけの Transport
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, EventPayload)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに「送信」された (url, payload) のスナップショット
    pub fn sent(&self) -> Vec<(String, EventPayload)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().unwrap().is_empty()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, url: &str, payload: &EventPayload) -> Result<(), TransportError> {
        self.sent
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));
        Ok(())
    }
}

/// 常に失敗する Transport（エラーパスのテスト用）
#[derive(Debug, Default)]
pub struct FailingTransport;

#[async_trait::async_trait]
impl Transport for FailingTransport {
    async fn deliver(&self, _url: &str, _payload: &EventPayload) -> Result<(), TransportError> {
        Err(TransportError::DeliveryFailed("wire cut".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::EventValue;

    #[tokio::test]
    async fn records_deliveries_in_order() {
        let transport = RecordingTransport::new();
        let p1 = EventPayload::new("a", "cat", EventValue::new());
        let p2 = EventPayload::new("b", "cat", EventValue::new());

        transport.deliver("https://x.example", &p1).await.unwrap();
        transport.deliver("https://x.example", &p2).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1.event_label, "a");
        assert_eq!(sent[1].1.event_label, "b");
    }
}
