//! EventSink port - イベント通知の抽象化
//!
//! 追跡した全イベントをページ内の他のコンポーネントへ同期的に
//! 観測させるための口。ブラウザ組み込みでは `push.analyticStream`
//! という CustomEvent の dispatch に対応します。
//!
//! # 実装
//! - **NoopEventSink**: 何もしない（ケーパビリティ欠如相当）
//! - **BroadcastEventSink**: tokio broadcast チャネルで購読者全員に配る

use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::payload::EventPayload;

/// 通知イベントの名前（ブラウザ側では同名の CustomEvent になる）
pub const PUSH_EVENT: &str = "push.analyticStream";

/// 観測者に渡る通知イベント
///
/// CustomEvent の対応物: non-bubbling / non-cancelable、つまり観測者は
/// 値のコピーを受け取るだけで、push を止めることも payload を書き換える
/// こともできない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushEvent {
    /// イベント名（常に [`PUSH_EVENT`]）
    pub name: &'static str,

    /// 完成済みの payload（デフォルト充填後）
    pub payload: EventPayload,
}

impl PushEvent {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            name: PUSH_EVENT,
            payload,
        }
    }
}

/// EventSink はトラッキングイベントを観測者へ配る
pub trait EventSink: Send + Sync {
    /// 配送はベストエフォート。購読者がいなくてもエラーにしない。
    fn emit(&self, event: PushEvent);
}

/// 何もしない EventSink（デフォルト）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: PushEvent) {}
}

/// tokio broadcast チャネルで配る EventSink
///
/// # 使用例
/// ```ignore
/// let sink = BroadcastEventSink::new(16);
/// let mut rx = sink.subscribe();
/// // ... クライアントに注入した後 ...
/// let event = rx.recv().await?;
/// ```
#[derive(Debug)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<PushEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 新しい購読者を作る
    pub fn subscribe(&self) -> broadcast::Receiver<PushEvent> {
        self.tx.subscribe()
    }
}

impl EventSink for BroadcastEventSink {
    fn emit(&self, event: PushEvent) {
        // 購読者ゼロの send エラーは黙殺（ベストエフォート）
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::EventValue;

    #[tokio::test]
    async fn broadcast_sink_delivers_to_subscribers() {
        let sink = BroadcastEventSink::new(4);
        let mut rx = sink.subscribe();

        let payload = EventPayload::new("click", "nav", EventValue::new());
        sink.emit(PushEvent::new(payload.clone()));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, PUSH_EVENT);
        assert_eq!(event.payload, payload);
    }

    #[test]
    fn emit_without_subscribers_is_silent() {
        let sink = BroadcastEventSink::new(4);
        sink.emit(PushEvent::new(EventPayload::new(
            "click",
            "nav",
            EventValue::new(),
        )));
        // パニックしなければよい
    }
}
