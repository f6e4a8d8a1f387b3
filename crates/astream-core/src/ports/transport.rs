//! Transport port - イベント送信の抽象化
//!
//! push 1 回につき送信 1 回。バッチもリトライもしない fire-and-forget
//! であり、結果は呼び出し側に返らない（エラーはログに書くだけ）。
//!
//! # 実装
//! - **HttpTransport**: JSON POST（本番用、impls/http_transport）
//! - **RecordingTransport**: 送信内容を貯めるだけ（テスト用、impls/recording）

use crate::domain::payload::EventPayload;

/// Transport のエラー
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("payload encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Transport は完成済み payload をエンドポイントへ届ける
///
/// # 設計原則
/// - 呼び出し側（push）は完了を待たない。detached task として実行される
/// - レスポンスは読まない。成功かどうかは配送の成立のみ
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, url: &str, payload: &EventPayload) -> Result<(), TransportError>;
}
