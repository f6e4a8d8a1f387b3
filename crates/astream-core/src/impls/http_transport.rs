//! HttpTransport - 本番用のイベント送信
//!
//! 飾りのない単発の JSON POST。`Content-Type: application/json` で
//! エンコードした payload を送り、レスポンスボディは読み捨てます。

use crate::domain::payload::EventPayload;
use crate::ports::{Transport, TransportError};

/// reqwest ベースの Transport
///
/// # 実装詳細
/// - reqwest::Client は内部でコネクションプールを持つので 1 個を共有
/// - `.json()` が Content-Type: application/json を付ける
/// - ステータスコードは見ない（送れたら成功扱い）
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// 既存の reqwest::Client を流用する（組み込み先がプールを共有したい場合）
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn deliver(&self, url: &str, payload: &EventPayload) -> Result<(), TransportError> {
        self.client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::DeliveryFailed(e.to_string()))?;
        Ok(())
    }
}
