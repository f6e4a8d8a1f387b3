//! DataLayer port - ページ側 data layer 連携の抽象化
//!
//! タグマネージャ等が監視しているページグローバルな配列（`datalayer`）
//! への追記を抽象化します。ベストエフォートの連携ポイントであり、
//! 追記の成否をクライアントは確認しません。

use serde_json::Value;
use std::sync::Mutex;

/// DataLayer はページ側の data layer 配列への追記を提供
///
/// classification 付きの payload はここには流れない（push 側で除外）。
pub trait DataLayer: Send + Sync {
    fn append(&self, entry: Value);
}

/// 開発・テスト用のインメモリ data layer
#[derive(Debug, Default)]
pub struct MemoryDataLayer {
    entries: Mutex<Vec<Value>>,
}

impl MemoryDataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追記済みエントリのスナップショット
    pub fn entries(&self) -> Vec<Value> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl DataLayer for MemoryDataLayer {
    fn append(&self, entry: Value) {
        self.entries.lock().unwrap().push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn append_preserves_order() {
        let layer = MemoryDataLayer::new();
        layer.append(json!({ "n": 1 }));
        layer.append(json!({ "n": 2 }));

        assert_eq!(layer.entries(), vec![json!({ "n": 1 }), json!({ "n": 2 })]);
    }
}
