//! PageContext port - 現在ページ位置の抽象化
//!
//! pageview が自動で付与する URL 成分（host / pathname / query / hash）
//! の取得元です。ブラウザ組み込みでは location から、テストや
//! サーバーサイド組み込みでは固定値から供給します。

use serde::{Deserialize, Serialize};

/// 現在ページの URL 成分
///
/// `query` は `"?q=1"`、`hash` は `"#h"` のように区切り文字込み
/// （`location.search` / `location.hash` と同じ形）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub host: String,
    pub pathname: String,
    pub query: String,
    pub hash: String,
}

impl PageLocation {
    pub fn new(
        host: impl Into<String>,
        pathname: impl Into<String>,
        query: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            pathname: pathname.into(),
            query: query.into(),
            hash: hash.into(),
        }
    }
}

/// PageContext は現在のページ位置を提供
pub trait PageContext: Send + Sync {
    fn location(&self) -> PageLocation;
}

/// 固定のページ位置を返す PageContext（テスト・デモ用）
#[derive(Debug, Clone)]
pub struct FixedPage {
    location: PageLocation,
}

impl FixedPage {
    pub fn new(location: PageLocation) -> Self {
        Self { location }
    }
}

impl PageContext for FixedPage {
    fn location(&self) -> PageLocation {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_page_returns_the_given_location() {
        let page = FixedPage::new(PageLocation::new("a.com", "/p", "?q=1", "#h"));
        let loc = page.location();

        assert_eq!(loc.host, "a.com");
        assert_eq!(loc.pathname, "/p");
        assert_eq!(loc.query, "?q=1");
        assert_eq!(loc.hash, "#h");
    }
}
