//! SessionTokenSource port - セッショントークン生成の抽象化
//!
//! 新規訪問者に割り当てる opaque なセッション ID を生成します。
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **RandTokenSource**: rand + base64 ベース（本番用）
//! - **FixedTokenSource**: 固定値（テスト用）

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// SessionTokenSource は新しいセッション ID を発行
///
/// # トークンの特性
/// - opaque（中身に意味を持たせない）
/// - product 名を混ぜるので、同じ収集エンドポイントを共有する
///   サイト間でも衝突しづらい
///
/// # Thread Safety
/// - `Send + Sync` を要求（クライアントは複数スレッドから使える）
pub trait SessionTokenSource: Send + Sync {
    /// 新しいセッション ID を発行
    fn mint(&self, product: &str) -> String;
}

/// RandTokenSource は rand + base64 ベースのトークン生成器
///
/// `base64(product + random)` という形のトークンを作ります
/// （ブラウザでいう `btoa(product + Math.random())`）。
#[derive(Debug, Clone, Copy, Default)]
pub struct RandTokenSource;

impl SessionTokenSource for RandTokenSource {
    fn mint(&self, product: &str) -> String {
        let entropy: f64 = rand::random();
        STANDARD.encode(format!("{product}{entropy}"))
    }
}

/// テスト用: 常に同じトークンを返す
#[derive(Debug, Clone)]
pub struct FixedTokenSource {
    token: String,
}

impl FixedTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl SessionTokenSource for FixedTokenSource {
    fn mint(&self, _product: &str) -> String {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rand_tokens_are_unique() {
        let source = RandTokenSource;

        let t1 = source.mint("shop");
        let t2 = source.mint("shop");
        let t3 = source.mint("shop");

        assert_ne!(t1, t2);
        assert_ne!(t2, t3);
        assert_ne!(t1, t3);
    }

    #[test]
    fn rand_tokens_are_valid_base64_over_the_product() {
        let source = RandTokenSource;
        let token = source.mint("shop");

        let decoded = STANDARD.decode(&token).unwrap();
        let decoded = String::from_utf8(decoded).unwrap();
        assert!(decoded.starts_with("shop"), "decoded: {decoded}");
        let entropy: f64 = decoded["shop".len()..].parse().unwrap();
        assert!((0.0..1.0).contains(&entropy));
    }

    #[test]
    fn fixed_source_is_deterministic() {
        let source = FixedTokenSource::new("tok-1");
        assert_eq!(source.mint("a"), "tok-1");
        assert_eq!(source.mint("b"), "tok-1");
    }
}
