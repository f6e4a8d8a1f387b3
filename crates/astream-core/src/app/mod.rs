//! App - アプリケーション層
//!
//! ports を組み合わせてトラッキングクライアント本体を実装します。
//!
//! # 主要コンポーネント
//! - **StreamBuilder**: クライアントの構築とケーパビリティのワイヤリング
//! - **AnalyticStream**: クライアント本体
//!   （configure / push / pageview / pageevent / page_loaded）

pub mod builder;
pub mod client;

pub use self::builder::StreamBuilder;
pub use self::client::AnalyticStream;
