//! astream-core
//!
//! ページに組み込むアナリティクスビーコンのクライアント本体。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（config, payload, session）
//! - **ports**: 環境ケーパビリティの抽象化レイヤー
//!   （Clock, CookieStore, SessionTokenSource, DataLayer, EventSink,
//!   PageContext, Transport）
//! - **app**: アプリケーションロジック（StreamBuilder, AnalyticStream）
//! - **impls**: Transport の実装（HttpTransport, RecordingTransport）
//!
//! # 設計方針
//! - グローバルシングルトンではなく、ページごとに 1 回構築する
//!   明示的なクライアントインスタンス
//! - 環境（cookie、ページ位置、data layer、HTTP）にはすべて ports 経由で
//!   アクセスし、欠けているケーパビリティは黙ってスキップ
//! - 送信は fire-and-forget。テレメトリの失敗がホストページの正しさに
//!   影響してはならない

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

// 主要な型を再エクスポート
pub use app::{AnalyticStream, StreamBuilder};
pub use domain::config::{ConfigUpdate, StreamConfig};
pub use domain::payload::{EventPayload, EventValue, set_default};
pub use ports::{PUSH_EVENT, PushEvent};
