//! Ports - 環境ケーパビリティの抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! クライアントはページ環境（cookie、ページ位置、data layer、乱数、
//! HTTP）に直接触れず、すべてここの trait 経由でアクセスします。
//!
//! # 設計原則
//! - ケーパビリティ 1 つにつき trait 1 つ
//! - 本番ワイヤリングは実環境のバインディングを、テストはフェイクを注入
//! - ケーパビリティの欠如はエラーではなく「その手順をスキップ」

pub mod clock;
pub mod cookie_store;
pub mod data_layer;
pub mod event_sink;
pub mod page;
pub mod session_token;
pub mod transport;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::cookie_store::{CookieStore, MemoryCookieStore};
pub use self::data_layer::{DataLayer, MemoryDataLayer};
pub use self::event_sink::{BroadcastEventSink, EventSink, NoopEventSink, PUSH_EVENT, PushEvent};
pub use self::page::{FixedPage, PageContext, PageLocation};
pub use self::session_token::{FixedTokenSource, RandTokenSource, SessionTokenSource};
pub use self::transport::{Transport, TransportError};
