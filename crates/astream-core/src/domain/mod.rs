//! Domain model (config, payloads, session helpers).
//!
//! - **config**: クライアント設定（StreamConfig / ConfigUpdate のマージ）
//! - **payload**: 送信イベント（EventPayload / dot-path の set_default）
//! - **session**: cookie 文字列の読み書きヘルパ

pub mod config;
pub mod payload;
pub mod session;

pub use self::config::{ConfigUpdate, StreamConfig};
pub use self::payload::{EventPayload, EventValue, set_default};
pub use self::session::{decode_cookie_value, encode_cookie_value, find_cookie};
