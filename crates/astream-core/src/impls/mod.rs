//! Impls - Transport の実装
//!
//! # 含まれる実装
//! - **HttpTransport**: 本番用。reqwest で JSON POST する
//! - **RecordingTransport**: テスト・デモ用。送信内容を貯めるだけ
//!
//! cookie / data layer / event sink のインメモリ実装は、trait と同じ
//! ファイル（ports/ 以下）に置いてあります。

pub mod http_transport;
pub mod recording;

pub use self::http_transport::HttpTransport;
pub use self::recording::{FailingTransport, RecordingTransport};
