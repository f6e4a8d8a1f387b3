//! StreamBuilder - クライアントの構築とケーパビリティのワイヤリング
//!
//! 本番ワイヤリングは実環境のバインディング（cookie ストア、ページ位置、
//! HttpTransport）を、テストはフェイクを注入します。注入しなかった
//! ケーパビリティは「その環境には存在しない」扱いになり、対応する手順が
//! 黙ってスキップされます。
//!
//! # 使用例
//! ```ignore
//! let client = StreamBuilder::new()
//!     .config(ConfigUpdate::new().url("https://collect.example").product("shop"))
//!     .cookie_store(MemoryCookieStore::new())
//!     .page(FixedPage::new(location))
//!     .build();
//! ```

use std::sync::Arc;

use crate::domain::config::{ConfigUpdate, StreamConfig};
use crate::impls::HttpTransport;
use crate::ports::{
    Clock, CookieStore, DataLayer, EventSink, NoopEventSink, PageContext, RandTokenSource,
    SessionTokenSource, SystemClock, Transport,
};

use super::client::{AnalyticStream, Inner};

/// AnalyticStream のビルダー
///
/// # デフォルト
/// - clock: SystemClock
/// - session tokens: RandTokenSource（rand + base64 は常にあるものとして）
/// - event sink: NoopEventSink
/// - transport: HttpTransport
/// - cookie store / data layer / page: なし（環境が供給しなければ欠如）
pub struct StreamBuilder {
    config: StreamConfig,
    started_at_ms: Option<i64>,
    clock: Arc<dyn Clock>,
    cookies: Option<Arc<dyn CookieStore>>,
    tokens: Option<Arc<dyn SessionTokenSource>>,
    data_layer: Option<Arc<dyn DataLayer>>,
    page: Option<Arc<dyn PageContext>>,
    events: Arc<dyn EventSink>,
    transport: Arc<dyn Transport>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self {
            config: StreamConfig::default(),
            started_at_ms: None,
            clock: Arc::new(SystemClock),
            cookies: None,
            tokens: Some(Arc::new(RandTokenSource)),
            data_layer: None,
            page: None,
            events: Arc::new(NoopEventSink),
            transport: Arc::new(HttpTransport::new()),
        }
    }

    /// 初期設定（build 後も `configure` で再マージできる）
    pub fn config(mut self, update: ConfigUpdate) -> Self {
        self.config.apply(&update);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// page load time の起点を明示する（テスト用。既定は build 時刻）
    pub fn started_at_ms(mut self, started_at_ms: i64) -> Self {
        self.started_at_ms = Some(started_at_ms);
        self
    }

    pub fn cookie_store(mut self, store: impl CookieStore + 'static) -> Self {
        self.cookies = Some(Arc::new(store));
        self
    }

    pub fn cookie_store_shared<T: CookieStore + 'static>(mut self, store: Arc<T>) -> Self {
        self.cookies = Some(store as Arc<dyn CookieStore>);
        self
    }

    pub fn session_tokens(mut self, tokens: impl SessionTokenSource + 'static) -> Self {
        self.tokens = Some(Arc::new(tokens));
        self
    }

    /// 乱数・エンコーダのない環境を表す（セッションの新規発行が不可能になる）
    pub fn without_session_tokens(mut self) -> Self {
        self.tokens = None;
        self
    }

    pub fn data_layer(mut self, layer: impl DataLayer + 'static) -> Self {
        self.data_layer = Some(Arc::new(layer));
        self
    }

    pub fn data_layer_shared<T: DataLayer + 'static>(mut self, layer: Arc<T>) -> Self {
        self.data_layer = Some(layer as Arc<dyn DataLayer>);
        self
    }

    pub fn page(mut self, page: impl PageContext + 'static) -> Self {
        self.page = Some(Arc::new(page));
        self
    }

    pub fn event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Arc::new(sink);
        self
    }

    pub fn event_sink_shared<T: EventSink + 'static>(mut self, sink: Arc<T>) -> Self {
        self.events = sink as Arc<dyn EventSink>;
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn transport_shared<T: Transport + 'static>(mut self, transport: Arc<T>) -> Self {
        self.transport = transport as Arc<dyn Transport>;
        self
    }

    pub fn build(self) -> AnalyticStream {
        let started_at_ms = self
            .started_at_ms
            .unwrap_or_else(|| self.clock.now_millis());
        AnalyticStream::from_inner(Inner {
            config: std::sync::Mutex::new(self.config),
            session_id: std::sync::Mutex::new(None),
            started_at_ms,
            load_hooks: std::sync::Mutex::new(Vec::new()),
            clock: self.clock,
            cookies: self.cookies,
            tokens: self.tokens,
            data_layer: self.data_layer,
            page: self.page,
            events: self.events,
            transport: self.transport,
        })
    }
}

impl Default for StreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{BroadcastEventSink, FixedClock, MemoryCookieStore};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn builder_applies_initial_config() {
        let client = StreamBuilder::new()
            .config(ConfigUpdate::new().product("shop").skip_page_view(true))
            .build();

        let config = client.config();
        assert_eq!(config.product, "shop");
        assert!(config.skip_page_view);
    }

    #[test]
    fn started_at_defaults_to_build_time() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let sink = Arc::new(BroadcastEventSink::new(4));
        let mut rx = sink.subscribe();

        let client = StreamBuilder::new()
            .clock(FixedClock::new(fixed_time))
            .config(ConfigUpdate::new().skip_page_view(true))
            .event_sink_shared(Arc::clone(&sink))
            .build();
        client.page_loaded();

        // 構築も page_loaded も同じ固定時刻なので load time は 0
        let event = rx.try_recv().unwrap();
        assert_eq!(event.payload.event_label, "onload");
        assert_eq!(event.payload.event_value["page"]["loadTime"], json!(0));
    }

    #[test]
    fn without_session_tokens_blocks_minting() {
        let client = StreamBuilder::new()
            .cookie_store(MemoryCookieStore::new())
            .without_session_tokens()
            .build();
        client.configure(ConfigUpdate::new().session_cookie("sid"));

        assert_eq!(client.session_id(), None);
    }
}
