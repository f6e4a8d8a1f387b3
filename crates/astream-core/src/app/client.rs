//! AnalyticStream - トラッキングクライアント本体
//!
//! ページごとに 1 回構築する明示的なインスタンスで、グローバル状態を
//! 持ちません。環境には ports 経由でしか触らないので、テストでは
//! フェイクを注入して全経路を観測できます。

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::config::{ConfigUpdate, StreamConfig};
use crate::domain::payload::{EventPayload, EventValue, set_default};
use crate::domain::session;
use crate::ports::{
    Clock, CookieStore, DataLayer, EventSink, PageContext, PushEvent, SessionTokenSource,
    Transport,
};

/// ページロード完了時に呼ばれるフック
type LoadHook = Box<dyn Fn() + Send + Sync>;

/// トラッキングクライアント
///
/// Clone は安価（内部は Arc 共有）。`pageevent` が返すハンドラや
/// 複数スレッドへ配るときはそのまま clone してよい。
///
/// # 使用例
/// ```ignore
/// let client = AnalyticStream::builder()
///     .cookie_store(MemoryCookieStore::new())
///     .build();
/// client.configure(ConfigUpdate::new().url("https://collect.example").product("shop"));
/// client.page_loaded();
/// ```
#[derive(Clone)]
pub struct AnalyticStream {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) config: Mutex<StreamConfig>,
    /// 一度解決したら page lifetime の間は変わらない
    pub(crate) session_id: Mutex<Option<String>>,
    /// クライアント構築時刻（page load time の起点）
    pub(crate) started_at_ms: i64,
    pub(crate) load_hooks: Mutex<Vec<LoadHook>>,

    // ケーパビリティ。Option<_> = その環境には存在しない
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cookies: Option<Arc<dyn CookieStore>>,
    pub(crate) tokens: Option<Arc<dyn SessionTokenSource>>,
    pub(crate) data_layer: Option<Arc<dyn DataLayer>>,
    pub(crate) page: Option<Arc<dyn PageContext>>,
    pub(crate) events: Arc<dyn EventSink>,
    pub(crate) transport: Arc<dyn Transport>,
}

impl AnalyticStream {
    pub fn builder() -> super::builder::StreamBuilder {
        super::builder::StreamBuilder::new()
    }

    pub(crate) fn from_inner(inner: Inner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// 設定をマージして、結果の設定を返す
    ///
    /// 何度呼んでもよい。absent / falsy なフィールドは既存値を消さない。
    pub fn configure(&self, update: ConfigUpdate) -> StreamConfig {
        let mut config = self.inner.config.lock().unwrap();
        config.apply(&update);
        config.clone()
    }

    /// 現在の設定のスナップショット
    pub fn config(&self) -> StreamConfig {
        self.inner.config.lock().unwrap().clone()
    }

    /// セッション ID を解決する（冪等）
    ///
    /// 1. メモリ上に解決済みならそれを返す
    /// 2. cookie 名が設定済みで cookie ストアがあれば、cookie から読む
    /// 3. 見つからなければトークンを発行して cookie に書く
    /// 4. 前提が揃わなければ None のまま（エラーではない）
    pub fn session_id(&self) -> Option<String> {
        let mut held = self.inner.session_id.lock().unwrap();
        if held.is_some() {
            return held.clone();
        }

        let cookie_name = self.inner.config.lock().unwrap().session_cookie.clone()?;
        let cookies = self.inner.cookies.as_ref()?;

        if let Some(raw) = cookies.read_all()
            && let Some(value) = session::find_cookie(&raw, &cookie_name)
        {
            *held = Some(value);
            return held.clone();
        }

        let tokens = self.inner.tokens.as_ref()?;
        let product = self.inner.config.lock().unwrap().product.clone();
        let token = tokens.mint(&product);
        cookies.write(&cookie_name, &session::encode_cookie_value(&token));
        *held = Some(token);
        held.clone()
    }

    /// イベントを送出する
    ///
    /// 1. product / sessionId / timestamp を未設定なら埋める
    /// 2. 未分類の payload を data layer に追記（あれば）
    /// 3. EventSink に `push.analyticStream` イベントを流す
    /// 4. Transport に渡す（fire-and-forget）
    ///
    /// well-formed な payload に対しては決して失敗しない。送信の失敗も
    /// 1〜3 を巻き戻さない。
    pub fn push(&self, mut payload: EventPayload) {
        let config = self.config();

        // 未設定（または空）のフィールドだけを埋める
        if payload.product.as_deref().is_none_or(str::is_empty) {
            payload.product = Some(config.product.clone());
        }
        if payload.session_id.as_deref().is_none_or(str::is_empty) {
            payload.session_id = self.session_id();
        }
        if payload.timestamp.is_none() {
            payload.timestamp = Some(self.inner.clock.now_millis());
        }

        // 分類付き payload は共有 data layer には流さない
        if let Some(layer) = &self.inner.data_layer
            && payload.classification.is_none()
            && let Ok(entry) = serde_json::to_value(&payload)
        {
            layer.append(entry);
        }

        self.inner.events.emit(PushEvent::new(payload.clone()));

        self.send(config.url, payload);
    }

    /// pageview イベントを送出する
    ///
    /// 呼び出し側が渡した値は上書きせず、現在ページの URL 成分
    /// （page.host / page.pathname / page.query / page.hash）を補う。
    pub fn pageview(&self, properties: Option<EventValue>) {
        let mut values = properties.unwrap_or_default();

        if let Some(page) = &self.inner.page {
            let loc = page.location();
            set_default(&mut values, "page.host", Value::String(loc.host));
            set_default(&mut values, "page.pathname", Value::String(loc.pathname));
            set_default(&mut values, "page.query", Value::String(loc.query));
            set_default(&mut values, "page.hash", Value::String(loc.hash));
        }

        self.push(EventPayload::new("pageview", "page load", values));
    }

    /// クリックトラッキング用のハンドラを返す
    ///
    /// 返ったクロージャを呼ぶと push が 1 回走り、`true` が返る
    /// （DOM のインラインハンドラで「デフォルト動作を止めない」の意味）。
    pub fn pageevent(
        &self,
        label: impl Into<String>,
        category: impl Into<String>,
        values: EventValue,
    ) -> impl Fn() -> bool + Send + Sync + 'static {
        let client = self.clone();
        let label = label.into();
        let category = category.into();
        move || {
            client.push(EventPayload::new(
                label.clone(),
                category.clone(),
                values.clone(),
            ));
            true
        }
    }

    /// ページロード完了時のフックを登録する
    ///
    /// `window.onload` の読んで上書きする連鎖ではなく、明示的な登録 API。
    /// 登録順に `page_loaded` の先頭で呼ばれる。
    pub fn on_load(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.inner.load_hooks.lock().unwrap().push(Box::new(hook));
    }

    /// ページロード完了の通知
    ///
    /// (a) 登録済みフックを先に呼ぶ
    /// (b) セッション ID を解決する
    /// (c) 構築から今までの経過ミリ秒を page load time として計る
    /// (d) `onload` / `page load` イベントを page.loadTime 付きで送出
    /// (e) skip_page_view でなければ pageview を送出
    pub fn page_loaded(&self) {
        // フックはロック外で呼ぶ（フック内から self を触れるように）
        let hooks = std::mem::take(&mut *self.inner.load_hooks.lock().unwrap());
        for hook in &hooks {
            hook();
        }
        {
            // フック実行中に登録されたものは後ろに足して戻す
            let mut guard = self.inner.load_hooks.lock().unwrap();
            let added = std::mem::take(&mut *guard);
            *guard = hooks;
            guard.extend(added);
        }

        let _ = self.session_id();

        let load_time = (self.inner.clock.now_millis() - self.inner.started_at_ms).max(0);
        let mut values = EventValue::new();
        set_default(&mut values, "page.loadTime", Value::from(load_time));
        self.push(EventPayload::new("onload", "page load", values));

        if !self.config().skip_page_view {
            self.pageview(None);
        }
    }

    /// Transport への受け渡し
    ///
    /// URL 未設定なら何もしない。設定済みなら detached task として送り、
    /// 結果はログに書く以外捨てる。
    fn send(&self, url: Option<String>, payload: EventPayload) {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            return;
        };

        let transport = Arc::clone(&self.inner.transport);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = transport.deliver(&url, &payload).await {
                        tracing::warn!(%err, %url, "analytics delivery failed");
                    }
                });
            }
            Err(_) => {
                // async ランタイム外から push された。他のケーパビリティ欠如と
                // 同じ扱いで、この手順だけスキップする
                tracing::warn!(%url, "no async runtime; analytics delivery skipped");
            }
        }
    }
}
