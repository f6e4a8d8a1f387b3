use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use astream_core::impls::RecordingTransport;
use astream_core::ports::{
    BroadcastEventSink, CookieStore, FixedPage, MemoryCookieStore, MemoryDataLayer, PageLocation,
};
use astream_core::{AnalyticStream, ConfigUpdate, EventValue};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // (A) ケーパビリティを用意してクライアントを構築
    //     （デモなので実送信の代わりに RecordingTransport を使う）
    let cookies = Arc::new(MemoryCookieStore::new());
    let data_layer = Arc::new(MemoryDataLayer::new());
    let sink = Arc::new(BroadcastEventSink::new(16));
    let transport = Arc::new(RecordingTransport::new());

    let client = AnalyticStream::builder()
        .cookie_store_shared(Arc::clone(&cookies))
        .data_layer_shared(Arc::clone(&data_layer))
        .event_sink_shared(Arc::clone(&sink))
        .page(FixedPage::new(PageLocation::new(
            "shop.example.com",
            "/products/42",
            "?ref=mail",
            "#reviews",
        )))
        .transport_shared(Arc::clone(&transport))
        .build();

    // (B) script タグ読込直後に相当する設定
    let config = client.configure(
        ConfigUpdate::new()
            .url("https://collect.example.com/events")
            .session_cookie("astream_session")
            .product("shop"),
    );
    println!("configured: {config:?}");

    // (C) 全イベントの観測者（push.analyticStream の購読者に相当）
    let mut rx = sink.subscribe();
    let observer = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            println!(
                "observed {}: {} / {}",
                event.name, event.payload.event_label, event.payload.event_category
            );
        }
    });

    // (D) ページロード完了 → onload + pageview が流れる
    client.page_loaded();

    // (E) クリックハンドラを作って 1 回「クリック」する
    let mut values = EventValue::new();
    values.insert("target".into(), serde_json::json!("buy-button"));
    let on_click = client.pageevent("buy clicked", "click", values);
    assert!(on_click());

    // (F) 送信は fire-and-forget なので、全部届くまでポーリングで待つ
    loop {
        if transport.len() >= 3 {
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }

    println!();
    println!("session cookie jar: {:?}", cookies.read_all());
    println!("data layer entries: {}", data_layer.len());
    for (url, payload) in transport.sent() {
        println!(
            "sent to {url}: {}",
            serde_json::to_string(&payload).expect("payload serializes")
        );
    }

    // デモなので観測者は止める
    observer.abort();
}
