//! CookieStore port - cookie ストアの抽象化
//!
//! `document.cookie` と同じ形で扱う: 読みは `"k=v; k2=v2"` の生文字列、
//! 書きは 1 cookie 分の name/value。値のエンコードとパースは
//! `domain::session` が行うので、アダプタは素通しでよい。

use std::collections::BTreeMap;
use std::sync::Mutex;

/// CookieStore は cookie の読み書きを提供
///
/// ケーパビリティが無い環境（cookie API が使えないホスト）では
/// クライアントに注入しないこと。その場合セッション解決はスキップされる。
pub trait CookieStore: Send + Sync {
    /// `document.cookie` 相当の生文字列。cookie が 1 つも無ければ `None`。
    fn read_all(&self) -> Option<String>;

    /// 1 つの cookie を書き込む。`value` はエンコード済み。
    fn write(&self, name: &str, value: &str);
}

/// 開発・テスト用のインメモリ cookie ストア
///
/// BTreeMap なので `read_all` の並びは名前順で決定的。
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: Mutex<BTreeMap<String, String>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: cookie を直接仕込む
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.lock().unwrap().insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.cookies.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.lock().unwrap().is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn read_all(&self) -> Option<String> {
        let cookies = self.cookies.lock().unwrap();
        if cookies.is_empty() {
            return None;
        }
        let joined = cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }

    fn write(&self, name: &str, value: &str) {
        self.cookies
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_reads_as_none() {
        let store = MemoryCookieStore::new();
        assert_eq!(store.read_all(), None);
    }

    #[test]
    fn read_all_joins_pairs_like_document_cookie() {
        let store = MemoryCookieStore::new();
        store.write("sid", "abc");
        store.write("theme", "dark");

        assert_eq!(store.read_all().as_deref(), Some("sid=abc; theme=dark"));
    }

    #[test]
    fn write_overwrites_same_name() {
        let store = MemoryCookieStore::new();
        store.write("sid", "old");
        store.write("sid", "new");

        assert_eq!(store.len(), 1);
        assert_eq!(store.read_all().as_deref(), Some("sid=new"));
    }
}
