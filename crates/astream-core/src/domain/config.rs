//! Client configuration (StreamConfig / ConfigUpdate).
//!
//! Configuration is owned by a single client instance and mutated only
//! through [`StreamConfig::apply`]. There is no global singleton.

use serde::{Deserialize, Serialize};

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Analytics endpoint URL. `None` disables transmission entirely
    /// (events are still dispatched to the sink and data layer).
    pub url: Option<String>,

    /// Name of the cookie holding the visitor's session id.
    /// `None` means no session id is ever derived.
    pub session_cookie: Option<String>,

    /// Product or site name, to differentiate multiple sites sharing
    /// one tracking endpoint.
    #[serde(default)]
    pub product: String,

    /// Suppress the automatic pageview at page load.
    #[serde(default)]
    pub skip_page_view: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            session_cookie: None,
            product: String::new(),
            skip_page_view: false,
        }
    }
}

impl StreamConfig {
    /// Merge an update into this configuration.
    ///
    /// マージであって置換ではない: present かつ truthy なフィールドだけを
    /// 上書きする。空文字列や `Some(false)` は「未指定」と同じ扱いで、
    /// 既存の設定を消すことはできない。
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(url) = &update.url
            && !url.is_empty()
        {
            self.url = Some(url.clone());
        }
        if let Some(name) = &update.session_cookie
            && !name.is_empty()
        {
            self.session_cookie = Some(name.clone());
        }
        if let Some(product) = &update.product
            && !product.is_empty()
        {
            self.product = product.clone();
        }
        if update.skip_page_view == Some(true) {
            self.skip_page_view = true;
        }
    }
}

/// Partial configuration, as handed to `configure`.
///
/// All fields are optional; absent fields leave the current
/// configuration untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub url: Option<String>,
    pub session_cookie: Option<String>,
    pub product: Option<String>,
    pub skip_page_view: Option<bool>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = Some(name.into());
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn skip_page_view(mut self, skip: bool) -> Self {
        self.skip_page_view = Some(skip);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_present_fields() {
        let mut config = StreamConfig::default();
        config.apply(
            &ConfigUpdate::new()
                .url("https://collect.example.com/events")
                .session_cookie("sid")
                .product("shop"),
        );

        assert_eq!(config.url.as_deref(), Some("https://collect.example.com/events"));
        assert_eq!(config.session_cookie.as_deref(), Some("sid"));
        assert_eq!(config.product, "shop");
        assert!(!config.skip_page_view);
    }

    #[test]
    fn empty_update_leaves_config_untouched() {
        let mut config = StreamConfig::default();
        config.apply(&ConfigUpdate::new().product("X"));
        config.apply(&ConfigUpdate::new());

        // マージなので product は残る
        assert_eq!(config.product, "X");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let mut config = StreamConfig::default();
        config.apply(&ConfigUpdate::new().url("https://a.example").product("X"));
        config.apply(&ConfigUpdate::new().url("").product(""));

        assert_eq!(config.url.as_deref(), Some("https://a.example"));
        assert_eq!(config.product, "X");
    }

    #[test]
    fn skip_page_view_cannot_be_cleared() {
        let mut config = StreamConfig::default();
        config.apply(&ConfigUpdate::new().skip_page_view(true));
        config.apply(&ConfigUpdate::new().skip_page_view(false));

        assert!(config.skip_page_view);
    }

    #[test]
    fn repeated_applies_re_merge() {
        let mut config = StreamConfig::default();
        config.apply(&ConfigUpdate::new().product("first"));
        config.apply(&ConfigUpdate::new().product("second"));

        assert_eq!(config.product, "second");
    }
}
