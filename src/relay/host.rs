//! Privileged browser operations the background relay can perform

use crate::core::types::TabId;
use crate::relay::message::Disposition;
use async_trait::async_trait;

/// Extension host APIs available only to the background context
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// Tabs of the current window, in strip order
    async fn current_window_tabs(&self) -> Vec<TabId>;

    async fn active_tab(&self) -> Option<TabId>;

    /// Open a tab (blank when `url` is `None`) and make it active
    async fn create_tab(&self, url: Option<&str>) -> TabId;

    async fn activate_tab(&self, tab: TabId);

    async fn remove_tab(&self, tab: TabId);

    async fn reload_tab(&self, tab: TabId);

    async fn go_back(&self, tab: TabId);

    async fn go_forward(&self, tab: TabId);

    async fn search(&self, query: &str, disposition: Disposition);
}

#[async_trait]
impl<H: BrowserHost + ?Sized> BrowserHost for std::sync::Arc<H> {
    async fn current_window_tabs(&self) -> Vec<TabId> {
        (**self).current_window_tabs().await
    }

    async fn active_tab(&self) -> Option<TabId> {
        (**self).active_tab().await
    }

    async fn create_tab(&self, url: Option<&str>) -> TabId {
        (**self).create_tab(url).await
    }

    async fn activate_tab(&self, tab: TabId) {
        (**self).activate_tab(tab).await
    }

    async fn remove_tab(&self, tab: TabId) {
        (**self).remove_tab(tab).await
    }

    async fn reload_tab(&self, tab: TabId) {
        (**self).reload_tab(tab).await
    }

    async fn go_back(&self, tab: TabId) {
        (**self).go_back(tab).await
    }

    async fn go_forward(&self, tab: TabId) {
        (**self).go_forward(tab).await
    }

    async fn search(&self, query: &str, disposition: Disposition) {
        (**self).search(query, disposition).await
    }
}
