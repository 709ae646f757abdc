//! In-memory browser used by the CLI and the tests

use crate::core::types::TabId;
use crate::relay::host::BrowserHost;
use crate::relay::message::Disposition;
use async_trait::async_trait;
use tokio::sync::Mutex;

const BLANK: &str = "about:blank";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimTab {
    pub id: TabId,
    pub window: u32,
    pub history: Vec<String>,
    pub cursor: usize,
    pub reloads: u32,
}

impl SimTab {
    pub fn url(&self) -> &str {
        self.history.get(self.cursor).map_or(BLANK, String::as_str)
    }

    fn visit(&mut self, url: &str) {
        self.history.truncate(self.cursor + 1);
        self.history.push(url.to_string());
        self.cursor = self.history.len() - 1;
    }
}

/// Point-in-time copy of the simulated browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserSnapshot {
    pub tabs: Vec<SimTab>,
    pub active: Option<TabId>,
    pub searches: Vec<(String, Disposition)>,
}

impl BrowserSnapshot {
    pub fn tab(&self, id: TabId) -> Option<&SimTab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn active_tab(&self) -> Option<&SimTab> {
        self.active.and_then(|id| self.tab(id))
    }
}

#[derive(Debug, Default)]
struct BrowserState {
    snapshot: BrowserSnapshot,
    next_id: u32,
    next_window: u32,
}

impl BrowserState {
    fn window_of_active(&self) -> u32 {
        self.snapshot.active_tab().map_or(0, |t| t.window)
    }

    fn open(&mut self, window: u32, url: Option<&str>) -> TabId {
        self.next_id += 1;
        let id = TabId(self.next_id);
        self.snapshot.tabs.push(SimTab {
            id,
            window,
            history: vec![url.unwrap_or(BLANK).to_string()],
            cursor: 0,
            reloads: 0,
        });
        self.snapshot.active = Some(id);
        id
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut SimTab> {
        self.snapshot.tabs.iter_mut().find(|t| t.id == id)
    }
}

/// Tabs, history and searches tracked in memory
#[derive(Debug, Default)]
pub struct SimulatedBrowser {
    state: Mutex<BrowserState>,
}

impl SimulatedBrowser {
    /// Browser with one window holding one tab per url, the first active
    pub fn with_tabs(urls: &[&str]) -> Self {
        let mut state = BrowserState::default();
        for url in urls {
            state.open(0, Some(*url));
        }
        if let Some(first) = state.snapshot.tabs.first() {
            state.snapshot.active = Some(first.id);
        }
        Self {
            state: Mutex::new(state),
        }
    }

    pub async fn snapshot(&self) -> BrowserSnapshot {
        self.state.lock().await.snapshot.clone()
    }
}

fn search_url(query: &str) -> String {
    let encoded: String = query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("+");
    format!("https://www.google.com/search?q={}", encoded)
}

#[async_trait]
impl BrowserHost for SimulatedBrowser {
    async fn current_window_tabs(&self) -> Vec<TabId> {
        let state = self.state.lock().await;
        let window = state.window_of_active();
        state
            .snapshot
            .tabs
            .iter()
            .filter(|t| t.window == window)
            .map(|t| t.id)
            .collect()
    }

    async fn active_tab(&self) -> Option<TabId> {
        self.state.lock().await.snapshot.active
    }

    async fn create_tab(&self, url: Option<&str>) -> TabId {
        let mut state = self.state.lock().await;
        let window = state.window_of_active();
        state.open(window, url)
    }

    async fn activate_tab(&self, tab: TabId) {
        let mut state = self.state.lock().await;
        if state.snapshot.tab(tab).is_some() {
            state.snapshot.active = Some(tab);
        }
    }

    async fn remove_tab(&self, tab: TabId) {
        let mut state = self.state.lock().await;
        let Some(pos) = state.snapshot.tabs.iter().position(|t| t.id == tab) else {
            return;
        };
        state.snapshot.tabs.remove(pos);

        if state.snapshot.active == Some(tab) {
            // The neighbour that slid into the closed tab's slot takes focus
            let next = state
                .snapshot
                .tabs
                .get(pos)
                .or_else(|| state.snapshot.tabs.last())
                .map(|t| t.id);
            state.snapshot.active = next;
        }
    }

    async fn reload_tab(&self, tab: TabId) {
        if let Some(t) = self.state.lock().await.tab_mut(tab) {
            t.reloads += 1;
        }
    }

    async fn go_back(&self, tab: TabId) {
        if let Some(t) = self.state.lock().await.tab_mut(tab) {
            t.cursor = t.cursor.saturating_sub(1);
        }
    }

    async fn go_forward(&self, tab: TabId) {
        if let Some(t) = self.state.lock().await.tab_mut(tab) {
            if t.cursor + 1 < t.history.len() {
                t.cursor += 1;
            }
        }
    }

    async fn search(&self, query: &str, disposition: Disposition) {
        let mut state = self.state.lock().await;
        state
            .snapshot
            .searches
            .push((query.to_string(), disposition));

        let url = search_url(query);
        match disposition {
            Disposition::CurrentTab => {
                if let Some(active) = state.snapshot.active {
                    if let Some(t) = state.tab_mut(active) {
                        t.visit(&url);
                    }
                }
            }
            Disposition::NewTab => {
                let window = state.window_of_active();
                state.open(window, Some(&url));
            }
            Disposition::NewWindow => {
                state.next_window += 1;
                let window = state.next_window;
                state.open(window, Some(&url));
            }
        }
    }
}
