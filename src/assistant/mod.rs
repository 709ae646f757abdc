//! Assistant session - the content-side event loop
//!
//! Owns the page, presentation state, tag overlay and transcript. Final
//! segments are dispatched one at a time; interim segments only update the
//! live transcript line.

use crate::command::Segment;
use crate::core::config::AssistantConfig;
use crate::core::error::Result;
use crate::executors::{Effect, ExecutionContext};
use crate::lexicon::Lexicon;
use crate::page::Page;
use crate::relay::{ActivityPort, RelayClient};
use crate::router::IntentRouter;
use crate::tags::{should_recompute, Mutation, ScrollStopDebouncer, TagOverlay, TagScanner};
use crate::ui::{Transcript, UiState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A key press delivered to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: char,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    pub fn ctrl_alt(key: char) -> Self {
        Self {
            ctrl: true,
            alt: true,
            ..Self::new(key)
        }
    }

    /// Ctrl+Alt+Z toggles listening
    pub fn is_listen_toggle(&self) -> bool {
        self.ctrl && self.alt && self.key.eq_ignore_ascii_case(&'z')
    }
}

pub struct Assistant<P: Page> {
    page: P,
    ui: UiState,
    overlay: TagOverlay,
    transcript: Transcript,
    router: IntentRouter,
    relay: RelayClient,
    lexicon: Lexicon,
    rng: ChaCha8Rng,
    scroll_stop: ScrollStopDebouncer,
    listening: bool,
}

impl<P: Page> Assistant<P> {
    pub fn new(page: P, relay: RelayClient, config: &AssistantConfig) -> Self {
        let lexicon = Lexicon::new(config.lexicon_matching);
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            page,
            ui: UiState::new(),
            overlay: TagOverlay::new(TagScanner::new(config.badge_width, config.badge_height)),
            transcript: Transcript::new(config.max_transcript_lines),
            router: IntentRouter::new(lexicon),
            relay,
            lexicon,
            rng,
            scroll_stop: ScrollStopDebouncer::new(Duration::from_millis(
                config.scroll_stop_debounce_ms,
            )),
            listening: false,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn overlay(&self) -> &TagOverlay {
        &self.overlay
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn start_listening(&mut self) {
        if !self.listening {
            tracing::info!("Listening");
            self.listening = true;
        }
    }

    pub fn stop_listening(&mut self) {
        if self.listening {
            tracing::info!("Stopped listening");
            self.listening = false;
        }
    }

    /// Feed one recognizer segment
    ///
    /// Dispatch errors are voiced in the transcript and returned; the session
    /// stays usable either way.
    pub async fn handle_segment(&mut self, segment: Segment) -> Result<()> {
        if !self.listening {
            tracing::debug!("Ignoring segment while not listening");
            return Ok(());
        }

        let text = segment.transcript();
        if !segment.is_final {
            self.transcript.update_interim(&text);
            return Ok(());
        }

        self.transcript.commit_user(&text);
        tracing::info!("Heard {:?} ({})", text, segment.intent.intent);

        let result = self.dispatch(&segment).await;
        self.sync_overlay();

        if let Err(err) = &result {
            tracing::warn!("Dispatch failed: {}", err);
            self.transcript.say(&err.user_message());
        }
        result
    }

    async fn dispatch(&mut self, segment: &Segment) -> Result<()> {
        let effects = {
            let mut ctx = ExecutionContext {
                ui: &mut self.ui,
                page: &self.page,
                lexicon: &self.lexicon,
                rng: &mut self.rng,
            };
            self.router.route(segment, &mut ctx)?
        };

        for effect in effects {
            self.apply(effect).await?;
        }
        Ok(())
    }

    async fn apply(&mut self, effect: Effect) -> Result<()> {
        tracing::debug!("Applying {:?}", effect);
        match effect {
            Effect::Navigate(url) => self.page.navigate(&url),
            Effect::ScrollBy { left, top } => {
                self.page.scroll_by(left, top);
                self.on_scroll();
            }
            Effect::ScrollTo { top } => {
                self.page.scroll_to(top);
                self.on_scroll();
            }
            Effect::Relay(message) => self.relay.send(message).await?,
        }
        Ok(())
    }

    fn sync_overlay(&mut self) {
        let viewport = self.page.viewport();
        self.overlay
            .sync(&mut self.ui, self.page.document_mut(), viewport);
    }

    /// A scroll event from the page
    pub fn on_scroll(&mut self) {
        self.scroll_stop.on_scroll(Instant::now());
    }

    /// Scrolling has been quiet for the debounce period
    ///
    /// Tags come back only if the user had asked for them.
    pub fn on_scroll_stop(&mut self) {
        if self.ui.render_tag {
            self.ui.set_show_tag(true);
            self.sync_overlay();
        }
    }

    /// Activity port update: `false` when the user switched to another tab
    pub fn on_activity(&mut self, active: bool) {
        tracing::debug!("Tab active: {}", active);
        if !active {
            self.stop_listening();
            self.ui.hide_overlays();
            self.overlay.clear();
        }
    }

    /// Returns whether the key was consumed
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if !key.is_listen_toggle() {
            return false;
        }
        if self.listening {
            self.stop_listening();
        } else {
            self.start_listening();
        }
        true
    }

    /// A DOM mutation observed on the page
    pub fn on_mutation(&mut self, mutation: Mutation) {
        if should_recompute(self.page.document(), &mutation, self.ui.show_tag) {
            let viewport = self.page.viewport();
            self.overlay.refresh(self.page.document(), viewport);
        }
    }

    /// Consume segments until the sender is dropped
    pub async fn run(
        mut self,
        mut segments: mpsc::Receiver<Segment>,
        mut activity: Option<ActivityPort>,
    ) -> Self {
        loop {
            let deadline = self.scroll_stop.deadline();
            tokio::select! {
                segment = segments.recv() => match segment {
                    Some(segment) => {
                        // Errors are already in the transcript
                        let _ = self.handle_segment(segment).await;
                    }
                    None => break,
                },
                active = recv_activity(&mut activity) => match active {
                    Some(active) => self.on_activity(active),
                    None => activity = None,
                },
                _ = sleep_until(deadline), if deadline.is_some() => {
                    if self.scroll_stop.poll(Instant::now()) {
                        self.on_scroll_stop();
                    }
                }
            }
        }

        tracing::info!("Segment stream ended");
        self
    }
}

async fn recv_activity(port: &mut Option<ActivityPort>) -> Option<bool> {
    match port {
        Some(port) => port.recv().await,
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(deadline).await;
    }
}

/// Run the session on its own task behind a single-slot segment queue
///
/// The queue holds at most one segment, so the recognizer waits while a
/// dispatch is in flight.
pub fn spawn_assistant<P>(
    assistant: Assistant<P>,
    activity: Option<ActivityPort>,
) -> (mpsc::Sender<Segment>, JoinHandle<Assistant<P>>)
where
    P: Page + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(assistant.run(rx, activity));
    (tx, handle)
}
