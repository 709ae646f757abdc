//! Top-level intent labels

/// Recognizer intent, parsed case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Browser,
    Page,
    Ava,
    // Legacy direct intents, each bound to a single executor
    OpenWebsite,
    Scroll,
    Tags,
    Tab,
    Index,
    Refresh,
    Navigation,
    Dictation,
    Submit,
    Search,
    AvaMove,
    Modal,
}

impl Intent {
    pub const ALL: [Intent; 15] = [
        Intent::Browser,
        Intent::Page,
        Intent::Ava,
        Intent::OpenWebsite,
        Intent::Scroll,
        Intent::Tags,
        Intent::Tab,
        Intent::Index,
        Intent::Refresh,
        Intent::Navigation,
        Intent::Dictation,
        Intent::Submit,
        Intent::Search,
        Intent::AvaMove,
        Intent::Modal,
    ];

    pub fn parse(label: &str) -> Option<Self> {
        let intent = match label.trim().to_uppercase().as_str() {
            "BROWSER" => Intent::Browser,
            "PAGE" => Intent::Page,
            "AVA" => Intent::Ava,
            "OPEN_WEBSITE" => Intent::OpenWebsite,
            "SCROLL" => Intent::Scroll,
            "TAGS" => Intent::Tags,
            "TAB" | "TABS" => Intent::Tab,
            "INDEX" => Intent::Index,
            "REFRESH" => Intent::Refresh,
            "NAVIGATION" => Intent::Navigation,
            "DICTATION" => Intent::Dictation,
            "SUBMIT" => Intent::Submit,
            "SEARCH" => Intent::Search,
            "AVA_MOVE" => Intent::AvaMove,
            "MODAL" => Intent::Modal,
            _ => return None,
        };
        Some(intent)
    }

    /// Lowercase name, also used as the executor domain
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Browser => "browser",
            Intent::Page => "page",
            Intent::Ava => "ava",
            Intent::OpenWebsite => "open_website",
            Intent::Scroll => "scroll",
            Intent::Tags => "tags",
            Intent::Tab => "tab",
            Intent::Index => "index",
            Intent::Refresh => "refresh",
            Intent::Navigation => "navigation",
            Intent::Dictation => "dictation",
            Intent::Submit => "submit",
            Intent::Search => "search",
            Intent::AvaMove => "ava_move",
            Intent::Modal => "modal",
        }
    }
}
