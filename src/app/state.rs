//! Application state definitions

/// State shared between the event handlers and the reorder commit callback.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Status message for user feedback
    pub status_message: String,
    /// Bookmark highlighted by the release default action, by id
    pub selected: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            status_message: "Drag the grip to reorder".to_string(),
            selected: None,
        }
    }
}
