//! View binding layer.
//!
//! Controllers never look anything up in the presentation: they are handed
//! a [`MovieView`] once and push fully-built cards, messages and form
//! contents into it. [`TerminalView`] draws all of that as plain text.

use std::io::Write;
use std::sync::Mutex;

use movietrack_core::listing::MovieCard;
use movietrack_core::movie::MovieForm;
use movietrack_core::types::MovieId;

/// Inline message areas, the only user-visible error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRegion {
    /// Under the add form.
    Add,
    /// Under the edit form.
    Edit,
    /// Under the sign-in form.
    Login,
}

impl MessageRegion {
    pub fn id(self) -> &'static str {
        match self {
            MessageRegion::Add => "msg",
            MessageRegion::Edit => "edit-msg",
            MessageRegion::Login => "login-msg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Add,
    Edit,
}

pub trait MovieView: Send + Sync {
    /// Replace the whole movie list with `cards`, in order.
    fn render_list(&self, cards: &[MovieCard]);

    fn show_message(&self, region: MessageRegion, text: &str);

    fn clear_message(&self, region: MessageRegion);

    /// Fill the edit form with the values of movie `id`.
    fn populate_edit_form(&self, id: MovieId, form: &MovieForm);

    /// Empty every add form field and uncheck watched.
    fn reset_add_form(&self);

    fn close_dialog(&self, dialog: Dialog);

    /// General status line (navigation, help, shell feedback).
    fn show_notice(&self, text: &str);
}

/// Plain-text view writing to any [`Write`] sink.
pub struct TerminalView {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalView {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    fn emit(&self, text: &str) {
        let Ok(mut out) = self.out.lock() else {
            tracing::warn!("Terminal output lock poisoned, dropping output");
            return;
        };
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

/// Render cards as text, one block per movie.
pub fn format_cards(cards: &[MovieCard]) -> String {
    if cards.is_empty() {
        return "(no movies)".to_string();
    }
    let mut text = String::new();
    for card in cards {
        let toggle = if card.watched { "unwatch" } else { "watch" };
        text.push_str(&format!(
            "#{:<4} {}  [{}]\n      Director: {}\n      toggle {} ({toggle}) | edit {} | delete {}\n",
            card.id,
            card.heading(),
            card.badge_label,
            card.director,
            card.id,
            card.id,
            card.id,
        ));
    }
    text.pop();
    text
}

impl MovieView for TerminalView {
    fn render_list(&self, cards: &[MovieCard]) {
        self.emit(&format_cards(cards));
    }

    fn show_message(&self, region: MessageRegion, text: &str) {
        self.emit(&format!("[{}] {text}", region.id()));
    }

    fn clear_message(&self, _region: MessageRegion) {}

    fn populate_edit_form(&self, id: MovieId, form: &MovieForm) {
        let watched = if form.watched.unwrap_or(false) {
            "watched"
        } else {
            "unwatched"
        };
        self.emit(&format!(
            "Editing #{id}: {} | {} | {} | {watched}\nSubmit changes with: save <title> | <director> | <year> [| watched]",
            form.title, form.director, form.release_year,
        ));
    }

    fn reset_add_form(&self) {}

    fn close_dialog(&self, _dialog: Dialog) {}

    fn show_notice(&self, text: &str) {
        self.emit(text);
    }
}
