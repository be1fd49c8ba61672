use crate::chat_message::ChatMessage;
use crate::conversation::Conversation;
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// All mutable state for one client session.
///
/// Transitions are plain methods with no I/O, so the whole submit/reply cycle
/// is testable without a terminal or a network.
pub struct App {
    pub state: AppState,
    pub conversation: Conversation,
    pub input: String,
    pub pending: bool,
    pub scroll: u16,
    pub follow: bool,
    pub command_history: Vec<String>,
    pub command_index: Option<usize>,
    pub status_indicator: StatusIndicator,
    pub logs: LogView,
    request_seq: u64,
}

impl App {
    pub fn new() -> App {
        App {
            state: AppState::Chat,
            conversation: Conversation::new(),
            input: String::new(),
            pending: false,
            scroll: 0,
            follow: true,
            command_history: Vec::new(),
            command_index: None,
            status_indicator: StatusIndicator::new(),
            logs: LogView::new(),
            request_seq: 0,
        }
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.conversation.push(ChatMessage::user(text));
        self.follow = true;
    }

    pub fn append_bot(&mut self, messages: Vec<ChatMessage>) {
        self.conversation.extend(messages);
        self.follow = true;
    }

    /// Marks a request in flight and returns its generation token. The token
    /// must be handed back to `finish_request` to commit the reply.
    pub fn begin_request(&mut self) -> u64 {
        self.request_seq = self.request_seq.wrapping_add(1);
        self.pending = true;
        self.status_indicator.set_searching(true);
        self.request_seq
    }

    /// Commits reply messages and clears the pending flag, but only for the
    /// request generation that is still current. A stale token leaves all
    /// state untouched.
    pub fn finish_request(&mut self, token: u64, messages: Vec<ChatMessage>) -> bool {
        if token != self.request_seq {
            return false;
        }
        self.append_bot(messages);
        self.pending = false;
        self.status_indicator.set_searching(false);
        true
    }

    pub fn push_history(&mut self, line: String) {
        self.command_history.push(line);
        self.command_index = None;
    }

    /// Ctrl+Up: recall older input lines into the draft.
    pub fn history_prev(&mut self) {
        if self.command_history.is_empty() {
            return;
        }
        let idx = match self.command_index {
            Some(0) => 0,
            Some(i) => i - 1,
            None => self.command_history.len() - 1,
        };
        self.command_index = Some(idx);
        self.input = self.command_history[idx].clone();
    }

    /// Ctrl+Down: walk back toward the newest line, then an empty draft.
    pub fn history_next(&mut self) {
        match self.command_index {
            Some(i) if i + 1 < self.command_history.len() => {
                self.command_index = Some(i + 1);
                self.input = self.command_history[i + 1].clone();
            }
            Some(_) => {
                self.command_index = None;
                self.input.clear();
            }
            None => {}
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
        self.follow = false;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
