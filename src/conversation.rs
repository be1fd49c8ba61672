// src/conversation.rs

use crate::chat_message::ChatMessage;

/// Append-only message history for one session.
///
/// Messages are never edited, reordered, or removed; nothing is persisted
/// across runs.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn extend(&mut self, messages: Vec<ChatMessage>) {
        self.messages.extend(messages);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently received file link, if any.
    pub fn last_link(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| m.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_insertion_order() {
        let mut conv = Conversation::new();
        conv.push(ChatMessage::user("foo"));
        conv.extend(vec![
            ChatMessage::code("def f(): pass"),
            ChatMessage::bot("Similarity Score: 0.86"),
            ChatMessage::link("http://x/y"),
        ]);
        let texts: Vec<&str> = conv.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "foo",
                "def f(): pass",
                "Similarity Score: 0.86",
                "File Link: http://x/y",
            ]
        );
    }

    #[test]
    fn last_link_finds_newest_link_message() {
        let mut conv = Conversation::new();
        assert_eq!(conv.last_link(), None);
        conv.push(ChatMessage::link("http://x/old"));
        conv.push(ChatMessage::bot("Error: not found"));
        conv.push(ChatMessage::link("http://x/new"));
        conv.push(ChatMessage::user("again"));
        assert_eq!(conv.last_link(), Some("http://x/new"));
    }
}
