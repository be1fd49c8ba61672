use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// What a message contains, beyond plain text.
///
/// A link message keeps its target as a structured field; the display text
/// (`File Link: <url>`) is never re-parsed to recover the url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Plain,
    Code,
    Link { url: String },
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub kind: MessageKind,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            kind: MessageKind::Plain,
            timestamp: Local::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            kind: MessageKind::Plain,
            timestamp: Local::now(),
        }
    }

    pub fn code(snippet: impl Into<String>) -> Self {
        Self {
            text: snippet.into(),
            sender: Sender::Bot,
            kind: MessageKind::Code,
            timestamp: Local::now(),
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            text: format!("File Link: {}", url),
            sender: Sender::Bot,
            kind: MessageKind::Link { url },
            timestamp: Local::now(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Link { url } => Some(url.as_str()),
            _ => None,
        }
    }

    /// Renders the message as a bubble for the given area. User messages are
    /// right-aligned, bot messages left-aligned.
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();
        let width = area.width as usize;

        self.render_header(&mut lines, width, style);
        match self.kind {
            MessageKind::Code => self.render_code(&mut lines, width, style),
            _ => self.render_text(&mut lines, width, style),
        }
        self.render_footer(&mut lines, width, style);

        lines
    }

    fn base_style(&self) -> Style {
        match self.sender {
            Sender::User => Style::default().fg(Color::Rgb(255, 223, 128)),
            Sender::Bot => Style::default().fg(Color::Rgb(144, 238, 144)),
        }
    }

    fn label(&self) -> Option<&'static str> {
        match self.kind {
            MessageKind::Code => Some("Code Snippet"),
            MessageKind::Link { .. } => Some("File Link"),
            MessageKind::Plain => None,
        }
    }

    // "<indent>┌─ 12:03 Label" with the indent pushing user bubbles right.
    fn render_header(&self, lines: &mut Vec<Line<'static>>, width: usize, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let mut spans = vec![
            Span::styled("┌─ ".to_string(), style),
            Span::styled(timestamp.clone(), style.add_modifier(Modifier::DIM)),
        ];
        let mut used = 3 + timestamp.width();
        if let Some(label) = self.label() {
            spans.push(Span::styled(" ".to_string(), style));
            spans.push(Span::styled(
                label.to_string(),
                style.add_modifier(Modifier::BOLD),
            ));
            used += 1 + label.width();
        }
        spans.insert(0, Span::raw(self.indent(width, used)));
        lines.push(Line::from(spans));
    }

    fn render_text(&self, lines: &mut Vec<Line<'static>>, width: usize, style: Style) {
        let wrap_width = width.saturating_sub(6).max(8);
        let body_style = match self.kind {
            MessageKind::Link { .. } => style.add_modifier(Modifier::UNDERLINED),
            _ => style,
        };
        for wrapped in wrap(&self.text, wrap_width) {
            let used = 2 + wrapped.width();
            lines.push(Line::from(vec![
                Span::raw(self.indent(width, used)),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped.to_string(), body_style),
            ]));
        }
    }

    // Code keeps its own line breaks and indentation; no re-wrapping.
    fn render_code(&self, lines: &mut Vec<Line<'static>>, width: usize, style: Style) {
        let code_style = Style::default()
            .fg(Color::Rgb(209, 154, 102))
            .add_modifier(Modifier::BOLD);
        for code_line in self.text.lines() {
            let used = 4 + code_line.width();
            lines.push(Line::from(vec![
                Span::raw(self.indent(width, used)),
                Span::styled("│ ".to_string(), style),
                Span::styled("▎ ".to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled(code_line.to_string(), code_style),
            ]));
        }
        if self.text.is_empty() {
            lines.push(Line::from(vec![
                Span::raw(self.indent(width, 4)),
                Span::styled("│ ".to_string(), style),
                Span::styled("▎ ".to_string(), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, width: usize, style: Style) {
        lines.push(Line::from(vec![
            Span::raw(self.indent(width, 2)),
            Span::styled("╰─".to_string(), style),
        ]));
    }

    fn indent(&self, width: usize, used: usize) -> String {
        match self.sender {
            Sender::User => " ".repeat(width.saturating_sub(used)),
            Sender::Bot => String::new(),
        }
    }
}
