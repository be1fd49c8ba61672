use crate::app::{App, AppState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const PLACEHOLDER: &str = "ask about your code...";

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(size);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_title(f, chat_vertical_chunks[0]);
    draw_messages(f, app, chat_vertical_chunks[1]);

    app.status_indicator.update_spinner();
    app.status_indicator.render(f, chat_vertical_chunks[2]);

    draw_input(f, app, chat_vertical_chunks[3]);
    draw_logs(f, app, horizontal_chunks[1], size);

    if app.state == AppState::QuitConfirm {
        draw_quit_confirm(f, size);
    }
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("⌕ quarry", Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD)),
        Span::styled(" - code snippet search", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.conversation.iter() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let available_height = area.height;
    let max_scroll = total_lines.saturating_sub(available_height);

    // Follow mode keeps the newest message in view; manual scrollback is
    // clamped to the content height.
    if app.follow {
        app.scroll = max_scroll;
    } else if app.scroll > max_scroll {
        app.scroll = max_scroll;
    }

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(msgs_para.scroll((app.scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    // The prompt arrow doubles as the submit control: while a request is in
    // flight it is replaced with the spinner and the whole line goes dim.
    let (prefix, prefix_style) = if app.pending {
        (
            format!("{} ", app.status_indicator.glyph()),
            Style::default().fg(Color::Yellow),
        )
    } else if app.command_index.is_some() {
        ("⌃ ".to_string(), Style::default().fg(Color::Yellow))
    } else {
        ("→ ".to_string(), Style::default().fg(Color::DarkGray))
    };

    let input_style = if app.pending {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::White)
    };

    let input_line = if app.input.is_empty() && !app.pending {
        Line::from(vec![
            Span::styled(prefix, prefix_style),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)),
        ])
    } else {
        Line::from(vec![
            Span::styled(prefix, prefix_style),
            Span::styled(app.input.as_str(), input_style),
        ])
    };

    let visible_width = area.width.saturating_sub(2);
    let text_width = app.input.len() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input_line).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        },
    );

    if app.command_index.is_some() && !app.pending {
        let history_idx = app.command_index.unwrap() + 1;
        let history_len = app.command_history.len();
        let history_text = format!(" [history {}/{}] ", history_idx, history_len);
        let indicator_width = history_text.len() as u16;
        let indicator_x = area.x + area.width - indicator_width;

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                history_text,
                Style::default().fg(Color::Yellow).bg(Color::Black),
            ))),
            Rect {
                x: indicator_x,
                y: area.y + 1,
                width: indicator_width,
                height: 1,
            },
        );
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    // No cursor while the input is disabled.
    if !app.pending {
        let cursor_x = area.x + 2 + text_width - scroll_offset;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect, size: Rect) {
    let vsep = "│".repeat(size.height.saturating_sub(2) as usize);
    f.render_widget(
        Paragraph::new(Span::raw(vsep)).style(Style::default().fg(Color::DarkGray)),
        Rect {
            x: area.x.saturating_sub(1),
            y: 1,
            width: 1,
            height: size.height.saturating_sub(2),
        },
    );

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.as_str()),
            ])
        })
        .collect();

    // The log pane always tails.
    let total = log_lines.len() as u16;
    let scroll = total.saturating_sub(area.height);

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para.scroll((scroll, 0)), area);
}

fn draw_quit_confirm(f: &mut Frame, size: Rect) {
    let width = 44.min(size.width);
    let height = 5.min(size.height);
    let area = Rect {
        x: (size.width - width) / 2,
        y: (size.height - height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirm Quit")
        .style(Style::default().fg(Color::LightYellow));
    f.render_widget(block, area);

    let text = "Quit quarry?\n\nPress 'y' to quit or 'n' to keep chatting.";
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(
        paragraph,
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        },
    );
}
