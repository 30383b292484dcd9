use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::client::Classification;
use crate::utils::sanitize_for_terminal;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const STATUS_BG: Color = Color::Rgb(24, 24, 27);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Everything the UI needs for one frame
pub struct RenderState<'a> {
    pub input: &'a str,
    pub result: Option<&'a Classification>,
    pub error: Option<&'a str>,
    /// Set while a request is in flight
    pub busy_since: Option<Instant>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(frame, layout.input_area, state.input, state.busy_since.is_some());
    render_result(frame, layout.result_area, state.result, state.error);
    if let Some(started) = state.busy_since {
        render_progress(frame, layout.progress_area, started);
    }
    render_status_bar(frame, layout.status_area, state);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str, busy: bool) {
    let content = if input.is_empty() {
        Text::from(Span::styled("Paste or type a news article...", Style::default().fg(MUTED)))
    } else {
        Text::from(input)
    };

    let border = if busy { MUTED } else { ACCENT };
    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Article "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_result(
    frame: &mut Frame,
    area: Rect,
    result: Option<&Classification>,
    error: Option<&str>,
) {
    let content = if let Some(error) = error {
        Text::from(Line::from(Span::styled(
            sanitize_for_terminal(error),
            Style::default().fg(ERROR),
        )))
    } else if let Some(result) = result {
        let mut lines = vec![Line::from(Span::styled(
            sanitize_for_terminal(result.label()),
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        ))];

        if let Some(duration) = result.duration() {
            lines.push(Line::from(vec![
                Span::styled("Classified in ", Style::default().fg(MUTED)),
                Span::raw(duration),
            ]));
        }
        if !result.skipped.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("{} invalid line(s) skipped in response", result.skipped.len()),
                Style::default().fg(MUTED),
            )));
        }

        Text::from(lines)
    } else {
        Text::from(Span::styled("No classification yet", Style::default().fg(MUTED)))
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Result "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_progress(frame: &mut Frame, area: Rect, started: Instant) {
    let elapsed = started.elapsed();
    let frame_idx = (elapsed.as_millis() / 100) as usize % SPINNER_FRAMES.len();

    let line = Line::from(vec![
        Span::styled(format!(" {} ", SPINNER_FRAMES[frame_idx]), Style::default().fg(ACCENT)),
        Span::raw(format!("Classifying... {}s", elapsed.as_secs())),
        Span::styled("  (Esc: cancel)", Style::default().fg(MUTED)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), Style::default().fg(color).bg(STATUS_BG))
    } else {
        let mut parts = vec![format!("{} chars", state.input.chars().count())];

        if state.busy_since.is_some() {
            parts.push("Esc: cancel".to_string());
        } else {
            parts.push("Ctrl+S: classify".to_string());
            parts.push("Ctrl+V: paste".to_string());
            if state.result.is_some() {
                parts.push("Ctrl+Y: copy".to_string());
            }
            parts.push("Esc: clear".to_string());
        }
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(STATUS_BG))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
