//! Frame rendering
//!
//! Pure drawing from a [`Snapshot`]; no state lives here.

use super::bender;
use crate::state_machine::snapshot::Selection;
use crate::state_machine::Snapshot;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use ratatui::Frame;

const ACCENT: Color = Color::Indexed(63);
const HIGHLIGHT: Color = Color::Indexed(170);
const CONTENT_WIDTH: u16 = 64;

/// Draw one frame
pub fn draw(frame: &mut Frame, snapshot: &Snapshot) {
    let area = content_area(frame.area());
    match &snapshot.selection {
        Some(selection) => draw_selection(frame, area, selection),
        None => draw_chat(frame, area, snapshot),
    }
}

/// Left-aligned column, capped at the content width
fn content_area(area: Rect) -> Rect {
    Rect {
        width: area.width.min(CONTENT_WIDTH),
        ..area
    }
}

fn bordered(title: &str) -> Block<'_> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(title)
}

fn draw_selection(frame: &mut Frame, area: Rect, selection: &Selection) {
    let list_height = u16::try_from(selection.candidates.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let [title_area, list_area, help_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(list_height),
        Constraint::Min(1),
    ])
    .areas(area);

    let title = Paragraph::new(Line::styled(
        "Select an Agent",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, title_area);

    let lines: Vec<Line> = selection
        .lines()
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == selection.cursor {
                Line::styled(line, Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
            } else {
                Line::raw(line)
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(bordered("Agents")), list_area);

    let help = Paragraph::new("Use ↑/↓ to navigate, Enter to select, Ctrl+C to quit");
    frame.render_widget(help, help_area);
}

fn draw_chat(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let art = bender::say(&snapshot.headline);
    let art_height = u16::try_from(art.lines().count()).unwrap_or(u16::MAX).saturating_add(2);

    let [history_area, art_area, prompt_area, help_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(art_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let title = snapshot
        .agent_name
        .as_ref()
        .map_or_else(|| "Chat".to_string(), |name| format!("Chat with {name}"));
    let inner_width = history_area.width.saturating_sub(2);
    let inner_height = history_area.height.saturating_sub(2);
    let history = Paragraph::new(Text::from(
        snapshot.transcript.iter().map(|l| Line::raw(l.as_str())).collect::<Vec<_>>(),
    ))
    .wrap(Wrap { trim: false })
    .scroll((bottom_offset(&snapshot.transcript, inner_width, inner_height), 0))
    .block(bordered(&title));
    frame.render_widget(history, history_area);

    frame.render_widget(Paragraph::new(art).block(bordered("")), art_area);

    let prompt = Paragraph::new(snapshot.prompt.render())
        .wrap(Wrap { trim: false })
        .block(bordered(""));
    frame.render_widget(prompt, prompt_area);

    frame.render_widget(Paragraph::new("Press Ctrl+C to exit"), help_area);
}

/// Scroll offset that keeps the newest transcript line in view
fn bottom_offset(lines: &[String], width: u16, height: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows.saturating_sub(usize::from(height))).unwrap_or(u16::MAX)
}
