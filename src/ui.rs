use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::clock::Clock;
use crate::engine::{ReaderView, WordDisplay, DONE_MARKER};
use crate::orp::OrpParts;

const HORIZONTAL_MARGIN: u16 = 5;
const MAX_TRACK_WIDTH: u16 = 60;

const PIVOT_COLOR: Color = Color::Rgb(217, 70, 239);
const ACCENT_COLOR: Color = Color::Rgb(139, 92, 246);

const LEGEND: &str = "space play/pause · ←/→ skip 10 · r restart · ↑/↓ speed · esc close";

/// Screen regions of the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderLayout {
    pub top_guide: Rect,
    pub word: Rect,
    pub bottom_guide: Rect,
    pub counter: Rect,
    pub track: Rect,
    pub status: Rect,
    pub legend: Rect,
}

pub fn reader_layout(area: Rect) -> ReaderLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Fill(1),   // padding
            Constraint::Length(1), // guide above pivot
            Constraint::Length(1), // word
            Constraint::Length(1), // guide below pivot
            Constraint::Length(2), // padding
            Constraint::Length(1), // counter
            Constraint::Length(1), // progress track
            Constraint::Length(1), // play state and rate
            Constraint::Fill(1),   // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    ReaderLayout {
        top_guide: chunks[1],
        word: chunks[2],
        bottom_guide: chunks[3],
        counter: chunks[5],
        track: centered(chunks[6], MAX_TRACK_WIDTH),
        status: chunks[7],
        legend: chunks[9],
    }
}

fn centered(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Column where the pivot character is drawn; fixed for every word
pub fn pivot_column(word_area: Rect) -> u16 {
    word_area.x + word_area.width / 2
}

fn render_word(parts: &OrpParts, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let pivot_style = bold_style.fg(PIVOT_COLOR);

    let pivot_x = pivot_column(area);
    let before_width = parts.before.width() as u16;

    // clip the leading part of very long words rather than shifting the pivot
    let skip = (area.x + before_width).saturating_sub(pivot_x) as usize;
    let (before, overshoot) = clip_leading(&parts.before, skip);
    // a wide char cut in half leaves a blank column ahead of the rest
    let start_x = pivot_x.saturating_sub(before_width).max(area.x) + overshoot as u16;

    let line = Line::from(vec![
        Span::styled(before, bold_style),
        Span::styled(parts.pivot.as_str(), pivot_style),
        Span::styled(parts.after.as_str(), bold_style),
    ]);
    buf.set_line(start_x, area.y, &line, area.right().saturating_sub(start_x));
}

/// Drop enough leading chars from `text` to remove at least `columns` of display width.
///
/// Also returns how many columns past `columns` were dropped.
fn clip_leading(text: &str, columns: usize) -> (String, usize) {
    if columns == 0 {
        return (text.to_string(), 0);
    }
    let mut dropped = 0;
    let mut chars = text.chars();
    while dropped < columns {
        match chars.next() {
            Some(c) => dropped += c.width().unwrap_or(0),
            None => break,
        }
    }
    (chars.collect(), dropped.saturating_sub(columns))
}

fn render_guide(area: Rect, buf: &mut Buffer, symbol: &str) {
    let dim_style = Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::DIM);
    if !area.is_empty() {
        buf.set_string(pivot_column(area), area.y, symbol, dim_style);
    }
}

impl Widget for &ReaderView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = reader_layout(area);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        match &self.word {
            WordDisplay::Word(parts) => {
                render_guide(layout.top_guide, buf, "┬");
                render_word(parts, layout.word, buf);
                render_guide(layout.bottom_guide, buf, "┴");
            }
            WordDisplay::Finished => {
                Paragraph::new(Span::styled(
                    DONE_MARKER,
                    Style::default()
                        .fg(ACCENT_COLOR)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center)
                .render(layout.word, buf);
            }
        }

        Paragraph::new(Span::styled(format!("Word {}", self.counter()), dim_style))
            .alignment(Alignment::Center)
            .render(layout.counter, buf);

        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT_COLOR).bg(Color::Rgb(45, 27, 78)))
            .ratio((self.progress / 100.0).clamp(0.0, 1.0))
            .label("")
            .render(layout.track, buf);

        let icon = if self.is_playing() { "⏸" } else { "▶" };
        Paragraph::new(Line::from(vec![
            Span::styled(icon, Style::default().fg(PIVOT_COLOR)),
            Span::raw("  "),
            Span::styled(format!("{} WPM", self.wpm), dim_style),
        ]))
        .alignment(Alignment::Center)
        .render(layout.status, buf);

        Paragraph::new(Span::styled(LEGEND, italic_style))
            .alignment(Alignment::Center)
            .render(layout.legend, buf);
    }
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(view) = self.view() {
            view.render(area, buf);
        }
    }
}
