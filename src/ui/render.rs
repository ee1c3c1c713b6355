//! UI renderer for lsnav.
//!
//! One header line with the current path, the list below it. The help popup is drawn on top
//! of the same frame. Rendering is pure: it reads a [View] and the [Theme] and owns no state.

use crate::app::View;
use crate::config::Theme;
use crate::core::formatter::sanitize_to_width;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const HELP_TITLE: &str = " Help ";
const HELP_HINT: &str = "press any key";

/// Draws the header and the list.
pub fn render(frame: &mut Frame, view: &View, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(frame.area());

    frame.render_widget(Paragraph::new(header(view, theme)), chunks[0]);

    let width = chunks[1].width as usize;
    let items: Vec<ListItem> = view
        .lines
        .iter()
        .map(|line| {
            ListItem::new(sanitize_to_width(&line.text, width)).style(theme.style_for(line.style))
        })
        .collect();

    let list = List::new(items).highlight_style(theme.selection_style());
    let mut state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

/// Draws the list with the key help centered above it.
pub fn render_help(frame: &mut Frame, view: &View, theme: &Theme, text: &str) {
    render(frame, view, theme);

    let mut body: Vec<Line> = text.lines().map(Line::from).collect();
    body.push(Line::default());
    body.push(Line::styled(HELP_HINT, Style::default().add_modifier(Modifier::DIM)));

    let inner_w = text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    // borders and one column of padding each side
    let width = (inner_w.max(HELP_HINT.len()) + 4) as u16;
    let height = (body.len() + 2) as u16;
    let area = centered(frame.area(), width, height);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(HELP_TITLE)
        .borders(Borders::ALL)
        .border_style(theme.path_style())
        .padding(Padding::horizontal(1));

    frame.render_widget(Paragraph::new(body).block(block), area);
}

fn header<'a>(view: &View, theme: &Theme) -> Line<'a> {
    let mut spans = vec![Span::styled(shorten_home_path(view.path), theme.path_style())];

    let mut flags = Vec::new();
    if view.show_hidden {
        flags.push("all");
    }
    if view.long_format {
        flags.push("long");
    }
    if !flags.is_empty() {
        spans.push(Span::raw(format!(" [{}]", flags.join(","))));
    }
    if view.skipped > 0 {
        spans.push(Span::styled(
            format!(" ({} unreadable)", view.skipped),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    Line::from(spans)
}

/// A `width` x `height` rect in the middle of `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
