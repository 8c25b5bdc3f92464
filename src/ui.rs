use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::list::{ITEM_COUNT, PLACEHOLDER};
use crate::mode::Mode;

/// Width of the sidebar holding list names
const SIDEBAR_WIDTH: u16 = 24;

/// Cut `s` to at most `width` display columns
fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(ITEM_COUNT as u16 + 2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(rows[0]);

    render_sidebar(frame, app, panes[0]);
    render_workspace(frame, app, panes[1]);
    render_status_bar(frame, app, rows[1]);
    render_command_line(frame, app, rows[2]);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let inner_width = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = view
        .lists
        .iter()
        .map(|summary| {
            let current = view.highlighted == Some(summary.id);
            let name = if current && app.mode == Mode::EditName {
                app.editor.display()
            } else {
                summary.name.clone()
            };
            Line::from(Span::styled(
                truncate_to_width(&name, inner_width),
                app.style.list_name(current),
            ))
        })
        .collect();

    let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Lists"));
    frame.render_widget(sidebar, area);
}

fn render_workspace(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let title = view.title.clone().unwrap_or_default();
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some(slots) = &view.slots else {
        let hint = Paragraph::new("No list loaded. [ / ] to open a list, n for a new one.")
            .style(app.style.message())
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let inner_width = area.width.saturating_sub(6) as usize;
    let lines: Vec<Line> = slots
        .iter()
        .enumerate()
        .map(|(slot, text)| {
            let selected = slot == view.cursor;
            let grabbed = app.mode == Mode::MoveItem && app.grabbed == Some(slot);
            let content = if selected && app.mode == Mode::EditItem {
                app.editor.display()
            } else {
                text.clone()
            };
            let number = if grabbed { format!("{}> ", slot + 1) } else { format!("{}. ", slot + 1) };
            Line::from(vec![
                Span::styled(number, app.style.slot_number()),
                Span::styled(
                    truncate_to_width(&content, inner_width),
                    app.style.slot(selected, text == PLACEHOLDER),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let undo = if view.can_undo { "undo" } else { "----" };
    let redo = if view.can_redo { "redo" } else { "----" };
    let title = view.title.clone().unwrap_or_default();

    let status = Line::from(vec![
        Span::styled(format!(" {} ", app.mode.display_name()), app.style.status_mode(app.mode)),
        Span::raw(" "),
        Span::raw(title),
        Span::raw(" ".repeat(area.width.saturating_sub(40) as usize)),
        Span::styled(undo, app.style.history(view.can_undo)),
        Span::raw("|"),
        Span::styled(redo, app.style.history(view.can_redo)),
        Span::raw(format!(" {} ", app.store_name())),
    ]);

    frame.render_widget(Paragraph::new(status).style(app.style.status_bar()), area);
}

fn render_command_line(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.mode {
        Mode::ConfirmDelete => Line::from(Span::styled(
            format!(
                "Delete \"{}\"? (y/n)",
                app.current_name().unwrap_or_default()
            ),
            app.style.prompt(),
        )),
        Mode::MoveItem => Line::from(Span::styled(
            format!(
                "Moving item {}: j/k to choose a slot, m or Enter to drop, Esc to cancel",
                app.grabbed.map_or(0, |slot| slot + 1)
            ),
            app.style.prompt(),
        )),
        _ => Line::from(Span::styled(
            app.view().message.clone().unwrap_or_default(),
            app.style.message(),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
