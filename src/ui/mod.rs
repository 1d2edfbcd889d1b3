// src/ui/mod.rs
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::utils::formatter::{breadcrumb_label, display_name, format_details};

const HINTS: &str = "enter open  ⌫ back  u up  0-9 jump  . hidden  s sort  r refresh  q quit";

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(f.size());

    f.render_widget(Paragraph::new(breadcrumb_line(app)), chunks[0]);

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .navigator
        .entries
        .iter()
        .map(|entry| {
            let name = display_name(entry);
            let details = format_details(entry);
            let pad = width.saturating_sub(name.chars().count() + details.len() + 2);
            let style = if entry.is_dir {
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
            } else if entry.is_hidden {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(name, style),
                Span::raw(" ".repeat(pad)),
                Span::styled(details, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let title = format!(
        " {} entries, sort: {}{} ",
        app.navigator.entries.len(),
        app.navigator.options.sort_by.label(),
        if app.navigator.options.include_hidden { ", hidden shown" } else { "" }
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let footer = match &app.status {
        Some(status) => Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(HINTS).style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(footer, chunks[2]);
}

/// Numbered ancestor chain; the number is the key that jumps there.
fn breadcrumb_line(app: &App) -> Line<'static> {
    let crumbs = app.navigator.breadcrumbs();
    let last = crumbs.len().saturating_sub(1);
    let mut spans = Vec::with_capacity(crumbs.len() * 3);
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("{}:", i), Style::default().fg(Color::DarkGray)));
        let style = if i == last {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };
        spans.push(Span::styled(breadcrumb_label(crumb), style));
    }
    Line::from(spans)
}
