//! Rendering routines for the box-office TUI.

use crate::app::{App, FormField, View};
use boxoffice_rs_core::{Draft, FormState, format_usd};
use boxoffice_rs_model::{Country, Genre, Language, PredictionRecord, Vocabulary};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState, Wrap};

const PRIMARY: Color = Color::Rgb(236, 91, 43);
const SECONDARY: Color = Color::Rgb(238, 121, 72);
const TEXT: Color = Color::Rgb(238, 238, 238);
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
const BORDER: Color = Color::Rgb(60, 60, 60);
const BORDER_ACTIVE: Color = Color::Rgb(238, 121, 72);
const YELLOW: Color = Color::Rgb(229, 192, 123);
const GREEN: Color = Color::Rgb(120, 220, 140);
const RED: Color = Color::Rgb(255, 110, 110);

const HEADER_HEIGHT: u16 = 3;
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, root[0]);
    match app.view {
        View::Dashboard => draw_dashboard(frame, app, root[1]),
        View::Form => draw_form(frame, app, root[1]),
        View::History => draw_history(frame, app, root[1]),
    }
    draw_status_bar(frame, app, root[2]);
}

fn panel(title: &str, active: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if active { BORDER_ACTIVE } else { BORDER }))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(if active { SECONDARY } else { TEXT_MUTED }),
        ))
}

/// Draw the title bar with view tabs and the endpoint.
fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let tab = |key: &'static str, label: &'static str, view: View| {
        let style = if app.view == view {
            Style::default()
                .fg(Color::Rgb(10, 10, 10))
                .bg(PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MUTED)
        };
        Span::styled(format!(" {key} {label} "), style)
    };
    let line = Line::from(vec![
        Span::styled(
            " Box Office Predictor ",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{VERSION}  "), Style::default().fg(TEXT_MUTED)),
        tab("F1", "Dashboard", View::Dashboard),
        Span::raw(" "),
        tab("F2", "New prediction", View::Form),
        Span::raw(" "),
        tab("F3", "History", View::History),
        Span::styled("  endpoint ", Style::default().fg(TEXT_MUTED)),
        Span::styled(app.endpoint.as_str(), Style::default().fg(TEXT)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_dashboard(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4), Constraint::Min(0)])
        .split(area);
    let summary = &app.summary;

    let top = [
        ("Total predictions", summary.total_predictions.to_string()),
        ("Average rating", format!("{:.1}", summary.average_rating)),
        ("Total awards", summary.total_awards.to_string()),
        (
            "Highest grossing",
            summary
                .highest_grossing
                .as_ref()
                .map(|top| top.title.clone())
                .unwrap_or_else(|| "None".to_string()),
        ),
    ];
    let bottom = [
        ("Average budget", format_usd(summary.average_budget)),
        (
            "Success rate",
            format!("{:.0}%", summary.success_rate * 100.0),
        ),
        (
            "Most common genre",
            summary
                .most_common_genre
                .map(|genre| genre.as_str().to_string())
                .unwrap_or_else(|| "None".to_string()),
        ),
    ];
    draw_cards(frame, rows[0], &top);
    draw_cards(frame, rows[1], &bottom);

    let table = records_table(&summary.recent).block(panel("Recent predictions", false));
    frame.render_widget(table, rows[2]);
}

fn draw_cards(frame: &mut Frame<'_>, area: Rect, cards: &[(&str, String)]) {
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for ((label, value), col) in cards.iter().zip(cols.iter()) {
        let text = Paragraph::new(Line::from(Span::styled(
            value.as_str(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )))
        .block(panel(label, false));
        frame.render_widget(text, *col);
    }
}

fn records_table(records: &[PredictionRecord]) -> Table<'static> {
    let header = Row::new(["Title", "Rating", "Gross", "Awards", "Predicted"])
        .style(Style::default().fg(TEXT_MUTED).add_modifier(Modifier::BOLD));
    let rows = records.iter().map(|record| {
        Row::new(vec![
            record.input.title.clone(),
            format!("{:.1}", record.predicted.rating),
            format_usd(record.predicted.gross_worldwide),
            record.predicted.awards.to_string(),
            record.predicted_at.format("%Y-%m-%d %H:%M").to_string(),
        ])
        .style(Style::default().fg(TEXT))
    });
    Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(18),
            Constraint::Length(8),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD))
}

fn draw_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let draft = app.controller.draft();
    let focused = app.focused_field();
    let submitting = app.controller.is_submitting();

    let lines: Vec<Line<'_>> = FormField::ALL
        .iter()
        .map(|field| {
            let active = *field == focused;
            let marker = if active { "▸ " } else { "  " };
            let label_style = if active {
                Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_MUTED)
            };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(PRIMARY)),
                Span::styled(format!("{:<22}", field.label()), label_style),
            ];
            spans.extend(field_value(app, draft, *field, active));
            Line::from(spans)
        })
        .collect();

    let title = if submitting { "New prediction (submitting…)" } else { "New prediction" };
    let form = Paragraph::new(lines)
        .block(panel(title, !submitting))
        .wrap(Wrap { trim: false });
    frame.render_widget(form, cols[0]);

    let mut help = vec![
        Line::from(Span::styled("Keys", Style::default().fg(SECONDARY))),
        Line::from("↑/↓ Tab      move between fields"),
        Line::from("type         edit text and numbers"),
        Line::from("←/→          pick item, slot or rating"),
        Line::from("space        toggle genre/language/country"),
        Line::from("+ / Delete   add or remove list entry"),
        Line::from("Ctrl+S       submit for prediction"),
        Line::from("Ctrl+R       reset the form"),
        Line::from("Esc          back to dashboard"),
        Line::from(""),
    ];
    match app.controller.state() {
        FormState::Failed { message } => {
            help.push(Line::from(Span::styled("Last submission failed", Style::default().fg(RED))));
            help.push(Line::from(Span::styled(message.as_str(), Style::default().fg(TEXT))));
        }
        FormState::Submitting => {
            help.push(Line::from(Span::styled("Waiting for the prediction service…", Style::default().fg(YELLOW))));
        }
        FormState::Succeeded { .. } => {
            help.push(Line::from(Span::styled("Prediction saved", Style::default().fg(GREEN))));
        }
        FormState::Editing => {}
    }
    let side = Paragraph::new(help)
        .block(panel("Help", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(side, cols[1]);
}

/// Spans describing one form row's current value.
fn field_value<'a>(app: &'a App, draft: &'a Draft, field: FormField, active: bool) -> Vec<Span<'a>> {
    let value_style = Style::default().fg(TEXT);
    let cursor_style = Style::default().fg(Color::Rgb(10, 10, 10)).bg(SECONDARY);
    let text = |value: String| {
        let mut spans = vec![Span::styled(value, value_style)];
        if active {
            spans.push(Span::styled(" ", cursor_style));
        }
        spans
    };
    match field {
        FormField::Title => text(draft.title().to_string()),
        FormField::Description => text(draft.description().to_string()),
        FormField::FilmingLocation => text(draft.filming_location().to_string()),
        FormField::Director => text(draft.director().to_string()),
        FormField::Duration => text(draft.duration().map(|v| v.to_string()).unwrap_or_default()),
        FormField::Budget => text(draft.budget().map(|v| v.to_string()).unwrap_or_default()),
        FormField::ContentRating => vec![Span::styled(
            format!("◂ {} ▸", draft.content_rating()),
            value_style,
        )],
        FormField::ReleaseDate => text(app.date_input.clone()),
        FormField::Genres => choices(Genre::ALL, draft.genres(), active.then_some(app.cursor)),
        FormField::Languages => {
            choices(Language::ALL, draft.languages(), active.then_some(app.cursor))
        }
        FormField::Countries => {
            choices(Country::ALL, draft.countries(), active.then_some(app.cursor))
        }
        FormField::Stars | FormField::Writers | FormField::ProductionCompanies => {
            let Some(list) = field.list() else {
                return Vec::new();
            };
            let slots = draft.slots(list);
            let mut spans = Vec::new();
            for (index, slot) in slots.iter().enumerate() {
                let style = if active && index == app.cursor { cursor_style } else { value_style };
                let shown = if slot.is_empty() { "_".to_string() } else { slot.clone() };
                spans.push(Span::styled(format!("[{shown}]"), style));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("{}/{}", slots.len(), list.max()),
                Style::default().fg(TEXT_MUTED),
            ));
            spans
        }
    }
}

/// Render a vocabulary as a compact checklist.
///
/// Inactive rows only list the selection; the focused row shows a window of
/// items around the cursor.
fn choices<T: Vocabulary>(all: &'static [T], selected: &[T], cursor: Option<usize>) -> Vec<Span<'static>> {
    let Some(cursor) = cursor else {
        if selected.is_empty() {
            return vec![Span::styled("none", Style::default().fg(TEXT_MUTED))];
        }
        let names: Vec<&str> = selected.iter().map(|item| item.as_str()).collect();
        return vec![Span::styled(names.join(", "), Style::default().fg(TEXT))];
    };
    const WINDOW: usize = 4;
    let start = cursor.saturating_sub(WINDOW / 2);
    let end = (start + WINDOW).min(all.len());
    let mut spans = Vec::new();
    if start > 0 {
        spans.push(Span::styled("… ", Style::default().fg(TEXT_MUTED)));
    }
    for (index, item) in all.iter().enumerate().take(end).skip(start) {
        let mark = if selected.contains(item) { "[x]" } else { "[ ]" };
        let style = if index == cursor {
            Style::default().fg(Color::Rgb(10, 10, 10)).bg(SECONDARY)
        } else {
            Style::default().fg(TEXT)
        };
        spans.push(Span::styled(format!("{mark} {}", item.as_str()), style));
        spans.push(Span::raw(" "));
    }
    if end < all.len() {
        spans.push(Span::styled("…", Style::default().fg(TEXT_MUTED)));
    }
    spans
}

fn draw_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if app.history.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No predictions yet. Press F2 to make one.",
            Style::default().fg(TEXT_MUTED),
        )))
        .block(panel("History", true));
        frame.render_widget(empty, area);
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut state = TableState::default().with_selected(Some(app.selected_record));
    let table = records_table(&app.history)
        .block(panel(&format!("History ({})", app.history.len()), true));
    frame.render_stateful_widget(table, rows[0], &mut state);

    if let Some(record) = app.history.get(app.selected_record) {
        frame.render_widget(
            Paragraph::new(record_details(record))
                .block(panel("Details", false))
                .wrap(Wrap { trim: false }),
            rows[1],
        );
    }
}

fn record_details(record: &PredictionRecord) -> Vec<Line<'static>> {
    let input = record.input();
    let predicted = record.predicted();
    let join = |items: Vec<&str>| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<22}"), Style::default().fg(TEXT_MUTED)),
            Span::styled(value, Style::default().fg(TEXT)),
        ])
    };
    vec![
        row("Title", input.title.clone()),
        row("Director", input.director.clone()),
        row(
            "Released / runtime",
            format!("{} / {} min / {}", input.release_date, input.duration, input.content_rating),
        ),
        row("Budget", format_usd(input.budget as f64)),
        row("Genres", join(input.genres.iter().map(|g| g.as_str()).collect())),
        row("Languages", join(input.languages.iter().map(|l| l.as_str()).collect())),
        row("Countries", join(input.countries.iter().map(|c| c.as_str()).collect())),
        row("Stars", join(input.stars.iter().map(String::as_str).collect())),
        row("Writers", join(input.writers.iter().map(String::as_str).collect())),
        row(
            "Companies",
            join(input.production_companies.iter().map(String::as_str).collect()),
        ),
        Line::from(""),
        row("Opening weekend", format_usd(predicted.opening_weekend_gross)),
        row("Worldwide gross", format_usd(predicted.gross_worldwide)),
        row(
            "Awards / nominations",
            format!("{} / {}", predicted.awards, predicted.nominations),
        ),
        row(
            "Rating / critics",
            format!("{:.1} / {:.0}", predicted.rating, predicted.critic_score),
        ),
    ]
}

fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let color = match app.controller.state() {
        FormState::Failed { .. } => RED,
        FormState::Submitting => YELLOW,
        _ => TEXT_MUTED,
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.status), Style::default().fg(color)),
        Span::styled(
            "  Ctrl+C quit",
            Style::default().fg(TEXT_MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
