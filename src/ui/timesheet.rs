use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use crate::app::App;
use crate::color::activity_color;
use crate::columns::{CellContent, ColumnKey};
use crate::pipeline::ActivityFilter;
use crate::types::ActivityType;

fn column_width(key: ColumnKey) -> usize {
    match key {
        ColumnKey::Id => 5,
        ColumnKey::StartTime | ColumnKey::EndTime => 9,
        ColumnKey::ActivityType => 17,
        ColumnKey::Project => 22,
        ColumnKey::Location => 12,
        ColumnKey::Actions => 14,
    }
}

pub fn activity_filter_label(filter: &ActivityFilter) -> String {
    match filter {
        ActivityFilter::Only(selected) if filter.is_restrictive() => selected
            .iter()
            .map(|activity| activity.label())
            .collect::<Vec<_>>()
            .join(", "),
        _ => "All".to_string(),
    }
}

fn cell_span(app: &App, content: &CellContent, width: usize, selected: bool) -> Span<'static> {
    let base = if selected {
        Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::text())
    };
    match content {
        CellContent::Text(text) => Span::styled(clamp_name(text, width), base),
        CellContent::Time(time) => Span::styled(
            clamp_name(&format!(" {time} "), width),
            base.bg(Theme::chip()),
        ),
        CellContent::Activity(activity) => {
            let color = activity_color_of(app, *activity);
            Span::styled(
                clamp_name(&format!("● {}", activity.label()), width),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        CellContent::Actions => Span::styled(
            clamp_name("x: delete", width),
            Style::default().fg(Theme::dim()),
        ),
        CellContent::Empty => Span::styled(clamp_name("-", width), Style::default().fg(Theme::dim())),
    }
}

pub fn activity_color_of(app: &App, activity: ActivityType) -> Color {
    hex_to_color(&activity_color(activity, &app.activity_colors)).unwrap_or(Color::Magenta)
}

pub fn build_timesheet_text(app: &mut App) -> Text<'static> {
    let mut lines = Vec::new();
    let view = app.sheet.view().clone();

    if app.search_active {
        lines.push(Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Theme::highlight()).add_modifier(Modifier::BOLD)),
            Span::styled(view.search_text.clone(), Style::default().fg(Theme::text())),
            Span::styled("_", Style::default().fg(Theme::highlight())),
        ]));
        lines.push(Line::from(Span::styled(
            "Type to search projects, Enter to keep, Esc to clear",
            Style::default().fg(Theme::dim()),
        )));
    } else if !view.search_text.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Filtered: ", Style::default().fg(Theme::accent())),
            Span::styled(view.search_text.clone(), Style::default().fg(Theme::text())),
            Span::styled(" (press / to edit, Esc to clear)", Style::default().fg(Theme::dim())),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Activity: ", Style::default().fg(Theme::dim())),
        Span::styled(
            activity_filter_label(&view.activity_filter),
            Style::default().fg(Theme::text()),
        ),
    ]));
    lines.push(Line::from(""));

    let headers: Vec<(ColumnKey, &'static str, bool)> = app
        .sheet
        .header_columns()
        .iter()
        .map(|column| {
            (
                column.descriptor.key,
                column.descriptor.name,
                column.descriptor.sortable,
            )
        })
        .collect();

    let mut header_spans = vec![Span::raw("      ")];
    for (index, (key, name, sortable)) in headers.iter().enumerate() {
        let arrow = if *key == view.sort.column {
            view.sort.direction.arrow()
        } else {
            ""
        };
        let label = if *sortable && index < 9 {
            format!("{}:{name}{arrow}", index + 1)
        } else {
            name.to_string()
        };
        header_spans.push(Span::styled(
            clamp_name(&label, column_width(*key)),
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ));
        header_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(header_spans));
    let rule_width: usize = headers.iter().map(|(key, _, _)| column_width(*key) + 1).sum();
    lines.push(Line::from(Span::styled(
        format!("      {}", "-".repeat(rule_width)),
        Style::default().fg(Theme::dim()),
    )));

    let page = app.sheet.page_view();
    if page.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "      No entries",
            Style::default().fg(Theme::dim()),
        )));
    }
    for (index, entry) in page.rows.iter().enumerate() {
        let highlighted = index == app.cursor;
        let checked = view.selection.contains(entry.id);
        let marker_style = if highlighted {
            Style::default().fg(Theme::selection_marker())
        } else {
            Style::default().fg(Theme::dim())
        };
        let mut spans = vec![
            Span::styled(if highlighted { "> " } else { "  " }, marker_style),
            Span::styled(
                if checked { "[x] " } else { "[ ] " },
                Style::default().fg(Theme::selection_marker()),
            ),
        ];
        let cells = app.sheet.render_row(entry);
        for ((key, _, _), cell) in headers.iter().zip(cells.iter()) {
            spans.push(cell_span(app, cell, column_width(*key), highlighted));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let selection = app.sheet.selection_summary();
    lines.push(Line::from(vec![
        Span::styled(
            format!("Total {} entries", app.sheet.total_entries()),
            Style::default().fg(Theme::dim()),
        ),
        Span::raw("   "),
        Span::styled("Rows per page: ", Style::default().fg(Theme::dim())),
        Span::styled(
            view.rows_per_page.to_string(),
            Style::default().fg(Theme::accent()),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Page {}/{}", page.page, page.page_count.max(1)),
            Style::default().fg(Theme::accent()).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(selection.to_string(), Style::default().fg(Theme::dim())),
    ]));

    Text::from(lines)
}
