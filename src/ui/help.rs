use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&["q: Quit", "?: Toggle help"]));

    lines.push(Line::from(""));
    lines.push(section_title("Table"));
    lines.extend(section_lines(&[
        "Up/Down: Move cursor",
        "Left/Right: Previous/next page",
        "1-9: Sort by the n-th column (again to reverse)",
        "r: Cycle rows per page (5/10/15)",
        "space: Select/unselect row",
        "*: Select all / clear selection",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Filter"));
    lines.extend(section_lines(&[
        "/: Search projects (Enter keep, Esc clear)",
        "a: Activity types",
        "c: Visible columns",
        "esc: Clear search",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Entries"));
    lines.extend(section_lines(&["n: New entry", "x: Delete highlighted entry"]));

    lines.push(Line::from(""));
    lines.push(section_title("Popups"));
    lines.extend(section_lines(&[
        "Activity/Columns: Up/Down move, Space toggle, Esc close",
        "New entry: Tab switch field, Up/Down choose option, Enter save, Esc cancel",
        "Confirm: y delete, n/Esc cancel",
    ]));

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
