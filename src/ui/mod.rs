mod help;
mod helpers;
mod theme;
mod timesheet;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, AppView, NewEntryField, NewEntryPopup};
use crate::types::ActivityType;
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let view = app.view;
    let (title, body_text) = match view {
        AppView::Table => (" Time Sheet ", timesheet::build_timesheet_text(app)),
        AppView::Help => (" Help ", help::build_help_text()),
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let total = app.sheet.total_duration();
    let mut header_spans = vec![
        Span::styled(
            "  Timesheet  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" Total duration: {total} hours "),
            Style::default()
                .fg(Theme::text())
                .bg(Theme::chip())
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if !total.rejected.is_empty() {
        header_spans.push(Span::raw(" "));
        header_spans.push(Span::styled(
            format!("{} entries end before they start", total.rejected.len()),
            Style::default().fg(Theme::warn()),
        ));
    }
    let header = Paragraph::new(Text::from(Line::from(header_spans)))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(header, layout[0]);

    let mut body_lines = vec![
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    body_lines.extend(body_text.lines);
    body_lines.push(Line::from(""));
    body_lines.push(Line::from(Span::styled(
        "----------------------------------------",
        Style::default().fg(Theme::dim()),
    )));
    body_lines.extend(keybinds_lines(app));
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(body, layout[1]);

    let footer = Paragraph::new(Text::from(status_line(app)))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(footer, layout[2]);

    if app.activity_popup.is_some() {
        render_activity_popup(frame, app);
    }
    if app.column_popup.is_some() {
        render_column_popup(frame, app);
    }
    if let Some(popup) = &app.new_entry_popup {
        render_new_entry_popup(frame, popup);
    }
    if let Some(popup) = &app.confirm_popup {
        render_confirm_popup(frame, popup);
    }
}

fn picker_line(label: &str, highlighted: bool, checked: bool, color: Option<Color>) -> Line<'static> {
    let marker_style = if highlighted {
        Style::default()
            .fg(Theme::selection_marker())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::dim())
    };
    let mut name_style = Style::default().fg(color.unwrap_or(Theme::text()));
    if highlighted {
        name_style = name_style.add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(if highlighted { "> " } else { "  " }, marker_style),
        Span::styled(
            if checked { "[x] " } else { "[ ] " },
            Style::default().fg(Theme::selection_marker()),
        ),
        Span::styled(label.to_string(), name_style),
    ])
}

fn render_picker(frame: &mut Frame, title: &str, heading: &str, options: Vec<Line<'static>>) {
    let height = (options.len() as u16 + 6).min(frame.area().height);
    let area = centered_rect_height(50, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            heading.to_string(),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(options);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down: move. Space: toggle. Esc: close.",
        Style::default().fg(Theme::dim()),
    )));

    let popup = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(title.to_string()),
        );
    frame.render_widget(popup, area);
}

fn render_activity_popup(frame: &mut Frame, app: &App) {
    let Some(popup) = &app.activity_popup else {
        return;
    };
    let filter = &app.sheet.view().activity_filter;
    let options = ActivityType::ALL
        .iter()
        .enumerate()
        .map(|(index, activity)| {
            picker_line(
                activity.label(),
                index == popup.index,
                filter.contains(*activity),
                Some(timesheet::activity_color_of(app, *activity)),
            )
        })
        .collect();
    render_picker(frame, " Activity ", "Activity types", options);
}

fn render_column_popup(frame: &mut Frame, app: &App) {
    let Some(popup) = &app.column_popup else {
        return;
    };
    let visible = &app.sheet.view().visible_columns;
    let options = app
        .sheet
        .columns()
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            picker_line(
                column.descriptor.name,
                index == popup.index,
                visible.contains(&column.descriptor.key),
                None,
            )
        })
        .collect();
    render_picker(frame, " Columns ", "Visible columns", options);
}

fn render_new_entry_popup(frame: &mut Frame, popup: &NewEntryPopup) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let arrow_style = Style::default()
        .fg(Theme::selection_marker())
        .add_modifier(Modifier::BOLD);
    let title_style = |active: bool| {
        if active {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        }
    };
    let field_line = |field: NewEntryField, label: &str, value: String, placeholder: &str| {
        let active = popup.field == field;
        let (value, value_style) = if value.is_empty() {
            (placeholder.to_string(), Style::default().fg(Theme::dim()))
        } else if active {
            (
                value,
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (value, Style::default().fg(Theme::text()))
        };
        Line::from(vec![
            Span::styled(if active { "> " } else { "  " }, arrow_style),
            Span::styled(format!("{label}: "), title_style(active)),
            Span::styled(value, value_style),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "New entry",
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line(NewEntryField::Start, "Start", popup.start.clone(), "HH:MM"),
        field_line(NewEntryField::End, "End", popup.end.clone(), "HH:MM"),
        field_line(
            NewEntryField::Activity,
            "Activity",
            format!("< {} >", popup.activity().label()),
            "",
        ),
        field_line(
            NewEntryField::Project,
            "Project",
            format!("< {} >", popup.project()),
            "",
        ),
        field_line(
            NewEntryField::Location,
            "Location",
            popup.location.clone(),
            "(optional)",
        ),
        Line::from(""),
    ];
    if let Some(error) = &popup.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Theme::error()).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Type to edit. Tab: switch field. Up/Down: choose option. Enter: add. Esc: cancel.",
        Style::default().fg(Theme::dim()),
    )));

    let popup_widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" New Entry "),
        );
    frame.render_widget(popup_widget, area);
}

fn render_confirm_popup(frame: &mut Frame, popup: &crate::app::ConfirmPopup) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Confirm Action",
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            popup.message.as_str(),
            Style::default().fg(Theme::text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Theme::dim())),
            Span::styled("Y", Style::default().fg(Theme::highlight()).add_modifier(Modifier::BOLD)),
            Span::styled(" to confirm or ", Style::default().fg(Theme::dim())),
            Span::styled("N", Style::default().fg(Theme::highlight()).add_modifier(Modifier::BOLD)),
            Span::styled("/", Style::default().fg(Theme::dim())),
            Span::styled("ESC", Style::default().fg(Theme::highlight()).add_modifier(Modifier::BOLD)),
            Span::styled(" to cancel", Style::default().fg(Theme::dim())),
        ]),
    ];

    let popup_widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" Confirm "),
        );
    frame.render_widget(popup_widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    horizontal_center(percent_x, popup_layout[1])
}

fn centered_rect_height(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)])
        .split(r);

    horizontal_center(percent_x, popup_layout[1])
}

fn horizontal_center(percent_x: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(r)[1]
}

fn status_line(app: &mut App) -> Line<'static> {
    match &app.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            format!(
                "● {} of {} entries match",
                app.sheet.filtered_count(),
                app.sheet.total_entries()
            ),
            Style::default().fg(Theme::dim()),
        )),
    }
}

fn keybinds_lines(app: &App) -> Vec<Line<'static>> {
    let (primary, secondary) = match app.view {
        AppView::Table => (
            "Up/Down: Row  Left/Right: Page  1-9: Sort  space: Select  r: Rows",
            "/: Search  a: Activity  c: Columns  n: New  x: Delete  ?: Help  q: Quit",
        ),
        AppView::Help => ("Press ? or ESC to close this help screen", ""),
    };
    vec![
        Line::from(Span::styled(primary, Style::default().fg(Theme::dim()))),
        Line::from(Span::styled(secondary, Style::default().fg(Theme::dim()))),
    ]
}
