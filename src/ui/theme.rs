use ratatui::style::Color;

/// Fixed colour theme for the time sheet.
pub struct Theme;

impl Theme {
    /// App badge in the header
    pub fn primary() -> Color {
        Color::Magenta
    }

    /// Borders and column headers
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// Entries that end before they start
    pub fn warn() -> Color {
        Color::Yellow
    }

    /// New-entry form errors
    pub fn error() -> Color {
        Color::Red
    }

    /// Highlighted row and active form field
    pub fn highlight() -> Color {
        Color::Cyan
    }

    /// Cursor arrow and selection checkboxes
    pub fn selection_marker() -> Color {
        Color::Green
    }

    pub fn dim() -> Color {
        Color::DarkGray
    }

    pub fn text() -> Color {
        Color::White
    }

    /// Page numbers, counts and titles
    pub fn accent() -> Color {
        Color::LightBlue
    }

    /// Background of time cells and the total-duration chip
    pub fn chip() -> Color {
        Color::Rgb(40, 40, 46)
    }
}
