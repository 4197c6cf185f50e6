use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use crate::app::{App, AppEvent};

/// Polls for crossterm events and maps them to `AppEvent`s.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        return match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(Some(AppEvent::KeyPress(key.code)))
            }
            Event::Resize(..) => Ok(Some(AppEvent::Tick)),
            _ => Ok(None),
        };
    }
    Ok(Some(AppEvent::Tick))
}

/// Runs the main event loop until the user quits.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    info!("event loop started");

    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        if let Some(event) = poll(tick_rate)? {
            app.update(event);
        }
    }
    info!("event loop finished");
    Ok(())
}
