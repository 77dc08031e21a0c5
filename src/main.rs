mod config;
mod error;
mod graphics;
mod input;
mod layout;
mod logging;
mod math;
mod state;
mod terminal;
mod timer;
mod vertex;
mod widget;

use anyhow::Context;
use clap::Parser;
use config::{Args, Settings};
use crossterm::event;
use layout::Viewport;
use std::time::{Duration, Instant};
use terminal::TerminalSession;
use tracing::info;
use widget::{IconWidget, Reaction};

/// Poll timeout when no periodic task is running
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Main function
fn main() -> anyhow::Result<()> {
    let settings = Settings::from(Args::parse());

    logging::init(settings.log_file.as_deref(), &settings.log_filter)
        .context("Failed to set up logging")?;
    info!(?settings, "starting");

    let mut session = TerminalSession::enter().context("Failed to prepare the terminal")?;
    let mut widget = IconWidget::mount(&settings, Viewport::detect(), Instant::now());

    let result = run(&mut session, &mut widget);

    widget.unmount();
    drop(session);

    result.context("Terminal event loop failed")?;
    info!("exiting");
    Ok(())
}

/// Event loop: sleep until input or the next timer deadline, react, redraw
fn run(session: &mut TerminalSession, widget: &mut IconWidget) -> error::Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            let canvas = widget.render(Instant::now());
            session.present(&canvas)?;
            dirty = false;
        }

        let now = Instant::now();
        let timeout = widget
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            let raw = event::read()?;
            let events = input::translate(&raw, &widget.layout(), widget.state());
            for event in events {
                match widget.dispatch(event, Instant::now()) {
                    Reaction::Quit => return Ok(()),
                    Reaction::Redraw => dirty = true,
                    Reaction::Ignored => {}
                }
            }
        }

        if widget.run_due_timers(Instant::now()) {
            dirty = true;
        }
    }
}
