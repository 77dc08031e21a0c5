use crate::error::Result;
use crate::graphics::Canvas;
use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufWriter, Stdout, Write};
use tracing::warn;

/// Owns the terminal while the widget runs.
///
/// Raw mode, the alternate screen, mouse capture and focus reporting are
/// switched on in `enter` and switched off again on drop, error paths included.
pub struct TerminalSession {
    out: BufWriter<Stdout>,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = BufWriter::new(io::stdout());
        if let Err(err) = execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        ) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        Ok(TerminalSession { out })
    }

    /// Writes a full frame
    pub fn present(&mut self, canvas: &Canvas) -> Result<()> {
        queue!(self.out, terminal::BeginSynchronizedUpdate)?;
        for y in 0..canvas.height() {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;
            for (color, text) in canvas.row_runs(y) {
                match color {
                    Some(color) => queue!(self.out, SetForegroundColor(color), Print(text))?,
                    None => queue!(self.out, ResetColor, Print(text))?,
                }
            }
        }
        queue!(self.out, ResetColor, terminal::EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            ResetColor,
            cursor::Show,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "failed to restore terminal");
            eprintln!("Warning: Failed to restore terminal: {}", err);
        }
    }
}
