use anyhow::Context;
use crossterm::{cursor, execute, terminal};
use std::io::{Stdout, Write, stdout};

/// Raw-mode + alternate-screen guard. Construct before any drawing; Drop
/// restores the terminal even when the run loop errors out.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn new() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        // From here on Drop undoes raw mode if a later setup step fails.
        let guard = Self { _private: () };

        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )
        .context("prepare alternate screen")?;

        Ok(guard)
    }

    pub fn stdout() -> Stdout {
        stdout()
    }

    pub fn size() -> anyhow::Result<(u16, u16)> {
        terminal::size().context("query terminal size")
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let mut out = stdout();
        // Renderers may have left synchronized updates, autowrap-off or
        // colors active; clear them before leaving the alternate screen.
        let _ = out.write_all(b"\x1b[?2026l\x1b[?7h\x1b[0m");
        let _ = out.flush();
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
    }
}
