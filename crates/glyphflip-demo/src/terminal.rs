#![forbid(unsafe_code)]

//! Terminal session and the real-time event loop.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use crossterm::{cursor, execute, queue, style, terminal};
use glyphflip::Clock;
use rand::Rng;

use crate::app::App;

/// RAII guard for terminal state.
///
/// Enables raw mode, the alternate screen and mouse capture on creation and
/// undoes all of it on drop, including on early return.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
}

impl TerminalSession {
    /// Take over the terminal.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
        };
        let mut stdout = io::stdout();

        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        session.alternate_screen_enabled = true;

        execute!(stdout, event::EnableMouseCapture, event::EnableFocusChange)?;
        session.mouse_enabled = true;
        tracing::info!("mouse capture enabled");

        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableFocusChange, event::DisableMouseCapture);
            self.mouse_enabled = false;
        }
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen_enabled {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
        tracing::info!("terminal restored");
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        best_effort_cleanup();
        previous(info);
    }));
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, event::DisableFocusChange, event::DisableMouseCapture);
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn draw<C: Clock, R: Rng>(out: &mut impl Write, app: &App<C, R>, cols: u16) -> io::Result<()> {
    let layout = app.layout();
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    let hint = "hover a letter · q to quit";
    let hint_x = cols.saturating_sub(hint.chars().count() as u16) / 2;
    queue!(
        out,
        cursor::MoveTo(hint_x, layout.row.saturating_add(2)),
        style::Print(hint),
        cursor::MoveTo(layout.origin_x, layout.row),
        style::Print(app.render_line()),
    )?;
    out.flush()
}

/// Drive `app` until the user quits or `exit_after_ms` elapses.
pub fn run<C: Clock, R: Rng>(
    session: &TerminalSession,
    app: &mut App<C, R>,
    exit_after_ms: u64,
) -> io::Result<()> {
    let started = Instant::now();
    let mut stdout = io::stdout();
    let (mut cols, rows) = session.size()?;
    app.resize(cols, rows);

    loop {
        if exit_after_ms > 0 && started.elapsed().as_millis() >= u128::from(exit_after_ms) {
            tracing::debug!(exit_after_ms, "auto-exit");
            return Ok(());
        }

        if app.take_dirty() {
            draw(&mut stdout, app, cols)?;
        }

        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => return Ok(()),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                        app.on_pointer(mouse.column, mouse.row);
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    cols = width;
                    app.on_pointer_gone();
                    app.resize(width, height);
                }
                Event::FocusLost => app.on_pointer_gone(),
                _ => {}
            }
        }

        app.run_due();
    }
}
