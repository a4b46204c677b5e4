use super::{Key, Msg};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

/// Event source and drawing surface for the input loop.
pub trait Backend {
    /// Prepares the terminal. Called once before the first frame.
    fn start(&mut self) -> io::Result<()>;

    /// Waits up to `timeout` (forever when `None`) for the next message.
    ///
    /// Returns `Ok(None)` when nothing relevant arrived in time.
    fn poll(&mut self, timeout: Option<Duration>) -> io::Result<Option<Msg>>;

    /// Replaces the previously drawn frame with `frame`.
    fn draw(&mut self, frame: &str) -> io::Result<()>;

    /// Restores the terminal. Called once after the loop ends, on every path.
    fn stop(&mut self) -> io::Result<()>;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn start(&mut self) -> io::Result<()> {
        (**self).start()
    }

    fn poll(&mut self, timeout: Option<Duration>) -> io::Result<Option<Msg>> {
        (**self).poll(timeout)
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        (**self).draw(frame)
    }

    fn stop(&mut self) -> io::Result<()> {
        (**self).stop()
    }
}

/// Draws inline (no alternate screen) on a writer, reading keys in raw mode.
pub struct CrosstermBackend<W: Write> {
    out: W,
    raw_mode: bool,
    /// Terminal width; `None` when unknown, in which case lines are assumed not to wrap.
    columns: Option<u16>,
    /// Rows between the first row of the last frame and the cursor.
    drawn_lines: u16,
    last_frame: String,
}

impl CrosstermBackend<io::Stderr> {
    /// Draws on stderr so stdout stays free for the answer.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> CrosstermBackend<W> {
    pub fn new(out: W) -> Self {
        Self { out, raw_mode: false, columns: None, drawn_lines: 0, last_frame: String::new() }
    }

    /// Adopts a new terminal width and re-measures the frame already on screen.
    fn resize(&mut self, columns: u16) {
        self.columns = Some(columns);
        if !self.last_frame.is_empty() {
            self.drawn_lines = frame_rows(&self.last_frame, self.columns);
        }
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn start(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        self.columns = terminal::size().ok().map(|(columns, _)| columns);
        queue!(self.out, cursor::Hide)?;
        self.out.flush()
    }

    fn poll(&mut self, timeout: Option<Duration>) -> io::Result<Option<Msg>> {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(None);
            }
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Ok(Key::from_crossterm(key).map(Msg::Key))
            }
            Event::Resize(columns, rows) => {
                self.resize(columns);
                Ok(Some(Msg::Resize { columns, rows }))
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.drawn_lines > 0 {
            queue!(self.out, cursor::MoveToPreviousLine(self.drawn_lines))?;
        } else {
            queue!(self.out, cursor::MoveToColumn(0))?;
        }
        queue!(self.out, terminal::Clear(ClearType::FromCursorDown))?;

        // Raw mode does not translate '\n' into a carriage return.
        let lines: Vec<&str> = frame.split('\n').collect();
        write!(self.out, "{}", lines.join("\r\n"))?;
        self.drawn_lines = frame_rows(frame, self.columns);
        self.last_frame = frame.to_string();

        self.out.flush()
    }

    fn stop(&mut self) -> io::Result<()> {
        // Try every step even if one fails.
        let mut first_err: Option<io::Error> = None;

        if self.raw_mode {
            if let Err(err) = terminal::disable_raw_mode() {
                first_err.get_or_insert(err);
            }
            self.raw_mode = false;
        }
        if let Err(err) = queue!(self.out, cursor::Show).and_then(|_| self.out.flush()) {
            first_err.get_or_insert(err);
        }
        self.drawn_lines = 0;
        self.last_frame.clear();

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for CrosstermBackend<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Number of rows the cursor has to climb from the end of `frame` back to its first row.
fn frame_rows(frame: &str, columns: Option<u16>) -> u16 {
    let rows: usize = frame.split('\n').map(|line| line_rows(line, columns)).sum();
    u16::try_from(rows - 1).unwrap_or(u16::MAX)
}

/// Physical rows a single line occupies once the terminal wraps it.
fn line_rows(line: &str, columns: Option<u16>) -> usize {
    match columns {
        Some(columns) if columns > 0 => {
            visible_width(line).div_ceil(usize::from(columns)).max(1)
        }
        _ => 1,
    }
}

/// Display width of `line`, ignoring CSI escape sequences.
fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        width += c.width().unwrap_or(0);
    }
    width
}

impl Key {
    /// Translates a crossterm key event. Keys the input loop has no use for map to `None`.
    pub fn from_crossterm(event: KeyEvent) -> Option<Self> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        let key = match event.code {
            // AltGr arrives as Control+Alt on Windows.
            KeyCode::Char(c) if ctrl && alt && !c.is_ascii_alphabetic() => Key::Char(c),
            KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
            KeyCode::Char(c) if alt => Key::Alt(c),
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Tab => Key::Tab,
            _ => return None,
        };
        Some(key)
    }
}
