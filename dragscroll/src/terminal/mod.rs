use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self},
    queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::document::Document;
use crate::event::Event;
use crate::layout::Rect;
use crate::render::render_to_buffer;
use crate::text::char_width;
use crate::types::{Cursor, Rgb, TextStyle};

/// Raw-mode alternate-screen terminal with mouse capture. Restores the
/// terminal on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
    /// Pointer shape last sent to the terminal.
    pointer_shape: Cursor,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        let (width, height) = match enter(&mut stdout) {
            Ok(size) => size,
            Err(e) => {
                // No Terminal exists yet, so Drop won't undo raw mode.
                restore(&mut stdout);
                return Err(e);
            }
        };
        log::debug!("terminal ready: {width}x{height}");

        let mut previous_buffer = Buffer::new(width, height);
        previous_buffer.invalidate();

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer,
            pointer_shape: Cursor::Default,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Wait for input and translate it. `None` blocks until something arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => true,
        };

        if has_event {
            events.extend(Event::translate(&event::read()?));
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.extend(Event::translate(&event::read()?));
            }
        }

        Ok(events)
    }

    /// Lay out and paint the document, writing only the cells that changed.
    pub fn draw(&mut self, document: &mut Document) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            self.previous_buffer.invalidate();
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current_buffer.clear();
        document.update_layout(Rect::from_size(width, height));
        render_to_buffer(document.root(), document.layout(), &mut self.current_buffer);

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);

        let shape = document.cursor();
        if shape != self.pointer_shape {
            log::trace!("pointer shape {}", shape.name());
            write_pointer_shape(&mut self.stdout, shape)?;
            self.stdout.flush()?;
            self.pointer_shape = shape;
        }
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;
        let mut last_style = TextStyle::new();

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if last_fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(to_crossterm(cell.fg)))?;
                last_fg = Some(cell.fg);
            }
            if last_bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(to_crossterm(cell.bg)))?;
                last_bg = Some(cell.bg);
            }

            if cell.style != last_style {
                // Reset clears colors too; re-emit them with the next cell.
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                queue!(
                    self.stdout,
                    SetForegroundColor(to_crossterm(cell.fg)),
                    SetBackgroundColor(to_crossterm(cell.bg))
                )?;
                if cell.style.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                if cell.style.dim {
                    queue!(self.stdout, SetAttribute(Attribute::Dim))?;
                }
                if cell.style.italic {
                    queue!(self.stdout, SetAttribute(Attribute::Italic))?;
                }
                if cell.style.underline {
                    queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
                }
                last_style = cell.style;
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Ask the terminal for a pointer shape (xterm OSC 22). Terminals that
/// don't know the sequence ignore it.
pub fn write_pointer_shape(out: &mut impl Write, shape: Cursor) -> io::Result<()> {
    write!(out, "\x1b]22;{}\x1b\\", shape.name())
}

fn enter(stdout: &mut io::Stdout) -> io::Result<(u16, u16)> {
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture
    )?;
    stdout.flush()?;
    terminal::size()
}

/// Best effort: undo everything `Terminal::new` may have set up.
fn restore(stdout: &mut io::Stdout) {
    let _ = queue!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = stdout.flush();
    let _ = terminal::disable_raw_mode();
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.pointer_shape != Cursor::Default {
            let _ = write_pointer_shape(&mut self.stdout, Cursor::Default);
        }
        restore(&mut self.stdout);
    }
}
