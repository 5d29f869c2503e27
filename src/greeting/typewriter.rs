//! Character-by-character reveal of a message.

use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{Clear, ClearType},
};
use std::{
    io::{Write, stdout},
    thread,
    time::Duration,
};

/// Delay between two revealed characters.
pub const TYPE_DELAY: Duration = Duration::from_millis(40);

/// Yields every non-empty prefix of a string, one character longer each
/// time, always cut on a char boundary.
#[derive(Debug, Clone)]
pub struct Typewriter<'a> {
    text: &'a str,
    end: usize,
}

impl<'a> Typewriter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, end: 0 }
    }
}

impl<'a> Iterator for Typewriter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let ch = self.text[self.end..].chars().next()?;
        self.end += ch.len_utf8();
        Some(&self.text[..self.end])
    }
}

/// Type `text` onto the current terminal line.
pub fn play(text: &str, delay: Duration) -> std::io::Result<()> {
    let mut out = stdout();
    for frame in Typewriter::new(text) {
        execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write!(out, "{frame}")?;
        out.flush()?;
        thread::sleep(delay);
    }
    writeln!(out)
}
