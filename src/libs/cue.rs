//! Audible cue played when an interval completes.

use super::timer::Phase;
use anyhow::Result;
use std::io::{self, Write};

pub trait Cue: Send {
    fn play(&mut self, finished: Phase) -> Result<()>;
}

/// Rings the terminal bell: once after focus, twice after a break.
pub struct TerminalBell<W: Write + Send> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> Cue for TerminalBell<W> {
    fn play(&mut self, finished: Phase) -> Result<()> {
        let rings = match finished {
            Phase::Focus => "\x07",
            Phase::Break => "\x07\x07",
        };
        self.out.write_all(rings.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

pub struct Silent;

impl Cue for Silent {
    fn play(&mut self, _finished: Phase) -> Result<()> {
        Ok(())
    }
}

/// The cue matching the `sound` setting.
pub fn from_setting(sound: bool) -> Box<dyn Cue> {
    if sound {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_once_for_focus_and_twice_for_break() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(Phase::Focus).unwrap();
        bell.play(Phase::Break).unwrap();
        assert_eq!(bell.out, b"\x07\x07\x07");
    }
}
