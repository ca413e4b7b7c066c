use std::io;

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    Resize,
}

/// Blocking reader over terminal events. Every key press is handled to
/// completion before the next one is read, so there is no tick thread.
#[derive(Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn next(&self) -> io::Result<Event> {
        loop {
            match event::read()? {
                event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key))
                }
                event::Event::Resize(_, _) => return Ok(Event::Resize),
                _ => {}
            }
        }
    }
}
