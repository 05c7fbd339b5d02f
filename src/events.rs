use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    /// Start or stop stepping the simulation
    TogglePause,

    /// Replace the world with a fresh random seed on the next step
    Reseed,

    /// The terminal changed size
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}

/// Converts a crossterm event into a simulation event
pub fn handle_event(event: CtEvent) -> Option<Event> {
    match event {
        // Some platforms also report releases, only presses count
        CtEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CtEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Exit),
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => Some(Event::TogglePause),
            KeyEvent {
                code: KeyCode::Char('r' | 'R'),
                ..
            } => Some(Event::Reseed),
            _ => None,
        },
        CtEvent::Resize(cols, rows) => Some(Event::Resize { cols, rows }),
        _ => None,
    }
}
