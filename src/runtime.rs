use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::{
    clock::TickOutcome,
    keys::KeyInput,
    matcher::KeyOutcome,
    typewriter::Typewriter,
};

/// Everything the host loop reacts to: keystrokes, terminal resizes and
/// the once-a-second clock tick.
#[derive(Clone, Debug)]
pub enum TypewriterEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

impl TypewriterEvent {
    /// Keep the terminal events the test cares about; mouse, focus and paste are dropped.
    pub fn from_terminal(event: CtEvent) -> Option<Self> {
        match event {
            CtEvent::Key(key) => Some(Self::Key(key)),
            CtEvent::Resize(_, _) => Some(Self::Resize),
            _ => None,
        }
    }
}

/// Where the host loop takes its input from. Ticks are not delivered here;
/// `Runner::step` synthesises them when a wait runs out.
pub trait TypewriterEventSource: Send + 'static {
    /// Wait at most `timeout` for the next input.
    fn recv_timeout(&self, timeout: Duration) -> Result<TypewriterEvent, RecvTimeoutError>;

    /// Wait for the next input with no deadline, used while the clock is not running.
    fn recv(&self) -> Result<TypewriterEvent, RecvError>;
}

/// Reads the terminal on a background thread and queues what it finds.
///
/// The thread exits on a read error or once the receiving side is gone.
pub struct CrosstermEventSource {
    rx: Receiver<TypewriterEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || forward_terminal_events(tx));
        Self { rx }
    }
}

fn forward_terminal_events(tx: Sender<TypewriterEvent>) {
    while let Ok(raw) = event::read() {
        let Some(ev) = TypewriterEvent::from_terminal(raw) else {
            continue;
        };
        if tx.send(ev).is_err() {
            break;
        }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TypewriterEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypewriterEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<TypewriterEvent, RecvError> {
        self.rx.recv()
    }
}

/// Replays a channel filled by the caller; headless tests queue keys and ticks into it.
pub struct TestEventSource {
    rx: Receiver<TypewriterEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TypewriterEvent>) -> Self {
        Self { rx }
    }
}

impl TypewriterEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypewriterEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<TypewriterEvent, RecvError> {
        self.rx.recv()
    }
}

/// What handling one event did to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    Key(KeyOutcome),
    Tick(TickOutcome),
    /// Resizes and keys outside the typing alphabet.
    Nothing,
}

/// Apply one event to the engine. Each event runs to completion before the
/// next is taken.
pub fn dispatch(typewriter: &mut Typewriter, event: &TypewriterEvent) -> Dispatched {
    match event {
        TypewriterEvent::Tick => Dispatched::Tick(typewriter.on_tick()),
        TypewriterEvent::Key(key) => match KeyInput::from_key_event(key) {
            Some(input) => Dispatched::Key(typewriter.handle_key(input)),
            None => Dispatched::Nothing,
        },
        TypewriterEvent::Resize => Dispatched::Nothing,
    }
}

/// Pulls one event per call, turning an expired wait into a tick.
pub struct Runner<E: TypewriterEventSource> {
    event_source: E,
}

impl<E: TypewriterEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Wait for the next event.
    ///
    /// With a tick due in `next_tick`, waits at most that long and yields `Tick`
    /// on expiry; without one, waits for input only. `None` once the source closes.
    pub fn step(&self, next_tick: Option<Duration>) -> Option<TypewriterEvent> {
        match next_tick {
            Some(timeout) => match self.event_source.recv_timeout(timeout) {
                Ok(ev) => Some(ev),
                Err(RecvTimeoutError::Timeout) => Some(TypewriterEvent::Tick),
                Err(RecvTimeoutError::Disconnected) => None,
            },
            None => self.event_source.recv().ok(),
        }
    }

    /// Take the next event for `typewriter`, using its clock's schedule, and apply it.
    pub fn drive(&self, typewriter: &mut Typewriter) -> Option<(TypewriterEvent, Dispatched)> {
        let next_tick = typewriter.clock().until_next_tick(Instant::now());
        let event = self.step(next_tick)?;
        let dispatched = dispatch(typewriter, &event);
        Some((event, dispatched))
    }
}
