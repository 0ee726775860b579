use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ConfigStore;
use crate::engine::{Command, Reader, ReaderView, DEFAULT_WPM};
use crate::keymap::{action_for_key, Action};
use crate::runtime::ReaderEvent;
use crate::ui;

/// Range offered by the rate control
pub const MIN_WPM: i64 = 100;
pub const MAX_WPM: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOptions {
    /// Rate for this run only; falls back to the stored preference
    pub wpm: Option<i64>,
    pub autoplay: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            wpm: None,
            autoplay: true,
        }
    }
}

/// Terminal host around the reader: input policy, rate persistence, screen geometry
pub struct App<C: Clock = SystemClock> {
    pub reader: Reader<C>,
    store: Box<dyn ConfigStore>,
    area: Rect,
}

impl App<SystemClock> {
    pub fn new(store: Box<dyn ConfigStore>) -> Self {
        Self::with_clock(SystemClock, store)
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(clock: C, store: Box<dyn ConfigStore>) -> Self {
        Self {
            reader: Reader::with_clock(clock, DEFAULT_WPM),
            store,
            area: Rect::default(),
        }
    }

    /// Open a reading session. Returns false when the text has no words.
    pub fn start(&mut self, text: &str, options: StartOptions) -> bool {
        if !self.reader.start_text(text) {
            info!("no words to read");
            return false;
        }

        let wpm = options.wpm.unwrap_or_else(|| self.store.last_used_wpm());
        self.reader.set_rate(wpm);
        if options.autoplay {
            self.reader.toggle_play();
        }
        true
    }

    pub fn is_open(&self) -> bool {
        self.reader.has_session()
    }

    pub fn view(&self) -> Option<ReaderView> {
        self.reader.view()
    }

    /// Last known terminal area, used to hit-test pointer input
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Feed one runtime event in. Returns true if the screen should be redrawn.
    pub fn handle_event(&mut self, event: ReaderEvent) -> bool {
        match event {
            ReaderEvent::Tick => self.reader.poll(),
            ReaderEvent::Resize => true,
            ReaderEvent::Key(key) => match action_for_key(key) {
                Some(action) => {
                    self.handle_action(action);
                    true
                }
                None => false,
            },
            ReaderEvent::Mouse(mouse) => self.handle_mouse(mouse),
            ReaderEvent::Closed => {
                warn!("input stream closed, ending session");
                self.reader.close();
                false
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Command(Command::SetRate(wpm)) => self.change_rate(wpm),
            Action::Command(command) => self.reader.apply(command),
            Action::StepRate(delta) => {
                let wpm = (self.reader.wpm() + delta).clamp(MIN_WPM, MAX_WPM);
                self.change_rate(wpm);
            }
        }
    }

    /// Rate change from the user: applied now, persisted best-effort
    fn change_rate(&mut self, wpm: i64) {
        if !self.reader.has_session() || wpm == self.reader.wpm() {
            return;
        }
        self.reader.set_rate(wpm);
        self.store.set_last_used_wpm(wpm);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !matches!(
            mouse.kind,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
        ) {
            return false;
        }

        let track = ui::reader_layout(self.area).track;
        match track_fraction(track, mouse.column, mouse.row) {
            Some(fraction) => {
                debug!(fraction, "progress track seek");
                self.reader.seek_fraction(fraction);
                true
            }
            None => false,
        }
    }
}

/// Where along the track a click landed, if it hit the track at all
pub fn track_fraction(track: Rect, column: u16, row: u16) -> Option<f64> {
    let hit = track.width > 0
        && row >= track.y
        && row < track.bottom()
        && column >= track.x
        && column < track.right();
    hit.then(|| (column - track.x) as f64 / track.width as f64)
}
