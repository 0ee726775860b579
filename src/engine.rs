use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::orp::{render_word_with_orp, split_words, OrpParts};
use crate::session::Session;
use crate::util::{calc_progress, counter_text, fraction_to_index, wpm_to_period};

pub const DEFAULT_WPM: i64 = 300;

/// Shown in place of the word once the reader runs off the end
pub const DONE_MARKER: &str = "✓ Done";

/// Externally visible playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Discrete commands a host can feed into the reader
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    Skip(i64),
    Restart,
    Seek(i64),
    SeekFraction(f64),
    SetRate(i64),
    Close,
}

/// The periodic advance tick. Only ever lives inside `Phase::Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AdvanceTimer {
    period: Option<Duration>,
    next_due: Option<Instant>,
}

impl AdvanceTimer {
    fn arm(now: Instant, period: Option<Duration>) -> Self {
        Self {
            period,
            next_due: period.map(|p| now + p),
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    fn reschedule(&mut self, now: Instant) {
        if let (Some(due), Some(period)) = (self.next_due, self.period) {
            let next = due + period;
            // too far behind: re-base instead of replaying missed ticks
            self.next_due = Some(if next <= now { now + period } else { next });
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Playing(AdvanceTimer),
    Paused,
    Finished,
}

impl Phase {
    fn state(&self) -> PlaybackState {
        match self {
            Phase::Idle => PlaybackState::Idle,
            Phase::Playing(_) => PlaybackState::Playing,
            Phase::Paused => PlaybackState::Paused,
            Phase::Finished => PlaybackState::Finished,
        }
    }
}

#[derive(Debug)]
struct Loaded {
    session: Session,
    phase: Phase,
}

/// Running totals of advance timers created and torn down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    pub armed: u64,
    pub disarmed: u64,
}

impl TimerStats {
    pub fn active(&self) -> u64 {
        self.armed - self.disarmed
    }
}

/// What the word slot should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordDisplay {
    Word(OrpParts),
    Finished,
}

/// Snapshot of everything a renderer needs, derived fresh from reader state
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderView {
    pub word: WordDisplay,
    pub index: usize,
    pub total: usize,
    pub progress: f64,
    pub state: PlaybackState,
    pub wpm: i64,
}

impl ReaderView {
    pub fn counter(&self) -> String {
        counter_text(self.index, self.total)
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}

/// RSVP playback engine.
///
/// Owns the session, cursor, playback phase and rate. All mutation goes
/// through the methods below; the advance tick is driven by calling
/// [`Reader::poll`] no later than [`Reader::next_deadline`].
#[derive(Debug)]
pub struct Reader<C: Clock = SystemClock> {
    clock: C,
    loaded: Option<Loaded>,
    wpm: i64,
    timers: TimerStats,
}

impl Reader<SystemClock> {
    pub fn new(wpm: i64) -> Self {
        Self::with_clock(SystemClock, wpm)
    }
}

impl<C: Clock> Reader<C> {
    pub fn with_clock(clock: C, wpm: i64) -> Self {
        Self {
            clock,
            loaded: None,
            wpm,
            timers: TimerStats::default(),
        }
    }

    /// Load a new word list. Returns false, leaving the reader untouched, if it is empty.
    pub fn start(&mut self, words: Vec<String>) -> bool {
        let Some(session) = Session::new(words) else {
            debug!("ignoring start with no words");
            return false;
        };

        self.close();
        info!(words = session.len(), wpm = self.wpm, "reading session started");
        self.loaded = Some(Loaded {
            session,
            phase: Phase::Idle,
        });
        true
    }

    pub fn start_text(&mut self, text: &str) -> bool {
        self.start(split_words(text))
    }

    /// Cancel any pending tick and drop the session
    pub fn close(&mut self) {
        if self.loaded.is_some() {
            self.set_phase(Phase::Idle);
            self.loaded = None;
            info!("reading session closed");
        }
    }

    pub fn toggle_play(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };

        let phase = loaded.phase;
        match phase {
            Phase::Playing(_) => self.set_phase(Phase::Paused),
            Phase::Finished => {
                loaded.session.rewind();
                self.arm_timer();
            }
            Phase::Idle | Phase::Paused => self.arm_timer(),
        }
    }

    /// Fire the advance tick if it is due. Returns true if the cursor moved or playback finished.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let Some(loaded) = self.loaded.as_mut() else {
            return false;
        };
        let Phase::Playing(timer) = &mut loaded.phase else {
            return false;
        };
        if !timer.is_due(now) {
            return false;
        }

        timer.reschedule(now);
        self.advance();
        true
    }

    /// When the next tick wants to fire, if one is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.loaded.as_ref()?.phase {
            Phase::Playing(timer) => timer.next_due,
            _ => None,
        }
    }

    fn advance(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };

        if loaded.session.is_at_end() {
            debug!(index = loaded.session.index(), "reached end of text");
            self.set_phase(Phase::Finished);
        } else {
            loaded.session.skip(1);
        }
    }

    pub fn seek(&mut self, index: i64) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.session.seek(index);
        }
    }

    pub fn skip(&mut self, delta: i64) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.session.skip(delta);
        }
    }

    pub fn seek_fraction(&mut self, fraction: f64) {
        if let Some(loaded) = self.loaded.as_mut() {
            let index = fraction_to_index(fraction, loaded.session.len());
            loaded.session.seek(index as i64);
        }
    }

    pub fn restart(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };

        loaded.session.rewind();
        if matches!(loaded.phase, Phase::Playing(_)) {
            self.arm_timer();
        }
    }

    pub fn set_rate(&mut self, wpm: i64) {
        let Some(loaded) = self.loaded.as_ref() else {
            return;
        };

        self.wpm = wpm;
        if matches!(loaded.phase, Phase::Playing(_)) {
            self.arm_timer();
        }
        debug!(wpm, "rate changed");
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePlay => self.toggle_play(),
            Command::Skip(delta) => self.skip(delta),
            Command::Restart => self.restart(),
            Command::Seek(index) => self.seek(index),
            Command::SeekFraction(fraction) => self.seek_fraction(fraction),
            Command::SetRate(wpm) => self.set_rate(wpm),
            Command::Close => self.close(),
        }
    }

    /// Tear down whatever timer is running and start a fresh one from now
    fn arm_timer(&mut self) {
        let timer = AdvanceTimer::arm(self.clock.now(), wpm_to_period(self.wpm));
        self.set_phase(Phase::Playing(timer));
        self.timers.armed += 1;
    }

    fn set_phase(&mut self, next: Phase) {
        if let Some(loaded) = self.loaded.as_mut() {
            let previous = std::mem::replace(&mut loaded.phase, next);
            if matches!(previous, Phase::Playing(_)) {
                self.timers.disarmed += 1;
            }
            if previous.state() != next.state() {
                debug!(from = %previous.state(), to = %next.state(), "playback state changed");
            }
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.loaded
            .as_ref()
            .map_or(PlaybackState::Idle, |loaded| loaded.phase.state())
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    pub fn has_session(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.loaded.as_ref().map(|loaded| &loaded.session)
    }

    pub fn index(&self) -> Option<usize> {
        self.session().map(Session::index)
    }

    pub fn wpm(&self) -> i64 {
        self.wpm
    }

    pub fn timer_stats(&self) -> TimerStats {
        self.timers
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn view(&self) -> Option<ReaderView> {
        let loaded = self.loaded.as_ref()?;
        let session = &loaded.session;
        let state = loaded.phase.state();

        let word = match state {
            PlaybackState::Finished => WordDisplay::Finished,
            _ => WordDisplay::Word(render_word_with_orp(session.current_word())),
        };

        Some(ReaderView {
            word,
            index: session.index(),
            total: session.len(),
            progress: calc_progress(session.index(), session.len()),
            state,
            wpm: self.wpm,
        })
    }
}
