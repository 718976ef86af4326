//! Game driver - the fixed-cadence timer around a [`GameSession`]
//!
//! The session only knows discrete steps. The driver turns elapsed wall time
//! into gravity ticks, owns the pause toggle, and gates input commands so
//! they are ignored while paused. Front-ends call [`GameDriver::advance`]
//! with the milliseconds since their last frame and [`GameDriver::apply_action`]
//! for every input command.
//!
//! ```
//! use gridfall_core::{GameConfig, GameSession, ScriptedPieces};
//! use gridfall_core::types::{GameAction, PieceKind};
//! use gridfall_driver::GameDriver;
//!
//! let session =
//!     GameSession::with_source(GameConfig::default(), ScriptedPieces::repeat(PieceKind::O))
//!         .unwrap();
//! let mut driver = GameDriver::new(session);
//! driver.apply_action(GameAction::Start);
//!
//! // 2.5 intervals elapsed: two gravity steps.
//! assert_eq!(driver.advance(2500), 2);
//! assert_eq!(driver.session().active().unwrap().row, 2);
//! ```

pub mod clock;

pub use gridfall_core as core;
pub use gridfall_types as types;

pub use clock::FrameClock;

use crate::core::{GameSession, GameSnapshot, PieceSource, Step, UniformPieces};
use crate::types::{GameAction, Phase};

/// Timer state of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not ticking: no game yet, or the game ended.
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct GameDriver<P: PieceSource = UniformPieces> {
    session: GameSession<P>,
    interval_ms: u32,
    /// Time accumulated toward the next gravity step.
    elapsed_ms: u32,
    timer: TimerState,
}

impl<P: PieceSource> GameDriver<P> {
    /// Wrap a session, ticking at the session's configured interval.
    pub fn new(session: GameSession<P>) -> Self {
        let interval_ms = session.config().tick_interval_ms.max(1);
        Self {
            session,
            interval_ms,
            elapsed_ms: 0,
            timer: TimerState::Stopped,
        }
    }

    pub fn session(&self) -> &GameSession<P> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<P> {
        &mut self.session
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn is_paused(&self) -> bool {
        self.timer == TimerState::Paused
    }

    /// Start (or restart) a game and the timer.
    ///
    /// A restart from `Paused` runs the new game unpaused.
    pub fn start_game(&mut self) {
        self.session.start_game();
        self.elapsed_ms = 0;
        self.timer = TimerState::Stopped;
        self.sync_timer();
    }

    /// Suspend gravity. Only meaningful while a game is running.
    pub fn pause(&mut self) -> bool {
        if self.timer != TimerState::Running {
            return false;
        }
        self.timer = TimerState::Paused;
        true
    }

    /// Resume gravity with a fresh interval.
    pub fn resume(&mut self) -> bool {
        if self.timer != TimerState::Paused {
            return false;
        }
        self.elapsed_ms = 0;
        self.timer = TimerState::Running;
        true
    }

    /// Pause/resume while a game runs; start a new game otherwise.
    pub fn toggle(&mut self) {
        match self.timer {
            TimerState::Running => {
                self.pause();
            }
            TimerState::Paused => {
                self.resume();
            }
            TimerState::Stopped => self.start_game(),
        }
    }

    /// Feed elapsed wall time; returns how many gravity steps ran.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.timer != TimerState::Running {
            return 0;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let mut steps = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            if self.session.tick() == Step::Ignored {
                break;
            }
            steps += 1;
            if !self.session.is_falling() {
                break;
            }
        }

        self.sync_timer();
        steps
    }

    /// Milliseconds until the next gravity step, `None` when not running.
    pub fn time_to_next_tick(&self) -> Option<u32> {
        (self.timer == TimerState::Running)
            .then(|| self.interval_ms - self.elapsed_ms.min(self.interval_ms))
    }

    /// Route an input command. Movement is ignored while paused or stopped.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                self.start_game();
                true
            }
            GameAction::Pause => {
                let before = self.timer;
                self.toggle();
                self.timer != before
            }
            _ if self.timer != TimerState::Running => false,
            _ => {
                let changed = self.session.apply_action(action);
                self.sync_timer();
                changed
            }
        }
    }

    /// Session snapshot with the driver's pause flag filled in.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
        out.paused = self.is_paused();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Stop the timer once the session leaves `Falling`.
    fn sync_timer(&mut self) {
        match self.session.phase() {
            Phase::Falling => {
                if self.timer == TimerState::Stopped {
                    self.timer = TimerState::Running;
                }
            }
            Phase::Idle | Phase::GameOver => {
                self.timer = TimerState::Stopped;
                self.elapsed_ms = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedPieces};
    use crate::types::PieceKind;

    fn driver(kind: PieceKind) -> GameDriver<ScriptedPieces> {
        let session =
            GameSession::with_source(GameConfig::default(), ScriptedPieces::repeat(kind)).unwrap();
        GameDriver::new(session)
    }

    #[test]
    fn stopped_until_started() {
        let mut d = driver(PieceKind::O);
        assert_eq!(d.timer(), TimerState::Stopped);
        assert_eq!(d.advance(5000), 0);
        assert!(!d.apply_action(GameAction::MoveLeft));
        assert_eq!(d.session().phase(), Phase::Idle);
    }

    #[test]
    fn advance_accumulates_partial_intervals() {
        let mut d = driver(PieceKind::O);
        d.start_game();
        assert_eq!(d.advance(400), 0);
        assert_eq!(d.time_to_next_tick(), Some(600));
        assert_eq!(d.advance(700), 1);
        assert_eq!(d.time_to_next_tick(), Some(900));
        assert_eq!(d.session().active().unwrap().row, 1);
    }

    #[test]
    fn pause_blocks_ticks_and_input() {
        let mut d = driver(PieceKind::O);
        d.start_game();
        assert!(d.apply_action(GameAction::Pause));
        assert!(d.is_paused());
        assert_eq!(d.advance(10_000), 0);
        assert!(!d.apply_action(GameAction::MoveLeft));
        assert_eq!(d.session().active().unwrap().col, 4);
        assert!(d.snapshot().paused);

        assert!(d.apply_action(GameAction::Pause));
        assert_eq!(d.timer(), TimerState::Running);
        assert!(d.apply_action(GameAction::MoveLeft));
        assert_eq!(d.session().active().unwrap().col, 3);
    }

    #[test]
    fn resume_keeps_board_and_score() {
        let mut d = driver(PieceKind::O);
        d.start_game();
        d.advance(3000);
        d.pause();
        d.resume();
        assert_eq!(d.session().active().unwrap().row, 3);
        assert_eq!(d.session().phase(), Phase::Falling);
    }

    #[test]
    fn restart_while_paused_runs_unpaused() {
        let mut d = driver(PieceKind::O);
        d.apply_action(GameAction::Start);
        d.advance(2000);
        assert!(d.apply_action(GameAction::Pause));
        assert!(d.apply_action(GameAction::Start));

        assert_eq!(d.timer(), TimerState::Running);
        assert!(!d.snapshot().paused);
        assert!(d.apply_action(GameAction::MoveLeft));
        assert_eq!(d.advance(5000), 5);
        let piece = d.session().active().unwrap();
        assert_eq!((piece.col, piece.row), (3, 5));
    }

    #[test]
    fn toggle_from_stopped_starts_game() {
        let mut d = driver(PieceKind::O);
        d.toggle();
        assert_eq!(d.timer(), TimerState::Running);
        assert_eq!(d.session().phase(), Phase::Falling);
    }

    #[test]
    fn timer_stops_on_game_over() {
        let mut d = driver(PieceKind::O);
        d.start_game();
        d.session_mut().board_mut().occupy(24, PieceKind::L).unwrap();
        // One step locks the O at the top and the next spawn is blocked.
        assert_eq!(d.advance(5000), 1);
        assert_eq!(d.session().phase(), Phase::GameOver);
        assert_eq!(d.timer(), TimerState::Stopped);
        assert_eq!(d.time_to_next_tick(), None);

        let event = d.session_mut().take_last_event().unwrap();
        assert!(event.game_over);
        assert_eq!(event.score, 0);
    }

    #[test]
    fn soft_drop_into_game_over_stops_timer() {
        let mut d = driver(PieceKind::O);
        d.start_game();
        d.session_mut().board_mut().occupy(24, PieceKind::L).unwrap();
        assert!(d.apply_action(GameAction::SoftDrop));
        assert_eq!(d.timer(), TimerState::Stopped);
    }
}
