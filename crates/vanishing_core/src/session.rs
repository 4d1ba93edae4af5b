//! Turn controller for one game session.
//!
//! [`GameSession`] owns the board, both ledgers, the timers and the
//! scheduler. Hosts interact with it through three commands:
//!
//! - [`GameSession::submit_move`] when a person selects a cell,
//! - [`GameSession::advance`] whenever [`GameSession::next_deadline`] passes,
//! - [`GameSession::reset`] to start over with the same configuration.
//!
//! `submit_move` and `reset` first run every task due at or before their
//! `now`, so a late [`GameSession::advance`] never loses a clock tick.
//!
//! After each command the host reads [`GameSession::snapshot`] and drains
//! [`GameSession::drain_events`] for sound cues and notifications.

use super::action::{Move, MoveError, MoveRequest};
use super::config::GameConfig;
use super::contracts::{Contract, MoveContract};
use super::events::SessionEvent;
use super::ledger::{Ledgers, MoveLedger};
use super::phases::{Outcome, Status, Termination};
use super::policy::{self, RandomSource};
use super::rules::evaluate_win;
use super::scheduler::{Scheduler, Task, TaskId};
use super::timer::{GameClock, TickOutcome, Timers, TICK};
use super::types::{Board, Glyph, Occupant, PlayerId};
use super::Position;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Delay before the computer plays.
pub const COMPUTER_MOVE_DELAY: Duration = Duration::from_millis(800);

/// How long a "bonus earned" flag stays raised.
pub const BONUS_FLAG_TTL: Duration = Duration::from_millis(1500);

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// The placement.
    pub played: Move,
    /// Seconds of quick-move bonus credited (zero if none).
    pub bonus_seconds: u32,
    /// Session status after the move.
    pub status: Status,
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Board contents.
    pub board: Board,
    /// Player to move (the last mover once terminal).
    pub mover: PlayerId,
    /// Glyph displayed as the mover's next piece.
    pub next_glyph: Glyph,
    /// Controller status.
    pub status: Status,
    /// Winner once terminal.
    pub outcome: Option<Outcome>,
    /// Completed line, for a board win.
    pub winning_line: Option<[Position; 3]>,
    /// The game ended on time.
    pub time_is_up: bool,
    /// Game clock.
    pub clock: GameClock,
    /// Seconds left to earn the quick-move bonus, when the window is open.
    pub quick_move_remaining: Option<u32>,
    /// "Bonus earned" flags for player 1 and player 2.
    pub bonus_flags: [bool; 2],
    /// Live pieces per player, oldest first.
    pub ledgers: Ledgers,
}

/// A game in progress, from configuration to win, timeout or reset.
#[derive(Debug, Clone)]
pub struct GameSession<R> {
    config: GameConfig,
    rng: R,
    board: Board,
    ledgers: Ledgers,
    mover: PlayerId,
    next_glyph: Glyph,
    status: Status,
    timers: Timers,
    scheduler: Scheduler,
    bonus_flags: [bool; 2],
    bonus_flag_tasks: [Option<TaskId>; 2],
    events: Vec<SessionEvent>,
}

impl<R> GameSession<R> {
    /// The configuration this session was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A player's ledger.
    pub fn ledger(&self, player: PlayerId) -> &MoveLedger {
        self.ledgers.get(player)
    }

    /// Player to move.
    pub fn mover(&self) -> PlayerId {
        self.mover
    }

    /// Glyph displayed as the mover's next piece.
    pub fn next_glyph(&self) -> Glyph {
        self.next_glyph
    }

    /// Controller status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Game clock and quick-move window.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Pending deferred work.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// True while `player`'s "bonus earned" flag is raised.
    pub fn bonus_flag(&self, player: PlayerId) -> bool {
        self.bonus_flags[player.index()]
    }

    /// When the host should next call [`GameSession::advance`].
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Removes and returns the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let termination = self.status.termination();
        SessionSnapshot {
            board: self.board.clone(),
            mover: self.mover,
            next_glyph: self.next_glyph,
            status: self.status,
            outcome: self.status.outcome(),
            winning_line: termination
                .and_then(Termination::winning_line)
                .map(|line| line.cells),
            time_is_up: matches!(termination, Some(Termination::TimeExpired { .. })),
            clock: *self.timers.clock(),
            quick_move_remaining: self
                .timers
                .quick()
                .started_at()
                .map(|_| self.timers.quick().remaining()),
            bonus_flags: self.bonus_flags,
            ledgers: self.ledgers.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut_for_tests(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Starts a session at time `now`.
    ///
    /// Player 1 moves first. A timed game starts its clock immediately.
    #[instrument(skip(config, rng), fields(vs_computer = *config.vs_computer()))]
    pub fn new(config: GameConfig, rng: R, now: Duration) -> Self {
        let timers = Timers::from_config(&config);
        let mut session = Self {
            config,
            rng,
            board: Board::new(),
            ledgers: Ledgers::default(),
            mover: PlayerId::One,
            next_glyph: "",
            status: Status::AwaitingMove(PlayerId::One),
            timers,
            scheduler: Scheduler::new(),
            bonus_flags: [false; 2],
            bonus_flag_tasks: [None; 2],
            events: Vec::new(),
        };
        session.begin(now);
        info!(clock = ?session.timers.clock(), "Session started");
        session
    }

    /// Handles a cell selected by a person.
    ///
    /// Tasks due at or before `now` run first, so a move that arrives after
    /// the mover's clock ran out is rejected with [`MoveError::GameOver`].
    /// Invalid moves are rejected with no change to the session; the error
    /// only says why.
    #[instrument(skip(self), fields(mover = %self.mover))]
    pub fn submit_move(&mut self, index: usize, now: Duration) -> Result<MoveReport, MoveError> {
        self.advance(now);
        let position = Position::from_index(index).ok_or_else(|| {
            debug!(index, "Rejected off-board move");
            MoveError::OutOfBounds(index)
        })?;
        self.resolve(MoveRequest::from_host(position), now)
    }

    /// Runs every scheduled task due at or before `now`.
    ///
    /// Tasks run in deadline order, each at its own deadline. Returns how
    /// many ran.
    #[instrument(skip(self))]
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut ran = 0;
        while let Some((due, task)) = self.scheduler.pop_due(now) {
            self.run_task(due, task);
            ran += 1;
        }
        ran
    }

    /// Starts over with the same configuration.
    ///
    /// Every pending task is dropped first, so no tick or computer move
    /// scheduled for the old game can touch the new one.
    #[instrument(skip(self))]
    pub fn reset(&mut self, now: Duration) {
        self.advance(now);
        self.begin(now);
        info!("Session reset");
        self.events.push(SessionEvent::SessionReset);
    }

    fn begin(&mut self, now: Duration) {
        self.scheduler.cancel_all();
        self.board = Board::new();
        self.ledgers.clear();
        self.mover = PlayerId::One;
        self.status = Status::AwaitingMove(PlayerId::One);
        self.timers = Timers::from_config(&self.config);
        self.bonus_flags = [false; 2];
        self.bonus_flag_tasks = [None; 2];
        self.next_glyph = self.draw_glyph(PlayerId::One);
        self.start_turn(now);
    }

    fn resolve(&mut self, request: MoveRequest, now: Duration) -> Result<MoveReport, MoveError> {
        if let Err(err) = MoveContract::pre(self, &request) {
            debug!(%err, ?request, "Move rejected");
            return Err(err);
        }

        let mover = self.mover;
        let position = request.position;
        let glyph = self.draw_glyph(mover);
        let evicted = self.ledgers.get_mut(mover).record(position)?;
        if let Some(oldest) = evicted {
            self.board.clear(oldest);
        }
        self.board.place(position, Occupant::new(glyph, mover))?;

        let played = Move {
            player: mover,
            position,
            glyph,
            evicted,
        };
        info!(%played, "Move accepted");
        self.events.push(SessionEvent::MoveAccepted(played));

        let bonus_seconds = self.apply_quick_bonus(mover, now);

        match evaluate_win(&self.board) {
            Some(line) => {
                info!(winner = %line.owner, cells = ?line.cells, "Line completed");
                self.finish(Termination::Won(line));
                self.events.push(SessionEvent::GameWon(line));
            }
            None => self.pass_turn(now),
        }

        debug_assert!(
            <MoveContract as Contract<_, MoveRequest>>::post(self).is_ok(),
            "session invariants violated after {played}"
        );

        Ok(MoveReport {
            played,
            bonus_seconds,
            status: self.status,
        })
    }

    fn apply_quick_bonus(&mut self, mover: PlayerId, now: Duration) -> u32 {
        if !self.timers.quick_bonus_earned(now) {
            return 0;
        }
        let seconds = self.timers.credit_bonus(mover);
        if seconds > 0 {
            self.bonus_flags[mover.index()] = true;
            if let Some(earlier) = self.bonus_flag_tasks[mover.index()].take() {
                self.scheduler.cancel(earlier);
            }
            let expiry = self
                .scheduler
                .schedule(now + BONUS_FLAG_TTL, Task::ClearBonusFlag(mover));
            self.bonus_flag_tasks[mover.index()] = Some(expiry);
            self.events.push(SessionEvent::BonusCredited {
                player: mover,
                seconds,
            });
        }
        seconds
    }

    fn pass_turn(&mut self, now: Duration) {
        self.mover = self.mover.other();
        self.status = Status::AwaitingMove(self.mover);
        self.next_glyph = self.draw_glyph(self.mover);
        self.start_turn(now);
        self.events.push(SessionEvent::TurnStarted {
            player: self.mover,
            glyph: self.next_glyph,
        });

        if self.config.is_computer(self.mover) {
            debug!("Computer to move");
            self.scheduler
                .schedule(now + COMPUTER_MOVE_DELAY, Task::ComputerMove);
        }
    }

    /// Re-arms the clock and the quick-move window for the mover's turn.
    fn start_turn(&mut self, now: Duration) {
        self.scheduler
            .cancel_where(|task| matches!(task, Task::ClockTick | Task::TurnTick));
        self.timers.start_turn(now);
        if self.timers.is_running() {
            self.scheduler.schedule(now + TICK, Task::ClockTick);
        }
        if self.timers.quick_window_active() {
            self.scheduler.schedule(now + TICK, Task::TurnTick);
        }
    }

    fn finish(&mut self, termination: Termination) {
        self.status = Status::Terminal(termination);
        self.timers.stop();
        // Bonus flags still expire after the game ends.
        self.scheduler
            .cancel_where(|task| !matches!(task, Task::ClearBonusFlag(_)));
        info!(outcome = %termination.outcome(), "Game over");
    }

    fn run_task(&mut self, due: Duration, task: Task) {
        debug!(?task, ?due, "Running task");
        match task {
            Task::ClockTick => self.on_clock_tick(due),
            Task::TurnTick => self.on_turn_tick(due),
            Task::ComputerMove => self.on_computer_move(due),
            Task::ClearBonusFlag(player) => {
                self.bonus_flags[player.index()] = false;
                self.bonus_flag_tasks[player.index()] = None;
            }
        }
    }

    fn on_clock_tick(&mut self, due: Duration) {
        if self.status.is_terminal() {
            debug!("Ignoring clock tick after game end");
            return;
        }
        match self.timers.tick(self.mover) {
            TickOutcome::Idle => {}
            TickOutcome::Counted { .. } => {
                self.scheduler.schedule(due + TICK, Task::ClockTick);
            }
            TickOutcome::Expired { loser } => {
                self.finish(Termination::TimeExpired { loser });
                self.events.push(SessionEvent::TimeExpired { loser });
            }
        }
    }

    fn on_turn_tick(&mut self, due: Duration) {
        if self.status.is_terminal() {
            return;
        }
        let remaining = self.timers.refresh_turn(due);
        if remaining > 0 && self.timers.quick_window_active() {
            self.scheduler.schedule(due + TICK, Task::TurnTick);
        }
    }

    fn on_computer_move(&mut self, due: Duration) {
        if self.status.is_terminal() || !self.config.is_computer(self.mover) {
            debug!("Ignoring stale computer move");
            return;
        }
        let Some(position) =
            policy::choose_move(&self.board, self.ledgers.get(self.mover), &mut self.rng)
        else {
            debug!("Computer has no legal move");
            return;
        };
        if let Err(err) = self.resolve(MoveRequest::from_computer(position), due) {
            warn!(%err, %position, "Computer move rejected");
        }
    }

    fn draw_glyph(&mut self, player: PlayerId) -> Glyph {
        let glyphs = self.config.player(player).glyphs();
        glyphs[self.rng.pick_index(glyphs.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::tests::ScriptedPicks;
    use crate::test_support::{humans, session};
    use crate::{GlyphCategory, TimerMode};

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_alternates_turns() {
        let mut game = session(humans());
        assert_eq!(game.mover(), PlayerId::One);
        game.submit_move(4, secs(0)).unwrap();
        assert_eq!(game.mover(), PlayerId::Two);
        game.submit_move(0, secs(0)).unwrap();
        assert_eq!(game.mover(), PlayerId::One);
    }

    #[test]
    fn test_rejections_change_nothing() {
        let mut game = session(humans());
        game.submit_move(4, secs(0)).unwrap();
        let before = game.snapshot();

        assert_eq!(game.submit_move(4, secs(1)), Err(MoveError::CellOccupied(Position::Center)));
        assert_eq!(game.submit_move(9, secs(1)), Err(MoveError::OutOfBounds(9)));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_placed_glyph_comes_from_movers_category() {
        let mut game = session(humans());
        let report = game.submit_move(4, secs(0)).unwrap();
        assert!(GlyphCategory::Animals.glyphs().contains(&report.played.glyph));
        assert!(GlyphCategory::Food.glyphs().contains(&game.next_glyph()));
    }

    #[test]
    fn test_glyph_drawn_at_resolution() {
        // Picks: initial display glyph, placed glyph, player 2's display glyph.
        let rng = ScriptedPicks::new(vec![0, 5, 2]);
        let mut game = GameSession::new(humans(), rng, Duration::ZERO);
        assert_eq!(game.next_glyph(), GlyphCategory::Animals.glyphs()[0]);

        let report = game.submit_move(4, secs(0)).unwrap();
        assert_eq!(report.played.glyph, GlyphCategory::Animals.glyphs()[5]);
        assert_eq!(game.next_glyph(), GlyphCategory::Food.glyphs()[2]);
    }

    #[test]
    fn test_win_stops_clock_and_tasks() {
        let mut game = session(humans().with_duration(Some(60)));
        for index in [0, 3, 1, 4] {
            game.submit_move(index, secs(0)).unwrap();
        }
        let report = game.submit_move(2, secs(0)).unwrap();
        assert!(report.status.is_terminal());
        assert!(!game.timers().is_running());
        assert!(!game.scheduler().is_pending(Task::ClockTick));
        assert_eq!(game.submit_move(8, secs(0)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_computer_replies_after_delay() {
        let mut game = session(humans().against_computer());
        game.submit_move(4, secs(0)).unwrap();
        assert_eq!(game.next_deadline(), Some(COMPUTER_MOVE_DELAY));

        assert_eq!(game.advance(Duration::from_millis(799)), 0);
        assert_eq!(game.mover(), PlayerId::Two);
        assert_eq!(game.advance(COMPUTER_MOVE_DELAY), 1);
        assert_eq!(game.mover(), PlayerId::One);
        assert_eq!(game.ledger(PlayerId::Two).len(), 1);
    }

    #[test]
    fn test_bonus_flag_clears_after_ttl() {
        let mut game = session(humans().with_duration(Some(60)));
        let report = game.submit_move(4, secs(2)).unwrap();
        assert_eq!(report.bonus_seconds, 5);
        assert!(game.bonus_flag(PlayerId::One));

        game.advance(secs(2) + BONUS_FLAG_TTL);
        assert!(!game.bonus_flag(PlayerId::One));
    }

    #[test]
    fn test_turn_tick_counts_down_display() {
        let mut game = session(
            humans()
                .with_duration(Some(60))
                .with_timer_mode(TimerMode::PerPlayer),
        );
        game.advance(secs(4));
        assert_eq!(game.snapshot().quick_move_remaining, Some(6));
        game.advance(secs(30));
        assert_eq!(game.snapshot().quick_move_remaining, Some(0));
        assert!(!game.scheduler().is_pending(Task::TurnTick));
    }

    #[test]
    fn test_late_move_runs_overdue_ticks_first() {
        let mut game = session(humans().with_duration(Some(5)).with_quick_bonus(false));
        assert_eq!(game.submit_move(4, secs(20)), Err(MoveError::GameOver));

        assert_eq!(game.timers().clock().shared(), Some(0));
        assert_eq!(game.status().outcome(), Some(Outcome::Winner(PlayerId::Two)));
        assert!(game.board().is_empty(Position::Center));
    }

    #[test]
    fn test_move_before_expiry_is_charged_elapsed_ticks() {
        let mut game = session(humans().with_duration(Some(30)).with_quick_bonus(false));
        game.submit_move(4, secs(7)).unwrap();
        assert_eq!(game.timers().clock().shared(), Some(23));
        assert_eq!(game.mover(), PlayerId::Two);
    }

    #[test]
    fn test_second_bonus_extends_flag() {
        let mut game = session(humans().with_duration(Some(60)));
        game.submit_move(4, Duration::ZERO).unwrap();
        game.submit_move(0, Duration::from_millis(500)).unwrap();
        game.submit_move(8, secs(1)).unwrap();

        game.advance(secs(2));
        assert!(game.bonus_flag(PlayerId::One));
        game.advance(secs(1) + BONUS_FLAG_TTL);
        assert!(!game.bonus_flag(PlayerId::One));
        assert!(!game.scheduler().is_pending(Task::ClearBonusFlag(PlayerId::One)));
    }
}
