//! Round sequencing, game phase, and the elapsed clock.

use crate::board::Board;
use crate::engine::GameEngine;
use crate::error::RoundError;
use crate::peg::PegId;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// One of the three fixed difficulty rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Round {
    /// Round 1: 3 disks.
    One,
    /// Round 2: 5 disks.
    Two,
    /// Round 3: 8 disks.
    Three,
}

impl Round {
    /// The round a new game begins on.
    pub const FIRST: Round = Round::One;

    /// The round's number, 1 through 3.
    pub fn number(self) -> u8 {
        match self {
            Round::One => 1,
            Round::Two => 2,
            Round::Three => 3,
        }
    }

    /// Disks in play for the round: fixed table `{1: 3, 2: 5, 3: 8}`.
    pub fn disk_count(self) -> u8 {
        match self {
            Round::One => 3,
            Round::Two => 5,
            Round::Three => 8,
        }
    }

    /// The following round, or `None` after round 3.
    pub fn next(self) -> Option<Round> {
        match self {
            Round::One => Some(Round::Two),
            Round::Two => Some(Round::Three),
            Round::Three => None,
        }
    }
}

impl TryFrom<u8> for Round {
    type Error = RoundError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Round::One),
            2 => Ok(Round::Two),
            3 => Ok(Round::Three),
            other => Err(RoundError::InvalidRound(other)),
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> u8 {
        round.number()
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Lifecycle phase of the active round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    /// Board is set up, clock not running. Moves are refused.
    NotStarted,
    /// Clock running, moves accepted.
    InProgress,
    /// Win condition reached; clock frozen, moves refused.
    Won,
}

/// Sequences the three rounds and owns the phase and clock lifecycle.
///
/// The controller is the enforcement point for phase rules the engine
/// deliberately does not carry: moves before `start` and after a win
/// are refused here, and `advance` only leaves a won round.
#[derive(Debug, Clone)]
pub struct RoundController {
    round: Round,
    engine: GameEngine,
    phase: GamePhase,
    started_at: Option<Instant>,
    frozen_elapsed: Option<Duration>,
    move_count: u32,
}

impl RoundController {
    /// Creates a controller reset to round 1.
    #[instrument]
    pub fn new() -> Self {
        Self::with_round(Round::FIRST)
    }

    /// Creates a controller reset to the given round.
    pub fn with_round(round: Round) -> Self {
        Self {
            round,
            engine: GameEngine::new(round.disk_count()),
            phase: GamePhase::NotStarted,
            started_at: None,
            frozen_elapsed: None,
            move_count: 0,
        }
    }

    /// Resets into `round`: fresh board, phase back to
    /// [`GamePhase::NotStarted`], clock and move counter zeroed.
    #[instrument(skip(self), fields(round = %round))]
    pub fn reset(&mut self, round: Round) {
        info!(disk_count = round.disk_count(), "Resetting round");
        self.round = round;
        self.engine.initialize(round.disk_count());
        self.phase = GamePhase::NotStarted;
        self.started_at = None;
        self.frozen_elapsed = None;
        self.move_count = 0;
    }

    /// Starts the round clock.
    ///
    /// Only transitions from [`GamePhase::NotStarted`]. Calling again
    /// while in progress is a no-op and keeps the original start
    /// instant; calling after a win is a no-op as well, since resuming
    /// play requires `reset` or `advance`.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::NotStarted => {
                info!(round = %self.round, "Starting round");
                self.phase = GamePhase::InProgress;
                self.started_at = Some(Instant::now());
            }
            GamePhase::InProgress => {
                debug!("Start requested while already in progress, keeping clock");
            }
            GamePhase::Won => {
                warn!("Start requested after win, reset or advance instead");
            }
        }
    }

    /// Attempts to move the top disk of `from` onto `to`.
    ///
    /// On success the move counter increments and, if the board now
    /// satisfies the win condition, the phase transitions to
    /// [`GamePhase::Won`] with the clock frozen at that instant.
    ///
    /// # Errors
    ///
    /// - [`RoundError::GameNotStarted`] before [`RoundController::start`].
    /// - [`RoundError::RoundOver`] once the round is won.
    /// - [`RoundError::Move`] for rejections from the engine; the
    ///   board, clock, and counter are untouched.
    #[instrument(skip(self), fields(round = %self.round, %from, %to))]
    pub fn attempt_move(&mut self, from: PegId, to: PegId) -> Result<(), RoundError> {
        match self.phase {
            GamePhase::NotStarted => {
                warn!("Move attempted before start");
                return Err(RoundError::GameNotStarted);
            }
            GamePhase::Won => {
                warn!("Move attempted after win");
                return Err(RoundError::RoundOver);
            }
            GamePhase::InProgress => {}
        }

        self.engine.move_disk(from, to)?;
        self.move_count += 1;

        if self.engine.is_won() {
            self.frozen_elapsed = Some(self.running_elapsed());
            self.phase = GamePhase::Won;
            info!(
                round = %self.round,
                moves = self.move_count,
                elapsed_seconds = self.elapsed().as_secs(),
                "Round won"
            );
        }

        Ok(())
    }

    /// Advances into the next round after a win.
    ///
    /// # Errors
    ///
    /// - [`RoundError::RoundNotWon`] unless the phase is
    ///   [`GamePhase::Won`].
    /// - [`RoundError::InvalidRound`] from round 3, which has no
    ///   successor.
    #[instrument(skip(self), fields(round = %self.round))]
    pub fn advance(&mut self) -> Result<Round, RoundError> {
        if self.phase != GamePhase::Won {
            warn!("Advance requested before win");
            return Err(RoundError::RoundNotWon);
        }

        let next = self
            .round
            .next()
            .ok_or(RoundError::InvalidRound(self.round.number() + 1))?;
        self.reset(next);
        Ok(next)
    }

    /// Elapsed play time, derived rather than accumulated.
    ///
    /// Zero while not started, `now - start` while in progress, and
    /// frozen at the win instant once won. Recomputing from the start
    /// instant on every read means missed render ticks cannot drift
    /// the clock.
    pub fn elapsed(&self) -> Duration {
        match self.phase {
            GamePhase::NotStarted => Duration::ZERO,
            GamePhase::InProgress => self.running_elapsed(),
            GamePhase::Won => self.frozen_elapsed.unwrap_or_default(),
        }
    }

    fn running_elapsed(&self) -> Duration {
        self.started_at
            .map(|started| started.elapsed())
            .unwrap_or_default()
    }

    /// The active round.
    pub fn round(&self) -> Round {
        self.round
    }

    /// The current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The board, for rendering.
    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    /// Successful moves since the last reset.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Minimum legal moves for the active round.
    pub fn minimum_moves(&self) -> u64 {
        GameEngine::minimum_moves(self.round.disk_count())
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_table() {
        assert_eq!(Round::One.disk_count(), 3);
        assert_eq!(Round::Two.disk_count(), 5);
        assert_eq!(Round::Three.disk_count(), 8);
    }

    #[test]
    fn test_round_from_number() {
        assert_eq!(Round::try_from(2).unwrap(), Round::Two);
        assert_eq!(Round::try_from(0).unwrap_err(), RoundError::InvalidRound(0));
        assert_eq!(Round::try_from(4).unwrap_err(), RoundError::InvalidRound(4));
    }

    #[test]
    fn test_move_before_start_refused() {
        let mut game = RoundController::new();
        let result = game.attempt_move(PegId::A, PegId::C);
        assert_eq!(result.unwrap_err(), RoundError::GameNotStarted);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut game = RoundController::new();
        game.start();
        let first_start = game.started_at;
        assert_eq!(game.phase(), GamePhase::InProgress);

        game.start();
        assert_eq!(game.started_at, first_start);
        assert_eq!(game.phase(), GamePhase::InProgress);
    }

    #[test]
    fn test_win_freezes_clock_and_blocks_moves() {
        let mut game = RoundController::new();
        game.reset(Round::One);
        game.start();

        for (from, to) in canonical_three_disk_solution() {
            game.attempt_move(from, to).unwrap();
        }

        assert_eq!(game.phase(), GamePhase::Won);
        assert_eq!(game.move_count(), 7);
        assert_eq!(game.board().peg(PegId::C).disks(), &[3, 2, 1]);

        let frozen = game.elapsed();
        let result = game.attempt_move(PegId::C, PegId::A);
        assert_eq!(result.unwrap_err(), RoundError::RoundOver);
        assert_eq!(game.move_count(), 7);
        assert_eq!(game.elapsed(), frozen);
    }

    #[test]
    fn test_engine_error_propagates_without_counting() {
        let mut game = RoundController::new();
        game.start();
        game.attempt_move(PegId::A, PegId::B).unwrap();

        let result = game.attempt_move(PegId::A, PegId::B);
        assert!(matches!(result, Err(RoundError::Move(_))));
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_advance_requires_win() {
        let mut game = RoundController::new();
        assert_eq!(game.advance().unwrap_err(), RoundError::RoundNotWon);

        game.start();
        assert_eq!(game.advance().unwrap_err(), RoundError::RoundNotWon);
    }

    #[test]
    fn test_advance_moves_to_next_round_reset() {
        let mut game = RoundController::new();
        game.start();
        for (from, to) in canonical_three_disk_solution() {
            game.attempt_move(from, to).unwrap();
        }

        let next = game.advance().unwrap();
        assert_eq!(next, Round::Two);
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.board().peg(PegId::A).disks(), &[5, 4, 3, 2, 1]);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_no_round_after_three() {
        let mut game = RoundController::with_round(Round::Three);
        game.start();
        solve(&mut game, 8, PegId::A, PegId::C, PegId::B);
        assert_eq!(game.phase(), GamePhase::Won);

        assert_eq!(game.advance().unwrap_err(), RoundError::InvalidRound(4));
    }

    #[test]
    fn test_start_after_win_keeps_phase() {
        let mut game = RoundController::new();
        game.start();
        for (from, to) in canonical_three_disk_solution() {
            game.attempt_move(from, to).unwrap();
        }

        game.start();
        assert_eq!(game.phase(), GamePhase::Won);
    }

    fn canonical_three_disk_solution() -> Vec<(PegId, PegId)> {
        vec![
            (PegId::A, PegId::C),
            (PegId::A, PegId::B),
            (PegId::C, PegId::B),
            (PegId::A, PegId::C),
            (PegId::B, PegId::A),
            (PegId::B, PegId::C),
            (PegId::A, PegId::C),
        ]
    }

    fn solve(game: &mut RoundController, n: u8, from: PegId, to: PegId, via: PegId) {
        if n == 0 {
            return;
        }
        solve(game, n - 1, from, via, to);
        game.attempt_move(from, to).unwrap();
        solve(game, n - 1, via, to, from);
    }
}
