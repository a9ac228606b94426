//! Tower of Hanoi game core.
//!
//! The authoritative model of the puzzle: peg contents, the
//! move-legality rule, win detection, and progression through the
//! three fixed difficulty rounds (3, 5, and 8 disks).
//!
//! # Architecture
//!
//! - **PegStack / Board**: the disk stacks and the three-peg board,
//!   with strict ordering enforced at the mutation point
//! - **GameEngine**: atomic validate-then-commit moves and the win
//!   predicate
//! - **RoundController**: round table, phase state machine, and the
//!   derived elapsed clock
//! - **Invariants**: independently checkable board guarantees, re-run
//!   in debug builds after every successful move
//!
//! The core performs no I/O and never blocks; transports and
//! rendering live in consuming crates.
//!
//! # Example
//!
//! ```
//! use hanoi_engine::{PegId, RoundController};
//!
//! let mut game = RoundController::new();
//! game.start();
//! game.attempt_move(PegId::A, PegId::C)?;
//! assert_eq!(game.board().peg(PegId::C).disks(), &[1]);
//! # Ok::<(), hanoi_engine::RoundError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod engine;
mod error;
pub mod invariants;
mod peg;
mod round;

pub use board::Board;
pub use engine::GameEngine;
pub use error::{MoveError, RoundError};
pub use peg::{Disk, PegId, PegStack};
pub use round::{GamePhase, Round, RoundController};
