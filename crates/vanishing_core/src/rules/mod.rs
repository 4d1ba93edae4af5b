//! Board rules.
//!
//! Pure functions over a [`Board`](super::Board). They are separate from board
//! storage so the session, the computer policy and the invariants can share
//! them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{evaluate_win, WinLine, LINES};
