//! # orbit_ui
//!
//! Core widgets for a gesture-driven circular home screen: a set of
//! "app circles" arranged in a ring around a primary Home circle, with
//! a collapse/expand animation and hand-gesture hit-testing.
//!
//! The crate is pure logic — no window, no clock, no audio.  Timestamps
//! are `f64` seconds passed in by the caller, which keeps every state
//! transition deterministic and unit-testable.
//!
//! ## Pieces
//!
//! * [`geom`]    — `Point` and distance math.
//! * [`circle`]  — [`AppCircle`]: one circular control with a tagged
//!   [`Motion`] state (`Resting` or `Transitioning`) and hover growth.
//! * [`layout`]  — the ring generator: evenly spaced anchors on a circle.
//! * [`gesture`] — per-hand landmark interpretation: cursor extraction,
//!   pinch detection, and hover bookkeeping across the circle set.
//!
//! [`AppCircle`]: circle::AppCircle
//! [`Motion`]: circle::Motion

pub mod circle;
pub mod geom;
pub mod gesture;
pub mod layout;

pub use circle::{AppCircle, Motion, RenderState};
pub use geom::Point;
pub use gesture::{Hand, Pointer};
