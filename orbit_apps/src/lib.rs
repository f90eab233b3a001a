//! # orbit_apps
//!
//! The logic behind the kiosk's standalone demo applications, kept free of
//! any window or audio device so it stays unit-testable:
//!
//! * [`category`] — a pre-expanded ring of labeled category circles
//!   (the cooking picker).
//! * [`text_view`] — scroll-offset model for the full-screen text reader.
//! * [`tuner`]    — guitar-tuner pitch logic: string table, pitch
//!   detection from raw samples, and the in-tune verdict bands.
//!
//! The `orbit_kiosk` binary wraps each model in a `MiniApp` that draws it
//! and feeds it input.

pub mod category;
pub mod text_view;
pub mod tuner;
