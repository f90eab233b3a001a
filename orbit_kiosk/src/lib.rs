//! # orbit_kiosk
//!
//! A touch-free kiosk home screen.  App circles sit in a ring around a
//! primary Home circle; an index-fingertip cursor hovers them and a
//! thumb–index pinch "clicks".  A voice-assistant listener can request the
//! same actions through a shared command cell.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Target | Action |
//! |---|---|---|
//! | Hover | Any circle | Circle swells while the cursor stays inside |
//! | Pinch | Home circle | Toggle the ring collapsed/expanded (debounced) |
//! | Pinch | Ring circle | Launch the app at that circle's index |
//!
//! ## Voice commands (typed on stdin in simulation mode)
//!
//! | Utterance | Action |
//! |---|---|
//! | "open home" / "close home" | Toggle the ring |
//! | "run app N" / "launch application N" | Launch app N |
//! | "run the cooking app" | Launch the category picker (app 5) |
//!
//! ## Demo applications
//!
//! | Index | App |
//! |---|---|
//! | 3 | Scrolling text viewer |
//! | 5 | Cooking category picker |
//! | 7 | Guitar tuner |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the window's mouse pointer stands in
//!   for the index fingertip; holding the left button is a pinch.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via
//!   LeapC and maps fingertip positions into screen space.
//!
//! Press `Q` to quit; `Esc` leaves a running demo app.

pub mod apps;
pub mod audio;
pub mod controller;
pub mod landmarks;
pub mod registry;
pub mod visualizer;
pub mod voice;
