//! The sub-application registry.
//!
//! Apps are addressed by the integer index of the circle that launches
//! them.  The registry is populated once at startup; a lookup miss is a
//! typed, recoverable result (reject cue, loop resumes), never a panic.

use std::collections::HashMap;

use thiserror::Error;

use crate::landmarks::LandmarkSource;
use crate::visualizer::Visualizer;

/// Scrolling text viewer.
pub const TEXT_VIEWER_APP: usize = 3;
/// Cooking category picker.
pub const COOKING_APP: usize = 5;
/// Guitar tuner.
pub const TUNER_APP: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no application registered at index {0}")]
    NotFound(usize),
}

/// A launchable sub-application.
///
/// `run` is a blocking, synchronous hand-off: the app owns the render
/// surface and the landmark source exclusively until it returns, and the
/// home screen does no gesture processing meanwhile.
pub trait MiniApp {
    fn run(&mut self, surface: &mut Visualizer, source: &mut dyn LandmarkSource);
}

/// Index → app mapping, populated at startup.
#[derive(Default)]
pub struct AppRegistry {
    entries: HashMap<usize, Box<dyn MiniApp>>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, index: usize, app: Box<dyn MiniApp>) {
        self.entries.insert(index, app);
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Run the app at `index`, blocking until it returns.
    pub fn dispatch(
        &mut self,
        index: usize,
        surface: &mut Visualizer,
        source: &mut dyn LandmarkSource,
    ) -> Result<(), DispatchError> {
        match self.entries.get_mut(&index) {
            Some(app) => {
                println!("[kiosk] launching app {}", index);
                app.run(surface, source);
                println!("[kiosk] app {} returned", index);
                Ok(())
            }
            None => Err(DispatchError::NotFound(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopApp;

    impl MiniApp for NoopApp {
        fn run(&mut self, _surface: &mut Visualizer, _source: &mut dyn LandmarkSource) {}
    }

    #[test]
    fn empty_registry_reports_not_found() {
        let reg = AppRegistry::new();
        assert!(!reg.contains(TEXT_VIEWER_APP));
    }

    #[test]
    fn registration_is_visible() {
        let mut reg = AppRegistry::new();
        reg.register(TUNER_APP, Box::new(NoopApp));
        assert!(reg.contains(TUNER_APP));
        assert!(!reg.contains(COOKING_APP));
    }

    #[test]
    fn not_found_error_names_the_index() {
        let e = DispatchError::NotFound(9);
        assert_eq!(e.to_string(), "no application registered at index 9");
    }
}
