//! Audio cues — short confirmation sounds for kiosk actions.
//!
//! Playback is fire-and-forget through `rodio`.  When no output device is
//! available the player degrades to a logging stub, so the kiosk runs the
//! same on headless machines.  A missing or unreadable cue file is logged
//! and skipped; it never interrupts the frame loop.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

/// The kiosk's cue vocabulary, mapped to wav files in the audio directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Kiosk started.
    Startup,
    /// Ring toggled.
    Home,
    /// App launch accepted.
    Confirm,
    /// App launch rejected (no such app).
    Reject,
}

impl Cue {
    fn file_name(self) -> &'static str {
        match self {
            Cue::Startup => "startup.wav",
            Cue::Home => "home.wav",
            Cue::Confirm => "confirmation.wav",
            Cue::Reject => "reject.wav",
        }
    }
}

/// Cue player holding the output stream open for the process lifetime.
pub struct CuePlayer {
    // None = null player; cues are logged but not heard.
    output: Option<(OutputStream, OutputStreamHandle)>,
    dir: PathBuf,
}

impl CuePlayer {
    pub fn new(dir: PathBuf) -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(e) => {
                eprintln!("[audio] no output device: {} — cues disabled", e);
                None
            }
        };
        CuePlayer { output, dir }
    }

    /// Fire-and-forget playback.  Every failure path logs and returns.
    pub fn play(&self, cue: Cue) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let path = self.dir.join(cue.file_name());
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("[audio] {}: {}", path.display(), e);
                return;
            }
        };
        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("[audio] {}: {}", path.display(), e);
                return;
            }
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => eprintln!("[audio] sink: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_file_names_match_the_shipped_set() {
        assert_eq!(Cue::Startup.file_name(), "startup.wav");
        assert_eq!(Cue::Home.file_name(), "home.wav");
        assert_eq!(Cue::Confirm.file_name(), "confirmation.wav");
        assert_eq!(Cue::Reject.file_name(), "reject.wav");
    }
}
