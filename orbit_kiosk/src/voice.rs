//! The voice-assistant side channel.
//!
//! A listener thread turns utterances into navigation requests and writes
//! them into a shared [`CommandCell`]; the controller polls and clears the
//! cell once per frame.  The cell is the only cross-thread mutable state
//! in the kiosk: single writer, single reader, lock held only for the
//! copy, clear-after-read on the consumer side.
//!
//! The speech-to-text engine itself is a collaborator behind
//! [`TranscriptSource`]; the default [`StdinSource`] lets you type
//! utterances into the terminal.

use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::registry::COOKING_APP;

// ════════════════════════════════════════════════════════════════════════════
// Shared cells
// ════════════════════════════════════════════════════════════════════════════

/// Pending navigation requests.  `launch_app == 0` means none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoiceCommands {
    pub home_toggle: bool,
    pub launch_app: usize,
}

/// Shared command cell: written by the listener thread, drained by the
/// controller.
#[derive(Clone, Default)]
pub struct CommandCell {
    inner: Arc<Mutex<VoiceCommands>>,
}

impl CommandCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_home_toggle(&self) {
        if let Ok(mut g) = self.inner.lock() {
            g.home_toggle = true;
        }
    }

    pub fn request_launch(&self, index: usize) {
        if let Ok(mut g) = self.inner.lock() {
            g.launch_app = index;
        }
    }

    /// Read and clear in one critical section.
    pub fn take(&self) -> VoiceCommands {
        match self.inner.lock() {
            Ok(mut g) => std::mem::take(&mut *g),
            Err(_) => VoiceCommands::default(),
        }
    }
}

/// Latest transcribed utterance, shown in the status bar.
#[derive(Clone, Default)]
pub struct TranscriptCell {
    inner: Arc<Mutex<String>>,
}

impl TranscriptCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, text: &str) {
        if let Ok(mut g) = self.inner.lock() {
            *g = text.to_string();
        }
    }

    /// Read and clear; `None` when nothing new arrived.
    pub fn take(&self) -> Option<String> {
        match self.inner.lock() {
            Ok(mut g) if !g.is_empty() => Some(std::mem::take(&mut *g)),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command parsing
// ════════════════════════════════════════════════════════════════════════════

/// A recognized navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpokenCommand {
    ToggleHome,
    LaunchApp(usize),
}

/// Map an utterance to a navigation request.  Keyword matching on the
/// lowercased text; anything unrecognized is simply not a command.
pub fn parse_command(text: &str) -> Option<SpokenCommand> {
    let t = text.to_lowercase();

    if t.contains("home") && (t.contains("open") || t.contains("close")) {
        return Some(SpokenCommand::ToggleHome);
    }

    let verb = t.contains("run") || t.contains("launch");
    if verb && (t.contains("app") || t.contains("application")) {
        if let Some(n) = trailing_number(&t) {
            return Some(SpokenCommand::LaunchApp(n));
        }
    }
    if verb && t.contains("cooking") {
        return Some(SpokenCommand::LaunchApp(COOKING_APP));
    }

    None
}

/// Last whole number in the utterance ("run app 3" → 3).
fn trailing_number(t: &str) -> Option<usize> {
    t.split_whitespace()
        .rev()
        .find_map(|w| w.trim_matches(|c: char| !c.is_ascii_digit()).parse().ok())
        .filter(|&n| n > 0)
}

// ════════════════════════════════════════════════════════════════════════════
// Listener thread
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can block for the next transcribed utterance.
/// `None` means the source closed.
pub trait TranscriptSource: Send + 'static {
    fn next_utterance(&mut self) -> Option<String>;
}

/// Terminal stand-in for the speech-to-text recorder: one utterance per
/// line of stdin.
pub struct StdinSource;

impl TranscriptSource for StdinSource {
    fn next_utterance(&mut self) -> Option<String> {
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buf.trim().to_string()),
        }
    }
}

/// Run the listener on a detached thread.  It only ever writes to the two
/// shared cells and exits when its source closes; shutdown never waits on
/// it.
pub fn spawn_listener<S: TranscriptSource>(
    source: S,
    commands: CommandCell,
    transcript: TranscriptCell,
) {
    thread::spawn(move || relay(source, commands, transcript));
}

fn relay<S: TranscriptSource>(mut source: S, commands: CommandCell, transcript: TranscriptCell) {
    while let Some(text) = source.next_utterance() {
        if text.is_empty() {
            continue;
        }
        transcript.publish(&text);
        match parse_command(&text) {
            Some(SpokenCommand::ToggleHome) => {
                println!("[voice] home toggle requested");
                commands.request_home_toggle();
            }
            Some(SpokenCommand::LaunchApp(i)) => {
                println!("[voice] launch app {} requested", i);
                commands.request_launch(i);
            }
            None => {}
        }
    }
    println!("[voice] transcript source closed");
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_home_toggles() {
        assert_eq!(parse_command("open the home menu"), Some(SpokenCommand::ToggleHome));
        assert_eq!(parse_command("please close home"), Some(SpokenCommand::ToggleHome));
        assert_eq!(parse_command("OPEN HOME"), Some(SpokenCommand::ToggleHome));
    }

    #[test]
    fn parses_numbered_launches() {
        assert_eq!(parse_command("run app 3"), Some(SpokenCommand::LaunchApp(3)));
        assert_eq!(
            parse_command("launch application 12"),
            Some(SpokenCommand::LaunchApp(12))
        );
    }

    #[test]
    fn parses_cooking_alias() {
        assert_eq!(
            parse_command("run the cooking app"),
            Some(SpokenCommand::LaunchApp(COOKING_APP))
        );
    }

    #[test]
    fn ignores_chatter() {
        assert_eq!(parse_command("what's the weather like"), None);
        assert_eq!(parse_command("run app"), None, "no index, no launch");
        assert_eq!(parse_command("app 3"), None, "needs a verb");
        assert_eq!(parse_command("run app 0"), None, "zero is the none sentinel");
    }

    #[test]
    fn command_cell_clears_after_take() {
        let cell = CommandCell::new();
        cell.request_home_toggle();
        cell.request_launch(4);
        let first = cell.take();
        assert_eq!(
            first,
            VoiceCommands {
                home_toggle: true,
                launch_app: 4
            }
        );
        assert_eq!(cell.take(), VoiceCommands::default());
    }

    #[test]
    fn transcript_cell_clears_after_take() {
        let cell = TranscriptCell::new();
        assert_eq!(cell.take(), None);
        cell.publish("hello");
        assert_eq!(cell.take(), Some("hello".to_string()));
        assert_eq!(cell.take(), None);
    }

    struct ScriptedSource(Vec<&'static str>);

    impl TranscriptSource for ScriptedSource {
        fn next_utterance(&mut self) -> Option<String> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0).to_string())
            }
        }
    }

    #[test]
    fn relay_writes_commands_and_transcript() {
        let commands = CommandCell::new();
        let transcript = TranscriptCell::new();
        relay(
            ScriptedSource(vec!["hello there", "open home", "run app 7"]),
            commands.clone(),
            transcript.clone(),
        );
        let got = commands.take();
        assert!(got.home_toggle);
        assert_eq!(got.launch_app, 7);
        assert_eq!(transcript.take(), Some("run app 7".to_string()));
    }
}
