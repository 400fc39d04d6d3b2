//! Speech capabilities and the toggles that drive them.
//!
//! Capabilities report progress as [`SpeechEvent`]s on a channel so the front
//! end can handle them in its own event loop.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Speech commands tried in order when looking on `PATH`.
pub const SPEECH_COMMANDS: &[&str] = &["say", "espeak-ng", "espeak"];

pub const INPUT_UNSUPPORTED_MESSAGE: &str = "Voice input is not supported in this environment.";
pub const OUTPUT_UNSUPPORTED_MESSAGE: &str =
    "Voice output needs a speech command (say, espeak-ng or espeak) on your PATH.";

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech {0} is not supported here")]
    Unsupported(&'static str),

    #[error("speech command failed: {0}")]
    Command(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    ListeningStarted,
    Transcript(String),
    ListeningStopped,
    InputError(String),
    SpeakingStarted,
    SpeakingEnded,
    OutputError(String),
}

pub type SpeechEvents = UnboundedSender<SpeechEvent>;

pub trait SpeechInput: Send {
    fn is_supported(&self) -> bool;
    fn start(&mut self, events: SpeechEvents) -> Result<(), SpeechError>;
    fn stop(&mut self);
}

pub trait SpeechOutput: Send {
    fn is_supported(&self) -> bool;
    fn speak(&mut self, text: &str, events: SpeechEvents) -> Result<(), SpeechError>;
    fn cancel(&mut self);
}

/// Speech recognition for environments that have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedInput;

impl SpeechInput for UnsupportedInput {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _events: SpeechEvents) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("input"))
    }

    fn stop(&mut self) {}
}

/// Speaks by running a system text-to-speech command with the text as its
/// only argument. At most one utterance plays at a time.
#[derive(Debug, Default)]
pub struct CommandSpeaker {
    program: Option<PathBuf>,
    task: Option<JoinHandle<()>>,
}

impl CommandSpeaker {
    pub fn detect() -> Self {
        let program = find_speech_command();
        debug!(?program, "speech output command");
        Self::with_program(program)
    }

    pub fn with_program(program: Option<PathBuf>) -> Self {
        Self { program, task: None }
    }

    pub fn program(&self) -> Option<&PathBuf> {
        self.program.as_ref()
    }
}

impl SpeechOutput for CommandSpeaker {
    fn is_supported(&self) -> bool {
        self.program.is_some()
    }

    fn speak(&mut self, text: &str, events: SpeechEvents) -> Result<(), SpeechError> {
        let program = self.program.clone().ok_or(SpeechError::Unsupported("output"))?;
        self.cancel();

        let text = text.to_string();
        self.task = Some(tokio::spawn(async move {
            let _ = events.send(SpeechEvent::SpeakingStarted);

            let status = match Command::new(&program)
                .args(speech_args(&program))
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()
            {
                Ok(mut child) => {
                    // Text goes on stdin so a leading '-' is never read as a flag
                    if let Some(mut stdin) = child.stdin.take() {
                        if let Err(e) = stdin.write_all(text.as_bytes()).await {
                            debug!(error = %e, "speech command closed stdin early");
                        }
                    }
                    child.wait().await
                }
                Err(e) => Err(e),
            };

            let event = match status {
                Ok(status) if status.success() => SpeechEvent::SpeakingEnded,
                Ok(status) => SpeechEvent::OutputError(
                    SpeechError::Command(format!("{} exited with {}", program.display(), status)).to_string(),
                ),
                Err(e) => SpeechEvent::OutputError(SpeechError::Io(e).to_string()),
            };
            let _ = events.send(event);
        }));
        Ok(())
    }

    fn cancel(&mut self) {
        // Dropping the aborted future kills the child process
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Arguments that make a known speech command read its text from stdin.
fn speech_args(program: &Path) -> &'static [&'static str] {
    match program.file_name().and_then(|name| name.to_str()) {
        Some("say") => &["-f", "-"],
        Some("espeak") | Some("espeak-ng") => &["--stdin"],
        _ => &[],
    }
}

fn find_speech_command() -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    SPEECH_COMMANDS.iter().find_map(|name| {
        env::split_paths(&path)
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceInputOutcome {
    Started,
    Stopped,
    /// `notify` is true only the first time.
    Unsupported { notify: bool },
    Failed(String),
}

/// Microphone toggle. Starting while active and stopping while idle do nothing.
pub struct VoiceInputControl<I: SpeechInput> {
    input: I,
    active: bool,
    disabled: bool,
    unsupported_notified: bool,
}

impl<I: SpeechInput> VoiceInputControl<I> {
    pub fn new(input: I) -> Self {
        let disabled = !input.is_supported();
        Self {
            input,
            active: false,
            disabled,
            unsupported_notified: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn toggle(&mut self, events: SpeechEvents) -> VoiceInputOutcome {
        if self.active {
            self.stop()
        } else {
            self.start(events)
        }
    }

    pub fn start(&mut self, events: SpeechEvents) -> VoiceInputOutcome {
        if self.disabled {
            return self.unsupported();
        }
        if self.active {
            return VoiceInputOutcome::Started;
        }

        match self.input.start(events) {
            Ok(()) => {
                self.active = true;
                VoiceInputOutcome::Started
            }
            Err(SpeechError::Unsupported(_)) => {
                self.disabled = true;
                self.unsupported()
            }
            Err(e) => {
                warn!(error = %e, "voice input failed to start");
                VoiceInputOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn stop(&mut self) -> VoiceInputOutcome {
        if self.active {
            self.input.stop();
            self.active = false;
        }
        VoiceInputOutcome::Stopped
    }

    /// Track listening state; returns a notification for runtime errors.
    pub fn handle_event(&mut self, event: &SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::ListeningStarted => {
                self.active = true;
                None
            }
            SpeechEvent::ListeningStopped => {
                self.active = false;
                None
            }
            SpeechEvent::InputError(message) => {
                warn!(%message, "voice input error");
                self.active = false;
                Some(format!("Voice input error: {}", message))
            }
            _ => None,
        }
    }

    fn unsupported(&mut self) -> VoiceInputOutcome {
        let notify = !self.unsupported_notified;
        self.unsupported_notified = true;
        VoiceInputOutcome::Unsupported { notify }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceOutputOutcome {
    Enabled,
    Disabled,
    Unsupported { notify: bool },
}

/// Read-aloud toggle for system answers.
pub struct VoiceOutputControl<O: SpeechOutput> {
    output: O,
    enabled: bool,
    speaking: bool,
    unsupported_notified: bool,
}

impl<O: SpeechOutput> VoiceOutputControl<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            enabled: false,
            speaking: false,
            unsupported_notified: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn is_supported(&self) -> bool {
        self.output.is_supported()
    }

    pub fn toggle(&mut self) -> VoiceOutputOutcome {
        if self.enabled {
            self.output.cancel();
            self.enabled = false;
            self.speaking = false;
            return VoiceOutputOutcome::Disabled;
        }

        if !self.output.is_supported() {
            let notify = !self.unsupported_notified;
            self.unsupported_notified = true;
            return VoiceOutputOutcome::Unsupported { notify };
        }

        self.enabled = true;
        VoiceOutputOutcome::Enabled
    }

    /// Speak a completed answer if read-aloud is on.
    pub fn on_answer(&mut self, text: &str, events: SpeechEvents) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match self.output.speak(text, events) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "voice output failed");
                self.speaking = false;
                Some(format!("Voice output error: {}", e))
            }
        }
    }

    pub fn handle_event(&mut self, event: &SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::SpeakingStarted => {
                self.speaking = true;
                None
            }
            SpeechEvent::SpeakingEnded => {
                self.speaking = false;
                None
            }
            SpeechEvent::OutputError(message) => {
                warn!(%message, "voice output error");
                self.speaking = false;
                Some(format!("Voice output error: {}", message))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct FakeInput {
        supported: bool,
        fail_with: Option<String>,
        starts: usize,
        stops: usize,
    }

    impl SpeechInput for FakeInput {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn start(&mut self, events: SpeechEvents) -> Result<(), SpeechError> {
            if let Some(message) = &self.fail_with {
                return Err(SpeechError::Command(message.clone()));
            }
            self.starts += 1;
            let _ = events.send(SpeechEvent::ListeningStarted);
            Ok(())
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[derive(Default)]
    struct FakeOutput {
        supported: bool,
        spoken: Vec<String>,
        cancels: usize,
    }

    impl SpeechOutput for FakeOutput {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn speak(&mut self, text: &str, events: SpeechEvents) -> Result<(), SpeechError> {
            self.spoken.push(text.to_string());
            let _ = events.send(SpeechEvent::SpeakingStarted);
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }
    }

    #[test]
    fn test_unsupported_input_notifies_once() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut control = VoiceInputControl::new(UnsupportedInput);
        assert!(control.is_disabled());

        assert_eq!(control.toggle(tx.clone()), VoiceInputOutcome::Unsupported { notify: true });
        assert_eq!(control.toggle(tx.clone()), VoiceInputOutcome::Unsupported { notify: false });
        assert_eq!(control.toggle(tx), VoiceInputOutcome::Unsupported { notify: false });
        assert!(!control.is_active());
    }

    #[test]
    fn test_input_start_and_stop_are_idempotent() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut control = VoiceInputControl::new(FakeInput {
            supported: true,
            ..FakeInput::default()
        });

        assert_eq!(control.start(tx.clone()), VoiceInputOutcome::Started);
        assert_eq!(control.start(tx.clone()), VoiceInputOutcome::Started);
        assert_eq!(control.input.starts, 1);

        assert_eq!(control.toggle(tx), VoiceInputOutcome::Stopped);
        assert_eq!(control.stop(), VoiceInputOutcome::Stopped);
        assert_eq!(control.input.stops, 1);
        assert!(!control.is_active());
    }

    #[test]
    fn test_input_failure_leaves_control_inactive() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut control = VoiceInputControl::new(FakeInput {
            supported: true,
            fail_with: Some("no microphone".to_string()),
            ..FakeInput::default()
        });

        let outcome = control.toggle(tx);
        assert_eq!(
            outcome,
            VoiceInputOutcome::Failed("speech command failed: no microphone".to_string())
        );
        assert!(!control.is_active());
        assert!(!control.is_disabled());
    }

    #[test]
    fn test_input_runtime_error_resets_state() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut control = VoiceInputControl::new(FakeInput {
            supported: true,
            ..FakeInput::default()
        });
        control.start(tx);
        assert!(control.is_active());

        let note = control.handle_event(&SpeechEvent::InputError("network".to_string()));
        assert_eq!(note.as_deref(), Some("Voice input error: network"));
        assert!(!control.is_active());
    }

    #[test]
    fn test_output_speaks_answers_only_when_enabled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut control = VoiceOutputControl::new(FakeOutput {
            supported: true,
            ..FakeOutput::default()
        });

        assert_eq!(control.on_answer("ignored", tx.clone()), None);
        assert!(control.output.spoken.is_empty());

        assert_eq!(control.toggle(), VoiceOutputOutcome::Enabled);
        control.on_answer("Fission splits atoms.", tx);
        assert_eq!(control.output.spoken, vec!["Fission splits atoms.".to_string()]);

        let event = rx.try_recv().unwrap();
        control.handle_event(&event);
        assert!(control.is_speaking());

        control.handle_event(&SpeechEvent::SpeakingEnded);
        assert!(!control.is_speaking());
    }

    #[test]
    fn test_output_disable_cancels_and_clears_speaking() {
        let mut control = VoiceOutputControl::new(FakeOutput {
            supported: true,
            ..FakeOutput::default()
        });
        control.toggle();
        control.handle_event(&SpeechEvent::SpeakingStarted);

        assert_eq!(control.toggle(), VoiceOutputOutcome::Disabled);
        assert_eq!(control.output.cancels, 1);
        assert!(!control.is_speaking());
    }

    #[test]
    fn test_output_error_resets_speaking() {
        let mut control = VoiceOutputControl::new(FakeOutput {
            supported: true,
            ..FakeOutput::default()
        });
        control.toggle();
        control.handle_event(&SpeechEvent::SpeakingStarted);

        let note = control.handle_event(&SpeechEvent::OutputError("device busy".to_string()));
        assert_eq!(note.as_deref(), Some("Voice output error: device busy"));
        assert!(!control.is_speaking());
    }

    #[test]
    fn test_unsupported_output_stays_disabled() {
        let mut control = VoiceOutputControl::new(CommandSpeaker::with_program(None));
        assert_eq!(control.toggle(), VoiceOutputOutcome::Unsupported { notify: true });
        assert_eq!(control.toggle(), VoiceOutputOutcome::Unsupported { notify: false });
        assert!(!control.is_enabled());
    }

    #[tokio::test]
    async fn test_command_speaker_reports_completion() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut speaker = CommandSpeaker::with_program(Some(PathBuf::from("true")));
        speaker.speak("hello", tx).unwrap();

        assert_eq!(rx.recv().await, Some(SpeechEvent::SpeakingStarted));
        assert_eq!(rx.recv().await, Some(SpeechEvent::SpeakingEnded));
    }

    #[tokio::test]
    async fn test_command_speaker_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut speaker = CommandSpeaker::with_program(Some(PathBuf::from("false")));
        speaker.speak("hello", tx).unwrap();

        assert_eq!(rx.recv().await, Some(SpeechEvent::SpeakingStarted));
        assert!(matches!(rx.recv().await, Some(SpeechEvent::OutputError(_))));
    }

    #[tokio::test]
    async fn test_command_speaker_passes_dashed_text_on_stdin() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut speaker = CommandSpeaker::with_program(Some(PathBuf::from("cat")));
        speaker.speak("--help -n is not a flag", tx).unwrap();

        assert_eq!(rx.recv().await, Some(SpeechEvent::SpeakingStarted));
        assert_eq!(rx.recv().await, Some(SpeechEvent::SpeakingEnded));
    }

    #[test]
    fn test_speech_args_read_from_stdin() {
        assert_eq!(speech_args(Path::new("/usr/bin/say")), &["-f", "-"]);
        assert_eq!(speech_args(Path::new("/usr/bin/espeak-ng")), &["--stdin"]);
        assert_eq!(speech_args(Path::new("espeak")), &["--stdin"]);
        assert!(speech_args(Path::new("cat")).is_empty());
    }

    #[test]
    fn test_command_speaker_without_program_is_unsupported() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut speaker = CommandSpeaker::with_program(None);
        assert!(!speaker.is_supported());
        assert!(matches!(speaker.speak("hello", tx), Err(SpeechError::Unsupported("output"))));
    }
}
