pub mod answer;
pub mod config;
pub mod matcher;
pub mod preferences;
pub mod provider;
pub mod reading_level;
pub mod render;
pub mod responses;
pub mod speech;
pub mod state;
pub mod timeline;
pub mod window;

// Re-export main types for convenience
pub use answer::{answer_or_apology, AnswerProvider, CannedAnswers, OllamaClient, APOLOGY_MESSAGE};
pub use config::Config;
pub use matcher::{match_question, ResponseTable};
pub use preferences::{
    AccessibilityPreferences, AccessibilityState, ContrastMode, JsonFileStore, MemoryStore,
    PreferenceError, PreferenceStore, TextSize, UnavailableStore,
};
pub use provider::Provider;
pub use reading_level::ReadingLevel;
pub use render::{present, EventView, Section};
pub use responses::SAMPLE_QUESTIONS;
pub use speech::{
    CommandSpeaker, SpeechError, SpeechEvent, SpeechInput, SpeechOutput, UnsupportedInput,
    VoiceInputControl, VoiceInputOutcome, VoiceOutputControl, VoiceOutputOutcome,
};
pub use state::{Message, MessageLog, Role};
pub use timeline::{timeline_events, Category, TimelineEvent};
pub use window::{TimelineWindow, VisibleEntry, VisibleRange};
