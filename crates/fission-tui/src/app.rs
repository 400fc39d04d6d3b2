use fission_core::{
    answer_or_apology, timeline_events, AccessibilityState, AnswerProvider, CommandSpeaker, Config,
    MessageLog, PreferenceStore, Provider, ReadingLevel, SpeechEvent, TextSize, TimelineEvent,
    TimelineWindow, UnsupportedInput, VoiceInputControl, VoiceInputOutcome, VoiceOutputControl,
    VoiceOutputOutcome, APOLOGY_MESSAGE, SAMPLE_QUESTIONS,
};
use fission_core::speech::{INPUT_UNSUPPORTED_MESSAGE, OUTPUT_UNSUPPORTED_MESSAGE};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Timeline,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Rows of the accessibility popup, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityItem {
    TextSize(TextSize),
    Contrast,
}

impl AccessibilityItem {
    pub fn all() -> Vec<AccessibilityItem> {
        let mut items: Vec<AccessibilityItem> = TextSize::all()
            .into_iter()
            .map(AccessibilityItem::TextSize)
            .collect();
        items.push(AccessibilityItem::Contrast);
        items
    }
}

pub type Preferences = AccessibilityState<Box<dyn PreferenceStore + Send>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub reading_level: ReadingLevel,
    pub accessibility: Preferences,

    // Timeline state
    pub events: &'static [TimelineEvent],
    pub window: TimelineWindow,
    pub detail_scroll: u16,

    // Chat state
    pub messages: MessageLog,
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars
    pub answer_task: Option<JoinHandle<String>>,
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,
    pub provider: AnswerProvider,

    // Speech
    pub voice_input: VoiceInputControl<UnsupportedInput>,
    pub voice_output: VoiceOutputControl<CommandSpeaker>,
    pub speech_tx: UnboundedSender<SpeechEvent>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Popups
    pub show_level_picker: bool,
    pub level_picker_state: ListState,
    pub show_accessibility_menu: bool,
    pub accessibility_menu_state: ListState,

    // Latest one-line notice for the footer
    pub notification: Option<String>,

    // Panel areas for mouse hit-testing (updated during render)
    pub navigator_area: Option<Rect>,
    pub year_areas: Vec<(Rect, usize)>,
    pub detail_area: Option<Rect>,
    pub chat_area: Option<Rect>,
}

impl App {
    pub fn new(
        config: &Config,
        store: Box<dyn PreferenceStore + Send>,
        speech_tx: UnboundedSender<SpeechEvent>,
    ) -> Self {
        let events = timeline_events();
        let provider = AnswerProvider::from_config(config);
        info!(provider = %provider.description(), "answer provider selected");

        Self {
            should_quit: false,
            screen: Screen::Timeline,
            input_mode: InputMode::Normal,
            reading_level: ReadingLevel::default(),
            accessibility: AccessibilityState::load(store),

            events,
            window: TimelineWindow::new(events),
            detail_scroll: 0,

            messages: MessageLog::with_welcome(),
            input: String::new(),
            cursor: 0,
            answer_task: None,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            provider,

            voice_input: VoiceInputControl::new(UnsupportedInput),
            voice_output: VoiceOutputControl::new(CommandSpeaker::detect()),
            speech_tx,

            animation_frame: 0,

            show_level_picker: false,
            level_picker_state: ListState::default(),
            show_accessibility_menu: false,
            accessibility_menu_state: ListState::default(),

            notification: None,

            navigator_area: None,
            year_areas: Vec::new(),
            detail_area: None,
            chat_area: None,
        }
    }

    pub fn selected_event(&self) -> Option<&'static TimelineEvent> {
        self.events.get(self.window.selected())
    }

    pub fn is_loading(&self) -> bool {
        self.answer_task.is_some()
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "notification");
        self.notification = Some(message);
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Timeline => Screen::Chat,
            Screen::Chat => Screen::Timeline,
        };
        self.input_mode = InputMode::Normal;
    }

    /// Select an event by its dataset index, resetting the detail scroll.
    pub fn select_event(&mut self, index: usize) {
        if self.window.select_event(index) {
            self.detail_scroll = 0;
        }
    }

    pub fn select_next_event(&mut self) {
        if self.window.select_next() {
            self.detail_scroll = 0;
        }
    }

    pub fn select_previous_event(&mut self) {
        if self.window.select_previous() {
            self.detail_scroll = 0;
        }
    }

    pub fn select_first_event(&mut self) {
        if self.window.select_first() {
            self.detail_scroll = 0;
        }
    }

    pub fn select_last_event(&mut self) {
        if self.window.select_last() {
            self.detail_scroll = 0;
        }
    }

    pub fn set_reading_level(&mut self, level: ReadingLevel) {
        if level != self.reading_level {
            debug!(level = level.as_str(), "reading level changed");
            self.reading_level = level;
            self.detail_scroll = 0;
        }
    }

    /// Put a sample question in the input line without sending it.
    pub fn fill_sample_question(&mut self, index: usize) {
        if let Some(question) = SAMPLE_QUESTIONS.get(index) {
            self.input = question.to_string();
            self.cursor = self.input.chars().count();
            self.input_mode = InputMode::Editing;
        }
    }

    /// Send the input as a question. Ignored while an answer is pending or
    /// when the input is blank.
    pub fn send_message(&mut self) -> bool {
        let question = self.input.trim().to_string();
        if question.is_empty() || self.answer_task.is_some() {
            return false;
        }

        self.messages.push_user(question.clone());
        self.input.clear();
        self.cursor = 0;
        self.input_mode = InputMode::Normal;
        self.animation_frame = 0;

        let provider = self.provider.clone();
        let level = self.reading_level;
        debug!(%question, level = level.as_str(), "question sent");
        self.answer_task = Some(tokio::spawn(async move {
            answer_or_apology(&provider, &question, level).await
        }));

        // Scroll to bottom so "Thinking..." is visible
        self.scroll_chat_to_bottom();
        true
    }

    /// Collect a finished answer, if any. Called on every tick.
    pub async fn poll_answer(&mut self) {
        let finished = self
            .answer_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false);
        if !finished {
            return;
        }

        if let Some(task) = self.answer_task.take() {
            let answer = match task.await {
                Ok(answer) => answer,
                Err(e) => {
                    warn!(error = %e, "answer task failed");
                    APOLOGY_MESSAGE.to_string()
                }
            };

            if let Some(note) = self.voice_output.on_answer(&answer, self.speech_tx.clone()) {
                self.notify(note);
            }
            self.messages.push_system(answer);
            self.scroll_chat_to_bottom();
        }
    }

    pub fn switch_provider(&mut self, config: &mut Config) {
        let next = match self.provider.provider() {
            Provider::Canned => Provider::Ollama,
            Provider::Ollama => Provider::Canned,
        };
        config.provider = Some(next.as_str().to_string());
        if let Err(e) = config.save() {
            warn!(error = %e, "could not save provider choice");
        }

        self.provider = AnswerProvider::from_config(config);
        info!(provider = %self.provider.description(), "answer provider switched");
        self.notify(format!("Answers from {}", self.provider.description()));
    }

    pub fn toggle_voice_input(&mut self) {
        match self.voice_input.toggle(self.speech_tx.clone()) {
            VoiceInputOutcome::Started => self.notify("Listening..."),
            VoiceInputOutcome::Stopped => self.notify("Voice input off"),
            VoiceInputOutcome::Unsupported { notify: true } => self.notify(INPUT_UNSUPPORTED_MESSAGE),
            VoiceInputOutcome::Unsupported { notify: false } => {}
            VoiceInputOutcome::Failed(message) => self.notify(format!("Voice input error: {}", message)),
        }
    }

    pub fn toggle_voice_output(&mut self) {
        match self.voice_output.toggle() {
            VoiceOutputOutcome::Enabled => self.notify("Read aloud on"),
            VoiceOutputOutcome::Disabled => self.notify("Read aloud off"),
            VoiceOutputOutcome::Unsupported { notify: true } => self.notify(OUTPUT_UNSUPPORTED_MESSAGE),
            VoiceOutputOutcome::Unsupported { notify: false } => {}
        }
    }

    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        if let SpeechEvent::Transcript(text) = &event {
            self.input = text.clone();
            self.cursor = self.input.chars().count();
            self.screen = Screen::Chat;
            self.input_mode = InputMode::Editing;
        }

        let notes = [
            self.voice_input.handle_event(&event),
            self.voice_output.handle_event(&event),
        ];
        for note in notes.into_iter().flatten() {
            self.notify(note);
        }
    }

    // Popup navigation

    pub fn open_level_picker(&mut self) {
        let current = ReadingLevel::all()
            .iter()
            .position(|level| *level == self.reading_level);
        self.level_picker_state.select(current.or(Some(0)));
        self.show_level_picker = true;
    }

    pub fn level_picker_nav_down(&mut self) {
        let len = ReadingLevel::all().len();
        let i = self.level_picker_state.selected().unwrap_or(0);
        self.level_picker_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn level_picker_nav_up(&mut self) {
        let i = self.level_picker_state.selected().unwrap_or(0);
        self.level_picker_state.select(Some(i.saturating_sub(1)));
    }

    pub fn select_level(&mut self) {
        if let Some(level) = self
            .level_picker_state
            .selected()
            .and_then(|i| ReadingLevel::all().get(i).copied())
        {
            self.set_reading_level(level);
            self.notify(format!("Reading level: {}", level.label()));
        }
        self.show_level_picker = false;
    }

    pub fn open_accessibility_menu(&mut self) {
        let current = AccessibilityItem::all()
            .iter()
            .position(|item| *item == AccessibilityItem::TextSize(self.accessibility.text_size()));
        self.accessibility_menu_state.select(current.or(Some(0)));
        self.show_accessibility_menu = true;
    }

    pub fn accessibility_nav_down(&mut self) {
        let len = AccessibilityItem::all().len();
        let i = self.accessibility_menu_state.selected().unwrap_or(0);
        self.accessibility_menu_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn accessibility_nav_up(&mut self) {
        let i = self.accessibility_menu_state.selected().unwrap_or(0);
        self.accessibility_menu_state.select(Some(i.saturating_sub(1)));
    }

    /// Apply the highlighted row. The menu stays open so several changes can
    /// be made in one visit.
    pub fn apply_accessibility_item(&mut self) {
        let item = self
            .accessibility_menu_state
            .selected()
            .and_then(|i| AccessibilityItem::all().get(i).copied());

        match item {
            Some(AccessibilityItem::TextSize(size)) => {
                self.accessibility.set_text_size(size);
                self.scroll_chat_to_bottom();
            }
            Some(AccessibilityItem::Contrast) => self.accessibility.toggle_contrast_mode(),
            None => {}
        }
    }

    // Scrolling

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_chat_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn scroll_chat_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Blank lines placed between chat messages for the current text size.
    pub fn message_gap(&self) -> usize {
        match self.accessibility.text_size() {
            TextSize::Small => 0,
            TextSize::Medium => 1,
            TextSize::Large => 2,
        }
    }

    /// Horizontal padding inside the detail and chat panes.
    pub fn pane_padding(&self) -> u16 {
        match self.accessibility.text_size() {
            TextSize::Small => 0,
            TextSize::Medium => 1,
            TextSize::Large => 3,
        }
    }

    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };
        let gap = self.message_gap() as u16;

        let mut total_lines: u16 = 0;
        for msg in self.messages.messages() {
            total_lines = total_lines.saturating_add(1); // Role line
            for line in msg.text.lines() {
                let char_count = line.chars().count();
                total_lines = total_lines.saturating_add(((char_count / wrap_width) + 1) as u16);
            }
            total_lines = total_lines.saturating_add(gap);
        }

        if self.is_loading() {
            total_lines = total_lines.saturating_add(2);
        }

        let visible_height = if self.chat_height > 0 { self.chat_height } else { 20 };

        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::{match_question, ContrastMode, MemoryStore, Role};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let config = Config {
            response_delay_ms: Some(0),
            ..Config::new()
        };
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(&config, Box::new(MemoryStore::new()), tx)
    }

    async fn wait_for_answer(app: &mut App) {
        while app.is_loading() {
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.poll_answer().await;
        }
    }

    #[tokio::test]
    async fn test_send_appends_user_then_answer() {
        let mut app = test_app();
        app.input = "  What is nuclear fission?  ".to_string();
        assert!(app.send_message());
        assert!(app.input.is_empty());

        wait_for_answer(&mut app).await;

        let messages = app.messages.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].text, "What is nuclear fission?");
        assert_eq!(messages[2].role, Role::System);
        assert_eq!(
            messages[2].text,
            match_question("What is nuclear fission?", ReadingLevel::Novice)
        );
    }

    #[tokio::test]
    async fn test_send_ignored_while_pending_or_blank() {
        let mut app = test_app();
        app.input = "   ".to_string();
        assert!(!app.send_message());
        assert_eq!(app.messages.len(), 1);

        app.input = "What is nuclear fission?".to_string();
        assert!(app.send_message());
        app.input = "Who led the Manhattan Project?".to_string();
        assert!(!app.send_message());
        assert_eq!(app.input, "Who led the Manhattan Project?");

        wait_for_answer(&mut app).await;
        assert_eq!(app.messages.len(), 3);
    }

    #[tokio::test]
    async fn test_answer_uses_level_at_send_time() {
        let mut app = test_app();
        app.set_reading_level(ReadingLevel::Kids);
        app.input = "What happened at Three Mile Island?".to_string();
        app.send_message();
        app.set_reading_level(ReadingLevel::Expert);

        wait_for_answer(&mut app).await;
        assert_eq!(
            app.messages.last().map(|m| m.text.as_str()),
            Some(match_question("What happened at Three Mile Island?", ReadingLevel::Kids))
        );
    }

    #[tokio::test]
    async fn test_sample_question_fills_input_without_sending() {
        let mut app = test_app();
        app.fill_sample_question(0);
        assert_eq!(app.input, SAMPLE_QUESTIONS[0]);
        assert_eq!(app.cursor, SAMPLE_QUESTIONS[0].chars().count());
        assert_eq!(app.messages.len(), 1);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_accessibility_menu_applies_and_persists() {
        let mut app = test_app();
        app.open_accessibility_menu();
        app.accessibility_nav_down();
        app.accessibility_nav_down();
        app.accessibility_nav_down();
        app.apply_accessibility_item();
        assert_eq!(app.accessibility.contrast_mode(), ContrastMode::High);

        app.accessibility_nav_up();
        app.apply_accessibility_item();
        assert_eq!(app.accessibility.text_size(), TextSize::Large);
        assert_eq!(app.accessibility.store().get("textSize").as_deref(), Some("large"));
    }

    #[tokio::test]
    async fn test_unsupported_voice_input_notifies_once() {
        let mut app = test_app();
        app.toggle_voice_input();
        assert_eq!(app.notification.as_deref(), Some(INPUT_UNSUPPORTED_MESSAGE));

        app.notification = None;
        app.toggle_voice_input();
        assert_eq!(app.notification, None);
    }

    #[tokio::test]
    async fn test_transcript_fills_input() {
        let mut app = test_app();
        app.handle_speech_event(SpeechEvent::Transcript("What was Trinity?".to_string()));
        assert_eq!(app.screen, Screen::Chat);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.input, "What was Trinity?");
    }
}
