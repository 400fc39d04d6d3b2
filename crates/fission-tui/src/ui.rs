use fission_core::{present, Category, ContrastMode, ReadingLevel, Role, SAMPLE_QUESTIONS};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{AccessibilityItem, App, InputMode, Screen};

/// Colours for one contrast mode.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub background: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub user: Color,
    pub system: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn for_mode(mode: ContrastMode) -> Self {
        match mode {
            ContrastMode::Normal => Self {
                text: Color::Reset,
                background: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                border: Color::DarkGray,
                user: Color::Cyan,
                system: Color::Yellow,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
            },
            ContrastMode::High => Self {
                text: Color::White,
                background: Color::Black,
                muted: Color::White,
                accent: Color::Yellow,
                border: Color::White,
                user: Color::LightCyan,
                system: Color::LightYellow,
                highlight_fg: Color::Black,
                highlight_bg: Color::Yellow,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    fn category(&self, category: Category) -> Color {
        if self.background == Color::Black {
            return self.accent;
        }
        match category {
            Category::Discovery => Color::Green,
            Category::Technology => Color::Blue,
            Category::Policy => Color::Magenta,
            Category::Event => Color::Red,
        }
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::for_mode(app.accessibility.contrast_mode());

    frame.render_widget(Block::default().style(theme.base()), area);

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, &theme, frame, header_area);

    match app.screen {
        Screen::Timeline => render_timeline_screen(app, &theme, frame, body_area),
        Screen::Chat => render_chat_screen(app, &theme, frame, body_area),
    }

    render_footer(app, &theme, frame, footer_area);

    if app.show_level_picker {
        render_level_picker(app, &theme, frame, area);
    } else if app.show_accessibility_menu {
        render_accessibility_menu(app, &theme, frame, area);
    }
}

fn render_header(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" Nuclear History ", Style::default().fg(theme.accent).bold()),
        Span::styled(
            format!("[{}] ", app.reading_level.label()),
            Style::default().fg(theme.text),
        ),
        Span::styled(app.provider.description(), Style::default().fg(theme.muted)),
    ];
    if app.voice_output.is_enabled() {
        let label = if app.voice_output.is_speaking() { "  speaking" } else { "  read aloud" };
        spans.push(Span::styled(label, Style::default().fg(theme.system)));
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("v{}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.muted),
    ));

    let header_bg = if theme.background == Color::Black { Color::Black } else { Color::DarkGray };
    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(header_bg));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match (app.screen, app.input_mode) {
        (_, InputMode::Editing) => " EDIT ",
        (Screen::Timeline, _) => " TIMELINE ",
        (Screen::Chat, _) => " CHAT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hint = |key: &str, label: &str| {
        [
            Span::styled(format!(" {} ", key), key_style),
            Span::styled(format!(" {} ", label), label_style),
        ]
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];

    let hints: Vec<(&str, &str)> = if app.show_level_picker || app.show_accessibility_menu {
        vec![("j/k", "nav"), ("Enter", "select"), ("Esc", "close")]
    } else {
        match (app.screen, app.input_mode) {
            (_, InputMode::Editing) => vec![("Enter", "send"), ("Esc", "stop editing")],
            (Screen::Timeline, _) => vec![
                ("h/l", "event"),
                ("[/]", "scroll"),
                ("j/k", "details"),
                ("Tab", "chat"),
                ("r", "level"),
                ("a", "access"),
                ("q", "quit"),
            ],
            (Screen::Chat, _) => vec![
                ("i", "ask"),
                ("1-5", "sample"),
                ("v", "voice"),
                ("s", "read aloud"),
                ("p", "provider"),
                ("Tab", "timeline"),
                ("q", "quit"),
            ],
        }
    };
    for (key, label) in hints {
        spans.extend(hint(key, label));
    }

    if let Some(note) = &app.notification {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(note.clone(), Style::default().fg(theme.system)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_timeline_screen(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [navigator_area, detail_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    app.navigator_area = Some(navigator_area);
    app.detail_area = Some(detail_area);
    app.chat_area = None;

    render_navigator(app, theme, frame, navigator_area);
    render_event_detail(app, theme, frame, detail_area);
}

fn render_navigator(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Timeline ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let arrow_style = |enabled: bool| {
        if enabled {
            Style::default().fg(theme.accent).bold()
        } else {
            Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
        }
    };

    let visible = app.window.visible();
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(visible.iter().map(|_| Constraint::Fill(1)));
    constraints.push(Constraint::Length(3));
    let slots = Layout::horizontal(constraints).split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(" < ", arrow_style(app.window.can_scroll_left()))),
        slots[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(" > ", arrow_style(app.window.can_scroll_right()))),
        slots[slots.len() - 1],
    );

    app.year_areas.clear();
    for (entry, slot) in visible.iter().zip(slots.iter().skip(1)) {
        let Some(event) = app.events.get(entry.canonical_index) else {
            continue;
        };
        let style = if entry.selected {
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.category(event.category))
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", event.year), style)).centered(),
            *slot,
        );
        app.year_areas.push((*slot, entry.canonical_index));
    }
}

fn render_event_detail(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let padding = app.pane_padding();
    let gap = app.message_gap().max(1);

    let Some(event) = app.selected_event() else {
        frame.render_widget(Paragraph::new("No events."), area);
        return;
    };
    let view = present(event, app.reading_level);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
    };
    let spacer = |lines: &mut Vec<Line<'static>>| {
        for _ in 0..gap {
            lines.push(Line::default());
        }
    };

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(vec![
            Span::styled(
                view.category.label().to_string(),
                Style::default().fg(theme.category(view.category)).bold(),
            ),
            Span::styled(format!("  {}", view.year), Style::default().fg(theme.muted)),
        ]),
        Line::from(Span::styled(
            view.title.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
    ];
    spacer(&mut lines);
    lines.push(Line::from(view.description.to_string()));

    if let Some(impact) = &view.impact {
        spacer(&mut lines);
        lines.push(heading(impact.heading));
        lines.push(Line::from(impact.body.to_string()));
    }

    if let Some(figures) = &view.figures {
        spacer(&mut lines);
        lines.push(heading(figures.heading));
        for figure in figures.body {
            let mut spans = vec![Span::styled(
                format!("- {}", figure.name),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(role) = figure.role {
                spans.push(Span::styled(format!(", {}", role), Style::default().fg(theme.muted)));
            }
            lines.push(Line::from(spans));
            // Descriptions only where the level cites sources
            if let (Some(description), true) = (figure.description, app.reading_level.shows_sources()) {
                lines.push(Line::from(format!("  {}", description)));
            }
        }
    }

    if let Some(details) = &view.details {
        spacer(&mut lines);
        lines.push(heading(details.heading));
        lines.push(Line::from(details.body.to_string()));
    }

    if let Some(sources) = &view.sources {
        spacer(&mut lines);
        lines.push(heading(sources.heading));
        for source in sources.body {
            let mut spans = vec![Span::raw(format!("- {}", source.title))];
            if let Some(url) = source.url {
                spans.push(Span::styled(
                    format!(" <{}>", url),
                    Style::default().fg(theme.muted).add_modifier(Modifier::UNDERLINED),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", reading_level_title(app.reading_level)))
        .padding(Padding::horizontal(padding));

    let detail = Paragraph::new(Text::from(lines))
        .block(block)
        .style(theme.base())
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(detail, area);
}

fn reading_level_title(level: ReadingLevel) -> String {
    format!("Event Details · {}", level.label())
}

fn render_chat_screen(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let samples_height = SAMPLE_QUESTIONS.len() as u16 + 2;
    let [chat_area, samples_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(samples_height),
        Constraint::Length(3),
    ])
    .areas(area);

    app.chat_area = Some(chat_area);
    app.navigator_area = None;
    app.detail_area = None;
    app.year_areas.clear();

    let padding = app.pane_padding();
    // Inner size minus borders and padding, for scroll calculations
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2 + padding * 2);

    let gap = app.message_gap();
    let mut lines: Vec<Line> = Vec::new();
    for msg in app.messages.messages() {
        let (label, color) = match msg.role {
            Role::User => ("You", theme.user),
            Role::System => ("Guide", theme.system),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}:", label), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" {}", msg.timestamp.format("%H:%M")),
                Style::default().fg(theme.muted),
            ),
        ]));
        for line in msg.text.lines() {
            lines.push(Line::from(line.to_string()));
        }
        for _ in 0..gap {
            lines.push(Line::default());
        }
    }

    if app.is_loading() {
        lines.push(Line::from(Span::styled(
            "Guide:",
            Style::default().fg(theme.system).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Ask about nuclear history · {} ", app.reading_level.label()))
        .padding(Padding::horizontal(padding));

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .style(theme.base())
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(chat, chat_area);

    let samples: Vec<ListItem> = SAMPLE_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, question)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(theme.accent).bold()),
                Span::raw(*question),
            ]))
        })
        .collect();
    let samples = List::new(samples).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Sample questions "),
    );
    frame.render_widget(samples, samples_area);

    render_input(app, theme, frame, input_area);
}

fn render_input(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { theme.border };

    let mic = if app.voice_input.is_active() { " [mic on]" } else { "" };
    let title = if app.is_loading() {
        format!(" Waiting for an answer...{} ", mic)
    } else {
        format!(" Your question{} ", mic)
    };

    let content = if app.input.is_empty() && !editing {
        Span::styled("Press i to type a question", Style::default().fg(theme.muted))
    } else {
        Span::raw(app.input.as_str())
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor_position((input_cursor_x(area, app.cursor), area.y + 1));
    }
}

/// Column of the text cursor inside the bordered input box, clamped to the box.
fn input_cursor_x(area: Rect, cursor: usize) -> u16 {
    let offset = u16::try_from(cursor).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(offset);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    x.min(max_x)
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

fn render_level_picker(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let levels = ReadingLevel::all();
    let popup = popup_area(area, 34, levels.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = levels
        .iter()
        .map(|level| {
            let is_current = *level == app.reading_level;
            let prefix = if is_current { "* " } else { "  " };
            let style = if is_current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                theme.base()
            };
            ListItem::new(format!("{}{}", prefix, level.label())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(" Reading Level "),
        )
        .style(theme.base())
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup, &mut app.level_picker_state);
}

fn render_accessibility_menu(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let items_all = AccessibilityItem::all();
    let popup = popup_area(area, 36, items_all.len() as u16 + 2);

    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = items_all
        .iter()
        .map(|item| match item {
            AccessibilityItem::TextSize(size) => {
                let is_current = *size == app.accessibility.text_size();
                let prefix = if is_current { "* " } else { "  " };
                let style = if is_current {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    theme.base()
                };
                ListItem::new(format!("{}Text size: {}", prefix, size.label())).style(style)
            }
            AccessibilityItem::Contrast => {
                let state = if app.accessibility.is_high_contrast() { "on" } else { "off" };
                ListItem::new(format!("  High contrast: {}", state)).style(theme.base())
            }
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(" Accessibility "),
        )
        .style(theme.base())
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup, &mut app.accessibility_menu_state);
}
