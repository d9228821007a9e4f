//! Alarm clock screen: new-alarm form, alarm list and ringing dialog.

use std::sync::Arc;

use chrono::NaiveTime;
use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use tracing::debug;

use super::utils::centered_fixed;
use crate::application::services::{AlarmDraft, AlarmManager, RingEvent};
use crate::domain::entities::{Sound, TimeOfDay};
use crate::domain::keybinding::{Action, KeyContext, Keybind};
use crate::domain::ports::ClockPort;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::TextInput;

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmFocus {
    #[default]
    Time,
    Label,
    Sound,
    List,
}

impl AlarmFocus {
    const fn next(self) -> Self {
        match self {
            Self::Time => Self::Label,
            Self::Label => Self::Sound,
            Self::Sound => Self::List,
            Self::List => Self::Time,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Time => Self::List,
            Self::Label => Self::Time,
            Self::Sound => Self::Label,
            Self::List => Self::Sound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmKeyResult {
    Consumed,
    Ignored,
    Back,
    Added { time: TimeOfDay, label: String },
    Deleted,
    Snoozed { until: TimeOfDay },
    Stopped,
}

pub struct AlarmScreen {
    manager: AlarmManager,
    clock: Arc<dyn ClockPort>,
    now: NaiveTime,
    time_input: TextInput,
    label_input: TextInput,
    sound: Sound,
    focus: AlarmFocus,
    selected: usize,
    theme: Theme,
}

fn is_time_char(c: char) -> bool {
    c.is_ascii_digit() || c == ':'
}

impl AlarmScreen {
    #[must_use]
    pub fn new(
        manager: AlarmManager,
        clock: Arc<dyn ClockPort>,
        default_sound: Sound,
        theme: Theme,
    ) -> Self {
        let mut time_input = TextInput::new(" Time ")
            .placeholder("HH:MM")
            .max_chars(5)
            .accept(is_time_char)
            .accent(theme.accent);
        time_input.set_focused(true);

        let label_input = TextInput::new(" Label ")
            .placeholder("Wake up, Meeting, etc.")
            .max_chars(60)
            .accent(theme.accent);

        let now = clock.now();

        Self {
            manager,
            clock,
            now,
            time_input,
            label_input,
            sound: default_sound,
            focus: AlarmFocus::Time,
            selected: 0,
            theme,
        }
    }

    #[must_use]
    pub const fn manager(&self) -> &AlarmManager {
        &self.manager
    }

    #[must_use]
    pub const fn focus(&self) -> AlarmFocus {
        self.focus
    }

    #[must_use]
    pub const fn selected_sound(&self) -> Sound {
        self.sound
    }

    #[must_use]
    pub fn time_value(&self) -> &str {
        self.time_input.value()
    }

    #[must_use]
    pub fn label_value(&self) -> &str {
        self.label_input.value()
    }

    #[must_use]
    pub fn key_context(&self) -> KeyContext {
        if self.manager.is_ringing() {
            return KeyContext::Ringing;
        }
        match self.focus {
            AlarmFocus::Time | AlarmFocus::Label => KeyContext::AlarmForm,
            AlarmFocus::Sound => KeyContext::AlarmSound,
            AlarmFocus::List => KeyContext::AlarmList,
        }
    }

    /// Footer entries for the current context.
    #[must_use]
    pub fn keybinds(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        let snooze = format!("Snooze {}m", self.manager.snooze_minutes());
        registry
            .keybinds(self.key_context())
            .into_iter()
            .map(|k| {
                if k.action == Action::Snooze {
                    Keybind {
                        label: snooze.clone().into(),
                        ..k
                    }
                } else {
                    k
                }
            })
            .collect()
    }

    /// Reads the clock and lets the manager check for a due alarm.
    pub fn tick(&mut self) -> Option<RingEvent> {
        self.now = self.clock.now();
        self.manager.tick(TimeOfDay::from(self.now))
    }

    pub fn handle_key(&mut self, key: KeyEvent, action: Option<Action>) -> AlarmKeyResult {
        match action {
            Some(action) => self.handle_action(action),
            None if self.key_context() == KeyContext::AlarmForm => {
                let consumed = match self.focus {
                    AlarmFocus::Time => self.time_input.handle_key(key),
                    _ => self.label_input.handle_key(key),
                };
                if consumed {
                    AlarmKeyResult::Consumed
                } else {
                    AlarmKeyResult::Ignored
                }
            }
            None => AlarmKeyResult::Ignored,
        }
    }

    fn handle_action(&mut self, action: Action) -> AlarmKeyResult {
        match action {
            Action::Back => return AlarmKeyResult::Back,
            Action::NextField => self.set_focus(self.next_focus(AlarmFocus::next)),
            Action::PreviousField => self.set_focus(self.next_focus(AlarmFocus::previous)),
            Action::SubmitAlarm => return self.submit(),
            Action::NextSound => self.sound = self.sound.next_alarm_sound(),
            Action::PreviousSound => self.sound = self.sound.previous_alarm_sound(),
            Action::PreviewSound => {
                let sound = match self.focus {
                    AlarmFocus::List => match self.selected_alarm_sound() {
                        Some(sound) => sound,
                        None => return AlarmKeyResult::Ignored,
                    },
                    _ => self.sound,
                };
                self.manager.preview(sound);
            }
            Action::NavigateUp => self.selected = self.selected.saturating_sub(1),
            Action::NavigateDown => {
                let last = self.manager.alarms().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
            }
            Action::ToggleAlarm => {
                let Some(id) = self.manager.alarms().get(self.selected).map(|a| a.id()) else {
                    return AlarmKeyResult::Ignored;
                };
                self.manager.toggle(id);
            }
            Action::DeleteAlarm => return self.delete_selected(),
            Action::Snooze => {
                let now = TimeOfDay::from(self.clock.now());
                return match self.manager.snooze(now).and_then(|id| self.manager.get(id)) {
                    Some(alarm) => AlarmKeyResult::Snoozed {
                        until: alarm.time(),
                    },
                    None => AlarmKeyResult::Ignored,
                };
            }
            Action::StopAlarm => {
                return if self.manager.stop() {
                    AlarmKeyResult::Stopped
                } else {
                    AlarmKeyResult::Ignored
                };
            }
            _ => return AlarmKeyResult::Ignored,
        }
        AlarmKeyResult::Consumed
    }

    fn next_focus(&self, step: fn(AlarmFocus) -> AlarmFocus) -> AlarmFocus {
        let next = step(self.focus);
        if next == AlarmFocus::List && self.manager.alarms().is_empty() {
            step(next)
        } else {
            next
        }
    }

    fn set_focus(&mut self, focus: AlarmFocus) {
        self.focus = focus;
        self.time_input.set_focused(focus == AlarmFocus::Time);
        self.label_input.set_focused(focus == AlarmFocus::Label);
    }

    fn submit(&mut self) -> AlarmKeyResult {
        let draft = AlarmDraft::new(
            self.time_input.value(),
            self.label_input.value(),
            self.sound,
        );
        match self.manager.add(draft) {
            Ok(id) => {
                let Some(alarm) = self.manager.get(id) else {
                    return AlarmKeyResult::Consumed;
                };
                let result = AlarmKeyResult::Added {
                    time: alarm.time(),
                    label: alarm.label().to_string(),
                };
                self.time_input.clear();
                self.label_input.clear();
                self.set_focus(AlarmFocus::Time);
                result
            }
            Err(e) => {
                debug!(error = %e, "Alarm form rejected");
                AlarmKeyResult::Consumed
            }
        }
    }

    fn delete_selected(&mut self) -> AlarmKeyResult {
        let Some(id) = self.manager.alarms().get(self.selected).map(|a| a.id()) else {
            return AlarmKeyResult::Ignored;
        };
        self.manager.delete(id);

        let len = self.manager.alarms().len();
        if len == 0 {
            self.selected = 0;
            self.set_focus(AlarmFocus::Time);
        } else {
            self.selected = self.selected.min(len - 1);
        }
        AlarmKeyResult::Deleted
    }

    fn selected_alarm_sound(&self) -> Option<Sound> {
        self.manager.alarms().get(self.selected).map(|a| a.sound())
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let [title_area, clock_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).areas(area);

        Paragraph::new(Line::from(Span::styled("Alarm Clock", self.theme.title_style)))
            .render(title_area, buf);
        Paragraph::new(self.now.format("%H:%M:%S").to_string())
            .style(self.theme.title_style)
            .alignment(Alignment::Right)
            .render(clock_area, buf);
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.dimmed_style)
            .title(" + Add New Alarm ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [time_area, label_area, sound_area] = Layout::horizontal([
            Constraint::Length(12),
            Constraint::Fill(1),
            Constraint::Length(24),
        ])
        .spacing(1)
        .areas(inner);

        (&self.time_input).render(time_area, buf);
        (&self.label_input).render(label_area, buf);

        let sound_focused = self.focus == AlarmFocus::Sound;
        let border_style = if sound_focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(ratatui::style::Color::Gray)
        };
        let sound_style = if sound_focused {
            self.theme.selection_style
        } else {
            self.theme.base_style
        };
        Paragraph::new(Line::from(vec![
            Span::raw("◀ "),
            Span::styled(self.sound.display_name(), sound_style),
            Span::raw(" ▶"),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Alarm Sound "),
        )
        .render(sound_area, buf);
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let alarms = self.manager.alarms();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focus == AlarmFocus::List {
                Style::default().fg(self.theme.accent)
            } else {
                self.theme.dimmed_style
            })
            .title(format!(" Alarms ({}) ", alarms.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if alarms.is_empty() {
            let [_, message_area, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(inner);
            Paragraph::new("No alarms set. Add your first alarm above.")
                .style(self.theme.dimmed_style)
                .alignment(Alignment::Center)
                .render(message_area, buf);
            return;
        }

        let visible = usize::from(inner.height).max(1);
        let offset = self.selected.saturating_sub(visible - 1);
        let ringing = self.manager.ringing_id();

        let lines: Vec<Line> = alarms
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, alarm)| {
                let highlighted = self.focus == AlarmFocus::List && i == self.selected;
                let time_style = if alarm.is_active() {
                    self.theme.title_style
                } else {
                    self.theme.dimmed_style
                };
                let status = if ringing == Some(alarm.id()) {
                    Span::styled("Ringing", self.theme.alert_style)
                } else if alarm.is_active() {
                    Span::styled("Active", self.theme.active_style)
                } else {
                    Span::styled("Inactive", self.theme.dimmed_style)
                };

                let line = Line::from(vec![
                    Span::raw(if highlighted { "▶ " } else { "  " }),
                    Span::styled(alarm.time().to_string(), time_style),
                    Span::raw("  "),
                    Span::styled(alarm.label(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    status,
                    Span::styled(
                        format!(" • {}", alarm.sound().display_name()),
                        self.theme.dimmed_style,
                    ),
                ]);
                if highlighted {
                    line.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_ringing(&self, area: Rect, buf: &mut Buffer) {
        let Some(alarm) = self.manager.ringing_alarm() else {
            return;
        };
        let dialog = centered_fixed(50, 9, area);
        Clear.render(dialog, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(self.theme.alert_style);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Alarm Ringing!", self.theme.alert_style)),
            Line::from(Span::styled(
                alarm.time().to_string(),
                self.theme.title_style,
            )),
            Line::from(alarm.label()),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!(" [s] Snooze ({} min) ", self.manager.snooze_minutes()),
                    self.theme.dimmed_style.add_modifier(Modifier::REVERSED),
                ),
                Span::raw("   "),
                Span::styled(" [x] Stop ", self.theme.selection_style),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .render(dialog, buf);
    }
}

impl Widget for &AlarmScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, form_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .areas(area);

        self.render_header(header_area, buf);
        self.render_form(form_area, buf);
        self.render_list(list_area, buf);

        if self.manager.is_ringing() {
            self.render_ringing(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::AudioPort;
    use crate::domain::ports::mocks::{ManualClock, MockAudioPort};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn quiet_audio() -> Arc<dyn AudioPort> {
        let mut audio = MockAudioPort::new();
        audio.expect_play_looped().returning(|_| Ok(()));
        audio.expect_stop_looped().return_const(());
        audio.expect_preview().returning(|_| Ok(()));
        Arc::new(audio)
    }

    fn screen_at(clock: Arc<ManualClock>) -> AlarmScreen {
        AlarmScreen::new(
            AlarmManager::new(quiet_audio()),
            clock,
            Sound::ClassicAlarm,
            Theme::default(),
        )
    }

    fn press(screen: &mut AlarmScreen, registry: &CommandRegistry, code: KeyCode) -> AlarmKeyResult {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let action = registry.find_action(screen.key_context(), key);
        screen.handle_key(key, action)
    }

    fn type_text(screen: &mut AlarmScreen, registry: &CommandRegistry, text: &str) {
        for c in text.chars() {
            press(screen, registry, KeyCode::Char(c));
        }
    }

    fn add_alarm(screen: &mut AlarmScreen, registry: &CommandRegistry, time: &str, label: &str) -> AlarmKeyResult {
        type_text(screen, registry, time);
        press(screen, registry, KeyCode::Tab);
        type_text(screen, registry, label);
        press(screen, registry, KeyCode::Enter)
    }

    #[test]
    fn test_add_clears_form_and_keeps_sound() {
        let registry = CommandRegistry::new();
        let mut screen = screen_at(Arc::new(ManualClock::at(6, 0, 0)));

        press(&mut screen, &registry, KeyCode::Tab);
        press(&mut screen, &registry, KeyCode::Tab);
        press(&mut screen, &registry, KeyCode::Right);
        assert_eq!(screen.selected_sound(), Sound::GentleChime);
        press(&mut screen, &registry, KeyCode::BackTab);
        press(&mut screen, &registry, KeyCode::BackTab);

        let result = add_alarm(&mut screen, &registry, "07:00", "Wake up");

        assert_eq!(
            result,
            AlarmKeyResult::Added {
                time: TimeOfDay::new(7, 0).unwrap(),
                label: "Wake up".to_string(),
            }
        );
        assert_eq!(screen.manager().alarms().len(), 1);
        assert_eq!(screen.manager().alarms()[0].sound(), Sound::GentleChime);
        assert!(screen.time_value().is_empty());
        assert!(screen.label_value().is_empty());
        assert_eq!(screen.selected_sound(), Sound::GentleChime);
        assert_eq!(screen.focus(), AlarmFocus::Time);
    }

    #[test]
    fn test_incomplete_form_is_ignored() {
        let registry = CommandRegistry::new();
        let mut screen = screen_at(Arc::new(ManualClock::at(6, 0, 0)));

        type_text(&mut screen, &registry, "07:00");
        assert_eq!(press(&mut screen, &registry, KeyCode::Enter), AlarmKeyResult::Consumed);
        assert!(screen.manager().alarms().is_empty());
        assert_eq!(screen.time_value(), "07:00");
    }

    #[test]
    fn test_letters_reach_label_field() {
        let registry = CommandRegistry::new();
        let mut screen = screen_at(Arc::new(ManualClock::at(6, 0, 0)));

        press(&mut screen, &registry, KeyCode::Tab);
        type_text(&mut screen, &registry, "pd sx");
        assert_eq!(screen.label_value(), "pd sx");
        assert!(screen.manager().alarms().is_empty());
    }

    #[test]
    fn test_list_toggle_and_delete() {
        let registry = CommandRegistry::new();
        let mut screen = screen_at(Arc::new(ManualClock::at(6, 0, 0)));
        add_alarm(&mut screen, &registry, "07:00", "One");
        add_alarm(&mut screen, &registry, "08:00", "Two");

        press(&mut screen, &registry, KeyCode::BackTab);
        assert_eq!(screen.focus(), AlarmFocus::List);

        press(&mut screen, &registry, KeyCode::Down);
        press(&mut screen, &registry, KeyCode::Char(' '));
        assert!(screen.manager().alarms()[0].is_active());
        assert!(!screen.manager().alarms()[1].is_active());

        assert_eq!(press(&mut screen, &registry, KeyCode::Char('d')), AlarmKeyResult::Deleted);
        assert_eq!(screen.manager().alarms().len(), 1);
        assert_eq!(screen.manager().alarms()[0].label(), "One");

        press(&mut screen, &registry, KeyCode::Delete);
        assert!(screen.manager().alarms().is_empty());
        assert_eq!(screen.focus(), AlarmFocus::Time);
    }

    #[test]
    fn test_ring_then_snooze() {
        let registry = CommandRegistry::new();
        let clock = Arc::new(ManualClock::at(6, 59, 58));
        let mut screen = screen_at(clock.clone());
        add_alarm(&mut screen, &registry, "07:00", "Wake up");

        assert!(screen.tick().is_none());
        clock.set(7, 0, 0);
        let event = screen.tick().unwrap();
        assert_eq!(event.label, "Wake up");
        assert_eq!(screen.key_context(), KeyContext::Ringing);

        // Form keys are inert while the dialog is up.
        assert_eq!(press(&mut screen, &registry, KeyCode::Char('7')), AlarmKeyResult::Ignored);

        let result = press(&mut screen, &registry, KeyCode::Char('s'));
        assert_eq!(
            result,
            AlarmKeyResult::Snoozed {
                until: TimeOfDay::new(7, 5).unwrap()
            }
        );
        assert!(!screen.manager().is_ringing());
        assert_eq!(screen.manager().alarms()[1].label(), "Wake up (Snoozed)");
    }

    #[test]
    fn test_stop_with_enter() {
        let registry = CommandRegistry::new();
        let clock = Arc::new(ManualClock::at(7, 0, 0));
        let mut screen = screen_at(clock);
        add_alarm(&mut screen, &registry, "7:00", "Standup");

        screen.tick();
        assert_eq!(press(&mut screen, &registry, KeyCode::Enter), AlarmKeyResult::Stopped);
        assert!(screen.tick().is_none());
        assert_eq!(screen.manager().alarms().len(), 1);
    }

    #[test]
    fn test_snooze_label_follows_config() {
        let registry = CommandRegistry::new();
        let clock = Arc::new(ManualClock::at(7, 0, 0));
        let mut screen = AlarmScreen::new(
            AlarmManager::new(quiet_audio()).with_snooze_minutes(10),
            clock,
            Sound::ClassicAlarm,
            Theme::default(),
        );
        add_alarm(&mut screen, &registry, "07:00", "Tea");
        screen.tick();

        let keybinds = screen.keybinds(&registry);
        let snooze = keybinds.iter().find(|k| k.action == Action::Snooze).unwrap();
        assert_eq!(snooze.label, "Snooze 10m");
    }

    #[test]
    fn test_renders_empty_placeholder() {
        let screen = screen_at(Arc::new(ManualClock::at(9, 30, 15)));
        let area = Rect::new(0, 0, 90, 20);
        let mut buf = Buffer::empty(area);
        (&screen).render(area, &mut buf);

        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("No alarms set. Add your first alarm above."));
        assert!(text.contains("09:30:15"));
    }
}
