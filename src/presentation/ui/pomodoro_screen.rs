//! Pomodoro timer screen and its focus-lock view.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Widget},
};
use tracing::debug;

use super::utils::centered_fixed;
use crate::application::services::PomodoroService;
use crate::domain::errors::SettingsError;
use crate::domain::keybinding::{Action, KeyContext, Keybind};
use crate::domain::pomodoro::{PomodoroTimer, TickOutcome, TimerState};
use crate::presentation::commands::CommandRegistry;
use crate::presentation::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroKeyResult {
    Consumed,
    Ignored,
    Back,
    Started,
    Stopped,
}

pub struct PomodoroScreen {
    service: PomodoroService,
    theme: Theme,
}

impl PomodoroScreen {
    #[must_use]
    pub fn new(service: PomodoroService, theme: Theme) -> Self {
        Self { service, theme }
    }

    #[must_use]
    pub const fn timer(&self) -> &PomodoroTimer {
        self.service.timer()
    }

    #[must_use]
    pub fn key_context(&self) -> KeyContext {
        if self.timer().is_lock_view_active() {
            KeyContext::FocusLock
        } else {
            KeyContext::Pomodoro
        }
    }

    fn is_available(&self, action: Action) -> bool {
        let timer = self.timer();
        let state = timer.state();
        match action {
            Action::StartSession
            | Action::IncreaseFocus
            | Action::DecreaseFocus
            | Action::IncreaseBreak
            | Action::DecreaseBreak => state == TimerState::Idle,
            Action::PauseTimer => state.is_running(),
            Action::ResumeTimer => {
                matches!(state, TimerState::Paused(_)) && !timer.remaining().is_zero()
            }
            Action::StopTimer => state != TimerState::Idle,
            _ => true,
        }
    }

    /// Footer entries for actions that apply in the current state.
    #[must_use]
    pub fn keybinds(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        registry
            .keybinds(self.key_context())
            .into_iter()
            .filter(|k| self.is_available(k.action))
            .collect()
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.service.tick()
    }

    pub fn handle_action(&mut self, action: Action) -> PomodoroKeyResult {
        let changed = match action {
            Action::Back => return PomodoroKeyResult::Back,
            Action::StartSession => {
                return if self.service.start() {
                    PomodoroKeyResult::Started
                } else {
                    PomodoroKeyResult::Ignored
                };
            }
            Action::StopTimer => {
                return if self.service.stop() {
                    PomodoroKeyResult::Stopped
                } else {
                    PomodoroKeyResult::Ignored
                };
            }
            Action::PauseTimer => self.service.pause(),
            Action::ResumeTimer => self.service.resume(),
            Action::Unlock => {
                self.service.unlock();
                true
            }
            Action::ToggleSound => {
                self.service.toggle_sound();
                true
            }
            Action::IncreaseFocus => self.adjust(action, |s| s.adjust_focus(1)),
            Action::DecreaseFocus => self.adjust(action, |s| s.adjust_focus(-1)),
            Action::IncreaseBreak => self.adjust(action, |s| s.adjust_break(1)),
            Action::DecreaseBreak => self.adjust(action, |s| s.adjust_break(-1)),
            _ => false,
        };

        if changed {
            PomodoroKeyResult::Consumed
        } else {
            PomodoroKeyResult::Ignored
        }
    }

    fn adjust(
        &mut self,
        action: Action,
        apply: impl FnOnce(&mut PomodoroService) -> Result<u32, SettingsError>,
    ) -> bool {
        match apply(&mut self.service) {
            Ok(minutes) => {
                debug!(?action, minutes, "Pomodoro setting changed");
                true
            }
            Err(e) => {
                debug!(?action, error = %e, "Pomodoro setting rejected");
                false
            }
        }
    }

    fn state_title(&self) -> &'static str {
        match self.timer().state() {
            TimerState::Idle => "Ready to Start",
            TimerState::Focus => "Focus Session",
            TimerState::Break => "Break Time",
            TimerState::Paused(_) => "Paused",
        }
    }

    fn gauge(&self) -> Gauge<'_> {
        let percent = self.timer().progress_percent();
        Gauge::default()
            .gauge_style(Style::default().fg(self.theme.accent))
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{percent:.0}%"))
    }

    fn render_lock(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        let content = centered_fixed(50, 11, inner);
        let [title_area, subtitle_area, _, time_area, _, gauge_area, _, session_area, _, unlock_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(content);

        let timer = self.timer();
        Paragraph::new("Focus Mode")
            .style(self.theme.title_style)
            .alignment(Alignment::Center)
            .render(title_area, buf);
        Paragraph::new("Stay focused! Screen is locked during your session.")
            .style(self.theme.dimmed_style)
            .alignment(Alignment::Center)
            .render(subtitle_area, buf);
        Paragraph::new(timer.remaining().to_string())
            .style(self.theme.title_style)
            .alignment(Alignment::Center)
            .render(time_area, buf);
        self.gauge().render(gauge_area, buf);
        Paragraph::new(format!(
            "Session {} • Focus Time",
            timer.completed_sessions() + 1
        ))
        .style(self.theme.dimmed_style)
        .alignment(Alignment::Center)
        .render(session_area, buf);
        Paragraph::new(Line::from(vec![
            Span::styled(" u ", self.theme.selection_style),
            Span::styled(" Unlock (Not Recommended)", self.theme.dimmed_style),
        ]))
        .alignment(Alignment::Center)
        .render(unlock_area, buf);
    }

    fn render_timer(&self, area: Rect, buf: &mut Buffer) {
        let timer = self.timer();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.dimmed_style)
            .title(Line::from(format!(" {} ", self.state_title())).centered());
        let inner = block.inner(area);
        block.render(area, buf);

        let [_, time_area, _, gauge_area, _, controls_area, _, count_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        Paragraph::new(Span::styled(
            timer.remaining().to_string(),
            self.theme.title_style.add_modifier(Modifier::UNDERLINED),
        ))
        .alignment(Alignment::Center)
        .render(time_area, buf);

        if timer.state().is_running() {
            let [_, bar, _] = Layout::horizontal([
                Constraint::Length(2),
                Constraint::Fill(1),
                Constraint::Length(2),
            ])
            .areas(gauge_area);
            self.gauge().render(bar, buf);
        }

        let controls: Vec<&str> = match timer.state() {
            TimerState::Idle => vec!["[s] Start Focus Session"],
            TimerState::Focus | TimerState::Break => vec!["[p] Pause", "[x] Stop"],
            TimerState::Paused(_) => {
                if timer.remaining().is_zero() {
                    vec!["[x] Stop"]
                } else {
                    vec!["[r] Resume", "[x] Stop"]
                }
            }
        };
        Paragraph::new(controls.join("   "))
            .alignment(Alignment::Center)
            .render(controls_area, buf);

        Paragraph::new(format!("Completed Sessions: {}", timer.completed_sessions()))
            .style(self.theme.dimmed_style)
            .alignment(Alignment::Center)
            .render(count_area, buf);
    }

    fn render_side(&self, area: Rect, buf: &mut Buffer) {
        let timer = self.timer();
        let settings = timer.settings();
        let editable = timer.state() == TimerState::Idle;
        let setting_style = if editable {
            self.theme.base_style
        } else {
            self.theme.dimmed_style
        };
        let heading = self.theme.title_style;
        let sounds = if settings.sound_enabled {
            "Enabled"
        } else {
            "Disabled"
        };

        let lines = vec![
            Line::from(Span::styled("Timer Settings", heading)),
            Line::from(Span::styled(
                format!("Focus Duration: {} min   [-/+]", settings.focus_minutes),
                setting_style,
            )),
            Line::from(Span::styled(
                format!("Break Duration: {} min   [[/]]", settings.break_minutes),
                setting_style,
            )),
            Line::from(format!(
                "Notification Sounds: {}   [m]",
                if settings.sound_enabled { "On" } else { "Off" }
            )),
            Line::from(""),
            Line::from(Span::styled("How it works", heading)),
            Line::from(format!("• Focus for {} minutes", settings.focus_minutes)),
            Line::from(format!("• Take a {} minute break", settings.break_minutes)),
            Line::from("• Screen locks during focus time"),
            Line::from("• Audio notifications when sessions end"),
            Line::from(""),
            Line::from(Span::styled("Session Stats", heading)),
            Line::from(format!("Total Sessions: {}", timer.completed_sessions())),
            Line::from(format!("Focus Time: {} minutes", timer.focus_minutes_total())),
            Line::from(format!("Current State: {}", timer.state().description())),
            Line::from(format!("Sounds: {sounds}")),
        ];

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(self.theme.dimmed_style),
            )
            .render(area, buf);
    }
}

impl Widget for &PomodoroScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.timer().is_lock_view_active() {
            self.render_lock(area, buf);
            return;
        }

        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        Paragraph::new(Span::styled("Pomodoro Timer", self.theme.title_style))
            .render(header_area, buf);

        let [timer_area, side_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .spacing(1)
                .areas(body_area);
        self.render_timer(timer_area, buf);
        self.render_side(side_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAudioPort;
    use crate::domain::pomodoro::{PomodoroSettings, ResumeBehavior};
    use std::sync::Arc;

    fn screen(settings: PomodoroSettings) -> PomodoroScreen {
        let mut audio = MockAudioPort::new();
        audio.expect_play_once().returning(|_| Ok(()));
        let service = PomodoroService::new(settings, ResumeBehavior::RestorePhase, Arc::new(audio));
        PomodoroScreen::new(service, Theme::default())
    }

    fn rendered(screen: &PomodoroScreen) -> String {
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn test_start_enters_lock_view() {
        let mut screen = screen(PomodoroSettings::default());
        assert_eq!(screen.key_context(), KeyContext::Pomodoro);

        assert_eq!(
            screen.handle_action(Action::StartSession),
            PomodoroKeyResult::Started
        );
        assert_eq!(screen.key_context(), KeyContext::FocusLock);

        let text = rendered(&screen);
        assert!(text.contains("Focus Mode"));
        assert!(text.contains("Session 1 • Focus Time"));
        assert!(!text.contains("Timer Settings"));
    }

    #[test]
    fn test_unlock_keeps_counting() {
        let mut screen = screen(PomodoroSettings::default());
        screen.handle_action(Action::StartSession);
        screen.tick();

        screen.handle_action(Action::Unlock);
        assert_eq!(screen.key_context(), KeyContext::Pomodoro);
        assert_eq!(screen.timer().state(), TimerState::Focus);
        assert_eq!(screen.timer().remaining().to_string(), "24:59");

        let text = rendered(&screen);
        assert!(text.contains("Focus Session"));
        assert!(text.contains("24:59"));
    }

    #[test]
    fn test_settings_only_editable_when_idle() {
        let mut screen = screen(PomodoroSettings::default());
        assert_eq!(
            screen.handle_action(Action::IncreaseFocus),
            PomodoroKeyResult::Consumed
        );
        assert_eq!(screen.timer().settings().focus_minutes, 26);
        assert_eq!(screen.timer().remaining().to_string(), "26:00");

        screen.handle_action(Action::StartSession);
        screen.handle_action(Action::Unlock);
        assert_eq!(
            screen.handle_action(Action::DecreaseBreak),
            PomodoroKeyResult::Ignored
        );
        assert_eq!(screen.timer().settings().break_minutes, 5);
    }

    #[test]
    fn test_footer_follows_state() {
        let registry = CommandRegistry::new();
        let mut screen = screen(PomodoroSettings::default());

        let idle: Vec<_> = screen.keybinds(&registry).iter().map(|k| k.action).collect();
        assert!(idle.contains(&Action::StartSession));
        assert!(!idle.contains(&Action::PauseTimer));

        screen.handle_action(Action::StartSession);
        let locked: Vec<_> = screen.keybinds(&registry).iter().map(|k| k.action).collect();
        assert_eq!(locked, vec![Action::Unlock]);

        screen.handle_action(Action::Unlock);
        screen.handle_action(Action::PauseTimer);
        let paused: Vec<_> = screen.keybinds(&registry).iter().map(|k| k.action).collect();
        assert!(paused.contains(&Action::ResumeTimer));
        assert!(paused.contains(&Action::StopTimer));
        assert!(!paused.contains(&Action::StartSession));
    }

    #[test]
    fn test_stats_after_completed_focus() {
        let mut screen = screen(PomodoroSettings::clamped(1, 1, true));
        screen.handle_action(Action::StartSession);
        for _ in 0..60 {
            screen.tick();
        }

        assert_eq!(screen.key_context(), KeyContext::Pomodoro);
        let text = rendered(&screen);
        assert!(text.contains("Break Time"));
        assert!(text.contains("Total Sessions: 1"));
        assert!(text.contains("Focus Time: 1 minutes"));
    }

    #[test]
    fn test_stop_from_idle_is_ignored() {
        let mut screen = screen(PomodoroSettings::default());
        assert_eq!(
            screen.handle_action(Action::StopTimer),
            PomodoroKeyResult::Ignored
        );
        assert_eq!(screen.handle_action(Action::Back), PomodoroKeyResult::Back);
    }
}
