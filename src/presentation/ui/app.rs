//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use super::{
    AlarmKeyResult, AlarmScreen, MenuResult, MenuScreen, NotificationPopup, PomodoroKeyResult,
    PomodoroScreen, View,
};
use crate::application::services::{AlarmManager, NotificationManager, PomodoroService};
use crate::domain::entities::Sound;
use crate::domain::keybinding::{KeyContext, Keybind};
use crate::domain::ports::{AudioPort, ClockPort, NotificationPort};
use crate::domain::{PomodoroSettings, ResumeBehavior, TickOutcome};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::ticker::{TICK_PERIOD, Tick, Ticker};
use crate::presentation::commands::CommandRegistry;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{FooterBar, FooterBarStyle};

const UI_REFRESH_RATE: Duration = Duration::from_millis(250);

/// Host adapters the screens talk to.
pub struct AppPorts {
    pub audio: Arc<dyn AudioPort>,
    pub clock: Arc<dyn ClockPort>,
    pub desktop: Arc<dyn NotificationPort>,
}

enum CurrentScreen {
    Menu(MenuScreen),
    Alarm(Box<AlarmScreen>),
    Pomodoro(Box<PomodoroScreen>),
}

impl CurrentScreen {
    const fn view(&self) -> View {
        match self {
            Self::Menu(_) => View::Menu,
            Self::Alarm(_) => View::Alarm,
            Self::Pomodoro(_) => View::Pomodoro,
        }
    }
}

pub struct App {
    running: bool,
    screen: CurrentScreen,
    registry: CommandRegistry,
    theme: Theme,
    notifications: NotificationManager,
    audio: Arc<dyn AudioPort>,
    clock: Arc<dyn ClockPort>,
    desktop: Arc<dyn NotificationPort>,
    default_sound: Sound,
    snooze_minutes: u32,
    pomodoro_settings: PomodoroSettings,
    resume_behavior: ResumeBehavior,
    ticker: Option<Ticker>,
    next_generation: u64,
    tick_tx: mpsc::UnboundedSender<Tick>,
    tick_rx: mpsc::UnboundedReceiver<Tick>,
}

impl App {
    /// Creates the app on the configured start view.
    ///
    /// Must be called inside a tokio runtime when the start view has a ticker.
    #[must_use]
    pub fn new(config: &AppConfig, ports: AppPorts) -> Self {
        let theme = Theme::new(&config.theme.accent_color);
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            running: true,
            screen: CurrentScreen::Menu(MenuScreen::new(theme)),
            registry: CommandRegistry::new(),
            theme,
            notifications: NotificationManager::new(
                Duration::from_secs(config.ui.notification_duration),
                config.notifications.internal_notifications,
            ),
            audio: ports.audio,
            clock: ports.clock,
            desktop: ports.desktop,
            default_sound: config.alarm.default_sound,
            snooze_minutes: config.alarm.snooze_minutes,
            pomodoro_settings: config.pomodoro.settings(),
            resume_behavior: config.pomodoro.resume_behavior,
            ticker: None,
            next_generation: 0,
            tick_tx,
            tick_rx,
        };

        let start = View::from(config.ui.start_in);
        if start != View::Menu {
            app.navigate(start);
        }
        app
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut ui_interval = interval(UI_REFRESH_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(tick) = self.tick_rx.recv() => {
                    self.handle_tick(tick);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(&event) == EventResult::Exit {
                        self.running = false;
                    }
                    if EventHandler::needs_redraw(&event) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                _ = ui_interval.tick() => {
                    if self.notifications.has_notifications() {
                        self.notifications.tick();
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        self.teardown_screen();
        info!("Application exiting normally");
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: &Event) -> EventResult {
        match EventHandler::key_press(event) {
            Some(key) => self.handle_key(key),
            None => EventResult::Continue,
        }
    }

    /// Cancels the current screen's ticker and silences anything it started.
    fn teardown_screen(&mut self) {
        self.ticker = None;
        self.audio.stop_all();
    }

    fn navigate(&mut self, view: View) {
        self.teardown_screen();

        self.screen = match view {
            View::Menu => CurrentScreen::Menu(MenuScreen::new(self.theme)),
            View::Alarm => {
                let manager = AlarmManager::new(self.audio.clone())
                    .with_snooze_minutes(self.snooze_minutes);
                CurrentScreen::Alarm(Box::new(AlarmScreen::new(
                    manager,
                    self.clock.clone(),
                    self.default_sound,
                    self.theme,
                )))
            }
            View::Pomodoro => {
                let service = PomodoroService::new(
                    self.pomodoro_settings,
                    self.resume_behavior,
                    self.audio.clone(),
                );
                CurrentScreen::Pomodoro(Box::new(PomodoroScreen::new(service, self.theme)))
            }
        };

        if view != View::Menu {
            self.next_generation += 1;
            self.ticker = Some(Ticker::start(
                self.next_generation,
                TICK_PERIOD,
                self.tick_tx.clone(),
            ));
        }

        info!(?view, "Switched view");
    }

    /// Applies a tick to the live screen. Returns false for a stale tick.
    fn handle_tick(&mut self, tick: Tick) -> bool {
        if !self.ticker.as_ref().is_some_and(|t| t.owns(tick)) {
            debug!(generation = tick.generation, "Dropping stale tick");
            return false;
        }

        match &mut self.screen {
            CurrentScreen::Menu(_) => {}
            CurrentScreen::Alarm(screen) => {
                if let Some(event) = screen.tick() {
                    let body = format!("{} {}", event.time, event.label);
                    self.notifications.warn("Alarm ringing!", body.clone());
                    self.desktop.send("Alarm ringing!", &body, event.sound);
                }
            }
            CurrentScreen::Pomodoro(screen) => match screen.tick() {
                TickOutcome::FocusCompleted { completed_sessions } => {
                    let body = format!(
                        "Session {completed_sessions} done. Take a {} minute break.",
                        screen.timer().settings().break_minutes
                    );
                    self.notifications.success("Focus session complete", body.clone());
                    self.desktop
                        .send("Focus session complete", &body, Sound::Notification);
                }
                TickOutcome::BreakCompleted => {
                    let body = "Ready for the next focus session.";
                    self.notifications.info("Break over", body);
                    self.desktop.send("Break over", body, Sound::Notification);
                }
                TickOutcome::Stopped | TickOutcome::Counted => {}
            },
        }
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        match &mut self.screen {
            CurrentScreen::Menu(menu) => {
                let Some(action) = self.registry.find_action(KeyContext::Menu, key) else {
                    return EventResult::Continue;
                };
                match menu.handle_action(action) {
                    MenuResult::Open(view) => self.navigate(view),
                    MenuResult::Quit => return EventResult::Exit,
                    MenuResult::Consumed | MenuResult::Ignored => {}
                }
            }
            CurrentScreen::Alarm(screen) => {
                let action = self.registry.find_action(screen.key_context(), key);
                match screen.handle_key(key, action) {
                    AlarmKeyResult::Back => self.navigate(View::Menu),
                    AlarmKeyResult::Added { time, label } => {
                        self.notifications.success("Alarm added", format!("{time} {label}"));
                    }
                    AlarmKeyResult::Snoozed { until } => {
                        self.notifications
                            .info("Alarm snoozed", format!("Rings again at {until}"));
                    }
                    AlarmKeyResult::Deleted => {
                        self.notifications.info("Alarm deleted", "Removed from the list");
                    }
                    AlarmKeyResult::Stopped
                    | AlarmKeyResult::Consumed
                    | AlarmKeyResult::Ignored => {}
                }
            }
            CurrentScreen::Pomodoro(screen) => {
                let Some(action) = self.registry.find_action(screen.key_context(), key) else {
                    return EventResult::Continue;
                };
                match screen.handle_action(action) {
                    PomodoroKeyResult::Back => self.navigate(View::Menu),
                    PomodoroKeyResult::Stopped => {
                        self.notifications.info("Session stopped", "Timer reset");
                    }
                    PomodoroKeyResult::Started
                    | PomodoroKeyResult::Consumed
                    | PomodoroKeyResult::Ignored => {}
                }
            }
        }

        EventResult::Continue
    }

    fn footer(&self) -> (KeyContext, Vec<Keybind>) {
        match &self.screen {
            CurrentScreen::Menu(_) => (KeyContext::Menu, self.registry.keybinds(KeyContext::Menu)),
            CurrentScreen::Alarm(screen) => (screen.key_context(), screen.keybinds(&self.registry)),
            CurrentScreen::Pomodoro(screen) => {
                (screen.key_context(), screen.keybinds(&self.registry))
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let [body_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        match &self.screen {
            CurrentScreen::Menu(screen) => frame.render_widget(screen, body_area),
            CurrentScreen::Alarm(screen) => frame.render_widget(screen.as_ref(), body_area),
            CurrentScreen::Pomodoro(screen) => frame.render_widget(screen.as_ref(), body_area),
        }

        let (context, keybinds) = self.footer();
        let version = format!("{} v{}", crate::NAME, crate::VERSION);
        frame.render_widget(
            FooterBar::new(&keybinds)
                .context(context)
                .right_info(Some(&version))
                .style(FooterBarStyle::from_theme(&self.theme)),
            footer_area,
        );

        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(NotificationPopup::new(notification, &self.theme), body_area);
        }
    }
}
