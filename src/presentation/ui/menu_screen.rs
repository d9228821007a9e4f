//! Tool picker shown at startup.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::View;
use crate::domain::keybinding::Action;
use crate::presentation::theme::Theme;

struct ToolCard {
    title: &'static str,
    description: &'static str,
    features: [&'static str; 4],
    button: &'static str,
    view: View,
}

const TOOLS: [ToolCard; 2] = [
    ToolCard {
        title: "Alarm Clock",
        description: "Schedule alarms with customizable labels and sounds",
        features: [
            "Multiple alarm support",
            "Custom labels and sounds",
            "Snooze and stop controls",
            "Alarm preview functionality",
        ],
        button: "Open Alarm Clock",
        view: View::Alarm,
    },
    ToolCard {
        title: "Pomodoro Timer",
        description: "Stay focused using the proven Pomodoro technique",
        features: [
            "Custom focus/break intervals",
            "Lock screen during focus",
            "Progress tracking",
            "Distraction-free sessions",
        ],
        button: "Start Pomodoro",
        view: View::Pomodoro,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResult {
    Consumed,
    Ignored,
    Open(View),
    Quit,
}

pub struct MenuScreen {
    selected: usize,
    theme: Theme,
}

impl MenuScreen {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { selected: 0, theme }
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_action(&mut self, action: Action) -> MenuResult {
        match action {
            Action::NavigateUp => {
                self.selected = self.selected.saturating_sub(1);
                MenuResult::Consumed
            }
            Action::NavigateDown => {
                self.selected = (self.selected + 1).min(TOOLS.len() - 1);
                MenuResult::Consumed
            }
            Action::Select => MenuResult::Open(TOOLS[self.selected].view),
            Action::OpenAlarm => MenuResult::Open(View::Alarm),
            Action::OpenPomodoro => MenuResult::Open(View::Pomodoro),
            Action::Quit => MenuResult::Quit,
            _ => MenuResult::Ignored,
        }
    }

    fn render_card(&self, index: usize, area: Rect, buf: &mut Buffer) {
        let card = &TOOLS[index];
        let selected = index == self.selected;

        let (border_type, border_style) = if selected {
            (BorderType::Thick, Style::default().fg(self.theme.accent))
        } else {
            (BorderType::Rounded, self.theme.dimmed_style)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(Line::from(format!(" {} {} ", index + 1, card.title)).centered());

        let mut lines = vec![
            Line::from(Span::styled(card.title, self.theme.title_style)),
            Line::from(Span::raw(card.description)),
            Line::from(""),
        ];
        lines.extend(
            card.features
                .iter()
                .map(|feature| Line::from(Span::styled(format!("• {feature}"), self.theme.dimmed_style))),
        );
        lines.push(Line::from(""));

        let button_style = if selected {
            self.theme.selection_style
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(format!("  {}  ", card.button), button_style)));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for &MenuScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, _, cards_area, _] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(13),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled("Alarm & Pomodoro", self.theme.title_style)),
            Line::from(Span::styled(
                "Schedule alarms and stay focused with timed work sessions.",
                self.theme.dimmed_style,
            )),
        ])
        .alignment(Alignment::Center)
        .render(header_area, buf);

        let [_, left, right, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(40),
            Constraint::Max(40),
            Constraint::Fill(1),
        ])
        .spacing(2)
        .areas(cards_area);

        self.render_card(0, left, buf);
        self.render_card(1, right, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_arrows_then_select() {
        let mut menu = MenuScreen::new(Theme::default());
        assert_eq!(menu.handle_action(Action::Select), MenuResult::Open(View::Alarm));

        menu.handle_action(Action::NavigateDown);
        menu.handle_action(Action::NavigateDown);
        assert_eq!(menu.selected(), 1);
        assert_eq!(
            menu.handle_action(Action::Select),
            MenuResult::Open(View::Pomodoro)
        );

        menu.handle_action(Action::NavigateUp);
        menu.handle_action(Action::NavigateUp);
        assert_eq!(menu.selected(), 0);
    }

    #[test_case(Action::OpenAlarm, MenuResult::Open(View::Alarm))]
    #[test_case(Action::OpenPomodoro, MenuResult::Open(View::Pomodoro))]
    #[test_case(Action::Quit, MenuResult::Quit)]
    #[test_case(Action::Snooze, MenuResult::Ignored)]
    fn test_shortcuts(action: Action, expected: MenuResult) {
        let mut menu = MenuScreen::new(Theme::default());
        assert_eq!(menu.handle_action(action), expected);
    }

    #[test]
    fn test_renders_both_tools() {
        let menu = MenuScreen::new(Theme::default());
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        (&menu).render(area, &mut buf);

        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("Alarm Clock"));
        assert!(text.contains("Pomodoro Timer"));
    }
}
