use crate::domain::keybinding::{Action, KeyContext, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Key bindings per context.
///
/// Every binding resolves input; only primary bindings show in the footer.
pub struct CommandRegistry {
    display_bindings: HashMap<KeyContext, Vec<(Action, KeyEvent)>>,
    input_bindings: HashMap<KeyContext, Vec<(KeyEvent, Action)>>,
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

impl Default for CommandRegistry {
    #[allow(clippy::too_many_lines)]
    fn default() -> Self {
        let mut display_bindings: HashMap<KeyContext, Vec<(Action, KeyEvent)>> = HashMap::new();
        let mut input_bindings: HashMap<KeyContext, Vec<(KeyEvent, Action)>> = HashMap::new();

        let mut register = |context: KeyContext, action: Action, key: KeyEvent, is_primary: bool| {
            if is_primary {
                display_bindings
                    .entry(context)
                    .or_default()
                    .push((action, key));
            }
            input_bindings.entry(context).or_default().push((key, action));
        };

        use KeyContext::{AlarmForm, AlarmList, AlarmSound, FocusLock, Menu, Pomodoro, Ringing};

        register(Menu, Action::NavigateUp, key(KeyCode::Up), true);
        register(Menu, Action::NavigateUp, ch('k'), false);
        register(Menu, Action::NavigateDown, key(KeyCode::Down), true);
        register(Menu, Action::NavigateDown, ch('j'), false);
        register(Menu, Action::Select, key(KeyCode::Enter), true);
        register(Menu, Action::OpenAlarm, ch('1'), true);
        register(Menu, Action::OpenPomodoro, ch('2'), true);
        register(Menu, Action::Quit, ch('q'), true);

        for context in [AlarmForm, AlarmSound, AlarmList] {
            register(context, Action::NextField, key(KeyCode::Tab), true);
            register(
                context,
                Action::PreviousField,
                KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
                false,
            );
            register(context, Action::PreviousField, key(KeyCode::BackTab), false);
        }

        register(AlarmForm, Action::SubmitAlarm, key(KeyCode::Enter), true);
        register(AlarmForm, Action::Back, key(KeyCode::Esc), true);

        register(AlarmSound, Action::PreviousSound, key(KeyCode::Left), true);
        register(AlarmSound, Action::PreviousSound, ch('h'), false);
        register(AlarmSound, Action::NextSound, key(KeyCode::Right), true);
        register(AlarmSound, Action::NextSound, ch('l'), false);
        register(AlarmSound, Action::PreviewSound, ch('p'), true);
        register(AlarmSound, Action::SubmitAlarm, key(KeyCode::Enter), true);
        register(AlarmSound, Action::Back, key(KeyCode::Esc), true);

        register(AlarmList, Action::NavigateUp, key(KeyCode::Up), true);
        register(AlarmList, Action::NavigateUp, ch('k'), false);
        register(AlarmList, Action::NavigateDown, key(KeyCode::Down), true);
        register(AlarmList, Action::NavigateDown, ch('j'), false);
        register(AlarmList, Action::ToggleAlarm, ch(' '), true);
        register(AlarmList, Action::DeleteAlarm, ch('d'), true);
        register(AlarmList, Action::DeleteAlarm, key(KeyCode::Delete), false);
        register(AlarmList, Action::PreviewSound, ch('p'), true);
        register(AlarmList, Action::Back, key(KeyCode::Esc), true);

        register(Ringing, Action::Snooze, ch('s'), true);
        register(Ringing, Action::StopAlarm, ch('x'), true);
        register(Ringing, Action::StopAlarm, key(KeyCode::Enter), false);

        register(Pomodoro, Action::StartSession, ch('s'), true);
        register(Pomodoro, Action::StartSession, key(KeyCode::Enter), false);
        register(Pomodoro, Action::PauseTimer, ch('p'), true);
        register(Pomodoro, Action::ResumeTimer, ch('r'), true);
        register(Pomodoro, Action::StopTimer, ch('x'), true);
        register(Pomodoro, Action::IncreaseFocus, ch('+'), true);
        register(
            Pomodoro,
            Action::IncreaseFocus,
            KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT),
            false,
        );
        register(Pomodoro, Action::IncreaseFocus, ch('='), false);
        register(Pomodoro, Action::DecreaseFocus, ch('-'), true);
        register(Pomodoro, Action::IncreaseBreak, ch(']'), true);
        register(Pomodoro, Action::DecreaseBreak, ch('['), true);
        register(Pomodoro, Action::ToggleSound, ch('m'), true);
        register(Pomodoro, Action::Back, key(KeyCode::Esc), true);

        register(FocusLock, Action::Unlock, ch('u'), true);

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary key for an action in a context.
    pub fn get(&self, context: KeyContext, action: Action) -> Option<KeyEvent> {
        self.display_bindings
            .get(&context)?
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, k)| *k)
    }

    pub fn find_action(&self, context: KeyContext, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .get(&context)?
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }

    /// Footer entries for a context, in registration order.
    pub fn keybinds(&self, context: KeyContext) -> Vec<Keybind> {
        self.display_bindings
            .get(&context)
            .map(|bindings| {
                bindings
                    .iter()
                    .map(|(action, key)| Keybind::new(*key, *action, action.label()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KeyContext::Menu, ch('1'), Action::OpenAlarm)]
    #[test_case(KeyContext::Menu, ch('j'), Action::NavigateDown)]
    #[test_case(KeyContext::AlarmList, ch(' '), Action::ToggleAlarm)]
    #[test_case(KeyContext::AlarmList, key(KeyCode::Delete), Action::DeleteAlarm)]
    #[test_case(KeyContext::AlarmSound, key(KeyCode::Right), Action::NextSound)]
    #[test_case(KeyContext::Ringing, key(KeyCode::Enter), Action::StopAlarm)]
    #[test_case(KeyContext::Pomodoro, KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT), Action::IncreaseFocus)]
    #[test_case(KeyContext::FocusLock, ch('u'), Action::Unlock)]
    fn test_find_action(context: KeyContext, key: KeyEvent, expected: Action) {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_action(context, key), Some(expected));
    }

    #[test]
    fn test_typing_context_leaves_letters_unbound() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_action(KeyContext::AlarmForm, ch('p')), None);
        assert_eq!(registry.find_action(KeyContext::AlarmForm, ch('7')), None);
    }

    #[test]
    fn test_lock_context_only_unlocks() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_action(KeyContext::FocusLock, ch('x')), None);
        assert_eq!(
            registry.find_action(KeyContext::FocusLock, key(KeyCode::Esc)),
            None
        );

        let keybinds = registry.keybinds(KeyContext::FocusLock);
        assert_eq!(keybinds.len(), 1);
        assert_eq!(keybinds[0].action, Action::Unlock);
    }

    #[test]
    fn test_keybinds_hide_alternates() {
        let registry = CommandRegistry::new();
        let keybinds = registry.keybinds(KeyContext::Menu);
        let downs = keybinds
            .iter()
            .filter(|k| k.action == Action::NavigateDown)
            .count();
        assert_eq!(downs, 1);
        assert_eq!(
            registry.get(KeyContext::Menu, Action::NavigateDown),
            Some(key(KeyCode::Down))
        );
    }
}
