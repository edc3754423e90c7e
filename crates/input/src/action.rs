use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Errors from building key bindings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

/// A high-level action produced by the keyboard.
///
/// The camera controller consumes actions, never raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Move along world up (fly mode only).
    Ascend,
    /// Move along world down (fly mode only).
    Descend,
    /// Multiply movement speed while held.
    Sprint,
    ToggleHud,
    Quit,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Ascend,
        Action::Descend,
        Action::Sprint,
        Action::ToggleHud,
        Action::Quit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::MoveForward => "move_forward",
            Action::MoveBackward => "move_backward",
            Action::StrafeLeft => "strafe_left",
            Action::StrafeRight => "strafe_right",
            Action::Ascend => "ascend",
            Action::Descend => "descend",
            Action::Sprint => "sprint",
            Action::ToggleHud => "toggle_hud",
            Action::Quit => "quit",
        }
    }

    /// Actions that act once on press instead of while held.
    pub fn is_trigger(self) -> bool {
        matches!(self, Action::ToggleHud | Action::Quit)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| InputError::UnknownAction(s.to_string()))
    }
}

/// Key name to action table.
///
/// Key names are the winit `KeyCode` variant names (`"KeyW"`, `"Space"`), so
/// the table stays independent of the windowing library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let map = [
            ("KeyW", Action::MoveForward),
            ("KeyS", Action::MoveBackward),
            ("KeyA", Action::StrafeLeft),
            ("KeyD", Action::StrafeRight),
            ("Space", Action::Ascend),
            ("ControlLeft", Action::Descend),
            ("ShiftLeft", Action::Sprint),
            ("F1", Action::ToggleHud),
            ("Escape", Action::Quit),
        ]
        .into_iter()
        .map(|(k, a)| (k.to_string(), a))
        .collect();
        Self { map }
    }
}

impl KeyBindings {
    /// Default bindings with `overrides` (key name -> action name) applied on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, InputError> {
        let mut bindings = Self::default();
        for (key, action) in overrides {
            let action: Action = action.parse()?;
            tracing::debug!("binding {key} -> {action}");
            bindings.map.insert(key.clone(), action);
        }
        Ok(bindings)
    }

    pub fn lookup(&self, key: &str) -> Option<Action> {
        self.map.get(key).copied()
    }

    /// Keys bound to `action`, in key-name order.
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        self.map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn unknown_action_name() {
        assert_eq!(
            "jump".parse::<Action>(),
            Err(InputError::UnknownAction("jump".into()))
        );
    }

    #[test]
    fn default_bindings_are_wasd() {
        let b = KeyBindings::default();
        assert_eq!(b.lookup("KeyW"), Some(Action::MoveForward));
        assert_eq!(b.lookup("KeyA"), Some(Action::StrafeLeft));
        assert_eq!(b.lookup("Escape"), Some(Action::Quit));
        assert_eq!(b.lookup("KeyQ"), None);
    }

    #[test]
    fn overrides_replace_and_extend() {
        let mut overrides = BTreeMap::new();
        overrides.insert("ArrowUp".to_string(), "move_forward".to_string());
        overrides.insert("KeyW".to_string(), "ascend".to_string());
        let b = KeyBindings::with_overrides(&overrides).unwrap();
        assert_eq!(b.lookup("KeyW"), Some(Action::Ascend));
        assert_eq!(b.keys_for(Action::MoveForward), vec!["ArrowUp"]);
    }

    #[test]
    fn overrides_reject_unknown_action() {
        let mut overrides = BTreeMap::new();
        overrides.insert("KeyJ".to_string(), "jump".to_string());
        assert!(KeyBindings::with_overrides(&overrides).is_err());
    }

    #[test]
    fn trigger_actions() {
        assert!(Action::Quit.is_trigger());
        assert!(Action::ToggleHud.is_trigger());
        assert!(!Action::MoveForward.is_trigger());
    }
}
