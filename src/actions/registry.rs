//! Action registry.
//!
//! Ordered, name-unique storage for actions. The engine draws one action per
//! participant turn uniformly from whatever is registered at that moment.

use crate::core::{ActionError, GameRng};

use super::action::Action;

/// Registry of actions in registration order.
///
/// ## Example
///
/// ```
/// use battle_royale::actions::{Action, ActionRegistry};
///
/// let mut registry = ActionRegistry::new();
/// registry.register(Action::new("nap", "Participant naps", |_, _| Ok(()))).unwrap();
///
/// // Names are unique.
/// let again = Action::new("nap", "Another nap", |_, _| Ok(()));
/// assert!(registry.register(again).is_err());
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: Vec<Action>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. Fails without mutating on an empty or taken name.
    pub fn register(&mut self, action: Action) -> Result<(), ActionError> {
        if action.name().trim().is_empty() {
            return Err(ActionError::EmptyName);
        }
        if self.contains(action.name()) {
            return Err(ActionError::Duplicate(action.name().to_string()));
        }
        self.actions.push(action);
        Ok(())
    }

    /// Remove an action by name (or by the action itself).
    pub fn unregister(&mut self, action: impl AsRef<str>) -> Result<Action, ActionError> {
        let name = action.as_ref();
        let index = self
            .actions
            .iter()
            .position(|a| a.name() == name)
            .ok_or_else(|| ActionError::NotFound(name.to_string()))?;
        Ok(self.actions.remove(index))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Uniformly random action. `None` when empty.
    pub fn pick(&self, rng: &mut GameRng) -> Option<&Action> {
        rng.choose(&self.actions)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(Action::name)
    }
}
