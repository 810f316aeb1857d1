//! Named participant behaviors.
//!
//! An action is a name, a description, and a behavior invoked with the
//! simulation and the acting participant. Behaviors are reference counted so
//! the engine can pick one and run it while the behavior itself mutates the
//! registry (an action may remove itself or add another).

use std::rc::Rc;

use crate::core::{ActionError, ParticipantId, Result};
use crate::engine::Simulation;

/// Behavior signature for actions.
pub type ActionFn = Rc<dyn Fn(&mut Simulation, ParticipantId) -> Result<()>>;

/// A registered behavior a participant can perform on its turn.
///
/// ## Example
///
/// ```
/// use battle_royale::actions::Action;
/// use battle_royale::narration::NarrationKind;
///
/// let wave = Action::new("wave", "Participant waves", |sim, actor| {
///     let name = sim.participant(actor)?.name().to_string();
///     sim.narrate(NarrationKind::Custom, format!("{name} waves."));
///     Ok(())
/// });
/// assert_eq!(wave.name(), "wave");
/// ```
#[derive(Clone)]
pub struct Action {
    name: String,
    description: String,
    behavior: ActionFn,
}

impl Action {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, behavior: F) -> Self
    where
        F: Fn(&mut Simulation, ParticipantId) -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            behavior: Rc::new(behavior),
        }
    }

    /// Build from a behavior that may be missing, as dynamic loaders produce.
    pub fn try_new(
        name: impl Into<String>,
        description: impl Into<String>,
        behavior: Option<ActionFn>,
    ) -> std::result::Result<Self, ActionError> {
        let name = name.into();
        let Some(behavior) = behavior else {
            return Err(ActionError::MissingBehavior(name));
        };
        Ok(Self {
            name,
            description: description.into(),
            behavior,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run the behavior for `actor`.
    pub fn invoke(&self, sim: &mut Simulation, actor: ParticipantId) -> Result<()> {
        (self.behavior)(sim, actor)
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
