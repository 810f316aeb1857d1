//! Simulation construction: validation, RNG seeding, extension loading.

use std::rc::Rc;

use tracing::{info, warn};

use crate::builtin::BuiltinPack;
use crate::core::{ExtensionError, GameRng, Result, SimConfig, SimError};
use crate::extensions::{Extension, ExtensionFactory};
use crate::narration::{MessageBank, NarrationSink, NullSink};

use super::simulation::Simulation;
use super::state::SimPhase;
use super::stop::StopHandle;

/// Builder for a [`Simulation`].
///
/// ## Defaults
///
/// - messages: the bank shipped with the crate
/// - sink: [`NullSink`]
/// - seed: `config.seed`, else drawn from the OS
/// - extensions: only the built-in pack
pub struct SimulationBuilder {
    config: SimConfig,
    messages: Option<MessageBank>,
    sink: Box<dyn NarrationSink>,
    seed: Option<u64>,
    stop: StopHandle,
    extensions: Vec<(String, ExtensionFactory)>,
}

impl SimulationBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            messages: None,
            sink: Box::new(NullSink),
            seed: None,
            stop: StopHandle::new(),
            extensions: Vec::new(),
        }
    }

    #[must_use]
    pub fn messages(mut self, messages: MessageBank) -> Self {
        self.messages = Some(messages);
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl NarrationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Override the configured seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Share a stop flag created elsewhere, e.g. before a signal handler is
    /// installed.
    #[must_use]
    pub fn stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// Load an extension after the built-in pack, in call order.
    #[must_use]
    pub fn extension<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<Box<dyn Extension>, ExtensionError> + 'static,
    {
        self.extensions.push((name.into(), Rc::new(factory)));
        self
    }

    /// Load several extensions, e.g. from `ExtensionCatalog::enabled_in_dir`.
    #[must_use]
    pub fn extensions(mut self, extensions: impl IntoIterator<Item = (String, ExtensionFactory)>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    /// Validate the configuration, set up every extension, and return a
    /// simulation ready for round 1.
    ///
    /// Fails on an invalid configuration or a failing built-in pack. Other
    /// extensions that fail to construct or set up are logged and left out.
    pub fn build(self) -> Result<Simulation> {
        let messages = match self.messages {
            Some(messages) => messages,
            None => MessageBank::builtin()?,
        };
        self.config.validate(&messages)?;

        let rng = match self.seed.or(self.config.seed) {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!(
            seed = rng.seed(),
            participants = self.config.roster.len(),
            teams = self.config.use_teams,
            "building simulation"
        );

        let mut sim = Simulation::new(self.config, messages, self.sink, rng, self.stop);

        let mut builtin = BuiltinPack::default();
        builtin.setup(&mut sim).map_err(SimError::BuiltinPack)?;
        sim.attach_extension(Box::new(builtin));

        for (name, factory) in self.extensions {
            let mut extension = match factory() {
                Ok(extension) => extension,
                Err(error) => {
                    warn!(extension = %name, %error, "skipping extension");
                    continue;
                }
            };
            match extension.setup(&mut sim) {
                Ok(()) => {
                    info!(extension = %name, "loaded extension");
                    sim.attach_extension(extension);
                }
                Err(error) => warn!(extension = %name, %error, "dropping extension"),
            }
        }

        sim.set_phase(SimPhase::Running);
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigError;

    struct Failing;

    impl Extension for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn setup(&mut self, sim: &mut Simulation) -> std::result::Result<(), ExtensionError> {
            sim.add_action(crate::actions::Action::new("half-done", "", |_, _| Ok(())))
                .map_err(|e| ExtensionError::setup("failing", e))?;
            Err(ExtensionError::setup("failing", "gave up"))
        }
    }

    #[test]
    fn test_build_defaults() {
        let sim = SimulationBuilder::new(SimConfig::new(["Ann", "Bob"]).with_seed(1))
            .build()
            .unwrap();
        assert_eq!(sim.phase(), SimPhase::Running);
        assert_eq!(sim.round(), 0);
        assert_eq!(
            sim.actions().names().collect::<Vec<_>>(),
            vec!["attack", "passive", "passive-death"]
        );
        assert_eq!(sim.extension_names(), ["builtin"]);
        assert_eq!(sim.probabilities(), &sim.config().probabilities);
    }

    #[test]
    fn test_invalid_config_fails() {
        let err = SimulationBuilder::new(SimConfig::new(["Solo"])).build().unwrap_err();
        assert!(matches!(err, SimError::Config(ConfigError::TooFewParticipants(1))));
    }

    #[test]
    fn test_failed_extensions_are_left_out() {
        let sim = SimulationBuilder::new(SimConfig::new(["Ann", "Bob"]).with_seed(1))
            .messages(MessageBank::minimal())
            .extension("broken", || Err(ExtensionError::construct("broken", "no")))
            .extension("failing", || Ok(Box::new(Failing) as Box<dyn Extension>))
            .build()
            .unwrap();

        assert_eq!(sim.extension_names(), ["builtin"]);
        // Setup side effects stay.
        assert!(sim.actions().contains("half-done"));
    }

    #[test]
    fn test_builder_seed_overrides_config() {
        let a = SimulationBuilder::new(SimConfig::new(["Ann", "Bob"]).with_seed(1))
            .seed(99)
            .build()
            .unwrap();
        let b = SimulationBuilder::new(SimConfig::new(["Ann", "Bob"]).with_seed(2))
            .seed(99)
            .build()
            .unwrap();
        let mut a = a;
        let mut b = b;
        assert_eq!(a.rng().seed(), 99);
        assert_eq!(a.rng().gen_range_usize(0..1000), b.rng().gen_range_usize(0..1000));
    }
}
