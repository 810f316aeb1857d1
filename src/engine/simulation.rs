//! The simulation: roster, registry, extensions, and the round loop.

use im::Vector;
use tracing::{debug, info};

use crate::actions::{Action, ActionRegistry};
use crate::core::{
    ActionError, GameRng, Group, GroupId, Participant, ParticipantId, Probabilities, Result, Roster,
    SimConfig, SimError,
};
use crate::extensions::Extension;
use crate::narration::{MessageBank, Narration, NarrationKind, NarrationSink};

use super::state::{RoundOutcome, RoundRecord, SimPhase};
use super::stop::StopHandle;

const ROUND_ENDED: &str = "------ ROUND ENDED ------";
const STOPPED: &str = "Game stopped by user.";
const NOTHING_HAPPENED: &str = "Nothing happened this turn.";
const NO_ONE_DIED: &str = "No one died on this turn.";

#[derive(Clone, Copy, Debug)]
enum Hook {
    PreRound,
    PostRound,
    PostGame,
}

/// A running battle royale.
///
/// Built by [`SimulationBuilder`](super::SimulationBuilder). Each round every
/// living participant, in roster order, performs one action drawn uniformly
/// from the registry. The game ends when one participant remains, or one
/// group in team mode.
pub struct Simulation {
    config: SimConfig,

    /// Probabilities the built-in actions roll against. Starts as a copy of
    /// `config.probabilities`; sudden death overwrites it.
    probabilities: Probabilities,

    messages: MessageBank,
    sink: Box<dyn NarrationSink>,
    roster: Roster,
    groups: Vec<Group>,
    actions: ActionRegistry,
    extensions: Vec<Box<dyn Extension>>,
    extension_names: Vec<String>,
    rng: GameRng,
    stop: StopHandle,

    phase: SimPhase,
    round: u32,
    initial_size: usize,
    sudden_death: bool,

    /// Set by any non-framing narration; drives the quiet-round fallback.
    activity: bool,
    eliminated_this_round: Vec<String>,
    history: Vector<RoundRecord>,
}

impl Simulation {
    /// Roster and groups from a validated config. Starts in `Initializing`
    /// with no actions and no extensions.
    pub(super) fn new(
        config: SimConfig,
        messages: MessageBank,
        sink: Box<dyn NarrationSink>,
        rng: GameRng,
        stop: StopHandle,
    ) -> Self {
        let mut roster = Roster::new();
        let mut groups: Vec<Group> = Vec::new();

        for spec in &config.roster {
            let id = roster.push_new(spec.name.clone());
            roster[id].category = spec.category.clone();

            let Some(group_name) = spec.group.as_deref().filter(|_| config.use_teams) else {
                continue;
            };
            let index = match groups.iter().position(|g| g.name() == group_name) {
                Some(index) => index,
                None => {
                    groups.push(Group::new(GroupId::new(groups.len() as u16), group_name));
                    groups.len() - 1
                }
            };
            groups[index].add_member(id);
            roster[id].group = Some(groups[index].id());
        }

        let initial_size = roster.len();
        Self {
            probabilities: config.probabilities,
            config,
            messages,
            sink,
            roster,
            groups,
            actions: ActionRegistry::new(),
            extensions: Vec::new(),
            extension_names: Vec::new(),
            rng,
            stop,
            phase: SimPhase::Initializing,
            round: 0,
            initial_size,
            sudden_death: false,
            activity: false,
            eliminated_this_round: Vec::new(),
            history: Vector::new(),
        }
    }

    pub(super) fn attach_extension(&mut self, extension: Box<dyn Extension>) {
        self.extension_names.push(extension.name().to_string());
        self.extensions.push(extension);
    }

    pub(super) fn set_phase(&mut self, phase: SimPhase) {
        self.phase = phase;
    }

    // === State ===

    #[must_use]
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Current round number; 0 before the first round.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Every participant, dead or alive, in roster order.
    #[must_use]
    pub fn participants(&self) -> &Roster {
        &self.roster
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&Participant> {
        self.roster.get(id).ok_or(SimError::UnknownParticipant(id))
    }

    /// Mutable access, mainly for extension data.
    pub fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant> {
        self.roster.get_mut(id).ok_or(SimError::UnknownParticipant(id))
    }

    #[must_use]
    pub fn participant_by_name(&self, name: &str) -> Option<&Participant> {
        self.roster.by_name(name)
    }

    /// Groups in first-appearance order. Empty outside team mode.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(id.index())
    }

    /// Living participants in roster order.
    #[must_use]
    pub fn living(&self) -> Vec<ParticipantId> {
        self.roster.living().collect()
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.roster.iter().filter(|p| p.is_alive()).count()
    }

    /// Groups with at least one living member.
    #[must_use]
    pub fn living_groups(&self) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|g| g.is_alive(&self.roster))
            .map(Group::id)
            .collect()
    }

    /// Roster size at the start of the run.
    #[must_use]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    #[must_use]
    pub fn is_sudden_death(&self) -> bool {
        self.sudden_death
    }

    /// Probabilities currently in effect.
    #[must_use]
    pub fn probabilities(&self) -> &Probabilities {
        &self.probabilities
    }

    pub fn probabilities_mut(&mut self) -> &mut Probabilities {
        &mut self.probabilities
    }

    /// The configuration as loaded. Never modified by the run.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn messages(&self) -> &MessageBank {
        &self.messages
    }

    #[must_use]
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Names of the extensions receiving hooks, in dispatch order.
    #[must_use]
    pub fn extension_names(&self) -> &[String] {
        &self.extension_names
    }

    /// One record per completed round.
    #[must_use]
    pub fn history(&self) -> &Vector<RoundRecord> {
        &self.history
    }

    /// The last participant standing, once a free-for-all has finished.
    #[must_use]
    pub fn winner(&self) -> Option<&Participant> {
        if self.phase != SimPhase::Finished || self.config.use_teams {
            return None;
        }
        let mut living = self.roster.iter().filter(|p| p.is_alive());
        match (living.next(), living.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    /// The last group standing, once a team game has finished.
    #[must_use]
    pub fn winning_group(&self) -> Option<&Group> {
        if self.phase != SimPhase::Finished || !self.config.use_teams {
            return None;
        }
        match self.living_groups().as_slice() {
            [only] => self.group(*only),
            _ => None,
        }
    }

    /// A handle that stops this simulation from anywhere.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn rng(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Mutation ===

    pub fn add_action(&mut self, action: Action) -> std::result::Result<(), ActionError> {
        debug!(action = action.name(), "registering action");
        self.actions.register(action)
    }

    pub fn remove_action(&mut self, action: impl AsRef<str>) -> std::result::Result<Action, ActionError> {
        debug!(action = action.as_ref(), "removing action");
        self.actions.unregister(action)
    }

    /// Switch to sudden death: every probability becomes certain.
    ///
    /// Returns `false` if sudden death was already active. The caller
    /// announces it.
    pub fn trigger_sudden_death(&mut self) -> bool {
        if self.sudden_death {
            return false;
        }
        self.sudden_death = true;
        self.probabilities = Probabilities::CERTAIN;
        info!(round = self.round, living = self.living_count(), "sudden death");
        true
    }

    /// Mark `target` dead and credit `killer`, if any.
    ///
    /// Returns `false` when the target was already dead; nobody is credited
    /// in that case.
    pub fn eliminate(&mut self, target: ParticipantId, killer: Option<ParticipantId>) -> Result<bool> {
        if let Some(killer) = killer {
            self.participant(killer)?;
        }
        let victim = self.participant_mut(target)?;
        if !victim.kill() {
            return Ok(false);
        }
        let name = victim.name().to_string();
        if let Some(killer) = killer {
            self.roster[killer].record_kill();
        }
        debug!(round = self.round, victim = %name, ?killer, "eliminated");
        self.eliminated_this_round.push(name);
        Ok(true)
    }

    /// Emit a line through the sink.
    pub fn narrate(&mut self, kind: NarrationKind, text: impl Into<String>) {
        if !kind.is_framing() {
            self.activity = true;
        }
        self.sink.emit(&Narration::new(kind, text));
    }

    /// Random template of `category` in the flavor of `participant`.
    pub fn random_message(&mut self, category: &str, participant: ParticipantId) -> Result<String> {
        self.random_message_matching(category, participant, |_| true)
    }

    /// Like `random_message`, drawing only from templates `accept` allows.
    pub fn random_message_matching(
        &mut self,
        category: &str,
        participant: ParticipantId,
        accept: impl Fn(&str) -> bool,
    ) -> Result<String> {
        let flavor = &self
            .roster
            .get(participant)
            .ok_or(SimError::UnknownParticipant(participant))?
            .category;
        self.messages
            .random_message_matching(category, flavor, &mut self.rng, accept)
            .map(str::to_string)
            .ok_or_else(|| SimError::NoMessages(category.to_string()))
    }

    // === Round loop ===

    /// One side left: a single participant, or a single group in team mode.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        if self.config.use_teams {
            self.living_groups().len() <= 1
        } else {
            self.living_count() <= 1
        }
    }

    /// Play one round.
    ///
    /// Pre-round hooks, then one action per living participant in roster
    /// order, then post-round hooks, or post-game hooks if the round decided
    /// the game.
    pub fn advance_round(&mut self) -> Result<RoundOutcome> {
        if self.phase.is_terminal() {
            return Ok(RoundOutcome::AlreadyOver);
        }
        self.phase = SimPhase::Running;
        if self.stop.is_stop_requested() {
            return Ok(self.halt());
        }

        self.round += 1;
        self.eliminated_this_round.clear();
        let heading = format!("Round {} - {} players remaining", self.round, self.living_count());
        self.narrate(NarrationKind::RoundStart, heading);

        self.dispatch(Hook::PreRound)?;

        self.activity = false;
        let order: Vec<ParticipantId> = self.roster.ids().collect();
        for actor in order {
            if self.stop.is_stop_requested() {
                return Ok(self.halt());
            }
            if self.is_decided() {
                break;
            }
            if !self.roster[actor].is_alive() {
                continue;
            }
            let action = self.actions.pick(&mut self.rng).cloned().ok_or(SimError::NoActions)?;
            debug!(round = self.round, actor = %self.roster[actor], action = action.name(), "turn");
            action.invoke(self, actor)?;
        }

        if !self.activity {
            let quiet = if self.config.show_kills_only { NO_ONE_DIED } else { NOTHING_HAPPENED };
            self.narrate(NarrationKind::Quiet, quiet);
        }

        self.history.push_back(RoundRecord {
            round: self.round,
            eliminated: std::mem::take(&mut self.eliminated_this_round),
            living_after: self.living_count(),
        });

        let outcome = if self.is_decided() {
            self.phase = SimPhase::Finished;
            info!(round = self.round, living = self.living_count(), "game finished");
            self.dispatch(Hook::PostGame)?;
            RoundOutcome::Finished
        } else {
            self.dispatch(Hook::PostRound)?;
            RoundOutcome::Continuing
        };
        self.narrate(NarrationKind::RoundEnd, ROUND_ENDED);
        Ok(outcome)
    }

    /// Play rounds until the game finishes or is stopped.
    pub fn run_game(&mut self) -> Result<SimPhase> {
        if self.phase.is_terminal() {
            info!(phase = ?self.phase, "Game already finished");
            return Ok(self.phase);
        }
        while !self.phase.is_terminal() {
            self.advance_round()?;
        }
        Ok(self.phase)
    }

    fn halt(&mut self) -> RoundOutcome {
        self.narrate(NarrationKind::Stopped, STOPPED);
        self.phase = SimPhase::Stopped;
        info!(round = self.round, "stopped by user");
        RoundOutcome::Stopped
    }

    /// Run one hook on every extension in load order. The first error
    /// aborts the dispatch.
    fn dispatch(&mut self, hook: Hook) -> Result<()> {
        let mut extensions = std::mem::take(&mut self.extensions);
        let mut result = Ok(());
        for extension in &mut extensions {
            debug!(extension = extension.name(), ?hook, "hook");
            result = match hook {
                Hook::PreRound => extension.pre_round(self),
                Hook::PostRound => extension.post_round(self),
                Hook::PostGame => extension.post_game(self),
            };
            if result.is_err() {
                break;
            }
        }
        self.extensions = extensions;
        result
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("living", &self.living_count())
            .field("sudden_death", &self.sudden_death)
            .field("actions", &self.actions.names().collect::<Vec<_>>())
            .field("extensions", &self.extension_names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::{ExtensionError, ParticipantSpec};
    use crate::engine::SimulationBuilder;
    use crate::narration::MemorySink;

    fn quiet_sim(names: &[&str], sink: &MemorySink) -> Simulation {
        let mut sim = SimulationBuilder::new(SimConfig::new(names.iter().copied()).with_seed(3))
            .messages(MessageBank::minimal())
            .sink(sink.clone())
            .build()
            .unwrap();
        for name in ["attack", "passive", "passive-death"] {
            sim.remove_action(name).unwrap();
        }
        sim.add_action(Action::new("idle", "Participant idles", |_, _| Ok(())))
            .unwrap();
        sim
    }

    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Extension for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn setup(&mut self, _sim: &mut Simulation) -> std::result::Result<(), ExtensionError> {
            self.log.borrow_mut().push("setup".into());
            Ok(())
        }

        fn pre_round(&mut self, sim: &mut Simulation) -> Result<()> {
            self.log.borrow_mut().push(format!("pre {}", sim.round()));
            Ok(())
        }

        fn post_round(&mut self, sim: &mut Simulation) -> Result<()> {
            self.log.borrow_mut().push(format!("post {}", sim.round()));
            Ok(())
        }

        fn post_game(&mut self, sim: &mut Simulation) -> Result<()> {
            self.log.borrow_mut().push(format!("game {}", sim.round()));
            Ok(())
        }
    }

    #[test]
    fn test_quiet_round_framing() {
        let sink = MemorySink::new();
        let mut sim = quiet_sim(&["Ann", "Bob", "Cid"], &sink);

        assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Continuing);
        assert_eq!(
            sink.texts(),
            vec![
                "Round 1 - 3 players remaining",
                "Nothing happened this turn.",
                "------ ROUND ENDED ------",
            ]
        );
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.history()[0].living_after, 3);
    }

    #[test]
    fn test_quiet_round_kills_only() {
        let sink = MemorySink::new();
        let config = SimConfig::new(["Ann", "Bob"]).kills_only(true).with_seed(3);
        let mut sim = SimulationBuilder::new(config)
            .messages(MessageBank::minimal())
            .sink(sink.clone())
            .build()
            .unwrap();
        sim.remove_action("attack").unwrap();
        sim.remove_action("passive-death").unwrap();
        sim.remove_action("passive").unwrap();
        sim.add_action(Action::new("idle", "", |_, _| Ok(()))).unwrap();

        sim.advance_round().unwrap();
        assert_eq!(sink.of_kind(NarrationKind::Quiet), vec!["No one died on this turn."]);
    }

    #[test]
    fn test_action_narration_suppresses_fallback() {
        let sink = MemorySink::new();
        let mut sim = quiet_sim(&["Ann", "Bob"], &sink);
        sim.add_action(Action::new("shout", "", |sim, actor| {
            let name = sim.participant(actor)?.name().to_string();
            sim.narrate(NarrationKind::Custom, format!("{name} shouts."));
            Ok(())
        }))
        .unwrap();
        sim.remove_action("idle").unwrap();

        sim.advance_round().unwrap();
        assert!(sink.of_kind(NarrationKind::Quiet).is_empty());
        assert_eq!(sink.of_kind(NarrationKind::Custom), vec!["Ann shouts.", "Bob shouts."]);
    }

    #[test]
    fn test_eliminate_credits_killer_once() {
        let sink = MemorySink::new();
        let mut sim = quiet_sim(&["Ann", "Bob", "Cid"], &sink);
        let ann = ParticipantId::new(0);
        let bob = ParticipantId::new(1);

        assert!(sim.eliminate(bob, Some(ann)).unwrap());
        assert!(!sim.eliminate(bob, Some(ann)).unwrap());
        assert_eq!(sim.participant(ann).unwrap().kills(), 1);
        assert_eq!(sim.living(), vec![ann, ParticipantId::new(2)]);

        let ghost = ParticipantId::new(9);
        assert!(matches!(
            sim.eliminate(ghost, None),
            Err(SimError::UnknownParticipant(id)) if id == ghost
        ));
    }

    #[test]
    fn test_hook_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let shared = Rc::clone(&log);
        let config = SimConfig::new(["Ann", "Bob"]).with_seed(5);
        let mut sim = SimulationBuilder::new(config)
            .messages(MessageBank::minimal())
            .extension("recorder", move || {
                Ok(Box::new(Recorder { log: Rc::clone(&shared) }) as Box<dyn Extension>)
            })
            .build()
            .unwrap();
        assert_eq!(sim.extension_names(), ["builtin", "recorder"]);
        for name in ["attack", "passive", "passive-death"] {
            sim.remove_action(name).unwrap();
        }
        sim.add_action(Action::new("idle", "", |_, _| Ok(()))).unwrap();

        sim.advance_round().unwrap();
        let ann = ParticipantId::new(0);
        let bob = ParticipantId::new(1);
        sim.eliminate(bob, Some(ann)).unwrap();
        assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Finished);

        assert_eq!(*log.borrow(), vec!["setup", "pre 1", "post 1", "pre 2", "game 2"]);
    }

    #[test]
    fn test_stop_before_round() {
        let sink = MemorySink::new();
        let mut sim = quiet_sim(&["Ann", "Bob"], &sink);
        sim.stop_handle().request_stop();

        assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Stopped);
        assert_eq!(sim.phase(), SimPhase::Stopped);
        assert_eq!(sim.round(), 0);
        assert_eq!(sink.texts(), vec!["Game stopped by user."]);
        assert_eq!(sim.advance_round().unwrap(), RoundOutcome::AlreadyOver);
    }

    #[test]
    fn test_stop_mid_round() {
        let sink = MemorySink::new();
        let mut sim = quiet_sim(&["Ann", "Bob", "Cid"], &sink);
        sim.remove_action("idle").unwrap();
        sim.add_action(Action::new("quit", "", |sim, _| {
            sim.stop_handle().request_stop();
            Ok(())
        }))
        .unwrap();

        assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Stopped);
        assert!(sim.history().is_empty());
        assert_eq!(sink.of_kind(NarrationKind::Stopped).len(), 1);
        assert!(sink.of_kind(NarrationKind::RoundEnd).is_empty());
    }

    #[test]
    fn test_empty_registry_is_fatal() {
        let sink = MemorySink::new();
        let mut sim = quiet_sim(&["Ann", "Bob"], &sink);
        sim.remove_action("idle").unwrap();
        assert!(matches!(sim.advance_round(), Err(SimError::NoActions)));
    }

    #[test]
    fn test_team_groups_built_in_order() {
        let config = SimConfig::empty()
            .with_participant(ParticipantSpec::new("Ann").with_group("Red"))
            .with_participant(ParticipantSpec::new("Bob").with_group("Blue"))
            .with_participant(ParticipantSpec::new("Cid").with_group("Red"))
            .teams(true)
            .with_seed(1);
        let sim = SimulationBuilder::new(config)
            .messages(MessageBank::minimal())
            .build()
            .unwrap();

        let names: Vec<_> = sim.groups().iter().map(Group::name).collect();
        assert_eq!(names, vec!["Red", "Blue"]);
        assert_eq!(
            sim.groups()[0].members(),
            [ParticipantId::new(0), ParticipantId::new(2)]
        );
        let cid = sim.participant_by_name("Cid").unwrap();
        assert_eq!(cid.group, Some(GroupId::new(0)));
        assert_eq!(sim.living_groups().len(), 2);
    }

    #[test]
    fn test_groups_ignored_outside_team_mode() {
        let config = SimConfig::empty()
            .with_participant(ParticipantSpec::new("Ann").with_group("Red"))
            .with_participant(ParticipantSpec::new("Bob").with_group("Red"))
            .with_seed(1);
        let sim = SimulationBuilder::new(config)
            .messages(MessageBank::minimal())
            .build()
            .unwrap();
        assert!(sim.groups().is_empty());
        assert!(sim.participants().iter().all(|p| p.group.is_none()));
    }

    #[test]
    fn test_random_message_matching_filters() {
        let sink = MemorySink::new();
        let mut sim = quiet_sim(&["Ann", "Bob"], &sink);
        let ann = ParticipantId::new(0);
        for _ in 0..20 {
            let line = sim
                .random_message_matching("passive", ann, |m| !m.contains("{player2}"))
                .unwrap();
            assert_eq!(line, "{player1} looks around.");
        }
        assert!(matches!(
            sim.random_message("no-such-category", ann),
            Err(SimError::NoMessages(c)) if c == "no-such-category"
        ));
    }
}
