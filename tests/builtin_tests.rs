//! Built-in pack tests.
//!
//! These tests verify the three built-in actions, sudden death, and the
//! end-of-game summary:
//! - Attack kill accounting and team-safe targeting
//! - Passive messages never reference unselected participants
//! - Sudden death fires once
//! - Winner and most-kills lines

use battle_royale::builtin::BuiltinPack;
use battle_royale::core::{ParticipantId, ParticipantSpec, Probabilities, SimConfig};
use battle_royale::engine::{RoundOutcome, SimPhase, Simulation, SimulationBuilder};
use battle_royale::extensions::Extension;
use battle_royale::narration::{MemorySink, MessageBank, NarrationKind};

fn build(config: SimConfig, messages: MessageBank, sink: &MemorySink) -> Simulation {
    SimulationBuilder::new(config)
        .messages(messages)
        .sink(sink.clone())
        .build()
        .unwrap()
}

/// Keep only the named built-in actions.
fn only(sim: &mut Simulation, keep: &[&str]) {
    for name in ["attack", "passive", "passive-death"] {
        if !keep.contains(&name) {
            sim.remove_action(name).unwrap();
        }
    }
}

fn id(sim: &Simulation, name: &str) -> ParticipantId {
    sim.participant_by_name(name).unwrap().id()
}

/// Two participants with certain attacks: the first to act kills the other
/// in round 1.
#[test]
fn test_certain_duel_ends_in_round_one() {
    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob"])
        .with_probabilities(Probabilities::CERTAIN)
        .with_seed(1);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    only(&mut sim, &["attack"]);

    assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Finished);
    assert_eq!(sim.round(), 1);
    assert_eq!(sim.participants().total_kills(), 1);
    assert_eq!(sim.winner().map(|p| p.name()), Some("Ann"));
    assert_eq!(sim.participant(id(&sim, "Ann")).unwrap().kills(), 1);

    assert_eq!(sink.of_kind(NarrationKind::AttackSuccess), vec!["Ann defeats Bob."]);
    assert_eq!(sink.of_kind(NarrationKind::Winner), vec!["Ann wins with 1 kills!"]);
    assert_eq!(sink.of_kind(NarrationKind::MostKills), vec!["Ann got the most kills (1)."]);
    assert_eq!(sim.history()[0].eliminated, vec!["Bob".to_string()]);
}

/// With every probability at zero nobody ever dies.
#[test]
fn test_zero_probabilities_never_change_roster() {
    let sink = MemorySink::new();
    let names: Vec<String> = (0..10).map(|i| format!("P{i}")).collect();
    let config = SimConfig::new(names)
        .with_probabilities(Probabilities::NEVER)
        .with_seed(2);
    let mut sim = build(config, MessageBank::minimal(), &sink);

    for _ in 0..50 {
        assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Continuing);
        assert_eq!(sim.living_count(), 10);
    }
    assert_eq!(sim.phase(), SimPhase::Running);
    assert!(!sim.is_sudden_death());
    assert!(sink.of_kind(NarrationKind::AttackSuccess).is_empty());
    assert!(sink.of_kind(NarrationKind::PassiveDeath).is_empty());
}

/// Team mode: nobody ever attacks a teammate, and the game ends when one
/// team is gone.
#[test]
fn test_teams_never_attack_teammates() {
    for seed in 0..20 {
        let sink = MemorySink::new();
        let config = SimConfig::empty()
            .with_participant(ParticipantSpec::new("Ann").with_group("Red"))
            .with_participant(ParticipantSpec::new("Bob").with_group("Blue"))
            .with_participant(ParticipantSpec::new("Cid").with_group("Red"))
            .with_participant(ParticipantSpec::new("Dan").with_group("Blue"))
            .with_probabilities(Probabilities::CERTAIN)
            .teams(true)
            .with_seed(seed);
        let mut sim = build(config, MessageBank::minimal(), &sink);
        only(&mut sim, &["attack"]);

        assert_eq!(sim.run_game().unwrap(), SimPhase::Finished);

        for line in sink.of_kind(NarrationKind::AttackSuccess) {
            let (attacker, target) = line.trim_end_matches('.').split_once(" defeats ").unwrap();
            let attacker = sim.participant_by_name(attacker).unwrap();
            let target = sim.participant_by_name(target).unwrap();
            assert!(!attacker.is_teammate_of(target), "seed {seed}: {line}");
        }

        let winners = sim.winning_group().unwrap();
        assert_eq!(sim.living_groups(), vec![winners.id()]);
        assert!(sim
            .participants()
            .iter()
            .filter(|p| p.group != Some(winners.id()))
            .all(|p| !p.is_alive()));
    }
}

/// An attacker with no living opponent does nothing.
#[test]
fn test_attack_without_opponent_is_noop() {
    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob", "Cid"])
        .with_probabilities(Probabilities::CERTAIN)
        .with_seed(4);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    let ann = id(&sim, "Ann");
    sim.eliminate(id(&sim, "Bob"), None).unwrap();
    sim.eliminate(id(&sim, "Cid"), None).unwrap();

    battle_royale::builtin::attack(&mut sim, ann).unwrap();
    assert!(sink.is_empty());
    assert_eq!(sim.participant(ann).unwrap().kills(), 0);
}

/// Kills-only mode hides misses and declined attacks but shows deaths.
#[test]
fn test_kills_only_hides_non_lethal_lines() {
    let sink = MemorySink::new();
    let names: Vec<String> = (0..6).map(|i| format!("P{i}")).collect();
    let config = SimConfig::new(names)
        .with_probabilities(Probabilities {
            attack: 0.5,
            attack_success: 0.3,
            passive_death: 0.0,
        })
        .kills_only(true)
        .with_seed(5);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    only(&mut sim, &["attack"]);

    sim.run_game().unwrap();
    assert!(sink.of_kind(NarrationKind::AttackFail).is_empty());
    assert!(sink.of_kind(NarrationKind::PassiveAttack).is_empty());
    assert_eq!(sink.of_kind(NarrationKind::AttackSuccess).len(), 5);
}

/// Classic behavior: declined attacks stay silent.
#[test]
fn test_classic_hides_passive_attack() {
    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob", "Cid"])
        .with_probabilities(Probabilities::NEVER)
        .classic(true)
        .with_seed(6);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    only(&mut sim, &["attack"]);

    for _ in 0..5 {
        sim.advance_round().unwrap();
    }
    assert!(sink.of_kind(NarrationKind::PassiveAttack).is_empty());
    assert_eq!(sink.of_kind(NarrationKind::Quiet).len(), 5);
}

/// Declined attacks narrate "passive-attack" by default.
#[test]
fn test_declined_attack_narrates() {
    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob"])
        .with_probabilities(Probabilities::NEVER)
        .with_seed(6);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    only(&mut sim, &["attack"]);

    sim.advance_round().unwrap();
    assert_eq!(
        sink.of_kind(NarrationKind::PassiveAttack),
        vec!["Ann looks for a fight.", "Bob looks for a fight."]
    );
}

/// Passive messages only use templates that fit the selected participants.
#[test]
fn test_passive_respects_slot_bound() {
    let mut messages = MessageBank::minimal();
    messages.remove_category("passive");
    messages.add("passive", "Default", "{player1} naps.");
    messages.add("passive", "Default", "{player1} and {player2} talk.");
    messages.add("passive", "Default", "{player1}, {player2} and {player3} sing.");
    messages.add("passive", "Default", "{player1}, {player2}, {player3} and {player4} dance.");

    for roster_size in 2..=5 {
        let sink = MemorySink::new();
        let names: Vec<String> = (0..roster_size).map(|i| format!("P{i}")).collect();
        let config = SimConfig::new(names).with_seed(roster_size as u64);
        let mut sim = build(config, messages.clone(), &sink);
        only(&mut sim, &["passive"]);

        for _ in 0..40 {
            sim.advance_round().unwrap();
        }

        let lines = sink.of_kind(NarrationKind::Passive);
        assert_eq!(lines.len(), 40 * roster_size);
        for line in &lines {
            assert!(!line.contains('{'), "unfilled slot in {line:?}");
            let mentioned = line.matches('P').count();
            assert!(mentioned <= roster_size.min(4), "{line:?}");
        }
    }
}

/// The actor always fills the first passive slot.
#[test]
fn test_passive_actor_fills_first_slot() {
    let mut messages = MessageBank::minimal();
    messages.remove_category("passive");
    messages.add("passive", "Default", "{player1} naps.");

    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob", "Cid"]).with_seed(8);
    let mut sim = build(config, messages, &sink);
    only(&mut sim, &["passive"]);

    sim.advance_round().unwrap();
    assert_eq!(
        sink.of_kind(NarrationKind::Passive),
        vec!["Ann naps.", "Bob naps.", "Cid naps."]
    );
}

/// Passive death with certainty kills the actor and credits nobody.
#[test]
fn test_passive_death() {
    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob", "Cid"])
        .with_probabilities(Probabilities::CERTAIN)
        .with_seed(9);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    only(&mut sim, &["passive-death"]);

    assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Finished);
    assert_eq!(
        sink.of_kind(NarrationKind::PassiveDeath),
        vec!["Ann trips and does not get up.", "Bob trips and does not get up."]
    );
    assert_eq!(sim.winner().map(|p| p.name()), Some("Cid"));
    assert_eq!(sim.participants().total_kills(), 0);
}

/// Sudden death triggers at a tenth of the roster, exactly once.
#[test]
fn test_sudden_death_is_idempotent() {
    let sink = MemorySink::new();
    let names: Vec<String> = (0..20).map(|i| format!("P{i}")).collect();
    let mut sim = build(SimConfig::new(names).with_seed(10), MessageBank::minimal(), &sink);
    let original = sim.config().probabilities;

    for i in 2..19 {
        sim.eliminate(ParticipantId::new(i), None).unwrap();
    }
    let mut pack = BuiltinPack;
    pack.pre_round(&mut sim).unwrap();
    assert!(!sim.is_sudden_death());

    sim.eliminate(ParticipantId::new(19), None).unwrap();
    pack.pre_round(&mut sim).unwrap();
    pack.pre_round(&mut sim).unwrap();

    assert!(sim.is_sudden_death());
    assert_eq!(*sim.probabilities(), Probabilities::CERTAIN);
    assert_eq!(sim.config().probabilities, original);
    assert_eq!(
        sink.of_kind(NarrationKind::SuddenDeath),
        vec!["SUDDEN DEATH - All attacks are guaranteed to succeed"]
    );
}

/// Classic behavior never escalates.
#[test]
fn test_classic_has_no_sudden_death() {
    let sink = MemorySink::new();
    let names: Vec<String> = (0..20).map(|i| format!("P{i}")).collect();
    let config = SimConfig::new(names).classic(true).with_seed(11);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    for i in 2..20 {
        sim.eliminate(ParticipantId::new(i), None).unwrap();
    }

    BuiltinPack.pre_round(&mut sim).unwrap();
    assert!(!sim.is_sudden_death());
    assert!(sink.of_kind(NarrationKind::SuddenDeath).is_empty());
}

/// Everyone tied at zero kills is listed with an Oxford comma.
#[test]
fn test_most_kills_tie_phrasing() {
    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob", "Cid"]).with_seed(12);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    sim.eliminate(id(&sim, "Bob"), None).unwrap();
    sim.eliminate(id(&sim, "Cid"), None).unwrap();

    assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Finished);
    assert_eq!(sink.of_kind(NarrationKind::Winner), vec!["Ann wins with 0 kills!"]);
    assert_eq!(
        sink.of_kind(NarrationKind::MostKills),
        vec!["Ann, Bob, and Cid got the most kills (0)."]
    );
}

/// Two leaders are joined with "and".
#[test]
fn test_most_kills_two_leaders() {
    let sink = MemorySink::new();
    let config = SimConfig::new(["Ann", "Bob", "Cid", "Dan"]).with_seed(13);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    let ann = id(&sim, "Ann");
    let bob = id(&sim, "Bob");
    sim.eliminate(id(&sim, "Cid"), Some(ann)).unwrap();
    sim.eliminate(id(&sim, "Dan"), Some(bob)).unwrap();
    sim.eliminate(bob, None).unwrap();

    sim.advance_round().unwrap();
    assert_eq!(
        sink.of_kind(NarrationKind::MostKills),
        vec!["Ann and Bob got the most kills (1)."]
    );
}

/// A team win names the group with its combined kills.
#[test]
fn test_team_winner_line() {
    let sink = MemorySink::new();
    let config = SimConfig::empty()
        .with_participant(ParticipantSpec::new("Ann").with_group("Red"))
        .with_participant(ParticipantSpec::new("Bob").with_group("Blue"))
        .with_participant(ParticipantSpec::new("Cid").with_group("Red"))
        .with_participant(ParticipantSpec::new("Dan").with_group("Blue"))
        .teams(true)
        .with_seed(14);
    let mut sim = build(config, MessageBank::minimal(), &sink);
    let ann = id(&sim, "Ann");
    let cid = id(&sim, "Cid");
    sim.eliminate(id(&sim, "Bob"), Some(ann)).unwrap();
    sim.eliminate(id(&sim, "Dan"), Some(cid)).unwrap();
    sim.eliminate(ann, None).unwrap();

    assert_eq!(sim.advance_round().unwrap(), RoundOutcome::Finished);
    assert_eq!(sim.winning_group().map(|g| g.name()), Some("Red"));
    assert!(sim.winner().is_none());
    assert_eq!(sink.of_kind(NarrationKind::Winner), vec!["Red wins with 2 kills!"]);
}
