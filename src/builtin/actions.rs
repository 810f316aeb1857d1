//! Built-in action behaviors.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Participant, ParticipantId, Result};
use crate::engine::Simulation;
use crate::narration::{fill, highest_player_slot, player_slot, NarrationKind, MAX_PLAYER_SLOTS};

/// Roll to attack a random opponent, then roll for the kill.
///
/// Opponents are living participants other than the actor and, in team mode,
/// outside the actor's group. No opponent means nothing happens. A declined
/// attack narrates "passive-attack" unless classic behavior or kills-only is
/// set.
pub fn attack(sim: &mut Simulation, actor: ParticipantId) -> Result<()> {
    let chances = *sim.probabilities();
    let kills_only = sim.config().show_kills_only;

    if !sim.rng().roll(chances.attack) {
        if !sim.config().classic_behavior && !kills_only {
            let template = sim.random_message("passive-attack", actor)?;
            let name = sim.participant(actor)?.name().to_string();
            sim.narrate(NarrationKind::PassiveAttack, fill(&template, &[("player", name.as_str())]));
        }
        return Ok(());
    }

    let opponents = opponents(sim, actor)?;
    let Some(&target) = sim.rng().choose(&opponents) else {
        debug!(actor = %actor, "no one to attack");
        return Ok(());
    };

    let succeeded = sim.rng().roll(chances.attack_success);
    if !succeeded && kills_only {
        return Ok(());
    }

    let (category, kind) = if succeeded {
        ("attack-success", NarrationKind::AttackSuccess)
    } else {
        ("attack-fail", NarrationKind::AttackFail)
    };
    let template = sim.random_message(category, actor)?;
    let attacker = sim.participant(actor)?.name().to_string();
    let victim = sim.participant(target)?.name().to_string();
    sim.narrate(kind, fill(&template, &[("player", attacker.as_str()), ("target", victim.as_str())]));

    if succeeded {
        sim.eliminate(target, Some(actor))?;
    }
    Ok(())
}

/// Narrate the actor doing something harmless, possibly with up to three
/// other living participants.
///
/// The actor fills `{player1}`; the others fill `{player2}`.. in selection
/// order. Only templates that mention no more players than were selected are
/// drawn.
pub fn passive(sim: &mut Simulation, actor: ParticipantId) -> Result<()> {
    let others: Vec<ParticipantId> = sim.living().into_iter().filter(|&id| id != actor).collect();
    let count = sim.rng().gen_range_inclusive(1..=MAX_PLAYER_SLOTS.min(others.len() + 1));

    let mut mentioned: SmallVec<[ParticipantId; MAX_PLAYER_SLOTS]> = SmallVec::new();
    mentioned.push(actor);
    mentioned.extend(sim.rng().choose_distinct(&others, count - 1));

    let template =
        sim.random_message_matching("passive", actor, |t| highest_player_slot(t) <= mentioned.len())?;

    let names = mentioned
        .iter()
        .map(|&id| sim.participant(id).map(|p| p.name().to_string()))
        .collect::<Result<SmallVec<[String; MAX_PLAYER_SLOTS]>>>()?;
    let slots: SmallVec<[(&str, &str); MAX_PLAYER_SLOTS]> = names
        .iter()
        .enumerate()
        .filter_map(|(i, name)| player_slot(i + 1).map(|slot| (slot, name.as_str())))
        .collect();

    sim.narrate(NarrationKind::Passive, fill(&template, &slots));
    Ok(())
}

/// Roll for the actor to die on its own.
pub fn passive_death(sim: &mut Simulation, actor: ParticipantId) -> Result<()> {
    let chance = sim.probabilities().passive_death;
    if !sim.rng().roll(chance) {
        return Ok(());
    }

    let template = sim.random_message("passive-death", actor)?;
    let name = sim.participant(actor)?.name().to_string();
    sim.narrate(NarrationKind::PassiveDeath, fill(&template, &[("player", name.as_str())]));
    sim.eliminate(actor, None)?;
    Ok(())
}

fn opponents(sim: &Simulation, actor: ParticipantId) -> Result<Vec<ParticipantId>> {
    let attacker = sim.participant(actor)?;
    let team_mode = sim.config().use_teams;
    Ok(sim
        .participants()
        .iter()
        .filter(|p| p.is_alive() && p.id() != actor)
        .filter(|p| !(team_mode && p.is_teammate_of(attacker)))
        .map(Participant::id)
        .collect())
}
