//! End-of-game summary.

use crate::core::{Participant, ParticipantId, Result};
use crate::engine::Simulation;
use crate::narration::{fill, NarrationKind};

/// Winner line. In team mode the winning group is named and credited with
/// the combined kills of all its members; the message flavor comes from its
/// first living member.
pub(super) fn announce_winner(sim: &mut Simulation) -> Result<()> {
    let winner = if sim.config().use_teams {
        sim.living_groups().first().and_then(|&id| sim.group(id)).and_then(|group| {
            let flavor = group.living_members(sim.participants()).next()?;
            Some((flavor, group.name().to_string(), group.total_kills(sim.participants())))
        })
    } else {
        sim.living()
            .first()
            .and_then(|&id| sim.participant(id).ok())
            .map(|p| (p.id(), p.name().to_string(), p.kills()))
    };
    let Some((flavor, name, kills)) = winner else {
        return Ok(());
    };

    let template = sim.random_message("winner", flavor)?;
    let amount = kills.to_string();
    sim.narrate(
        NarrationKind::Winner,
        fill(&template, &[("player", name.as_str()), ("amount", amount.as_str())]),
    );
    Ok(())
}

/// Most-kills line naming everyone tied for the highest count, zero
/// included. The flavor comes from one of the leaders at random.
pub(super) fn announce_most_kills(sim: &mut Simulation) -> Result<()> {
    let top = sim.participants().iter().map(Participant::kills).max().unwrap_or(0);
    let leaders: Vec<(ParticipantId, String)> = sim
        .participants()
        .iter()
        .filter(|p| p.kills() == top)
        .map(|p| (p.id(), p.name().to_string()))
        .collect();
    let Some(&(flavor, _)) = sim.rng().choose(&leaders) else {
        return Ok(());
    };

    let names: Vec<&str> = leaders.iter().map(|(_, name)| name.as_str()).collect();
    let players = join_names(&names);
    let amount = top.to_string();
    let template = sim.random_message("most-kills", flavor)?;
    sim.narrate(
        NarrationKind::MostKills,
        fill(&template, &[("player", players.as_str()), ("amount", amount.as_str())]),
    );
    Ok(())
}

/// "A", "A and B", "A, B, and C".
#[must_use]
pub fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [one] => (*one).to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}
