//! Scripted autopilot that builds a tower line and runs the match clock.
//!
//! The policy is intentionally simple: keep buying the cheapest tower on the
//! first free site hugging the path, spend leftover gold on the cheapest open
//! upgrade tier, and start the next wave as soon as the previous one resolves.

use std::fmt;

use neon_siege_core::{
    catalog::TowerTypeId, path::Board, CellCoord, Command, Event, MatchOutcome, MatchState,
    TowerId,
};
use neon_siege_world::{self as world, query, World};

/// Summary of a finished run, printed by the binary once the loop stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MatchReport {
    outcome: Option<MatchOutcome>,
    ticks: u64,
    waves_cleared: u32,
    kills: u32,
    gold: u32,
    lives: u32,
    score: u64,
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Some(MatchOutcome::Victory) => writeln!(f, "outcome: victory")?,
            Some(MatchOutcome::Defeat) => writeln!(f, "outcome: defeat")?,
            None => writeln!(f, "outcome: tick budget exhausted")?,
        }
        writeln!(f, "waves cleared: {}", self.waves_cleared)?;
        writeln!(f, "kills: {}  score: {}", self.kills, self.score)?;
        write!(
            f,
            "gold: {}  lives: {}  ticks: {}",
            self.gold, self.lives, self.ticks
        )
    }
}

/// Plays one match from the opening command to a terminal state.
///
/// Stops early when `max_ticks` elapses before the match resolves; the
/// report's `outcome` is `None` in that case.
pub(crate) fn run_match(world: &mut World, max_ticks: u64, echo_events: bool) -> MatchReport {
    let mut events = Vec::new();
    let mut kills = 0u32;
    let mut ticks = 0u64;

    let _ = submit(world, Command::StartMatch, &mut events, echo_events, &mut kills);

    while ticks < max_ticks {
        let hud = query::hud(world);
        if hud.match_state != MatchState::Playing {
            break;
        }
        if !hud.wave_in_flight {
            develop(world, &mut events, echo_events, &mut kills);
            let _ = submit(world, Command::StartWave, &mut events, echo_events, &mut kills);
        }
        let _ = submit(world, Command::Tick, &mut events, echo_events, &mut kills);
        ticks += 1;
    }

    let hud = query::hud(world);
    MatchReport {
        outcome: match hud.match_state {
            MatchState::Victory => Some(MatchOutcome::Victory),
            MatchState::Defeat => Some(MatchOutcome::Defeat),
            MatchState::Playing | MatchState::Menu => None,
        },
        ticks,
        waves_cleared: hud.wave_index,
        kills,
        gold: hud.gold,
        lives: hud.lives,
        score: hud.score,
    }
}

/// Spends the treasury between waves: new towers first, then upgrades.
fn develop(world: &mut World, events: &mut Vec<Event>, echo: bool, kills: &mut u32) {
    loop {
        let gold = query::hud(world).gold;
        let Some(kind) = cheapest_affordable_type(world, gold) else {
            break;
        };
        let Some(cell) = next_free_site(world) else {
            break;
        };
        if !submit(
            world,
            Command::SelectTowerType { kind: Some(kind) },
            events,
            echo,
            kills,
        ) {
            break;
        }
        if !submit(world, Command::PlaceTower { cell }, events, echo, kills) {
            break;
        }
    }

    loop {
        let gold = query::hud(world).gold;
        let Some(tower) = cheapest_upgrade(world, gold) else {
            break;
        };
        if !submit(world, Command::UpgradeTower { tower }, events, echo, kills) {
            break;
        }
    }
}

/// Applies one command, echoing and tallying the events it produced.
fn submit(
    world: &mut World,
    command: Command,
    events: &mut Vec<Event>,
    echo: bool,
    kills: &mut u32,
) -> bool {
    events.clear();
    let accepted = world::apply(world, command, events);
    for event in events.iter() {
        if matches!(event, Event::EnemyKilled { .. }) {
            *kills += 1;
        }
        if echo {
            println!("{event:?}");
        }
    }
    accepted
}

fn cheapest_affordable_type(world: &World, gold: u32) -> Option<TowerTypeId> {
    query::catalog(world)
        .towers()
        .iter()
        .filter(|spec| spec.cost <= gold)
        .min_by_key(|spec| (spec.cost, spec.id))
        .map(|spec| spec.id)
}

fn next_free_site(world: &World) -> Option<CellCoord> {
    let occupied: Vec<CellCoord> = query::tower_view(world)
        .iter()
        .map(|tower| tower.cell)
        .collect();
    build_sites(query::board(world))
        .into_iter()
        .find(|cell| !occupied.contains(cell))
}

/// Build sites hug the path in walk order so early towers cover the entry.
fn build_sites(board: &Board) -> Vec<CellCoord> {
    let mut sites = Vec::new();
    for waypoint in board.path().waypoints() {
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                let x = i64::from(waypoint.x()) + dx;
                let y = i64::from(waypoint.y()) + dy;
                if x < 0 || y < 0 {
                    continue;
                }
                let cell = CellCoord::new(x as u32, y as u32);
                if !board.contains(cell) || board.path().contains(cell) || sites.contains(&cell) {
                    continue;
                }
                sites.push(cell);
            }
        }
    }
    sites
}

fn cheapest_upgrade(world: &World, gold: u32) -> Option<TowerId> {
    let catalog = query::catalog(world);
    query::tower_view(world)
        .iter()
        .filter_map(|tower| {
            let spec = catalog.tower(tower.kind)?;
            let tier = spec.tiers.get(usize::from(tower.level))?;
            (tier.cost <= gold).then_some((tier.cost, tower.id))
        })
        .min_by_key(|&(cost, id)| (cost, id))
        .map(|(_, id)| id)
}
