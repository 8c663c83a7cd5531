#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Neon Siege simulation.
//!
//! The world owns all match state: the catalog and board the match is played
//! on, every live entity, the treasury, and the wave scheduler. Adapters
//! mutate it exclusively through [`apply`] and observe it through [`query`].
//! Pure systems plan targeting and combat from immutable snapshots; the world
//! commits their plans inside a strictly ordered tick, so identical command
//! sequences always produce identical matches.

use neon_siege_core::{
    catalog::{Catalog, EnemyTypeId, TowerTypeId},
    path::Board,
    CellCoord, CellPoint, Command, EffectKind, Event, Impact, ImpactPlan, MatchOutcome,
    MatchState, Payload, PlacementError, SaleError, TowerId, TowerTarget, UpgradeError, WaveError,
};
use neon_siege_system_combat::Combat;
use neon_siege_system_targeting::Targeting;
use tracing::{debug, info};

mod economy;
mod entities;
mod waves;

use crate::{
    economy::Ledger,
    entities::{Entities, Projectile, ProjectileSeed},
    waves::WaveMachine,
};

/// Milliseconds of virtual time spanned by one [`Command::Tick`].
pub const TICK_MS: u64 = 50;

/// Cells a projectile travels per tick.
const PROJECTILE_SPEED: f32 = 0.35;

/// Milliseconds a slow effect holds before wearing off.
const SLOW_DURATION_MS: u32 = 2000;

/// Lifetime of the blast ring emitted by splash impacts.
const EXPLOSION_TTL_MS: u32 = 300;

/// Lifetime of the arc emitted between consecutive chain hits.
const CHAIN_ARC_TTL_MS: u32 = 180;

/// Lifetime of the burst emitted where an enemy dies.
const DEATH_BURST_TTL_MS: u32 = 350;

/// Tenths of invested gold returned when a tower is sold.
const SALE_REFUND_TENTHS: u64 = 6;

/// Starting resources granted when a match begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Gold available before the first placement.
    pub starting_gold: u32,
    /// Lives that escaping enemies deplete before the match is lost.
    pub starting_lives: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_gold: 200,
            starting_lives: 20,
        }
    }
}

/// Authoritative state for one Neon Siege match.
#[derive(Debug)]
pub struct World {
    catalog: Catalog,
    board: Board,
    config: MatchConfig,
    match_state: MatchState,
    clock_ms: u64,
    ledger: Ledger,
    entities: Entities,
    waves: WaveMachine,
    selected_tower_type: Option<TowerTypeId>,
    selected_tower: Option<TowerId>,
    targeting: Targeting,
    combat: Combat,
    fire_orders: Vec<TowerTarget>,
    due_spawns: Vec<EnemyTypeId>,
    impact_plan: ImpactPlan,
}

impl World {
    /// Creates a world playing the standard catalog on the standard board.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(Catalog::standard(), Board::standard(), MatchConfig::default())
    }

    /// Creates a world playing the provided catalog on the provided board.
    #[must_use]
    pub fn with_rules(catalog: Catalog, board: Board, config: MatchConfig) -> Self {
        let total_waves = catalog.total_waves();
        Self {
            catalog,
            board,
            config,
            match_state: MatchState::Menu,
            clock_ms: 0,
            ledger: Ledger::new(config.starting_gold, config.starting_lives),
            entities: Entities::new(),
            waves: WaveMachine::new(total_waves),
            selected_tower_type: None,
            selected_tower: None,
            targeting: Targeting::new(),
            combat: Combat::new(),
            fire_orders: Vec::new(),
            due_spawns: Vec::new(),
            impact_plan: ImpactPlan::new(),
        }
    }

    fn start_match(&mut self, out_events: &mut Vec<Event>) -> bool {
        self.match_state = MatchState::Playing;
        self.clock_ms = 0;
        self.ledger = Ledger::new(self.config.starting_gold, self.config.starting_lives);
        self.entities.reset();
        self.waves.reset();
        self.selected_tower_type = None;
        self.selected_tower = None;
        out_events.push(Event::MatchStarted);
        info!(
            gold = self.config.starting_gold,
            lives = self.config.starting_lives,
            waves = self.catalog.total_waves(),
            "match started"
        );
        true
    }

    fn select_tower_type(&mut self, kind: Option<TowerTypeId>) -> bool {
        if self.match_state != MatchState::Playing {
            return false;
        }
        if let Some(kind) = kind {
            if self.catalog.tower(kind).is_none() {
                return false;
            }
        }
        self.selected_tower_type = kind;
        true
    }

    fn select_tower(&mut self, tower: Option<TowerId>) -> bool {
        if self.match_state != MatchState::Playing {
            return false;
        }
        if let Some(tower) = tower {
            if self.entities.tower(tower).is_none() {
                return false;
            }
        }
        self.selected_tower = tower;
        true
    }

    fn place_tower(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) -> bool {
        if self.match_state != MatchState::Playing {
            return reject_placement(cell, PlacementError::MatchNotActive, out_events);
        }
        let Some(kind) = self.selected_tower_type else {
            return reject_placement(cell, PlacementError::NoSelection, out_events);
        };
        let Some(spec) = self.catalog.tower(kind) else {
            return reject_placement(cell, PlacementError::NoSelection, out_events);
        };
        if !self.board.contains(cell) {
            return reject_placement(cell, PlacementError::OutOfBounds, out_events);
        }
        if self.board.path().contains(cell) {
            return reject_placement(cell, PlacementError::OnPath, out_events);
        }
        if self.entities.tower_at(cell) {
            return reject_placement(cell, PlacementError::Occupied, out_events);
        }
        if !self.ledger.try_spend(spec.cost) {
            return reject_placement(cell, PlacementError::InsufficientGold, out_events);
        }

        let tower = self.entities.insert_tower(spec, cell);
        self.selected_tower_type = None;
        out_events.push(Event::TowerPlaced { tower, kind, cell });
        debug!(
            tower = tower.get(),
            kind = kind.get(),
            x = cell.x(),
            y = cell.y(),
            "tower placed"
        );
        true
    }

    fn upgrade_tower(&mut self, tower_id: TowerId, out_events: &mut Vec<Event>) -> bool {
        if self.match_state != MatchState::Playing {
            return reject_upgrade(tower_id, UpgradeError::MatchNotActive, out_events);
        }
        let Some(tower) = self.entities.tower(tower_id) else {
            return reject_upgrade(tower_id, UpgradeError::UnknownTower, out_events);
        };
        let Some(spec) = self.catalog.tower(tower.kind) else {
            return reject_upgrade(tower_id, UpgradeError::UnknownTower, out_events);
        };
        let Some(tier) = spec.tiers.get(usize::from(tower.level)) else {
            return reject_upgrade(tower_id, UpgradeError::MaxLevel, out_events);
        };
        let tier = *tier;
        if !self.ledger.try_spend(tier.cost) {
            return reject_upgrade(tower_id, UpgradeError::InsufficientGold, out_events);
        }

        if let Some(tower) = self.entities.tower_mut(tower_id) {
            tower.apply_tier(&tier);
            let level = tower.level;
            out_events.push(Event::TowerUpgraded {
                tower: tower_id,
                level,
            });
            debug!(tower = tower_id.get(), level, "tower upgraded");
            true
        } else {
            false
        }
    }

    fn sell_tower(&mut self, tower_id: TowerId, out_events: &mut Vec<Event>) -> bool {
        if self.match_state != MatchState::Playing {
            return reject_sale(tower_id, SaleError::MatchNotActive, out_events);
        }
        let Some(tower) = self.entities.remove_tower(tower_id) else {
            return reject_sale(tower_id, SaleError::UnknownTower, out_events);
        };

        let refund = (u64::from(tower.invested) * SALE_REFUND_TENTHS / 10) as u32;
        self.ledger.credit(refund);
        if self.selected_tower == Some(tower_id) {
            self.selected_tower = None;
        }
        out_events.push(Event::TowerSold {
            tower: tower_id,
            refund,
        });
        debug!(tower = tower_id.get(), refund, "tower sold");
        true
    }

    fn start_wave(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.match_state != MatchState::Playing {
            return reject_wave(WaveError::MatchNotActive, out_events);
        }
        let definition = self.catalog.wave(self.waves.wave_index());
        match self.waves.try_start(definition, self.clock_ms) {
            Ok(wave) => {
                out_events.push(Event::WaveStarted { wave });
                info!(wave, "wave started");
                true
            }
            Err(reason) => reject_wave(reason, out_events),
        }
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.match_state != MatchState::Playing {
            return false;
        }

        self.clock_ms += TICK_MS;
        self.dispatch_due_spawns(out_events);
        self.advance_enemies(out_events);
        if self.match_state != MatchState::Playing {
            // Defeat ends the match mid-tick; later phases never observe it.
            return true;
        }
        self.fire_ready_towers();
        self.resolve_projectiles(out_events);
        self.decay_effects();
        self.resolve_wave_completion(out_events);
        self.check_victory(out_events);
        true
    }

    /// Releases every spawn whose scheduled time has been reached.
    fn dispatch_due_spawns(&mut self, out_events: &mut Vec<Event>) {
        let mut due = std::mem::take(&mut self.due_spawns);
        self.waves.take_due(self.clock_ms, &mut due);
        let wave = self.waves.wave_index();
        for &kind in &due {
            let Some(spec) = self.catalog.enemy(kind) else {
                continue;
            };
            let health = waves::scaled_health(spec.health, wave);
            let enemy = self.entities.spawn_enemy(spec, health);
            out_events.push(Event::EnemySpawned { enemy, kind });
            debug!(enemy = enemy.get(), kind = kind.get(), health, "enemy spawned");
        }
        self.due_spawns = due;
    }

    /// Walks every enemy along the path and removes the ones that escape.
    fn advance_enemies(&mut self, out_events: &mut Vec<Event>) {
        let dt_ms = TICK_MS as u32;
        for enemy in &mut self.entities.enemies {
            if enemy.slow_remaining_ms > 0 {
                enemy.slow_remaining_ms = enemy.slow_remaining_ms.saturating_sub(dt_ms);
                if enemy.slow_remaining_ms == 0 {
                    enemy.slow_multiplier = 1.0;
                }
            }
            enemy.progress += enemy.speed * enemy.slow_multiplier;
            if enemy.progress >= 1.0 {
                // Leftover progress is discarded: one segment per tick at most.
                enemy.progress = 0.0;
                enemy.segment += 1;
            }
        }

        let escape_segment = self.board.path().waypoint_count();
        let mut escaped: u32 = 0;
        let mut index = 0;
        while index < self.entities.enemies.len() {
            if self.entities.enemies[index].segment >= escape_segment {
                let enemy = self.entities.enemies.remove(index);
                escaped += 1;
                out_events.push(Event::EnemyEscaped { enemy: enemy.id });
                debug!(enemy = enemy.id.get(), "enemy escaped");
            } else {
                index += 1;
            }
        }

        if escaped > 0 && self.ledger.lose_lives(escaped) {
            self.match_state = MatchState::Defeat;
            out_events.push(Event::MatchEnded {
                outcome: MatchOutcome::Defeat,
            });
            info!(score = self.ledger.score(), "match lost");
        }
    }

    /// Launches a projectile from every tower with a target and a cold
    /// barrel.
    fn fire_ready_towers(&mut self) {
        if self.entities.towers.is_empty() || self.entities.enemies.is_empty() {
            return;
        }

        let towers = query::tower_view(self);
        let cooldowns = query::cooldown_view(self);
        let enemies = query::enemy_view(self);
        let mut orders = std::mem::take(&mut self.fire_orders);
        self.targeting.handle(&towers, &cooldowns, &enemies, &mut orders);

        for order in &orders {
            let Some(tower) = self.entities.tower_mut(order.tower) else {
                continue;
            };
            tower.last_fire_ms = Some(self.clock_ms);
            let seed = ProjectileSeed {
                origin: tower.cell.center(),
                impact: order.position,
                target: order.enemy,
                damage: tower.damage,
                payload: tower.payload,
                color: tower.color,
                speed: PROJECTILE_SPEED,
            };
            self.entities.spawn_projectile(seed);
        }
        self.fire_orders = orders;
    }

    /// Advances every projectile, landing the ones within one step of their
    /// impact point.
    ///
    /// Impacts commit sequentially in launch order, so a later projectile
    /// observes the kills of an earlier one within the same tick.
    fn resolve_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.entities.projectiles.len() {
            let projectile = &mut self.entities.projectiles[index];
            let remaining = projectile.position.distance(projectile.impact);
            if remaining >= projectile.speed {
                let step = projectile.speed / remaining;
                projectile.position = CellPoint::new(
                    projectile.position.x()
                        + (projectile.impact.x() - projectile.position.x()) * step,
                    projectile.position.y()
                        + (projectile.impact.y() - projectile.position.y()) * step,
                );
                index += 1;
                continue;
            }

            let projectile = self.entities.projectiles.remove(index);
            self.commit_impact(&projectile, out_events);
        }
    }

    /// Commits one landed projectile: plans the hits, then applies damage,
    /// slows, bounties, and visual markers.
    fn commit_impact(&mut self, projectile: &Projectile, out_events: &mut Vec<Event>) {
        let impact = Impact {
            point: projectile.impact,
            payload: projectile.payload,
            damage: projectile.damage,
            target: projectile.target,
        };
        let enemies = query::enemy_view(self);
        let mut plan = std::mem::take(&mut self.impact_plan);
        self.combat.handle(&impact, &enemies, &mut plan);

        if let Payload::Splash { radius } = projectile.payload {
            // The blast ring shows even when nothing stands inside it.
            self.entities.spawn_effect(
                EffectKind::Explosion {
                    center: projectile.impact,
                    radius,
                    color: projectile.color,
                },
                EXPLOSION_TTL_MS,
            );
        }
        for hop in &plan.hops {
            self.entities.spawn_effect(
                EffectKind::ChainArc {
                    from: hop.from,
                    to: hop.to,
                    color: projectile.color,
                },
                CHAIN_ARC_TTL_MS,
            );
        }

        let slow_factor = match projectile.payload {
            Payload::Slow { factor } => Some(factor),
            _ => None,
        };
        for strike in &plan.strikes {
            let Some(enemy) = self.entities.enemy_mut(strike.enemy) else {
                continue;
            };
            enemy.health = enemy.health.damaged(strike.damage);
            if let Some(factor) = slow_factor {
                // Re-application refreshes the timer instead of stacking.
                enemy.slow_multiplier = 1.0 - factor;
                enemy.slow_remaining_ms = SLOW_DURATION_MS;
            }
            if !enemy.health.is_depleted() {
                continue;
            }

            let Some(dead) = self.entities.remove_enemy(strike.enemy) else {
                continue;
            };
            self.ledger.credit(dead.reward);
            self.ledger.award(u64::from(dead.reward) * 10);
            self.entities.spawn_effect(
                EffectKind::DeathBurst {
                    center: projectile.impact,
                    color: dead.color,
                },
                DEATH_BURST_TTL_MS,
            );
            out_events.push(Event::EnemyKilled {
                enemy: dead.id,
                reward: dead.reward,
            });
            debug!(enemy = dead.id.get(), reward = dead.reward, "enemy killed");
        }

        self.impact_plan = plan;
    }

    /// Counts down every visual marker, dropping the expired ones.
    fn decay_effects(&mut self) {
        let dt_ms = TICK_MS as u32;
        for effect in &mut self.entities.effects {
            effect.remaining_ms = effect.remaining_ms.saturating_sub(dt_ms);
        }
        self.entities.effects.retain(|effect| effect.remaining_ms > 0);
    }

    /// Advances the wave lifecycle and credits the completion bonus.
    fn resolve_wave_completion(&mut self, out_events: &mut Vec<Event>) {
        let enemies_empty = self.entities.enemies.is_empty();
        let Some(completed) = self.waves.resolve_completion(enemies_empty, TICK_MS) else {
            return;
        };
        let bonus = waves::completion_bonus(completed);
        self.ledger.credit(bonus);
        out_events.push(Event::WaveCompleted {
            wave: completed,
            bonus,
        });
        info!(wave = completed, bonus, "wave completed");
    }

    /// Ends the match in victory once every wave is resolved and the path
    /// is clear.
    fn check_victory(&mut self, out_events: &mut Vec<Event>) {
        if self.waves.all_cleared() && self.entities.enemies.is_empty() {
            self.match_state = MatchState::Victory;
            out_events.push(Event::MatchEnded {
                outcome: MatchOutcome::Victory,
            });
            info!(score = self.ledger.score(), "match won");
        }
    }
}

/// Applies a command to the world, reporting whether it was accepted.
///
/// Rejected commands leave the world untouched. Rejected placements,
/// upgrades, sales, and wave starts additionally push an event naming the
/// reason; selection changes and ticks fail silently. Events describing
/// accepted mutations are appended to `out_events` in the order the
/// mutations occurred.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) -> bool {
    match command {
        Command::StartMatch => world.start_match(out_events),
        Command::SelectTowerType { kind } => world.select_tower_type(kind),
        Command::PlaceTower { cell } => world.place_tower(cell, out_events),
        Command::SelectTower { tower } => world.select_tower(tower),
        Command::UpgradeTower { tower } => world.upgrade_tower(tower, out_events),
        Command::SellTower { tower } => world.sell_tower(tower, out_events),
        Command::StartWave => world.start_wave(out_events),
        Command::Tick => world.tick(out_events),
    }
}

fn reject_placement(cell: CellCoord, reason: PlacementError, out_events: &mut Vec<Event>) -> bool {
    out_events.push(Event::TowerPlacementRejected { cell, reason });
    false
}

fn reject_upgrade(tower: TowerId, reason: UpgradeError, out_events: &mut Vec<Event>) -> bool {
    out_events.push(Event::TowerUpgradeRejected { tower, reason });
    false
}

fn reject_sale(tower: TowerId, reason: SaleError, out_events: &mut Vec<Event>) -> bool {
    out_events.push(Event::TowerSaleRejected { tower, reason });
    false
}

fn reject_wave(reason: WaveError, out_events: &mut Vec<Event>) -> bool {
    out_events.push(Event::WaveStartRejected { reason });
    false
}

/// Read-only views over the world for systems, adapters, and tests.
pub mod query {
    use neon_siege_core::{
        catalog::Catalog, path::Board, EffectSnapshot, EffectView, EnemySnapshot, EnemyView,
        HudSnapshot, ProjectileSnapshot, ProjectileView, TowerCooldownSnapshot, TowerCooldownView,
        TowerSnapshot, TowerView,
    };

    use super::World;

    /// Captures a view of every placed tower, ordered by identifier.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        let snapshots = world
            .entities
            .towers
            .iter()
            .map(|tower| TowerSnapshot {
                id: tower.id,
                kind: tower.kind,
                cell: tower.cell,
                level: tower.level,
                damage: tower.damage,
                range: tower.range,
                payload: tower.payload,
                color: tower.color,
            })
            .collect();
        TowerView::from_snapshots(snapshots)
    }

    /// Captures the cooldown progress of every placed tower.
    #[must_use]
    pub fn cooldown_view(world: &World) -> TowerCooldownView {
        let snapshots = world
            .entities
            .towers
            .iter()
            .map(|tower| TowerCooldownSnapshot {
                tower: tower.id,
                ready_in_ms: tower.ready_in_ms(world.clock_ms),
            })
            .collect();
        TowerCooldownView::from_snapshots(snapshots)
    }

    /// Captures a view of every live enemy, ordered by identifier.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let path = world.board.path();
        let snapshots = world
            .entities
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: path.position_at(enemy.segment, enemy.progress),
                segment: enemy.segment,
                progress: enemy.progress,
                health: enemy.health,
                max_health: enemy.max_health,
                armor: enemy.armor,
                slowed: enemy.slow_remaining_ms > 0,
                size: enemy.size,
                color: enemy.color,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let snapshots = world
            .entities
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                position: projectile.position,
                color: projectile.color,
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }

    /// Captures a view of every live visual marker.
    #[must_use]
    pub fn effect_view(world: &World) -> EffectView {
        let snapshots = world
            .entities
            .effects
            .iter()
            .map(|effect| EffectSnapshot {
                id: effect.id,
                kind: effect.kind,
                remaining_ms: effect.remaining_ms,
                total_ms: effect.total_ms,
            })
            .collect();
        EffectView::from_snapshots(snapshots)
    }

    /// Captures the scalar state consumed by HUD layers.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        HudSnapshot {
            gold: world.ledger.gold(),
            lives: world.ledger.lives(),
            score: world.ledger.score(),
            wave_index: world.waves.wave_index(),
            total_waves: world.catalog.total_waves(),
            wave_in_flight: world.waves.in_flight(),
            match_state: world.match_state,
            selected_tower_type: world.selected_tower_type,
            selected_tower: world.selected_tower,
        }
    }

    /// Board the match is played on.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Catalog the match draws its towers, enemies, and waves from.
    #[must_use]
    pub fn catalog(world: &World) -> &Catalog {
        &world.catalog
    }

    /// Virtual milliseconds elapsed since the match started.
    #[must_use]
    pub fn clock_ms(world: &World) -> u64 {
        world.clock_ms
    }
}
