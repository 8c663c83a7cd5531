#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Neon Siege engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems and presentation layers never touch world
//! internals; they consume the immutable snapshot views defined here and the
//! static [`catalog`] and [`path`] data the match was built from.

pub mod catalog;
pub mod path;

use serde::{Deserialize, Serialize};

use crate::catalog::{EnemyTypeId, TowerTypeId};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests that a fresh match begin, discarding all prior match state.
    StartMatch,
    /// Requests that the build selection change to the provided tower type.
    SelectTowerType {
        /// Tower type to arm for placement, or `None` to clear the selection.
        kind: Option<TowerTypeId>,
    },
    /// Requests placement of a tower of the selected type at the given cell.
    PlaceTower {
        /// Grid cell that should anchor the new tower.
        cell: CellCoord,
    },
    /// Requests that the inspection selection change to the provided tower.
    SelectTower {
        /// Tower to inspect, or `None` to clear the selection.
        tower: Option<TowerId>,
    },
    /// Requests that a tower advance to its next upgrade tier.
    UpgradeTower {
        /// Identifier of the tower to upgrade.
        tower: TowerId,
    },
    /// Requests that a tower be sold back for a partial refund.
    SellTower {
        /// Identifier of the tower to sell.
        tower: TowerId,
    },
    /// Requests that the next wave begin dispatching its spawn schedule.
    StartWave,
    /// Advances the simulation clock by exactly one fixed step.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a new match began and the simulation entered play.
    MatchStarted,
    /// Announces that a wave began dispatching its spawn schedule.
    WaveStarted {
        /// Zero-based index of the wave that started.
        wave: u32,
    },
    /// Confirms that an enemy entered the path at the first waypoint.
    EnemySpawned {
        /// Identifier assigned to the newly spawned enemy.
        enemy: EnemyId,
        /// Catalog type of the spawned enemy.
        kind: EnemyTypeId,
    },
    /// Reports that an enemy was destroyed and its bounty credited.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Gold credited for the kill.
        reward: u32,
    },
    /// Reports that an enemy reached the end of the path and cost a life.
    EnemyEscaped {
        /// Identifier of the enemy that escaped.
        enemy: EnemyId,
    },
    /// Announces that a wave finished and the completion bonus was credited.
    WaveCompleted {
        /// Zero-based index of the wave that completed.
        wave: u32,
        /// Gold credited as the completion bonus.
        bonus: u32,
    },
    /// Announces that the match reached a terminal state.
    MatchEnded {
        /// Whether the match ended in victory or defeat.
        outcome: MatchOutcome,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Catalog type of the placed tower.
        kind: TowerTypeId,
        /// Grid cell occupied by the tower.
        cell: CellCoord,
    },
    /// Confirms that a tower advanced one upgrade tier.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Upgrade level the tower reached.
        level: u8,
    },
    /// Confirms that a tower was sold and removed from the world.
    TowerSold {
        /// Identifier of the tower that was sold.
        tower: TowerId,
        /// Gold refunded by the sale.
        refund: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a tower upgrade request was rejected.
    TowerUpgradeRejected {
        /// Identifier of the tower targeted by the request.
        tower: TowerId,
        /// Specific reason the upgrade failed.
        reason: UpgradeError,
    },
    /// Reports that a tower sale request was rejected.
    TowerSaleRejected {
        /// Identifier of the tower targeted by the request.
        tower: TowerId,
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Reports that a wave start request was rejected.
    WaveStartRejected {
        /// Specific reason the wave could not start.
        reason: WaveError,
    },
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The match is not in the playing state, so placement is disabled.
    MatchNotActive,
    /// No tower type is currently selected for placement.
    NoSelection,
    /// The requested cell lies outside the board bounds.
    OutOfBounds,
    /// The requested cell is part of the enemy path.
    OnPath,
    /// The requested cell already holds a tower.
    Occupied,
    /// The treasury cannot cover the tower's base cost.
    InsufficientGold,
}

/// Reasons a tower upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeError {
    /// The match is not in the playing state, so upgrades are disabled.
    MatchNotActive,
    /// No tower with the provided identifier exists.
    UnknownTower,
    /// The tower already reached its final upgrade tier.
    MaxLevel,
    /// The treasury cannot cover the next tier's cost.
    InsufficientGold,
}

/// Reasons a tower sale request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleError {
    /// The match is not in the playing state, so sales are disabled.
    MatchNotActive,
    /// No tower with the provided identifier exists.
    UnknownTower,
}

/// Reasons a wave start request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveError {
    /// The match is not in the playing state, so waves cannot start.
    MatchNotActive,
    /// A wave is already spawning or still has enemies on the path.
    WaveInFlight,
    /// Every wave in the catalog has already been dispatched.
    AllWavesDispatched,
}

/// Lifecycle state of the match as observed by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// No match is running; commands other than [`Command::StartMatch`] are rejected.
    Menu,
    /// A match is in progress and the world accepts ticks and player commands.
    Playing,
    /// The match ended with every wave cleared.
    Victory,
    /// The match ended with the defender out of lives.
    Defeat,
}

/// Terminal result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Every wave was cleared with at least one life remaining.
    Victory,
    /// Lives were exhausted before the final wave cleared.
    Defeat,
}

/// Unique identifier assigned to a placed tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a live enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the enemy identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a cosmetic effect event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(u32);

impl EffectId {
    /// Creates a new effect identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the effect identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as x and y coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Continuous position of the cell's center in grid units.
    #[must_use]
    pub fn center(&self) -> CellPoint {
        CellPoint::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

/// Continuous position measured in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellPoint {
    x: f32,
    y: f32,
}

impl CellPoint {
    /// Creates a new continuous position from grid-unit components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component in grid units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component in grid units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(&self, other: CellPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: CellPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// Visual appearance applied to towers, enemies, projectiles, and effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Remaining hit points of an enemy, never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a health pool with the provided number of hit points.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the remaining hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the health pool after absorbing the given damage, floored at zero.
    #[must_use]
    pub const fn damaged(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Reports whether the health pool is exhausted.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Combat payload delivered by a tower's projectiles.
///
/// Exactly one variant applies per tower type; upgrades strengthen the
/// variant but never change it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Plain single-target damage with no side effect.
    Direct,
    /// Single-target damage that also slows the struck enemy.
    Slow {
        /// Fraction of movement speed removed while the slow holds, in (0, 1).
        factor: f32,
    },
    /// Area damage applied to every enemy near the impact point.
    Splash {
        /// Radius of the damaged area in grid units.
        radius: f32,
    },
    /// Damage that propagates from the impact to nearby enemies.
    Chain {
        /// Maximum number of additional enemies struck after the target.
        links: u32,
    },
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Direct
    }
}

impl Payload {
    /// Reports whether the provided bonus strengthens this payload variant.
    ///
    /// [`PayloadBonus::None`] is compatible with every variant.
    #[must_use]
    pub const fn accepts(&self, bonus: &PayloadBonus) -> bool {
        matches!(
            (self, bonus),
            (_, PayloadBonus::None)
                | (Payload::Slow { .. }, PayloadBonus::Slow { .. })
                | (Payload::Splash { .. }, PayloadBonus::Splash { .. })
                | (Payload::Chain { .. }, PayloadBonus::Chain { .. })
        )
    }

    /// Returns the payload strengthened by a matching upgrade bonus.
    ///
    /// A bonus of the wrong variant leaves the payload unchanged; catalog
    /// validation rejects such data before a match can observe it.
    #[must_use]
    pub fn boosted(self, bonus: PayloadBonus) -> Self {
        match (self, bonus) {
            (Payload::Slow { factor }, PayloadBonus::Slow { factor: extra }) => Payload::Slow {
                factor: factor + extra,
            },
            (Payload::Splash { radius }, PayloadBonus::Splash { radius: extra }) => {
                Payload::Splash {
                    radius: radius + extra,
                }
            }
            (Payload::Chain { links }, PayloadBonus::Chain { links: extra }) => Payload::Chain {
                links: links + extra,
            },
            (payload, _) => payload,
        }
    }
}

/// Payload strengthening granted by a single upgrade tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PayloadBonus {
    /// The tier leaves the payload untouched.
    None,
    /// Additional slow factor for a [`Payload::Slow`] tower.
    Slow {
        /// Slow factor added to the base payload.
        factor: f32,
    },
    /// Additional splash radius for a [`Payload::Splash`] tower.
    Splash {
        /// Radius added to the base payload, in grid units.
        radius: f32,
    },
    /// Additional chain links for a [`Payload::Chain`] tower.
    Chain {
        /// Links added to the base payload.
        links: u32,
    },
}

impl Default for PayloadBonus {
    fn default() -> Self {
        PayloadBonus::None
    }
}

/// Firing order produced by the targeting system for a single tower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerTarget {
    /// Tower that should fire this tick.
    pub tower: TowerId,
    /// Enemy selected as the target.
    pub enemy: EnemyId,
    /// Enemy position frozen at the moment the order was issued; the
    /// projectile flies to this point regardless of later movement.
    pub position: CellPoint,
}

/// A projectile arrival handed to the combat system for resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    /// Point where the projectile arrived.
    pub point: CellPoint,
    /// Payload carried by the projectile.
    pub payload: Payload,
    /// Damage carried by the projectile before armor reduction.
    pub damage: u32,
    /// Enemy the projectile was originally aimed at.
    pub target: EnemyId,
}

/// A single enemy struck during impact resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strike {
    /// Enemy that takes the damage.
    pub enemy: EnemyId,
    /// Damage to apply after armor reduction, always at least 1.
    pub damage: u32,
}

/// Endpoints of one chain-lightning hop between consecutive hits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainHop {
    /// Position the arc originates from.
    pub from: CellPoint,
    /// Position of the enemy the arc jumped to.
    pub to: CellPoint,
}

/// Complete outcome of resolving one projectile impact.
///
/// The combat system fills the plan; the world commits it by applying
/// damage, slows, rewards, and effect events in the recorded order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImpactPlan {
    /// Enemies struck by the impact, in deterministic resolution order.
    pub strikes: Vec<Strike>,
    /// Chain hops performed, in propagation order; empty for other payloads.
    pub hops: Vec<ChainHop>,
}

impl ImpactPlan {
    /// Creates an empty plan suitable for reuse across impacts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan without releasing its buffers.
    pub fn clear(&mut self) {
        self.strikes.clear();
        self.hops.clear();
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Catalog type of the tower.
    pub kind: TowerTypeId,
    /// Grid cell occupied by the tower.
    pub cell: CellCoord,
    /// Upgrade level in `0..=3`.
    pub level: u8,
    /// Damage per projectile after applied upgrades.
    pub damage: u32,
    /// Targeting radius in grid units after applied upgrades.
    pub range: f32,
    /// Combat payload after applied upgrades.
    pub payload: Payload,
    /// Display color shared with the tower's projectiles and effects.
    pub color: Color,
}

/// Cooldown progress of a single tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerCooldownSnapshot {
    /// Tower the cooldown belongs to.
    pub tower: TowerId,
    /// Milliseconds until the tower may fire again; zero means ready.
    pub ready_in_ms: u64,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Identifier allocated to the enemy by the world.
    pub id: EnemyId,
    /// Catalog type of the enemy.
    pub kind: EnemyTypeId,
    /// Interpolated position on the path in grid units.
    pub position: CellPoint,
    /// Index of the path segment the enemy currently walks.
    pub segment: u32,
    /// Fractional progress along the current segment in `[0, 1)`.
    pub progress: f32,
    /// Remaining hit points.
    pub health: Health,
    /// Hit points the enemy spawned with, after wave scaling.
    pub max_health: Health,
    /// Flat damage reduction applied to every strike.
    pub armor: u32,
    /// Indicates whether a slow effect currently holds.
    pub slowed: bool,
    /// Rendering size hint in grid units.
    pub size: f32,
    /// Display color of the enemy.
    pub color: Color,
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Current position in grid units.
    pub position: CellPoint,
    /// Display color inherited from the firing tower.
    pub color: Color,
}

/// Cosmetic effect emitted by combat resolution for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Expanding blast ring around a splash impact.
    Explosion {
        /// Center of the blast in grid units.
        center: CellPoint,
        /// Blast radius in grid units.
        radius: f32,
        /// Display color inherited from the firing tower.
        color: Color,
    },
    /// Lightning arc between two consecutive chain hits.
    ChainArc {
        /// Position the arc originates from.
        from: CellPoint,
        /// Position the arc jumps to.
        to: CellPoint,
        /// Display color inherited from the firing tower.
        color: Color,
    },
    /// Burst marking an enemy's death.
    DeathBurst {
        /// Position of the burst in grid units.
        center: CellPoint,
        /// Display color inherited from the dying enemy.
        color: Color,
    },
}

/// Immutable representation of a single effect event used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSnapshot {
    /// Identifier allocated to the effect by the world.
    pub id: EffectId,
    /// Shape and palette of the effect.
    pub kind: EffectKind,
    /// Milliseconds until the effect expires.
    pub remaining_ms: u32,
    /// Lifetime the effect started with, for fade-out interpolation.
    pub total_ms: u32,
}

/// Scalar match state consumed by HUD layers every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Gold available for placements and upgrades.
    pub gold: u32,
    /// Lives remaining before defeat.
    pub lives: u32,
    /// Score accumulated from kills.
    pub score: u64,
    /// Zero-based index of the current wave.
    pub wave_index: u32,
    /// Total number of waves in the catalog.
    pub total_waves: u32,
    /// Indicates whether a wave is spawning or still has enemies alive.
    pub wave_in_flight: bool,
    /// Lifecycle state of the match.
    pub match_state: MatchState,
    /// Tower type currently armed for placement, if any.
    pub selected_tower_type: Option<TowerTypeId>,
    /// Tower currently selected for inspection, if any.
    pub selected_tower: Option<TowerId>,
}

/// Read-only snapshot describing all placed towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing every tower's cooldown progress.
#[derive(Clone, Debug, Default)]
pub struct TowerCooldownView {
    snapshots: Vec<TowerCooldownSnapshot>,
}

impl TowerCooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerCooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.tower);
        Self { snapshots }
    }

    /// Milliseconds until the given tower may fire, if it exists.
    #[must_use]
    pub fn ready_in_ms(&self, tower: TowerId) -> Option<u64> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.tower)
            .ok()
            .map(|index| self.snapshots[index].ready_in_ms)
    }

    /// Iterator over the captured cooldown snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &TowerCooldownSnapshot> {
        self.snapshots.iter()
    }
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    ///
    /// Snapshots are ordered by identifier, which matches spawn order; all
    /// tie-breaking in targeting and chain propagation relies on this.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all live cosmetic effects.
#[derive(Clone, Debug, Default)]
pub struct EffectView {
    snapshots: Vec<EffectSnapshot>,
}

impl EffectView {
    /// Creates a new effect view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EffectSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured effect snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EffectSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EffectSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, CellPoint, Command, EnemyId, EnemySnapshot, EnemyView, Event, Health,
        MatchOutcome, Payload, PayloadBonus, PlacementError, TowerId,
    };
    use crate::catalog::EnemyTypeId;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tower_id_round_trips_through_bincode() {
        assert_round_trip(&TowerId::new(42));
    }

    #[test]
    fn commands_round_trip_through_bincode() {
        assert_round_trip(&Command::PlaceTower {
            cell: CellCoord::new(4, 7),
        });
        assert_round_trip(&Command::SelectTower { tower: None });
        assert_round_trip(&Command::Tick);
    }

    #[test]
    fn events_round_trip_through_bincode() {
        assert_round_trip(&Event::EnemyKilled {
            enemy: EnemyId::new(9),
            reward: 25,
        });
        assert_round_trip(&Event::MatchEnded {
            outcome: MatchOutcome::Defeat,
        });
        assert_round_trip(&Event::TowerPlacementRejected {
            cell: CellCoord::new(0, 6),
            reason: PlacementError::OnPath,
        });
    }

    #[test]
    fn payload_round_trips_through_bincode() {
        assert_round_trip(&Payload::Splash { radius: 1.2 });
        assert_round_trip(&Payload::Chain { links: 3 });
    }

    #[test]
    fn cell_center_offsets_by_half_a_cell() {
        let center = CellCoord::new(3, 5).center();
        assert_eq!(center.x(), 3.5);
        assert_eq!(center.y(), 5.5);
    }

    #[test]
    fn point_distance_matches_euclidean_expectation() {
        let origin = CellPoint::new(1.0, 2.0);
        let other = CellPoint::new(4.0, 6.0);
        assert_eq!(origin.distance_squared(other), 25.0);
        assert_eq!(origin.distance(other), 5.0);
    }

    #[test]
    fn health_damage_floors_at_zero() {
        let health = Health::new(10);
        assert_eq!(health.damaged(4).get(), 6);
        assert!(health.damaged(25).is_depleted());
    }

    #[test]
    fn payload_boost_strengthens_matching_variant() {
        let slow = Payload::Slow { factor: 0.4 };
        assert_eq!(
            slow.boosted(PayloadBonus::Slow { factor: 0.1 }),
            Payload::Slow { factor: 0.5 }
        );
        assert_eq!(
            Payload::Chain { links: 3 }.boosted(PayloadBonus::Chain { links: 2 }),
            Payload::Chain { links: 5 }
        );
    }

    #[test]
    fn payload_boost_ignores_mismatched_variant() {
        let direct = Payload::Direct;
        assert_eq!(direct.boosted(PayloadBonus::Slow { factor: 0.1 }), direct);
        assert!(direct.accepts(&PayloadBonus::None));
        assert!(!direct.accepts(&PayloadBonus::Chain { links: 1 }));
    }

    #[test]
    fn enemy_view_orders_snapshots_by_identifier() {
        let late = sample_snapshot(EnemyId::new(7));
        let early = sample_snapshot(EnemyId::new(2));
        let view = EnemyView::from_snapshots(vec![late, early]);
        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![2, 7]);
    }

    fn sample_snapshot(id: EnemyId) -> EnemySnapshot {
        EnemySnapshot {
            id,
            kind: EnemyTypeId::new(0),
            position: CellPoint::new(0.5, 6.5),
            segment: 0,
            progress: 0.0,
            health: Health::new(40),
            max_health: Health::new(40),
            armor: 0,
            slowed: false,
            size: 0.55,
            color: super::Color::from_rgb(0x88, 0xff, 0x88),
        }
    }
}
