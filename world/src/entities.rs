//! Live entity records and their identifier allocation.

use neon_siege_core::{
    catalog::{EnemySpec, EnemyTypeId, TowerSpec, TowerTypeId, UpgradeTier},
    CellCoord, CellPoint, Color, EffectId, EffectKind, EnemyId, Health, Payload, ProjectileId,
    TowerId,
};

/// A placed tower with its derived combat statistics.
#[derive(Clone, Debug)]
pub(crate) struct Tower {
    pub(crate) id: TowerId,
    pub(crate) kind: TowerTypeId,
    pub(crate) cell: CellCoord,
    pub(crate) level: u8,
    pub(crate) damage: u32,
    pub(crate) range: f32,
    pub(crate) fire_rate_ms: u32,
    pub(crate) payload: Payload,
    pub(crate) color: Color,
    /// Base cost plus every applied tier cost; sales refund against this.
    pub(crate) invested: u32,
    /// Virtual time of the last shot. `None` until the tower first fires,
    /// so freshly placed towers shoot on their first opportunity.
    pub(crate) last_fire_ms: Option<u64>,
}

impl Tower {
    fn from_spec(id: TowerId, spec: &TowerSpec, cell: CellCoord) -> Self {
        Self {
            id,
            kind: spec.id,
            cell,
            level: 0,
            damage: spec.damage,
            range: spec.range,
            fire_rate_ms: spec.fire_rate_ms,
            payload: spec.payload,
            color: spec.color,
            invested: spec.cost,
            last_fire_ms: None,
        }
    }

    /// Folds one upgrade tier into the derived statistics.
    pub(crate) fn apply_tier(&mut self, tier: &UpgradeTier) {
        self.level += 1;
        self.damage += tier.damage_bonus;
        self.range += tier.range_bonus;
        self.payload = self.payload.boosted(tier.payload_bonus);
        self.invested += tier.cost;
    }

    /// Milliseconds until the tower may fire again at the given time.
    pub(crate) fn ready_in_ms(&self, now_ms: u64) -> u64 {
        match self.last_fire_ms {
            Some(fired_ms) => (fired_ms + u64::from(self.fire_rate_ms)).saturating_sub(now_ms),
            None => 0,
        }
    }
}

/// A live enemy walking the path.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyTypeId,
    pub(crate) segment: u32,
    pub(crate) progress: f32,
    pub(crate) health: Health,
    pub(crate) max_health: Health,
    pub(crate) speed: f32,
    pub(crate) reward: u32,
    pub(crate) armor: u32,
    pub(crate) size: f32,
    pub(crate) color: Color,
    /// Remaining slow duration; re-application refreshes rather than stacks.
    pub(crate) slow_remaining_ms: u32,
    /// Speed multiplier while slowed, `1.0` otherwise.
    pub(crate) slow_multiplier: f32,
}

/// A projectile in flight toward its frozen impact point.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: CellPoint,
    /// Target position captured at launch; the projectile never re-aims.
    pub(crate) impact: CellPoint,
    pub(crate) target: EnemyId,
    pub(crate) damage: u32,
    pub(crate) payload: Payload,
    pub(crate) color: Color,
    /// Cells travelled per tick.
    pub(crate) speed: f32,
}

/// A transient visual marker counting down to removal.
#[derive(Clone, Debug)]
pub(crate) struct Effect {
    pub(crate) id: EffectId,
    pub(crate) kind: EffectKind,
    pub(crate) remaining_ms: u32,
    pub(crate) total_ms: u32,
}

/// Owner of every live entity collection and its identifier counters.
///
/// Collections stay in insertion order, which for enemies doubles as spawn
/// order. Identifiers are never reused within one match.
#[derive(Debug, Default)]
pub(crate) struct Entities {
    pub(crate) towers: Vec<Tower>,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) effects: Vec<Effect>,
    next_tower: u32,
    next_enemy: u32,
    next_projectile: u32,
    next_effect: u32,
}

impl Entities {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Clears every collection and restarts identifier allocation from zero.
    pub(crate) fn reset(&mut self) {
        self.towers.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.effects.clear();
        self.next_tower = 0;
        self.next_enemy = 0;
        self.next_projectile = 0;
        self.next_effect = 0;
    }

    pub(crate) fn insert_tower(&mut self, spec: &TowerSpec, cell: CellCoord) -> TowerId {
        let id = TowerId::new(self.next_tower);
        self.next_tower += 1;
        self.towers.push(Tower::from_spec(id, spec, cell));
        id
    }

    pub(crate) fn remove_tower(&mut self, id: TowerId) -> Option<Tower> {
        let index = self.towers.iter().position(|tower| tower.id == id)?;
        Some(self.towers.remove(index))
    }

    pub(crate) fn tower(&self, id: TowerId) -> Option<&Tower> {
        self.towers.iter().find(|tower| tower.id == id)
    }

    pub(crate) fn tower_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.towers.iter_mut().find(|tower| tower.id == id)
    }

    pub(crate) fn tower_at(&self, cell: CellCoord) -> bool {
        self.towers.iter().any(|tower| tower.cell == cell)
    }

    pub(crate) fn spawn_enemy(&mut self, spec: &EnemySpec, health: u32) -> EnemyId {
        let id = EnemyId::new(self.next_enemy);
        self.next_enemy += 1;
        self.enemies.push(Enemy {
            id,
            kind: spec.id,
            segment: 0,
            progress: 0.0,
            health: Health::new(health),
            max_health: Health::new(health),
            speed: spec.speed,
            reward: spec.reward,
            armor: spec.armor,
            size: spec.size,
            color: spec.color,
            slow_remaining_ms: 0,
            slow_multiplier: 1.0,
        });
        id
    }

    pub(crate) fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub(crate) fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub(crate) fn spawn_projectile(&mut self, projectile: ProjectileSeed) {
        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile += 1;
        self.projectiles.push(Projectile {
            id,
            position: projectile.origin,
            impact: projectile.impact,
            target: projectile.target,
            damage: projectile.damage,
            payload: projectile.payload,
            color: projectile.color,
            speed: projectile.speed,
        });
    }

    pub(crate) fn spawn_effect(&mut self, kind: EffectKind, ttl_ms: u32) {
        let id = EffectId::new(self.next_effect);
        self.next_effect += 1;
        self.effects.push(Effect {
            id,
            kind,
            remaining_ms: ttl_ms,
            total_ms: ttl_ms,
        });
    }
}

/// Launch parameters for a new projectile.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectileSeed {
    pub(crate) origin: CellPoint,
    pub(crate) impact: CellPoint,
    pub(crate) target: EnemyId,
    pub(crate) damage: u32,
    pub(crate) payload: Payload,
    pub(crate) color: Color,
    pub(crate) speed: f32,
}
