#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves projectile impacts into damage plans.
//!
//! The system never mutates world state: it inspects the enemy snapshot that
//! was current when the projectile arrived and records which enemies are
//! struck, with what post-armor damage, and which chain hops occurred. The
//! world commits the plan afterwards, in the recorded order.

use neon_siege_core::{
    CellPoint, ChainHop, EnemyId, EnemySnapshot, EnemyView, Impact, ImpactPlan, Payload, Strike,
};

/// Maximum distance, in grid units, a chain payload jumps between enemies.
///
/// The bound is strict: an enemy exactly this far away is out of reach.
pub const CHAIN_HOP_RANGE: f32 = 2.5;

/// Combat system that reuses a visited-enemy buffer across impacts.
#[derive(Debug, Default)]
pub struct Combat {
    chained: Vec<EnemyId>,
}

impl Combat {
    /// Creates a new combat system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a single projectile impact against the current enemies.
    ///
    /// The plan is cleared before resolution. A single-target payload whose
    /// target no longer exists produces an empty plan; splash and chain
    /// payloads still work outward from the frozen impact point.
    pub fn handle(&mut self, impact: &Impact, enemies: &EnemyView, out: &mut ImpactPlan) {
        out.clear();

        match impact.payload {
            Payload::Direct | Payload::Slow { .. } => {
                if let Some(enemy) = find_enemy(enemies, impact.target) {
                    out.strikes.push(strike(&enemy, impact.damage));
                }
            }
            Payload::Splash { radius } => {
                let radius_sq = radius * radius;
                for enemy in enemies.iter() {
                    if impact.point.distance_squared(enemy.position) <= radius_sq {
                        out.strikes.push(strike(enemy, impact.damage));
                    }
                }
            }
            Payload::Chain { links } => {
                self.resolve_chain(impact, links, enemies, out);
            }
        }
    }

    fn resolve_chain(
        &mut self,
        impact: &Impact,
        links: u32,
        enemies: &EnemyView,
        out: &mut ImpactPlan,
    ) {
        // The original target is marked visited even when it died in flight,
        // so propagation can never strike it a second time.
        self.chained.clear();
        self.chained.push(impact.target);

        if let Some(enemy) = find_enemy(enemies, impact.target) {
            out.strikes.push(strike(&enemy, impact.damage));
        }

        let mut from = impact.point;
        for _ in 0..links {
            let Some(next) = self.nearest_unchained(enemies, from) else {
                break;
            };

            self.chained.push(next.id);
            out.strikes.push(strike(&next, impact.damage));
            out.hops.push(ChainHop {
                from,
                to: next.position,
            });
            from = next.position;
        }
    }

    fn nearest_unchained(&self, enemies: &EnemyView, from: CellPoint) -> Option<EnemySnapshot> {
        let hop_range_sq = CHAIN_HOP_RANGE * CHAIN_HOP_RANGE;
        let mut best: Option<(f32, EnemySnapshot)> = None;

        for enemy in enemies.iter() {
            if self.chained.contains(&enemy.id) {
                continue;
            }

            let distance_sq = from.distance_squared(enemy.position);
            if distance_sq >= hop_range_sq {
                continue;
            }

            match &mut best {
                Some((best_distance_sq, chosen)) => {
                    if distance_sq < *best_distance_sq {
                        *best_distance_sq = distance_sq;
                        *chosen = *enemy;
                    }
                }
                None => best = Some((distance_sq, *enemy)),
            }
        }

        best.map(|(_, snapshot)| snapshot)
    }
}

fn find_enemy(enemies: &EnemyView, id: EnemyId) -> Option<EnemySnapshot> {
    enemies.iter().find(|enemy| enemy.id == id).copied()
}

fn strike(enemy: &EnemySnapshot, damage: u32) -> Strike {
    Strike {
        enemy: enemy.id,
        damage: damage.saturating_sub(enemy.armor).max(1),
    }
}
