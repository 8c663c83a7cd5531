#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic firing orders from world snapshots.

use neon_siege_core::{
    CellPoint, EnemyId, EnemyView, TowerCooldownView, TowerTarget, TowerView,
};

/// Targeting system that turns ready towers and live enemies into firing orders.
///
/// A tower produces at most one order per pass: the nearest enemy whose
/// distance from the tower center does not exceed the tower's range. Distance
/// ties resolve to the earlier-spawned enemy, so identical snapshots always
/// yield identical orders.
#[derive(Debug, Default)]
pub struct Targeting;

impl Targeting {
    /// Creates a new targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes firing orders for the provided world snapshot.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// orders. Towers still on cooldown, or absent from the cooldown view,
    /// hold their fire.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        cooldowns: &TowerCooldownView,
        enemies: &EnemyView,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if enemies.is_empty() {
            return;
        }

        for tower in towers.iter() {
            if cooldowns.ready_in_ms(tower.id) != Some(0) {
                continue;
            }

            let origin = tower.cell.center();
            let max_distance_sq = tower.range * tower.range;
            let mut best: Option<Candidate> = None;

            for enemy in enemies.iter() {
                let distance_sq = origin.distance_squared(enemy.position);
                if distance_sq > max_distance_sq {
                    continue;
                }

                let current = Candidate {
                    distance_sq,
                    enemy: enemy.id,
                    position: enemy.position,
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(chosen) = best {
                out.push(TowerTarget {
                    tower: tower.id,
                    enemy: chosen.enemy,
                    position: chosen.position,
                });
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    distance_sq: f32,
    enemy: EnemyId,
    position: CellPoint,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.enemy < other.enemy
    }
}

#[cfg(test)]
mod tests {
    use super::{TowerTarget, Targeting};
    use neon_siege_core::{
        catalog::{EnemyTypeId, TowerTypeId},
        CellCoord, CellPoint, Color, EnemyId, EnemySnapshot, EnemyView, Health, Payload,
        TowerCooldownSnapshot, TowerCooldownView, TowerId, TowerSnapshot, TowerView,
    };

    fn tower_snapshot(id: u32, cell: (u32, u32), range: f32) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind: TowerTypeId::new(0),
            cell: CellCoord::new(cell.0, cell.1),
            level: 0,
            damage: 12,
            range,
            payload: Payload::Direct,
            color: Color::from_rgb(0x00, 0xff, 0x88),
        }
    }

    fn enemy_snapshot(id: u32, position: (f32, f32)) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyTypeId::new(0),
            position: CellPoint::new(position.0, position.1),
            segment: 0,
            progress: 0.0,
            health: Health::new(40),
            max_health: Health::new(40),
            armor: 0,
            slowed: false,
            size: 0.55,
            color: Color::from_rgb(0x88, 0xff, 0x88),
        }
    }

    fn ready(id: u32) -> TowerCooldownSnapshot {
        TowerCooldownSnapshot {
            tower: TowerId::new(id),
            ready_in_ms: 0,
        }
    }

    fn cooling(id: u32, ready_in_ms: u64) -> TowerCooldownSnapshot {
        TowerCooldownSnapshot {
            tower: TowerId::new(id),
            ready_in_ms,
        }
    }

    #[test]
    fn targets_nearest_enemy_within_range() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (5, 5), 2.5)]);
        let cooldowns = TowerCooldownView::from_snapshots(vec![ready(1)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy_snapshot(7, (7.5, 5.5)),
            enemy_snapshot(8, (6.5, 5.5)),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tower, TowerId::new(1));
        assert_eq!(out[0].enemy, EnemyId::new(8));
        assert_eq!(out[0].position, CellPoint::new(6.5, 5.5));
    }

    #[test]
    fn enemy_outside_range_is_ignored() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (0, 0), 2.5)]);
        let cooldowns = TowerCooldownView::from_snapshots(vec![ready(1)]);
        let enemies = EnemyView::from_snapshots(vec![enemy_snapshot(2, (9.5, 0.5))]);

        let mut out = Vec::new();
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (0, 0), 2.5)]);
        let cooldowns = TowerCooldownView::from_snapshots(vec![ready(1)]);
        // Tower center is (0.5, 0.5); the enemy sits exactly 2.5 units away.
        let enemies = EnemyView::from_snapshots(vec![enemy_snapshot(2, (3.0, 0.5))]);

        let mut out = Vec::new();
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(2));
    }

    #[test]
    fn cooling_tower_holds_fire() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![
            tower_snapshot(1, (5, 5), 2.5),
            tower_snapshot(2, (5, 7), 2.5),
        ]);
        let cooldowns =
            TowerCooldownView::from_snapshots(vec![cooling(1, 250), ready(2)]);
        let enemies = EnemyView::from_snapshots(vec![enemy_snapshot(9, (5.5, 6.5))]);

        let mut out = Vec::new();
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tower, TowerId::new(2));
    }

    #[test]
    fn tower_missing_from_cooldown_view_holds_fire() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (5, 5), 2.5)]);
        let cooldowns = TowerCooldownView::from_snapshots(Vec::new());
        let enemies = EnemyView::from_snapshots(vec![enemy_snapshot(9, (5.5, 6.5))]);

        let mut out = Vec::new();
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn earlier_spawn_wins_distance_ties() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (5, 5), 2.5)]);
        let cooldowns = TowerCooldownView::from_snapshots(vec![ready(1)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy_snapshot(9, (4.5, 5.5)),
            enemy_snapshot(4, (6.5, 5.5)),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(4));
    }

    #[test]
    fn output_is_cleared_when_no_enemies_remain() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (5, 5), 2.5)]);
        let cooldowns = TowerCooldownView::from_snapshots(vec![ready(1)]);
        let enemies = EnemyView::from_snapshots(Vec::new());

        let mut out = vec![TowerTarget {
            tower: TowerId::new(99),
            enemy: EnemyId::new(99),
            position: CellPoint::new(0.0, 0.0),
        }];
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn each_ready_tower_fires_independently() {
        let mut system = Targeting::new();
        let towers = TowerView::from_snapshots(vec![
            tower_snapshot(1, (2, 5), 2.5),
            tower_snapshot(2, (8, 5), 2.5),
        ]);
        let cooldowns = TowerCooldownView::from_snapshots(vec![ready(1), ready(2)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy_snapshot(3, (2.5, 6.5)),
            enemy_snapshot(4, (8.5, 6.5)),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &cooldowns, &enemies, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].tower, TowerId::new(1));
        assert_eq!(out[0].enemy, EnemyId::new(3));
        assert_eq!(out[1].tower, TowerId::new(2));
        assert_eq!(out[1].enemy, EnemyId::new(4));
    }
}
