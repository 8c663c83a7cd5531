//! Static tower, enemy, and wave tables.
//!
//! A [`Catalog`] is read-only external input: the world never mutates it and
//! every id reference inside it is checked once, at construction, so the
//! simulation can trust lookups unconditionally. The standard catalog
//! ships the built-in balance tables; custom catalogs built from data
//! files pass through the same validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Color, Payload, PayloadBonus};

/// Number of upgrade tiers every tower type must define.
pub const TIER_COUNT: usize = 3;

/// Identifier of a tower type within a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerTypeId(u32);

impl TowerTypeId {
    /// Creates a new tower type identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of an enemy type within a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyTypeId(u32);

impl EnemyTypeId {
    /// Creates a new enemy type identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One purchasable upgrade step for a tower type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeTier {
    /// Gold debited when the tier is applied.
    pub cost: u32,
    /// Damage added to the tower's derived damage.
    pub damage_bonus: u32,
    /// Range added to the tower's derived range, in grid units.
    pub range_bonus: f32,
    /// Payload strengthening granted by the tier, if any.
    #[serde(default)]
    pub payload_bonus: PayloadBonus,
}

/// Static description of one tower type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    /// Identifier the catalog and commands refer to the type by.
    pub id: TowerTypeId,
    /// Display name shown by adapters.
    pub name: String,
    /// Display color shared with projectiles and effects.
    pub color: Color,
    /// Gold debited on placement.
    pub cost: u32,
    /// Damage per projectile before upgrades.
    pub damage: u32,
    /// Targeting radius in grid units before upgrades.
    pub range: f32,
    /// Minimum milliseconds between consecutive shots.
    pub fire_rate_ms: u32,
    /// Combat payload delivered by the type's projectiles.
    #[serde(default)]
    pub payload: Payload,
    /// Upgrade ladder; validation requires exactly [`TIER_COUNT`] entries.
    pub tiers: Vec<UpgradeTier>,
}

/// Static description of one enemy type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    /// Identifier the catalog and waves refer to the type by.
    pub id: EnemyTypeId,
    /// Display name shown by adapters.
    pub name: String,
    /// Display color of the enemy and its death burst.
    pub color: Color,
    /// Hit points before wave scaling.
    pub health: u32,
    /// Path segments traversed per tick at full speed.
    pub speed: f32,
    /// Gold credited when the enemy dies.
    pub reward: u32,
    /// Flat damage reduction applied to every strike.
    #[serde(default)]
    pub armor: u32,
    /// Rendering size hint in grid units.
    pub size: f32,
}

/// One burst of identical enemies inside a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGroup {
    /// Enemy type the group spawns.
    pub kind: EnemyTypeId,
    /// Number of enemies in the group.
    pub count: u32,
    /// Milliseconds between consecutive spawns within the group.
    pub spawn_delay_ms: u32,
}

/// Ordered spawn groups that make up one wave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Groups dispatched in order, separated by the fixed inter-group gap.
    pub groups: Vec<SpawnGroup>,
}

/// Reasons a catalog is rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CatalogError {
    /// Two tower specs share the same identifier.
    #[error("duplicate tower type id {}", .id.get())]
    DuplicateTowerType {
        /// Identifier that appeared more than once.
        id: TowerTypeId,
    },
    /// Two enemy specs share the same identifier.
    #[error("duplicate enemy type id {}", .id.get())]
    DuplicateEnemyType {
        /// Identifier that appeared more than once.
        id: EnemyTypeId,
    },
    /// A tower spec does not define exactly [`TIER_COUNT`] tiers.
    #[error("tower type {} defines {found} upgrade tiers, expected {TIER_COUNT}", .id.get())]
    WrongTierCount {
        /// Tower type with the malformed ladder.
        id: TowerTypeId,
        /// Number of tiers found.
        found: usize,
    },
    /// A tier carries a bonus for a different payload variant.
    #[error("tower type {} tier {tier} bonus does not match its payload", .id.get())]
    MismatchedPayloadBonus {
        /// Tower type with the malformed tier.
        id: TowerTypeId,
        /// Zero-based index of the offending tier.
        tier: usize,
    },
    /// A slow payload would stop enemies outright once fully upgraded.
    #[error("tower type {} stacks a slow factor of {total} which must stay below 1", .id.get())]
    ExcessiveSlow {
        /// Tower type with the runaway slow ladder.
        id: TowerTypeId,
        /// Slow factor reached at the final tier.
        total: f32,
    },
    /// An enemy spec has a speed that can never advance the path.
    #[error("enemy type {} must have positive speed", .id.get())]
    NonPositiveSpeed {
        /// Enemy type with the malformed speed.
        id: EnemyTypeId,
    },
    /// The catalog defines no waves, leaving nothing to play.
    #[error("catalog defines no waves")]
    NoWaves,
    /// A wave defines no spawn groups.
    #[error("wave {wave} defines no spawn groups")]
    EmptyWave {
        /// Zero-based index of the empty wave.
        wave: u32,
    },
    /// A spawn group has a zero count.
    #[error("wave {wave} group {group} spawns no enemies")]
    EmptyGroup {
        /// Zero-based index of the wave.
        wave: u32,
        /// Zero-based index of the group within the wave.
        group: usize,
    },
    /// A spawn group references an enemy type the catalog does not define.
    #[error("wave {wave} references unknown enemy type {}", .id.get())]
    UnknownEnemyType {
        /// Zero-based index of the wave.
        wave: u32,
        /// Identifier that failed to resolve.
        id: EnemyTypeId,
    },
}

/// Validated, read-only content tables for one game.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    towers: Vec<TowerSpec>,
    enemies: Vec<EnemySpec>,
    waves: Vec<WaveDefinition>,
}

impl Catalog {
    /// Builds a catalog from raw tables, failing fast on malformed data.
    ///
    /// Tables are sorted by id internally; input order does not matter.
    pub fn new(
        mut towers: Vec<TowerSpec>,
        mut enemies: Vec<EnemySpec>,
        waves: Vec<WaveDefinition>,
    ) -> Result<Self, CatalogError> {
        towers.sort_by_key(|spec| spec.id);
        for pair in towers.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(CatalogError::DuplicateTowerType { id: pair[0].id });
            }
        }
        for spec in &towers {
            if spec.tiers.len() != TIER_COUNT {
                return Err(CatalogError::WrongTierCount {
                    id: spec.id,
                    found: spec.tiers.len(),
                });
            }
            for (index, tier) in spec.tiers.iter().enumerate() {
                if !spec.payload.accepts(&tier.payload_bonus) {
                    return Err(CatalogError::MismatchedPayloadBonus {
                        id: spec.id,
                        tier: index,
                    });
                }
            }
            if let Payload::Slow { factor } = spec.payload {
                let mut total = factor;
                for tier in &spec.tiers {
                    if let PayloadBonus::Slow { factor: extra } = tier.payload_bonus {
                        total += extra;
                    }
                }
                if total >= 1.0 {
                    return Err(CatalogError::ExcessiveSlow { id: spec.id, total });
                }
            }
        }

        enemies.sort_by_key(|spec| spec.id);
        for pair in enemies.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(CatalogError::DuplicateEnemyType { id: pair[0].id });
            }
        }
        for spec in &enemies {
            if spec.speed <= 0.0 {
                return Err(CatalogError::NonPositiveSpeed { id: spec.id });
            }
        }

        if waves.is_empty() {
            return Err(CatalogError::NoWaves);
        }
        for (wave_index, wave) in waves.iter().enumerate() {
            let wave_index = wave_index as u32;
            if wave.groups.is_empty() {
                return Err(CatalogError::EmptyWave { wave: wave_index });
            }
            for (group_index, group) in wave.groups.iter().enumerate() {
                if group.count == 0 {
                    return Err(CatalogError::EmptyGroup {
                        wave: wave_index,
                        group: group_index,
                    });
                }
                if enemies
                    .binary_search_by_key(&group.kind, |spec| spec.id)
                    .is_err()
                {
                    return Err(CatalogError::UnknownEnemyType {
                        wave: wave_index,
                        id: group.kind,
                    });
                }
            }
        }

        Ok(Self {
            towers,
            enemies,
            waves,
        })
    }

    /// Tower specs ordered by id.
    #[must_use]
    pub fn towers(&self) -> &[TowerSpec] {
        &self.towers
    }

    /// Enemy specs ordered by id.
    #[must_use]
    pub fn enemies(&self) -> &[EnemySpec] {
        &self.enemies
    }

    /// Wave definitions in play order.
    #[must_use]
    pub fn waves(&self) -> &[WaveDefinition] {
        &self.waves
    }

    /// Looks up a tower spec by id.
    #[must_use]
    pub fn tower(&self, id: TowerTypeId) -> Option<&TowerSpec> {
        self.towers
            .binary_search_by_key(&id, |spec| spec.id)
            .ok()
            .map(|index| &self.towers[index])
    }

    /// Looks up an enemy spec by id.
    #[must_use]
    pub fn enemy(&self, id: EnemyTypeId) -> Option<&EnemySpec> {
        self.enemies
            .binary_search_by_key(&id, |spec| spec.id)
            .ok()
            .map(|index| &self.enemies[index])
    }

    /// Looks up a wave definition by zero-based index.
    #[must_use]
    pub fn wave(&self, index: u32) -> Option<&WaveDefinition> {
        self.waves.get(index as usize)
    }

    /// Number of waves the catalog defines.
    #[must_use]
    pub fn total_waves(&self) -> u32 {
        self.waves.len() as u32
    }

    /// The built-in balance tables: five towers, seven enemies, fifteen
    /// waves.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_towers(), standard_enemies(), standard_waves())
            .expect("standard catalog is valid")
    }
}

/// Tower type id of the standard rapid-fire blaster.
pub const BLASTER: TowerTypeId = TowerTypeId::new(0);
/// Tower type id of the standard heavy cannon.
pub const CANNON: TowerTypeId = TowerTypeId::new(1);
/// Tower type id of the standard slowing frost tower.
pub const FROST: TowerTypeId = TowerTypeId::new(2);
/// Tower type id of the standard splash rocket tower.
pub const ROCKET: TowerTypeId = TowerTypeId::new(3);
/// Tower type id of the standard chain-lightning shock tower.
pub const SHOCK: TowerTypeId = TowerTypeId::new(4);

/// Enemy type id of the standard grunt.
pub const GRUNT: EnemyTypeId = EnemyTypeId::new(0);
/// Enemy type id of the standard fast runner.
pub const RUNNER: EnemyTypeId = EnemyTypeId::new(1);
/// Enemy type id of the standard tough brute.
pub const BRUTE: EnemyTypeId = EnemyTypeId::new(2);
/// Enemy type id of the standard swarm midge.
pub const SWARM: EnemyTypeId = EnemyTypeId::new(3);
/// Enemy type id of the standard armored tank.
pub const TANK: EnemyTypeId = EnemyTypeId::new(4);
/// Enemy type id of the standard phasing phantom.
pub const PHANTOM: EnemyTypeId = EnemyTypeId::new(5);
/// Enemy type id of the standard boss.
pub const BOSS: EnemyTypeId = EnemyTypeId::new(6);

fn tier(
    cost: u32,
    damage_bonus: u32,
    range_bonus: f32,
    payload_bonus: PayloadBonus,
) -> UpgradeTier {
    UpgradeTier {
        cost,
        damage_bonus,
        range_bonus,
        payload_bonus,
    }
}

fn standard_towers() -> Vec<TowerSpec> {
    vec![
        TowerSpec {
            id: BLASTER,
            name: "Blaster".to_owned(),
            color: Color::from_rgb(0x00, 0xff, 0x88),
            cost: 50,
            damage: 12,
            range: 2.5,
            fire_rate_ms: 400,
            payload: Payload::Direct,
            tiers: vec![
                tier(60, 8, 0.3, PayloadBonus::None),
                tier(120, 15, 0.5, PayloadBonus::None),
                tier(240, 30, 0.7, PayloadBonus::None),
            ],
        },
        TowerSpec {
            id: CANNON,
            name: "Cannon".to_owned(),
            color: Color::from_rgb(0xff, 0x6b, 0x00),
            cost: 100,
            damage: 45,
            range: 2.2,
            fire_rate_ms: 1100,
            payload: Payload::Direct,
            tiers: vec![
                tier(100, 25, 0.2, PayloadBonus::None),
                tier(200, 50, 0.4, PayloadBonus::None),
                tier(400, 100, 0.6, PayloadBonus::None),
            ],
        },
        TowerSpec {
            id: FROST,
            name: "Frost".to_owned(),
            color: Color::from_rgb(0x00, 0xd4, 0xff),
            cost: 75,
            damage: 8,
            range: 2.0,
            fire_rate_ms: 600,
            payload: Payload::Slow { factor: 0.4 },
            tiers: vec![
                tier(75, 5, 0.3, PayloadBonus::Slow { factor: 0.1 }),
                tier(150, 10, 0.5, PayloadBonus::Slow { factor: 0.15 }),
                tier(300, 20, 0.7, PayloadBonus::Slow { factor: 0.2 }),
            ],
        },
        TowerSpec {
            id: ROCKET,
            name: "Rocket".to_owned(),
            color: Color::from_rgb(0xff, 0x00, 0x66),
            cost: 150,
            damage: 60,
            range: 3.5,
            fire_rate_ms: 1800,
            payload: Payload::Splash { radius: 1.2 },
            tiers: vec![
                tier(150, 30, 0.4, PayloadBonus::Splash { radius: 0.3 }),
                tier(300, 60, 0.6, PayloadBonus::Splash { radius: 0.5 }),
                tier(600, 120, 1.0, PayloadBonus::Splash { radius: 0.8 }),
            ],
        },
        TowerSpec {
            id: SHOCK,
            name: "Shock".to_owned(),
            color: Color::from_rgb(0xff, 0xdd, 0x00),
            cost: 200,
            damage: 30,
            range: 2.3,
            fire_rate_ms: 500,
            payload: Payload::Chain { links: 3 },
            tiers: vec![
                tier(200, 18, 0.2, PayloadBonus::Chain { links: 1 }),
                tier(400, 35, 0.4, PayloadBonus::Chain { links: 2 }),
                tier(800, 70, 0.6, PayloadBonus::Chain { links: 3 }),
            ],
        },
    ]
}

fn enemy(
    id: EnemyTypeId,
    name: &str,
    color: Color,
    health: u32,
    speed: f32,
    reward: u32,
    armor: u32,
    size: f32,
) -> EnemySpec {
    EnemySpec {
        id,
        name: name.to_owned(),
        color,
        health,
        speed,
        reward,
        armor,
        size,
    }
}

fn standard_enemies() -> Vec<EnemySpec> {
    vec![
        enemy(
            GRUNT,
            "Grunt",
            Color::from_rgb(0x88, 0xff, 0x88),
            40,
            0.06,
            10,
            0,
            0.55,
        ),
        enemy(
            RUNNER,
            "Runner",
            Color::from_rgb(0xff, 0x88, 0xff),
            25,
            0.12,
            15,
            0,
            0.45,
        ),
        enemy(
            BRUTE,
            "Brute",
            Color::from_rgb(0xff, 0x88, 0x44),
            150,
            0.035,
            25,
            0,
            0.75,
        ),
        enemy(
            SWARM,
            "Swarm",
            Color::from_rgb(0x88, 0xff, 0xff),
            15,
            0.09,
            5,
            0,
            0.35,
        ),
        enemy(
            TANK,
            "Tank",
            Color::from_rgb(0xff, 0x44, 0x44),
            300,
            0.025,
            50,
            8,
            0.85,
        ),
        enemy(
            PHANTOM,
            "Phantom",
            Color::from_rgb(0xaa, 0x88, 0xff),
            60,
            0.1,
            30,
            0,
            0.5,
        ),
        enemy(
            BOSS,
            "Boss",
            Color::from_rgb(0xff, 0xff, 0x00),
            1500,
            0.018,
            300,
            5,
            1.1,
        ),
    ]
}

fn group(kind: EnemyTypeId, count: u32, spawn_delay_ms: u32) -> SpawnGroup {
    SpawnGroup {
        kind,
        count,
        spawn_delay_ms,
    }
}

fn standard_waves() -> Vec<WaveDefinition> {
    let waves = vec![
        vec![group(GRUNT, 6, 700)],
        vec![group(GRUNT, 8, 600), group(RUNNER, 3, 400)],
        vec![group(RUNNER, 8, 350), group(GRUNT, 5, 600)],
        vec![group(BRUTE, 3, 1200), group(GRUNT, 8, 500)],
        vec![group(SWARM, 20, 180)],
        vec![group(PHANTOM, 6, 500), group(RUNNER, 6, 400)],
        vec![group(TANK, 2, 2000), group(GRUNT, 10, 400)],
        vec![group(SWARM, 25, 150), group(BRUTE, 4, 1000)],
        vec![group(PHANTOM, 10, 400), group(TANK, 2, 1500)],
        vec![group(BOSS, 1, 0), group(GRUNT, 12, 400)],
        vec![group(RUNNER, 15, 250), group(BRUTE, 6, 800)],
        vec![group(TANK, 4, 1200), group(PHANTOM, 8, 450)],
        vec![group(SWARM, 40, 120), group(TANK, 3, 1500)],
        vec![group(BOSS, 2, 4000), group(BRUTE, 5, 900)],
        vec![group(BOSS, 3, 3000), group(PHANTOM, 12, 350)],
    ];
    waves
        .into_iter()
        .map(|groups| WaveDefinition { groups })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        group, standard_enemies, standard_towers, standard_waves, Catalog, CatalogError,
        EnemyTypeId, BLASTER, BOSS, FROST, GRUNT, TANK,
    };
    use crate::{Payload, PayloadBonus};

    #[test]
    fn standard_catalog_matches_reference_tables() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.towers().len(), 5);
        assert_eq!(catalog.enemies().len(), 7);
        assert_eq!(catalog.total_waves(), 15);

        let blaster = catalog.tower(BLASTER).expect("blaster exists");
        assert_eq!(blaster.cost, 50);
        assert_eq!(blaster.damage, 12);
        assert_eq!(blaster.fire_rate_ms, 400);
        assert_eq!(blaster.payload, Payload::Direct);

        let frost = catalog.tower(FROST).expect("frost exists");
        assert_eq!(frost.payload, Payload::Slow { factor: 0.4 });

        let tank = catalog.enemy(TANK).expect("tank exists");
        assert_eq!(tank.armor, 8);
        assert_eq!(tank.health, 300);

        let opening = catalog.wave(0).expect("wave 0 exists");
        assert_eq!(opening.groups.len(), 1);
        assert_eq!(opening.groups[0].kind, GRUNT);
        assert_eq!(opening.groups[0].count, 6);
        assert_eq!(opening.groups[0].spawn_delay_ms, 700);

        let finale = catalog.wave(14).expect("wave 14 exists");
        assert_eq!(finale.groups[0].kind, BOSS);
        assert_eq!(finale.groups[0].count, 3);
    }

    #[test]
    fn duplicate_tower_ids_are_rejected() {
        let mut towers = standard_towers();
        towers[1].id = towers[0].id;
        let result = Catalog::new(towers, standard_enemies(), standard_waves());
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateTowerType { id: BLASTER }
        );
    }

    #[test]
    fn wrong_tier_count_is_rejected() {
        let mut towers = standard_towers();
        let _ = towers[0].tiers.pop();
        let result = Catalog::new(towers, standard_enemies(), standard_waves());
        assert_eq!(
            result.unwrap_err(),
            CatalogError::WrongTierCount {
                id: BLASTER,
                found: 2,
            }
        );
    }

    #[test]
    fn mismatched_payload_bonus_is_rejected() {
        let mut towers = standard_towers();
        towers[0].tiers[2].payload_bonus = PayloadBonus::Chain { links: 1 };
        let result = Catalog::new(towers, standard_enemies(), standard_waves());
        assert_eq!(
            result.unwrap_err(),
            CatalogError::MismatchedPayloadBonus {
                id: BLASTER,
                tier: 2,
            }
        );
    }

    #[test]
    fn runaway_slow_ladder_is_rejected() {
        let mut towers = standard_towers();
        let frost = towers
            .iter_mut()
            .find(|spec| spec.id == FROST)
            .expect("frost exists");
        frost.payload = Payload::Slow { factor: 0.9 };
        let result = Catalog::new(towers, standard_enemies(), standard_waves());
        assert!(matches!(
            result.unwrap_err(),
            CatalogError::ExcessiveSlow { id: FROST, .. }
        ));
    }

    #[test]
    fn unknown_wave_reference_is_rejected() {
        let missing = EnemyTypeId::new(99);
        let mut waves = standard_waves();
        waves[3].groups[0].kind = missing;
        let result = Catalog::new(standard_towers(), standard_enemies(), waves);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::UnknownEnemyType {
                wave: 3,
                id: missing,
            }
        );
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let mut enemies = standard_enemies();
        enemies[0].speed = 0.0;
        let result = Catalog::new(standard_towers(), enemies, standard_waves());
        assert_eq!(
            result.unwrap_err(),
            CatalogError::NonPositiveSpeed { id: GRUNT }
        );
    }

    #[test]
    fn empty_wave_list_is_rejected() {
        let result = Catalog::new(standard_towers(), standard_enemies(), Vec::new());
        assert_eq!(result.unwrap_err(), CatalogError::NoWaves);
    }

    #[test]
    fn zero_count_group_is_rejected() {
        let mut waves = standard_waves();
        waves[0].groups[0].count = 0;
        let result = Catalog::new(standard_towers(), standard_enemies(), waves);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::EmptyGroup { wave: 0, group: 0 }
        );
    }

    #[test]
    fn specs_round_trip_through_json() {
        let towers = standard_towers();
        let enemies = standard_enemies();
        let waves = standard_waves();

        let towers_json = serde_json::to_string(&towers).expect("serialize towers");
        let enemies_json = serde_json::to_string(&enemies).expect("serialize enemies");
        let waves_json = serde_json::to_string(&waves).expect("serialize waves");

        let towers_back = serde_json::from_str(&towers_json).expect("parse towers");
        let enemies_back = serde_json::from_str(&enemies_json).expect("parse enemies");
        let waves_back = serde_json::from_str(&waves_json).expect("parse waves");

        let rebuilt = Catalog::new(towers_back, enemies_back, waves_back).expect("valid catalog");
        assert_eq!(rebuilt, Catalog::standard());
    }

    #[test]
    fn tier_defaults_to_no_payload_bonus() {
        let parsed: super::UpgradeTier =
            serde_json::from_str(r#"{"cost":60,"damage_bonus":8,"range_bonus":0.3}"#)
                .expect("parse tier");
        assert_eq!(parsed.payload_bonus, PayloadBonus::None);
    }

    #[test]
    fn single_enemy_group_is_accepted() {
        let waves = vec![super::WaveDefinition {
            groups: vec![group(GRUNT, 1, 0)],
        }];
        let catalog =
            Catalog::new(standard_towers(), standard_enemies(), waves).expect("valid catalog");
        assert_eq!(catalog.total_waves(), 1);
    }
}
