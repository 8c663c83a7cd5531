use neon_siege_core::{
    catalog::{Catalog, BLASTER},
    path::Board,
    CellCoord, Command, Event, PlacementError, SaleError, TowerId, UpgradeError,
};
use neon_siege_world::{self as world, query, MatchConfig, World};

#[test]
fn placing_a_tower_debits_cost_and_clears_selection() {
    let mut world = playing_world(200);
    let events = select_and_place(&mut world, CellCoord::new(0, 0));

    let tower = placed_tower(&events);
    assert_eq!(tower, TowerId::new(0));

    let hud = query::hud(&world);
    assert_eq!(hud.gold, 150);
    assert_eq!(hud.selected_tower_type, None);

    let towers = query::tower_view(&world);
    let snapshot = towers
        .iter()
        .next()
        .expect("one tower should be placed");
    assert_eq!(snapshot.kind, BLASTER);
    assert_eq!(snapshot.level, 0);
    assert_eq!(snapshot.damage, 12);
}

#[test]
fn placement_on_the_path_is_rejected() {
    let mut world = playing_world(200);
    // (0, 6) is the first waypoint of the standard path.
    let events = select_and_place(&mut world, CellCoord::new(0, 6));

    assert!(events.contains(&Event::TowerPlacementRejected {
        cell: CellCoord::new(0, 6),
        reason: PlacementError::OnPath,
    }));
    assert_eq!(query::hud(&world).gold, 200);
    assert_eq!(query::tower_view(&world).iter().count(), 0);
}

#[test]
fn placement_outside_the_board_is_rejected() {
    let mut world = playing_world(200);
    let events = select_and_place(&mut world, CellCoord::new(16, 0));

    assert!(events.contains(&Event::TowerPlacementRejected {
        cell: CellCoord::new(16, 0),
        reason: PlacementError::OutOfBounds,
    }));
    assert_eq!(query::hud(&world).gold, 200);
}

#[test]
fn placement_on_an_occupied_cell_is_rejected() {
    let mut world = playing_world(200);
    let _ = select_and_place(&mut world, CellCoord::new(2, 2));
    let events = select_and_place(&mut world, CellCoord::new(2, 2));

    assert!(events.contains(&Event::TowerPlacementRejected {
        cell: CellCoord::new(2, 2),
        reason: PlacementError::Occupied,
    }));
    assert_eq!(query::hud(&world).gold, 150);
    assert_eq!(query::tower_view(&world).iter().count(), 1);
}

#[test]
fn placement_without_a_selection_is_rejected() {
    let mut world = playing_world(200);
    let mut events = Vec::new();
    assert!(!world::apply(
        &mut world,
        Command::PlaceTower {
            cell: CellCoord::new(0, 0),
        },
        &mut events,
    ));

    assert!(events.contains(&Event::TowerPlacementRejected {
        cell: CellCoord::new(0, 0),
        reason: PlacementError::NoSelection,
    }));
    assert_eq!(query::hud(&world).gold, 200);
}

#[test]
fn placement_without_funds_is_rejected() {
    let mut world = playing_world(40);
    let events = select_and_place(&mut world, CellCoord::new(0, 0));

    assert!(events.contains(&Event::TowerPlacementRejected {
        cell: CellCoord::new(0, 0),
        reason: PlacementError::InsufficientGold,
    }));
    let hud = query::hud(&world);
    assert_eq!(hud.gold, 40);
    // The selection survives a failed placement.
    assert_eq!(hud.selected_tower_type, Some(BLASTER));
}

#[test]
fn upgrades_climb_tiers_and_stop_at_the_cap() {
    let mut world = playing_world(10_000);
    let events = select_and_place(&mut world, CellCoord::new(0, 0));
    let tower = placed_tower(&events);

    let mut events = Vec::new();
    for expected_level in 1..=3u8 {
        events.clear();
        assert!(world::apply(
            &mut world,
            Command::UpgradeTower { tower },
            &mut events,
        ));
        assert!(events.contains(&Event::TowerUpgraded {
            tower,
            level: expected_level,
        }));
    }
    assert_eq!(query::hud(&world).gold, 9_530);

    let towers = query::tower_view(&world);
    let snapshot = towers.iter().next().expect("tower should survive upgrades");
    assert_eq!(snapshot.level, 3);
    assert_eq!(snapshot.damage, 65);
    assert!((snapshot.range - 4.0).abs() < 1e-5);

    // A fourth upgrade has no tier to climb to.
    events.clear();
    assert!(!world::apply(
        &mut world,
        Command::UpgradeTower { tower },
        &mut events,
    ));
    assert!(events.contains(&Event::TowerUpgradeRejected {
        tower,
        reason: UpgradeError::MaxLevel,
    }));
    assert_eq!(query::hud(&world).gold, 9_530);
}

#[test]
fn upgrade_without_funds_is_rejected() {
    let mut world = playing_world(110);
    let events = select_and_place(&mut world, CellCoord::new(0, 0));
    let tower = placed_tower(&events);

    let mut events = Vec::new();
    assert!(world::apply(
        &mut world,
        Command::UpgradeTower { tower },
        &mut events,
    ));
    assert_eq!(query::hud(&world).gold, 0);

    events.clear();
    assert!(!world::apply(
        &mut world,
        Command::UpgradeTower { tower },
        &mut events,
    ));
    assert!(events.contains(&Event::TowerUpgradeRejected {
        tower,
        reason: UpgradeError::InsufficientGold,
    }));
    assert_eq!(query::hud(&world).gold, 0);
}

#[test]
fn upgrading_an_unknown_tower_is_rejected() {
    let mut world = playing_world(200);
    let mut events = Vec::new();
    assert!(!world::apply(
        &mut world,
        Command::UpgradeTower {
            tower: TowerId::new(9),
        },
        &mut events,
    ));
    assert!(events.contains(&Event::TowerUpgradeRejected {
        tower: TowerId::new(9),
        reason: UpgradeError::UnknownTower,
    }));
}

#[test]
fn selling_refunds_six_tenths_of_investment() {
    let mut world = playing_world(10_000);
    let events = select_and_place(&mut world, CellCoord::new(0, 0));
    let tower = placed_tower(&events);
    let mut events = Vec::new();
    for _ in 0..3 {
        assert!(world::apply(
            &mut world,
            Command::UpgradeTower { tower },
            &mut events,
        ));
    }

    // Invested 50 + 60 + 120 + 240 = 470; the refund rounds down.
    events.clear();
    assert!(world::apply(
        &mut world,
        Command::SellTower { tower },
        &mut events,
    ));
    assert!(events.contains(&Event::TowerSold { tower, refund: 282 }));
    assert_eq!(query::hud(&world).gold, 9_812);
    assert_eq!(query::tower_view(&world).iter().count(), 0);
}

#[test]
fn selling_a_base_tower_refunds_its_cost_share() {
    let mut world = playing_world(200);
    let events = select_and_place(&mut world, CellCoord::new(0, 0));
    let tower = placed_tower(&events);

    let mut events = Vec::new();
    assert!(world::apply(
        &mut world,
        Command::SellTower { tower },
        &mut events,
    ));
    assert!(events.contains(&Event::TowerSold { tower, refund: 30 }));
    assert_eq!(query::hud(&world).gold, 180);
}

#[test]
fn selling_clears_only_the_matching_selection() {
    let mut world = playing_world(200);
    let first = placed_tower(&select_and_place(&mut world, CellCoord::new(0, 0)));
    let second = placed_tower(&select_and_place(&mut world, CellCoord::new(1, 0)));

    let mut events = Vec::new();
    assert!(world::apply(
        &mut world,
        Command::SelectTower {
            tower: Some(first),
        },
        &mut events,
    ));
    assert!(world::apply(
        &mut world,
        Command::SellTower { tower: second },
        &mut events,
    ));
    assert_eq!(query::hud(&world).selected_tower, Some(first));

    assert!(world::apply(
        &mut world,
        Command::SellTower { tower: first },
        &mut events,
    ));
    assert_eq!(query::hud(&world).selected_tower, None);
}

#[test]
fn selling_an_unknown_tower_is_rejected() {
    let mut world = playing_world(200);
    let mut events = Vec::new();
    assert!(!world::apply(
        &mut world,
        Command::SellTower {
            tower: TowerId::new(3),
        },
        &mut events,
    ));
    assert!(events.contains(&Event::TowerSaleRejected {
        tower: TowerId::new(3),
        reason: SaleError::UnknownTower,
    }));
    assert_eq!(query::hud(&world).gold, 200);
}

fn playing_world(gold: u32) -> World {
    let config = MatchConfig {
        starting_gold: gold,
        starting_lives: 20,
    };
    let mut world = World::with_rules(Catalog::standard(), Board::standard(), config);
    let mut events = Vec::new();
    assert!(world::apply(&mut world, Command::StartMatch, &mut events));
    world
}

fn select_and_place(world: &mut World, cell: CellCoord) -> Vec<Event> {
    let mut events = Vec::new();
    assert!(world::apply(
        world,
        Command::SelectTowerType {
            kind: Some(BLASTER),
        },
        &mut events,
    ));
    let _ = world::apply(world, Command::PlaceTower { cell }, &mut events);
    events
}

fn placed_tower(events: &[Event]) -> TowerId {
    events
        .iter()
        .find_map(|event| match event {
            Event::TowerPlaced { tower, .. } => Some(*tower),
            _ => None,
        })
        .expect("expected a TowerPlaced event")
}
