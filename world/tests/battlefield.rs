use skirmish_core::{
    Army, AttackKind, CellCoord, GridDimensions, Recruit, Side, UnitId, UnitTemplate,
};
use skirmish_world::{query, Battlefield, MoveError, PlacementError};

#[test]
fn deployment_assigns_sequential_ids_across_armies() {
    let mut battlefield = Battlefield::new(GridDimensions::new(6, 3));

    let left = battlefield
        .deploy(&army(Side::Left, &[(0, 0), (0, 1)]))
        .expect("left army deploys");
    let right = battlefield
        .deploy(&army(Side::Right, &[(5, 0)]))
        .expect("right army deploys");

    assert_eq!(left, vec![UnitId::new(0), UnitId::new(1)]);
    assert_eq!(right, vec![UnitId::new(2)]);
    assert_eq!(query::living_units(&battlefield, Side::Left), left);
    assert_eq!(query::snapshots(&battlefield).len(), 3);
    assert_eq!(
        query::unit(&battlefield, UnitId::new(2)).map(|unit| unit.name()),
        Some("Guard 0")
    );
}

#[test]
fn deployment_rejects_cells_outside_the_grid() {
    let mut battlefield = Battlefield::new(GridDimensions::new(3, 3));

    let result = battlefield.deploy(&army(Side::Right, &[(3, 0)]));

    assert_eq!(
        result,
        Err(PlacementError::OutOfBounds {
            cell: CellCoord::new(3, 0)
        })
    );
}

#[test]
fn deployment_rejects_cells_held_by_the_other_army() {
    let mut battlefield = Battlefield::new(GridDimensions::new(3, 3));
    let _ = battlefield
        .deploy(&army(Side::Left, &[(1, 1)]))
        .expect("left army deploys");

    let result = battlefield.deploy(&army(Side::Right, &[(2, 2), (1, 1)]));

    assert_eq!(
        result,
        Err(PlacementError::Occupied {
            cell: CellCoord::new(1, 1)
        })
    );
    assert!(!query::has_living(&battlefield, Side::Right));
}

#[test]
fn moves_respect_occupancy_and_liveness() {
    let mut battlefield = Battlefield::new(GridDimensions::new(4, 1));
    let ids = battlefield
        .deploy(&army(Side::Left, &[(0, 0), (2, 0)]))
        .expect("deploy");

    assert_eq!(
        battlefield.move_unit(ids[0], CellCoord::new(2, 0)),
        Err(MoveError::Occupied(CellCoord::new(2, 0)))
    );
    assert_eq!(
        battlefield.move_unit(ids[0], CellCoord::new(4, 0)),
        Err(MoveError::OutOfBounds(CellCoord::new(4, 0)))
    );
    assert_eq!(
        battlefield.move_unit(UnitId::new(9), CellCoord::new(1, 0)),
        Err(MoveError::MissingUnit(UnitId::new(9)))
    );

    battlefield
        .move_unit(ids[0], CellCoord::new(1, 0))
        .expect("free cell");
    assert_eq!(query::occupant(&battlefield, CellCoord::new(0, 0)), None);
    assert_eq!(
        query::occupant(&battlefield, CellCoord::new(1, 0)),
        Some(ids[0])
    );

    let _ = battlefield.apply_damage(ids[1], 50);
    assert_eq!(
        battlefield.move_unit(ids[1], CellCoord::new(3, 0)),
        Err(MoveError::DeadUnit(ids[1]))
    );
}

#[test]
fn damage_accumulates_until_the_unit_falls() {
    let mut battlefield = Battlefield::new(GridDimensions::new(2, 2));
    let ids = battlefield
        .deploy(&army(Side::Right, &[(1, 1)]))
        .expect("deploy");

    assert_eq!(battlefield.apply_damage(ids[0], 4), Some(8));
    assert_eq!(battlefield.apply_damage(ids[0], 4), Some(4));
    assert!(query::has_living(&battlefield, Side::Right));
    assert_eq!(battlefield.apply_damage(ids[0], 9), Some(0));
    assert!(!query::has_living(&battlefield, Side::Right));
    assert_eq!(battlefield.apply_damage(UnitId::new(7), 1), None);

    let snapshot = query::snapshots(&battlefield)[0];
    assert!(!snapshot.alive);
    assert_eq!(snapshot.cell, CellCoord::new(1, 1));
}

fn army(side: Side, cells: &[(u32, u32)]) -> Army {
    let template = UnitTemplate {
        name: "Guard".to_owned(),
        unit_type: "Guard".to_owned(),
        health: 12,
        base_attack: 2,
        cost: 4,
        attack_kind: AttackKind::Melee,
        attack_bonuses: Default::default(),
        defence_bonuses: Default::default(),
    };
    Army {
        side,
        recruits: cells
            .iter()
            .enumerate()
            .map(|(index, &(column, row))| Recruit {
                name: format!("Guard {index}"),
                template: template.clone(),
                cell: CellCoord::new(column, row),
            })
            .collect(),
        points: 4 * u32::try_from(cells.len()).unwrap_or(0),
    }
}
