use skirmish_core::{CellCoord, GridDimensions, Route, Side, UnitId, UnitSnapshot};
use skirmish_system_pathfinding::{find_path, PathFinder};

#[test]
fn detours_around_single_blocker() {
    let attacker = CellCoord::new(0, 0);
    let target = CellCoord::new(0, 2);
    let units = vec![
        unit(0, attacker, Side::Left),
        unit(1, target, Side::Right),
        unit(2, CellCoord::new(0, 1), Side::Left),
    ];

    let route = find_path(attacker, target, &units);

    assert_eq!(route.edge_count(), 4);
    assert_valid_route(&route, attacker, target, &units);
}

#[test]
fn attacker_on_target_cell_yields_single_cell_route() {
    let cell = CellCoord::new(5, 5);

    let route = find_path(cell, cell, &[]);

    assert_eq!(route.cells(), &[cell]);
    assert_eq!(route.edge_count(), 0);
}

#[test]
fn enclosed_target_is_unreachable() {
    let attacker = CellCoord::new(2, 2);
    let target = CellCoord::new(10, 10);
    let units = vec![
        unit(0, CellCoord::new(9, 10), Side::Right),
        unit(1, CellCoord::new(11, 10), Side::Right),
        unit(2, CellCoord::new(10, 9), Side::Right),
        unit(3, CellCoord::new(10, 11), Side::Right),
    ];

    let route = find_path(attacker, target, &units);

    assert!(route.is_empty());
    assert_eq!(route, Route::unreachable());
}

#[test]
fn corner_target_enclosed_by_two_units_is_unreachable() {
    let units = vec![
        unit(0, CellCoord::new(25, 20), Side::Right),
        unit(1, CellCoord::new(26, 19), Side::Right),
    ];

    let route = find_path(CellCoord::new(0, 0), CellCoord::new(26, 20), &units);

    assert!(route.is_empty());
}

#[test]
fn enclosed_attacker_cannot_leave() {
    let attacker = CellCoord::new(0, 0);
    let units = vec![
        unit(0, CellCoord::new(1, 0), Side::Left),
        unit(1, CellCoord::new(0, 1), Side::Left),
    ];

    let route = find_path(attacker, CellCoord::new(20, 20), &units);

    assert!(route.is_empty());
}

#[test]
fn dead_units_do_not_block() {
    let attacker = CellCoord::new(0, 0);
    let target = CellCoord::new(0, 2);
    let mut fallen = unit(2, CellCoord::new(0, 1), Side::Left);
    fallen.alive = false;

    let route = find_path(attacker, target, &[fallen]);

    assert_eq!(route.edge_count(), 2);
    assert_eq!(
        route.cells(),
        &[attacker, CellCoord::new(0, 1), target],
        "straight line is the only two-step route"
    );
}

#[test]
fn stale_occupant_of_target_cell_is_ignored() {
    let attacker = CellCoord::new(3, 3);
    let target = CellCoord::new(3, 5);
    let units = vec![unit(7, target, Side::Left), unit(8, attacker, Side::Right)];

    let route = find_path(attacker, target, &units);

    assert_eq!(route.edge_count(), 2);
    assert_valid_route(&route, attacker, target, &[]);
}

#[test]
fn crosses_wall_through_its_only_gap() {
    let attacker = CellCoord::new(0, 0);
    let target = CellCoord::new(10, 0);
    let units: Vec<_> = (0..20)
        .map(|row| unit(row, CellCoord::new(5, row), Side::Right))
        .collect();

    let route = find_path(attacker, target, &units);

    assert_eq!(route.edge_count(), 50);
    assert!(route.cells().contains(&CellCoord::new(5, 20)));
    assert_valid_route(&route, attacker, target, &units);
}

#[test]
fn repeated_searches_agree() {
    let attacker = CellCoord::new(1, 4);
    let target = CellCoord::new(22, 13);
    let units: Vec<_> = (2..18)
        .map(|row| unit(row, CellCoord::new(12, row), Side::Left))
        .collect();

    let first = find_path(attacker, target, &units);
    let second = find_path(attacker, target, &units);

    assert_eq!(first.edge_count(), second.edge_count());
    assert_eq!(first.start(), second.start());
    assert_eq!(first.end(), second.end());
}

#[test]
fn custom_dimensions_bound_the_search() {
    let finder = PathFinder::new(GridDimensions::new(3, 1));
    let blocker = unit(0, CellCoord::new(1, 0), Side::Left);

    let route = finder.find_path(CellCoord::new(0, 0), CellCoord::new(2, 0), &[blocker]);

    assert!(route.is_empty(), "a single row offers no way around");
}

#[test]
#[should_panic(expected = "lies outside")]
fn out_of_bounds_attacker_panics() {
    let _ = find_path(CellCoord::new(27, 0), CellCoord::new(0, 0), &[]);
}

#[test]
#[should_panic(expected = "lies outside")]
fn out_of_bounds_target_panics() {
    let _ = find_path(CellCoord::new(0, 0), CellCoord::new(0, 21), &[]);
}

fn unit(id: u32, cell: CellCoord, side: Side) -> UnitSnapshot {
    UnitSnapshot {
        id: UnitId::new(id),
        side,
        cell,
        alive: true,
    }
}

fn assert_valid_route(
    route: &Route,
    attacker: CellCoord,
    target: CellCoord,
    units: &[UnitSnapshot],
) {
    assert_eq!(route.start(), Some(attacker));
    assert_eq!(route.end(), Some(target));

    for pair in route.cells().windows(2) {
        assert!(
            pair[0].is_adjacent_to(pair[1]),
            "{} and {} are not orthogonal neighbours",
            pair[0],
            pair[1]
        );
    }

    for cell in route.cells() {
        if *cell == attacker || *cell == target {
            continue;
        }
        assert!(
            !units.iter().any(|unit| unit.alive && unit.cell == *cell),
            "route passes through blocked cell {cell}"
        );
    }
}
