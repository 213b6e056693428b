//! Board geometry: bounds, adjacency and wall spans on the 9x9 grid.

use crate::models::game::{Direction, Position, Wall, BOARD_SIZE};

pub fn within_bounds(position: &Position) -> bool {
    position.x >= 0 && position.x < BOARD_SIZE && position.y >= 0 && position.y < BOARD_SIZE
}

pub fn adjacent(a: &Position, b: &Position) -> bool {
    ((a.x - b.x).abs() == 1 && a.y == b.y) || ((a.y - b.y).abs() == 1 && a.x == b.x)
}

/// The four axis neighbours of `position`. Some may be off the board.
pub fn neighbors(position: &Position) -> [Position; 4] {
    [
        Position::new(position.x - 1, position.y),
        Position::new(position.x + 1, position.y),
        Position::new(position.x, position.y - 1),
        Position::new(position.x, position.y + 1),
    ]
}

fn span_delta(direction: Direction) -> (i32, i32) {
    match direction {
        Direction::Horizontal => (1, 0),
        Direction::Vertical => (0, 1),
    }
}

/// Both cells the wall separates, and the cells its second half covers,
/// must be on the board.
pub fn wall_within_bounds(wall: &Wall) -> bool {
    let (dx, dy) = span_delta(wall.direction);

    within_bounds(&wall.position_1)
        && within_bounds(&wall.position_2)
        && within_bounds(&Position::new(wall.position_1.x + dx, wall.position_1.y + dy))
        && within_bounds(&Position::new(wall.position_2.x + dx, wall.position_2.y + dy))
}

fn same_pair(a1: i32, a2: i32, b1: i32, b2: i32) -> bool {
    (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
}

/// Same-direction walls on the same line overlap when their spans share or
/// touch a cell. Walls of different directions never overlap.
pub fn walls_overlap(wall1: &Wall, wall2: &Wall) -> bool {
    if wall1.direction != wall2.direction {
        return false;
    }

    match wall1.direction {
        Direction::Horizontal => {
            same_pair(
                wall1.position_1.y,
                wall1.position_2.y,
                wall2.position_1.y,
                wall2.position_2.y,
            ) && (wall1.position_1.x - wall2.position_1.x).abs() <= 1
        }
        Direction::Vertical => {
            same_pair(
                wall1.position_1.x,
                wall1.position_2.x,
                wall2.position_1.x,
                wall2.position_2.x,
            ) && (wall1.position_1.y - wall2.position_1.y).abs() <= 1
        }
    }
}

/// Whether `wall` stands between the neighbouring cells `from` and `to`.
pub fn wall_blocks_step(wall: &Wall, from: &Position, to: &Position) -> bool {
    let stepping_vertically = from.x == to.x;

    match wall.direction {
        Direction::Horizontal if stepping_vertically => {
            same_pair(wall.position_1.y, wall.position_2.y, from.y, to.y)
                && (wall.position_1.x == from.x || wall.position_1.x + 1 == from.x)
        }
        Direction::Vertical if !stepping_vertically => {
            same_pair(wall.position_1.x, wall.position_2.x, from.x, to.x)
                && (wall.position_1.y == from.y || wall.position_1.y + 1 == from.y)
        }
        _ => false,
    }
}

pub fn step_blocked(walls: &[Wall], from: &Position, to: &Position) -> bool {
    walls.iter().any(|wall| wall_blocks_step(wall, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn horizontal(x1: i32, y1: i32, x2: i32, y2: i32) -> Wall {
        Wall::new(Direction::Horizontal, Position::new(x1, y1), Position::new(x2, y2))
    }

    fn vertical(x1: i32, y1: i32, x2: i32, y2: i32) -> Wall {
        Wall::new(Direction::Vertical, Position::new(x1, y1), Position::new(x2, y2))
    }

    #[rstest]
    #[case(0, 0, true)]
    #[case(8, 8, true)]
    #[case(4, 4, true)]
    #[case(-1, 4, false)]
    #[case(4, -1, false)]
    #[case(9, 4, false)]
    #[case(4, 9, false)]
    fn test_within_bounds(#[case] x: i32, #[case] y: i32, #[case] expected: bool) {
        assert_eq!(within_bounds(&Position::new(x, y)), expected);
    }

    #[rstest]
    #[case((4, 4), (4, 5), true)]
    #[case((4, 4), (3, 4), true)]
    #[case((4, 4), (4, 4), false)]
    #[case((4, 4), (5, 5), false)]
    #[case((4, 4), (6, 4), false)]
    fn test_adjacent(#[case] a: (i32, i32), #[case] b: (i32, i32), #[case] expected: bool) {
        let a = Position::new(a.0, a.1);
        let b = Position::new(b.0, b.1);
        assert_eq!(adjacent(&a, &b), expected);
        assert_eq!(adjacent(&b, &a), expected);
    }

    #[test]
    fn test_wall_within_bounds() {
        assert!(wall_within_bounds(&horizontal(0, 2, 0, 3)));
        assert!(wall_within_bounds(&vertical(4, 6, 5, 6)));
        assert!(wall_within_bounds(&horizontal(7, 7, 7, 8)));

        // the second half would hang off the board
        assert!(!wall_within_bounds(&horizontal(8, 7, 8, 8)));
        assert!(!wall_within_bounds(&vertical(3, 8, 4, 8)));
        assert!(!wall_within_bounds(&horizontal(8, 8, 9, 8)));
        assert!(!wall_within_bounds(&vertical(-1, 0, -1, 1)));
    }

    #[test]
    fn test_walls_overlap() {
        let existing_horizontal = horizontal(2, 2, 2, 3);
        let existing_vertical = vertical(4, 4, 5, 4);

        assert!(walls_overlap(&horizontal(2, 2, 2, 3), &existing_horizontal));
        assert!(walls_overlap(&horizontal(3, 2, 3, 3), &existing_horizontal));
        assert!(walls_overlap(&horizontal(1, 2, 1, 3), &existing_horizontal));
        assert!(walls_overlap(&horizontal(2, 3, 2, 2), &existing_horizontal));
        assert!(walls_overlap(&vertical(4, 4, 5, 4), &existing_vertical));
        assert!(walls_overlap(&vertical(4, 5, 5, 5), &existing_vertical));
        assert!(walls_overlap(&vertical(4, 3, 5, 3), &existing_vertical));

        assert!(!walls_overlap(&horizontal(0, 2, 0, 3), &existing_horizontal));
        assert!(!walls_overlap(&horizontal(4, 2, 4, 3), &existing_horizontal));
        assert!(!walls_overlap(&horizontal(2, 4, 2, 5), &existing_horizontal));
        assert!(!walls_overlap(&vertical(4, 6, 5, 6), &existing_vertical));
        assert!(!walls_overlap(&vertical(4, 2, 5, 2), &existing_vertical));
        assert!(!walls_overlap(&vertical(2, 2, 3, 2), &existing_horizontal));
    }

    #[test]
    fn test_wall_blocks_step() {
        let walls = vec![vertical(2, 2, 3, 2), horizontal(4, 4, 4, 5)];

        assert!(!step_blocked(&walls, &Position::new(2, 1), &Position::new(2, 2)));
        assert!(!step_blocked(&walls, &Position::new(2, 5), &Position::new(3, 5)));
        assert!(!step_blocked(&walls, &Position::new(7, 5), &Position::new(7, 4)));
        assert!(!step_blocked(&walls, &Position::new(6, 4), &Position::new(6, 5)));

        assert!(step_blocked(&walls, &Position::new(2, 2), &Position::new(3, 2)));
        assert!(step_blocked(&walls, &Position::new(3, 3), &Position::new(2, 3)));
        assert!(step_blocked(&walls, &Position::new(5, 4), &Position::new(5, 5)));
        assert!(step_blocked(&walls, &Position::new(4, 5), &Position::new(4, 4)));
    }

    fn any_wall() -> impl Strategy<Value = Wall> {
        (
            prop_oneof![Just(Direction::Horizontal), Just(Direction::Vertical)],
            -1..10i32,
            -1..10i32,
            -1..10i32,
            -1..10i32,
        )
            .prop_map(|(direction, x1, y1, x2, y2)| {
                Wall::new(direction, Position::new(x1, y1), Position::new(x2, y2))
            })
    }

    proptest! {
        #[test]
        fn prop_within_bounds_matches_board(x in -20..20i32, y in -20..20i32) {
            let expected = (0..9).contains(&x) && (0..9).contains(&y);
            prop_assert_eq!(within_bounds(&Position::new(x, y)), expected);
        }

        #[test]
        fn prop_walls_overlap_is_symmetric(a in any_wall(), b in any_wall()) {
            prop_assert_eq!(walls_overlap(&a, &b), walls_overlap(&b, &a));
        }

        #[test]
        fn prop_step_blocking_is_symmetric(wall in any_wall(), x in 0..9i32, y in 0..9i32) {
            let from = Position::new(x, y);
            for to in neighbors(&from) {
                prop_assert_eq!(wall_blocks_step(&wall, &from, &to), wall_blocks_step(&wall, &to, &from));
            }
        }
    }
}
