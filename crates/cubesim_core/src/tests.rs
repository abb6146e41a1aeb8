use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::*;

/// Strategy for a valid move on a cube of the given size.
fn move_strategy(size: usize) -> impl Strategy<Value = Move> {
    (0..3_u8, 0..size, any::<bool>()).prop_map(move |(axis, layer, positive)| {
        let axis = match axis {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        };
        let slice = layer as f32 - (size as f32 - 1.0) / 2.0;
        let direction = if positive { Sign::Pos } else { Sign::Neg };
        Move::new(axis, slice, direction)
    })
}

fn sized_moves(max_len: usize) -> impl Strategy<Value = (usize, Vec<Move>)> {
    (MIN_SIZE..=6).prop_flat_map(move |size| {
        (Just(size), prop::collection::vec(move_strategy(size), 0..max_len))
    })
}

fn all_grid_points(size: usize) -> HashSet<GridPos> {
    itertools::iproduct!(0..size, 0..size, 0..size)
        .map(|(x, y, z)| GridPos::from_layers(size, [x, y, z]))
        .collect()
}

#[test]
fn test_sticker_counts() {
    for size in MIN_SIZE..=8 {
        let reg = CubeletRegistry::new(size).unwrap();
        assert_eq!(reg.len(), size.pow(3));
        assert_eq!(reg.sticker_counts(), [size * size; 6]);

        let total: usize = reg
            .iter()
            .map(|(_, c)| c.face_colors().iter().filter(|c| c.is_sticker()).count())
            .sum();
        assert_eq!(total, 6 * size * size);
    }
}

#[test]
fn test_interior_cubelets_are_all_core() {
    let reg = CubeletRegistry::new(3).unwrap();
    let center = reg
        .iter()
        .find(|(_, c)| c.home() == GridPos::from_doubled([0, 0, 0]))
        .map(|(_, c)| c.clone())
        .unwrap();
    assert!(!center.is_visible());
}

#[test]
fn test_x_turn_moves_up_stickers_to_front() {
    let mut reg = CubeletRegistry::new(3).unwrap();
    execute_instant(&mut reg, Move::new(Axis::X, 1.0, Sign::Pos)).unwrap();
    // The right column of the front face now shows the old up face.
    let front = reg.face_colors(Face::F);
    for row in 0..3 {
        assert_eq!(front[row * 3 + 2], Color::White);
        assert_eq!(front[row * 3], Color::Green);
    }
    assert_eq!(reg.face_colors(Face::R), vec![Color::Red; 9]);
}

#[test]
fn test_undo_scenario_restores_initial_state() {
    let initial = CubeletRegistry::new(3).unwrap();
    let mut reg = initial.clone();
    let mv = Move::new(Axis::X, 1.0, Sign::Pos);
    execute_instant(&mut reg, mv).unwrap();
    assert_ne!(reg, initial);
    execute_instant(&mut reg, mv.inverse()).unwrap();
    assert_eq!(reg, initial);
}

proptest! {
    #[test]
    fn proptest_inverse_law((size, moves) in sized_moves(20)) {
        let mut reg = CubeletRegistry::new(size).unwrap();
        for &mv in &moves {
            execute_instant(&mut reg, mv).unwrap();
        }
        let before = reg.clone();
        for &mv in &moves {
            execute_instant(&mut reg, mv).unwrap();
            execute_instant(&mut reg, mv.inverse()).unwrap();
            prop_assert_eq!(&reg, &before);
        }
        for &mv in moves.iter().rev() {
            execute_instant(&mut reg, mv.inverse()).unwrap();
        }
        prop_assert!(is_solved(&reg));
        prop_assert_eq!(reg, CubeletRegistry::new(size).unwrap());
    }

    #[test]
    fn proptest_instant_matches_animated(
        (size, moves) in sized_moves(20),
        dt in 0.001_f32..0.5,
    ) {
        let mut instant = CubeletRegistry::new(size).unwrap();
        let mut animated = instant.clone();
        let mut engine = RotationEngine::new();

        for &mv in &moves {
            let a = execute_instant(&mut instant, mv).unwrap();

            engine.begin_animated(&animated, mv, 5.0).unwrap();
            let b = loop {
                if let Some(done) = engine.advance(&mut animated, dt) {
                    break done;
                }
            };

            prop_assert_eq!(a, b);
        }
        for (piece, cubelet) in animated.iter() {
            let other = instant.get(piece).unwrap();
            prop_assert_eq!(cubelet.position(), other.position());
            prop_assert_eq!(cubelet.orientation(), other.orientation());
        }
    }

    #[test]
    fn proptest_four_turns_are_identity((size, moves) in sized_moves(8)) {
        let mut reg = CubeletRegistry::new(size).unwrap();
        for &mv in &moves {
            let before = reg.clone();
            for _ in 0..4 {
                execute_instant(&mut reg, mv).unwrap();
            }
            prop_assert_eq!(&reg, &before);
            execute_instant(&mut reg, mv).unwrap();
        }
    }

    #[test]
    fn proptest_positions_stay_on_grid((size, moves) in sized_moves(30)) {
        let mut reg = CubeletRegistry::new(size).unwrap();
        for &mv in &moves {
            let done = execute_instant(&mut reg, mv).unwrap();
            prop_assert_eq!(done.fault, None);
        }
        let positions: HashSet<GridPos> = reg.iter().map(|(_, c)| c.position()).collect();
        prop_assert_eq!(positions.len(), reg.len());
        prop_assert_eq!(positions, all_grid_points(size));
        prop_assert_eq!(reg.sticker_counts(), [size * size; 6]);
    }

    #[test]
    fn proptest_move_notation_roundtrip((_size, moves) in sized_moves(10)) {
        let s = format_moves(&moves);
        prop_assert_eq!(parse_moves(&s).unwrap(), moves);
    }
}
