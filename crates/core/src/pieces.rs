//! Pieces module - the shape table
//!
//! Each kind owns an ordered list of rotation states. A state is a set of
//! `(dx, dy)` offsets relative to the piece anchor, where `dx` is the column
//! delta and `dy` the row delta (down is positive). Offsets are only turned
//! into flat board indices when a placement is evaluated, so the table works
//! for any board width.
//!
//! Rotation advances to the next state in the list and wraps around; there
//! are no wall kicks.

use crate::types::{PieceKind, MAX_PIECE_CELLS};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// One rotation state
pub type PieceShape = [CellOffset; MAX_PIECE_CELLS];

const L_STATES: [PieceShape; 4] = [
    [(1, 0), (1, 1), (1, 2), (2, 0)],
    [(0, 1), (0, 2), (1, 2), (2, 2)],
    [(1, 0), (1, 1), (1, 2), (0, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
];

const J_STATES: [PieceShape; 4] = [
    [(1, 0), (1, 1), (1, 2), (0, 0)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(2, 1), (0, 2), (1, 2), (2, 2)],
];

const T_STATES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_STATES: [PieceShape; 2] = [
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_STATES: [PieceShape; 2] = [
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const I_STATES: [PieceShape; 2] = [
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
];

const O_STATES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

/// All rotation states of a kind, in rotation order.
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::L => &L_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
    }
}

/// Number of distinct rotation states for a kind.
pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Get the offsets for a kind at a rotation index.
///
/// The index is reduced modulo the kind's rotation count.
pub fn get_shape(kind: PieceKind, rotation: usize) -> &'static PieceShape {
    let states = rotation_states(kind);
    &states[rotation % states.len()]
}

/// Index of the rotation state that follows `rotation`.
pub fn next_rotation(kind: PieceKind, rotation: usize) -> usize {
    (rotation + 1) % rotation_count(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_counts() {
        assert_eq!(rotation_count(PieceKind::L), 4);
        assert_eq!(rotation_count(PieceKind::J), 4);
        assert_eq!(rotation_count(PieceKind::T), 4);
        assert_eq!(rotation_count(PieceKind::S), 2);
        assert_eq!(rotation_count(PieceKind::Z), 2);
        assert_eq!(rotation_count(PieceKind::I), 2);
        assert_eq!(rotation_count(PieceKind::O), 1);
    }

    #[test]
    fn test_states_have_distinct_cells_within_4x4_box() {
        for kind in PieceKind::ALL {
            for shape in rotation_states(kind) {
                for (i, a) in shape.iter().enumerate() {
                    assert!((0..4).contains(&a.0) && (0..4).contains(&a.1));
                    for b in &shape[i + 1..] {
                        assert_ne!(a, b, "{:?} has a duplicated cell", kind);
                    }
                }
            }
        }
    }

    #[test]
    fn test_next_rotation_wraps() {
        assert_eq!(next_rotation(PieceKind::T, 3), 0);
        assert_eq!(next_rotation(PieceKind::I, 1), 0);
        assert_eq!(next_rotation(PieceKind::O, 0), 0);
    }

    #[test]
    fn test_get_shape_reduces_rotation() {
        assert_eq!(get_shape(PieceKind::S, 2), get_shape(PieceKind::S, 0));
    }
}
