//! Property tests for wide-cell bookkeeping in the grid.
//!
//! Invariants covered:
//!
//! 1. A continuation slot always sits directly right of a width-2 glyph;
//!    clearing or overwriting either half of the pair drops the other.
//! 2. A width-2 glyph anywhere but the last column always owns the
//!    continuation to its right (at the last column the overhang is
//!    clipped and no continuation exists).
//! 3. Out-of-bounds writes are inert: they never panic and never disturb
//!    in-bounds state.

use proptest::prelude::*;
use tpane_render::{Cell, Grid, Slot};

const WIDTH: u16 = 8;
const HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
enum Op {
    PutNarrow(u16, u16),
    PutWide(u16, u16),
    Clear(u16, u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Coordinates deliberately overshoot the grid edge.
    let xy = (0u16..WIDTH + 2, 0u16..HEIGHT + 2);
    prop_oneof![
        xy.clone().prop_map(|(x, y)| Op::PutNarrow(x, y)),
        xy.clone().prop_map(|(x, y)| Op::PutWide(x, y)),
        xy.prop_map(|(x, y)| Op::Clear(x, y)),
    ]
}

fn wide_cell() -> Cell {
    let mut cell = Cell::plain('\u{65E5}');
    cell.width = 2;
    cell
}

fn apply(grid: &mut Grid, op: Op) {
    match op {
        Op::PutNarrow(x, y) => grid.put(x, y, Cell::plain('a')),
        Op::PutWide(x, y) => grid.put(x, y, wide_cell()),
        Op::Clear(x, y) => grid.clear_cell(x, y),
    }
}

fn in_bounds(op: Op) -> bool {
    let (x, y) = match op {
        Op::PutNarrow(x, y) | Op::PutWide(x, y) | Op::Clear(x, y) => (x, y),
    };
    x < WIDTH && y < HEIGHT
}

proptest! {
    #[test]
    fn wide_pairs_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut grid = Grid::new(WIDTH, HEIGHT);
        for op in &ops {
            apply(&mut grid, *op);
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    match grid.slot(x, y) {
                        Slot::Glyph(cell) if cell.width == 2 && x + 1 < WIDTH => {
                            prop_assert_eq!(
                                grid.slot(x + 1, y),
                                &Slot::Continuation,
                                "wide glyph at ({}, {}) lost its continuation after {:?}",
                                x, y, op
                            );
                        }
                        Slot::Continuation => {
                            prop_assert!(
                                x > 0
                                    && matches!(
                                        grid.slot(x - 1, y),
                                        Slot::Glyph(c) if c.width == 2
                                    ),
                                "orphaned continuation at ({}, {}) after {:?}",
                                x, y, op
                            );
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_ops_are_inert(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut grid = Grid::new(WIDTH, HEIGHT);
        let mut clamped = Grid::new(WIDTH, HEIGHT);
        for op in &ops {
            apply(&mut grid, *op);
            if in_bounds(*op) {
                apply(&mut clamped, *op);
            }
        }
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                prop_assert_eq!(grid.slot(x, y), clamped.slot(x, y), "slot ({}, {})", x, y);
            }
            prop_assert_eq!(grid.row_text(y), clamped.row_text(y));
        }
    }
}
