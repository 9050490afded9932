use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::grid::CellPool;

/// One suspended frame of the depth-first carve: the cell being worked on
/// and the cell it was entered from.
struct Frame {
    prev: Option<(usize, usize)>,
    cur: (usize, usize),
}

/// Outcome of a single carving step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// One more cell was entered and its connecting wall removed.
    Visited { x: usize, y: usize },
    /// The stack has unwound past the origin; the maze is complete.
    Done,
}

/// Randomized depth-first carver over the pool's active rectangle.
///
/// Backtracking lives on an explicit frame stack rather than the host call
/// stack, so a capacity-sized grid can carve, suspend and resume without
/// recursion-depth limits. Each `step` performs exactly one cell-visit,
/// which is the suspension point of the stepped mode; `run` drives the same
/// state machine to completion for the instant mode.
pub struct Carver {
    stack: Vec<Frame>,
    rng: SmallRng,
    started: bool,
}

impl Carver {
    pub fn new(seed: u64) -> Self {
        Self {
            stack: Vec::with_capacity(256),
            rng: SmallRng::seed_from_u64(seed),
            started: false,
        }
    }

    /// Advances the carve by one cell-visit. Backtracking over exhausted
    /// frames happens inline; only entering a fresh cell yields.
    pub fn step(&mut self, pool: &mut CellPool) -> Step {
        if !self.started {
            self.started = true;
            let root = Frame {
                prev: None,
                cur: (0, 0),
            };
            self.enter(&root, pool);
            self.stack.push(root);
            return Step::Visited { x: 0, y: 0 };
        }
        loop {
            let Some(top) = self.stack.last() else {
                return Step::Done;
            };
            let (x, y) = top.cur;
            // The candidate set shrinks as carving proceeds, so it is
            // re-evaluated on every return to this frame.
            let (neighbors, count) = pool.unvisited_neighbors(x, y);
            if count == 0 {
                let _ = self.stack.pop();
                continue;
            }
            let next = neighbors[self.rng.random_range(0..count)];
            let frame = Frame {
                prev: Some((x, y)),
                cur: next,
            };
            self.enter(&frame, pool);
            self.stack.push(frame);
            return Step::Visited {
                x: next.0,
                y: next.1,
            };
        }
    }

    /// Runs the carve synchronously to completion.
    pub fn run(&mut self, pool: &mut CellPool) {
        while self.step(pool) != Step::Done {}
    }

    pub fn finished(&self) -> bool {
        self.started && self.stack.is_empty()
    }

    // Entering a frame marks the cell visited and, except at the origin,
    // removes the wall shared with the cell it was entered from.
    fn enter(&self, frame: &Frame, pool: &mut CellPool) {
        pool.cell_mut(frame.cur.0, frame.cur.1).mark_visited();
        if let Some(prev) = frame.prev {
            pool.open_between(prev, frame.cur);
        }
    }
}
