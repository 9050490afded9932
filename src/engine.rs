use rand::{RngCore, SeedableRng, rngs::SmallRng};
use rand_xoshiro::SplitMix64;

use crate::carve::{Carver, Step};
use crate::geom::Layout;
use crate::grid::CellPool;

/// Result of advancing an in-flight stepped generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No generation is in flight.
    Idle,
    /// One more cell was carved; the driver should redraw and wait.
    Carved { x: usize, y: usize },
    /// The run just completed; subsequent ticks are `Idle`.
    Finished,
}

struct ActiveRun {
    carver: Carver,
    epoch: u64,
}

/// The generation engine: owns the pool, the layout and at most one in-flight
/// stepped run. Callers hold an explicit handle to it; there is no global
/// instance.
///
/// Dimension preconditions (`1 <= width <= capacity`, likewise height) are
/// the caller's responsibility. Out-of-range requests fail on slice bounds
/// checks rather than being reported.
pub struct MazeEngine {
    pool: CellPool,
    layout: Layout,
    seeds: SplitMix64,
    epoch: u64,
    run: Option<ActiveRun>,
}

impl MazeEngine {
    pub fn new(capacity_width: usize, capacity_height: usize) -> Self {
        Self::with_seed(
            capacity_width,
            capacity_height,
            SmallRng::from_os_rng().next_u64(),
        )
    }

    /// Seeded construction: the master sequence feeding every per-run seed is
    /// fixed, so the same requests reproduce the same mazes.
    pub fn with_seed(capacity_width: usize, capacity_height: usize, seed: u64) -> Self {
        let mut layout = Layout::default();
        layout.refit(capacity_width, capacity_height);
        Self {
            pool: CellPool::new(capacity_width, capacity_height),
            layout,
            seeds: SplitMix64::seed_from_u64(seed),
            epoch: 0,
            run: None,
        }
    }

    /// Starts a new generation request. Any pending stepped run is cancelled
    /// before the pool is touched: its epoch goes stale and its state is
    /// dropped, so it can never mutate cells reset for this request.
    pub fn create_maze(&mut self, width: usize, height: usize, animated: bool) {
        self.epoch += 1;
        self.run = None;

        self.pool.activate(width, height);
        self.pool.reset_active();
        self.layout.refit(width, height);

        let mut carver = Carver::new(self.seeds.next_u64());
        if animated {
            self.run = Some(ActiveRun {
                carver,
                epoch: self.epoch,
            });
        } else {
            carver.run(&mut self.pool);
        }
    }

    /// Advances the in-flight stepped run by one cell-visit. The external
    /// driver owns the cadence between calls.
    pub fn tick(&mut self) -> Tick {
        // A run parked before the latest request is stale and must never
        // step again; it is discarded without touching the pool.
        if self
            .run
            .as_ref()
            .is_some_and(|run| run.epoch != self.epoch)
        {
            self.run = None;
        }
        let Some(run) = self.run.as_mut() else {
            return Tick::Idle;
        };
        match run.carver.step(&mut self.pool) {
            Step::Visited { x, y } => Tick::Carved { x, y },
            Step::Done => {
                self.run = None;
                Tick::Finished
            }
        }
    }

    pub fn generating(&self) -> bool {
        self.run.is_some()
    }

    pub fn pool(&self) -> &CellPool {
        &self.pool
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Direction;

    /// Wall masks of the active rectangle, row-major.
    fn wall_snapshot(pool: &CellPool) -> Vec<u8> {
        let mut out = Vec::new();
        for y in 0..pool.active_height() {
            for x in 0..pool.active_width() {
                let mut mask = 0u8;
                for (bit, dir) in Direction::ALL.into_iter().enumerate() {
                    if pool.cell(x, y).has_wall(dir) {
                        mask |= 1 << bit;
                    }
                }
                out.push(mask);
            }
        }
        out
    }

    fn passage_count(pool: &CellPool) -> usize {
        let (w, h) = (pool.active_width(), pool.active_height());
        let mut edges = 0;
        for y in 0..h {
            for x in 0..w {
                if x + 1 < w && !pool.cell(x, y).has_wall(Direction::East) {
                    edges += 1;
                }
                if y + 1 < h && !pool.cell(x, y).has_wall(Direction::North) {
                    edges += 1;
                }
            }
        }
        edges
    }

    #[test]
    fn instant_request_completes_before_returning() {
        let mut engine = MazeEngine::with_seed(16, 16, 1);
        engine.create_maze(9, 7, false);
        assert!(!engine.generating());
        assert_eq!(passage_count(engine.pool()), 9 * 7 - 1);
        for y in 0..7 {
            for x in 0..9 {
                assert!(engine.pool().cell(x, y).is_visited());
            }
        }
    }

    #[test]
    fn tick_without_a_request_is_idle() {
        let mut engine = MazeEngine::with_seed(8, 8, 1);
        assert_eq!(engine.tick(), Tick::Idle);
        engine.create_maze(4, 4, false);
        assert_eq!(engine.tick(), Tick::Idle);
    }

    #[test]
    fn stepped_run_carves_one_cell_per_tick() {
        let mut engine = MazeEngine::with_seed(16, 16, 2);
        engine.create_maze(5, 4, true);
        assert!(engine.generating());
        let mut carved = 0;
        loop {
            match engine.tick() {
                Tick::Carved { .. } => carved += 1,
                Tick::Finished => break,
                Tick::Idle => panic!("run vanished before finishing"),
            }
        }
        assert_eq!(carved, 5 * 4);
        assert!(!engine.generating());
        assert_eq!(engine.tick(), Tick::Idle);
    }

    #[test]
    fn stepped_and_instant_scheduling_carve_identically() {
        let mut stepped = MazeEngine::with_seed(16, 16, 77);
        stepped.create_maze(8, 6, true);
        while stepped.tick() != Tick::Finished {}

        let mut instant = MazeEngine::with_seed(16, 16, 77);
        instant.create_maze(8, 6, false);

        assert_eq!(wall_snapshot(stepped.pool()), wall_snapshot(instant.pool()));
    }

    #[test]
    fn same_master_seed_reproduces_request_sequences() {
        let mut a = MazeEngine::with_seed(16, 16, 123);
        let mut b = MazeEngine::with_seed(16, 16, 123);
        for engine in [&mut a, &mut b] {
            engine.create_maze(6, 6, false);
            engine.create_maze(9, 4, false);
        }
        assert_eq!(wall_snapshot(a.pool()), wall_snapshot(b.pool()));
    }

    #[test]
    fn new_request_cancels_a_partial_stepped_run() {
        let mut engine = MazeEngine::with_seed(16, 16, 9);
        engine.create_maze(5, 5, true);
        for _ in 0..5 {
            assert!(matches!(engine.tick(), Tick::Carved { .. }));
        }

        engine.create_maze(3, 3, false);

        // Only the complete 3x3 maze is visible: its cells are visited and
        // tree-connected, everything else is inactive, nothing is pending.
        assert_eq!(engine.tick(), Tick::Idle);
        assert_eq!(passage_count(engine.pool()), 3 * 3 - 1);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(engine.pool().cell(x, y).is_active(), x < 3 && y < 3);
                if x < 3 && y < 3 {
                    assert!(engine.pool().cell(x, y).is_visited());
                }
            }
        }
    }

    #[test]
    fn shrinking_request_recarves_the_smaller_rectangle() {
        let mut engine = MazeEngine::with_seed(16, 16, 31);
        engine.create_maze(10, 10, false);
        engine.create_maze(4, 4, false);

        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(engine.pool().cell(x, y).is_active(), x < 4 && y < 4);
            }
        }
        assert_eq!(passage_count(engine.pool()), 4 * 4 - 1);
        for y in 0..4 {
            for x in 0..4 {
                assert!(engine.pool().cell(x, y).is_visited());
            }
        }
    }

    #[test]
    fn layout_refits_on_every_request() {
        let mut engine = MazeEngine::with_seed(250, 250, 1);
        assert_eq!(engine.layout().scale(), 10.0 / 250.0);
        engine.create_maze(10, 5, false);
        assert_eq!(engine.layout().scale(), 1.0);
        engine.create_maze(20, 5, false);
        assert_eq!(engine.layout().scale(), 0.5);
        let scale = engine.layout().scale();
        assert_eq!(engine.layout().origin(), (scale / 2.0, scale / 2.0));
    }
}
