use crate::cell::{Cell, Direction};

/// Fixed-capacity arena of cells addressable by `(x, y)`, with an active
/// rectangle at or below capacity. Allocated once; requests only flip
/// activation flags and reset cell state, never reallocate.
pub struct CellPool {
    cells: Vec<Cell>,
    capacity_width: usize,
    capacity_height: usize,
    active_width: usize,
    active_height: usize,
}

impl CellPool {
    pub fn new(capacity_width: usize, capacity_height: usize) -> Self {
        let mut cells = Vec::with_capacity(capacity_width * capacity_height);
        for y in 0..capacity_height {
            for x in 0..capacity_width {
                cells.push(Cell::new(x, y));
            }
        }
        Self {
            cells,
            capacity_width,
            capacity_height,
            active_width: 0,
            active_height: 0,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.capacity_width + x
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let i = self.index(x, y);
        &mut self.cells[i]
    }

    /// Recomputes the active mask for a new request: exactly the cells with
    /// `x < width && y < height` end up active. The sweep covers the union of
    /// the old and new rectangles, so any cell activated by a previous
    /// request is revisited no matter how the two axes shrank or grew since.
    pub fn activate(&mut self, width: usize, height: usize) {
        let sweep_w = self.active_width.max(width);
        let sweep_h = self.active_height.max(height);
        for y in 0..sweep_h {
            for x in 0..sweep_w {
                let inside = x < width && y < height;
                let i = self.index(x, y);
                self.cells[i].set_active(inside);
            }
        }
        self.active_width = width;
        self.active_height = height;
    }

    /// Resets every cell of the active rectangle: all walls up, no visit
    /// flags. Every generation request runs this before carving.
    pub fn reset_active(&mut self) {
        for y in 0..self.active_height {
            for x in 0..self.active_width {
                let i = self.index(x, y);
                self.cells[i].reset();
            }
        }
    }

    /// Drops the shared wall between two adjacent cells as one atomic
    /// operation, keeping the wall mask symmetric on both sides.
    pub(crate) fn open_between(&mut self, a: (usize, usize), b: (usize, usize)) {
        let dir = if b.0 > a.0 {
            Direction::East
        } else if b.0 < a.0 {
            Direction::West
        } else if b.1 > a.1 {
            Direction::North
        } else {
            Direction::South
        };
        self.cell_mut(a.0, a.1).remove_wall(dir);
        self.cell_mut(b.0, b.1).remove_wall(dir.opposite());
    }

    /// Active, unvisited 4-neighbors of `(x, y)` as a fixed array plus count.
    /// Candidate order is +x, -x, +y, -y.
    pub(crate) fn unvisited_neighbors(&self, x: usize, y: usize) -> ([(usize, usize); 4], usize) {
        let mut out = [(0, 0); 4];
        let mut count = 0;
        let mut push = |out: &mut [(usize, usize); 4], count: &mut usize, nx: usize, ny: usize| {
            let cell = self.cell(nx, ny);
            if cell.is_active() && !cell.is_visited() {
                out[*count] = (nx, ny);
                *count += 1;
            }
        };
        if x + 1 < self.active_width {
            push(&mut out, &mut count, x + 1, y);
        }
        if x > 0 {
            push(&mut out, &mut count, x - 1, y);
        }
        if y + 1 < self.active_height {
            push(&mut out, &mut count, x, y + 1);
        }
        if y > 0 {
            push(&mut out, &mut count, x, y - 1);
        }
        (out, count)
    }

    pub fn active_width(&self) -> usize {
        self.active_width
    }

    pub fn active_height(&self) -> usize {
        self.active_height
    }

    pub fn capacity_width(&self) -> usize {
        self.capacity_width
    }

    pub fn capacity_height(&self) -> usize {
        self.capacity_height
    }
}
