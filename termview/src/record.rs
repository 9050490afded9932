use mazegen::cell::Direction;
use mazegen::grid::CellPool;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

/// Exported form of a finished maze: dimensions plus one wall bitmask per
/// active cell, row-major from the origin. Bit order follows
/// `Direction::ALL` (North, East, South, West).
#[derive(Serialize, Debug)]
pub struct MazeRecord {
    pub schema: &'static str,
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub walls: Vec<u8>,
}

impl MazeRecord {
    pub fn from_pool(pool: &CellPool, seed: Option<u64>) -> Self {
        let (w, h) = (pool.active_width(), pool.active_height());
        let mut walls = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let cell = pool.cell(x, y);
                let mut mask = 0u8;
                for (bit, dir) in Direction::ALL.into_iter().enumerate() {
                    if cell.has_wall(dir) {
                        mask |= 1 << bit;
                    }
                }
                walls.push(mask);
            }
        }
        Self {
            schema: "v1",
            width: w,
            height: h,
            seed,
            walls,
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(self).unwrap();
        writeln!(writer, "{}", json)?;
        writer.into_inner()?.sync_all()?;
        Ok(())
    }
}
