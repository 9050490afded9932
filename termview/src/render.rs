use mazegen::cell::Direction;
use mazegen::grid::CellPool;

/// Draws the active rectangle as ASCII walls, top row first. Unvisited
/// active cells are filled so a stepped run shows its carving frontier.
pub fn draw(pool: &CellPool) -> String {
    let w = pool.active_width();
    let h = pool.active_height();
    if w == 0 || h == 0 {
        return String::new();
    }

    let mut out = String::with_capacity((3 * w + 2) * (2 * h + 1));
    out.push('+');
    for x in 0..w {
        out.push_str(if pool.cell(x, h - 1).has_wall(Direction::North) {
            "--+"
        } else {
            "  +"
        });
    }
    out.push('\n');

    for y in (0..h).rev() {
        for x in 0..w {
            let cell = pool.cell(x, y);
            out.push(if cell.has_wall(Direction::West) { '|' } else { ' ' });
            out.push_str(if cell.is_visited() { "  " } else { "::" });
        }
        out.push(if pool.cell(w - 1, y).has_wall(Direction::East) {
            '|'
        } else {
            ' '
        });
        out.push('\n');

        // Walls between this row and the one below double as the border on
        // the last row; symmetry keeps either side of the edge equivalent.
        out.push('+');
        for x in 0..w {
            out.push_str(if pool.cell(x, y).has_wall(Direction::South) {
                "--+"
            } else {
                "  +"
            });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sealed_single_cell_draws_a_closed_box() {
        let mut pool = CellPool::new(4, 4);
        pool.activate(1, 1);
        pool.reset_active();
        assert_eq!(draw(&pool), "+--+\n|::|\n+--+\n");
    }

    #[test]
    fn visited_cells_render_open_interiors() {
        let mut pool = CellPool::new(4, 4);
        pool.activate(1, 1);
        pool.reset_active();
        pool.cell_mut(0, 0).mark_visited();
        assert_eq!(draw(&pool), "+--+\n|  |\n+--+\n");
    }

    #[test]
    fn row_count_matches_active_height() {
        let mut pool = CellPool::new(8, 8);
        pool.activate(5, 3);
        pool.reset_active();
        let text = draw(&pool);
        assert_eq!(text.lines().count(), 2 * 3 + 1);
        assert!(text.lines().all(|line| line.len() == 3 * 5 + 1));
    }
}
