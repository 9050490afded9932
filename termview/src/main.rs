use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

use mazegen::engine::{MazeEngine, Tick};

mod args;
mod record;
mod render;

const CAPACITY: usize = 250;

fn main() -> anyhow::Result<()> {
    let opts = args::parse(env::args().skip(1))?;
    // The engine leaves dimension checks to its caller; the caller is here.
    let width = opts.width.clamp(1, CAPACITY);
    let height = opts.height.clamp(1, CAPACITY);

    let mut engine = match opts.seed {
        Some(seed) => MazeEngine::with_seed(CAPACITY, CAPACITY, seed),
        None => MazeEngine::new(CAPACITY, CAPACITY),
    };
    engine.create_maze(width, height, opts.animate);

    if opts.animate {
        run_animated(&mut engine, opts.delay_ms)?;
    }

    print!("{}", render::draw(engine.pool()));
    let layout = engine.layout();
    println!(
        "{}x{} cells, scale {:.3}, origin ({:.3}, {:.3})",
        width,
        height,
        layout.scale(),
        layout.origin().0,
        layout.origin().1
    );

    if let Some(path) = &opts.json_out {
        let rec = record::MazeRecord::from_pool(engine.pool(), opts.seed);
        rec.write_json(path)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// Drives the stepped run at a fixed cadence, redrawing the maze after each
/// carved cell on the alternate screen.
fn run_animated(engine: &mut MazeEngine, delay_ms: u64) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let outcome = animate_loop(engine, &mut stdout, delay_ms);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    outcome
}

fn animate_loop(
    engine: &mut MazeEngine,
    stdout: &mut io::Stdout,
    delay_ms: u64,
) -> anyhow::Result<()> {
    loop {
        match engine.tick() {
            Tick::Carved { .. } => {}
            Tick::Finished | Tick::Idle => return Ok(()),
        }
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Print(render::draw(engine.pool())))?;
        stdout.flush()?;
        thread::sleep(Duration::from_millis(delay_ms));
    }
}
