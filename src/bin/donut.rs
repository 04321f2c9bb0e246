use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::info;
use nalgebra::Vector3;

use donut_render as dr;

/// Spins a text torus in the terminal.
#[derive(Parser, Debug)]
#[command(name = "donut")]
struct Args {
    /// Frames per revolution cycle
    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Delay between frames, in milliseconds
    #[arg(long, default_value_t = 50)]
    delay: u64,

    /// Stop after one cycle instead of repeating
    #[arg(long)]
    once: bool,

    /// Distance from the camera to the torus centre
    #[arg(long, default_value_t = 5.0)]
    distance: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let (cols, rows) = crossterm::terminal::size().context("reading terminal size")?;
    // Leave the last line free; printing the final row moves the cursor onto it.
    let size = (cols as usize).min((rows as usize).saturating_sub(1));

    let torus = dr::Torus::default();
    let scene = dr::Scene::fitted(size, size, args.distance, Vector3::new(0.0, 1.0, -1.0), &torus)
        .with_context(|| format!("building a {}x{} scene", size, size))?;
    info!("rendering {}x{} at k1 = {:.2}", scene.width, scene.height, scene.k1());

    let mut frame = dr::TextFrame::for_scene(&scene);
    let mut depth = dr::DepthBuffer::for_scene(&scene);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let poses = dr::Animation::new(torus, args.steps);
    let poses: Box<dyn Iterator<Item = dr::Torus>> = if args.once {
        Box::new(poses)
    } else {
        Box::new(poses.cycle())
    };

    for pose in poses {
        frame.reset();
        depth.reset();
        dr::render(&mut frame, &mut depth, &pose, &scene);
        frame.print(&mut out)?;
        write!(out, "\x1B[{}F", scene.height)?;
        out.flush()?;
        thread::sleep(Duration::from_millis(args.delay));
    }
    writeln!(out, "\x1B[{}E", scene.height)?;
    Ok(())
}
