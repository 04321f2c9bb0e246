use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::info;
use nalgebra::Vector3;

use donut_render as dr;

/// Spins a gray-shaded torus on a 256-colour terminal using the palette sink.
#[derive(Parser, Debug)]
#[command(name = "palette")]
struct Args {
    /// Frame width in cells
    #[arg(long, default_value_t = 64)]
    width: usize,

    /// Frame height in cells
    #[arg(long, default_value_t = 32)]
    height: usize,

    /// Frames per revolution cycle
    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Delay between frames, in milliseconds
    #[arg(long, default_value_t = 50)]
    delay: u64,

    /// Stop after one cycle instead of repeating
    #[arg(long)]
    once: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let torus = dr::Torus::default();
    let scene = dr::Scene::fitted(args.width, args.height, 5.0, Vector3::new(0.0, 1.0, -1.0), &torus)
        .with_context(|| format!("building a {}x{} scene", args.width, args.height))?;
    info!("palette: {:?}", dr::frame::palette());

    let mut frame = dr::PaletteFrame::for_scene(&scene);
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
        let stats = dr::render(&mut frame, &mut depth, &pose, &scene);
        frame.print_ansi(&mut out)?;
        write!(out, "\x1B[{}F", scene.height)?;
        out.flush()?;
        if stats.drawn == 0 {
            info!("empty frame at a={} b={}", pose.a(), pose.b());
        }
        thread::sleep(Duration::from_millis(args.delay));
    }
    writeln!(out, "\x1B[{}E", scene.height)?;
    Ok(())
}
