use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use ripple_background_core::{
    Color, FillMode, Geometry, RecordingCanvas, RippleBackground, RippleConfig,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> ripple_background_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Geometry { width, height } => run_geometry(width, height),
        Commands::Simulate(args) => run_simulate(&args),
    }
}

fn run_geometry(width: f32, height: f32) -> ripple_background_core::Result<()> {
    tracing::info!(width, height, "computing ring geometry");

    let geometry = Geometry::compute(width, height);
    if geometry.is_none() {
        tracing::warn!(width, height, "container is not measurable");
    }
    let document = serde_json::to_value(geometry)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn run_simulate(args: &SimulateArgs) -> ripple_background_core::Result<()> {
    let config = match &args.config {
        Some(path) => {
            tracing::info!(?path, "loading ripple configuration");
            RippleConfig::load(path)?
        }
        None => args.inline_config()?,
    };

    let mut ripple = RippleBackground::new(config)?;
    let outcome = ripple.on_measure(args.width, args.height)?;
    tracing::info!(?outcome, radius = ripple.radius(), scale = ripple.scale(), "layout pass");

    ripple.start_ripple_animation();
    if !ripple.is_ripple_animation_running() {
        tracing::warn!("animation did not start, container was never measured");
    }

    let frame_ms = 1000.0 / f64::from(args.fps.max(1));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for frame in 0..args.frames {
        if args.stop_after == Some(frame) {
            tracing::info!(frame, "stopping ripple animation");
            ripple.stop_ripple_animation();
        }
        if frame > 0 {
            ripple.on_frame(frame_ms);
        }

        let mut canvas = RecordingCanvas::new();
        ripple.draw(&mut canvas);
        let line = json!({
            "frame": frame,
            "elapsed_ms": ripple.scheduler().elapsed_ms(),
            "running": ripple.is_ripple_animation_running(),
            "circles": canvas.circles,
        });
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }

    tracing::info!(frames = args.frames, "simulation finished");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for ripple backgrounds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ring geometry derived from a container size.
    Geometry {
        #[arg(long)]
        width: f32,
        #[arg(long)]
        height: f32,
    },
    /// Run the animation against a simulated frame clock and print one JSON
    /// line of circles per frame.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// JSON configuration file. Overrides the inline ring options below.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 480.0)]
    width: f32,
    #[arg(long, default_value_t = 480.0)]
    height: f32,
    /// Number of frames to emit.
    #[arg(long, default_value_t = 180)]
    frames: u32,
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Frame index at which the animation is stopped.
    #[arg(long)]
    stop_after: Option<u32>,
    #[arg(long, default_value = "#0099CC")]
    color: String,
    #[arg(long, default_value_t = 2.0)]
    stroke_width: f32,
    #[arg(long, default_value_t = 64.0)]
    radius: f32,
    #[arg(long, default_value_t = 6)]
    rings: u32,
    #[arg(long, default_value_t = 3000)]
    duration_ms: u32,
    /// Draw outlined rings instead of filled discs.
    #[arg(long)]
    stroked: bool,
}

impl SimulateArgs {
    fn inline_config(&self) -> ripple_background_core::Result<RippleConfig> {
        let color: Color = self.color.parse()?;
        let fill_mode = if self.stroked {
            FillMode::Stroked
        } else {
            FillMode::Filled
        };
        let config = RippleConfig::new(color, self.stroke_width, self.radius)
            .with_ring_count(self.rings)
            .with_duration_ms(self.duration_ms)
            .with_fill_mode(fill_mode);
        config.validate()?;
        Ok(config)
    }
}
