//! Headless harness for the macrodata refinement panel. A host window loop
//! owns the real renderer and input; this binary drives the same session
//! against the recording renderer and a scripted pointer, then prints a run
//! summary. Useful for automation and for watching the simulation without a
//! display.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;

use mdr_core::{GridConfig, SimRng, TileGrid};
use mdr_panel::{
    load_or_default, FrameContext, FrameInput, IdleScreen, InputSource, NumbersPanel,
    RecordingRenderer, ScriptedInput, Session, SessionEvent, Theme, LOGO_IMAGE,
};

const WINDOWED_SIZE: Vec2 = Vec2::new(1920.0, 1080.0);
/// Nominal frame rate the tick clock is derived from.
const FRAMES_PER_SECOND: f64 = 60.0;

#[derive(Parser, Debug)]
#[command(about = "Macrodata refinement panel harness", version)]
struct Args {
    /// Request fullscreen from the host backend instead of the fixed
    /// 1920x1080 window
    #[arg(long)]
    full_screen: bool,

    /// Number of frames to simulate before printing the run summary
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Settings file; missing or corrupt files fall back to defaults
    #[arg(long, default_value = "./settings.json")]
    settings: PathBuf,

    /// Grid edge length
    #[arg(long, default_value_t = 100)]
    grid_size: usize,

    /// Seed the simulation PRNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let window_size = WINDOWED_SIZE;
    if args.full_screen {
        log::info!("fullscreen requested; the harness surface stays at 1920x1080");
    }

    let settings = load_or_default(&args.settings);
    let mut rng = match args.seed {
        Some(seed) => SimRng::seeded(seed),
        None => SimRng::from_entropy(),
    };

    let grid = TileGrid::generate(
        GridConfig {
            size: args.grid_size,
            ..GridConfig::default()
        },
        &mut rng,
    );
    println!(
        "Generated {}x{} grid: {} tiles, {} bad clusters",
        args.grid_size,
        args.grid_size,
        grid.tiles().len(),
        grid.clusters().len()
    );

    let theme = Theme::default();
    let mut renderer = stub_renderer();
    let panel = NumbersPanel::new(grid, settings, theme);
    let idle = IdleScreen::new(&mut renderer, theme.accent);
    let mut session = Session::new(panel, idle, args.settings.clone());

    let mut script = demo_script(args.ticks, window_size);
    let mut last_frame_calls = 0;
    'frames: for tick in 0..args.ticks {
        let input = script.next_frame();
        let ctx = FrameContext {
            window_pos: Vec2::ZERO,
            window_size,
            display_size: window_size,
            input,
        };

        renderer.clear();
        let events = session.draw(&ctx, &mut renderer, &mut rng);
        last_frame_calls = renderer.calls.len();

        let now = tick as f64 / FRAMES_PER_SECOND;
        session.update(now, &input, window_size, &mut rng);

        for event in events {
            match event {
                SessionEvent::ShutdownRequested => {
                    println!("Shutdown requested at tick {tick}; stopping.");
                    break 'frames;
                }
                SessionEvent::SettingsSaved => {
                    println!("Settings saved at tick {tick}.");
                }
            }
        }
    }

    print_summary(&session, last_frame_calls);
    Ok(())
}

/// Registers placeholder dimensions for every asset the panel draws, so
/// visibility math and bin layout behave like a real asset set.
fn stub_renderer() -> RecordingRenderer {
    let mut renderer = RecordingRenderer::new().with_image(LOGO_IMAGE, 420, 180);
    for digit in 0..10 {
        renderer.register_image(&format!("numbers/{digit}.png"), 64, 64);
    }
    for bin in 1..=5 {
        renderer.register_image(&format!("bins/bin0{bin}.png"), 96, 72);
    }
    renderer.register_image("bins/bin-percent.png", 96, 24);
    renderer.register_image("bins/bin-open.png", 96, 32);
    renderer
}

/// Wakes the panel on the first frame, then sweeps the pointer back and
/// forth across the interior band so proximity scaling and cluster
/// spotlighting get exercised.
fn demo_script(ticks: u64, window_size: Vec2) -> ScriptedInput {
    let mut script = ScriptedInput::new();
    for tick in 0..ticks {
        let phase = (tick as f32 * 0.002).sin() * 0.5 + 0.5;
        let pointer = Vec2::new(
            window_size.x * (0.1 + 0.8 * phase),
            window_size.y * 0.5,
        );
        script.push(FrameInput {
            pointer,
            pointer_delta: Vec2::new(1.0, 0.0),
            primary_down: tick % 240 > 200,
            ..FrameInput::default()
        });
    }
    script
}

fn print_summary(session: &Session, last_frame_calls: usize) {
    let panel = session.panel();
    println!();
    println!(
        "Run finished {} (last frame submitted {} draw calls)",
        if session.is_idle() { "idle" } else { "live" },
        last_frame_calls
    );
    println!(
        "Clusters remaining: {} ({} visible, active: {:?})",
        panel.grid().clusters().len(),
        panel.activity().visible_clusters().len(),
        panel.activity().active_cluster()
    );
    for bin in panel.bins() {
        println!(
            "  bin {}: {}/{} refined ({:.0}%)",
            bin.id,
            bin.refined,
            bin.max,
            bin.progress() * 100.0
        );
    }
}
