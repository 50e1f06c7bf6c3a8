use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::info;
use minifb::{Key, Window, WindowOptions};

use yaray_rs::{
    renderer::{Display, Minimap, Software, View, fps_label, render_frame},
    sim::{Controls, FrameClock, update_player},
    world::{MapDef, Player, TextureBank, load_map, parse_map},
};

const TITLE: &str = "Rust Raycaster Software Render";

/// Level used when no `--map` is given.
const DEMO_MAP: &str = include_str!("../../assets/demo.map");

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file to load (built-in demo level when omitted)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Directory texture paths in the map are relative to
    #[arg(long, value_name = "DIR", default_value = "./assets/images")]
    assets: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 800)]
    height: usize,

    /// Render resolution relative to the window
    #[arg(long, default_value_t = 0.3)]
    resolution: f64,

    /// Frame-rate cap
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

const KEYMAP: [(Key, Controls); 6] = [
    (Key::W, Controls::FORWARD),
    (Key::S, Controls::BACKWARD),
    (Key::A, Controls::STRAFE_LEFT),
    (Key::D, Controls::STRAFE_RIGHT),
    (Key::Left, Controls::TURN_LEFT),
    (Key::Right, Controls::TURN_RIGHT),
];

/// One input snapshot per frame.
fn sample_controls(win: &Window) -> Controls {
    KEYMAP
        .iter()
        .filter(|(key, _)| win.is_key_down(*key))
        .fold(Controls::empty(), |acc, (_, c)| acc | *c)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let mut bank = TextureBank::new();
    let MapDef {
        scene,
        spawn,
        sprites,
    } = match &opts.map {
        Some(path) => load_map(path, &opts.assets, &mut bank)
            .with_context(|| format!("loading map {}", path.display()))?,
        None => parse_map(DEMO_MAP, &opts.assets, &mut bank).context("parsing the demo map")?,
    };
    info!(
        "scene {}x{}, {} textures, {} sprites",
        scene.width(),
        scene.height(),
        bank.len(),
        sprites.len()
    );

    let mut player = spawn.unwrap_or_else(|| Player::new(scene.size() * 0.5, 0.0));

    let minimap = Minimap::new(&bank);
    let mut display = Display::new(opts.width, opts.height, opts.resolution);
    let mut renderer = Software::new();
    let mut clock = FrameClock::new();

    let mut win = Window::new(
        TITLE,
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(opts.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = clock.tick();
        let t0 = Instant::now(); // ┌─ frame timer start

        player = update_player(&scene, &player, sample_controls(&win), dt);

        let view = View {
            scene: &scene,
            player: &player,
            sprites: &sprites,
            bank: &bank,
        };
        render_frame(&mut renderer, &mut display, &minimap, &view, dt);

        acc_time += t0.elapsed();
        acc_frames += 1;
        if let Some(fps) = fps_label(dt) {
            win.set_title(&format!("{TITLE} | {fps}"));
        }
        win.update_with_buffer(display.buffer(), display.width(), display.height())?;

        // ─────────── report every ~3 s ────────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
