//! City Walk
//!
//! Headless run of the locomotion core: loads a synthetic city block and a
//! character, then replays a scripted keyboard session at a fixed 60 Hz and
//! logs what a renderer would draw.
//!
//! ```text
//! RUST_LOG=info cargo run -p city_walk
//! RUST_LOG=debug cargo run -p city_walk -- settings.json
//! ```

use glam::Vec3;
use wayfarer::errors::{Result as WayfarerResult, WayfarerError};
use wayfarer::input::{ButtonState, Input, Key};
use wayfarer::scene::{BoundingBox, Transform};
use wayfarer::utils::Timer;
use wayfarer::viewer::{AssetLoader, CharacterAsset, Viewer};
use wayfarer::ViewerSettings;

const DT: f32 = 1.0 / 60.0;
const SESSION_TICKS: u64 = 600;
const LOG_EVERY: u64 = 30;

/// Builds the environment bounds from a grid of box-shaped buildings.
struct CityBlockLoader {
    blocks: u32,
    spacing: f32,
}

impl AssetLoader for CityBlockLoader {
    fn load_environment(&mut self) -> WayfarerResult<BoundingBox> {
        let (blocks, spacing) = (self.blocks, self.spacing);
        let half = blocks as f32 * spacing * 0.5;
        let corners = (0..blocks).flat_map(|i| {
            (0..blocks).map(move |j| {
                let x = i as f32 * spacing - half;
                let z = j as f32 * spacing - half;
                // Taller towers towards the middle of the block
                let height = 120.0 + 40.0 * (i.min(j) as f32);
                [Vec3::new(x, -5.0, z), Vec3::new(x + 80.0, height, z + 80.0)]
            })
        });
        let corners = corners.flatten();

        let bounds = BoundingBox::from_points(corners)
            .ok_or_else(|| WayfarerError::AssetLoad("city block has no buildings".to_string()))?;
        log::info!("City block loaded: {} buildings", self.blocks * self.blocks);
        Ok(bounds)
    }

    fn load_character(&mut self) -> WayfarerResult<CharacterAsset> {
        Ok(CharacterAsset {
            root: Transform::default(),
            bounding_height: 1.75,
        })
    }
}

/// `(tick, key, state)` events, sorted by tick.
const SCRIPT: &[(u64, Key, ButtonState)] = &[
    (30, Key::W, ButtonState::Pressed),
    (150, Key::A, ButtonState::Pressed),
    (210, Key::A, ButtonState::Released),
    (240, Key::Space, ButtonState::Pressed),
    (250, Key::Space, ButtonState::Pressed),
    (300, Key::Space, ButtonState::Released),
    (330, Key::W, ButtonState::Released),
    (360, Key::ControlLeft, ButtonState::Pressed),
    (360, Key::S, ButtonState::Pressed),
    (420, Key::S, ButtonState::Released),
    (420, Key::ControlLeft, ButtonState::Released),
    (480, Key::D, ButtonState::Pressed),
    (480, Key::S, ButtonState::Pressed),
    (540, Key::D, ButtonState::Released),
    (540, Key::S, ButtonState::Released),
];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. Settings: defaults, or a JSON override file from the command line
    let settings = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading settings from {path}");
            ViewerSettings::from_json_file(&path)?
        }
        None => ViewerSettings::default(),
    };

    // 2. Load assets and build the viewer
    let mut loader = CityBlockLoader {
        blocks: 6,
        spacing: 160.0,
    };
    let mut viewer = Viewer::start(settings, &mut loader)?;
    log::info!(
        "Camera starts at {:?}, looking at {:?}",
        viewer.camera().position(),
        viewer.camera().target()
    );

    // 3. Replay the scripted session
    let mut input = Input::new();
    input.inject_resize(1280, 720);
    let mut events = SCRIPT.iter().peekable();
    let mut timer = Timer::new();

    for tick in 0..SESSION_TICKS {
        while let Some(&&(at, key, state)) = events.peek() {
            if at > tick {
                break;
            }
            input.inject_key(key, state);
            events.next();
        }

        let snapshot = viewer.tick(&mut input, DT);
        timer.tick();

        if tick % LOG_EVERY == 0 {
            let blend: Vec<String> = snapshot
                .actions
                .iter()
                .map(|a| format!("{} {:.2}@{:.2}s", a.name(), a.weight, a.time))
                .collect();
            log::info!(
                "t={:5.2}s {:?} pos=({:7.1}, {:5.1}, {:7.1}) yaw={:5.2} cam={} [{}]",
                tick as f32 * DT,
                snapshot.movement,
                snapshot.character.position.x,
                snapshot.character.position.y,
                snapshot.character.position.z,
                snapshot.character.yaw,
                if snapshot.camera_free_fly { "fly" } else { "orbit" },
                blend.join(", ")
            );
        }
    }

    log::info!(
        "Simulated {} ticks ({:.1}s) in {:.2?} wall time",
        viewer.ticks(),
        viewer.ticks() as f32 * DT,
        timer.elapsed
    );
    Ok(())
}
