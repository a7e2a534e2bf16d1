//! Headless demo: loads a procedural model from an in-memory catalog,
//! focuses the object under the view center, returns, orbits, and logs
//! the camera path with simulated frame timing.
//!
//! ```text
//! RUST_LOG=debug vitrine [model-id] [options.toml]
//! ```

use std::path::Path;

use glam::Vec3;
use vitrine::catalog::{ModelCatalog, ModelMetadata};
use vitrine::input::{InputEvent, InputProcessor, MouseButton};
use vitrine::options::Options;
use vitrine::scene::{Mesh, SceneNode};
use vitrine::viewer::{
    AssetSource, DecodeError, MeshProvider, ViewerCommand, ViewerSession,
};
use vitrine::VitrineError;
use web_time::{Duration, Instant};

const SURFACE: (u32, u32) = (1280, 720);
const FRAME: Duration = Duration::from_millis(16);

const CATALOG: &str = r#"{
    "message": "Models retrieved",
    "data": [
        {
            "id": 1,
            "name": "Cube row",
            "description": "Three cubes in a row",
            "file_url": "/uploads/ARSIP_001/cubes-3.txt",
            "file_name": "cubes-3.txt",
            "archive_id": 1,
            "uploaded_by": 1,
            "file_size": 7
        },
        {
            "id": 2,
            "name": "Cube pair",
            "description": "",
            "file_url": "/uploads/ARSIP_001/cubes-2.txt",
            "file_name": "cubes-2.txt",
            "archive_id": 1,
            "uploaded_by": 1,
            "file_size": 7
        }
    ]
}"#;

/// Serves `cubes:N` payloads for any URL ending in `cubes-N.txt`.
struct DemoSource;

impl AssetSource for DemoSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, VitrineError> {
        let count = url
            .rsplit_once("cubes-")
            .and_then(|(_, rest)| rest.strip_suffix(".txt"))
            .ok_or_else(|| VitrineError::Fetch {
                url: url.to_owned(),
                reason: "404 Not Found".to_owned(),
            })?;
        log::debug!("GET {url}");
        Ok(format!("cubes:{count}").into_bytes())
    }

    fn base_url(&self) -> &str {
        "http://localhost:8080"
    }
}

/// Decodes `cubes:N` into a row of N 2x2x2 cubes spaced 3 units apart.
struct CubeRowDecoder;

impl MeshProvider for CubeRowDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<SceneNode, DecodeError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| DecodeError(e.to_string()))?;
        let count: u32 = text
            .strip_prefix("cubes:")
            .and_then(|n| n.trim().parse().ok())
            .ok_or_else(|| DecodeError(format!("unrecognized payload {text:?}")))?;

        let offset = count.saturating_sub(1) as f32 * 1.5;
        let mut root = SceneNode::group("row");
        for i in 0..count {
            let center = Vec3::new(i as f32 * 3.0 - offset, 0.0, 0.0);
            root.add_child(SceneNode::with_mesh(
                format!("cube-{i}"),
                Mesh::cuboid(center, Vec3::ONE),
            ));
        }
        Ok(root)
    }
}

/// Simulated frame clock.
struct Clock {
    now: Instant,
}

impl Clock {
    fn advance(&mut self, session: &mut ViewerSession, duration: Duration) {
        let end = self.now + duration;
        let mut frame = 0_u32;
        while self.now < end {
            self.now += FRAME;
            let moved = session.tick(self.now);
            if moved && frame % 6 == 0 {
                let cam = session.camera();
                log::info!(
                    "  eye ({:.3}, {:.3}, {:.3}) distance {:.3}",
                    cam.eye.x,
                    cam.eye.y,
                    cam.eye.z,
                    cam.distance_to_target()
                );
            }
            frame += 1;
        }
    }
}

fn feed(
    session: &mut ViewerSession,
    input: &mut InputProcessor,
    clock: &Clock,
    events: &[InputEvent],
) {
    for event in events {
        if let Some(cmd) = input.handle_event(*event, clock.now) {
            if let Some(outcome) = session.execute(cmd, clock.now) {
                log::info!("pick: {outcome:?}");
            }
        }
    }
}

fn click() -> [InputEvent; 2] {
    [
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        },
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        },
    ]
}

fn run(requested: Option<u64>, options: Options) -> Result<(), VitrineError> {
    let catalog = ModelCatalog::from_json(CATALOG)?;
    let metadata: ModelMetadata = catalog
        .select(requested)
        .cloned()
        .ok_or_else(|| VitrineError::Catalog("no model to show".to_owned()))?;
    log::info!("{}: {}", metadata.name, metadata.description_or_default());
    log::info!("{}", metadata.info_line());

    let (width, height) = SURFACE;
    let mut session =
        ViewerSession::new(options, width, height, Box::new(CubeRowDecoder));
    let mut input = InputProcessor::new(&session.options().input);
    let mut clock = Clock {
        now: Instant::now(),
    };

    let _ = pollster::block_on(session.load_from_source(&DemoSource, metadata))?;

    let center = (width as f32 / 2.0, height as f32 / 2.0);
    log::info!("double-click at view center");
    feed(
        &mut session,
        &mut input,
        &clock,
        &[InputEvent::CursorMoved {
            x: center.0,
            y: center.1,
        }],
    );
    feed(&mut session, &mut input, &clock, &click());
    clock.now += Duration::from_millis(120);
    feed(&mut session, &mut input, &clock, &click());
    clock.advance(&mut session, Duration::from_millis(700));

    log::info!("double-click on empty space");
    feed(
        &mut session,
        &mut input,
        &clock,
        &[InputEvent::DoubleClick { x: 0.0, y: 0.0 }],
    );
    clock.advance(&mut session, Duration::from_millis(600));

    log::info!("drag to orbit");
    let mut drag = vec![click()[0]];
    drag.extend((1..=10).map(|i| InputEvent::CursorMoved {
        x: center.0 + i as f32 * 12.0,
        y: center.1,
    }));
    drag.push(click()[1]);
    feed(&mut session, &mut input, &clock, &drag);
    clock.advance(&mut session, Duration::from_millis(1500));

    let _ = session.execute(
        ViewerCommand::Resize {
            width: width / 2,
            height,
        },
        clock.now,
    );
    let cam = session.camera();
    log::info!(
        "final eye ({:.3}, {:.3}, {:.3}), near {:.5}, far {:.1}, aspect {:.3}",
        cam.eye.x,
        cam.eye.y,
        cam.eye.z,
        cam.znear,
        cam.zfar,
        cam.aspect
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let requested = match args.next().map(|arg| arg.parse::<u64>()) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => {
            log::error!("Usage: vitrine [model-id] [options.toml] ({e})");
            std::process::exit(1);
        }
    };
    let options = args
        .next()
        .map_or_else(|| Ok(Options::default()), |path| Options::load(Path::new(&path)));
    let options = match options {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(requested, options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
