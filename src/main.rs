//! Headless guided tour.
//!
//! Drives the viewer engine frame by frame without a window: visits every
//! annotation in order, waits for each camera flight to land, and logs the
//! camera pose and visible labels. Halfway through it switches on the
//! glaucoma and cataract overlays. Run with `RUST_LOG=debug` to see every
//! state transition.
//!
//! ```text
//! eyeview [registry.toml] [options.toml]
//! ```

use std::path::Path;

use eyeview::camera::core::Viewport;
use eyeview::camera::flight::FlightStatus;
use eyeview::scene::SceneGraph;
use eyeview::{
    AnnotationRegistry, EyeViewError, Options, ViewerCommand, ViewerEngine,
};
use web_time::{Duration, Instant};

/// Simulated clock step; frames are drawn whenever the engine's cap allows.
const STEP: Duration = Duration::from_millis(4);

/// Node names of the bundled eye model.
const EYE_NODES: [&str; 6] = [
    "Cornea_Cornea_0",
    "Lens_Lens_0",
    "Iris_Iris_0",
    "Sclera_Sclera_0",
    "Retina_Retina_0",
    "OpticNerve_OpticNerve_0",
];

fn load_registry(arg: Option<&str>) -> Result<AnnotationRegistry, EyeViewError> {
    match arg {
        Some(path) => AnnotationRegistry::load(Path::new(path)),
        None => AnnotationRegistry::eye(),
    }
}

fn load_options(arg: Option<&str>) -> Result<Options, EyeViewError> {
    arg.map_or_else(
        || Ok(Options::default()),
        |path| Options::load(Path::new(path)),
    )
}

/// Step frames until the active flight lands.
fn fly(engine: &mut ViewerEngine, now: &mut Instant) {
    loop {
        *now += STEP;
        if !engine.frame_due(*now) {
            continue;
        }
        let frame = engine.update(*now);
        if !matches!(frame.flight, FlightStatus::Flying { .. }) {
            let visible: Vec<_> = frame
                .labels
                .iter()
                .filter(|l| l.visible)
                .map(|l| format!("{}:{}", l.number, l.id))
                .collect();
            log::info!(
                "  camera at {:.2} looking at {:.2}; labels {}; {} markers",
                frame.camera.eye,
                frame.camera.target,
                visible.join(" "),
                frame.markers.len()
            );
            return;
        }
    }
}

fn run(args: &[String]) -> Result<(), EyeViewError> {
    let registry = load_registry(args.get(1).map(String::as_str))?;
    let options = load_options(args.get(2).map(String::as_str))?;

    let mut now = Instant::now();
    let mut engine =
        ViewerEngine::new(registry, options, Viewport::new(1280.0, 720.0), now);
    engine.set_model(Ok(SceneGraph::from_node_names(EYE_NODES)));

    let total = engine.registry().len();
    for step in 0..total {
        if step == total / 2 {
            for id in ["glaucoma", "cataract"] {
                engine.execute(
                    ViewerCommand::SetCondition {
                        id: id.to_owned(),
                        active: true,
                    },
                    now,
                );
            }
            log::info!(
                "Lens material now {:?}",
                engine.conditions().lens_material()
            );
        }

        engine.execute(ViewerCommand::NextAnnotation, now);
        let nav = engine.navigation();
        log::info!(
            "[{}/{}] {}",
            nav.position.unwrap_or(0),
            nav.total,
            nav.title.as_deref().unwrap_or("-")
        );
        fly(&mut engine, &mut now);
    }

    engine.execute(ViewerCommand::ClearSelection, now);
    log::info!("Tour finished at {:.0} fps", engine.fps());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
