//! Headless run of the character controller over a fixed input script.
//!
//! Usage:
//!   scripted_walk [config.toml]
//!
//! Set `RUST_LOG=debug` to see every state transition, `trace` for per-tick
//! motion and camera output.

use stride::prelude::*;

const TICK: f32 = 1.0 / 60.0;

/// (seconds, held intents)
const SCRIPT: &[(f32, &[Intent])] = &[
    (0.5, &[]),
    (1.5, &[Intent::Forward]),
    (1.0, &[Intent::Forward, Intent::Sprint]),
    (0.5, &[Intent::Forward, Intent::Sprint, Intent::Left]),
    (1.0, &[]),
    (0.3, &[Intent::Crouch]),
    (1.0, &[Intent::Crouch, Intent::Forward]),
    (0.5, &[Intent::Crouch]),
    (0.5, &[]),
    (0.1, &[Intent::Gesture]),
    (1.5, &[]),
    (1.0, &[Intent::Backward]),
    (0.5, &[Intent::Backward, Intent::Sprint]),
    (1.0, &[]),
];

fn clips() -> ClipRegistry {
    ClipRegistry::from_clips([
        ClipInfo::new("idle", 2.0),
        ClipInfo::new("walk", 1.2),
        ClipInfo::new("run", 0.8),
        ClipInfo::new("walk_backward", 1.1),
        ClipInfo::new("run_backward", 0.7),
        ClipInfo::new("stand_to_crouch", 0.6),
        ClipInfo::new("crouch_walk", 1.4),
        ClipInfo::new("crouch_idle", 3.0),
        ClipInfo::new("strafe_left", 0.9),
        ClipInfo::new("gesture", 1.0),
    ])
}

fn main() -> Result<(), StrideError> {
    env_logger::init();
    log::info!("Starting scripted walk");

    let config = match std::env::args().nth(1) {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };

    let mut driver = FrameDriver::new(config, clips())?;
    driver.start()?;

    for &(seconds, intents) in SCRIPT {
        let input = intents
            .iter()
            .fold(InputSnapshot::default(), |input, &intent| input.with(intent, true));
        let ticks = (seconds / TICK).round() as usize;
        for _ in 0..ticks {
            for transition in driver.tick(TICK, &input)? {
                log::info!(
                    "frame {:>4}: {} -> {}",
                    driver.frames(),
                    transition.from_name.as_deref().unwrap_or("-"),
                    transition.to_name
                );
            }
        }
    }

    let controller = driver.controller();
    let (yaw, _, _) = controller.orientation().to_euler(glam::EulerRot::YXZ);
    println!("frames:    {}", driver.frames());
    println!("state:     {}", controller.state_name().unwrap_or("-"));
    println!("position:  {:.3?}", controller.position());
    println!("yaw:       {:.1} deg", yaw.to_degrees());
    println!("camera:    {:.3?}", driver.camera().position());
    Ok(())
}
