//! Plane Panic headless runner
//!
//! The browser build is driven from JavaScript through `plane_panic::web`.
//! Natively there is no window: this binary plays a few runs with a simple
//! autopilot on a fixed 60 Hz clock and logs the results.
//!
//! Usage: `plane-panic [seed] [runs]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use plane_panic::Tuning;
    use plane_panic::platform::keyboard::Keyboard;
    use plane_panic::platform::{InputEvent, MemoryStore};
    use plane_panic::scene::{ModelKind, SceneGraph};
    use plane_panic::states::{AppContext, StateKind, StateMachine};
    use plane_panic::ui::View;

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a run after ten simulated minutes
    const MAX_FRAMES_PER_RUN: u32 = 60 * 60 * 10;
    /// Vertical slack before the autopilot corrects
    const AIM_TOLERANCE: f32 = 0.3;

    /// Keyboard-driven autopilot: lines up with the nearest enemy ahead
    /// and holds the trigger
    struct Autopilot {
        keyboard: Keyboard,
    }

    impl Autopilot {
        fn new() -> Self {
            Self {
                keyboard: Keyboard::new(),
            }
        }

        fn steer(&mut self, scene: &SceneGraph) -> Vec<InputEvent> {
            let mut events = Vec::new();
            let Some(ship) = scene
                .nodes()
                .iter()
                .find(|n| n.model == ModelKind::PlayerShip && n.visible)
            else {
                events.extend(self.keyboard.blur());
                return events;
            };

            let target = scene
                .nodes()
                .iter()
                .filter(|n| matches!(n.model, ModelKind::EnemyShip(_)))
                .filter(|n| n.position.x > ship.position.x)
                .min_by(|a, b| a.position.x.total_cmp(&b.position.x));

            let dy = target.map_or(0.0, |t| t.position.y - ship.position.y);
            let (press, release) = if dy > AIM_TOLERANCE {
                (Some("w"), "s")
            } else if dy < -AIM_TOLERANCE {
                (Some("s"), "w")
            } else {
                (None, "w")
            };

            events.extend(self.keyboard.key_up(release));
            match press {
                Some(key) => events.extend(self.keyboard.key_down(key)),
                None => events.extend(self.keyboard.key_up("s")),
            }
            events.extend(self.keyboard.key_down(" "));
            events
        }

        fn tap(&mut self, key: &str) -> Vec<InputEvent> {
            self.keyboard
                .key_down(key)
                .into_iter()
                .chain(self.keyboard.key_up(key))
                .collect()
        }
    }

    fn parse_arg<T: std::str::FromStr>(arg: Option<String>, default: T) -> T {
        match arg {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring unparsable argument {:?}", raw);
                default
            }),
            None => default,
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed: u64 = parse_arg(args.next(), 1);
        let runs: u32 = parse_arg(args.next(), 3);

        let ctx = AppContext::new(Box::new(MemoryStore::new()), Tuning::default(), seed);
        let mut machine = StateMachine::new(ctx);
        let mut pilot = Autopilot::new();
        machine.start();

        for run in 1..=runs {
            // Menu opens on "Start Game"
            let events = pilot.tap("Enter");
            machine.context_mut().input.extend(events);
            machine.frame(FRAME_DT);
            if machine.current_kind() != Some(StateKind::Play) {
                log::warn!("Run {} did not start", run);
                break;
            }

            let mut frames = 0;
            while frames < MAX_FRAMES_PER_RUN {
                let events = pilot.steer(&machine.context().scene);
                machine.context_mut().input.extend(events);
                machine.frame(FRAME_DT);
                frames += 1;
                if matches!(&machine.context().view, Some(View::Play(hud)) if hud.game_over) {
                    break;
                }
            }

            let ctx = machine.context();
            log::info!(
                "Run {}: score {} after {:.1} s (high score {})",
                run,
                ctx.scores.score(),
                frames as f32 * FRAME_DT,
                ctx.scores.high_score()
            );

            let events = pilot.tap("Enter");
            machine.context_mut().input.extend(events);
            machine.frame(FRAME_DT);
        }

        log::info!(
            "Finished with high score {}",
            machine.context().scores.high_score()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Plane Panic (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven through `plane_panic::web::WebGame`
}
