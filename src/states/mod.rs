//! Game state machine
//!
//! Exactly one state is active at a time. Switching always runs the old
//! state's `exit` before the new state's `enter`, and input is detached in
//! between so nothing queued for one state reaches the next.

pub mod menu;
pub mod play;

pub use menu::MenuState;
pub use play::PlayState;

use crate::audio::AudioSystem;
use crate::platform::{InputEvent, InputHandler, KeyValueStore};
use crate::scene::SceneGraph;
use crate::ui::View;
use crate::{ScoreTracker, Settings, Tuning};

/// Which state is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Menu,
    Play,
}

impl StateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::Menu => "menu",
            StateKind::Play => "play",
        }
    }
}

/// Request to switch to another state, applied after the current call returns
pub struct Transition(pub Box<dyn GameState>);

impl Transition {
    pub fn to(state: impl GameState + 'static) -> Self {
        Self(Box::new(state))
    }

    pub fn kind(&self) -> StateKind {
        self.0.kind()
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Transition").field(&self.kind()).finish()
    }
}

pub trait GameState {
    fn kind(&self) -> StateKind;
    fn enter(&mut self, ctx: &mut AppContext);
    fn exit(&mut self, ctx: &mut AppContext);
    fn handle_input(&mut self, event: InputEvent, ctx: &mut AppContext) -> Option<Transition>;
    fn update(&mut self, dt: f32, ctx: &mut AppContext) -> Option<Transition>;
    /// Publish this frame's view model into `ctx.view`
    fn render(&self, ctx: &mut AppContext);
}

/// Collaborators shared by every state
pub struct AppContext {
    pub scene: SceneGraph,
    pub input: InputHandler,
    pub audio: AudioSystem,
    pub scores: ScoreTracker,
    pub store: Box<dyn KeyValueStore>,
    pub settings: Settings,
    pub tuning: Tuning,
    /// Last view published by `render`
    pub view: Option<View>,
    /// Measured frame rate, filled in by the frame loop
    pub fps: u32,
    seed: u64,
    runs: u64,
}

impl AppContext {
    /// Build the context, reading the high score and settings from `store`
    pub fn new(store: Box<dyn KeyValueStore>, tuning: Tuning, seed: u64) -> Self {
        let scores = ScoreTracker::load(&*store);
        let settings = Settings::load(&*store);
        Self {
            scene: SceneGraph::new(),
            input: InputHandler::new(),
            audio: AudioSystem::new(),
            scores,
            store,
            settings,
            tuning,
            view: None,
            fps: 0,
            seed,
            runs: 0,
        }
    }

    /// A fresh seed for each run, derived from the session seed
    pub fn next_seed(&mut self) -> u64 {
        self.runs += 1;
        self.seed
            .wrapping_add(self.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    pub fn save_settings(&mut self) {
        self.settings.save(self.store.as_mut());
    }
}

pub struct StateMachine {
    current: Option<Box<dyn GameState>>,
    ctx: AppContext,
}

impl StateMachine {
    /// A machine with no state yet; call `start` to open the menu
    pub fn new(ctx: AppContext) -> Self {
        Self { current: None, ctx }
    }

    pub fn start(&mut self) {
        self.set_state(Box::new(MenuState::new()));
    }

    pub fn set_state(&mut self, next: Box<dyn GameState>) {
        if let Some(mut old) = self.current.take() {
            old.exit(&mut self.ctx);
            log::info!("Left {} state", old.kind().as_str());
        }
        self.ctx.input.detach();
        let state = self.current.insert(next);
        self.ctx.input.attach();
        state.enter(&mut self.ctx);
        log::info!("Entered {} state", state.kind().as_str());
    }

    pub fn current_kind(&self) -> Option<StateKind> {
        self.current.as_ref().map(|s| s.kind())
    }

    /// Deliver queued input, then step the current state
    pub fn update(&mut self, dt: f32) {
        let Some(state) = self.current.as_mut() else {
            return;
        };
        self.ctx.audio.advance(dt);

        let mut transition = None;
        for event in self.ctx.input.drain() {
            transition = state.handle_input(event, &mut self.ctx);
            if transition.is_some() {
                break;
            }
        }
        if transition.is_none() {
            transition = state.update(dt, &mut self.ctx);
        }

        if let Some(Transition(next)) = transition {
            self.set_state(next);
        }
    }

    pub fn render(&mut self) {
        if let Some(state) = self.current.as_ref() {
            state.render(&mut self.ctx);
        }
    }

    /// One display frame
    pub fn frame(&mut self, dt: f32) {
        self.update(dt);
        self.render();
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }
}
