//! Title menu

use super::{AppContext, GameState, PlayState, StateKind, Transition};
use crate::audio::AudioCues;
use crate::platform::{InputEvent, InputKind};
use crate::ui::{MenuView, View};

pub const MENU_OPTIONS: [&str; 2] = ["Start Game", "High Scores"];

const START_GAME: usize = 0;
const HIGH_SCORES: usize = 1;

#[derive(Debug, Clone, Default)]
pub struct MenuState {
    selected: usize,
    show_high_scores: bool,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn showing_high_scores(&self) -> bool {
        self.show_high_scores
    }
}

impl GameState for MenuState {
    fn kind(&self) -> StateKind {
        StateKind::Menu
    }

    fn enter(&mut self, ctx: &mut AppContext) {
        self.selected = START_GAME;
        self.show_high_scores = false;
        ctx.audio.play_menu_music();
    }

    fn exit(&mut self, ctx: &mut AppContext) {
        ctx.audio.stop_menu_music();
        ctx.view = None;
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &mut AppContext) -> Option<Transition> {
        if !event.pressed {
            return None;
        }
        let count = MENU_OPTIONS.len();
        match event.kind {
            InputKind::Up => self.selected = (self.selected + count - 1) % count,
            InputKind::Down => self.selected = (self.selected + 1) % count,
            InputKind::Button2 => match self.selected {
                START_GAME => return Some(Transition::to(PlayState::new(ctx))),
                HIGH_SCORES => {
                    self.show_high_scores = !self.show_high_scores;
                    log::debug!("High score panel open: {}", self.show_high_scores);
                }
                _ => {}
            },
            _ => {}
        }
        None
    }

    fn update(&mut self, _dt: f32, _ctx: &mut AppContext) -> Option<Transition> {
        None
    }

    fn render(&self, ctx: &mut AppContext) {
        let high_score = self.show_high_scores.then(|| ctx.scores.high_score());
        ctx.view = Some(View::Menu(MenuView::new(
            &MENU_OPTIONS,
            self.selected,
            high_score,
        )));
    }
}
