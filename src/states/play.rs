//! The running game
//!
//! Owns every simulation component for one run. `update` threads the frame
//! delta through them in a fixed order: player, bullets, enemies, effects.

use super::{AppContext, GameState, MenuState, StateKind, Transition};
use crate::audio::AudioCues;
use crate::platform::{InputEvent, InputKind};
use crate::sim::{
    BulletContext, BulletSystem, CloudBelt, EnemySpawner, ExplosionPool, Intents, Player,
    SpawnContext,
};
use crate::ui::{PlayHud, View};

/// Decorrelates the cloud RNG from the spawner's
const CLOUD_SEED_SALT: u64 = 0xC10D;

pub struct PlayState {
    player: Player,
    intents: Intents,
    bullets: BulletSystem,
    spawner: EnemySpawner,
    explosions: ExplosionPool,
    clouds: CloudBelt,
    game_over: bool,
    /// Life count as last shown on the HUD
    lives_shown: u8,
}

impl PlayState {
    pub fn new(ctx: &mut AppContext) -> Self {
        let seed = ctx.next_seed();
        let player = Player::new(&ctx.tuning);
        let lives_shown = player.lives();
        Self {
            player,
            intents: Intents::default(),
            bullets: BulletSystem::new(&ctx.tuning),
            spawner: EnemySpawner::new(seed, &ctx.tuning),
            explosions: ExplosionPool::new(),
            clouds: CloudBelt::new(seed ^ CLOUD_SEED_SALT),
            game_over: false,
            lives_shown,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bullets(&self) -> &BulletSystem {
        &self.bullets
    }

    pub fn spawner(&self) -> &EnemySpawner {
        &self.spawner
    }

    pub fn explosions(&self) -> &ExplosionPool {
        &self.explosions
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

impl GameState for PlayState {
    fn kind(&self) -> StateKind {
        StateKind::Play
    }

    fn enter(&mut self, ctx: &mut AppContext) {
        let scene = &mut ctx.scene;
        self.player.attach(scene);
        self.player.reset(scene);
        self.spawner.clear(&mut self.bullets, scene);
        self.spawner.restart();
        self.bullets.clear(scene);
        self.explosions.clear(scene);
        self.clouds.spawn(scene);
        self.intents = Intents::default();
        self.game_over = false;
        self.lives_shown = self.player.lives();
        ctx.scores.reset();
        ctx.audio.play_music();
        log::info!("New run started (high score {})", ctx.scores.high_score());
    }

    fn exit(&mut self, ctx: &mut AppContext) {
        let scene = &mut ctx.scene;
        self.player.detach(scene);
        self.spawner.clear(&mut self.bullets, scene);
        self.bullets.clear(scene);
        self.explosions.clear(scene);
        self.clouds.clear(scene);
        ctx.audio.stop_music();
        ctx.scores.persist(ctx.store.as_mut());
        ctx.view = None;
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &mut AppContext) -> Option<Transition> {
        if self.game_over && event.pressed && event.kind == InputKind::Button2 {
            log::info!("Returning to menu with score {}", ctx.scores.score());
            return Some(Transition::to(MenuState::new()));
        }
        self.intents.apply(event);
        None
    }

    fn update(&mut self, dt: f32, ctx: &mut AppContext) -> Option<Transition> {
        let AppContext {
            scene,
            audio,
            scores,
            store,
            ..
        } = ctx;

        if !self.player.is_dead() {
            self.player.steer(&self.intents, dt, scene);
            if self.intents.fire {
                if let Some(shot) = self.player.try_shoot() {
                    self.bullets.fire(shot, false, scene, audio);
                }
            }
        }
        self.player.tick(dt);

        let mut bullet_ctx = BulletContext {
            player: Some(&mut self.player),
            spawner: &mut self.spawner,
            scores: &mut *scores,
            explosions: &mut self.explosions,
            scene: &mut *scene,
            audio: &mut *audio,
        };
        let report = self.bullets.advance(dt, &mut bullet_ctx);
        if report.player_hits > 0 {
            log::debug!("Player took {} hit(s)", report.player_hits);
        }

        let mut spawn_ctx = SpawnContext {
            bullets: &mut self.bullets,
            scene: &mut *scene,
            audio: &mut *audio,
        };
        self.spawner.advance(dt, &mut spawn_ctx);

        self.explosions.advance(dt, scene);
        self.clouds.advance(dt, scene);

        self.lives_shown = self.player.lives();

        if self.player.is_dead() && !self.game_over {
            self.game_over = true;
            self.player.set_game_over(scene);
            self.explosions.spawn(self.player.position(), scene, audio);
            log::info!("Game over, final score {}", scores.score());
        }

        scores.persist(&mut **store);
        None
    }

    fn render(&self, ctx: &mut AppContext) {
        let fps = ctx.settings.show_fps.then_some(ctx.fps);
        ctx.view = Some(View::Play(PlayHud {
            score: ctx.scores.score(),
            high_score: ctx.scores.high_score(),
            lives: self.lives_shown,
            game_over: self.game_over,
            fps,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::audio::{SoundCue, Track};
    use crate::consts::{ENEMY_KILL_SCORE, PLAYER_START_LIVES};
    use crate::platform::MemoryStore;
    use crate::scene::ModelKind;
    use crate::score::ScoreTracker;
    use crate::sim::EnemyKind;
    use crate::states::StateMachine;
    use glam::Vec3;

    fn ctx() -> AppContext {
        AppContext::new(Box::new(MemoryStore::new()), Tuning::default(), 1)
    }

    fn started(ctx: &mut AppContext) -> PlayState {
        let mut play = PlayState::new(ctx);
        play.enter(ctx);
        play
    }

    /// Enemy bullet fired straight at the player
    fn shoot_player(play: &mut PlayState, ctx: &mut AppContext) {
        let target = play.player.position();
        play.bullets
            .spawn(target, Vec3::NEG_X, true, &mut ctx.scene, &mut ctx.audio);
    }

    #[test]
    fn test_enter_sets_up_run() {
        let mut ctx = ctx();
        ctx.scores.add_score(30);
        let play = started(&mut ctx);
        assert_eq!(ctx.scores.score(), 0);
        assert_eq!(ctx.scores.high_score(), 30);
        assert_eq!(ctx.scene.count(ModelKind::PlayerShip), 1);
        assert!(ctx.scene.count(ModelKind::Cloud) > 0);
        assert_eq!(ctx.audio.jukebox().playing(), Some(Track::Play));
        assert_eq!(play.player().lives(), PLAYER_START_LIVES);
        assert!(!play.is_game_over());
    }

    #[test]
    fn test_fire_intent_shoots_with_cooldown() {
        let mut ctx = ctx();
        let mut play = started(&mut ctx);
        play.handle_input(InputEvent::press(InputKind::Button1), &mut ctx);
        play.update(0.016, &mut ctx);
        assert_eq!(ctx.scene.count(ModelKind::Bullet { enemy: false }), 1);
        assert_eq!(ctx.audio.drain_cues(), vec![SoundCue::Bullet]);

        // Held fire keeps shooting at the cooldown rate: 250 ms per shot
        for _ in 0..25 {
            play.update(0.01, &mut ctx);
        }
        assert_eq!(ctx.scene.count(ModelKind::Bullet { enemy: false }), 2);
    }

    #[test]
    fn test_movement_intents_move_ship() {
        let mut ctx = ctx();
        let mut play = started(&mut ctx);
        play.handle_input(InputEvent::press(InputKind::Up), &mut ctx);
        play.update(0.5, &mut ctx);
        assert!((play.player().position().y - 3.0).abs() < 1e-5);

        play.handle_input(InputEvent::release(InputKind::Up), &mut ctx);
        play.update(0.5, &mut ctx);
        assert!((play.player().position().y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_kill_scores_and_saves_high_score() {
        let mut ctx = ctx();
        let mut play = started(&mut ctx);
        play.spawner.spawn_at(
            EnemyKind::Heavy,
            Vec3::new(2.0, 3.0, 0.0),
            &mut play.bullets,
            &mut ctx.scene,
        );
        play.bullets
            .spawn(Vec3::new(2.0, 3.0, 0.0), Vec3::X, false, &mut ctx.scene, &mut ctx.audio);
        play.update(0.0, &mut ctx);

        assert_eq!(ctx.scores.score(), ENEMY_KILL_SCORE);
        assert!(play.spawner().enemies().is_empty());
        assert!(play.bullets().tracked_enemies().is_empty());
        assert_eq!(play.explosions().len(), 1);
        assert_eq!(ctx.store.get(ScoreTracker::STORAGE_KEY).as_deref(), Some("10"));
    }

    #[test]
    fn test_death_is_handled_once() {
        let mut ctx = ctx();
        let mut play = started(&mut ctx);
        play.player.set_lives(1);
        let last_position = play.player.position();
        shoot_player(&mut play, &mut ctx);
        play.update(0.0, &mut ctx);

        assert!(play.is_game_over());
        assert_eq!(play.player().lives(), 0);
        let ship = play.player().handle().unwrap();
        assert!(!ctx.scene.get(ship).unwrap().visible);
        assert_eq!(play.explosions().len(), 1);
        assert_eq!(play.explosions().iter().next().unwrap().position, last_position);

        play.update(0.1, &mut ctx);
        assert_eq!(play.explosions().len(), 1);

        play.render(&mut ctx);
        match &ctx.view {
            Some(View::Play(hud)) => {
                assert!(hud.game_over);
                assert_eq!(hud.lives, 0);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_dead_player_ignores_intents() {
        let mut ctx = ctx();
        let mut play = started(&mut ctx);
        play.player.set_lives(1);
        shoot_player(&mut play, &mut ctx);
        play.update(0.0, &mut ctx);
        ctx.audio.drain_cues();

        play.handle_input(InputEvent::press(InputKind::Right), &mut ctx);
        play.handle_input(InputEvent::press(InputKind::Button1), &mut ctx);
        let before = play.player().position();
        play.update(0.5, &mut ctx);
        assert_eq!(play.player().position(), before);
        assert_eq!(ctx.scene.count(ModelKind::Bullet { enemy: false }), 0);
    }

    #[test]
    fn test_return_to_menu_only_after_game_over() {
        let mut ctx = ctx();
        let mut play = started(&mut ctx);
        assert!(play
            .handle_input(InputEvent::press(InputKind::Button2), &mut ctx)
            .is_none());

        play.player.set_lives(1);
        shoot_player(&mut play, &mut ctx);
        play.update(0.0, &mut ctx);
        assert!(play
            .handle_input(InputEvent::release(InputKind::Button2), &mut ctx)
            .is_none());
        let transition = play
            .handle_input(InputEvent::press(InputKind::Button2), &mut ctx)
            .expect("back to menu");
        assert_eq!(transition.kind(), StateKind::Menu);
    }

    #[test]
    fn test_exit_clears_scene_and_music() {
        let mut ctx = ctx();
        let mut play = started(&mut ctx);
        play.handle_input(InputEvent::press(InputKind::Button1), &mut ctx);
        for _ in 0..300 {
            play.update(0.016, &mut ctx);
        }
        assert!(!ctx.scene.is_empty());
        play.exit(&mut ctx);
        assert!(ctx.scene.is_empty());
        assert!(play.bullets().is_empty());
        assert!(play.spawner().enemies().is_empty());
        assert!(play.bullets().tracked_enemies().is_empty());
        assert_eq!(ctx.audio.jukebox().playing(), None);
    }

    #[test]
    fn test_hud_reports_fps_when_enabled() {
        let mut ctx = ctx();
        ctx.fps = 58;
        let play = started(&mut ctx);
        play.render(&mut ctx);
        assert!(matches!(&ctx.view, Some(View::Play(hud)) if hud.fps == Some(58)));

        ctx.settings.show_fps = false;
        play.render(&mut ctx);
        assert!(matches!(&ctx.view, Some(View::Play(hud)) if hud.fps.is_none()));
    }

    #[test]
    fn test_full_loop_menu_play_menu() {
        let mut sm = StateMachine::new(ctx());
        sm.start();
        sm.context_mut().input.push(InputEvent::press(InputKind::Button2));
        sm.frame(0.016);
        assert_eq!(sm.current_kind(), Some(StateKind::Play));
        assert_eq!(sm.context().audio.jukebox().playing(), Some(Track::Play));

        // Sit still until the enemies finish us off
        let mut frames = 0;
        loop {
            sm.frame(0.05);
            frames += 1;
            if matches!(&sm.context().view, Some(View::Play(hud)) if hud.game_over) {
                break;
            }
            assert!(frames < 20_000, "player never died");
        }

        sm.context_mut().input.push(InputEvent::press(InputKind::Button2));
        sm.frame(0.016);
        assert_eq!(sm.current_kind(), Some(StateKind::Menu));
        assert_eq!(sm.context().audio.jukebox().playing(), Some(Track::Menu));
        assert!(sm.context().scene.is_empty());
    }
}
