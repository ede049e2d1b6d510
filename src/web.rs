//! Browser bindings
//!
//! The page owns the canvas, the renderer and the raw DOM listeners. It
//! forwards device events here and calls `frame` from requestAnimationFrame;
//! each frame it reads back the scene graph and view model as JSON.

use wasm_bindgen::prelude::*;

use crate::Tuning;
use crate::audio::web::WebAudio;
use crate::platform::gamepad::Gamepad;
use crate::platform::keyboard::Keyboard;
use crate::platform::storage::LocalStorage;
use crate::platform::touch::TouchPad;
use crate::platform::{FrameClock, InputEvent};
use crate::states::{AppContext, StateMachine};

#[wasm_bindgen]
pub struct WebGame {
    machine: StateMachine,
    clock: FrameClock,
    audio: WebAudio,
    keyboard: Keyboard,
    touch: TouchPad,
    gamepad: Gamepad,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("Logger already initialised");
        }
        log::info!("Plane Panic starting...");

        let seed = js_sys::Date::now() as u64;
        let ctx = AppContext::new(Box::new(LocalStorage), Tuning::default(), seed);
        let mut audio = WebAudio::new();
        audio.apply_settings(&ctx.settings);

        let mut machine = StateMachine::new(ctx);
        machine.start();
        Self {
            machine,
            clock: FrameClock::new(),
            audio,
            keyboard: Keyboard::new(),
            touch: TouchPad::new(),
            gamepad: Gamepad::new(),
        }
    }

    /// Run one display frame; `time_ms` is the requestAnimationFrame timestamp
    pub fn frame(&mut self, time_ms: f64) {
        let dt = self.clock.tick(time_ms);
        let fps = self.clock.fps();
        self.machine.context_mut().fps = fps;
        self.machine.frame(dt);
        self.audio.service(&mut self.machine.context_mut().audio);
    }

    /// Replace the gameplay tuning from JSON (applies from the next run)
    pub fn set_tuning(&mut self, json: &str) -> bool {
        match Tuning::from_json(json) {
            Ok(tuning) => {
                log::info!("Tuning override applied");
                self.machine.context_mut().tuning = tuning;
                true
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                false
            }
        }
    }

    pub fn key_down(&mut self, key: &str) {
        let event = self.keyboard.key_down(key);
        self.push(event);
    }

    pub fn key_up(&mut self, key: &str) {
        let event = self.keyboard.key_up(key);
        self.push(event);
    }

    /// Window lost focus: release held keys and maybe mute
    pub fn blur(&mut self) {
        let events = self.keyboard.blur();
        self.extend(events);
        if self.machine.context().settings.mute_on_blur {
            self.audio.set_muted(true);
        }
    }

    pub fn focus(&mut self) {
        self.audio.set_muted(false);
    }

    pub fn pad_touch(&mut self, dx: f32, dy: f32, pad_width: f32) {
        let events = self.touch.pad_touch(dx, dy, pad_width);
        self.extend(events);
    }

    pub fn pad_release(&mut self) {
        let events = self.touch.pad_release();
        self.extend(events);
    }

    pub fn touch_button(&mut self, index: u8, pressed: bool) {
        let event = self.touch.button(index, pressed);
        self.push(event);
    }

    pub fn gamepad_connected(&mut self) {
        self.gamepad.connect();
    }

    pub fn gamepad_disconnected(&mut self) {
        let events = self.gamepad.disconnect();
        self.extend(events);
    }

    /// Forward this frame's gamepad snapshot (buttons as 0/1)
    pub fn poll_gamepad(&mut self, axes: Vec<f32>, buttons: Vec<u8>) {
        let buttons: Vec<bool> = buttons.iter().map(|&b| b != 0).collect();
        let events = self.gamepad.poll(&axes, &buttons);
        self.extend(events);
    }

    /// Whether the on-screen controls should be drawn
    pub fn touch_controls_visible(&self, touch_device: bool) -> bool {
        self.machine
            .context()
            .settings
            .touch_controls
            .visible(touch_device)
    }

    pub fn set_show_fps(&mut self, show: bool) {
        let ctx = self.machine.context_mut();
        ctx.settings.show_fps = show;
        ctx.save_settings();
    }

    pub fn set_volumes(&mut self, master: f32, sfx: f32, music: f32) {
        let ctx = self.machine.context_mut();
        ctx.settings.master_volume = master;
        ctx.settings.sfx_volume = sfx;
        ctx.settings.music_volume = music;
        ctx.save_settings();
        self.audio.apply_settings(&self.machine.context().settings);
    }

    /// Scene graph snapshot for the renderer
    pub fn scene_json(&self) -> String {
        to_json(&self.machine.context().scene)
    }

    /// HUD/menu view model for the overlay
    pub fn view_json(&self) -> String {
        to_json(&self.machine.context().view)
    }
}

impl WebGame {
    fn push(&mut self, event: Option<InputEvent>) {
        if let Some(event) = event {
            self.machine.context_mut().input.push(event);
        }
    }

    fn extend(&mut self, events: Vec<InputEvent>) {
        self.machine.context_mut().input.extend(events);
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Snapshot serialization failed: {}", e);
            String::from("null")
        }
    }
}
