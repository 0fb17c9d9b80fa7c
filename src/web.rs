//! Browser bindings
//!
//! One handle per game for the hosting page. The page forwards DOM key and
//! pointer events, calls `frame` from `requestAnimationFrame` and renders
//! from `state_json`. Stopping a handle cancels its loop; nothing persists
//! across reloads except [`Settings`].

use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, MusicCue, WebAudio};
use crate::breakout::{BreakoutState, tick::BreakoutInput};
use crate::driver::FrameLoop;
use crate::input::{HeldKeys, Key};
use crate::kanban::{Board, DragSession};
use crate::racer::RacerState;
use crate::settings::Settings;
use crate::snake::{Direction, SnakeState};
use crate::wordle::{KEYBOARD_ROWS, WordleState};

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Already installed when called a second time
    let _ = console_log::init_with_level(log::Level::Info);
}

fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

fn game_seed(settings: &Settings) -> u64 {
    settings.seed_or(clock_seed())
}

fn to_js<T>(value: serde_json::Result<T>) -> Result<T, JsError> {
    value.map_err(|err| JsError::new(&err.to_string()))
}

/// Frame delta from the page, in milliseconds
fn secs(dt_ms: f64) -> f32 {
    (dt_ms / 1000.0) as f32
}

#[wasm_bindgen]
pub struct SnakeGame {
    game: FrameLoop<SnakeState>,
    settings: Settings,
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl SnakeGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let settings = Settings::load();
        Self {
            game: FrameLoop::new(SnakeState::new(game_seed(&settings))),
            settings,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(dir) = Direction::from_key(Key::from_dom(key)) {
            self.game.input.direction = Some(dir);
        }
    }

    pub fn frame(&mut self, dt_ms: f64) {
        self.game.frame(secs(dt_ms));
    }

    pub fn restart(&mut self) {
        self.game.input.restart = true;
        self.game.resume();
    }

    pub fn stop(&mut self) {
        self.game.stop();
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        let s = &self.game.sim;
        to_js(serde_json::to_string(&json!({
            "phase": s.phase,
            "body": s.body.iter().map(|c| [c.x, c.y]).collect::<Vec<_>>(),
            "food": [s.food.x, s.food.y],
            "score": s.score,
            "pulse": s.show_score_pulse() && self.settings.show_pulses(),
        })))
    }
}

#[wasm_bindgen]
pub struct BreakoutGame {
    game: FrameLoop<BreakoutState>,
    settings: Settings,
}

impl Default for BreakoutGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl BreakoutGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            game: FrameLoop::new(BreakoutState::new()),
            settings: Settings::load(),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        let input: &mut BreakoutInput = &mut self.game.input;
        match Key::from_dom(key) {
            Key::ArrowLeft => input.key_steps -= 1,
            Key::ArrowRight => input.key_steps += 1,
            Key::Space => input.launch = true,
            _ => {}
        }
    }

    /// Pointer x relative to the arena's left edge
    pub fn pointer_move(&mut self, x: f32) {
        self.game.input.pointer_x = Some(x);
    }

    pub fn frame(&mut self, dt_ms: f64) {
        self.game.frame(secs(dt_ms));
    }

    pub fn restart(&mut self) {
        self.game.input.restart = true;
        self.game.resume();
    }

    pub fn stop(&mut self) {
        self.game.stop();
    }

    /// Events since the last call, oldest first
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        to_js(serde_json::to_string(&self.game.sim.drain_events()))
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        let s = &self.game.sim;
        to_js(serde_json::to_string(&json!({
            "phase": s.phase,
            "bricks": s.bricks,
            "ball": s.ball,
            "paddle_x": s.paddle.x,
            "score": s.score,
            "pulse": s.show_score_pulse() && self.settings.show_pulses(),
        })))
    }
}

#[wasm_bindgen]
pub struct WordleGame {
    state: WordleState,
}

impl Default for WordleGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WordleGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: WordleState::new(game_seed(&Settings::load())),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.state.handle_key(Key::from_dom(key));
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        let s = &self.state;
        let answer = s.is_finished().then(|| s.answer().to_string());
        to_js(serde_json::to_string(&json!({
            "phase": s.phase,
            "guesses": s.guesses,
            "feedback": s.feedback_rows(),
            "current": s.current,
            "keyboard": s.keyboard(),
            "keyboard_rows": KEYBOARD_ROWS,
            "answer": answer,
        })))
    }
}

#[wasm_bindgen]
pub struct KanbanGame {
    board: Board,
    drag: Option<DragSession>,
}

impl Default for KanbanGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl KanbanGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            board: Board::default(),
            drag: None,
        }
    }

    pub fn add_card(&mut self, column_id: &str, text: &str) -> Result<String, JsError> {
        Ok(self.board.add_card(column_id, text)?)
    }

    pub fn add_column(&mut self, title: &str) -> String {
        self.board.add_column(title)
    }

    pub fn remove_column(&mut self, column_id: &str) -> Result<(), JsError> {
        self.board.remove_column(column_id)?;
        Ok(())
    }

    pub fn update_column_title(&mut self, column_id: &str, title: &str) -> Result<(), JsError> {
        Ok(self.board.update_column_title(column_id, title)?)
    }

    pub fn update_card(&mut self, column_id: &str, card_id: &str, text: &str) -> Result<(), JsError> {
        Ok(self.board.update_card(column_id, card_id, text)?)
    }

    pub fn drag_start(&mut self, card_id: &str, from: &str) -> Result<(), JsError> {
        self.drag = Some(self.board.begin_drag(card_id, from)?);
        Ok(())
    }

    pub fn drop_on(&mut self, column_id: &str) -> Result<(), JsError> {
        match self.drag.take() {
            Some(drag) => Ok(drag.drop_on(&mut self.board, column_id)?),
            None => Ok(()),
        }
    }

    pub fn drag_end(&mut self) {
        if let Some(drag) = self.drag.take() {
            drag.cancel();
        }
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(self.board.to_json()?)
    }
}

#[wasm_bindgen]
pub struct RacerGame {
    game: FrameLoop<RacerState>,
    keys: HeldKeys,
    audio: AudioManager<WebAudio>,
    settings: Settings,
}

impl Default for RacerGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl RacerGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let settings = Settings::load();
        let mut state = RacerState::new(game_seed(&settings));
        state.set_volume(settings.music_volume);
        Self {
            game: FrameLoop::new(state),
            keys: HeldKeys::new(),
            audio: AudioManager::new(WebAudio::new(), &settings),
            settings,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.press(Key::from_dom(key));
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.release(Key::from_dom(key));
    }

    pub fn start(&mut self) {
        self.game.input.start = true;
    }

    pub fn restart(&mut self) {
        self.game.input.restart = true;
        self.game.resume();
    }

    /// Volume slider, 0..=1; remembered for the next visit
    pub fn set_volume(&mut self, volume: f32) {
        self.game.input.volume = Some(volume);
        self.settings.set_music_volume(volume);
        self.settings.save();
    }

    /// Page focus changed
    pub fn set_focused(&mut self, focused: bool) {
        if self.settings.mute_on_blur {
            self.audio.set_muted(!focused);
        }
        if !focused {
            self.keys.clear();
        }
    }

    pub fn frame(&mut self, dt_ms: f64) {
        self.game.input.apply_held(&self.keys);
        self.game.frame(secs(dt_ms));

        let events = self.game.sim.drain_events();
        self.audio.play_racer_events(&events);
        self.audio.sync_music(self.game.sim.music_cue());
    }

    /// Leaving the page: halt the loop and the music
    pub fn stop(&mut self) {
        self.game.stop();
        self.audio.sync_music(MusicCue {
            playing: false,
            volume: self.game.sim.volume,
        });
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        let s = &self.game.sim;
        to_js(serde_json::to_string(&json!({
            "phase": s.phase,
            "player": s.player,
            "obstacles": s.obstacles,
            "progress": s.progress,
            "gates_needed": s.progress.gates_needed(),
            "boosting": s.boosting,
            "track_offset": s.track_offset,
            "volume": s.volume,
            "explosion": s.explosion,
            "gate_popup": s.gate_popup(),
            "level_up": s.show_level_up(),
            "hint": s.active_hint(),
        })))
    }
}
