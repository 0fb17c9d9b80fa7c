//! Racer frame update

use super::obstacle::{Contact, ObstacleKind};
use super::player::Player;
use super::state::{RacerEvent, RacerPhase, RacerState, TRACK_SCROLL_FACTOR};
use crate::driver::Simulation;
use crate::input::{HeldKeys, Key};

/// Input sampled for one frame
#[derive(Debug, Clone, Default)]
pub struct RacerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub boost: bool,
    /// Start button
    pub start: bool,
    /// Try-again button
    pub restart: bool,
    /// Volume slider moved
    pub volume: Option<f32>,
}

impl RacerInput {
    /// Read the held movement keys; button presses are left untouched
    pub fn apply_held(&mut self, keys: &HeldKeys) {
        self.left = keys.any(&[Key::Letter('A'), Key::ArrowLeft]);
        self.right = keys.any(&[Key::Letter('D'), Key::ArrowRight]);
        self.jump = keys.is_held(Key::Space);
        self.boost = keys.any(&[Key::Letter('W'), Key::ArrowUp]);
    }
}

/// Advance the run by `dt` seconds
pub fn tick(state: &mut RacerState, input: &RacerInput, dt: f32) {
    if let Some(volume) = input.volume {
        state.set_volume(volume);
    }
    if input.restart {
        state.restart();
    } else if input.start {
        state.start();
    }

    state.clock += dt;
    state.flags.expire(state.clock);

    // The wreck stays frozen until restart
    if state.phase == RacerPhase::GameOver {
        return;
    }

    state.boosting = input.boost;
    let target_vx = Player::steer_target(input.left, input.right);
    state.player.update(target_vx, input.jump, dt);
    state.track_offset += dt * state.track_speed() * TRACK_SCROLL_FACTOR;

    if state.phase != RacerPhase::Running {
        return;
    }

    update_obstacles(state, dt);
    if state.phase == RacerPhase::Running {
        let mut spawned = Vec::new();
        state.spawner.update(dt, &mut spawned);
        state.obstacles.extend(spawned);
    }
}

/// Move every obstacle, resolve contacts and clear the ones behind the ship
fn update_obstacles(state: &mut RacerState, dt: f32) {
    let dz = state.obstacle_speed() * dt;
    let player = state.player.snapshot();

    let mut index = 0;
    while index < state.obstacles.len() {
        let obstacle = &mut state.obstacles[index];
        obstacle.advance(dz);

        match obstacle.contact(&player) {
            Contact::Collision => {
                state.explode();
                return;
            }
            Contact::GatePassed => {
                obstacle.gate_checked = true;
                state.collect_gate();
            }
            Contact::GateMissed => {
                obstacle.gate_checked = true;
                state.events.push(RacerEvent::GateMissed);
            }
            Contact::None => {}
        }

        let obstacle = &state.obstacles[index];
        if obstacle.is_past() {
            let kind = obstacle.kind;
            state.obstacles.remove(index);
            if kind != ObstacleKind::Arch {
                state.obstacle_passed(kind);
            }
        } else {
            index += 1;
        }
    }
}

impl Simulation for RacerState {
    type Input = RacerInput;

    fn tick(&mut self, input: &RacerInput, dt: f32) {
        tick(self, input, dt);
    }

    fn clear_one_shot(input: &mut RacerInput) {
        input.start = false;
        input.restart = false;
        input.volume = None;
    }
}
