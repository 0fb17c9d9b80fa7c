//! Neon Arcade entry point
//!
//! Native: runs a short headless session of every game and logs how it went.
//! Web: the page drives the library handles in `neon_arcade::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neon_arcade::FrameLoop;
    use neon_arcade::audio::{AudioManager, NullAudio};
    use neon_arcade::breakout::{BreakoutEvent, BreakoutPhase, BreakoutState};
    use neon_arcade::consts::SIM_DT;
    use neon_arcade::KanbanError;
    use neon_arcade::kanban::Board;
    use neon_arcade::racer::{ObstacleKind, RacerPhase, RacerState};
    use neon_arcade::settings::Settings;
    use neon_arcade::snake::{Direction, SnakePhase, SnakeState};
    use neon_arcade::wordle::{LetterStatus, WORD_LIST, WordleState};

    /// Frames per simulated second
    const FPS: u32 = 60;

    pub fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Greedy snake: head for the food, never straight back
    pub fn snake(seed: u64) {
        let mut game = FrameLoop::new(SnakeState::new(seed));

        for _ in 0..FPS * 90 {
            let s = &game.sim;
            if s.phase == SnakePhase::GameOver {
                break;
            }
            let delta = s.food - s.head();
            let wanted = if delta.x > 0 {
                Direction::Right
            } else if delta.x < 0 {
                Direction::Left
            } else if delta.y > 0 {
                Direction::Down
            } else {
                Direction::Up
            };
            let dir = if wanted == s.heading.opposite() {
                // Sidestep instead of reversing
                match wanted {
                    Direction::Left | Direction::Right => Direction::Down,
                    Direction::Up | Direction::Down => Direction::Right,
                }
            } else {
                wanted
            };
            game.input.direction = Some(dir);
            game.frame(SIM_DT);
        }

        log::info!(
            "snake: {:?}, score {}, length {}",
            game.sim.phase,
            game.sim.score,
            game.sim.len()
        );
    }

    /// Paddle glued under the ball
    pub fn breakout() {
        let mut game = FrameLoop::new(BreakoutState::new());
        game.input.launch = true;

        for _ in 0..FPS * 180 {
            if game.sim.phase.is_finished() {
                break;
            }
            game.input.pointer_x = Some(game.sim.ball.pos.x);
            game.frame(SIM_DT);
        }

        let paddle_hits = game
            .sim
            .drain_events()
            .iter()
            .filter(|e| matches!(e, BreakoutEvent::PaddleHit { .. }))
            .count();
        let s = &game.sim;
        log::info!(
            "breakout: {:?}, score {}, {} bricks left, {paddle_hits} paddle hits",
            s.phase,
            s.score,
            s.bricks.len()
        );
        if s.phase == BreakoutPhase::Idle {
            log::warn!("breakout never launched");
        }
    }

    /// Guess down the word list until the round ends
    pub fn wordle(seed: u64) {
        let mut state = WordleState::new(seed);
        for word in WORD_LIST {
            if state.is_finished() {
                break;
            }
            state.current = word.to_string();
            match state.submit() {
                Ok(row) => {
                    let marks: String = row
                        .iter()
                        .map(|status| match status {
                            LetterStatus::Correct => 'G',
                            LetterStatus::Present => 'Y',
                            LetterStatus::Absent => '.',
                        })
                        .collect();
                    log::info!("wordle: {word} {marks}");
                }
                Err(err) => log::warn!("wordle: {word} rejected: {err}"),
            }
        }
        log::info!(
            "wordle: {:?} after {} guesses, answer {}",
            state.phase,
            state.guesses.len(),
            state.answer()
        );
    }

    fn kanban_script(board: &mut Board) -> Result<String, KanbanError> {
        let id = board.add_card("todo", "Try the racer")?;
        board.begin_drag(&id, "todo")?.drop_on(board, "done")?;
        board.remove_column("in-progress")?;
        board.to_json()
    }

    pub fn kanban() {
        let mut board = Board::default();
        match kanban_script(&mut board) {
            Ok(json) => log::info!("kanban: {} cards, {json}", board.card_count()),
            Err(err) => log::error!("kanban: {err}"),
        }
    }

    /// Autopilot: chase the next gate, jump bars, duck walls by their gaps
    pub fn racer(seed: u64, settings: &Settings) {
        let mut state = RacerState::new(seed);
        state.set_volume(settings.music_volume);
        let mut game = FrameLoop::new(state);
        let mut audio = AudioManager::new(NullAudio, settings);
        game.input.start = true;

        for _ in 0..FPS * 120 {
            if game.sim.phase == RacerPhase::GameOver {
                break;
            }

            let s = &game.sim;
            let x = s.player.pos.x;
            let next = s
                .obstacles
                .iter()
                .filter(|o| o.pos.z < 0.0 && o.pos.z > -12.0)
                .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

            let (target_x, jump) = match next {
                Some(o) if o.kind == ObstacleKind::Arch => (o.pos.x, false),
                Some(o) if o.kind.is_wall() => match o.gap {
                    Some(gap) => (gap.center_x, gap.on_top && o.pos.z > -4.0),
                    None => (x, false),
                },
                Some(o) if o.kind == ObstacleKind::SimpleBar => (x, o.pos.z > -5.0),
                Some(o) => (if o.pos.x > x { o.pos.x - 3.0 } else { o.pos.x + 3.0 }, false),
                None => (0.0, false),
            };

            game.input.left = target_x < x - 0.3;
            game.input.right = target_x > x + 0.3;
            game.input.jump = jump;
            game.frame(SIM_DT);

            let events = game.sim.drain_events();
            audio.play_racer_events(&events);
            audio.sync_music(game.sim.music_cue());
        }

        let p = game.sim.progress;
        log::info!(
            "racer: {:?}, level {}, score {}, gates {}/{}",
            game.sim.phase,
            p.level,
            p.score,
            p.gates_collected,
            p.gates_needed()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_arcade::settings::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Arcade (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(&path).unwrap_or_else(|err| {
            log::warn!("Using default settings: {err}");
            Settings::default()
        }),
        None => Settings::default(),
    };
    let seed = settings.seed_or(headless::clock_seed());
    log::info!("Seed {seed}");

    headless::snake(seed);
    headless::breakout();
    headless::wordle(seed);
    headless::kanban();
    headless::racer(seed, &settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    neon_arcade::web::init_logging();
}
