//! Frame driver
//!
//! Owns the session and the RNG and runs one frame at a time:
//! drain input -> tick -> sound cues -> draw. `run` repeats that at a fixed
//! rate until a quit request, always finishing the current frame first.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::SceneAssets;
use crate::platform::{AudioSink, Cue, InputEvent, InputSource, Key, Renderer};
use crate::renderer::draw_scene;
use crate::sim::{GameEvent, GameSession, TickInput, World, tick};

/// Sleeps at the start of each frame until the previous frame's slot ends
#[derive(Debug)]
pub struct FrameGovernor {
    frame: Duration,
    next: Option<Instant>,
}

impl FrameGovernor {
    pub fn new(frame: Duration) -> Self {
        Self { frame, next: None }
    }

    /// Block until the next frame is due. Frames that overran start
    /// immediately and the schedule restarts from now.
    pub fn wait(&mut self) {
        let now = Instant::now();
        let start = match self.next {
            Some(due) if due > now => {
                thread::sleep(due - now);
                due
            }
            _ => now,
        };
        self.next = Some(start + self.frame);
    }
}

/// A running game: session, RNG and the quit flag
#[derive(Debug)]
pub struct Game<R: Rng = Pcg32> {
    session: GameSession,
    rng: R,
    running: bool,
    frame_count: u64,
    events: Vec<InputEvent>,
}

impl Game<Pcg32> {
    /// New game whose wall layout is fully determined by `seed`
    pub fn new(world: World, seed: u64) -> Self {
        log::info!("New game, seed {seed}, world {}x{}", world.width, world.height);
        Self::with_rng(world, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(world: World, rng: R) -> Self {
        Self {
            session: GameSession::new(world),
            rng,
            running: true,
            frame_count: 0,
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames completed since start
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run exactly one frame
    pub fn frame<I, A, D>(
        &mut self,
        input: &mut I,
        audio: &mut A,
        renderer: &mut D,
        assets: &SceneAssets,
    ) -> io::Result<()>
    where
        I: InputSource + ?Sized,
        A: AudioSink + ?Sized,
        D: Renderer + ?Sized,
    {
        self.events.clear();
        input.poll_events(&mut self.events)?;
        let tick_input = self.collect_input();

        for event in tick(&mut self.session, &tick_input, &mut self.rng) {
            match event {
                GameEvent::Scored { .. } => audio.play(Cue::Score),
                GameEvent::Crashed(_) => audio.play(Cue::GameOver),
            }
        }

        draw_scene(&self.session, assets, renderer)?;
        self.frame_count += 1;
        Ok(())
    }

    /// Fold this frame's events into a tick input, noting quit requests
    fn collect_input(&mut self) -> TickInput {
        let mut tick_input = TickInput::default();
        for event in &self.events {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                    if self.running {
                        log::info!("Quit requested");
                    }
                    self.running = false;
                }
                InputEvent::KeyDown(Key::Jump) => tick_input.jump = true,
                InputEvent::KeyDown(Key::Restart) => tick_input.restart = true,
                InputEvent::KeyDown(Key::Other) => {}
            }
        }
        tick_input
    }

    /// Run frames at a fixed rate until quit
    pub fn run<I, A, D>(
        &mut self,
        input: &mut I,
        audio: &mut A,
        renderer: &mut D,
        assets: &SceneAssets,
        frame_duration: Duration,
    ) -> io::Result<()>
    where
        I: InputSource + ?Sized,
        A: AudioSink + ?Sized,
        D: Renderer + ?Sized,
    {
        let mut governor = FrameGovernor::new(frame_duration);
        while self.running {
            governor.wait();
            self.frame(input, audio, renderer, assets)?;
        }
        log::info!(
            "Loop finished after {} frames, final score {}",
            self.frame_count,
            self.session.score
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::consts::*;
    use crate::renderer::scene::tests::{Draw, RecordingRenderer, test_assets};
    use crate::sim::{GamePhase, build_wall};

    /// Input source replaying one batch of events per frame
    #[derive(Default)]
    struct ScriptedInput {
        frames: VecDeque<Vec<InputEvent>>,
    }

    impl ScriptedInput {
        fn push(&mut self, events: &[InputEvent]) {
            self.frames.push_back(events.to_vec());
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> io::Result<()> {
            if let Some(batch) = self.frames.pop_front() {
                out.extend(batch);
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingAudio {
        cues: Vec<Cue>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: Cue) {
            self.cues.push(cue);
        }
    }

    struct Harness {
        game: Game,
        input: ScriptedInput,
        audio: RecordingAudio,
        renderer: RecordingRenderer,
        assets: SceneAssets,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                game: Game::new(World::default(), 1234),
                input: ScriptedInput::default(),
                audio: RecordingAudio::default(),
                renderer: RecordingRenderer::default(),
                assets: test_assets(),
            }
        }

        fn frame(&mut self) {
            self.game
                .frame(&mut self.input, &mut self.audio, &mut self.renderer, &self.assets)
                .unwrap();
        }

        fn skip_intro(&mut self) {
            for _ in 0..=INTRO_FRAMES {
                self.frame();
            }
            assert_eq!(self.game.session().phase, GamePhase::Playing);
        }
    }

    #[test]
    fn test_intro_then_playing_without_input() {
        let mut h = Harness::new();
        for _ in 0..INTRO_FRAMES {
            h.frame();
        }
        assert_eq!(h.game.session().phase, GamePhase::Intro);
        h.frame();
        assert_eq!(h.game.session().phase, GamePhase::Playing);
        assert_eq!(h.game.frame_count(), INTRO_FRAMES as u64 + 1);
    }

    #[test]
    fn test_escape_finishes_frame_then_stops() {
        let mut h = Harness::new();
        h.input.push(&[InputEvent::KeyDown(Key::Escape)]);
        h.frame();
        assert!(!h.game.is_running());
        assert_eq!(h.renderer.commands.last(), Some(&Draw::Present));
    }

    #[test]
    fn test_run_exits_on_quit() {
        let mut h = Harness::new();
        h.input.push(&[]);
        h.input.push(&[InputEvent::KeyDown(Key::Other)]);
        h.input.push(&[InputEvent::Quit]);
        h.game
            .run(
                &mut h.input,
                &mut h.audio,
                &mut h.renderer,
                &h.assets,
                Duration::ZERO,
            )
            .unwrap();
        assert_eq!(h.game.frame_count(), 3);
        let presents = h
            .renderer
            .commands
            .iter()
            .filter(|c| **c == Draw::Present)
            .count();
        assert_eq!(presents, 3);
    }

    #[test]
    fn test_ceiling_crash_plays_one_cue() {
        let mut h = Harness::new();
        h.skip_intro();

        // Flap every frame until the sprite reaches the top
        while h.game.session().phase == GamePhase::Playing {
            h.input.push(&[InputEvent::KeyDown(Key::Jump)]);
            h.frame();
        }
        assert_eq!(h.game.session().phase, GamePhase::GameOver);
        assert!(h.game.session().player.rect.top() <= 0.0);
        assert_eq!(h.audio.cues, vec![Cue::GameOver]);

        // More frames over: no more cues
        for _ in 0..10 {
            h.frame();
        }
        assert_eq!(h.audio.cues, vec![Cue::GameOver]);
    }

    #[test]
    fn test_score_cue_when_passing_wall() {
        let mut h = Harness::new();
        h.skip_intro();

        let hitbox_left = h.game.session().player.hitbox.left();
        let gap_center = h.game.session().player.rect.center().y;
        let mut wall = build_wall(gap_center, h.game.session().world);
        let dx = wall.right() - (hitbox_left + 1.0);
        wall.advance(dx);
        h.game.session.walls.walls.push(wall);
        h.game.session.player.velocity = JUMP_IMPULSE;

        h.frame();
        assert_eq!(h.game.session().score, 1);
        assert_eq!(h.audio.cues, vec![Cue::Score]);
    }

    #[test]
    fn test_score_cue_precedes_game_over_cue() {
        let mut h = Harness::new();
        h.skip_intro();

        let session = &mut h.game.session;
        session.player.rect.pos.y = 0.0;
        session.player.velocity = -1.0;
        session.player.sync_hitbox();
        let mut wall = build_wall(session.player.rect.center().y, session.world);
        let dx = wall.right() - (session.player.hitbox.left() + WALL_SPEED - 1.0);
        wall.advance(dx);
        session.walls.walls.push(wall);

        h.frame();
        assert_eq!(h.game.session().phase, GamePhase::GameOver);
        assert_eq!(h.audio.cues, vec![Cue::Score, Cue::GameOver]);
    }

    #[test]
    fn test_escape_while_playing_stops() {
        let mut h = Harness::new();
        h.skip_intro();
        h.input.push(&[InputEvent::KeyDown(Key::Escape)]);
        h.frame();
        assert!(!h.game.is_running());
        assert_eq!(h.renderer.commands.last(), Some(&Draw::Present));
    }

    #[test]
    fn test_quit_after_game_over_stops() {
        let mut h = Harness::new();
        h.skip_intro();
        while h.game.session().phase == GamePhase::Playing {
            h.frame();
        }
        assert!(h.game.is_running());

        h.input.push(&[InputEvent::Quit]);
        h.frame();
        assert!(!h.game.is_running());
        assert_eq!(h.game.session().phase, GamePhase::GameOver);
        assert_eq!(h.renderer.commands.last(), Some(&Draw::Present));
    }

    #[test]
    fn test_restart_cycle() {
        let mut h = Harness::new();
        h.skip_intro();
        while h.game.session().phase == GamePhase::Playing {
            h.frame();
        }

        h.input.push(&[InputEvent::KeyDown(Key::Jump)]);
        h.frame();
        assert_eq!(h.game.session().phase, GamePhase::GameOver);

        h.input.push(&[InputEvent::KeyDown(Key::Restart)]);
        h.frame();
        assert_eq!(*h.game.session(), GameSession::new(World::default()));
        assert!(h.game.is_running());
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut h = Harness::new();
        h.skip_intro();
        h.input.push(&[InputEvent::KeyDown(Key::Restart)]);
        h.frame();
        assert_eq!(h.game.session().phase, GamePhase::Playing);
        assert!(h.game.session().intro_frames > INTRO_FRAMES);
    }

    #[test]
    fn test_governor_spaces_frames() {
        let mut governor = FrameGovernor::new(Duration::from_millis(5));
        let start = Instant::now();
        for _ in 0..4 {
            governor.wait();
        }
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
