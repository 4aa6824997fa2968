use crate::arena::Arena;
use crate::collision::{self, CollisionPass, PairScan};
use crate::config::GameConfig;
use crate::engine::input::InputState;
use crate::engine::Point;
use crate::entity::{Enemy, EnemyKind, Player};
use crate::sound::{AudioSink, SoundCue};
use crate::spawner::Spawner;
use crate::state::{Event, GameState, GameStateMachine, Overlay};
use crate::weather::Weather;
use rand::rngs::StdRng;
use rand::RngCore;

pub type EnemyFactory = Box<dyn FnMut(Point, &mut dyn RngCore) -> Enemy>;

/// TABLE
/// ┌──────────────────────── World::tick() ──────────────────────────────┐
/// │                                                                     │
/// │  1. death check      player dead? -> GAMEOVER (skips step 3 below)  │
/// │  2. overlay          derived from the state whenever it is read     │
/// │  3. state dispatch                                                  │
/// │       ├─► PREINTRO : scale = 4                                      │
/// │       ├─► INTRO    : scale shrinks, START when it reaches 1         │
/// │       └─► RUNNING  : player -> enemies -> collisions -> spawner     │
/// │  4. weather          rain + lightning, every state                  │
/// │                                                                     │
/// └─────────────────────────────────────────────────────────────────────┘
///
/// Everything is owned here and only mutated from `tick()` and `confirm()`,
/// rendering reads the accessors and never writes back.
pub struct World<C: CollisionPass = PairScan> {
    arena: Arena,
    machine: GameStateMachine,
    player: Player,
    spawner: Spawner<EnemyFactory>,
    collision: C,
    weather: Weather,
    rng: StdRng,
    kills: u32,
}

impl World {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        let collision = PairScan::new(config.shooting.bullet_radius, config.enemy.radius);
        World::with_collision(config, rng, collision)
    }
}

impl<C: CollisionPass> World<C> {
    pub fn with_collision(config: &GameConfig, mut rng: StdRng, collision: C) -> Self {
        let arena = Arena::from(&config.arena);
        let player = Player::new(arena.center(), &config.player, &config.shooting);
        let enemy_config = config.enemy.clone();
        let factory: EnemyFactory = Box::new(move |position: Point, rng: &mut dyn RngCore| {
            Enemy::new(position, EnemyKind::random(rng), &enemy_config)
        });
        let weather = Weather::new(&config.weather, &arena, &mut rng);
        let machine =
            GameStateMachine::new(config.player.intro_scale, config.player.intro_shrink_step);
        World {
            arena,
            machine,
            player,
            spawner: Spawner::new(&config.spawner, factory),
            collision,
            weather,
            rng,
            kills: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    /// Visible overlay, a pure function of the current state so it can
    /// never lag behind a transition
    pub fn overlay(&self) -> Option<Overlay> {
        self.machine.state().overlay()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.spawner.spawns()
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    fn apply(&mut self, event: Event) {
        let before = self.machine.state();
        self.machine = self.machine.transition(event, &mut self.player);
        let after = self.machine.state();
        if before != after {
            log::info!("game state {:?} -> {:?}", before, after);
        }
    }

    /// The single user trigger, only PREINTRO and START react to it
    pub fn confirm(&mut self, audio: &mut dyn AudioSink) {
        let before = self.machine.state();
        self.apply(Event::Confirm);
        match (before, self.machine.state()) {
            (GameState::PreIntro, GameState::Intro) => {
                audio.play(SoundCue::Music);
                self.weather.enable_sound();
            }
            (GameState::Start, GameState::Running) => audio.play(SoundCue::Horde),
            _ => {}
        }
    }

    /// One frame of the game, see the table above for the order
    pub fn tick(&mut self, delta_ms: f64, input: &InputState, audio: &mut dyn AudioSink) {
        if self.player.is_dead() {
            self.apply(Event::PlayerDied);
        }

        if self.machine.state() == GameState::Running {
            self.run_frame(delta_ms, input, audio);
        }
        self.apply(Event::Update);

        self.weather
            .update(delta_ms, &self.arena, &mut self.rng, audio);
    }

    fn run_frame(&mut self, delta_ms: f64, input: &InputState, audio: &mut dyn AudioSink) {
        self.player.update(input, &self.arena, delta_ms);

        for enemy in self.spawner.spawns_mut() {
            enemy.update(&mut self.player, delta_ms);
        }

        let killed = collision::bullet_hit_test(
            &self.collision,
            self.player.shooting.bullets_mut(),
            self.spawner.spawns_mut(),
        );
        for enemy in &killed {
            log::debug!("killed {}", enemy.kind().name());
            audio.play(SoundCue::Squelch);
        }
        self.kills += killed.len() as u32;
        self.player.shooting.reap();
        self.spawner.reap();

        // fresh spawns sit on the edge until next tick
        self.spawner.update(
            delta_ms,
            self.player.position(),
            &self.arena,
            &mut self.rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world() -> World {
        World::new(&GameConfig::default(), StdRng::seed_from_u64(21))
    }

    fn advance_to_running(world: &mut World, audio: &mut Vec<SoundCue>) {
        let input = InputState::default();
        world.confirm(audio);
        while world.state() == GameState::Intro {
            world.tick(16.0, &input, audio);
        }
        world.confirm(audio);
    }

    #[test]
    fn confirm_plays_the_transition_cues() {
        let mut world = world();
        let mut audio: Vec<SoundCue> = Vec::new();
        advance_to_running(&mut world, &mut audio);
        assert_eq!(world.state(), GameState::Running);
        assert!(world.weather().sound_enabled());
        let cues: Vec<SoundCue> = audio
            .into_iter()
            .filter(|cue| *cue != SoundCue::Thunder)
            .collect();
        assert_eq!(cues, vec![SoundCue::Music, SoundCue::Horde]);
    }

    #[test]
    fn confirm_is_ignored_outside_pre_intro_and_start() {
        let mut world = world();
        let mut audio: Vec<SoundCue> = Vec::new();
        world.confirm(&mut audio);
        world.confirm(&mut audio);
        assert_eq!(world.state(), GameState::Intro);
        assert_eq!(audio, vec![SoundCue::Music]);
    }

    #[test]
    fn overlay_tracks_state_every_tick() {
        let mut world = world();
        let mut audio: Vec<SoundCue> = Vec::new();
        let input = InputState::default();
        world.tick(16.0, &input, &mut audio);
        assert_eq!(world.overlay(), Some(Overlay::PreIntro));
        world.confirm(&mut audio);
        world.tick(16.0, &input, &mut audio);
        assert_eq!(world.overlay(), None);
    }

    #[test]
    fn nothing_spawns_before_running() {
        let mut world = world();
        let mut audio: Vec<SoundCue> = Vec::new();
        let input = InputState::default();
        for _ in 0..200 {
            world.tick(100.0, &input, &mut audio);
        }
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn death_tick_skips_the_running_update() {
        let mut world = world();
        let mut audio: Vec<SoundCue> = Vec::new();
        advance_to_running(&mut world, &mut audio);

        let mut input = InputState::default();
        input.set_pressed("KeyD");
        world.player_mut().attack(1_000);
        let before = world.player().position();
        world.tick(16.0, &input, &mut audio);

        assert_eq!(world.state(), GameState::GameOver);
        assert_eq!(world.overlay(), Some(Overlay::GameOver));
        assert_eq!(world.player().position(), before);

        for _ in 0..100 {
            world.confirm(&mut audio);
            world.tick(100.0, &input, &mut audio);
        }
        assert_eq!(world.state(), GameState::GameOver);
        assert!(world.enemies().is_empty());
    }
}
