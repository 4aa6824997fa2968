use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zombie_guild::config::{EnemyConfig, GameConfig, PlayerConfig, SpawnerConfig};
use zombie_guild::engine::input::InputState;
use zombie_guild::engine::FRAME_SIZE;
use zombie_guild::sound::SoundCue;
use zombie_guild::state::{GameState, Overlay};
use zombie_guild::world::World;

fn run_intro(world: &mut World, audio: &mut Vec<SoundCue>) {
    let idle = InputState::default();
    world.confirm(audio);
    for _ in 0..300 {
        world.tick(FRAME_SIZE, &idle, audio);
    }
    world.confirm(audio);
}

#[test]
fn full_session_from_title_to_first_kill() {
    let config = GameConfig {
        spawner: SpawnerConfig {
            max_spawns: Some(1),
            ..SpawnerConfig::default()
        },
        ..GameConfig::default()
    };
    let mut world = World::new(&config, StdRng::seed_from_u64(7));
    let mut audio: Vec<SoundCue> = Vec::new();
    let idle = InputState::default();

    // PREINTRO
    assert_eq!(world.state(), GameState::PreIntro);
    assert_eq!(world.overlay(), Some(Overlay::PreIntro));
    world.tick(FRAME_SIZE, &idle, &mut audio);
    assert_relative_eq!(world.player().scale(), 4.0);

    // INTRO : 300 ticks of 0.01
    world.confirm(&mut audio);
    assert_eq!(world.state(), GameState::Intro);
    for n in 1..=300u32 {
        world.tick(FRAME_SIZE, &idle, &mut audio);
        let expected = (4.0 - 0.01 * n as f64).max(1.0);
        assert_relative_eq!(world.player().scale(), expected, epsilon = 1e-9);
        if n < 300 {
            assert_eq!(world.state(), GameState::Intro);
        }
    }
    assert_eq!(world.state(), GameState::Start);
    assert_eq!(world.overlay(), Some(Overlay::Start));

    // START -> RUNNING
    world.confirm(&mut audio);
    assert_eq!(world.state(), GameState::Running);
    assert_eq!(world.overlay(), None);

    // one spawner interval later, one zombie on the edge
    world.tick(1000.0, &idle, &mut audio);
    assert_eq!(world.enemies().len(), 1);
    let target = world.enemies()[0].position();
    assert!(world.arena().on_edge(target));
    assert_ne!(target, world.player().position());

    // click once toward it, then let the bullet fly
    let mut aim = InputState::default();
    aim.set_pointer(target);
    aim.set_pointer_down(true);
    world.tick(FRAME_SIZE, &aim, &mut audio);
    assert_eq!(world.player().shooting.bullets().len(), 1);

    let mut release = InputState::default();
    release.set_pointer(target);
    for _ in 0..60 {
        if world.kills() > 0 {
            break;
        }
        world.tick(FRAME_SIZE, &release, &mut audio);
    }

    assert_eq!(world.kills(), 1);
    assert!(world.enemies().is_empty());
    // the bullet was spent on the hit
    assert!(world.player().shooting.bullets().is_empty());
    assert_eq!(
        audio.iter().filter(|cue| **cue == SoundCue::Squelch).count(),
        1
    );
}

#[test]
fn zombies_eventually_end_the_game() {
    let config = GameConfig {
        player: PlayerConfig {
            health: 3,
            ..PlayerConfig::default()
        },
        enemy: EnemyConfig {
            speed_scale: 50.0,
            attack_interval_ms: 100.0,
            ..EnemyConfig::default()
        },
        spawner: SpawnerConfig {
            interval_ms: 100.0,
            ..SpawnerConfig::default()
        },
        ..GameConfig::default()
    };
    let mut world = World::new(&config, StdRng::seed_from_u64(99));
    let mut audio: Vec<SoundCue> = Vec::new();
    run_intro(&mut world, &mut audio);
    assert_eq!(world.state(), GameState::Running);

    let idle = InputState::default();
    for _ in 0..1_000 {
        world.tick(100.0, &idle, &mut audio);
        if world.state() == GameState::GameOver {
            break;
        }
    }
    assert_eq!(world.state(), GameState::GameOver);
    assert!(world.player().is_dead());
    assert_eq!(world.overlay(), Some(Overlay::GameOver));

    // terminal : confirms are ignored and the horde freezes
    let frozen: Vec<_> = world.enemies().iter().map(|e| e.position()).collect();
    for _ in 0..50 {
        world.confirm(&mut audio);
        world.tick(100.0, &idle, &mut audio);
    }
    assert_eq!(world.state(), GameState::GameOver);
    let after: Vec<_> = world.enemies().iter().map(|e| e.position()).collect();
    assert_eq!(frozen, after);
}

#[test]
fn idle_player_keeps_scale_in_pre_intro() {
    let mut world = World::new(&GameConfig::default(), StdRng::seed_from_u64(3));
    let mut audio: Vec<SoundCue> = Vec::new();
    world.player_mut().set_scale(1.5);
    world.tick(FRAME_SIZE, &InputState::default(), &mut audio);
    assert_relative_eq!(world.player().scale(), 4.0);
    // nothing but weather can make noise before the first click
    assert!(audio.is_empty());
}
