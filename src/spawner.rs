use crate::arena::Arena;
use crate::config::SpawnerConfig;
use crate::engine::Point;
use crate::entity::Enemy;
use rand::RngCore;

// attempts at a random edge point before falling back to a corner
const PLACEMENT_TRIES: usize = 8;

/// Timed enemy factory that also owns the live enemies
///
/// ┌──────────── Spawn Policy ─────────────────────────────┐
/// │ every `interval_ms` of accumulated tick delta         │
/// │   ├─► at cap?             -> skip, timer keeps going  │
/// │   ├─► random edge point   -> re-roll near the player  │
/// │   └─► factory(point, rng) -> appended to live list    │
/// └───────────────────────────────────────────────────────┘
pub struct Spawner<F>
where
    F: FnMut(Point, &mut dyn RngCore) -> Enemy,
{
    create: F,
    spawns: Vec<Enemy>,
    interval_ms: f64,
    elapsed_ms: f64,
    max_spawns: Option<usize>,
    clearance: f64,
}

impl<F> Spawner<F>
where
    F: FnMut(Point, &mut dyn RngCore) -> Enemy,
{
    pub fn new(config: &SpawnerConfig, create: F) -> Self {
        Spawner {
            create,
            spawns: Vec::new(),
            interval_ms: config.interval_ms,
            elapsed_ms: 0.0,
            max_spawns: config.max_spawns,
            clearance: config.clearance,
        }
    }

    pub fn spawns(&self) -> &[Enemy] {
        &self.spawns
    }

    pub fn spawns_mut(&mut self) -> &mut [Enemy] {
        &mut self.spawns
    }

    fn at_cap(&self) -> bool {
        self.max_spawns
            .map_or(false, |max| self.spawns.len() >= max)
    }

    /// Compact the live list, returning how many dead enemies were removed
    pub fn reap(&mut self) -> usize {
        let before = self.spawns.len();
        self.spawns.retain(|enemy| enemy.is_alive());
        before - self.spawns.len()
    }

    /// Advance the timer, spawning once per elapsed interval.
    /// Returns the number of enemies created this call.
    pub fn update(
        &mut self,
        delta_ms: f64,
        player: Point,
        arena: &Arena,
        rng: &mut dyn RngCore,
    ) -> usize {
        self.elapsed_ms += delta_ms;
        let mut spawned = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            if self.at_cap() {
                continue;
            }
            let position = self.spawn_point(player, arena, &mut *rng);
            let enemy = (self.create)(position, &mut *rng);
            log::debug!(
                "spawned {} at ({:.1}, {:.1})",
                enemy.kind().name(),
                position.x,
                position.y
            );
            self.spawns.push(enemy);
            spawned += 1;
        }
        spawned
    }

    /// Random edge point at least `clearance` away from the player, or
    /// the corner farthest from the player when every try lands too close
    pub fn spawn_point(&self, player: Point, arena: &Arena, rng: &mut dyn RngCore) -> Point {
        for _ in 0..PLACEMENT_TRIES {
            let point = arena.random_edge_point(rng);
            if point.distance(player) >= self.clearance && point != player {
                return point;
            }
        }
        arena.farthest_corner(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use crate::entity::EnemyKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawner(config: SpawnerConfig) -> Spawner<impl FnMut(Point, &mut dyn RngCore) -> Enemy> {
        Spawner::new(&config, |position, _rng| {
            Enemy::new(position, EnemyKind::Tankzee, &EnemyConfig::default())
        })
    }

    fn uncapped() -> SpawnerConfig {
        SpawnerConfig {
            max_spawns: None,
            ..SpawnerConfig::default()
        }
    }

    #[test]
    fn fires_once_per_interval() {
        let arena = Arena::new(350.0, 350.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut spawner = spawner(uncapped());
        for _ in 0..9 {
            assert_eq!(spawner.update(100.0, arena.center(), &arena, &mut rng), 0);
        }
        assert_eq!(spawner.update(100.0, arena.center(), &arena, &mut rng), 1);
        assert_eq!(spawner.spawns().len(), 1);
    }

    #[test]
    fn long_frames_catch_up() {
        let arena = Arena::new(350.0, 350.0);
        let mut rng = StdRng::seed_from_u64(2);
        let mut spawner = spawner(uncapped());
        assert_eq!(spawner.update(3500.0, arena.center(), &arena, &mut rng), 3);
        assert_eq!(spawner.update(500.0, arena.center(), &arena, &mut rng), 1);
    }

    #[test]
    fn respects_the_cap() {
        let arena = Arena::new(350.0, 350.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawner = spawner(SpawnerConfig {
            max_spawns: Some(2),
            ..SpawnerConfig::default()
        });
        spawner.update(10_000.0, arena.center(), &arena, &mut rng);
        assert_eq!(spawner.spawns().len(), 2);

        spawner.spawns_mut()[0].kill();
        assert_eq!(spawner.reap(), 1);
        spawner.update(1000.0, arena.center(), &arena, &mut rng);
        assert_eq!(spawner.spawns().len(), 2);
    }

    #[test]
    fn spawns_land_on_the_edge() {
        let arena = Arena::new(350.0, 350.0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut spawner = spawner(uncapped());
        spawner.update(50_000.0, arena.center(), &arena, &mut rng);
        assert_eq!(spawner.spawns().len(), 50);
        assert!(spawner
            .spawns()
            .iter()
            .all(|enemy| arena.on_edge(enemy.position())));
    }

    #[test]
    fn never_spawns_on_the_player() {
        let arena = Arena::new(350.0, 350.0);
        let corner = Point::new(0.0, 0.0);
        let edge = Point::new(175.0, 0.0);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let spawner = spawner(SpawnerConfig::default());
            for player in [corner, edge] {
                let point = spawner.spawn_point(player, &arena, &mut rng);
                assert_ne!(point, player);
                assert!(point.distance(player) >= 32.0);
            }
        }
    }

    #[test]
    fn tiny_arena_falls_back_to_far_corner() {
        let arena = Arena::new(10.0, 10.0);
        let mut rng = StdRng::seed_from_u64(5);
        let spawner = spawner(SpawnerConfig::default());
        let player = Point::new(2.0, 3.0);
        assert_eq!(spawner.spawn_point(player, &arena, &mut rng), Point::new(10.0, 10.0));
    }
}
