use crate::entity::{Enemy, Projectile};

/// One projectile/enemy pair that touched this tick, as indices into the
/// slices handed to the pass
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hit {
    pub projectile: usize,
    pub enemy: usize,
}

/// Finds hits without mutating anything, so the broad phase can be swapped
/// for a grid or spatial hash without touching how hits are applied
pub trait CollisionPass {
    fn hits(&self, projectiles: &[Projectile], enemies: &[Enemy]) -> Vec<Hit>;
}

/// Circle overlap test, touching circles do not count
pub fn is_hit(a: &Projectile, b: &Enemy, projectile_radius: f64, enemy_radius: f64) -> bool {
    a.position().distance(b.position()) < projectile_radius + enemy_radius
}

/// Naive O(projectiles x enemies) scan, fine for a few dozen entities
///
/// ┌─────────────── Tie-break ───────────────────────────────────┐
/// │ projectiles in order, each takes the FIRST enemy (by live   │
/// │ list order) in range that no earlier projectile has taken   │
/// │   -> a projectile hits at most one enemy                    │
/// │   -> an enemy is hit by at most one projectile              │
/// └─────────────────────────────────────────────────────────────┘
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PairScan {
    pub projectile_radius: f64,
    pub enemy_radius: f64,
}

impl PairScan {
    pub fn new(projectile_radius: f64, enemy_radius: f64) -> Self {
        PairScan {
            projectile_radius,
            enemy_radius,
        }
    }
}

impl CollisionPass for PairScan {
    fn hits(&self, projectiles: &[Projectile], enemies: &[Enemy]) -> Vec<Hit> {
        let mut taken = vec![false; enemies.len()];
        let mut hits = Vec::new();
        for (p, projectile) in projectiles.iter().enumerate() {
            if !projectile.entity.is_alive() {
                continue;
            }
            let target = enemies.iter().enumerate().position(|(e, enemy)| {
                !taken[e]
                    && enemy.is_alive()
                    && is_hit(projectile, enemy, self.projectile_radius, self.enemy_radius)
            });
            if let Some(e) = target {
                taken[e] = true;
                hits.push(Hit {
                    projectile: p,
                    enemy: e,
                });
            }
        }
        hits
    }
}

/// Apply one collision pass : mark every hit pair dead, then let the
/// owners compact their lists. Marking before removing keeps indices valid
/// for the whole pass.
///
/// Returns the enemies killed by this pass, each exactly once.
pub fn bullet_hit_test(
    pass: &impl CollisionPass,
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
) -> Vec<Enemy> {
    let hits = pass.hits(projectiles, enemies);
    let mut killed = Vec::with_capacity(hits.len());
    for hit in hits {
        // a spent bullet never hits twice
        projectiles[hit.projectile].entity.kill();
        let enemy = &mut enemies[hit.enemy];
        if enemy.kill() {
            killed.push(enemy.clone());
        }
    }
    killed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use crate::engine::Point;
    use crate::entity::EnemyKind;

    fn bullet(x: f64, y: f64) -> Projectile {
        Projectile::new(Point::new(x, y), Point::new(1.0, 0.0), 4.0)
    }

    fn zombie(x: f64, y: f64) -> Enemy {
        Enemy::new(Point::new(x, y), EnemyKind::Tankzee, &EnemyConfig::default())
    }

    fn scan() -> PairScan {
        PairScan::new(8.0, 16.0)
    }

    #[test]
    fn hit_iff_closer_than_radii_sum() {
        assert!(is_hit(&bullet(0.0, 0.0), &zombie(20.0, 0.0), 8.0, 16.0));
        assert!(!is_hit(&bullet(0.0, 0.0), &zombie(30.0, 0.0), 8.0, 16.0));
        // exactly touching is a miss
        assert!(!is_hit(&bullet(0.0, 0.0), &zombie(24.0, 0.0), 8.0, 16.0));
    }

    #[test]
    fn one_projectile_takes_the_first_enemy_in_order() {
        let bullets = [bullet(0.0, 0.0)];
        let zombies = [zombie(20.0, 0.0), zombie(5.0, 0.0)];
        assert_eq!(
            scan().hits(&bullets, &zombies),
            vec![Hit {
                projectile: 0,
                enemy: 0
            }]
        );
    }

    #[test]
    fn enemy_in_reach_of_two_projectiles_dies_once() {
        let mut bullets = [bullet(0.0, 0.0), bullet(2.0, 0.0)];
        let mut zombies = [zombie(10.0, 0.0)];
        let killed = bullet_hit_test(&scan(), &mut bullets, &mut zombies);
        assert_eq!(killed.len(), 1);
        assert!(!zombies[0].is_alive());
        // second bullet found nothing left to hit, so it survives
        assert!(!bullets[0].entity.is_alive());
        assert!(bullets[1].entity.is_alive());
    }

    #[test]
    fn second_projectile_moves_on_to_the_next_enemy() {
        let mut bullets = [bullet(0.0, 0.0), bullet(0.0, 0.0)];
        let mut zombies = [zombie(10.0, 0.0), zombie(-10.0, 0.0)];
        let killed = bullet_hit_test(&scan(), &mut bullets, &mut zombies);
        assert_eq!(killed.len(), 2);
        assert!(zombies.iter().all(|z| !z.is_alive()));
    }

    #[test]
    fn dead_entities_are_skipped() {
        let mut spent = bullet(0.0, 0.0);
        spent.entity.kill();
        let mut corpse = zombie(0.0, 0.0);
        corpse.kill();
        let mut bullets = [spent, bullet(100.0, 100.0)];
        let mut zombies = [corpse, zombie(100.0, 110.0)];
        let killed = bullet_hit_test(&scan(), &mut bullets, &mut zombies);
        assert_eq!(killed.len(), 1);
        assert_eq!(killed[0].position(), Point::new(100.0, 110.0));
    }

    #[test]
    fn misses_leave_everything_alive() {
        let mut bullets = [bullet(0.0, 0.0)];
        let mut zombies = [zombie(30.0, 0.0)];
        assert!(bullet_hit_test(&scan(), &mut bullets, &mut zombies).is_empty());
        assert!(bullets[0].entity.is_alive());
        assert!(zombies[0].is_alive());
    }
}
