// TABLE:
// ┌──────────────────────────────────────────────────────────────────────────┐
// │                         Who owns which entity                            │
// ├────────────────┬───────────────────────┬─────────────────────────────────┤
// │ Entity         │ Owner                 │ Destroyed when                  │
// ├────────────────┼───────────────────────┼─────────────────────────────────┤
// │ Player         │ World                 │ never (dead flag ends the game) │
// │ Enemy          │ Spawner live list     │ hit by a projectile             │
// │ Projectile     │ Player's Shooting     │ out of bounds / hit / recycled  │
// └────────────────┴───────────────────────┴─────────────────────────────────┘
pub mod enemy;
pub mod player;
pub mod projectile;

pub use enemy::{Enemy, EnemyKind};
pub use player::{Player, Shooting};
pub use projectile::Projectile;

use crate::engine::Point;

/// Shared data for everything that moves and gets drawn :
/// - physics : position
/// - display : scale
/// - lifecycle : alive flag
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Entity {
    pub position: Point,
    pub scale: f64,
    alive: bool,
}

impl Entity {
    pub fn new(position: Point) -> Self {
        Entity {
            position,
            scale: 1.0,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns `true` only for the call that actually killed it
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kill_reports_once() {
        let mut entity = Entity::new(Point::default());
        assert!(entity.kill());
        assert!(!entity.kill());
        assert!(!entity.is_alive());
    }
}
