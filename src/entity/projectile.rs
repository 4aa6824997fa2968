use super::Entity;
use crate::arena::Arena;
use crate::engine::Point;

/// A bullet, flies straight until it leaves the arena or hits something
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projectile {
    pub entity: Entity,
    velocity: Point,
}

impl Projectile {
    /// `direction` is normalized here, a zero direction makes a bullet that
    /// never moves
    pub fn new(origin: Point, direction: Point, speed: f64) -> Self {
        let velocity = direction
            .normalized()
            .map(|unit| unit.scaled(speed))
            .unwrap_or_default();
        Projectile {
            entity: Entity::new(origin),
            velocity,
        }
    }

    pub fn position(&self) -> Point {
        self.entity.position
    }

    /// Heading in radians, for drawing
    pub fn rotation(&self) -> f64 {
        self.velocity.y.atan2(self.velocity.x)
    }

    pub fn update(&mut self) {
        if self.entity.is_alive() {
            self.entity.position = self.entity.position + self.velocity;
        }
    }

    pub fn is_out_of(&self, arena: &Arena) -> bool {
        !arena.contains(self.entity.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn moves_at_fixed_velocity() {
        let mut bullet = Projectile::new(Point::new(10.0, 10.0), Point::new(3.0, 4.0), 5.0);
        bullet.update();
        bullet.update();
        assert_relative_eq!(bullet.position().x, 16.0);
        assert_relative_eq!(bullet.position().y, 18.0);
    }

    #[test]
    fn leaves_the_arena() {
        let arena = Arena::new(20.0, 20.0);
        let mut bullet = Projectile::new(Point::new(18.0, 10.0), Point::new(1.0, 0.0), 4.0);
        assert!(!bullet.is_out_of(&arena));
        bullet.update();
        assert!(bullet.is_out_of(&arena));
    }

    #[test]
    fn dead_bullets_stay_put() {
        let mut bullet = Projectile::new(Point::default(), Point::new(1.0, 0.0), 4.0);
        bullet.entity.kill();
        bullet.update();
        assert_eq!(bullet.position(), Point::default());
    }
}
