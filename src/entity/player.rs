use super::{Entity, Projectile};
use crate::arena::Arena;
use crate::config::{PlayerConfig, ShootingConfig};
use crate::engine::input::InputState;
use crate::engine::Point;

// key codes (KeyboardEvent.code) per direction
const UP: [&str; 2] = ["KeyW", "ArrowUp"];
const LEFT: [&str; 2] = ["KeyA", "ArrowLeft"];
const DOWN: [&str; 2] = ["KeyS", "ArrowDown"];
const RIGHT: [&str; 2] = ["KeyD", "ArrowRight"];

fn any_pressed(input: &InputState, codes: &[&str]) -> bool {
    codes.iter().any(|code| input.is_pressed(code))
}

/// Player
/// - update() -> movement, aim, shooting
/// - attack() -> health, dead flag
pub struct Player {
    entity: Entity,
    health: u32,
    max_health: u32,
    speed: f64,
    // unit vector, starts facing up (top left is origin)
    facing: Point,
    pub shooting: Shooting,
}

impl Player {
    pub fn new(position: Point, config: &PlayerConfig, shooting: &ShootingConfig) -> Self {
        let mut entity = Entity::new(position);
        entity.scale = config.intro_scale;
        Player {
            entity,
            health: config.health,
            max_health: config.health,
            speed: config.speed,
            facing: Point::new(0.0, -1.0),
            shooting: Shooting::new(shooting),
        }
    }

    pub fn position(&self) -> Point {
        self.entity.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.entity.position = position;
    }

    pub fn scale(&self) -> f64 {
        self.entity.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.entity.scale = scale;
    }

    pub fn facing(&self) -> Point {
        self.facing
    }

    /// Heading in radians, for drawing
    pub fn rotation(&self) -> f64 {
        self.facing.y.atan2(self.facing.x)
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        !self.entity.is_alive()
    }

    /// Take a bite, health hitting zero sets the dead flag
    pub fn attack(&mut self, damage: u32) {
        if self.is_dead() {
            return;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health == 0 && self.entity.kill() {
            log::info!("player died");
        }
    }

    /// ::update per RUNNING tick
    /// - held keys -> one fixed step per axis (diagonals are not normalized)
    /// - pointer -> facing
    /// - pointer button -> shooting
    pub fn update(&mut self, input: &InputState, arena: &Arena, delta_ms: f64) {
        let mut step = Point::default();
        if any_pressed(input, &UP) {
            step.y -= self.speed;
        }
        if any_pressed(input, &LEFT) {
            step.x -= self.speed;
        }
        if any_pressed(input, &DOWN) {
            step.y += self.speed;
        }
        if any_pressed(input, &RIGHT) {
            step.x += self.speed;
        }
        self.entity.position = arena.clamp(self.entity.position + step);

        // pointer on top of the player keeps the last heading
        if let Some(facing) = (input.pointer() - self.entity.position).normalized() {
            self.facing = facing;
        }

        self.shooting.update(
            input.is_pointer_down(),
            self.entity.position,
            self.facing,
            arena,
            delta_ms,
        );
    }
}

/// The player's gun and the bullets it has in flight
pub struct Shooting {
    bullets: Vec<Projectile>,
    speed: f64,
    fire_interval_ms: f64,
    max_bullets: usize,
    cooldown_ms: f64,
    was_firing: bool,
}

impl Shooting {
    pub fn new(config: &ShootingConfig) -> Self {
        Shooting {
            bullets: Vec::new(),
            speed: config.speed,
            fire_interval_ms: config.fire_interval_ms,
            max_bullets: config.max_bullets,
            cooldown_ms: 0.0,
            was_firing: false,
        }
    }

    pub fn bullets(&self) -> &[Projectile] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut [Projectile] {
        &mut self.bullets
    }

    /// Drop every bullet that was consumed this tick
    pub fn reap(&mut self) {
        self.bullets.retain(|bullet| bullet.entity.is_alive());
    }

    /// Spawn a bullet at `origin`, recycling the oldest one past the cap
    pub fn fire(&mut self, origin: Point, direction: Point) {
        if self.bullets.len() >= self.max_bullets {
            self.bullets.remove(0);
        }
        self.bullets
            .push(Projectile::new(origin, direction, self.speed));
    }

    /// Press fires at once, holding keeps firing every `fire_interval_ms`
    pub fn update(
        &mut self,
        firing: bool,
        origin: Point,
        direction: Point,
        arena: &Arena,
        delta_ms: f64,
    ) {
        for bullet in self.bullets.iter_mut() {
            bullet.update();
        }
        self.bullets
            .retain(|bullet| bullet.entity.is_alive() && !bullet.is_out_of(arena));

        match (firing, self.was_firing) {
            (true, false) => {
                self.fire(origin, direction);
                self.cooldown_ms = self.fire_interval_ms;
            }
            (true, true) => {
                self.cooldown_ms -= delta_ms;
                if self.cooldown_ms <= 0.0 {
                    self.fire(origin, direction);
                    self.cooldown_ms += self.fire_interval_ms;
                }
            }
            (false, _) => self.cooldown_ms = 0.0,
        }
        self.was_firing = firing;
    }
}
