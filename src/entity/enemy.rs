use super::{Entity, Player};
use crate::config::EnemyConfig;
use crate::engine::Point;
use rand::Rng;

/// Zombie flavours, they only differ in how fast they shamble
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Tankzee,
    Quickzee,
    Dogzee,
    Nursezee,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Tankzee,
        EnemyKind::Quickzee,
        EnemyKind::Dogzee,
        EnemyKind::Nursezee,
    ];

    /// pixels per tick before `EnemyConfig::speed_scale`
    pub fn base_speed(self) -> f64 {
        match self {
            EnemyKind::Tankzee => 0.25,
            EnemyKind::Quickzee => 1.0,
            EnemyKind::Dogzee => 0.75,
            EnemyKind::Nursezee => 0.4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Tankzee => "tankzee",
            EnemyKind::Quickzee => "quickzee",
            EnemyKind::Dogzee => "dogzee",
            EnemyKind::Nursezee => "nursezee",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub entity: Entity,
    kind: EnemyKind,
    speed: f64,
    attack_range: f64,
    attack_interval_ms: f64,
    attack_damage: u32,
    // Some while in biting range, counts down to the next bite
    attack_cooldown_ms: Option<f64>,
}

impl Enemy {
    pub fn new(position: Point, kind: EnemyKind, config: &EnemyConfig) -> Self {
        Enemy {
            entity: Entity::new(position),
            kind,
            speed: kind.base_speed() * config.speed_scale,
            attack_range: config.attack_range,
            attack_interval_ms: config.attack_interval_ms,
            attack_damage: config.attack_damage,
            attack_cooldown_ms: None,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.entity.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_cooldown_ms.is_some()
    }

    /// Heading toward `target`, for drawing
    pub fn rotation_towards(&self, target: Point) -> f64 {
        let d = target - self.entity.position;
        d.y.atan2(d.x)
    }

    /// Returns `true` only the first time, so the kill effect fires once
    pub fn kill(&mut self) -> bool {
        self.attack_cooldown_ms = None;
        self.entity.kill()
    }

    /// ::update per RUNNING tick
    /// - out of range : seek the player's current position
    /// - in range     : stand still and bite every `attack_interval_ms`
    pub fn update(&mut self, player: &mut Player, delta_ms: f64) {
        if !self.is_alive() {
            return;
        }
        let to_player = player.position() - self.entity.position;
        if to_player.length() < self.attack_range {
            let cooldown = self
                .attack_cooldown_ms
                .unwrap_or(self.attack_interval_ms)
                - delta_ms;
            if cooldown <= 0.0 {
                player.attack(self.attack_damage);
                self.attack_cooldown_ms = Some(cooldown + self.attack_interval_ms);
            } else {
                self.attack_cooldown_ms = Some(cooldown);
            }
            return;
        }

        self.attack_cooldown_ms = None;
        if let Some(direction) = to_player.normalized() {
            // never step past the target
            let step = self.speed.min(to_player.length());
            self.entity.position = self.entity.position + direction.scaled(step);
        }
    }
}
