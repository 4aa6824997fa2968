use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

// ==================== Config ====================
// Every section falls back to its defaults, so a `config.json` only has to
// name the values it overrides :
//
//   { "spawner": { "interval_ms": 600.0 }, "player": { "health": 50 } }
//
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub shooting: ShootingConfig,
    pub enemy: EnemyConfig,
    pub spawner: SpawnerConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            width: 350.0,
            height: 350.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// display scale held during PREINTRO
    pub intro_scale: f64,
    /// scale removed per INTRO tick
    pub intro_shrink_step: f64,
    /// pixels per tick per held axis
    pub speed: f64,
    pub health: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            intro_scale: 4.0,
            intro_shrink_step: 0.01,
            speed: 2.0,
            health: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShootingConfig {
    /// pixels per tick
    pub speed: f64,
    pub fire_interval_ms: f64,
    pub max_bullets: usize,
    pub bullet_radius: f64,
}

impl Default for ShootingConfig {
    fn default() -> Self {
        ShootingConfig {
            speed: 4.0,
            fire_interval_ms: 500.0,
            max_bullets: 3,
            bullet_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub radius: f64,
    /// distance at which an enemy stops and starts biting
    pub attack_range: f64,
    pub attack_interval_ms: f64,
    pub attack_damage: u32,
    /// multiplies every kind's base speed
    pub speed_scale: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            radius: 16.0,
            attack_range: 16.0,
            attack_interval_ms: 500.0,
            attack_damage: 1,
            speed_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub interval_ms: f64,
    /// `None` removes the cap
    pub max_spawns: Option<usize>,
    /// minimum distance between a new spawn and the player
    pub clearance: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        SpawnerConfig {
            interval_ms: 1000.0,
            max_spawns: Some(10),
            clearance: 32.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub rain_drops: usize,
    /// pixels per tick
    pub rain_speed: f64,
    pub lightning_min_ms: f64,
    pub lightning_max_ms: f64,
    pub flash_ms: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        WeatherConfig {
            rain_drops: 60,
            rain_speed: 6.0,
            lightning_min_ms: 3000.0,
            lightning_max_ms: 10000.0,
            flash_ms: 150.0,
        }
    }
}

impl GameConfig {
    /// Reject values the tick loop cannot make sense of
    pub fn validate(&self) -> Result<()> {
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            bail!(
                "arena must have a positive size, got {}x{}",
                self.arena.width,
                self.arena.height
            );
        }
        if self.player.intro_scale < 1.0 {
            bail!("player.intro_scale must be at least 1, got {}", self.player.intro_scale);
        }
        if self.player.intro_shrink_step <= 0.0 {
            bail!("player.intro_shrink_step must be positive");
        }
        if self.player.speed <= 0.0 || self.shooting.speed <= 0.0 || self.enemy.speed_scale <= 0.0 {
            bail!("speeds must be positive");
        }
        if self.shooting.fire_interval_ms <= 0.0
            || self.enemy.attack_interval_ms <= 0.0
            || self.spawner.interval_ms <= 0.0
        {
            bail!("intervals must be positive");
        }
        if self.weather.rain_speed <= 0.0 {
            bail!("weather.rain_speed must be positive, got {}", self.weather.rain_speed);
        }
        if self.shooting.max_bullets == 0 {
            bail!("shooting.max_bullets must be at least 1");
        }
        if self.weather.lightning_min_ms <= 0.0
            || self.weather.lightning_max_ms < self.weather.lightning_min_ms
        {
            bail!(
                "lightning interval [{}, {}] is empty",
                self.weather.lightning_min_ms,
                self.weather.lightning_max_ms
            );
        }
        Ok(())
    }
}
