use crate::arena::Arena;
use crate::config::WeatherConfig;
use crate::engine::Point;
use crate::sound::{AudioSink, SoundCue};
use rand::{Rng, RngCore};

/// Rain and lightning, pure atmosphere : it runs in every state and never
/// touches gameplay
pub struct Weather {
    drops: Vec<Point>,
    rain_speed: f64,
    lightning_min_ms: f64,
    lightning_max_ms: f64,
    flash_ms: f64,
    until_lightning_ms: f64,
    flash_left_ms: f64,
    sound: bool,
}

impl Weather {
    pub fn new(config: &WeatherConfig, arena: &Arena, rng: &mut dyn RngCore) -> Self {
        let drops = (0..config.rain_drops)
            .map(|_| {
                Point::new(
                    rng.gen_range(0.0..=arena.width),
                    rng.gen_range(0.0..=arena.height),
                )
            })
            .collect();
        let mut weather = Weather {
            drops,
            rain_speed: config.rain_speed,
            lightning_min_ms: config.lightning_min_ms,
            lightning_max_ms: config.lightning_max_ms,
            flash_ms: config.flash_ms,
            until_lightning_ms: 0.0,
            flash_left_ms: 0.0,
            sound: false,
        };
        weather.until_lightning_ms = weather.next_lightning(rng);
        weather
    }

    fn next_lightning(&self, rng: &mut dyn RngCore) -> f64 {
        rng.gen_range(self.lightning_min_ms..=self.lightning_max_ms)
    }

    /// Thunder stays silent until the player has clicked once, browsers
    /// block audio before any user gesture anyway
    pub fn enable_sound(&mut self) {
        self.sound = true;
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound
    }

    pub fn drops(&self) -> &[Point] {
        &self.drops
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_left_ms > 0.0
    }

    /// 0 when dark, fades from 1 over the flash
    pub fn flash_alpha(&self) -> f64 {
        if self.flash_ms <= 0.0 {
            return 0.0;
        }
        (self.flash_left_ms / self.flash_ms).clamp(0.0, 1.0)
    }

    pub fn update(
        &mut self,
        delta_ms: f64,
        arena: &Arena,
        rng: &mut dyn RngCore,
        audio: &mut dyn AudioSink,
    ) {
        for drop in self.drops.iter_mut() {
            let fallen = drop.y + self.rain_speed;
            // wraps any number of arena heights, upward rain included
            drop.y = fallen.rem_euclid(arena.height);
            if drop.y != fallen {
                drop.x = rng.gen_range(0.0..=arena.width);
            }
        }

        self.flash_left_ms = (self.flash_left_ms - delta_ms).max(0.0);
        self.until_lightning_ms -= delta_ms;
        if self.until_lightning_ms <= 0.0 {
            self.flash_left_ms = self.flash_ms;
            self.until_lightning_ms += self.next_lightning(rng);
            if self.sound {
                audio.play(SoundCue::Thunder);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> WeatherConfig {
        WeatherConfig {
            rain_drops: 10,
            rain_speed: 5.0,
            lightning_min_ms: 1000.0,
            lightning_max_ms: 1000.0,
            flash_ms: 200.0,
        }
    }

    #[test]
    fn rain_wraps_inside_the_arena() {
        let arena = Arena::new(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(9);
        let mut weather = Weather::new(&config(), &arena, &mut rng);
        let mut audio: Vec<SoundCue> = Vec::new();
        for _ in 0..100 {
            weather.update(16.0, &arena, &mut rng, &mut audio);
        }
        assert_eq!(weather.drops().len(), 10);
        assert!(weather.drops().iter().all(|drop| arena.contains(*drop)));
    }

    #[test]
    fn fast_rain_still_wraps_inside_the_arena() {
        let arena = Arena::new(350.0, 350.0);
        let mut rng = StdRng::seed_from_u64(12);
        let config = WeatherConfig {
            rain_drops: 60,
            rain_speed: 800.0,
            ..config()
        };
        let mut weather = Weather::new(&config, &arena, &mut rng);
        let mut audio: Vec<SoundCue> = Vec::new();
        for _ in 0..10 {
            weather.update(16.0, &arena, &mut rng, &mut audio);
        }
        let outside = weather
            .drops()
            .iter()
            .filter(|drop| !arena.contains(**drop))
            .count();
        assert_eq!(outside, 0);
    }

    #[test]
    fn lightning_is_silent_until_enabled() {
        let arena = Arena::new(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(10);
        let mut weather = Weather::new(&config(), &arena, &mut rng);
        let mut audio: Vec<SoundCue> = Vec::new();

        weather.update(1000.0, &arena, &mut rng, &mut audio);
        assert!(weather.is_flashing());
        assert!(audio.is_empty());

        weather.enable_sound();
        weather.update(1000.0, &arena, &mut rng, &mut audio);
        assert_eq!(audio, vec![SoundCue::Thunder]);
    }

    #[test]
    fn flash_fades_out() {
        let arena = Arena::new(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut weather = Weather::new(&config(), &arena, &mut rng);
        let mut audio: Vec<SoundCue> = Vec::new();
        weather.update(1000.0, &arena, &mut rng, &mut audio);
        assert_eq!(weather.flash_alpha(), 1.0);
        weather.update(100.0, &arena, &mut rng, &mut audio);
        assert_eq!(weather.flash_alpha(), 0.5);
        weather.update(100.0, &arena, &mut rng, &mut audio);
        assert!(!weather.is_flashing());
    }
}
