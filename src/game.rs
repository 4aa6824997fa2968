use crate::browser;
use crate::config::GameConfig;
use crate::engine::{self, input::InputState, Audio, Game, Point, Rect, Renderer, Size, FRAME_SIZE};
use crate::entity::EnemyKind;
use crate::state::{GameState, Overlay};
use crate::world::World;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use futures::join;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use web_sys::HtmlImageElement;

/// TABLE
/// ┌───────────────────── Game Architecture Overview ────────────────────────┐
/// │                                                                         │
/// │    ┌─────────────┐          ┌─────────────┐          ┌─────────────┐    │
/// │    │  engine.rs  │  update  │   game.rs   │   tick   │  world.rs   │    │
/// │    │  GameLoop   ├─────────►│ ZombieGuild ├─────────►│   World     │    │
/// │    └─────────────┘          └──────┬──────┘          └──────┬──────┘    │
/// │                                    │ draw                   │ reads     │
/// │                              ┌─────┴──────┐                 │           │
/// │                              │  Renderer  │◄────────────────┘           │
/// │                              └────────────┘                             │
/// │                                                                         │
/// ├──────────────────────── Call Sequence ──────────────────────────────────┤
/// │                                                                         │
/// │  1. every confirm (click) since last step -> World::confirm()           │
/// │  2. World::tick() with the fixed frame size as delta                    │
/// │  3. draw reads the world, never writes it                               │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
pub enum ZombieGuild {
    /// Initialize state while resources are being loaded
    /// Transition to `Loaded` once initialization is complete
    Loading,

    /// Assets loaded, world running
    Loaded(Guild),
}

pub struct Guild {
    world: World,
    audio: Audio,
    sprites: Sprites,
}

struct Sprites {
    hero: HtmlImageElement,
    bullet: HtmlImageElement,
    rain: HtmlImageElement,
    zombies: HashMap<EnemyKind, HtmlImageElement>,
}

// canvas colours
const BACKGROUND: &str = "#312a2b";
const TEXT: &str = "#ffffff";
const HEALTH_BACK: &str = "#5a1010";
const HEALTH_FRONT: &str = "#d62c2c";
const FLASH: &str = "#dfe8ff";

impl ZombieGuild {
    const CONFIG_PATH: &'static str = "config.json";
    const HERO_PATH: &'static str = "assets/hero_male.png";
    const BULLET_PATH: &'static str = "assets/bullet.png";
    const RAIN_PATH: &'static str = "assets/rain.png";

    pub fn new() -> Self {
        ZombieGuild::Loading
    }

    /// A missing config is not fatal, an invalid one is
    async fn load_config() -> Result<GameConfig> {
        let config = match browser::fetch_json::<GameConfig>(Self::CONFIG_PATH).await {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "No usable {} ({:#}), falling back to defaults",
                    Self::CONFIG_PATH,
                    err
                );
                GameConfig::default()
            }
        };
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", Self::CONFIG_PATH))?;
        Ok(config)
    }

    async fn load_sprite(path: &str) -> Result<HtmlImageElement> {
        engine::load_image(path)
            .await
            .with_context(|| format!("Failed to load sprite image resource from : {}", path))
    }

    async fn load_zombies() -> Result<HashMap<EnemyKind, HtmlImageElement>> {
        let paths: Vec<String> = EnemyKind::ALL
            .iter()
            .map(|kind| format!("assets/{}.png", kind.name()))
            .collect();
        let images = try_join_all(paths.iter().map(|path| Self::load_sprite(path))).await?;
        Ok(EnemyKind::ALL.into_iter().zip(images).collect())
    }
}

impl Default for ZombieGuild {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Game for ZombieGuild {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            ZombieGuild::Loading => {
                log::info!("loading...");
                // independent resources load simultaneously, total time is
                // the slowest one
                let (config, hero, bullet, rain, zombies) = join!(
                    Self::load_config(),
                    Self::load_sprite(Self::HERO_PATH),
                    Self::load_sprite(Self::BULLET_PATH),
                    Self::load_sprite(Self::RAIN_PATH),
                    Self::load_zombies(),
                );
                let sprites = Sprites {
                    hero: hero?,
                    bullet: bullet?,
                    rain: rain?,
                    zombies: zombies?,
                };
                let config = config?;
                let audio = Audio::new()?;
                let world = World::new(&config, StdRng::from_entropy());
                log::info!("loaded");
                Ok(Box::new(ZombieGuild::Loaded(Guild {
                    world,
                    audio,
                    sprites,
                })))
            }
            ZombieGuild::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, input: &InputState) {
        if let ZombieGuild::Loaded(guild) = self {
            for _ in 0..input.confirms() {
                guild.world.confirm(&mut guild.audio);
            }
            guild.world.tick(FRAME_SIZE, input, &mut guild.audio);
        }
    }

    fn draw(&mut self, renderer: &Renderer) {
        if let ZombieGuild::Loaded(guild) = self {
            guild.draw(renderer);
        }
    }
}

fn sprite_size(image: &HtmlImageElement, scale: f64) -> Size {
    Size {
        width: image.natural_width() as f64 * scale,
        height: image.natural_height() as f64 * scale,
    }
}

impl Guild {
    // Draw order matters : background -> rain -> actors -> hud -> overlays
    fn draw(&self, renderer: &Renderer) {
        let world = &self.world;
        renderer.clear(&world.arena().bounds(), BACKGROUND);

        for drop in world.weather().drops() {
            let size = sprite_size(&self.sprites.rain, 1.0);
            renderer.draw_image(&self.sprites.rain, &Rect::centered(*drop, size), 0.0);
        }

        let player = world.player();
        for enemy in world.enemies() {
            if let Some(image) = self.sprites.zombies.get(&enemy.kind()) {
                let size = sprite_size(image, enemy.entity.scale);
                renderer.draw_image(
                    image,
                    &Rect::centered(enemy.position(), size),
                    enemy.rotation_towards(player.position()),
                );
            }
        }

        for bullet in player.shooting.bullets() {
            let size = sprite_size(&self.sprites.bullet, bullet.entity.scale);
            renderer.draw_image(
                &self.sprites.bullet,
                &Rect::centered(bullet.position(), size),
                bullet.rotation(),
            );
        }

        let size = sprite_size(&self.sprites.hero, player.scale());
        renderer.draw_image(
            &self.sprites.hero,
            &Rect::centered(player.position(), size),
            player.rotation(),
        );

        if matches!(world.state(), GameState::Running | GameState::GameOver) {
            self.draw_hud(renderer);
        }

        if world.weather().is_flashing() {
            renderer.set_alpha(world.weather().flash_alpha() * 0.6);
            renderer.fill_rect(&world.arena().bounds(), FLASH);
            renderer.set_alpha(1.0);
        }

        if let Some(overlay) = world.overlay() {
            self.draw_overlay(renderer, overlay);
        }
    }

    fn draw_hud(&self, renderer: &Renderer) {
        let player = self.world.player();
        let arena = self.world.arena();
        let full = Rect::new(
            Point::new(10.0, arena.height - 18.0),
            Size {
                width: arena.width - 20.0,
                height: 8.0,
            },
        );
        let ratio = player.health() as f64 / player.max_health().max(1) as f64;
        let current = Rect::new(
            full.position,
            Size {
                width: full.size.width * ratio,
                height: full.size.height,
            },
        );
        renderer.fill_rect(&full, HEALTH_BACK);
        renderer.fill_rect(&current, HEALTH_FRONT);
        renderer.draw_text(
            &format!("Kills: {}", self.world.kills()),
            Point::new(arena.width / 2.0, arena.height - 36.0),
            "14px monospace",
            TEXT,
        );
    }

    fn draw_overlay(&self, renderer: &Renderer, overlay: Overlay) {
        let center_x = self.world.arena().width / 2.0;
        renderer.draw_text(
            Overlay::TITLE,
            Point::new(center_x, 0.0),
            "bold 36px monospace",
            TEXT,
        );
        renderer.draw_text(
            overlay.subtitle(),
            Point::new(center_x, 50.0),
            "20px monospace",
            TEXT,
        );
        if overlay == Overlay::GameOver {
            renderer.draw_text(
                &format!("{} zombies put to rest", self.world.kills()),
                Point::new(center_x, 80.0),
                "16px monospace",
                TEXT,
            );
        }
    }
}
