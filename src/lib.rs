// ==================== Imports ====================
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

pub mod browser;
pub mod engine;

pub mod arena;
pub mod collision;
pub mod config;
pub mod entity;
pub mod game;
pub mod sound;
pub mod spawner;
pub mod state;
pub mod weather;
pub mod world;

// TABLE:
// ┌──────────────────────────────────────────────────────────────────────────┐
// │                           Directory Structure                            │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ src/              │                                                      │
// │ ├── lib.rs        │ wasm entry point                                     │
// │ ├── browser.rs    │ DOM access, fetch, closures                          │
// │ ├── engine.rs     │ Game trait, GameLoop, Renderer, input, audio         │
// │ ├── game.rs       │ ZombieGuild : assets + drawing around the World      │
// │ ├── world.rs      │ per-tick orchestration                               │
// │ ├── state.rs      │ PREINTRO -> INTRO -> START -> RUNNING -> GAMEOVER    │
// │ ├── spawner.rs    │ timed enemy factory                                  │
// │ ├── collision.rs  │ bullet / zombie hit test                             │
// │ ├── weather.rs    │ rain + lightning                                     │
// │ ├── arena.rs      │ playfield bounds and edges                           │
// │ ├── config.rs     │ tunables (config.json)                               │
// │ ├── sound.rs      │ sound cues + AudioSink                               │
// │ └── entity/       │ Entity, Player + Shooting, Projectile, Enemy         │
// └───────────────────┴──────────────────────────────────────────────────────┘
// Only browser.rs, engine.rs and game.rs call into JavaScript, everything
// else runs (and is tested) natively.

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs panic hook + console logger
/// - loads assets, then starts the game loop
/// - a failed load is logged and the game never starts
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    // already installed only if the page called main_js twice
    let _ = console_log::init_with_level(log::Level::Info);

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = engine::GameLoop::start(game::ZombieGuild::new()).await {
            log::error!("{:#}", err);
            log::error!("Load failed");
        }
    });

    Ok(())
}
