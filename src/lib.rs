// ==================== Imports ====================
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

mod browser;
mod engine;
mod game;

pub mod clock;
pub mod config;
pub mod grid;
pub mod sprite;
pub mod world;

pub use clock::GameClock;
pub use config::Config;
pub use sprite::player::{Command, Player, RoundEvent};
pub use sprite::state::StateTag;
pub use world::{Banner, Frame, World};

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs panic hook and console logger
/// - loads config + images
/// - starts the game loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    if let Err(err) = browser::init_logger(log::LevelFilter::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("{:#}", err)));
    }

    // wasm has no threads; the loop runs as a local task driven by
    // requestAnimationFrame
    browser::spawn_local(async move {
        let game = game::BugsBugsBugs::new();
        if let Err(err) = engine::GameLoop::start(game).await {
            log::error!("Could not start game : {:#}", err);
        }
    });

    Ok(())
}
