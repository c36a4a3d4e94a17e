use crate::browser;
use crate::config::Config;
use crate::engine::{self, Game, Rect, Renderer};
use crate::grid::Point;
use crate::sprite::player::Command;
use crate::sprite::Sprite;
use crate::world::World;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use web_sys::HtmlImageElement;

/// TABLE
/// ┌──────────────────── Host / core split ──────────────────────────┐
/// │  engine.rs  GameLoop   ── key-up codes ──►  handle_key()        │
/// │                        ── 1/60 s steps ──►  update(dt)          │
/// │                        ── once a frame ──►  draw()              │
/// │                                                                 │
/// │  game.rs    BugsBugsBugs  maps keys to Commands, owns images    │
/// │  world.rs   World         the simulation, knows nothing of web  │
/// └─────────────────────────────────────────────────────────────────┘
pub enum BugsBugsBugs {
    /// Config and images are still loading
    Loading,
    /// Ready to play
    Loaded(Board),
}

pub struct Board {
    world: World,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl BugsBugsBugs {
    const CONFIG_PATH: &'static str = "config.json";

    pub fn new() -> Self {
        BugsBugsBugs::Loading
    }

    /// A missing or broken config.json is not fatal, the defaults are the
    /// classic game
    async fn load_config() -> Config {
        match browser::fetch_json::<Config>(Self::CONFIG_PATH).await {
            Ok(config) => {
                log::info!("loaded {}", Self::CONFIG_PATH);
                config
            }
            Err(err) => {
                log::warn!(
                    "using default config, could not load {} : {:#}",
                    Self::CONFIG_PATH,
                    err
                );
                Config::default()
            }
        }
    }

    async fn load_sprite(sprite: Sprite) -> Result<(Sprite, HtmlImageElement)> {
        let image = engine::load_image(sprite.path())
            .await
            .with_context(|| format!("Failed to load sprite image from : {}", sprite.path()))?;
        Ok((sprite, image))
    }
}

impl Default for BugsBugsBugs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Game for BugsBugsBugs {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            BugsBugsBugs::Loading => {
                let config = Self::load_config().await;
                let images = try_join_all(Sprite::ALL.iter().map(|sprite| Self::load_sprite(*sprite)))
                    .await?
                    .into_iter()
                    .collect();
                let world = World::new(config, StdRng::from_entropy())?;
                Ok(Box::new(BugsBugsBugs::Loaded(Board { world, images })))
            }
            BugsBugsBugs::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn handle_key(&mut self, code: &str) {
        if let BugsBugsBugs::Loaded(board) = self {
            if let Some(command) = command_for(code) {
                board.world.handle_input(command);
            }
        }
    }

    fn update(&mut self, dt: f64) {
        if let BugsBugsBugs::Loaded(board) = self {
            board.world.update(dt);
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let BugsBugsBugs::Loaded(board) = self {
            board.draw(renderer);
        }
    }
}

impl Board {
    fn draw(&self, renderer: &Renderer) {
        let config = self.world.config();
        let (width, height) = renderer.size();
        renderer.set_scale(1.0);
        renderer.clear(&Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        });
        renderer.set_scale(config.scaling_factor);

        // Draw order matters : background -> entities -> messages
        for row in 0..config.num_rows {
            for col in 0..config.num_cols {
                let point = Point {
                    x: f64::from(col) * config.col_width,
                    y: f64::from(row) * config.row_height,
                };
                self.draw_sprite(tile_for(row, config.num_rows), point, renderer);
            }
        }

        let frame = self.world.render();
        for drawable in &frame.drawables {
            self.draw_sprite(drawable.sprite, drawable.point, renderer);
        }

        let centre = width / config.scaling_factor / 2.0;
        if let Some(title) = frame.banner.title() {
            renderer.draw_text(title, 36, centre, config.row_height * 2.0 - 55.0);
        }
        let bottom = height / config.scaling_factor - 30.0;
        renderer.draw_text(&frame.banner.to_string(), 18, centre, bottom);
    }

    fn draw_sprite(&self, sprite: Sprite, point: Point, renderer: &Renderer) {
        match self.images.get(&sprite) {
            Some(image) => renderer.draw_image(image, point),
            None => log::warn!("no image loaded for {:?}", sprite),
        }
    }
}

/// Arrow keys move, Space selects; everything else is ignored
pub fn command_for(code: &str) -> Option<Command> {
    match code {
        "ArrowUp" => Some(Command::Up),
        "ArrowDown" => Some(Command::Down),
        "ArrowLeft" => Some(Command::Left),
        "ArrowRight" => Some(Command::Right),
        "Space" => Some(Command::Select),
        _ => None,
    }
}

/// Water on the goal row, grass on the last two rows, road in between
fn tile_for(row: i32, num_rows: i32) -> Sprite {
    if row == 0 {
        Sprite::WaterBlock
    } else if row >= num_rows - 2 {
        Sprite::GrassBlock
    } else {
        Sprite::StoneBlock
    }
}
