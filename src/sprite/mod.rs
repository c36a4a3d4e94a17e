// TABLE:
// ┌──────────────────────────────────────────────────────────────────────────┐
// │                          sprite/ layout                                  │
// ├────────────────┬─────────────────────────────────────────────────────────┤
// │ mod.rs         │ Sprite ids + image paths, Shape trait, Drawable         │
// │ state.rs       │ StateTag, PlayerState (timer/sprite/offset), StateStack │
// │ player.rs      │ Player state machine (idle ... bonus)                   │
// │ enemy.rs       │ Bugs crossing the road, wrap at the right edge          │
// │ bonus.rs       │ Gems and keys shown for a window of the round clock     │
// └────────────────┴─────────────────────────────────────────────────────────┘
pub mod bonus;
pub mod enemy;
pub mod player;
pub mod state;

use crate::grid::{Point, Position};
use serde::{Deserialize, Serialize};

/// Every image the game draws. The host preloads [`Sprite::ALL`] and looks
/// them up by id when drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sprite {
    EnemyBug,
    CharBoy,
    CharCatGirl,
    CharHornGirl,
    CharPinkGirl,
    CharPrincessGirl,
    Crash,
    Splash,
    Heart,
    Star,
    GemBlue,
    GemGreen,
    GemOrange,
    Key,
    WaterBlock,
    StoneBlock,
    GrassBlock,
}

/// Characters offered on the selection screen, in cycling order
pub const CHARACTERS: [Sprite; 5] = [
    Sprite::CharBoy,
    Sprite::CharCatGirl,
    Sprite::CharHornGirl,
    Sprite::CharPinkGirl,
    Sprite::CharPrincessGirl,
];

impl Sprite {
    pub const ALL: [Sprite; 17] = [
        Sprite::EnemyBug,
        Sprite::CharBoy,
        Sprite::CharCatGirl,
        Sprite::CharHornGirl,
        Sprite::CharPinkGirl,
        Sprite::CharPrincessGirl,
        Sprite::Crash,
        Sprite::Splash,
        Sprite::Heart,
        Sprite::Star,
        Sprite::GemBlue,
        Sprite::GemGreen,
        Sprite::GemOrange,
        Sprite::Key,
        Sprite::WaterBlock,
        Sprite::StoneBlock,
        Sprite::GrassBlock,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::CharBoy => "images/char-boy.png",
            Sprite::CharCatGirl => "images/char-cat-girl.png",
            Sprite::CharHornGirl => "images/char-horn-girl.png",
            Sprite::CharPinkGirl => "images/char-pink-girl.png",
            Sprite::CharPrincessGirl => "images/char-princess-girl.png",
            Sprite::Crash => "images/crash.png",
            Sprite::Splash => "images/splash.png",
            Sprite::Heart => "images/Heart.png",
            Sprite::Star => "images/Star.png",
            Sprite::GemBlue => "images/Gem Blue.png",
            Sprite::GemGreen => "images/Gem Green.png",
            Sprite::GemOrange => "images/Gem Orange.png",
            Sprite::Key => "images/Key.png",
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
        }
    }
}

/// One image to blit at a canvas point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub sprite: Sprite,
    pub point: Point,
}

/// What the world needs from anything that sits on the grid.
/// - position() -> where it is for collisions
/// - render()   -> what to draw, None while hidden
pub trait Shape {
    fn position(&self) -> Position;
    fn render(&self) -> Option<Drawable>;
}
