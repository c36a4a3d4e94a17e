//! Browser smoke tests, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use bugs_bugs_bugs::{Command, Config, StateTag, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn world_runs_inside_the_browser() {
    let mut world = World::new(Config::default(), StdRng::from_entropy()).expect("valid config");
    world.handle_input(Command::Select);
    world.handle_input(Command::Select);
    for _ in 0..60 {
        world.update(1.0 / 60.0);
    }
    assert!(world.player().stack().bottom().tag().is_base());
    assert_ne!(world.player().state(), StateTag::Selecting);
}

#[wasm_bindgen_test]
fn frame_has_a_banner_and_sprites() {
    let world = World::new(Config::default(), StdRng::seed_from_u64(3)).expect("valid config");
    let frame = world.render();
    assert!(!frame.drawables.is_empty());
    assert_eq!(frame.banner.title(), Some("Bugs, Bugs, Bugs!"));
}
