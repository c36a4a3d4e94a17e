use crate::browser;
use crate::grid::Point;
use anyhow::{anyhow, Error, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we create the closure and pick its type, so the cast holds
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, KeyboardEvent};

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// One key-up edge, identified by `KeyboardEvent.code`
    fn handle_key(&mut self, code: &str);
    /// `dt` in seconds
    fn update(&mut self, dt: f64);
    fn draw(&self, renderer: &Renderer);
}

// length of a frame in milliseconds
const FRAME_SIZE: f64 = 1.0 / 60.0 * 1000.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f64,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// Runs forever on requestAnimationFrame:
    /// - key-ups queued since the last frame go to the game first
    /// - then fixed 1/60 s update steps until the frame time is used up
    /// - then one draw
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut keys = prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer {
            context: browser::context()?,
        };
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            for code in drain_keys(&mut keys) {
                game.handle_key(&code);
            }
            game_loop.accumulated_delta += perf - game_loop.last_frame;
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(FRAME_SIZE / 1000.0);
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);
            if let Some(next) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(next) {
                    log::error!("game loop stopped: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

fn prepare_input() -> Result<UnboundedReceiver<String>> {
    let (sender, receiver) = unbounded();
    let onkeyup = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        let _ = sender.unbounded_send(event.code());
    }) as Box<dyn FnMut(KeyboardEvent)>);
    browser::document()?.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
    // listener lives as long as the page
    onkeyup.forget();
    Ok(receiver)
}

fn drain_keys(receiver: &mut UnboundedReceiver<String>) -> Vec<String> {
    let mut codes = Vec::new();
    while let Ok(code) = receiver.try_recv() {
        codes.push(code);
    }
    codes
}

pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    /// Canvas size in unscaled pixels
    pub fn size(&self) -> (f64, f64) {
        self.context
            .canvas()
            .map(|canvas| (f64::from(canvas.width()), f64::from(canvas.height())))
            .unwrap_or((0.0, 0.0))
    }

    pub fn set_scale(&self, factor: f64) {
        if let Err(err) = self
            .context
            .set_transform(factor, 0.0, 0.0, factor, 0.0, 0.0)
        {
            log::warn!("Could not scale canvas : {:#?}", err);
        }
    }

    pub fn draw_image(&self, image: &HtmlImageElement, point: Point) {
        if let Err(err) = self
            .context
            .draw_image_with_html_image_element(image, point.x, point.y)
        {
            log::error!("Drawing is throwing exceptions : {:#?}", err);
        }
    }

    /// Yellow Impact text with a black outline, centred on `x`
    pub fn draw_text(&self, text: &str, points: u32, x: f64, y: f64) {
        self.context.set_font(&format!("{}pt Impact", points));
        self.context.set_fill_style_str("yellow");
        self.context.set_text_align("center");
        self.context.set_stroke_style_str("black");
        self.context.set_line_width(2.0);
        let drawn = self
            .context
            .fill_text(text, x, y)
            .and_then(|_| self.context.stroke_text(text, x, y));
        if let Err(err) = drawn {
            log::error!("Could not draw text '{}' : {:#?}", text, err);
        }
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let source_name = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine.rs::load_image] Error loading image {}: {:#?}",
                source_name,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // ?? - Result<Result<(), Error>, oneshot::Canceled>
    // - first ? yields the channel result
    // - second ? yields the image load result
    rx.await??;

    Ok(image)
}
