use crate::browser;
use crate::sound::{AudioSink, SoundCue};
use anyhow::{anyhow, Error, Result};
// web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - because we control the closure creation and specify the expected type,
    // in principle this should be generally safe (unsafe) code
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlImageElement};

use self::input::InputState;

/// TABLE
/// ┌──────────────────────── Frame Flow ────────────────────────────┐
/// │                                                                │
/// │  requestAnimationFrame ──► GameLoop ──► Game::update() x N     │
/// │                                │             (fixed steps)     │
/// │                                └──────► Game::draw() x 1       │
/// │                                                                │
/// │  DOM listeners ──► mpsc channel ──► InputState (once per step) │
/// └────────────────────────────────────────────────────────────────┘
#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, input: &InputState);
    fn draw(&mut self, renderer: &Renderer);
}

// length of a frame in milliseconds
pub const FRAME_SIZE: f64 = 1.0 / 60.0 * 1000.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f64,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut receiver = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut input = InputState::default();
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
            game_loop.accumulated_delta += perf - game_loop.last_frame;
            while game_loop.accumulated_delta > FRAME_SIZE {
                input::process_input(&mut input, &mut receiver);
                game.update(&input);
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);
            if let Some(callback) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(callback) {
                    log::error!("GameLoop stopped : {:#}", err);
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

// ==================== Geometry ====================
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, `None` for the zero vector
    pub fn normalized(&self) -> Option<Point> {
        let length = self.length();
        if length > f64::EPSILON {
            Some(Point::new(self.x / length, self.y / length))
        } else {
            None
        }
    }

    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    /// Rect of `size` centered on `center`
    pub fn centered(center: Point, size: Size) -> Self {
        Rect {
            position: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }
}

// ==================== Rendering ====================
pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect, color: &str) {
        self.context.set_global_alpha(1.0);
        self.fill_rect(rect, color);
    }

    pub fn fill_rect(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            rect.position.x,
            rect.position.y,
            rect.size.width,
            rect.size.height,
        );
    }

    /// Draw `image` scaled to `destination`, rotated by `rotation` radians
    /// around the destination center
    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect, rotation: f64) {
        let center = Point::new(
            destination.position.x + destination.size.width / 2.0,
            destination.position.y + destination.size.height / 2.0,
        );
        self.context.save();
        let result = self
            .context
            .translate(center.x, center.y)
            .and_then(|_| self.context.rotate(rotation))
            .and_then(|_| {
                self.context
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        image,
                        -destination.size.width / 2.0,
                        -destination.size.height / 2.0,
                        destination.size.width,
                        destination.size.height,
                    )
            });
        self.context.restore();
        if let Err(err) = result {
            log::warn!("Renderer: draw_image failed : {:#?}", err);
        }
    }

    pub fn draw_text(&self, text: &str, position: Point, font: &str, color: &str) {
        self.context.set_font(font);
        self.context.set_text_align("center");
        self.context.set_text_baseline("top");
        self.context.set_fill_style_str(color);
        if let Err(err) = self.context.fill_text(text, position.x, position.y) {
            log::warn!("Renderer: fill_text failed : {:#?}", err);
        }
    }

    pub fn set_alpha(&self, alpha: f64) {
        self.context.set_global_alpha(alpha);
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine.rs::load_image] Error loading image: {:#?}",
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
    // - first ? yields channel result : Result<(), Error>
    // - second ? yields image load result : () or propagating Error
    rx.await??;

    Ok(image)
}

// ==================== Audio ====================
/// One `<audio>` element per cue, created up front
pub struct Audio {
    tracks: HashMap<SoundCue, HtmlAudioElement>,
}

impl Audio {
    pub fn new() -> Result<Self> {
        let mut tracks = HashMap::new();
        for cue in SoundCue::ALL {
            let element = browser::create_audio_element(cue.path())?;
            element.set_loop(cue.looping());
            element.set_volume(cue.volume());
            tracks.insert(cue, element);
        }
        Ok(Audio { tracks })
    }
}

impl AudioSink for Audio {
    fn play(&mut self, cue: SoundCue) {
        let Some(element) = self.tracks.get(&cue) else {
            return;
        };
        if !cue.looping() {
            element.set_current_time(0.0);
        }
        // fire and forget, autoplay rejections only reach the console
        if let Err(err) = element.play() {
            log::warn!("Audio: could not play {:?} : {:#?}", cue, err);
        }
    }
}

// ==================== Input ====================
pub mod input {
    use super::Point;
    use crate::browser;
    use anyhow::{anyhow, Result};
    use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
    use std::collections::HashSet;
    use wasm_bindgen::JsCast;
    use web_sys::{KeyboardEvent, MouseEvent};

    /// Raw DOM events, listeners only ever enqueue these
    #[derive(Debug, Clone, PartialEq)]
    pub enum KeyPress {
        KeyDown(String),
        KeyUp(String),
        PointerMove(Point),
        PointerDown(Point),
        PointerUp,
        Confirm,
    }

    /// Snapshot of the held keys and pointer, read by the game once per step
    #[derive(Debug, Default, Clone)]
    pub struct InputState {
        pressed_keys: HashSet<String>,
        pointer: Point,
        pointer_down: bool,
        confirms: u32,
    }

    impl InputState {
        pub fn is_pressed(&self, code: &str) -> bool {
            self.pressed_keys.contains(code)
        }

        pub fn set_pressed(&mut self, code: &str) {
            self.pressed_keys.insert(code.to_string());
        }

        pub fn set_released(&mut self, code: &str) {
            self.pressed_keys.remove(code);
        }

        pub fn pointer(&self) -> Point {
            self.pointer
        }

        pub fn set_pointer(&mut self, pointer: Point) {
            self.pointer = pointer;
        }

        pub fn is_pointer_down(&self) -> bool {
            self.pointer_down
        }

        pub fn set_pointer_down(&mut self, down: bool) {
            self.pointer_down = down;
        }

        /// Confirm actions received since the previous step
        pub fn confirms(&self) -> u32 {
            self.confirms
        }

        pub fn push_confirm(&mut self) {
            self.confirms += 1;
        }

        /// Apply one queued event
        pub fn apply(&mut self, event: KeyPress) {
            match event {
                KeyPress::KeyDown(code) => self.set_pressed(&code),
                KeyPress::KeyUp(code) => self.set_released(&code),
                KeyPress::PointerMove(point) => self.set_pointer(point),
                KeyPress::PointerDown(point) => {
                    self.set_pointer(point);
                    self.set_pointer_down(true);
                }
                KeyPress::PointerUp => self.set_pointer_down(false),
                KeyPress::Confirm => self.push_confirm(),
            }
        }
    }

    /// Drain the channel into `state`, confirms only live for one step
    pub fn process_input(state: &mut InputState, receiver: &mut UnboundedReceiver<KeyPress>) {
        state.confirms = 0;
        while let Ok(event) = receiver.try_recv() {
            state.apply(event);
        }
    }

    fn pointer_of(event: &MouseEvent) -> Point {
        Point::new(event.offset_x() as f64, event.offset_y() as f64)
    }

    fn listen<E, F>(
        target: &web_sys::EventTarget,
        kind: &str,
        sender: &UnboundedSender<KeyPress>,
        map: F,
    ) -> Result<()>
    where
        E: JsCast + 'static,
        F: Fn(&E) -> KeyPress + 'static,
    {
        let sender = sender.clone();
        let callback = browser::closure_wrap(Box::new(move |event: web_sys::Event| {
            if let Some(event) = event.dyn_ref::<E>() {
                // receiver gone means the loop is gone, nothing left to notify
                let _ = sender.unbounded_send(map(event));
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("Could not listen for '{}' : {:#?}", kind, err))?;
        // listeners live as long as the page
        callback.forget();
        Ok(())
    }

    /// Wire keyboard and pointer listeners to a channel
    pub fn prepare_input() -> Result<UnboundedReceiver<KeyPress>> {
        let (sender, receiver) = unbounded();
        let window = browser::window()?;
        let canvas = browser::canvas()?;
        let document = browser::document()?;

        listen(&window, "keydown", &sender, |event: &KeyboardEvent| {
            KeyPress::KeyDown(event.code())
        })?;
        listen(&window, "keyup", &sender, |event: &KeyboardEvent| {
            KeyPress::KeyUp(event.code())
        })?;
        listen(&canvas, "mousemove", &sender, |event: &MouseEvent| {
            KeyPress::PointerMove(pointer_of(event))
        })?;
        listen(&canvas, "mousedown", &sender, |event: &MouseEvent| {
            KeyPress::PointerDown(pointer_of(event))
        })?;
        listen(&window, "mouseup", &sender, |_: &MouseEvent| KeyPress::PointerUp)?;
        listen(&document, "click", &sender, |_: &MouseEvent| {
            KeyPress::Confirm
        })?;

        Ok(receiver)
    }

}
