//! Croco Jump entry point
//!
//! Web: canvas 2D driver around the session. Native: headless autoplay run
//! that prints the result, handy for checking tuning and seeds.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

    use croco_jump::audio::WebSpeech;
    use croco_jump::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use croco_jump::persistence::LocalStore;
    use croco_jump::platform::web::AnimationFrameScheduler;
    use croco_jump::renderer::{DrawCommand, TextAlign};
    use croco_jump::sim::{GameOverReason, GamePhase};
    use croco_jump::{GameConfig, Session, SessionOptions, UiSnapshot, Variant};

    /// Player sprite for the phoneme variant
    const CROCO_IMAGE: &str = "assets/croco.jpg";

    /// Replays draw lists on a 2D context
    struct Canvas {
        ctx: CanvasRenderingContext2d,
        sprite: Option<HtmlImageElement>,
    }

    impl Canvas {
        fn draw(&self, commands: &[DrawCommand]) {
            for command in commands {
                if let Err(e) = self.draw_one(command) {
                    log::warn!("Draw error: {:?}", e);
                }
            }
        }

        fn draw_one(&self, command: &DrawCommand) -> Result<(), JsValue> {
            let ctx = &self.ctx;
            let (w, h) = (CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
            match command {
                DrawCommand::Fill { color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(0.0, 0.0, w, h);
                }
                DrawCommand::VerticalGradient { top, bottom } => {
                    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
                    gradient.add_color_stop(0.0, &top.to_css())?;
                    gradient.add_color_stop(1.0, &bottom.to_css())?;
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(0.0, 0.0, w, h);
                }
                DrawCommand::Rect {
                    pos,
                    size,
                    radius,
                    color,
                    outline,
                } => {
                    let (x, y) = (pos.x as f64, pos.y as f64);
                    let (rw, rh) = (size.x as f64, size.y as f64);
                    ctx.set_fill_style_str(&color.to_css());
                    if *radius <= 0.0 && outline.is_none() {
                        ctx.fill_rect(x, y, rw, rh);
                        return Ok(());
                    }
                    rounded_path(ctx, x, y, rw, rh, *radius as f64)?;
                    ctx.fill();
                    if let Some(outline) = outline {
                        ctx.set_stroke_style_str(&outline.to_css());
                        ctx.set_line_width(2.0);
                        ctx.stroke();
                    }
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    half,
                } => {
                    let end = if *half { PI } else { PI * 2.0 };
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, end)?;
                    ctx.fill();
                }
                DrawCommand::Text {
                    pos,
                    text,
                    size,
                    color,
                    align,
                } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.set_font(&format!("bold {}px Arial", size));
                    ctx.set_text_align(align.as_css());
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
                DrawCommand::Sprite {
                    center,
                    radius,
                    fallback,
                    glyph,
                } => {
                    let (cx, cy, r) = (center.x as f64, center.y as f64, *radius as f64);
                    match self.sprite.as_ref().filter(|img| img.complete()) {
                        Some(img) => {
                            ctx.save();
                            ctx.begin_path();
                            ctx.arc(cx, cy, r, 0.0, PI * 2.0)?;
                            ctx.clip();
                            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                                img,
                                cx - r,
                                cy - r,
                                r * 2.0,
                                r * 2.0,
                            )?;
                            ctx.restore();
                        }
                        None => {
                            ctx.set_fill_style_str(&fallback.to_css());
                            ctx.begin_path();
                            ctx.arc(cx, cy, r, 0.0, PI * 2.0)?;
                            ctx.fill();
                            ctx.set_font("bold 32px Arial");
                            ctx.set_text_align(TextAlign::Center.as_css());
                            ctx.fill_text(glyph, cx, cy + 10.0)?;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn rounded_path(
        ctx: &CanvasRenderingContext2d,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        r: f64,
    ) -> Result<(), JsValue> {
        let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r)?;
        ctx.arc_to(x + w, y + h, x, y + h, r)?;
        ctx.arc_to(x, y + h, x, y, r)?;
        ctx.arc_to(x, y, x + w, y, r)?;
        ctx.close_path();
        Ok(())
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Mirror the UI snapshot into the DOM HUD
    fn update_hud(document: &Document, ui: &UiSnapshot) {
        set_text(document, "hud-score", &ui.score.to_string());
        set_text(document, "hud-best", &ui.high_score.to_string());
        match ui.lives {
            Some(lives) => set_text(document, "hud-lives", &"❤".repeat(lives as usize)),
            None => set_visible(document, "hud-lives", false),
        }
        if let Some(pair) = &ui.pair {
            set_text(document, "hud-pair", pair);
        }
        if let Some(left) = ui.words_left {
            set_text(document, "hud-words", &left.to_string());
        }
        set_visible(document, "repeat-btn", ui.variant == Variant::Phoneme);
        set_visible(document, "pause-menu", ui.phase == GamePhase::Paused);
        set_visible(document, "game-over", ui.phase == GamePhase::GameOver);
        if ui.phase == GamePhase::GameOver {
            set_text(document, "final-score", &ui.score.to_string());
            let title = match ui.game_over_reason {
                Some(GameOverReason::WordsExhausted) => "Победа!",
                _ => "Игра окончена",
            };
            set_text(document, "final-title", title);
        }
    }

    fn on_click(
        document: &Document,
        id: &str,
        session: &Rc<RefCell<Session>>,
        action: fn(&mut Session),
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };
        let session = session.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            action(&mut session.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(session: &Rc<RefCell<Session>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), "ArrowLeft" | "ArrowRight") {
                    event.prevent_default();
                }
                session.borrow_mut().key_down(&event.key());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                session.borrow_mut().key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Auto-pause when the tab is hidden
        {
            let session = session.clone();
            let document = window.document().ok_or("no document")?;
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    session.borrow_mut().pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Croco Jump starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Variant and pair come from the page
        let variant = canvas
            .get_attribute("data-variant")
            .and_then(|v| v.parse::<Variant>().ok())
            .unwrap_or_default();
        let pair = canvas.get_attribute("data-pair");

        // Logical 400×600 scaled to the device pixels
        let dpr = window.device_pixel_ratio();
        canvas.set_width((CANVAS_WIDTH as f64 * dpr) as u32);
        canvas.set_height((CANVAS_HEIGHT as f64 * dpr) as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        ctx.scale(dpr, dpr)?;

        let sprite = match variant {
            Variant::Endless => None,
            Variant::Phoneme => HtmlImageElement::new()
                .ok()
                .inspect(|img| img.set_src(CROCO_IMAGE)),
        };
        let canvas = Rc::new(Canvas { ctx, sprite });

        let store = LocalStore::new();
        let config = GameConfig::load(&store, variant);
        let options = SessionOptions {
            config,
            seed: Some(js_sys::Date::now() as u64),
            pair,
        };

        let scheduler = AnimationFrameScheduler::new();
        let session = Session::new(
            options,
            Box::new(store),
            Box::new(WebSpeech::new()),
            Box::new(scheduler.clone()),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let session = Rc::new(RefCell::new(session));

        {
            let session = session.clone();
            let canvas = canvas.clone();
            scheduler.set_callback(move |time: f64| {
                let commands = session.borrow_mut().on_frame(time);
                canvas.draw(&commands);
            });
        }

        {
            let document = document.clone();
            session
                .borrow_mut()
                .subscribe(move |ui| update_hud(&document, ui));
        }

        session.borrow_mut().on_complete(|score| {
            log::info!("Run complete with score {}", score);
        });

        setup_input_handlers(&session)?;
        on_click(&document, "restart-btn", &session, Session::restart);
        on_click(&document, "repeat-btn", &session, Session::repeat_word);
        on_click(&document, "resume-btn", &session, Session::resume);
        on_click(&document, "quit-btn", &session, Session::quit);

        set_visible(&document, "loading", false);

        // First frame shows the waiting screen
        canvas.draw(&session.borrow().render());
        session.borrow_mut().start();

        log::info!("Croco Jump running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use croco_jump::consts::SIM_DT;
    use croco_jump::persistence::MemoryStore;
    use croco_jump::platform::{ManualScheduler, RecordingSpeech};
    use croco_jump::sim::autopilot;
    use croco_jump::{Session, SessionOptions, Variant};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Stop a run that never ends after ten minutes of game time
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let variant = args
        .next()
        .and_then(|v| v.parse::<Variant>().ok())
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    log::info!("Croco Jump (native) headless autoplay: {}", variant.as_str());

    let frames = ManualScheduler::new();
    let speech = RecordingSpeech::new();
    let mut options = SessionOptions::new(variant);
    options.seed = seed;

    let mut session = match Session::new(
        options,
        Box::new(MemoryStore::new()),
        Box::new(speech.clone()),
        Box::new(frames.clone()),
    ) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    let final_score = Rc::new(Cell::new(None));
    {
        let final_score = final_score.clone();
        session.on_complete(move |score| final_score.set(Some(score)));
    }

    session.start();
    // Any key starts a waiting run
    session.key_down("ArrowRight");

    let frame_ms = SIM_DT as f64 * 1000.0;
    let mut time = 0.0;
    let mut delivered = 0;
    while frames.take_pending().is_some() && delivered < MAX_FRAMES {
        let input = autopilot(session.state());
        for (held, key) in [(input.left, "ArrowLeft"), (input.right, "ArrowRight")] {
            if held {
                session.key_down(key);
            } else {
                session.key_up(key);
            }
        }
        session.on_frame(time);
        time += frame_ms;
        delivered += 1;
    }

    let state = session.state();
    println!("variant:     {}", variant.as_str());
    println!("seed:        {}", state.seed);
    println!("ticks:       {}", state.time_ticks);
    println!("score:       {}", state.score);
    if let Some(lives) = state.lives {
        println!("lives:       {}", lives);
    }
    if let Some(pair) = session.phonemes().map(|p| p.pair.as_str()) {
        println!("pair:        {}", pair);
        println!("words heard: {}", speech.spoken().len());
    }
    match final_score.get() {
        Some(score) => println!("finished:    {:?} ({})", state.game_over_reason, score),
        None => println!("finished:    stopped after {} frames", delivered),
    }
}
