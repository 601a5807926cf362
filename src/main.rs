//! Kickabout entry point
//!
//! Web: wires keyboard and on-screen controls into the input table and runs
//! the frame driver off `requestAnimationFrame`.
//! Native: headless run of a short scripted match into a CPU framebuffer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use kickabout::platform::{self, web};
    use kickabout::renderer::RenderState;
    use kickabout::{FrameDriver, Settings};

    /// Canvas the field is drawn on; its width/height define the field
    const CANVAS_ID: &str = "game-canvas";
    /// On-screen buttons, each carrying a `data-key` action tag
    const CONTROL_SELECTOR: &str = ".control-btn";

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        render_state: RenderState,
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Kickabout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = Settings::load();

        let touch = platform::show_touch_controls(&web::user_agent(), settings.touch_controls);
        web::set_touch_controls_visible(touch);
        if touch {
            log::info!("Touch device detected, on-screen controls enabled");
        } else {
            log::info!("Desktop detected, WASD/X controls enabled");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;
        let width = canvas.width();
        let height = canvas.height();

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let driver = FrameDriver::new(width as f32, height as f32, settings);
        let render_state =
            RenderState::new(surface, &adapter, width, height, driver.world().field.size())
                .await
                .map_err(js_err)?;

        let game = Rc::new(RefCell::new(Game {
            driver,
            render_state,
        }));

        setup_keyboard(&window, game.clone())?;
        setup_controls(&document, game.clone())?;
        setup_blur(&window, game.clone())?;

        request_animation_frame(game);

        log::info!("Kickabout running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut()
                    .driver
                    .input_mut()
                    .handle_key(&event.key(), pressed);
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_controls(document: &web_sys::Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        const PRESS: [(&str, bool); 6] = [
            ("touchstart", true),
            ("mousedown", true),
            ("touchend", false),
            ("touchcancel", false),
            ("mouseup", false),
            ("mouseleave", false),
        ];

        let buttons = document.query_selector_all(CONTROL_SELECTOR)?;
        let mut bound = 0;
        for i in 0..buttons.length() {
            let Some(button) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let Some(tag) = button.dataset().get("key") else {
                log::warn!("Control button without data-key, skipping");
                continue;
            };

            for (event_name, pressed) in PRESS {
                let game = game.clone();
                let tag = tag.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                    if event.type_().starts_with("touch") {
                        // Keep the browser from synthesizing mouse events
                        event.prevent_default();
                    }
                    game.borrow_mut()
                        .driver
                        .input_mut()
                        .handle_control(&tag, pressed);
                });
                button.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            bound += 1;
        }
        log::info!("Bound {bound} on-screen controls");
        Ok(())
    }

    /// Release everything when focus leaves, so no key stays stuck down
    fn setup_blur(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            game.borrow_mut().driver.input_mut().clear();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let Game {
                driver,
                render_state,
            } = &mut *g;
            driver.on_animation_frame(time, render_state);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Kickabout failed to start: {e:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use kickabout::driver::default_field;
    use kickabout::renderer::Framebuffer;
    use kickabout::{Action, FrameDriver, Settings};

    env_logger::init();
    log::info!("Kickabout (native, headless) starting...");

    // kickabout [settings.json] [snapshot.ppm]
    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(|path| Settings::load_file(std::path::Path::new(&path)))
        .unwrap_or_default();
    let snapshot = args.next();

    let field = default_field();
    let mut fb = Framebuffer::new(field.x as u32, field.y as u32)?;
    let mut driver = FrameDriver::new(field.x, field.y, settings);

    // (frames, held actions): kick off, chase right, cut back, rest
    let script: [(u32, &[Action]); 4] = [
        (1, &[Action::Kick]),
        (120, &[Action::Right]),
        (60, &[Action::Up, Action::Left]),
        (120, &[]),
    ];

    for (frames, held) in script {
        driver.input_mut().clear();
        for &action in held {
            driver.input_mut().set_pressed(action, true);
        }
        for _ in 0..frames {
            let report = driver.frame(1.0, &mut fb);
            if report.frame % 60 == 0 {
                let world = driver.world();
                log::info!(
                    "frame {}: player {:?}, ball {:?} vel {:?}",
                    report.frame,
                    world.player.pos,
                    world.ball.pos,
                    world.ball.vel
                );
            }
        }
    }

    if let Some(path) = snapshot {
        std::fs::write(&path, fb.to_ppm())?;
        log::info!("Wrote snapshot to {path}");
    }

    let world = driver.world();
    println!(
        "{} frames: player at ({:.1}, {:.1}), ball at ({:.1}, {:.1})",
        world.frame, world.player.pos.x, world.player.pos.y, world.ball.pos.x, world.ball.pos.y
    );
    Ok(())
}
