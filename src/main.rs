// What you SEE:
// • A white 900x600 canvas on the left, a control column on the right.
// • Pick a tool (BRUSH, ERASER, RECTANGLE, CIRCLE, LINE, FILL), a color swatch
//   or nudge R/G/B, SIZE and OPACITY with the -/+ buttons.
// • Drag on the canvas to draw onto the highlighted layer.
// • ADD stacks a new transparent layer on top, REMOVE drops the active one
//   (never the last), click a LAYER row to draw on it; UP/DN scroll the rows.
//
// Optional settings: `layer-sketch [path/to/config.toml]`, or a
// `layer-sketch.toml` in the working directory. RUST_LOG sets the log level.

mod app;
mod config;
mod draw;
mod error;
mod gesture;
mod input;
mod panel;
mod raster;
mod stack;
mod style;
mod surface;
mod tool;
mod types;
mod ui;

use app::App;
use config::Config;
use draw::Drawer;
use error::Error;
use types::FrameBuffer;

const TARGET_FPS: usize = 60;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::resolve(std::env::args_os().nth(1).map(Into::into))?;
    let mut app = App::new(&config);

    /* --- Window + reusable screen buffer ---
       Visual: window opens with a blank canvas and the controls. */
    let (w, h) = app.layout().window_size();
    let mut drawer = Drawer::new(&config.title, w, h, TARGET_FPS)?;
    let mut screen = FrameBuffer::filled(w, h, ui::CANVAS_BACKGROUND);
    log::info!(
        "Canvas {}x{}, tool {}, {} layer rows visible",
        config.canvas.width,
        config.canvas.height,
        app.tools().active(),
        app.layout().visible_rows(),
    );

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        // 1) Input: presses, drags and clicks since last frame.
        app.handle_mouse(drawer.mouse_pos(), drawer.left_mouse_down());

        // 2) Layers bottom-up over white, then the control column.
        app.render(&mut screen);

        // 3) Present (this is when the on-screen image updates).
        drawer.present(&screen)?;
    }

    log::info!("Window closed with {} layer(s)", app.stack().len());
    Ok(())
}
