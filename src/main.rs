//! arplace - tap-to-place interaction core with a desktop simulator.
//!
//! The core (`scene`, `tracking`, `placement`, `interaction`) is windowing
//! agnostic; `app` drives it from a winit window painted through `render`,
//! or from a JSON replay script.

mod app;
mod config;
mod interaction;
mod placement;
mod render;
mod scene;
mod tracking;
mod ui;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(err) = app::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
