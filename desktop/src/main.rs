use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::prelude::Size;
use miniscreen_core::{
    application::Application,
    display::{HEIGHT, WIDTH},
    icons::VERSION,
};
use thiserror::Error;

use crate::display::MinifbDisplay;
use crate::status::StatusMonitor;

mod assets;
mod cli;
mod display;
mod locks;
mod menus;
mod status;
mod toggle;

#[derive(Debug, Error)]
enum DesktopError {
    #[error("bad arguments: {0}")]
    Args(#[from] cli::ArgsError),
    #[error("unable to open window: {0}")]
    Window(#[from] minifb::Error),
    #[error("unable to build menu: {0}")]
    Menu(#[from] miniscreen_core::error::Error),
}

fn run() -> Result<(), DesktopError> {
    let args = cli::parse(std::env::args().skip(1))?;
    log::info!("Miniscreen desktop {} started", VERSION);

    let window = minifb::Window::new(
        "Miniscreen",
        WIDTH as usize,
        HEIGHT as usize,
        minifb::WindowOptions {
            scale: args.scale,
            ..minifb::WindowOptions::default()
        },
    )?;
    let mut display = MinifbDisplay::new(window);

    let animation = args.assets.as_deref().and_then(menus::load_animation);
    let root = menus::root_menu(Size::new(WIDTH, HEIGHT), StatusMonitor::spawn(), animation);
    let mut application = Application::new(root)?;

    let mut last_frame = Instant::now();
    while display.is_open() {
        display.update();

        let locks = locks::scan(&args.lock_dir);
        application.set_buttons_locked(locks.buttons);
        application.set_display_claimed(locks.display);

        let now = Instant::now();
        let elapsed_ms = now
            .duration_since(last_frame)
            .as_millis()
            .min(u128::from(u32::MAX)) as u32;
        last_frame = now;

        application.update(&display.get_buttons(), elapsed_ms);
        application.draw(&mut display);
        thread::sleep(Duration::from_millis(u64::from(application.frame_interval_ms())));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
