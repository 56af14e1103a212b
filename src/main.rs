mod archive;
mod cli;
mod error;
mod files;
mod loader;
mod navigator;
mod ui;

use clap::Parser;
use std::process::ExitCode;
use winit::event_loop::EventLoop;

use crate::archive::{ensure_materialized, Materialized};
use crate::cli::Cli;
use crate::error::Result;
use crate::navigator::Navigator;
use crate::ui::state::{Canvas, ViewerState};
use crate::ui::App;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let navigator = match prepare(&cli) {
        Ok(nav) => nav,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if navigator.is_empty() {
        log::warn!("No image files found in {:?}", navigator.dir());
    }

    let mut state = ViewerState::new(navigator, Canvas::default());
    state.show_current();

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(state, cli.title.clone(), cli.width, cli.height);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop stopped: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Materialize the archive and scan the result.
fn prepare(cli: &Cli) -> Result<Navigator> {
    let target = cli.target_dir();
    match ensure_materialized(&cli.archive, &target)? {
        Materialized::Extracted { entries } => {
            log::info!("Extracted {} entries into {:?}", entries, target)
        }
        Materialized::AlreadyPresent => log::info!("Using existing {:?}", target),
    }
    let allow = cli.allow_set();
    log::debug!("Image extensions: {:?}", allow.extensions());
    Navigator::build(&target, &allow)
}
