mod catalog;
mod cli;
mod detach;
mod error;
mod fit;
mod loader;
mod ui;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use winit::event_loop::EventLoop;

use crate::catalog::{Catalog, CatalogError};
use crate::cli::Cli;
use crate::error::ViewerError;
use crate::loader::{decode_image, DecodedImage};
use crate::ui::state::ViewerState;
use crate::ui::App;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse_or_exit();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ViewerError> {
    let startup = open_target(&cli.path)?;

    if cli.detach {
        detach::relaunch(&startup.target, cli.no_delete).map_err(ViewerError::Detach)?;
        return Ok(());
    }

    let event_loop = EventLoop::new().map_err(ViewerError::window)?;
    let state = ViewerState::new(startup.catalog, startup.decoded, !cli.no_delete);
    let mut app = App::new(state);

    event_loop.run_app(&mut app).map_err(ViewerError::window)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Everything checked before a window is opened.
struct Startup {
    /// Absolute form of the argument.
    target: PathBuf,
    catalog: Catalog,
    decoded: DecodedImage,
}

/// Scan the target's directory and decode the image to start at. A named
/// file outside the recognized extensions starts at the first image of its
/// directory.
fn open_target(arg: &Path) -> Result<Startup, ViewerError> {
    let (dir, initial) = resolve_target(arg)?;
    let catalog = Catalog::scan(&dir, initial.as_deref())?;

    let start = catalog
        .current_path()
        .ok_or_else(|| CatalogError::EmptyDirectory(dir.clone()))?;
    if let Some(ref named) = initial {
        if named.as_path() != start {
            log::warn!("{} is not a recognized image, showing {}", named.display(), start.display());
        }
    }
    let decoded = decode_image(start)?;

    Ok(Startup {
        target: initial.unwrap_or(dir),
        catalog,
        decoded,
    })
}

/// Split the argument into the directory to browse and, for a file, the
/// file to start at. The argument must exist.
fn resolve_target(arg: &Path) -> Result<(PathBuf, Option<PathBuf>), ViewerError> {
    let path_error = |source| ViewerError::Path {
        path: arg.display().to_string(),
        source,
    };
    let path = std::path::absolute(arg).map_err(path_error)?;
    let meta = fs::metadata(&path).map_err(path_error)?;

    if meta.is_dir() {
        return Ok((path, None));
    }
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));
    Ok((dir, Some(path)))
}
