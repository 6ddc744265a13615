use infscroll_comic::constants::DEFAULT_CONFIG_PATH;
use infscroll_comic::{load_comic, load_demo, run_app, ComicError};
use std::path::Path;

fn main() -> Result<(), ComicError> {
    // Set up logging; filter with RUST_LOG
    env_logger::init();

    let comic = match std::env::args().nth(1).as_deref() {
        Some("--demo") => load_demo(),
        Some(path) => load_comic(Path::new(path)),
        None => load_comic(Path::new(DEFAULT_CONFIG_PATH)),
    };

    let comic = match comic {
        Ok(comic) => comic,
        Err(ComicError::InvalidConfig(defects)) => {
            for defect in &defects {
                log::error!("Error - {defect}");
            }
            return Err(ComicError::InvalidConfig(defects));
        }
        Err(err) => {
            log::error!("Error - {err}");
            return Err(err);
        }
    };

    // Run the comic viewer
    run_app(comic)
}
