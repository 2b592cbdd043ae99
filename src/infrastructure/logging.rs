use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;

/// Sends log output to `path`, since stderr is owned by the terminal UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: &str) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // A logger may already be installed (tests, embedding); keep that one.
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}
