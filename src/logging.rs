use directories::ProjectDirs;
use std::{fs, path::PathBuf};

/// Sends `log` output to a file so it never draws over the UI. Does nothing
/// unless `RUST_LOG` is set.
pub fn init() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let path = log_path();
    let file = match fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return,
    };

    let _ = env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    log::info!("logging to {}", path.display());
}

fn log_path() -> PathBuf {
    match ProjectDirs::from("", "", "pomotick") {
        Some(pd) if fs::create_dir_all(pd.data_dir()).is_ok() => pd.data_dir().join("pomotick.log"),
        _ => PathBuf::from("pomotick.log"),
    }
}
