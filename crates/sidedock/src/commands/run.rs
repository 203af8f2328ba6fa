#[cfg(windows)]
pub fn execute() {
    use sidedock_core::config::{self, FileSettingsStore};

    let settings = config::load();
    sidedock_core::log::init(&settings.logging);
    sidedock_core::log_info!("Starting sidedock {}", env!("CARGO_PKG_VERSION"));

    let Some(store) = FileSettingsStore::default_location() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = sidedock_windows::run(settings, Box::new(store)) {
        sidedock_core::log_error!("Panel error: {e}");
        eprintln!("Panel error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::unsupported("run");
}
