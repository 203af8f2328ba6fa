#[cfg(windows)]
pub fn execute() {
    use sidedock_core::{compute_layout, config};

    let settings = config::load();
    let monitors = match sidedock_windows::enumerate_monitors() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: could not enumerate monitors: {e}");
            std::process::exit(1);
        }
    };

    // A running panel's own reservation is already excluded from the
    // work areas, so this shows where a fresh panel would go.
    let layout = match compute_layout(&monitors, &settings, None) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if layout.screen != settings.panel.screen {
        println!(
            "Screen {} does not exist, using primary ({})",
            settings.panel.screen, layout.screen
        );
    }
    let window = layout.window_bounds();
    let appbar = layout.appbar_rect();
    println!("Screen:   {}", layout.screen);
    println!("Edge:     {}", layout.edge);
    println!(
        "Window:   ({},{})-({},{})  {}x{}",
        window.left,
        window.top,
        window.right,
        window.bottom,
        window.width(),
        window.height()
    );
    if layout.reserves_space() {
        println!(
            "Reserved: ({},{})-({},{})",
            appbar.left, appbar.top, appbar.right, appbar.bottom
        );
    } else {
        println!("Reserved: none");
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::super::unsupported("debug layout");
}
