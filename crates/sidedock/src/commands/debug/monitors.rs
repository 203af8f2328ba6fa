#[cfg(windows)]
pub fn execute(json: bool) {
    let monitors = match sidedock_windows::enumerate_monitors() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: could not enumerate monitors: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&monitors) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: could not serialize monitors: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!(
        "{:<6} {:<24} {:<24} {:>9} {:>8}",
        "Index", "Bounds", "Work area", "DPI", "Primary"
    );
    for (index, m) in monitors.iter().enumerate() {
        println!(
            "{:<6} {:<24} {:<24} {:>9} {:>8}",
            index,
            format_rect(m.rect),
            format_rect(m.work_area),
            format!("{}x{}", m.dpi_x, m.dpi_y),
            if m.is_primary { "yes" } else { "" }
        );
    }
    println!("\n{} monitor(s) found", monitors.len());
}

#[cfg(windows)]
fn format_rect(r: sidedock_core::Rect) -> String {
    format!("({},{})-({},{})", r.left, r.top, r.right, r.bottom)
}

#[cfg(not(windows))]
pub fn execute(_json: bool) {
    super::super::unsupported("debug monitors");
}
