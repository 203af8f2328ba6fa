#[cfg(windows)]
pub fn execute(x: i32, y: i32) {
    if let Err(e) = sidedock_windows::panel::post_offset_preview(x, y) {
        eprintln!("Error: no running panel found: {e}");
        std::process::exit(1);
    }
    println!("Offset preview sent ({x}, {y}).");
}

#[cfg(not(windows))]
pub fn execute(_x: i32, _y: i32) {
    super::unsupported("offset");
}
