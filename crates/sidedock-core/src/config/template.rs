/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `sidedock init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Sidedock configuration
# Location: ~/.config/sidedock/config.toml

[panel]
# Screen edge to dock against: "right" or "left".
edge = "right"
# Monitor index, primary monitor first. An index that no longer exists
# falls back to the primary monitor.
screen = 0
# Panel width in pixels before ui_scale is applied.
width = 180
# Extra scale for the panel (1.0 = 100%).
ui_scale = 1.0
# Pixel offsets applied after docking.
x_offset = 0
y_offset = 0

[behavior]
# Reserve the panel's strip so maximized windows don't cover it.
use_appbar = true
# Keep the panel above other windows. When off, the panel drops behind
# normal windows but comes to the front when the desktop is shown.
always_top = true
# Let mouse clicks pass through the panel.
click_through = false
# Show the panel in the Alt+Tab switcher.
show_in_alt_tab = false
# Start hidden (use the toggle hotkey to show it).
initially_hidden = false

[logging]
# Enable file logging to ~/.config/sidedock/logs/sidedock.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation (0 = never rotate).
max_file_mb = 10
# Rotated files to keep (sidedock.log.1, sidedock.log.2, ...).
backups = 2

# Global hotkeys.
# action: toggle | show | hide | reload | close | cycle_edge | cycle_screen | reserve_space
# key: A-Z, 0-9, F1-F24, or a named key (Space, Enter, Home, Left, ...)
# modifiers: any of "ctrl", "alt", "shift", "win"

[[hotkey]]
action = "toggle"
key = "S"
modifiers = ["ctrl", "alt"]

[[hotkey]]
action = "reload"
key = "R"
modifiers = ["ctrl", "alt"]

[[hotkey]]
action = "cycle_edge"
key = "E"
modifiers = ["ctrl", "alt"]

[[hotkey]]
action = "cycle_screen"
key = "M"
modifiers = ["ctrl", "alt"]

[[hotkey]]
action = "reserve_space"
key = "A"
modifiers = ["ctrl", "alt"]
"##
    .to_string()
}
