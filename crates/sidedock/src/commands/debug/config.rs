use sidedock_core::config;
use sidedock_core::config::hotkeys;
use sidedock_core::keys;

pub fn execute() {
    let path = config::config_path();
    let settings = config::load();

    match &path {
        Some(p) if p.exists() => println!("# {}", p.display()),
        _ => println!("# defaults (no config file)"),
    }

    match toml::to_string_pretty(&settings) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: could not render settings: {e}");
            std::process::exit(1);
        }
    }

    let resolved = hotkeys::resolve_all(&settings.hotkeys);
    println!("# {} of {} hotkey(s) resolved", resolved.len(), settings.hotkeys.len());
    for hotkey in &resolved {
        let key = keys::name_from_vk(hotkey.virtual_key)
            .unwrap_or_else(|| format!("0x{:02X}", hotkey.virtual_key));
        let m = hotkey.modifiers;
        let mut combo = Vec::new();
        if m.ctrl {
            combo.push("Ctrl".to_string());
        }
        if m.alt {
            combo.push("Alt".to_string());
        }
        if m.shift {
            combo.push("Shift".to_string());
        }
        if m.win {
            combo.push("Win".to_string());
        }
        combo.push(key);
        println!("#   {:<14} {}", format!("{:?}", hotkey.action), combo.join("+"));
    }
}
