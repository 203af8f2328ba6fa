//! Key names for hotkey configuration.
//!
//! Names resolve to Windows virtual-key codes, which is also the value
//! stored on a [`Hotkey`](crate::hotkey::Hotkey).

/// Named keys and their virtual-key codes. The first name listed for a
/// code is the canonical one used by [`name_from_vk`].
const NAMED_KEYS: &[(&str, u32)] = &[
    ("ENTER", 0x0D),
    ("RETURN", 0x0D),
    ("TAB", 0x09),
    ("ESCAPE", 0x1B),
    ("ESC", 0x1B),
    ("SPACE", 0x20),
    ("BACKSPACE", 0x08),
    ("PAUSE", 0x13),
    ("DELETE", 0x2E),
    ("DEL", 0x2E),
    ("INSERT", 0x2D),
    ("INS", 0x2D),
    ("HOME", 0x24),
    ("END", 0x23),
    ("PAGEUP", 0x21),
    ("PGUP", 0x21),
    ("PAGEDOWN", 0x22),
    ("PGDN", 0x22),
    ("LEFT", 0x25),
    ("UP", 0x26),
    ("RIGHT", 0x27),
    ("DOWN", 0x28),
    ("PRINTSCREEN", 0x2C),
    ("SCROLLLOCK", 0x91),
    ("MULTIPLY", 0x6A),
    ("ADD", 0x6B),
    ("SUBTRACT", 0x6D),
    ("DECIMAL", 0x6E),
    ("DIVIDE", 0x6F),
    ("MINUS", 0xBD),
    ("PLUS", 0xBB),
    ("EQUALS", 0xBB),
    ("COMMA", 0xBC),
    ("PERIOD", 0xBE),
    ("DOT", 0xBE),
    ("SLASH", 0xBF),
    ("SEMICOLON", 0xBA),
    ("BACKSLASH", 0xDC),
    ("LBRACKET", 0xDB),
    ("RBRACKET", 0xDD),
    ("QUOTE", 0xDE),
    ("BACKTICK", 0xC0),
    ("GRAVE", 0xC0),
];

const VK_F1: u32 = 0x70;
const VK_NUMPAD0: u32 = 0x60;

/// Converts a key name to a Windows virtual-key code.
///
/// Supports letters, digits, F1–F24, numpad digits (`NUM0`–`NUM9`) and
/// the named keys above. Matching is case-insensitive.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();

    if let [ch] = upper.as_bytes()
        && (ch.is_ascii_uppercase() || ch.is_ascii_digit())
    {
        return Some(u32::from(*ch));
    }

    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u32>()
        && (1..=24).contains(&n)
    {
        return Some(VK_F1 + n - 1);
    }

    if let Some(rest) = upper.strip_prefix("NUM")
        && let Ok(n) = rest.parse::<u32>()
        && n <= 9
    {
        return Some(VK_NUMPAD0 + n);
    }

    NAMED_KEYS
        .iter()
        .find(|(n, _)| *n == upper)
        .map(|(_, vk)| *vk)
}

/// Converts a virtual-key code back to a display name.
pub fn name_from_vk(vk: u32) -> Option<String> {
    match vk {
        0x30..=0x39 | 0x41..=0x5A => char::from_u32(vk).map(String::from),
        v if (VK_F1..VK_F1 + 24).contains(&v) => Some(format!("F{}", v - VK_F1 + 1)),
        v if (VK_NUMPAD0..=VK_NUMPAD0 + 9).contains(&v) => Some(format!("Num{}", v - VK_NUMPAD0)),
        v => NAMED_KEYS
            .iter()
            .find(|(_, code)| *code == v)
            .map(|(n, _)| n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_case_insensitive() {
        // Assert
        assert_eq!(vk_from_name("s"), Some(0x53));
        assert_eq!(vk_from_name("S"), Some(0x53));
        assert_eq!(vk_from_name("a"), Some(0x41));
        assert_eq!(vk_from_name("Z"), Some(0x5A));
    }

    #[test]
    fn digits_and_numpad() {
        // Assert
        assert_eq!(vk_from_name("0"), Some(0x30));
        assert_eq!(vk_from_name("9"), Some(0x39));
        assert_eq!(vk_from_name("num0"), Some(0x60));
        assert_eq!(vk_from_name("Num9"), Some(0x69));
        assert_eq!(vk_from_name("Num10"), None);
    }

    #[test]
    fn function_keys_up_to_f24() {
        // Assert
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f12"), Some(0x7B));
        assert_eq!(vk_from_name("F24"), Some(0x87));
        assert_eq!(vk_from_name("F25"), None);
    }

    #[test]
    fn named_keys_with_aliases() {
        // Assert
        assert_eq!(vk_from_name("Enter"), Some(0x0D));
        assert_eq!(vk_from_name("return"), Some(0x0D));
        assert_eq!(vk_from_name(" space "), Some(0x20));
        assert_eq!(vk_from_name("PgDn"), Some(0x22));
    }

    #[test]
    fn unknown_returns_none() {
        // Assert
        assert_eq!(vk_from_name("INVALID"), None);
        assert_eq!(vk_from_name(""), None);
    }

    #[test]
    fn name_from_vk_uses_canonical_names() {
        // Assert
        assert_eq!(name_from_vk(0x53).as_deref(), Some("S"));
        assert_eq!(name_from_vk(0x78).as_deref(), Some("F9"));
        assert_eq!(name_from_vk(0x0D).as_deref(), Some("ENTER"));
        assert_eq!(name_from_vk(0x63).as_deref(), Some("Num3"));
        assert_eq!(name_from_vk(0xFF), None);
    }
}
