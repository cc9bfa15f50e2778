//! Bidirectional mapping between key codes and key names.
//!
//! Key codes 0..256 follow the DirectInput scan-code layout of a QWERTY
//! keyboard; codes above that cover mouse buttons, joystick buttons, POV
//! hats, axes-as-buttons and gamepad controls. Code 0 means "no key".
//!
//! The table is built once per [`KeyPlatform`]; lookups never branch on the
//! platform.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Integer identifier of a bindable input.
pub type KeyCode = u16;

/// Reserved "no key" code. Never a valid binding target.
pub const NO_KEY: KeyCode = 0;

/// Codes below this value come from the keyboard.
pub const NUM_KEYBOARD_KEYS: usize = 256;
pub const FIRST_MOUSE_BUTTON: KeyCode = 256;
pub const NUM_MOUSE_BUTTONS: usize = 8;
pub const FIRST_JOY_BUTTON: KeyCode = 264;
pub const NUM_JOY_BUTTONS: usize = 128;
pub const FIRST_JOY_POV: KeyCode = 392;
pub const KEY_MWHEELUP: KeyCode = 408;
pub const KEY_MWHEELDOWN: KeyCode = 409;
pub const KEY_MWHEELRIGHT: KeyCode = 410;
pub const KEY_MWHEELLEFT: KeyCode = 411;
pub const FIRST_JOY_AXIS: KeyCode = 412;
pub const FIRST_PAD_CONTROL: KeyCode = 428;

/// Total size of the key-code space.
pub const NUM_KEYS: usize = 620;

const POV_DIRECTIONS: [&str; 4] = ["up", "right", "down", "left"];
const STICK_DIRECTIONS: [&str; 4] = ["right", "left", "down", "up"];

// DirectInput DIK_* codes, QWERTY layout. Empty string = no name.
#[rustfmt::skip]
const KEYBOARD_NAMES: [&str; NUM_KEYBOARD_KEYS] = [
    "",           "escape",     "1",          "2",          "3",          "4",          "5",          "6",           // 00
    "7",          "8",          "9",          "0",          "-",          "=",          "backspace",  "tab",         // 08
    "q",          "w",          "e",          "r",          "t",          "y",          "u",          "i",           // 10
    "o",          "p",          "[",          "]",          "enter",      "ctrl",       "a",          "s",           // 18
    "d",          "f",          "g",          "h",          "j",          "k",          "l",          ";",           // 20
    "'",          "`",          "shift",      "\\",         "z",          "x",          "c",          "v",           // 28
    "b",          "n",          "m",          ",",          ".",          "/",          "rshift",     "kp*",         // 30
    "alt",        "space",      "capslock",   "f1",         "f2",         "f3",         "f4",         "f5",          // 38
    "f6",         "f7",         "f8",         "f9",         "f10",        "numlock",    "scroll",     "kp7",         // 40
    "kp8",        "kp9",        "kp-",        "kp4",        "kp5",        "kp6",        "kp+",        "kp1",         // 48
    "kp2",        "kp3",        "kp0",        "kp.",        "",           "",           "oem102",     "f11",         // 50
    "f12",        "",           "",           "",           "",           "",           "",           "",            // 58
    "",           "",           "",           "",           "f13",        "f14",        "f15",        "f16",         // 60
    "",           "",           "",           "",           "",           "",           "",           "",            // 68
    "kana",       "",           "",           "abnt_c1",    "",           "",           "",           "",            // 70
    "",           "convert",    "",           "noconvert",  "",           "yen",        "abnt_c2",    "",            // 78
    "",           "",           "",           "",           "",           "",           "",           "",            // 80
    "",           "",           "",           "",           "",           "kp=",        "",           "",            // 88
    "circumflex", "@",          ":",          "_",          "kanji",      "stop",       "ax",         "unlabeled",   // 90
    "",           "prevtrack",  "",           "",           "kp-enter",   "rctrl",      "",           "",            // 98
    "mute",       "calculator", "play",       "",           "stop",       "",           "",           "",            // A0
    "",           "",           "",           "",           "",           "",           "voldown",    "",            // A8
    "volup",      "",           "webhome",    "kp,",        "",           "kp/",        "",           "sysrq",       // B0
    "ralt",       "",           "",           "",           "",           "",           "",           "",            // B8
    "",           "",           "",           "",           "",           "pause",      "",           "home",        // C0
    "uparrow",    "pgup",       "",           "leftarrow",  "",           "rightarrow", "",           "end",         // C8
    "downarrow",  "pgdn",       "ins",        "del",        "",           "",           "",           "",            // D0
    "",           "",           "",           "lwin",       "rwin",       "apps",       "power",      "sleep",       // D8
    "",           "",           "",           "wake",       "",           "search",     "favorites",  "refresh",     // E0
    "webstop",    "webforward", "webback",    "mycomputer", "mail",       "mediaselect","",           "",            // E8
    "",           "",           "",           "",           "",           "",           "",           "",            // F0
    "",           "",           "",           "",           "",           "",           "",           "",            // F8
];

/// Platform flavour of the key-name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPlatform {
    /// Apple keyboards: a single `command` key in place of `lwin`/`rwin`.
    Apple,
    /// Everything else.
    Standard,
}

impl KeyPlatform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            KeyPlatform::Apple
        } else {
            KeyPlatform::Standard
        }
    }

    fn overrides(self) -> &'static [(usize, Option<&'static str>)] {
        match self {
            KeyPlatform::Apple => &[(0xDB, Some("command")), (0xDC, None)],
            KeyPlatform::Standard => &[],
        }
    }
}

/// Static key-code ↔ name table.
#[derive(Debug, Clone)]
pub struct KeyNameTable {
    platform: KeyPlatform,
    names: Vec<Option<Cow<'static, str>>>,
    /// Lower-cased name → first code carrying it.
    lookup: HashMap<String, KeyCode>,
}

impl KeyNameTable {
    /// Build the table for a platform.
    pub fn for_platform(platform: KeyPlatform) -> Self {
        let mut names: Vec<Option<Cow<'static, str>>> = KEYBOARD_NAMES
            .iter()
            .map(|n| (!n.is_empty()).then_some(Cow::Borrowed(*n)))
            .collect();

        for &(code, name) in platform.overrides() {
            names[code] = name.map(Cow::Borrowed);
        }

        let mut push = |name: String| names.push(Some(Cow::Owned(name)));

        for button in 1..=NUM_MOUSE_BUTTONS {
            push(format!("mouse{button}"));
        }
        for stick in 1..=4 {
            for button in 1..=32 {
                if stick == 1 {
                    push(format!("joy{button}"));
                } else {
                    push(format!("joy{stick}_{button}"));
                }
            }
        }
        for hat in 1..=4 {
            for dir in POV_DIRECTIONS {
                push(format!("pov{hat}{dir}"));
            }
        }
        for wheel in ["mwheelup", "mwheeldown", "mwheelright", "mwheelleft"] {
            push(wheel.to_string());
        }
        push_axes(&mut push, "");
        push_pad(&mut push, "", "pad");
        for stick in 2..=4 {
            for hat in 1..=4 {
                for dir in POV_DIRECTIONS {
                    push(format!("pov{stick}{hat}{dir}"));
                }
            }
        }
        for stick in 2..=4 {
            push_axes(&mut push, &stick.to_string());
        }
        for pad in 2..=4 {
            let suffix = pad.to_string();
            push_pad(&mut push, &suffix, &format!("pad{pad}"));
        }

        debug_assert_eq!(names.len(), NUM_KEYS);

        let mut lookup = HashMap::with_capacity(names.len());
        for (code, name) in names.iter().enumerate() {
            if let Some(name) = name {
                lookup
                    .entry(name.to_ascii_lowercase())
                    .or_insert(code as KeyCode);
            }
        }

        Self {
            platform,
            names,
            lookup,
        }
    }

    /// The process-wide table for [`KeyPlatform::current`].
    pub fn global() -> &'static KeyNameTable {
        static TABLE: OnceLock<KeyNameTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let platform = KeyPlatform::current();
            log::debug!("Building key name table for {:?}", platform);
            KeyNameTable::for_platform(platform)
        })
    }

    pub fn platform(&self) -> KeyPlatform {
        self.platform
    }

    /// Resolve a key name to its code. Returns [`NO_KEY`] when unknown.
    ///
    /// Matching is case-insensitive. `#<n>` yields `n` directly, and the
    /// synthesized `Key_<n>` form produced by [`Self::name`] is accepted
    /// for codes that have no canonical name.
    pub fn code(&self, name: &str) -> KeyCode {
        if let Some(rest) = name.strip_prefix('#') {
            if !rest.is_empty() {
                return parse_leading_digits(rest);
            }
        }

        if let Some(&code) = self.lookup.get(&name.to_ascii_lowercase()) {
            return code;
        }

        let has_key_prefix = name
            .as_bytes()
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"key_"));
        if name.len() > 4 && has_key_prefix {
            // The prefix is ASCII, so byte 4 is a char boundary.
            let digits = &name[4..];
            if digits.bytes().all(|b| b.is_ascii_digit()) {
                let code = parse_leading_digits(digits);
                if self.canonical(code).is_none() {
                    return code;
                }
            }
        }

        NO_KEY
    }

    /// Resolve a name read from a config file, accepting the config-safe
    /// aliases written by [`Self::config_name`].
    ///
    /// `qqBracket` is an old alias for `]` that existing config files still
    /// contain.
    pub fn config_code(&self, name: &str) -> KeyCode {
        let code = self.code(name);
        if code != NO_KEY {
            return code;
        }

        let canonical = if name.eq_ignore_ascii_case("LeftBracket") {
            "["
        } else if name.eq_ignore_ascii_case("RightBracket") || name.eq_ignore_ascii_case("qqBracket")
        {
            "]"
        } else if name.eq_ignore_ascii_case("Equals") {
            "="
        } else if name.eq_ignore_ascii_case("KP-Equals") {
            "kp="
        } else {
            return NO_KEY;
        };
        self.code(canonical)
    }

    /// Canonical table name of `code`, if it has one.
    pub fn canonical(&self, code: KeyCode) -> Option<&str> {
        self.names
            .get(code as usize)
            .and_then(|n| n.as_deref())
    }

    /// Display name of `code`; unnamed codes become `Key_<code>`.
    pub fn name(&self, code: KeyCode) -> Cow<'_, str> {
        match self.canonical(code) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("Key_{code}")),
        }
    }

    /// Name of `code` safe to use as a config-file key.
    pub fn config_name(&self, code: KeyCode) -> Cow<'_, str> {
        let name = self.name(code);
        let safe = match name.as_ref() {
            "[" => "LeftBracket",
            "]" => "RightBracket",
            "=" => "Equals",
            "kp=" => "KP-Equals",
            _ => return name,
        };
        Cow::Borrowed(safe)
    }

    /// Human-readable list of up to two keys, e.g. `"w or uparrow"`.
    ///
    /// [`NO_KEY`] entries are left out; two missing keys give an empty string.
    pub fn describe_keys(&self, first: KeyCode, second: KeyCode) -> String {
        match (first != NO_KEY, second != NO_KEY) {
            (true, true) => format!("{} or {}", self.name(first), self.name(second)),
            (true, false) => self.name(first).into_owned(),
            (false, true) => self.name(second).into_owned(),
            (false, false) => String::new(),
        }
    }
}

fn push_axes(push: &mut impl FnMut(String), stick: &str) {
    for axis in 1..=8 {
        push(format!("axis{stick}{axis}plus"));
        push(format!("axis{stick}{axis}minus"));
    }
}

fn push_pad(push: &mut impl FnMut(String), suffix: &str, pad: &str) {
    for stick in ["lstick", "rstick"] {
        for dir in STICK_DIRECTIONS {
            push(format!("{stick}{suffix}{dir}"));
        }
    }
    for dir in ["up", "down", "left", "right"] {
        push(format!("dpad{suffix}{dir}"));
    }
    push(format!("{pad}_start"));
    push(format!("{pad}_back"));
    for control in ["lthumb", "rthumb", "lshoulder", "rshoulder", "ltrigger", "rtrigger"] {
        push(format!("{control}{suffix}"));
    }
    for face in ["a", "b", "x", "y"] {
        push(format!("{pad}_{face}"));
    }
}

/// Decimal value of the leading digits of `s`, saturating at `KeyCode::MAX`.
/// No leading digit gives 0.
fn parse_leading_digits(s: &str) -> KeyCode {
    s.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, b| {
            (acc * 10 + u32::from(b - b'0')).min(u32::from(KeyCode::MAX))
        }) as KeyCode
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> KeyNameTable {
        KeyNameTable::for_platform(KeyPlatform::Standard)
    }

    #[test]
    fn test_table_size_and_block_offsets() {
        let t = table();
        assert_eq!(t.code("mouse1"), FIRST_MOUSE_BUTTON);
        assert_eq!(t.code("joy1"), FIRST_JOY_BUTTON);
        assert_eq!(t.code("joy4_32"), FIRST_JOY_POV - 1);
        assert_eq!(t.code("pov1up"), FIRST_JOY_POV);
        assert_eq!(t.code("mwheelup"), KEY_MWHEELUP);
        assert_eq!(t.code("mwheelleft"), KEY_MWHEELLEFT);
        assert_eq!(t.code("axis1plus"), FIRST_JOY_AXIS);
        assert_eq!(t.code("lstickright"), FIRST_PAD_CONTROL);
        assert_eq!(t.code("pad_y"), 451);
        assert_eq!(t.code("pov21up"), 452);
        assert_eq!(t.code("axis21plus"), 500);
        assert_eq!(t.code("lstick2right"), 548);
        assert_eq!(t.code("pad4_y") as usize, NUM_KEYS - 1);
    }

    #[test]
    fn test_keyboard_names() {
        let t = table();
        assert_eq!(t.code("escape"), 0x01);
        assert_eq!(t.code("w"), 0x11);
        assert_eq!(t.code("["), 0x1A);
        assert_eq!(t.code("kp="), 0x8D);
        assert_eq!(t.code("UpArrow"), 0xC8);
        assert_eq!(t.code("lwin"), 0xDB);
    }

    #[test]
    fn test_duplicate_name_resolves_to_first() {
        let t = table();
        assert_eq!(t.code("stop"), 0x95);
        assert_eq!(t.name(0xA4), "stop");
    }

    #[test]
    fn test_numeric_alias() {
        let t = table();
        assert_eq!(t.code("#42"), 42);
        assert_eq!(t.code("#0"), 0);
        assert_eq!(t.code("#12abc"), 12);
        assert_eq!(t.code("#abc"), 0);
        assert_eq!(t.code("#"), NO_KEY);
        assert_eq!(t.code("#99999999"), KeyCode::MAX);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(table().code("notakey"), NO_KEY);
        assert_eq!(table().code(""), NO_KEY);
    }

    #[test]
    fn test_synthesized_names() {
        let t = table();
        assert_eq!(t.name(0x54), "Key_84");
        assert_eq!(t.code("Key_84"), 0x54);
        assert_eq!(t.code("key_84"), 0x54);
        // Named codes are not reachable through the synthesized form.
        assert_eq!(t.code("Key_17"), NO_KEY);
    }

    #[test]
    fn test_config_safe_names() {
        let t = table();
        assert_eq!(t.config_name(t.code("[")), "LeftBracket");
        assert_eq!(t.config_name(t.code("]")), "RightBracket");
        assert_eq!(t.config_name(t.code("=")), "Equals");
        assert_eq!(t.config_name(t.code("kp=")), "KP-Equals");
        assert_eq!(t.config_name(t.code("w")), "w");
    }

    #[test]
    fn test_config_aliases() {
        let t = table();
        assert_eq!(t.config_code("LeftBracket"), t.code("["));
        assert_eq!(t.config_code("RightBracket"), t.code("]"));
        assert_eq!(t.config_code("qqBracket"), t.code("]"));
        assert_eq!(t.config_code("equals"), t.code("="));
        assert_eq!(t.config_code("KP-Equals"), t.code("kp="));
        // Plain lookup does not know the aliases.
        assert_eq!(t.code("LeftBracket"), NO_KEY);
    }

    #[test]
    fn test_round_trip_every_code() {
        let t = table();
        for code in 0..NUM_KEYS as KeyCode {
            let name = t.name(code);
            assert_eq!(t.name(t.code(&name)), name, "code {code}");
        }
    }

    #[test]
    fn test_apple_platform() {
        let t = KeyNameTable::for_platform(KeyPlatform::Apple);
        assert_eq!(t.code("command"), 0xDB);
        assert_eq!(t.code("lwin"), NO_KEY);
        assert_eq!(t.canonical(0xDC), None);
        assert_eq!(t.code("apps"), 0xDD);
    }

    #[test]
    fn test_describe_keys() {
        let t = table();
        let w = t.code("w");
        let up = t.code("uparrow");
        assert_eq!(t.describe_keys(w, up), "w or uparrow");
        assert_eq!(t.describe_keys(w, NO_KEY), "w");
        assert_eq!(t.describe_keys(NO_KEY, up), "uparrow");
        assert_eq!(t.describe_keys(NO_KEY, NO_KEY), "");
    }

    #[test]
    fn test_non_ascii_names_are_unknown() {
        let t = table();
        assert_eq!(t.code("aéé"), NO_KEY);
        assert_eq!(t.code("keé_1"), NO_KEY);
        assert_eq!(t.code("ñ"), NO_KEY);
        assert_eq!(t.code("Key_é"), NO_KEY);
        assert_eq!(t.config_code("aéé"), NO_KEY);
    }
}
