//! Build script for streetwise-appliance
//!
//! Validates appliance.toml at compile time so a broken embedded default
//! fails the build instead of silently falling back at runtime.

use std::fs;
use std::path::Path;

const SECTIONS: &[&str] = &["entry", "fade", "scope", "progress", "keypad"];

fn main() {
    println!("cargo:rerun-if-changed=appliance.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let path = Path::new("appliance.toml");
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => panic!("appliance.toml could not be read: {e}"),
    };

    let table: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => panic!("appliance.toml is not valid TOML:\n{e}"),
    };

    for key in table.keys() {
        if !SECTIONS.contains(&key.as_str()) {
            panic!("appliance.toml: unknown section [{key}]");
        }
    }

    let int = |section: &str, key: &str| {
        table
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_integer())
    };

    if int("entry", "timeout_ms") == Some(0) {
        panic!("appliance.toml: entry.timeout_ms must be greater than zero");
    }

    if let Some(deflection) = int("scope", "max_deflection") {
        if !(0..=127).contains(&deflection) {
            panic!("appliance.toml: scope.max_deflection must be in 0..=127");
        }
    }

    if let Some(layout) = table
        .get("keypad")
        .and_then(|keypad| keypad.get("layout"))
    {
        match layout.as_str() {
            Some("top-row" | "numpad" | "both") => {}
            _ => panic!("appliance.toml: keypad.layout must be \"top-row\", \"numpad\" or \"both\""),
        }
    }
}
