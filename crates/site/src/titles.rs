//! English display strings for registry title keys.

/// Resolves a title key, falling back to the key itself for unknown entries.
pub fn title_for(key: &str) -> String {
    let title = match key {
        "windows.profile" => "Profile",
        "windows.about" => "About",
        "windows.terminal" => "Terminal",
        "windows.works" => "Works",
        "windows.textEditor" => "Text Editor",
        "projects.checkpoint.title" => "Checkpoint",
        "projects.bob.title" => "Bob",
        "projects.jot.title" => "Jot",
        "projects.aer.title" => "Aer",
        _ => return key.to_string(),
    };
    title.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn known_keys_resolve_and_unknown_keys_echo() {
        assert_eq!(title_for("windows.textEditor"), "Text Editor");
        assert_eq!(title_for("projects.jot.title"), "Jot");
        assert_eq!(title_for("windows.nope"), "windows.nope");
    }
}
