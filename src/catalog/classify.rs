/// Method-name fragments that route an operation into the hidden set.
pub const HIDDEN_NAME_FRAGMENTS: &[&str] = &[
    "backup",
    "restore",
    "discover",
    "slotConfigNames",
    "metrics",
    "repository",
    "usages",
    "clone",
    "getOperation",
    "register",
    "unregister",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Case-insensitive substring match against [`HIDDEN_NAME_FRAGMENTS`].
#[must_use]
pub fn classify(method_name: &str) -> Visibility {
    let lowered = method_name.to_lowercase();
    let hidden = HIDDEN_NAME_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(&fragment.to_lowercase()));

    if hidden {
        Visibility::Hidden
    } else {
        Visibility::Visible
    }
}
