//! Built-in word lists that projects can opt into with `"preset"`.

const BASE: &str = include_str!("../presets/base.stub");
const LARAVEL: &str = include_str!("../presets/laravel.stub");
const SYMFONY: &str = include_str!("../presets/symfony.stub");

/// Names of every preset shipped with the binary.
pub const PRESETS: &[&str] = &["base", "laravel", "symfony"];

fn stub(name: &str) -> Option<&'static str> {
    match name {
        "base" => Some(BASE),
        "laravel" => Some(LARAVEL),
        "symfony" => Some(SYMFONY),
        _ => None,
    }
}

/// Words listed by a single preset, or `None` for an unknown preset.
pub fn words(name: &str) -> Option<Vec<&'static str>> {
    stub(name).map(|content| {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    })
}

/// Whitelisted words for the requested presets. `base` is always included.
pub fn whitelisted_words<S: AsRef<str>>(presets: &[S]) -> Vec<&'static str> {
    let mut all = words("base").unwrap_or_default();

    for preset in presets {
        let name = preset.as_ref().trim().to_lowercase();
        if name == "base" {
            continue;
        }
        match words(&name) {
            Some(list) => all.extend(list),
            None => tracing::warn!(preset = %name, "unknown preset, ignoring"),
        }
    }

    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_sorted_and_lowercase() {
        for name in PRESETS {
            let list = words(name).unwrap();
            assert!(!list.is_empty(), "{name} is empty");

            let mut sorted = list.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(list, sorted, "{name} must be sorted and unique");

            assert!(list
                .iter()
                .all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
        }
    }

    #[test]
    fn test_base_is_always_included() {
        let none: &[&str] = &[];
        let base = whitelisted_words(none);
        assert!(base.contains(&"php"));

        let laravel = whitelisted_words(&["Laravel"]);
        assert!(laravel.contains(&"php"));
        assert!(laravel.contains(&"eloquent"));
        assert_eq!(laravel.len(), base.len() + words("laravel").unwrap().len());
    }

    #[test]
    fn test_unknown_preset_is_skipped() {
        let words = whitelisted_words(&["base", "wordpress"]);
        assert_eq!(words, super::words("base").unwrap());
    }
}
