//! Static FungiDB organism registry.
//!
//! Keys are the directory names under the FungiDB downloads listing; display
//! names are what the record search endpoint expects as its `organism`
//! parameter. See <https://fungidb.org/common/downloads/Current_Release/>.

const ORGANISMS: &[(&str, &str)] = &[
    ("AfumigatusA1163", "Aspergillus fumigatus A1163"),
    ("AfumigatusAf293", "Aspergillus fumigatus Af293"),
    ("CalbicansSC5314", "Candida albicans SC5314"),
    ("ScerevisiaeS288C", "Saccharomyces cerevisiae S288C"),
    ("Spombe972h", "Schizosaccharomyces pombe 972h"),
];

/// C. albicans, S. cerevisiae and S. pombe.
pub const DEFAULT_REFERENCE_SPECIES: &[&str] =
    &["CalbicansSC5314", "ScerevisiaeS288C", "Spombe972h"];

pub fn known_organisms() -> impl Iterator<Item = (&'static str, &'static str)> {
    ORGANISMS.iter().copied()
}

pub fn display_name(key: &str) -> Option<&'static str> {
    ORGANISMS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, name)| *name)
}

/// Display name when known, otherwise the key itself.
pub fn api_name(key: &str) -> &str {
    display_name(key).unwrap_or(key)
}

pub fn default_references() -> Vec<String> {
    DEFAULT_REFERENCE_SPECIES
        .iter()
        .map(|key| key.to_string())
        .collect()
}

/// Resolve a user-supplied name to a registry key.
///
/// Tries an exact key match, then a comparison with spaces and periods
/// removed and case folded, first against keys and then against display
/// names. `None` means "not in the registry"; callers pick the fallback.
pub fn resolve(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    if let Some((key, _)) = ORGANISMS.iter().find(|(key, _)| *key == name) {
        return Some(key);
    }
    let wanted = squash(name);
    ORGANISMS
        .iter()
        .find(|(key, _)| squash(key) == wanted)
        .or_else(|| ORGANISMS.iter().find(|(_, display)| squash(display) == wanted))
        .map(|(key, _)| *key)
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|ch| *ch != ' ' && *ch != '.')
        .flat_map(char::to_lowercase)
        .collect()
}
