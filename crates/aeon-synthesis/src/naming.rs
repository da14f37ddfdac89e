//! Latin-ish species names

use crate::RandomSource;

const PREFIXES: [&str; 7] = ["Proto", "Neo", "Paleo", "Meso", "Crypto", "Macro", "Micro"];
const SUFFIXES: [&str; 6] = ["saurus", "therium", "morpha", "cetus", "zoon", "vita"];
const EPITHETS: [&str; 6] = ["primus", "secundus", "tertius", "major", "minor", "rex"];

/// Binomial name for the `index`-th species of a radiation
pub fn scientific_name(rng: &mut dyn RandomSource, index: usize) -> String {
    let prefix = PREFIXES[rng.uniform_int(0, PREFIXES.len())];
    let suffix = SUFFIXES[rng.uniform_int(0, SUFFIXES.len())];
    let epithet = EPITHETS[index % EPITHETS.len()];
    format!("{prefix}{suffix} {epithet}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeededRng;

    #[test]
    fn test_names_are_binomial() {
        let mut rng = SeededRng::new(11);
        for i in 0..12 {
            let name = scientific_name(&mut rng, i);
            let (genus, epithet) = name.split_once(' ').unwrap();
            assert!(PREFIXES.iter().any(|p| genus.starts_with(p)));
            assert!(SUFFIXES.iter().any(|s| genus.ends_with(s)));
            assert_eq!(epithet, EPITHETS[i % 6]);
        }
    }
}
