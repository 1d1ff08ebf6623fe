// External identifier generation
//
// External IDs are short, human-readable codes shown to users and accepted by
// the API. They are random, so collisions are possible: storage enforces
// uniqueness and services regenerate on conflict (see MAX_ID_ATTEMPTS).

use rand::Rng;

/// How many times a service regenerates an external ID after a conflict.
pub const MAX_ID_ATTEMPTS: usize = 8;

/// Name substituted when a category name is missing or shorter than 2 chars.
const CATEGORY_NAME_PLACEHOLDER: &str = "XX";

const EVENT_ID_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a category ID such as `CMU-0042`.
///
/// Format: `C` + first two characters of `name` uppercased + `-` + a random
/// number in `0..=9999` zero-padded to 4 digits.
pub fn generate_category_id(name: Option<&str>) -> String {
    let name = match name {
        Some(n) if n.chars().count() >= 2 => n,
        _ => CATEGORY_NAME_PLACEHOLDER,
    };

    let prefix: String = name.chars().take(2).collect::<String>().to_uppercase();
    let number: u16 = rand::thread_rng().gen_range(0..=9999);

    format!("C{}-{:04}", prefix, number)
}

/// Generate an event ID such as `ABC-42`.
///
/// Format: 3 random uppercase letters + `-` + a random number in `0..=10000`.
/// The number is not padded, so the length varies.
pub fn generate_event_id() -> String {
    let mut rng = rand::thread_rng();
    let letters: String = (0..3)
        .map(|_| EVENT_ID_LETTERS[rng.gen_range(0..EVENT_ID_LETTERS.len())] as char)
        .collect();
    let number: u16 = rng.gen_range(0..=10_000);

    format!("{}-{}", letters, number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_category_id_uses_name_prefix() {
        let re = Regex::new(r"^CMU-\d{4}$").unwrap();
        for _ in 0..200 {
            let id = generate_category_id(Some("Music"));
            assert!(re.is_match(&id), "unexpected id {id}");
        }
    }

    #[test]
    fn test_category_id_accepts_digit_prefix() {
        let id = generate_category_id(Some("4ever"));
        assert!(id.starts_with("C4E-"), "unexpected id {id}");
    }

    #[test]
    fn test_category_id_placeholder_for_short_or_missing_name() {
        assert!(generate_category_id(None).starts_with("CXX-"));
        assert!(generate_category_id(Some("")).starts_with("CXX-"));
        assert!(generate_category_id(Some("a")).starts_with("CXX-"));
    }

    #[test]
    fn test_category_id_pattern() {
        let re = Regex::new(r"^C[A-Z0-9]{2}-\d{4}$").unwrap();
        for name in ["sports", "Art", "jazz99", "x"] {
            let id = generate_category_id(Some(name));
            assert!(re.is_match(&id), "unexpected id {id}");
        }
    }

    #[test]
    fn test_event_id_pattern() {
        let re = Regex::new(r"^[A-Z]{3}-\d{1,5}$").unwrap();
        for _ in 0..500 {
            let id = generate_event_id();
            assert!(re.is_match(&id), "unexpected id {id}");
        }
    }

    #[test]
    fn test_event_id_number_in_range() {
        for _ in 0..500 {
            let id = generate_event_id();
            let (_, number) = id.split_once('-').unwrap();
            let number: u32 = number.parse().unwrap();
            assert!(number <= 10_000);
        }
    }
}
