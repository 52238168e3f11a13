//! Random mailbox credentials.

use rand::Rng;
use rand::seq::SliceRandom;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%&*";

fn pick(rng: &mut impl Rng, alphabet: &[u8]) -> char {
    alphabet[rng.random_range(0..alphabet.len())] as char
}

/// Generate a random mailbox local-part: lowercase letters and digits,
/// uniformly random per character.
///
/// No uniqueness check against existing accounts; the service rejects
/// duplicates at creation time.
pub fn generate_username(length: usize) -> String {
    let mut rng = rand::rng();
    let alphabet: Vec<u8> = [LOWER, DIGITS].concat();
    (0..length).map(|_| pick(&mut rng, &alphabet)).collect()
}

/// Generate a random password containing at least one uppercase letter,
/// one lowercase letter, one digit, and one symbol from `!@#$%&*`.
///
/// Remaining positions are drawn uniformly from the full alphabet, then the
/// whole sequence is shuffled so the guaranteed characters are not
/// positionally predictable. Lengths below 4 still yield the four
/// guaranteed characters.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    let full: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS].concat();

    let mut password = vec![
        pick(&mut rng, UPPER),
        pick(&mut rng, LOWER),
        pick(&mut rng, DIGITS),
        pick(&mut rng, SYMBOLS),
    ];
    for _ in 0..length.saturating_sub(password.len()) {
        password.push(pick(&mut rng, &full));
    }
    password.shuffle(&mut rng);
    password.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_has_requested_length_and_charset() {
        for length in [1, 10, 32] {
            let username = generate_username(length);
            assert_eq!(username.len(), length);
            assert!(
                username
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn password_contains_all_character_classes() {
        for length in [4, 16, 64] {
            let password = generate_password(length);
            assert_eq!(password.len(), length);
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_lowercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
            assert!(password.chars().any(|c| SYMBOLS.contains(&(c as u8))));
        }
    }

    #[test]
    fn short_password_still_covers_classes() {
        let password = generate_password(2);
        assert_eq!(password.len(), 4);
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| SYMBOLS.contains(&(c as u8))));
    }
}
