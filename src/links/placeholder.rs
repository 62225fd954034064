use rand::Rng;
use serde::{Deserialize, Serialize};

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 4;

/// Zero-width space, invisible when rendered.
pub const INVISIBLE_MARK: char = '\u{200B}';

/// How a placeholder label is made unique enough to be found again.
///
/// Uniqueness is best-effort only. Callers must tolerate the placeholder
/// not being found when the fetch settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStrategy {
    /// `base#xxxx` with four random lowercase alphanumerics.
    #[default]
    Suffix,
    /// `base` with 0..=2 zero-width marks after every character.
    Invisible,
}

impl TokenStrategy {
    pub fn generate(self, base: &str) -> String {
        let mut rng = rand::rng();
        match self {
            Self::Suffix => {
                let suffix: String = (0..SUFFIX_LEN)
                    .map(|_| char::from(SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())]))
                    .collect();
                format!("{base}#{suffix}")
            }
            Self::Invisible => {
                let mut token = String::with_capacity(base.len() * 3);
                for ch in base.chars() {
                    token.push(ch);
                    for _ in 0..rng.random_range(0..=2) {
                        token.push(INVISIBLE_MARK);
                    }
                }
                token
            }
        }
    }
}

/// Drop the zero-width marks an invisible placeholder carries.
pub fn visible_text(token: &str) -> String {
    token.chars().filter(|c| *c != INVISIBLE_MARK).collect()
}
