//! Character sets of normalized keys.

/// Which of the 36 key characters `[a-z0-9]` occur in a key.
///
/// Characters outside that alphabet never occur in a normalized key, so they
/// have no bit and are never contained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CharMask(u64);

impl CharMask {
    pub fn from_key(key: &str) -> Self {
        Self(key.chars().fold(0, |mask, ch| mask | Self::bit(ch)))
    }

    #[inline]
    fn bit(ch: char) -> u64 {
        match ch {
            'a'..='z' => 1 << (ch as u32 - 'a' as u32),
            '0'..='9' => 1 << (26 + ch as u32 - '0' as u32),
            _ => 0,
        }
    }

    #[inline]
    pub fn contains(self, ch: char) -> bool {
        self.0 & Self::bit(ch) != 0
    }

    /// Characters of `token`, counted per occurrence, that occur in the key.
    pub fn covered(self, token: &str) -> usize {
        token.chars().filter(|&ch| self.contains(ch)).count()
    }

    /// Whether every character of `token` occurs in the key.
    pub fn covers_all(self, token: &str) -> bool {
        token.chars().all(|ch| self.contains(ch))
    }

    /// Number of distinct characters in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
