#![deny(unsafe_code)]

use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}

/// Incremental fingerprint over several named parts (CSV sheet directories).
///
/// Each part is framed by its name and length so that moving bytes between
/// adjacent parts changes the digest.
#[derive(Default)]
pub(crate) struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub(crate) fn update(&mut self, name: &str, bytes: &[u8]) {
        self.hasher.update(name.as_bytes());
        self.hasher.update([0]);
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    pub(crate) fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn part_boundaries_matter() {
        let mut left = Fingerprint::default();
        left.update("a.csv", b"xy");
        left.update("b.csv", b"z");

        let mut right = Fingerprint::default();
        right.update("a.csv", b"x");
        right.update("b.csv", b"yz");

        assert_ne!(left.finish(), right.finish());
    }
}
