use rand::{distributions::Alphanumeric, Rng};

/// Default tag length. 62^5 possible tags, so collisions are rare but not
/// impossible; the store surfaces an insert collision as
/// `LedgerError::TagCollision` instead of overwriting.
pub const TAG_LEN: usize = 5;

/// Produces a short randomized alphanumeric transaction tag.
pub fn generate_unique_tag() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TAG_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_has_expected_length_and_charset() {
        for _ in 0..100 {
            let tag = generate_unique_tag();
            assert_eq!(tag.len(), TAG_LEN);
            assert!(tag.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn consecutive_tags_differ() {
        // Not a uniqueness guarantee, but two identical draws in a row would
        // almost certainly mean a broken generator.
        assert_ne!(generate_unique_tag(), generate_unique_tag());
    }
}
