//! Reading-time estimate.

/// Number of words in `text`, split on whitespace runs.
///
/// Blank text still counts as one (empty) word, so every article reads
/// in at least a minute.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}

/// Whole minutes needed to read `words`, rounded up.
pub fn reading_minutes(words: usize, words_per_minute: u32) -> u32 {
    let per_minute = words_per_minute.max(1) as usize;
    u32::try_from(words.div_ceil(per_minute)).unwrap_or(u32::MAX)
}

/// Reading time of an article body.
pub fn estimate(content: &str, words_per_minute: u32) -> u32 {
    reading_minutes(count_words(content), words_per_minute)
}
