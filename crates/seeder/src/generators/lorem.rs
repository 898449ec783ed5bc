//! Lorem-ipsum text generation.

use rand::Rng;

/// Fixed vocabulary the generator samples from. All tokens are lowercase and
/// ASCII, so capitalizing the first character of the output is byte-safe.
pub const WORDS: [&str; 34] = [
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
];

/// Generates a run of filler text with a word count drawn uniformly from
/// `[min_words, max_words]` inclusive.
///
/// Words are sampled independently with replacement, joined with single
/// spaces, the first character is capitalized, and the result is terminated
/// with exactly one period. There is no sentence structure or repetition
/// avoidance; this is intentionally flat placeholder text.
pub fn generate(min_words: usize, max_words: usize, rng: &mut impl Rng) -> String {
    debug_assert!(min_words <= max_words);

    let count = rng.gen_range(min_words..=max_words);
    let mut words = Vec::with_capacity(count);
    for _ in 0..count {
        words.push(WORDS[rng.gen_range(0..WORDS.len())]);
    }

    let text = words.join(" ");
    let mut out = String::with_capacity(text.len() + 1);
    let mut chars = text.trim_end().chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
    out.push('.');
    out
}
