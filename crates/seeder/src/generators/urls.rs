//! Synthetic author URL generation.

use rand::Rng;

/// Scheme and host every generated URL starts with. Purely cosmetic; no real
/// network resource is implied.
pub const URL_BASE: &str = "https://example.com/";

/// Fixed path vocabulary.
pub const PATHS: [&str; 12] = [
    "about",
    "contact",
    "services",
    "products",
    "blog",
    "faq",
    "terms",
    "privacy",
    "portfolio",
    "team",
    "careers",
    "support",
];

/// Generates a plausible-looking placeholder URL: a uniformly chosen path
/// segment, with a `?id=<1..=100>` query string appended half the time.
pub fn random_url(rng: &mut impl Rng) -> String {
    let path = PATHS[rng.gen_range(0..PATHS.len())];

    if rng.gen_bool(0.5) {
        format!("{URL_BASE}{path}?id={}", rng.gen_range(1..=100u32))
    } else {
        format!("{URL_BASE}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_url_shape() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let url = random_url(&mut rng);
            let rest = url.strip_prefix(URL_BASE).expect("url starts with base");

            let (path, query) = match rest.split_once('?') {
                Some((p, q)) => (p, Some(q)),
                None => (rest, None),
            };
            assert!(PATHS.contains(&path), "unknown path segment {path:?}");

            if let Some(query) = query {
                let id: u32 = query
                    .strip_prefix("id=")
                    .expect("query is id=<n>")
                    .parse()
                    .expect("query id is numeric");
                assert!((1..=100).contains(&id));
            }
        }
    }

    #[test]
    fn test_query_string_appears_both_ways() {
        let mut rng = StdRng::seed_from_u64(7);
        let urls: Vec<String> = (0..100).map(|_| random_url(&mut rng)).collect();

        assert!(urls.iter().any(|u| u.contains('?')));
        assert!(urls.iter().any(|u| !u.contains('?')));
    }
}
