//! Randomized status-update text for the tweet quest.
//!
//! Combinatorial phrase builder over four word pools. The structure is
//! deterministic (five fixed templates), the selection per slot is random so
//! repeated runs do not trip the platform's duplicate-content filter.

use rand::Rng;

const INTROS: &[&str] = &[
    "Just discovered",
    "Excited about",
    "Loving",
    "Can't stop using",
    "Really impressed with",
    "Been exploring",
    "Just joined",
    "Having fun with",
];

const SUBJECTS: &[&str] = &[
    "the ecosystem",
    "this platform",
    "the community",
    "web3 rewards",
    "blockchain rewards",
    "this project",
    "loyalty platform",
    "the future",
];

const ACTIONS: &[&str] = &[
    "building",
    "growing",
    "connecting",
    "earning",
    "exploring",
    "learning",
    "engaging",
    "contributing",
    "participating",
];

const ADJECTIVES: &[&str] = &[
    "amazing",
    "incredible",
    "awesome",
    "fantastic",
    "great",
    "solid",
    "promising",
    "innovative",
    "exciting",
    "powerful",
];

/// Build one random status text mentioning @use_corn.
pub fn random_status() -> String {
    let mut rng = rand::thread_rng();

    let intro = pick(INTROS, &mut rng);
    let subject = pick(SUBJECTS, &mut rng);
    let action = pick(ACTIONS, &mut rng);
    let adjective = pick(ADJECTIVES, &mut rng);

    let templates = [
        format!("{intro} {subject} {action} with @use_corn {adjective} experience!"),
        format!("{intro} @use_corn! {adjective} {subject} for {action} together!"),
        format!("@use_corn {subject} is {adjective}! {intro} {action} here!"),
        format!("{action} on @use_corn {adjective} {subject} {intro} today!"),
        format!("{adjective} {subject} on @use_corn! {intro} {action} now!"),
    ];

    pick(&templates, &mut rng).clone()
}

fn pick<'a, T>(pool: &'a [T], rng: &mut impl Rng) -> &'a T {
    &pool[rng.gen_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mentions_the_handle() {
        for _ in 0..50 {
            let text = random_status();
            assert!(text.contains("@use_corn"), "missing handle in: {}", text);
        }
    }

    #[test]
    fn test_status_is_tweet_sized() {
        for _ in 0..50 {
            let text = random_status();
            assert!(!text.is_empty());
            assert!(text.len() <= 280, "too long: {}", text);
        }
    }

    #[test]
    fn test_statuses_vary() {
        let batch: std::collections::HashSet<String> =
            (0..100).map(|_| random_status()).collect();
        // 23k+ combinations, 100 draws collapsing to one would mean a broken picker
        assert!(batch.len() > 1);
    }
}
