//! Randomised bounds on the match score using `quickcheck`.

use chrono::{Duration, TimeZone, Utc};
use fx_matcher::engine::Scorer;
use fx_matcher::prelude::*;
use quickcheck::quickcheck;
use rust_decimal::Decimal;

fn scorer() -> Scorer {
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    Scorer::new(&MatcherConfig::default(), now)
}

quickcheck! {
    fn score_is_bounded(rate: u32, liquidity: u32, age_minutes: u16) -> bool {
        let scorer = scorer();
        let rate = Decimal::from(rate);
        let timestamp = scorer.now() - Duration::minutes(i64::from(age_minutes));

        let score = scorer
            .score(rate, Decimal::from(liquidity), timestamp)
            .unwrap();
        // Liquidity and recency contribute at most 0.4 + 0.2
        let ceiling = rate * Decimal::new(4, 1) / Decimal::from(1000) + Decimal::new(6, 1);

        score >= Decimal::ZERO && score <= ceiling
    }

    fn fresher_never_scores_lower(age_a: u16, age_b: u16) -> bool {
        let scorer = scorer();
        let (young, old) = if age_a <= age_b { (age_a, age_b) } else { (age_b, age_a) };
        let at = |minutes: u16| scorer.now() - Duration::minutes(i64::from(minutes));

        let young_score = scorer.score(Decimal::from(300), Decimal::from(500), at(young)).unwrap();
        let old_score = scorer.score(Decimal::from(300), Decimal::from(500), at(old)).unwrap();
        young_score >= old_score
    }

    fn more_liquidity_never_scores_lower(a: u32, b: u32) -> bool {
        let scorer = scorer();
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let now = scorer.now();

        let small_score = scorer.score(Decimal::from(300), Decimal::from(small), now).unwrap();
        let large_score = scorer.score(Decimal::from(300), Decimal::from(large), now).unwrap();
        large_score >= small_score
    }
}
