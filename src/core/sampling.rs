/// Sampling primitives: stateless draws over tag pools and weighted sources.
///
/// Every primitive takes the random source as a parameter so callers decide
/// between a seeded generator, a thread RNG or a shared one.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::schema::pool::{AttributeGroup, Source, TagPool, Variant, WeightedSource, WeightedTag};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplingError {
    #[error("cannot pick a tag from an empty pool")]
    EmptyPool,
    #[error("attribute group '{0}' has no variants")]
    EmptyGroup(String),
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("weight {0} is negative or not finite")]
    InvalidWeight(f64),
    #[error("weighted choice has no entry with a positive weight")]
    NoValidEntries,
}

fn check_probability(probability: f64) -> Result<(), SamplingError> {
    // NaN fails the range check too
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(SamplingError::InvalidProbability(probability))
    }
}

/// Pick one tag uniformly at random.
pub fn uniform_pick<'a, R: Rng + ?Sized>(
    pool: &'a TagPool,
    rng: &mut R,
) -> Result<&'a str, SamplingError> {
    pool.as_slice()
        .choose(rng)
        .map(String::as_str)
        .ok_or(SamplingError::EmptyPool)
}

/// With probability `probability`, return one uniformly picked tag;
/// otherwise return nothing.
///
/// An empty pool is only an error when it could be drawn from, and that is
/// checked before rolling so the failure does not depend on the dice.
pub fn probabilistic_include<'a, R: Rng + ?Sized>(
    pool: &'a TagPool,
    probability: f64,
    rng: &mut R,
) -> Result<Vec<&'a str>, SamplingError> {
    check_probability(probability)?;
    if pool.is_empty() && probability > 0.0 {
        return Err(SamplingError::EmptyPool);
    }
    if rng.gen_bool(probability) {
        Ok(vec![uniform_pick(pool, rng)?])
    } else {
        Ok(Vec::new())
    }
}

/// Pick one variant of a group uniformly.
pub fn pick_variant<'a, R: Rng + ?Sized>(
    group: &'a AttributeGroup,
    rng: &mut R,
) -> Result<&'a Variant, SamplingError> {
    group
        .variants
        .choose(rng)
        .ok_or_else(|| SamplingError::EmptyGroup(group.name.clone()))
}

/// Resolve a source to the pool tags are drawn from.
pub fn resolve_source<'a, R: Rng + ?Sized>(
    source: Source<'a>,
    rng: &mut R,
) -> Result<&'a TagPool, SamplingError> {
    match source {
        Source::Pool(pool) => Ok(pool),
        Source::Group(group) => Ok(&pick_variant(group, rng)?.tags),
    }
}

/// Resolve a source and pick one tag from it.
pub fn pick_from<'a, R: Rng + ?Sized>(
    source: Source<'a>,
    rng: &mut R,
) -> Result<&'a str, SamplingError> {
    let pool = resolve_source(source, rng)?;
    uniform_pick(pool, rng)
}

/// Select one entry with probability proportional to its weight and resolve
/// it to a pool. Weights need not sum to one; zero-weight entries are never
/// selected.
pub fn weighted_choice<'a, R: Rng + ?Sized>(
    entries: &[WeightedSource<'a>],
    rng: &mut R,
) -> Result<&'a TagPool, SamplingError> {
    if entries.is_empty() {
        return Err(SamplingError::NoValidEntries);
    }
    if let Some(bad) = entries
        .iter()
        .find(|e| !e.weight.is_finite() || e.weight < 0.0)
    {
        return Err(SamplingError::InvalidWeight(bad.weight));
    }

    // Individually finite weights can still overflow when summed.
    let total: f64 = entries.iter().map(|e| e.weight).sum();
    let scale = if total.is_finite() {
        1.0
    } else {
        entries.iter().map(|e| e.weight).fold(0.0, f64::max)
    };

    let dist = WeightedIndex::<f64>::new(entries.iter().map(|e| e.weight / scale))
        .map_err(|_| SamplingError::NoValidEntries)?;
    resolve_source(entries[dist.sample(rng)].source, rng)
}

/// Weighted choice followed by a uniform pick from the chosen pool.
pub fn weighted_pick<'a, R: Rng + ?Sized>(
    entries: &[WeightedSource<'a>],
    rng: &mut R,
) -> Result<&'a str, SamplingError> {
    let pool = weighted_choice(entries, rng)?;
    uniform_pick(pool, rng)
}

/// One guaranteed pick, then for each probability in order a chance at one
/// more tag that has not been selected yet in this call.
///
/// The extra tag is drawn uniformly over the pool entries whose tag is still
/// unseen, which matches redrawing until unique without the risk of looping.
/// Once every distinct tag is taken, further successful rolls add nothing.
pub fn draw_escalating<'a, R: Rng + ?Sized>(
    pool: &'a TagPool,
    probabilities: &[f64],
    rng: &mut R,
) -> Result<Vec<&'a str>, SamplingError> {
    for &probability in probabilities {
        check_probability(probability)?;
    }

    let mut selected = Vec::with_capacity(1 + probabilities.len());
    selected.push(uniform_pick(pool, rng)?);

    for &probability in probabilities {
        if !rng.gen_bool(probability) {
            continue;
        }
        let unseen: Vec<&str> = pool.iter().filter(|t| !selected.contains(t)).collect();
        match unseen.choose(rng) {
            Some(tag) => selected.push(*tag),
            None => break,
        }
    }

    Ok(selected)
}

/// Draw exactly `count` tags, unique as far as the pool allows.
///
/// Up to the number of distinct tags the draw is without replacement. Past
/// that, every distinct tag appears once and the remainder is drawn with
/// replacement.
pub fn sample_unique_upto<'a, R: Rng + ?Sized>(
    pool: &'a TagPool,
    count: usize,
    rng: &mut R,
) -> Result<Vec<&'a str>, SamplingError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(SamplingError::EmptyPool);
    }

    let mut seen = FxHashSet::default();
    let distinct: Vec<&str> = pool.iter().filter(|t| seen.insert(*t)).collect();

    if count <= distinct.len() {
        return Ok(distinct.choose_multiple(rng, count).copied().collect());
    }

    let mut samples = distinct;
    samples.shuffle(rng);
    while samples.len() < count {
        samples.push(uniform_pick(pool, rng)?);
    }
    Ok(samples)
}

/// Include each tag independently with its own probability, keeping order.
pub fn select_independent<'a, R: Rng + ?Sized>(
    weighted_tags: &'a [WeightedTag],
    rng: &mut R,
) -> Result<Vec<&'a str>, SamplingError> {
    for wt in weighted_tags {
        check_probability(wt.probability)?;
    }

    let mut chosen = Vec::new();
    for wt in weighted_tags {
        if rng.gen_bool(wt.probability) {
            chosen.push(wt.tag.as_str());
        }
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(tags: &[&str]) -> TagPool {
        tags.iter().copied().collect()
    }

    fn expressions() -> AttributeGroup {
        AttributeGroup {
            name: "expressions".to_string(),
            variants: vec![
                Variant {
                    name: "happy".to_string(),
                    tags: pool(&["smile", "laughing"]),
                },
                Variant {
                    name: "angry".to_string(),
                    tags: pool(&["frown", "clenched teeth"]),
                },
            ],
        }
    }

    #[test]
    fn uniform_pick_returns_member() {
        let p = pool(&["cat", "dog", "fox"]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(p.contains(uniform_pick(&p, &mut rng).unwrap()));
        }
    }

    #[test]
    fn uniform_pick_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            uniform_pick(&TagPool::default(), &mut rng),
            Err(SamplingError::EmptyPool)
        );
    }

    #[test]
    fn include_zero_never_and_one_always() {
        let p = pool(&["cat", "dog"]);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            assert!(probabilistic_include(&p, 0.0, &mut rng).unwrap().is_empty());
            assert_eq!(probabilistic_include(&p, 1.0, &mut rng).unwrap().len(), 1);
        }
    }

    #[test]
    fn include_half_is_fair() {
        let p = pool(&["cat", "dog"]);
        let mut rng = StdRng::seed_from_u64(3);
        let hits = (0..10_000)
            .filter(|_| !probabilistic_include(&p, 0.5, &mut rng).unwrap().is_empty())
            .count();
        assert!(
            (4500..=5500).contains(&hits),
            "Expected roughly half inclusions, got {}/10000",
            hits
        );
    }

    #[test]
    fn include_rejects_bad_probability() {
        let p = pool(&["cat"]);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            probabilistic_include(&p, 1.5, &mut rng),
            Err(SamplingError::InvalidProbability(1.5))
        );
        assert_eq!(
            probabilistic_include(&p, -0.1, &mut rng),
            Err(SamplingError::InvalidProbability(-0.1))
        );
        assert!(matches!(
            probabilistic_include(&p, f64::NAN, &mut rng),
            Err(SamplingError::InvalidProbability(_))
        ));
    }

    #[test]
    fn include_empty_pool() {
        let empty = TagPool::default();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(probabilistic_include(&empty, 0.0, &mut rng), Ok(Vec::new()));
        assert_eq!(
            probabilistic_include(&empty, 0.3, &mut rng),
            Err(SamplingError::EmptyPool)
        );
    }

    #[test]
    fn weighted_choice_skips_zero_weight() {
        let a = pool(&["a"]);
        let b = pool(&["b"]);
        let entries = [WeightedSource::new(&a, 1.0), WeightedSource::new(&b, 0.0)];
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..1000 {
            let chosen = weighted_choice(&entries, &mut rng).unwrap();
            assert!(std::ptr::eq(chosen, &a));
        }
    }

    #[test]
    fn weighted_choice_follows_weights() {
        let natural = pool(&["forest"]);
        let urban = pool(&["street"]);
        let entries = [
            WeightedSource::new(&natural, 0.9),
            WeightedSource::new(&urban, 0.1),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let natural_hits = (0..10_000)
            .filter(|_| weighted_pick(&entries, &mut rng).unwrap() == "forest")
            .count();
        assert!(
            (8700..=9300).contains(&natural_hits),
            "Expected ~90% natural, got {}/10000",
            natural_hits
        );
    }

    #[test]
    fn weighted_choice_invalid_entries() {
        let a = pool(&["a"]);
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(
            weighted_choice(&[], &mut rng),
            Err(SamplingError::NoValidEntries)
        );
        assert_eq!(
            weighted_choice(&[WeightedSource::new(&a, 0.0)], &mut rng),
            Err(SamplingError::NoValidEntries)
        );
        assert_eq!(
            weighted_choice(&[WeightedSource::new(&a, -1.0)], &mut rng),
            Err(SamplingError::InvalidWeight(-1.0))
        );
        assert!(matches!(
            weighted_choice(&[WeightedSource::new(&a, f64::INFINITY)], &mut rng),
            Err(SamplingError::InvalidWeight(_))
        ));
    }

    #[test]
    fn weighted_choice_survives_overflowing_total() {
        let a = pool(&["a"]);
        let b = pool(&["b"]);
        let c = pool(&["c"]);
        let entries = [
            WeightedSource::new(&a, f64::MAX),
            WeightedSource::new(&b, f64::MAX),
            WeightedSource::new(&c, 0.0),
        ];
        let mut rng = StdRng::seed_from_u64(20);
        let mut seen_a = false;
        let mut seen_b = false;
        for _ in 0..200 {
            match weighted_pick(&entries, &mut rng).unwrap() {
                "a" => seen_a = true,
                "b" => seen_b = true,
                other => panic!("zero-weight entry selected: {}", other),
            }
        }
        assert!(seen_a && seen_b, "Both maximal weights should be reachable");
    }

    #[test]
    fn weighted_choice_resolves_group_variant() {
        let group = expressions();
        let entries = [WeightedSource::new(&group, 1.0)];
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen_happy = false;
        let mut seen_angry = false;
        for _ in 0..200 {
            let resolved = weighted_choice(&entries, &mut rng).unwrap();
            if resolved.contains("smile") {
                seen_happy = true;
            }
            if resolved.contains("frown") {
                seen_angry = true;
            }
        }
        assert!(seen_happy && seen_angry, "Both variants should be reachable");
    }

    #[test]
    fn empty_group_is_an_error() {
        let group = AttributeGroup {
            name: "moods".to_string(),
            variants: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(10);
        assert_eq!(
            pick_from(Source::Group(&group), &mut rng),
            Err(SamplingError::EmptyGroup("moods".to_string()))
        );
    }

    #[test]
    fn escalating_without_probabilities_draws_one() {
        let p = pool(&["cup", "book", "lamp"]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let drawn = draw_escalating(&p, &[], &mut rng).unwrap();
            assert_eq!(drawn.len(), 1);
            assert!(p.contains(drawn[0]));
        }
    }

    #[test]
    fn escalating_is_capped_by_distinct_tags() {
        let p = pool(&["cup", "book"]);
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..100 {
            let mut drawn = draw_escalating(&p, &[1.0, 1.0, 1.0], &mut rng).unwrap();
            assert_eq!(drawn.len(), 2);
            drawn.sort_unstable();
            assert_eq!(drawn, vec!["book", "cup"]);
        }
    }

    #[test]
    fn escalating_single_distinct_tag_terminates() {
        let p = pool(&["moon", "moon", "moon"]);
        let mut rng = StdRng::seed_from_u64(13);
        assert_eq!(
            draw_escalating(&p, &[1.0, 1.0], &mut rng).unwrap(),
            vec!["moon"]
        );
    }

    #[test]
    fn escalating_validates_before_drawing() {
        let p = pool(&["cup"]);
        let mut rng = StdRng::seed_from_u64(14);
        assert_eq!(
            draw_escalating(&p, &[0.5, 2.0], &mut rng),
            Err(SamplingError::InvalidProbability(2.0))
        );
        assert_eq!(
            draw_escalating(&TagPool::default(), &[0.5], &mut rng),
            Err(SamplingError::EmptyPool)
        );
    }

    #[test]
    fn unique_samples_within_pool_size() {
        let p = pool(&["a", "b", "c", "d", "e"]);
        let mut rng = StdRng::seed_from_u64(15);
        let drawn = sample_unique_upto(&p, 3, &mut rng).unwrap();
        assert_eq!(drawn.len(), 3);
        let distinct: FxHashSet<&str> = drawn.iter().copied().collect();
        assert_eq!(distinct.len(), 3);
        assert!(drawn.iter().all(|t| p.contains(t)));
    }

    #[test]
    fn unique_samples_beyond_pool_size() {
        let p = pool(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(16);
        let drawn = sample_unique_upto(&p, 7, &mut rng).unwrap();
        assert_eq!(drawn.len(), 7);
        for tag in ["a", "b", "c"] {
            assert!(drawn.contains(&tag), "missing {}", tag);
        }
        // The first pass covers every distinct tag exactly once.
        let head: FxHashSet<&str> = drawn[..3].iter().copied().collect();
        assert_eq!(head.len(), 3);
    }

    #[test]
    fn unique_samples_edge_counts() {
        let mut rng = StdRng::seed_from_u64(17);
        assert_eq!(
            sample_unique_upto(&TagPool::default(), 0, &mut rng),
            Ok(Vec::new())
        );
        assert_eq!(
            sample_unique_upto(&TagPool::default(), 2, &mut rng),
            Err(SamplingError::EmptyPool)
        );
    }

    #[test]
    fn independent_selection_keeps_order() {
        let tags = vec![
            WeightedTag::new("solo", 1.0),
            WeightedTag::new("no humans", 0.0),
            WeightedTag::new("outdoors", 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(18);
        assert_eq!(
            select_independent(&tags, &mut rng).unwrap(),
            vec!["solo", "outdoors"]
        );
    }

    #[test]
    fn independent_selection_rejects_bad_probability() {
        let tags = vec![WeightedTag::new("solo", 1.0), WeightedTag::new("x", 1.01)];
        let mut rng = StdRng::seed_from_u64(19);
        assert_eq!(
            select_independent(&tags, &mut rng),
            Err(SamplingError::InvalidProbability(1.01))
        );
    }
}
