//! Distance matrix construction against a partially failing remote
//! provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use protoframe_lexicon::Lexicon;
use protoframe_similarity::*;
use protoframe_types::{FrameElement, FrameInstance};

/// Scores every pair 0.5 except one, which fails.
struct FlakyRemote {
    broken: (String, String),
    calls: AtomicUsize,
}

impl ConceptSimilarity for FlakyRemote {
    fn name(&self) -> &str {
        "flaky"
    }

    fn similarity(&self, key1: &str, key2: &str) -> SimilarityResult<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (a, b) = (&self.broken.0, &self.broken.1);
        if (key1 == a && key2 == b) || (key1 == b && key2 == a) {
            return Err(SimilarityError::Remote("connection refused".into()));
        }
        Ok(0.5)
    }
}

fn instance(id: &str, concept: &str) -> FrameInstance {
    FrameInstance::new(
        id,
        "Commerce_buy",
        vec![FrameElement::new(
            "Goods",
            format!("<http://babelnet.org/rdf/{}>", concept),
        )],
    )
}

fn engine(remote: Arc<FlakyRemote>) -> Arc<SimilarityEngine> {
    let config = SimilarityConfig {
        element_method: ElementMethod::Remote,
        ..SimilarityConfig::default()
    };
    let lexicon = Arc::new(Lexicon::builder().build().unwrap());
    Arc::new(SimilarityEngine::new(lexicon, config).with_remote(remote))
}

#[test]
fn failed_pair_gets_maximum_distance() {
    let remote = Arc::new(FlakyRemote {
        broken: ("bn:001n".into(), "bn:003n".into()),
        calls: AtomicUsize::new(0),
    });
    let builder = DistanceMatrixBuilder::new(engine(remote.clone()), &MatrixConfig::default()).unwrap();
    let group = vec![
        instance("f1", "s001n"),
        instance("f2", "s002n"),
        instance("f3", "s003n"),
    ];

    let matrix = builder.build(&group).unwrap();

    // (f1,f2), (f1,f3), (f2,f3)
    assert_eq!(matrix.condensed(), &[0.5, 1.0, 0.5]);
    assert_eq!(matrix.order(), &["f1", "f2", "f3"]);
    assert_eq!(remote.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn cached_scores_are_reused_across_builds() {
    let remote = Arc::new(FlakyRemote {
        broken: ("bn:none".into(), "bn:none".into()),
        calls: AtomicUsize::new(0),
    });
    let builder = DistanceMatrixBuilder::new(engine(remote.clone()), &MatrixConfig { workers: 2 }).unwrap();
    let group: Vec<_> = (0..5)
        .map(|i| instance(&format!("f{}", i), &format!("s00{}n", i)))
        .collect();

    let first = builder.build(&group).unwrap();
    let second = builder.build(&group).unwrap();

    assert_eq!(first, second);
    assert_eq!(remote.calls.load(Ordering::SeqCst), condensed_len(5));
}

#[test]
fn identical_fillers_have_zero_distance() {
    let remote = Arc::new(FlakyRemote {
        broken: ("bn:none".into(), "bn:none".into()),
        calls: AtomicUsize::new(0),
    });
    let builder = DistanceMatrixBuilder::new(engine(remote.clone()), &MatrixConfig::default()).unwrap();
    let group = vec![instance("f1", "s001n"), instance("f2", "s001n")];

    let matrix = builder.build(&group).unwrap();

    assert_eq!(matrix.distance(0, 1), 0.0);
    assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn duplicate_ids_are_rejected() {
    let remote = Arc::new(FlakyRemote {
        broken: ("bn:none".into(), "bn:none".into()),
        calls: AtomicUsize::new(0),
    });
    let builder = DistanceMatrixBuilder::new(engine(remote), &MatrixConfig::default()).unwrap();
    let group = vec![instance("f1", "s001n"), instance("f1", "s002n")];

    assert_eq!(
        builder.build(&group).unwrap_err(),
        SimilarityError::DuplicateInstance("f1".into())
    );
}

#[test]
fn empty_and_singleton_groups() {
    let remote = Arc::new(FlakyRemote {
        broken: ("bn:none".into(), "bn:none".into()),
        calls: AtomicUsize::new(0),
    });
    let builder = DistanceMatrixBuilder::new(engine(remote), &MatrixConfig::default()).unwrap();
    assert!(builder.build(&[]).unwrap().is_empty());
    let one = builder.build(&[instance("f1", "s001n")]).unwrap();
    assert_eq!(one.len(), 1);
    assert!(one.condensed().is_empty());
}
