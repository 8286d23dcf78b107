//! End-to-end selection over a small taxonomy with two tight blobs and an
//! outlier.

use std::sync::Arc;

use protoframe_cluster::*;
use protoframe_lexicon::Lexicon;
use protoframe_similarity::{DistanceMatrixBuilder, MatrixConfig, SimilarityConfig, SimilarityEngine};
use protoframe_types::{FrameElement, FrameInstance};

const SENSES: [(&str, &str); 7] = [
    ("1", "dog.n.01"),
    ("2", "chair.n.01"),
    ("3", "cat.n.01"),
    ("4", "table.n.01"),
    ("5", "wolf.n.01"),
    ("6", "desk.n.01"),
    ("7", "rock.n.01"),
];

fn lexicon() -> Arc<Lexicon> {
    let mut b = Lexicon::builder();
    for (id, name) in SENSES {
        b.sense_version(id, &format!("10{}", id)).sense_name(id, name);
    }
    // deep chains so siblings are close and the two blobs are far apart
    b.hypernym("animal.n.01", "a4")
        .hypernym("a4", "a3")
        .hypernym("a3", "a2")
        .hypernym("a2", "a1")
        .hypernym("a1", "entity.n.01")
        .hypernym("furniture.n.01", "b4")
        .hypernym("b4", "b3")
        .hypernym("b3", "b2")
        .hypernym("b2", "b1")
        .hypernym("b1", "entity.n.01")
        .hypernym("dog.n.01", "animal.n.01")
        .hypernym("cat.n.01", "animal.n.01")
        .hypernym("wolf.n.01", "animal.n.01")
        .hypernym("chair.n.01", "furniture.n.01")
        .hypernym("table.n.01", "furniture.n.01")
        .hypernym("desk.n.01", "furniture.n.01")
        .hypernym("rock.n.01", "entity.n.01");
    Arc::new(b.build().unwrap())
}

/// f1 dog, f2 chair, f3 cat, f4 table, f5 wolf, f6 desk, f7 rock.
fn group() -> Vec<FrameInstance> {
    (1..=7)
        .map(|i| {
            FrameInstance::new(
                format!("f{}", i),
                "Possession",
                vec![FrameElement::new("Theme", format!("<http://wn/10{}>", i))],
            )
        })
        .collect()
}

fn builder() -> Arc<DistanceMatrixBuilder> {
    let engine = Arc::new(SimilarityEngine::new(lexicon(), SimilarityConfig::default()));
    Arc::new(DistanceMatrixBuilder::new(engine, &MatrixConfig::default()).unwrap())
}

#[test]
fn hierarchical_keeps_one_medoid_per_large_cluster() {
    let selector = HierarchicalSelector::new(builder(), 0.3, 3);
    let clusters = selector.clusters(&group()).unwrap();

    let members: Vec<_> = clusters.iter().map(|c| c.members.clone()).collect();
    assert_eq!(members, vec![vec![0, 2, 4], vec![1, 3, 5], vec![6]]);
    assert_eq!(clusters[2].medoid, None);

    let prototypes = selector.select(&group()).unwrap();
    assert_eq!(prototypes.keys().collect::<Vec<_>>(), vec!["f1", "f2"]);
    assert_eq!(prototypes["f2"].elements["theme"], "102");
    assert_eq!(prototypes["f2"].frame_type, "Possession");
}

#[test]
fn hierarchical_min_cluster_size_is_inclusive() {
    let selector = HierarchicalSelector::new(builder(), 0.3, 1);
    let prototypes = selector.select(&group()).unwrap();
    assert_eq!(prototypes.len(), 3);
    assert!(prototypes.contains_key("f7"));
}

#[test]
fn partitional_medoids_come_from_both_blobs() {
    let config = SelectionConfig {
        strategy: StrategyKind::Partitional,
        ..SelectionConfig::default()
    };
    let selector = build_selector(&config, Some(builder())).unwrap();
    assert_eq!(selector.name(), "partitional");

    // n = 7, percentage 10 -> k = 2
    let prototypes = selector.select(&group()).unwrap();
    assert_eq!(prototypes.len(), 2);
    let animals = ["f1", "f3", "f5"];
    let furniture = ["f2", "f4", "f6"];
    assert_eq!(
        prototypes.keys().filter(|k| animals.contains(&k.as_str())).count(),
        1
    );
    assert_eq!(
        prototypes.keys().filter(|k| furniture.contains(&k.as_str())).count(),
        1
    );
    assert_eq!(selector.select(&group()).unwrap(), prototypes);
}

#[test]
fn strategies_share_the_output_shape() {
    let group = group();
    for strategy in [
        StrategyKind::Frequency,
        StrategyKind::Hierarchical,
        StrategyKind::Partitional,
    ] {
        let config = SelectionConfig {
            strategy,
            top: 3,
            ..SelectionConfig::default()
        };
        let selector = build_selector(&config, Some(builder())).unwrap();
        let prototypes = selector.select(&group).unwrap();
        assert!(!prototypes.is_empty(), "{}", strategy);
        for (id, record) in &prototypes {
            let source = group.iter().find(|i| &i.id == id).unwrap();
            assert_eq!(record.frame_type, source.frame_type);
            assert_eq!(record.elements, source.role_map());
        }
    }
}

#[test]
fn partitional_rejects_zero_percentage() {
    let config = SelectionConfig {
        strategy: StrategyKind::Partitional,
        percentage: 0,
        ..SelectionConfig::default()
    };
    assert_eq!(
        build_selector(&config, Some(builder())).err(),
        Some(ClusterError::ZeroPercentage)
    );
}
