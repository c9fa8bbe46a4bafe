use crate::*;
use alloc::{string::ToString, vec, vec::Vec};
use approx::assert_relative_eq;
use num_traits::Float;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn test_rows() -> Vec<LabeledExample<i64>> {
    [
        [1.0, 2.0, 0.0],
        [1.0, 3.0, 0.0],
        [8.0, 8.0, 1.0],
        [9.0, 9.0, 1.0],
    ]
    .iter()
    .map(|row| LabeledExample::from_row(row).unwrap())
    .collect()
}

fn neighbor(index: usize, distance: f64) -> RankedNeighbor {
    RankedNeighbor { index, distance }
}

#[test]
fn test_euclidean_distance() {
    assert_relative_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
    assert_relative_eq!(euclidean(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
    assert_relative_eq!(euclidean::<f64>(&[], &[]).unwrap(), 0.0);
    assert_relative_eq!(euclidean(&[1.0f32], &[-1.0f32]).unwrap(), 2.0f32);
}

#[test]
fn test_euclidean_dimension_mismatch() {
    assert_eq!(
        Euclidean.distance(&[1.0, 2.0], &[1.0]),
        Err(Error::DimensionMismatch { left: 2, right: 1 })
    );
}

#[test]
fn test_rank_orders_by_distance_then_index() {
    let training = [[5.0], [1.0], [-1.0], [0.0], [3.0]];
    let ranked = rank(&Euclidean, &[0.0], &training).unwrap();
    assert_eq!(
        ranked,
        vec![
            neighbor(3, 0.0),
            neighbor(1, 1.0),
            neighbor(2, 1.0),
            neighbor(4, 3.0),
            neighbor(0, 5.0),
        ]
    );
}

#[test]
fn test_rank_fails_on_any_mismatch() {
    let training: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0]];
    assert_eq!(
        rank(&Euclidean, &[0.0, 0.0], &training),
        Err(Error::DimensionMismatch { left: 2, right: 1 })
    );
}

#[test]
fn test_vote_majority() {
    let labels = [0, 0, 1, 1, 1];
    let top = [neighbor(2, 0.1), neighbor(0, 0.2), neighbor(3, 0.3)];
    assert_eq!(vote(&top, &labels), Ok(&1));
}

#[test]
fn test_vote_tie_goes_to_smallest_label() {
    let labels = [2, 1, 0, 2];
    let top = [neighbor(0, 0.1), neighbor(2, 0.2)];
    assert_eq!(vote(&top, &labels), Ok(&0));

    let labels = ["S2", "S1", "S3"];
    let top = [neighbor(0, 0.1), neighbor(1, 0.1), neighbor(2, 0.1)];
    assert_eq!(vote(&top, &labels), Ok(&"S1"));
}

#[test]
fn test_vote_rejects_bad_input() {
    let labels = [0, 1];
    assert!(matches!(
        vote::<i32>(&[], &labels),
        Err(Error::InvalidArgument { name: "top_k", .. })
    ));
    assert!(matches!(
        vote(&[neighbor(5, 0.0)], &labels),
        Err(Error::InvalidArgument { name: "top_k", .. })
    ));
}

#[test]
fn test_split_sizes_and_reproducibility() {
    let data: Vec<usize> = (0..10).collect();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    let first = split(&data, 0.7, &mut rng).unwrap();
    assert_eq!(first.training.len(), 7);
    assert_eq!(first.testing.len(), 3);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    let second = split(&data, 0.7, &mut rng).unwrap();
    assert_eq!(first, second);

    let mut all: Vec<usize> = first.training.iter().chain(&first.testing).copied().collect();
    all.sort_unstable();
    assert_eq!(all, data);
}

#[test]
fn test_split_full_ratio_leaves_testing_empty() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let Split { training, testing } = split(&[1, 2, 3], 1.0, &mut rng).unwrap();
    assert_eq!(training.len(), 3);
    assert!(testing.is_empty());
}

#[test]
fn test_split_rejects_bad_ratio() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    for ratio in [0.0, -0.5, 1.5, f64::NAN] {
        assert!(matches!(
            split(&[1, 2, 3], ratio, &mut rng),
            Err(Error::InvalidArgument {
                name: "train_ratio",
                ..
            })
        ));
    }
    assert!(matches!(
        split::<u8, _>(&[], 0.5, &mut rng),
        Err(Error::InvalidArgument { name: "dataset", .. })
    ));
}

#[test]
fn test_accuracy() {
    assert_relative_eq!(accuracy(&[1, 0, 1, 1], &[1, 1, 1, 0]).unwrap(), 50.0);
    assert_relative_eq!(accuracy(&["a", "b"], &["a", "b"]).unwrap(), 100.0);
    assert_relative_eq!(accuracy(&[0, 0, 0], &[1, 1, 1]).unwrap(), 0.0);
    let s = score(&[1, 2, 3], &[1, 2, 4]).unwrap();
    assert_eq!((s.correct(), s.total()), (2, 3));
    assert_relative_eq!(s.percent(), 200.0 / 3.0);
}

#[test]
fn test_accuracy_rejects_mismatched_or_empty() {
    assert!(matches!(
        accuracy(&[1, 0, 1], &[1, 0]),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        accuracy::<u8>(&[], &[]),
        Err(Error::InvalidArgument { .. })
    ));
    // No score of zero predictions exists to yield a NaN percentage.
    assert!(score::<u8>(&[], &[]).is_err());
}

#[test]
fn test_from_row_and_extract_labels() {
    let example = LabeledExample::from_row(&[1.5, 2.5, 3.0]).unwrap();
    assert_eq!(example.features.as_slice(), &[1.5, 2.5]);
    assert_eq!(example.label, 3);

    let rows = vec![vec![0.5, 2.0], vec![0.1, 0.0]];
    assert_eq!(extract_labels(&rows), Ok(vec![2, 0]));
    assert!(extract_labels(&[vec![0.5, 1.5]]).is_err());
    assert!(LabeledExample::from_row(&[]).is_err());
}

#[test]
fn test_dataset_rejects_ragged_rows() {
    let err = Dataset::new(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn test_knn_predicts_closest_class() {
    let knn = Knn::new(test_rows()).unwrap().k(3);
    assert_eq!(knn.predict(&[1.0, 2.5]), Ok(&0));

    let neighbors = knn.neighbors(&[1.0, 2.5]).unwrap();
    let indices: Vec<usize> = neighbors.iter().map(|(n, _)| n.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_relative_eq!(neighbors[0].0.distance, 0.5);
    assert_relative_eq!(neighbors[1].0.distance, 0.5);
}

#[test]
fn test_knn_validates_k_before_ranking() {
    let knn = Knn::new(test_rows()).unwrap();
    // The query is malformed, but k must be rejected first.
    for k in [0, 5] {
        let err = knn.clone().k(k).classify(&[[0.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "k", .. }));
    }
}

#[test]
fn test_knn_rejects_bad_training_sets() {
    assert!(matches!(
        Knn::<i64>::new(vec![]),
        Err(Error::InvalidArgument {
            name: "training",
            ..
        })
    ));
    assert_eq!(
        Knn::new(vec![
            LabeledExample::new([0.0, 0.0], 0),
            LabeledExample::new([0.0], 1),
        ])
        .unwrap_err(),
        Error::DimensionMismatch { left: 2, right: 1 }
    );
}

#[test]
fn test_knn_rejects_non_finite_training_vectors() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = Knn::new(vec![
            LabeledExample::new([0.0, 0.0], 0),
            LabeledExample::new([1.0, bad], 1),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                name: "training",
                ..
            }
        ));
    }
}

#[test]
fn test_knn_rejects_non_finite_queries() {
    let knn = Knn::new(vec![
        LabeledExample::new([0.0], 7),
        LabeledExample::new([100.0], 9),
    ])
    .unwrap();
    assert!(matches!(
        knn.predict(&[f64::NAN]),
        Err(Error::InvalidArgument { name: "query", .. })
    ));
    assert!(matches!(
        knn.neighbors(&[f64::INFINITY]),
        Err(Error::InvalidArgument { name: "query", .. })
    ));

    let err = knn.classify(&[[1.0], [f64::NAN]]).unwrap_err();
    assert!(matches!(err, Error::Query { index: 1, .. }));
    assert!(matches!(
        err.root(),
        Error::InvalidArgument { name: "query", .. }
    ));
}

#[test]
fn test_rank_rejects_nan_distance() {
    // inf - inf is NaN, which would otherwise sort ahead of every real distance.
    let training = [[f64::INFINITY], [5.0], [1.0]];
    assert!(matches!(
        rank(&Euclidean, &[f64::INFINITY], &training),
        Err(Error::InvalidArgument { name: "query", .. })
    ));
}

#[test]
fn test_classify_aborts_on_first_bad_query() {
    let knn = Knn::new(test_rows()).unwrap();
    let queries: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0, 3.0]];
    let err = knn.classify(&queries).unwrap_err();
    assert_eq!(
        err,
        Error::Query {
            index: 1,
            source: alloc::boxed::Box::new(Error::DimensionMismatch { left: 1, right: 2 }),
        }
    );
    assert_eq!(
        err.root(),
        &Error::DimensionMismatch { left: 1, right: 2 }
    );
}

#[test]
fn test_classify_each_reports_per_query() {
    let knn = Knn::new(test_rows()).unwrap();
    let queries: Vec<Vec<f64>> = vec![vec![9.0, 8.0], vec![1.0], vec![0.0, 0.0]];
    let results = knn.classify_each(&queries).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(1));
    assert!(matches!(results[1], Err(Error::DimensionMismatch { .. })));
    assert_eq!(results[2], Ok(0));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::DimensionMismatch { left: 3, right: 2 }.to_string(),
        "dimension mismatch: 3 != 2"
    );
    assert_eq!(
        Error::Parse {
            row: 4,
            column: 2,
            token: "abc".to_string()
        }
        .to_string(),
        "failed to parse \"abc\" at row 4, column 2"
    );
    assert_eq!(
        Error::invalid("k", "0 is not in 1..=4").to_string(),
        "invalid argument 'k': 0 is not in 1..=4"
    );
}

struct Manhattan;

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        if a.len() != b.len() {
            return Err(Error::DimensionMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        Ok(a.iter().zip(b).map(|(&x, &y)| Float::abs(x - y)).sum())
    }
}

#[test]
fn test_knn_with_custom_metric() {
    // Under L1 the query is closer to "a"; under L2 it is closer to "b".
    let training = vec![
        LabeledExample::new([0.0, 0.0], "a"),
        LabeledExample::new([4.6, 1.6], "b"),
    ];
    let query = [3.0, 0.0];
    let l1 = Knn::with_metric(Manhattan, training.clone()).unwrap();
    let l2 = Knn::new(training).unwrap();
    assert_eq!(l1.predict(&query), Ok(&"a"));
    assert_eq!(l2.predict(&query), Ok(&"b"));
}

#[test]
fn test_knn_accessors() {
    let knn = Knn::new(test_rows()).unwrap();
    assert_eq!(knn.len(), 4);
    assert!(!knn.is_empty());
    assert_eq!(knn.dim(), 2);
    assert_eq!(knn.get_settings(), KnnSettings::default());
    let (features, label) = knn.get(2).unwrap();
    assert_eq!(features.as_slice(), &[8.0, 8.0]);
    assert_eq!(*label, 1);
    assert!(knn.get(4).is_none());

    let knn = knn.settings(KnnSettings { k: 4 });
    assert_eq!(knn.get_settings().k, 4);
}
