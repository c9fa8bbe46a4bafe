use crate::{Error, Metric, Result};
use alloc::{format, vec::Vec};
use space::Neighbor;

/// A training-set index paired with its distance to the query.
pub type RankedNeighbor = Neighbor<f64>;

/// Ranks every training vector by its distance to `query`, closest first.
///
/// The returned ranking always has one entry per training vector. Entries with exactly
/// equal distances are ordered by ascending training index, so the cut at `k` is
/// deterministic. A distance that comes out NaN fails the ranking, since it has no place in
/// the order.
pub fn rank<M, T>(metric: &M, query: &[f64], training: &[T]) -> Result<Vec<RankedNeighbor>>
where
    M: Metric + ?Sized,
    T: AsRef<[f64]>,
{
    let mut ranked = training
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let distance = metric.distance(query, key.as_ref())?;
            if distance.is_nan() {
                return Err(Error::invalid(
                    "query",
                    format!("distance to training vector {} is NaN", index),
                ));
            }
            Ok(Neighbor { index, distance })
        })
        .collect::<Result<Vec<_>>>()?;
    ranked.sort_unstable_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.index.cmp(&b.index))
    });
    Ok(ranked)
}
