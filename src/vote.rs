use crate::{Error, RankedNeighbor, Result};
use ahash::RandomState;
use alloc::format;
use core::hash::Hash;
use hashbrown::HashMap;

/// Picks the most common label among `top_k`.
///
/// Every neighbor casts one vote for `training_labels[neighbor.index]`. When several labels
/// share the highest count, the smallest label wins (the lowest class index for integer
/// labels). The winner is always one of the labels in `training_labels`.
pub fn vote<'a, L>(top_k: &[RankedNeighbor], training_labels: &'a [L]) -> Result<&'a L>
where
    L: Eq + Hash + Ord,
{
    if top_k.is_empty() {
        return Err(Error::invalid("top_k", "cannot vote without neighbors"));
    }

    let mut votes: HashMap<&L, usize, RandomState> =
        HashMap::with_capacity_and_hasher(top_k.len(), RandomState::with_seeds(0, 0, 0, 0));
    for neighbor in top_k {
        let label = training_labels.get(neighbor.index).ok_or_else(|| {
            Error::invalid(
                "top_k",
                format!(
                    "neighbor index {} is out of range for {} training labels",
                    neighbor.index,
                    training_labels.len()
                ),
            )
        })?;
        *votes.entry(label).or_insert(0) += 1;
    }

    votes
        .into_iter()
        .max_by(|(a_label, a_count), (b_label, b_count)| {
            a_count.cmp(b_count).then_with(|| b_label.cmp(a_label))
        })
        .map(|(label, _)| label)
        .ok_or_else(|| Error::invalid("top_k", "cannot vote without neighbors"))
}
