use fxhash::FxHashSet;
use rand::Rng;

use crate::problem::node::NodeIdx;

/// Order crossover (OX) on interior permutations: copy a window of the first
/// parent, then fill the remaining positions (wrapping from just past the
/// window) with the second parent's items in order.
pub(crate) fn order_crossover(
    parent1: &[NodeIdx],
    parent2: &[NodeIdx],
    rng: &mut impl Rng,
) -> Vec<NodeIdx> {
    let n = parent1.len();
    if n < 2 {
        return parent1.to_vec();
    }

    let cut_start = rng.random_range(0..n - 1);
    let cut_end = rng.random_range(cut_start + 1..n);

    let mut child: Vec<Option<NodeIdx>> = vec![None; n];
    child[cut_start..=cut_end]
        .iter_mut()
        .zip(&parent1[cut_start..=cut_end])
        .for_each(|(slot, &item)| *slot = Some(item));

    let copied: FxHashSet<NodeIdx> = parent1[cut_start..=cut_end].iter().copied().collect();
    let mut donors = parent2.iter().copied().filter(|item| !copied.contains(item));

    for position in (cut_end + 1..n).chain(0..cut_start) {
        child[position] = donors.next();
    }

    child
        .into_iter()
        .map(|slot| slot.expect("parents must permute the same items"))
        .collect()
}

/// One of three interior mutations, chosen uniformly: swap two positions,
/// reverse a sub-segment, or move one element elsewhere.
pub(crate) fn mutate(interior: &mut Vec<NodeIdx>, rng: &mut impl Rng) {
    let n = interior.len();
    if n < 2 {
        return;
    }

    match rng.random_range(0..3) {
        0 => {
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            interior.swap(i, j);
        }
        1 => {
            let i = rng.random_range(0..n);
            let j = rng.random_range(i..n);
            interior[i..=j].reverse();
        }
        _ => {
            let from = rng.random_range(0..n);
            let item = interior.remove(from);
            let to = rng.random_range(0..=interior.len());
            interior.insert(to, item);
        }
    }
}

/// Force the interior back into a permutation of `{1, …, num_nodes − 1}`:
/// duplicates and out-of-range entries are replaced in place by missing ids,
/// leftovers are appended, and the result is cut to length.
pub(crate) fn repair(interior: Vec<NodeIdx>, num_nodes: usize) -> Vec<NodeIdx> {
    let target_len = num_nodes - 1;

    let missing: Vec<NodeIdx> = (1..num_nodes)
        .map(NodeIdx::new)
        .filter(|idx| !interior.contains(idx))
        .collect();
    let mut replacements = missing.into_iter();

    let mut seen: FxHashSet<NodeIdx> = FxHashSet::default();
    let mut repaired = Vec::with_capacity(target_len);

    for idx in interior {
        if idx.get() >= 1 && idx.get() < num_nodes && seen.insert(idx) {
            repaired.push(idx);
        } else if let Some(replacement) = replacements.next() {
            seen.insert(replacement);
            repaired.push(replacement);
        }
    }

    repaired.extend(replacements);
    repaired.truncate(target_len);
    repaired
}
