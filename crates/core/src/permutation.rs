//! The symmetry group of a lattice box.
//!
//! A box maps onto itself under reversal of any axis and under exchange of
//! equally long axes. The group therefore has `2^(d - z) * prod m_k!`
//! elements, where `z` counts the size-1 axes (reversing those is the
//! identity) and `m_k` counts the axes of length `k != 1`. Each element is
//! materialized as an explicit vertex-id-to-vertex-id mapping so selections
//! can be canonicalized by table lookup.

use log::debug;

use crate::VertexId;

/// All automorphisms of a lattice box, as explicit vertex permutations.
///
/// # Example
///
/// ```
/// use lattice_core::PermutationSet;
///
/// // a square has the eight symmetries of the dihedral group
/// let set = PermutationSet::new(&[3, 3]);
/// assert_eq!(set.len(), 8);
///
/// // opposite corner cells are images of each other
/// assert_eq!(set.canonical_form(&[0]), set.canonical_form(&[8]));
/// ```
#[derive(Debug, Clone)]
pub struct PermutationSet {
    perms: Vec<Vec<VertexId>>,
}

impl PermutationSet {
    /// Builds the permutation set for the given box dimensions.
    pub fn new(dims: &[VertexId]) -> Self {
        let perms = build(dims);
        debug!("built {} lattice permutations for {:?}", perms.len(), dims);
        Self { perms }
    }

    /// Returns the vertex permutations. Every inner vector has one entry
    /// per lattice vertex.
    pub fn perms(&self) -> &[Vec<VertexId>] {
        &self.perms
    }

    /// Returns the number of permutations in the set.
    pub fn len(&self) -> usize {
        self.perms.len()
    }

    /// A permutation set always contains at least the identity.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the canonical representative of a selection under the
    /// symmetries of the box: the lexicographically smallest image of the
    /// sorted selection over all permutations.
    ///
    /// Two selections canonicalize to the same vertex set iff one is a
    /// symmetry image of the other, so the result can serve as a
    /// deduplication key.
    pub fn canonical_form(&self, selection: &[VertexId]) -> Vec<VertexId> {
        let mut best: Option<Vec<VertexId>> = None;
        for perm in &self.perms {
            let mut image: Vec<VertexId> =
                selection.iter().map(|&v| perm[v as usize]).collect();
            image.sort_unstable();
            if best.as_ref().map_or(true, |best| image < *best) {
                best = Some(image);
            }
        }
        best.unwrap_or_default()
    }

    /// Returns the group size `2^(d - z) * prod m_k!` predicted for the
    /// given dimensions, without materializing the permutations.
    pub fn count(dims: &[VertexId]) -> usize {
        let ones = dims.iter().filter(|&&dim| dim == 1).count();
        let mut result = 1usize << (dims.len() - ones);

        let mut seen: Vec<VertexId> = Vec::new();
        for &dim in dims {
            if dim == 1 || seen.contains(&dim) {
                continue;
            }
            seen.push(dim);
            let same = dims.iter().filter(|&&other| other == dim).count();
            result *= factorial(same);
        }
        result
    }
}

fn factorial(n: usize) -> usize {
    (2..=n).product()
}

/// Builds the permutations by recursing over the highest axis.
///
/// The base case is the single-vertex graph with only the identity. For a
/// non-degenerate highest axis of length `h`, every lower-rank permutation
/// extends to one permutation that keeps the axis and one that reverses
/// it; each of those additionally spawns one variant per lower axis of the
/// same length with the two axes exchanged.
fn build(dims: &[VertexId]) -> Vec<Vec<VertexId>> {
    let Some((&primary, lower)) = dims.split_last() else {
        return vec![vec![0]];
    };

    let sub_perms = build(lower);
    if primary == 1 {
        return sub_perms;
    }

    // stride of each lower axis, and the vertex count of the lower box
    let mut strides = Vec::with_capacity(lower.len());
    let mut lower_count: VertexId = 1;
    for &dim in lower {
        strides.push(lower_count);
        lower_count *= dim;
    }
    let vertex_count = (lower_count * primary) as usize;

    let mut perms = Vec::with_capacity(PermutationSet::count(dims));
    for sub_perm in &sub_perms {
        // stack the lower box `primary` times, once preserving the axis
        // and once upside down
        let mut forwards = vec![0; vertex_count];
        let mut backwards = vec![0; vertex_count];
        for layer in 0..primary {
            for (cell, &mapped) in sub_perm.iter().enumerate() {
                let index = (layer * lower_count) as usize + cell;
                forwards[index] = layer * lower_count + mapped;
                backwards[index] = (primary - layer - 1) * lower_count + mapped;
            }
        }

        let swaps: Vec<Vec<VertexId>> = lower
            .iter()
            .enumerate()
            .filter(|&(_, &dim)| dim == primary)
            .flat_map(|(axis, _)| {
                let stride = strides[axis];
                [
                    swap_with_primary(&forwards, lower_count, stride, primary),
                    swap_with_primary(&backwards, lower_count, stride, primary),
                ]
            })
            .collect();

        perms.push(forwards);
        perms.push(backwards);
        perms.extend(swaps);
    }

    perms
}

/// Derives from `base` the permutation with the primary axis exchanged
/// against the lower axis of the given stride and equal length.
fn swap_with_primary(
    base: &[VertexId],
    lower_count: VertexId,
    stride: VertexId,
    len: VertexId,
) -> Vec<VertexId> {
    base.iter()
        .map(|&value| {
            let primary_coord = value / lower_count;
            let axis_coord = (value / stride) % len;
            value - primary_coord * lower_count - axis_coord * stride
                + axis_coord * lower_count
                + primary_coord * stride
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::HrpGraph;
    use crate::Topology;

    use std::collections::HashSet;

    #[test]
    fn group_sizes_match_the_closed_form() {
        for dims in [
            vec![1],
            vec![4],
            vec![2, 3],
            vec![3, 3],
            vec![1, 5, 1],
            vec![2, 2, 2],
            vec![3, 3, 3],
            vec![2, 3, 2],
        ] {
            let set = PermutationSet::new(&dims);
            assert_eq!(
                set.len(),
                PermutationSet::count(&dims),
                "group size for {:?}",
                dims
            );
        }
    }

    #[test]
    fn expected_group_sizes() {
        assert_eq!(PermutationSet::count(&[1]), 1);
        assert_eq!(PermutationSet::count(&[4]), 2);
        assert_eq!(PermutationSet::count(&[2, 3]), 4);
        assert_eq!(PermutationSet::count(&[3, 3]), 8);
        assert_eq!(PermutationSet::count(&[1, 5, 1]), 2);
        assert_eq!(PermutationSet::count(&[3, 3, 3]), 48);
        assert_eq!(PermutationSet::count(&[2, 3, 2]), 16);
    }

    #[test]
    fn permutations_are_distinct_bijections() {
        let dims = [2, 3, 2];
        let set = PermutationSet::new(&dims);
        let vertex_count = 12;

        let mut seen = HashSet::new();
        for perm in set.perms() {
            assert_eq!(perm.len(), vertex_count);
            let mut image: Vec<_> = perm.clone();
            image.sort_unstable();
            assert!(image.iter().copied().eq(0..vertex_count as VertexId));
            assert!(seen.insert(perm.clone()), "duplicate permutation");
        }
    }

    #[test]
    fn identity_is_in_the_group() {
        let set = PermutationSet::new(&[3, 2]);
        let identity: Vec<VertexId> = (0..6).collect();

        assert!(set.perms().iter().any(|perm| *perm == identity));
    }

    #[test]
    fn permutations_preserve_adjacency() {
        let dims = [3, 3, 2];
        let graph = HrpGraph::new(&dims).unwrap();
        let set = PermutationSet::new(&dims);

        for perm in set.perms() {
            for v in 0..graph.vertex_count() as VertexId {
                let mut mapped: Vec<VertexId> = graph
                    .neighbors(v)
                    .iter()
                    .map(|&w| perm[w as usize])
                    .collect();
                mapped.sort_unstable();
                assert_eq!(mapped, graph.neighbors(perm[v as usize]));
            }
        }
    }

    #[test]
    fn axis_reversal_of_a_path() {
        let set = PermutationSet::new(&[3]);

        assert_eq!(set.perms(), &[vec![0, 1, 2], vec![2, 1, 0]]);
    }

    #[test]
    fn canonical_form_identifies_symmetric_selections() {
        let set = PermutationSet::new(&[3, 3]);

        // the four corner-edges of the square are one orbit
        let corner = set.canonical_form(&[0, 1]);
        assert_eq!(corner, set.canonical_form(&[1, 2]));
        assert_eq!(corner, set.canonical_form(&[6, 7]));
        assert_eq!(corner, set.canonical_form(&[2, 5]));

        // a center-edge belongs to a different orbit
        assert_ne!(corner, set.canonical_form(&[1, 4]));
    }

    #[test]
    fn canonical_form_is_idempotent() {
        let set = PermutationSet::new(&[2, 3, 2]);
        let selection = [0, 1, 3, 9];

        let canonical = set.canonical_form(&selection);
        assert_eq!(set.canonical_form(&canonical), canonical);
    }

    #[test]
    fn canonical_form_of_the_empty_selection() {
        let set = PermutationSet::new(&[2, 2]);

        assert!(set.canonical_form(&[]).is_empty());
    }
}
