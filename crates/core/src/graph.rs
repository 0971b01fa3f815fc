//! Lattice graph representations.
//!
//! Vertices are numbered row-major: vertex `v` has coordinate
//! `(v / stride_a) % n_a` along axis `a`, with `stride_a` the product of all
//! dimensions below `a`. The neighbor topology is stored once at
//! construction in a CSR-style layout (one flat target array plus per-vertex
//! offsets) and never mutated afterwards.

use crate::{Error, Topology, VertexId};

/// A lattice graph whose rank is chosen at run time.
#[derive(Debug, Clone)]
pub struct HrpGraph {
    dims: Vec<VertexId>,
    strides: Vec<VertexId>,
    offsets: Vec<usize>,
    targets: Vec<VertexId>,
}

impl HrpGraph {
    /// Builds the lattice graph for the given box dimensions.
    ///
    /// Fails if `dims` is empty, contains a zero, or describes a box with
    /// more vertices than the id space can address.
    pub fn new(dims: &[VertexId]) -> Result<Self, Error> {
        let strides = validate_dims(dims)?;
        let (offsets, targets) = neighbor_csr(dims, &strides);

        Ok(Self {
            dims: dims.to_vec(),
            strides,
            offsets,
            targets,
        })
    }
}

impl Topology for HrpGraph {
    fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn dims(&self) -> &[VertexId] {
        &self.dims
    }

    fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.targets[self.offsets[v as usize]..self.offsets[v as usize + 1]]
    }

    fn coord(&self, v: VertexId, axis: usize) -> VertexId {
        (v / self.strides[axis]) % self.dims[axis]
    }

    fn forward(&self, v: VertexId, axis: usize) -> Option<VertexId> {
        if self.coord(v, axis) == self.dims[axis] - 1 {
            None
        } else {
            Some(v + self.strides[axis])
        }
    }

    fn backward(&self, v: VertexId, axis: usize) -> Option<VertexId> {
        if self.coord(v, axis) == 0 {
            None
        } else {
            Some(v - self.strides[axis])
        }
    }
}

/// A lattice graph whose rank `D` is fixed at compile time.
///
/// Dimension and stride lookups read from inline arrays. The neighbor
/// topology is identical to the [`HrpGraph`] of the same dimensions.
#[derive(Debug, Clone)]
pub struct StaticHrpGraph<const D: usize> {
    dims: [VertexId; D],
    strides: [VertexId; D],
    offsets: Vec<usize>,
    targets: Vec<VertexId>,
}

impl<const D: usize> StaticHrpGraph<D> {
    /// Builds the rank-`D` lattice graph for the given box dimensions.
    pub fn new(dims: [VertexId; D]) -> Result<Self, Error> {
        let strides = validate_dims(&dims)?;
        let (offsets, targets) = neighbor_csr(&dims, &strides);

        let mut stride_array = [0; D];
        stride_array.copy_from_slice(&strides);

        Ok(Self {
            dims,
            strides: stride_array,
            offsets,
            targets,
        })
    }
}

impl<const D: usize> Topology for StaticHrpGraph<D> {
    fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn dims(&self) -> &[VertexId] {
        &self.dims
    }

    fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.targets[self.offsets[v as usize]..self.offsets[v as usize + 1]]
    }

    fn coord(&self, v: VertexId, axis: usize) -> VertexId {
        (v / self.strides[axis]) % self.dims[axis]
    }

    fn forward(&self, v: VertexId, axis: usize) -> Option<VertexId> {
        if self.coord(v, axis) == self.dims[axis] - 1 {
            None
        } else {
            Some(v + self.strides[axis])
        }
    }

    fn backward(&self, v: VertexId, axis: usize) -> Option<VertexId> {
        if self.coord(v, axis) == 0 {
            None
        } else {
            Some(v - self.strides[axis])
        }
    }
}

/// Checks the dimension vector and returns the per-axis strides.
fn validate_dims(dims: &[VertexId]) -> Result<Vec<VertexId>, Error> {
    if dims.is_empty() || dims.contains(&0) {
        return Err(Error::InvalidDims {
            dims: dims.to_vec(),
        });
    }

    let mut strides = Vec::with_capacity(dims.len());
    let mut total: VertexId = 1;
    for &dim in dims {
        strides.push(total);
        total = total.checked_mul(dim).ok_or(Error::TooManyVertices {
            dims: dims.to_vec(),
        })?;
    }
    // The id space must keep one value free for link sentinels.
    if total == VertexId::MAX {
        return Err(Error::TooManyVertices {
            dims: dims.to_vec(),
        });
    }

    Ok(strides)
}

/// Builds the CSR neighbor layout for a validated dimension vector.
///
/// For every vertex the neighbor list is emitted in strictly ascending id
/// order: backward neighbors from the highest axis down, then forward
/// neighbors from the lowest axis up.
fn neighbor_csr(dims: &[VertexId], strides: &[VertexId]) -> (Vec<usize>, Vec<VertexId>) {
    let vertex_count = dims.iter().product::<VertexId>() as usize;
    let rank = dims.len();

    let mut offsets = Vec::with_capacity(vertex_count + 1);
    let mut targets = Vec::with_capacity(vertex_count * 2 * rank);

    offsets.push(0);
    for v in 0..vertex_count as VertexId {
        for axis in (0..rank).rev() {
            if (v / strides[axis]) % dims[axis] > 0 {
                targets.push(v - strides[axis]);
            }
        }
        for axis in 0..rank {
            if (v / strides[axis]) % dims[axis] < dims[axis] - 1 {
                targets.push(v + strides[axis]);
            }
        }
        offsets.push(targets.len());
    }

    (offsets, targets)
}
