//////////////////////////////////////////////////////////////////////
// a tile is a positioned occurrence of a prototile. parents and
// children are computed fresh on every call.

use std::fmt;
use std::sync::Arc;

use crate::geometry::{Region, Shape};
use crate::prototile::{Offspring, Prototile};

#[derive(Clone)]
pub struct Tile<S: Shape> {

    protos: Arc<[Prototile<S>]>,
    proto: usize,
    shape: S,
    reflected: bool

}

impl<S: Shape> Tile<S> {

    pub fn new(protos: Arc<[Prototile<S>]>,
               proto: usize,
               shape: S,
               reflected: bool) -> Self {

        debug_assert!(proto < protos.len());

        Tile { protos: protos, proto: proto, shape: shape, reflected: reflected }

    }

    // wrap a shape produced by a substitution step of this tile
    fn adopt(&self, offspring: Offspring<S>) -> Self {

        Tile {
            protos: self.protos.clone(),
            proto: offspring.proto,
            shape: offspring.shape,
            reflected: self.reflected ^ offspring.reflected
        }

    }

    pub fn parent(&self) -> Self {
        self.adopt(self.proto().compute_parent(&self.shape))
    }

    pub fn children(&self) -> Vec<Self> {

        self.proto().compute_children(&self.shape)
            .into_iter()
            .map(|o| self.adopt(o))
            .collect()

    }

    pub fn equals(&self, other: &Self) -> bool {

        Arc::ptr_eq(&self.protos, &other.protos) &&
            self.proto == other.proto &&
            self.reflected == other.reflected &&
            self.shape.approx_eq(&other.shape)

    }

    pub fn intersects(&self, region: &Region) -> bool {
        self.shape.intersects(region)
    }

    pub fn contains(&self, region: &Region) -> bool {
        self.shape.contains(region)
    }

    // can this tile or any of its descendants meet the region? tiles
    // whose children spill over their outline get their bounding box
    // grown by the prototile's overhang.
    pub fn reaches(&self, region: &Region) -> bool {

        let overhang = self.proto().overhang();

        if overhang == 0.0 {
            return self.intersects(region);
        }

        let grown = self.shape.bounds().pad(overhang * self.shape.extent());

        region.intersects_rect(&grown)

    }

    pub fn proto(&self) -> &Prototile<S> {
        &self.protos[self.proto]
    }

    pub fn proto_index(&self) -> usize {
        self.proto
    }

    pub fn protos(&self) -> &Arc<[Prototile<S>]> {
        &self.protos
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn reflected(&self) -> bool {
        self.reflected
    }

}

impl<S: Shape> PartialEq for Tile<S> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<S: Shape> fmt::Debug for Tile<S> {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        f.debug_struct("Tile")
            .field("proto", &self.proto().name())
            .field("shape", &self.shape)
            .field("reflected", &self.reflected)
            .finish()

    }

}

impl<S: Shape> fmt::Display for Tile<S> {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        write!(f, "{:}{:}[", self.proto().name(),
               if self.reflected { "'" } else { "" })?;

        for (i, p) in self.shape.vertices().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "({:.3}, {:.3})", p.x, p.y)?;
        }

        write!(f, "]")

    }

}

//////////////////////////////////////////////////////////////////////
