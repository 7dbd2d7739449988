//////////////////////////////////////////////////////////////////////
// a rule is a family of prototiles with one designated seed, and
// hands out starting tiles and cover requests

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::errors::*;
use crate::geometry::{Shape, Vec2d};
use crate::prototile::{Prototile, SeedFunc};
use crate::tile::Tile;
use crate::tiling::{Tiling, TilingOptions};

// fixed placement for the canonical tile
const REFERENCE_EDGE: (f64, f64) = (31.0, 17.0);
const REFERENCE_POSITION: (f64, f64) = (97.0, 109.0);

pub struct Rule<S: Shape> {

    name: String,
    protos: Arc<[Prototile<S>]>,
    seed_index: usize,
    seed: SeedFunc<S>

}

impl<S: Shape> Rule<S> {

    pub fn new(name: &str, protos: Vec<Prototile<S>>) -> Result<Self> {

        let (seed_index, seed) = match protos.iter().enumerate()
            .find_map(|(idx, p)| p.seed().map(|s| (idx, s.clone()))) {

                Some(found) => found,
                None => { bail!(ErrorKind::NoSeedPrototile); }

            };

        debug!("rule {:} has {:} prototiles, seed is {:}",
               name, protos.len(), protos[seed_index].name());

        Ok(Rule {
            name: name.to_string(),
            protos: Arc::from(protos),
            seed_index: seed_index,
            seed: seed
        })

    }

    // canonical tile at the fixed reference placement
    pub fn tile(&self) -> Tile<S> {

        let u = Vec2d::new(REFERENCE_EDGE.0, REFERENCE_EDGE.1);
        let v = Vec2d::new(REFERENCE_POSITION.0, REFERENCE_POSITION.1);

        self.tile_from_edge(&u, &v)

    }

    // seed tile whose defining edge is u, translated by v
    pub fn tile_from_edge(&self, u: &Vec2d, v: &Vec2d) -> Tile<S> {

        let shape = (self.seed)(u, v);

        Tile::new(self.protos.clone(), self.seed_index, shape, false)

    }

    pub fn tiling(&self, tile: Tile<S>, options: TilingOptions) -> Tiling<S> {
        Tiling::new(tile, options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protos(&self) -> &Arc<[Prototile<S>]> {
        &self.protos
    }

    pub fn seed_index(&self) -> usize {
        self.seed_index
    }

}

impl<S: Shape> fmt::Debug for Rule<S> {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("protos", &self.protos)
            .field("seed_index", &self.seed_index)
            .finish()

    }

}

//////////////////////////////////////////////////////////////////////
