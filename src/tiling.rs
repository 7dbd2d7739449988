//////////////////////////////////////////////////////////////////////
// lazy region cover. starting from a seed tile, climb toward larger
// generations until an ancestor contains the region (plus a few
// generations for families that need it), and on the way up walk
// back down every sibling that can reach the region.
//
// the walk is an explicit stack of frames so that each call to
// next() does a bounded amount of work and nothing recurses.

use std::vec;

use tracing::{debug, error, trace};

use crate::errors::*;
use crate::geometry::{Region, Shape};
use crate::tile::Tile;

// rect regions are grown by this much before the walk
pub const VIEWPORT_PADDING: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingOptions {

    // emit intersecting tiles of every generation, not just the
    // seed's generation
    pub include_ancestors: bool,

    // maximum number of generations to climb
    pub max_stack_depth: usize

}

impl Default for TilingOptions {

    fn default() -> Self {
        TilingOptions {
            include_ancestors: true,
            max_stack_depth: 200
        }
    }

}

//////////////////////////////////////////////////////////////////////
// a cover request bound to a starting tile

#[derive(Debug, Clone)]
pub struct Tiling<S: Shape> {
    tile: Tile<S>,
    options: TilingOptions
}

impl<S: Shape> Tiling<S> {

    pub fn new(tile: Tile<S>, options: TilingOptions) -> Self {
        Tiling { tile: tile, options: options }
    }

    pub fn tile(&self) -> &Tile<S> {
        &self.tile
    }

    pub fn options(&self) -> &TilingOptions {
        &self.options
    }

    // start a fresh walk over the region
    pub fn cover(&self, region: &Region) -> Cover<S> {

        let region = if region.is_rect() {
            region.pad(VIEWPORT_PADDING)
        } else {
            region.clone()
        };

        Cover {
            start: self.tile.clone(),
            region: region,
            options: self.options,
            stack: vec![Frame::Start],
            emitted: 0
        }

    }

}

//////////////////////////////////////////////////////////////////////

enum Frame<S: Shape> {

    // emit the starting tile
    Start,

    // climb from tile to its parent
    Ascend {
        tile: Tile<S>,
        distance: usize,
        extra: Option<usize>
    },

    // scan the parent's other children
    Siblings {
        parent: Tile<S>,
        pending: vec::IntoIter<Tile<S>>,
        distance: usize,
        extra: Option<usize>
    },

    // scan children of a tile, depth generations above the seed's
    Descend {
        pending: vec::IntoIter<Tile<S>>,
        depth: usize
    }

}

// iterator over the tiles of a cover; yields at most one error,
// after which it is exhausted
pub struct Cover<S: Shape> {

    start: Tile<S>,
    region: Region,
    options: TilingOptions,
    stack: Vec<Frame<S>>,
    emitted: usize

}

impl<S: Shape> Cover<S> {

    // the region actually being covered (after padding)
    pub fn region(&self) -> &Region {
        &self.region
    }

    fn fail(&mut self, kind: ErrorKind) -> Option<Result<Tile<S>>> {

        error!("cover aborted after {:} tiles: {:}", self.emitted, kind);

        self.stack.clear();

        Some(Err(kind.into()))

    }

    fn emit(&mut self, tile: Tile<S>) -> Option<Result<Tile<S>>> {

        self.emitted += 1;

        Some(Ok(tile))

    }

    // decide whether to keep climbing once all siblings under parent
    // have been scanned
    fn next_ascent(&self,
                   parent: Tile<S>,
                   distance: usize,
                   extra: Option<usize>) -> Option<Frame<S>> {

        let distance = distance + 1;

        match extra {

            Some(n) if n > 0 => {
                Some(Frame::Ascend { tile: parent, distance: distance, extra: Some(n - 1) })
            },

            _ if !parent.contains(&self.region) => {
                Some(Frame::Ascend { tile: parent, distance: distance, extra: None })
            },

            None if parent.proto().covering_generations() > 0 => {

                let n = parent.proto().covering_generations();

                debug!("ancestor {:} generations up contains region, scanning {:} more",
                       distance, n);

                Some(Frame::Ascend { tile: parent, distance: distance, extra: Some(n - 1) })

            },

            _ => {

                debug!("cover complete: {:} tiles, {:} generations up",
                       self.emitted, distance);

                None

            }

        }

    }

}

impl<S: Shape> Iterator for Cover<S> {

    type Item = Result<Tile<S>>;

    fn next(&mut self) -> Option<Self::Item> {

        let include_ancestors = self.options.include_ancestors;

        loop {

            let frame = self.stack.pop()?;

            match frame {

                Frame::Start => {

                    self.stack.push(Frame::Ascend {
                        tile: self.start.clone(),
                        distance: 0,
                        extra: None
                    });

                    let start = self.start.clone();

                    return self.emit(start);

                },

                Frame::Ascend { tile, distance, extra } => {

                    if distance > self.options.max_stack_depth {
                        let max = self.options.max_stack_depth;
                        return self.fail(ErrorKind::StackDepthExceeded(distance, max));
                    }

                    trace!("ascend {:} from {:}", distance, tile);

                    let parent = tile.parent();

                    let siblings: Vec<Tile<S>> = parent.children()
                        .into_iter()
                        .filter(|t| !t.equals(&tile))
                        .collect();

                    self.stack.push(Frame::Siblings {
                        parent: parent,
                        pending: siblings.into_iter(),
                        distance: distance,
                        extra: extra
                    });

                },

                Frame::Siblings { parent, mut pending, distance, extra } => {

                    let sibling = match pending.next() {
                        Some(t) => t,
                        None => {
                            if let Some(next) = self.next_ascent(parent, distance, extra) {
                                self.stack.push(next);
                            }
                            continue;
                        }
                    };

                    self.stack.push(Frame::Siblings {
                        parent: parent,
                        pending: pending,
                        distance: distance,
                        extra: extra
                    });

                    if !sibling.reaches(&self.region) {
                        continue;
                    }

                    if distance > 0 {
                        self.stack.push(Frame::Descend {
                            pending: sibling.children().into_iter(),
                            depth: distance
                        });
                    }

                    if (distance == 0 || include_ancestors) &&
                        sibling.intersects(&self.region) {
                        return self.emit(sibling);
                    }

                },

                Frame::Descend { mut pending, depth } => {

                    if depth == 0 {
                        return self.fail(ErrorKind::DescendUnderflow);
                    }

                    let child = match pending.next() {
                        Some(t) => t,
                        None => { continue; }
                    };

                    self.stack.push(Frame::Descend { pending: pending, depth: depth });

                    if !child.reaches(&self.region) {
                        continue;
                    }

                    if depth > 1 {
                        self.stack.push(Frame::Descend {
                            pending: child.children().into_iter(),
                            depth: depth - 1
                        });
                    }

                    if (depth == 1 || include_ancestors) &&
                        child.intersects(&self.region) {
                        return self.emit(child);
                    }

                }

            }

        }

    }

}

//////////////////////////////////////////////////////////////////////
