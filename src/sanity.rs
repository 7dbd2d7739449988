//////////////////////////////////////////////////////////////////////
// property checks for substitution rules. these are cheap enough to
// run at startup and are what the tests lean on.

use tracing::{debug, Level};

use crate::geometry::{Region, Shape, Vec2d};
use crate::rule::Rule;
use crate::tile::Tile;
use crate::tiling::TilingOptions;

// how many generations below the canonical tile to look for one tile
// of every prototile
const SEARCH_GENERATIONS: usize = 4;

// children sharing the tile's prototile
pub fn similar_children<S: Shape>(tile: &Tile<S>) -> Vec<Tile<S>> {

    tile.children()
        .into_iter()
        .filter(|c| c.proto_index() == tile.proto_index())
        .collect()

}

// linear scale factor between a tile and one of its children
pub fn inflation_factor<S: Shape>(parent: &Tile<S>, child: &Tile<S>) -> f64 {
    (parent.shape().area() / child.shape().area()).sqrt()
}

// does the tile appear exactly once among its parent's children?
pub fn inverts_children<S: Shape>(tile: &Tile<S>) -> bool {

    tile.parent()
        .children()
        .iter()
        .filter(|c| c.equals(tile))
        .count() == 1

}

// one tile per prototile (where reachable), found by walking down from
// the rule's canonical tile
pub fn representatives<S: Shape>(rule: &Rule<S>) -> Vec<Tile<S>> {

    let nprotos = rule.protos().len();

    let mut found: Vec<Option<Tile<S>>> = vec![None; nprotos];
    let mut generation = vec![rule.tile()];

    for _ in 0..=SEARCH_GENERATIONS {

        for t in &generation {
            if found[t.proto_index()].is_none() {
                found[t.proto_index()] = Some(t.clone());
            }
        }

        if found.iter().all(|f| f.is_some()) {
            break;
        }

        generation = generation.iter().flat_map(|t| t.children()).collect();

    }

    found.into_iter().flatten().collect()

}

// is every child of every prototile inside its parent?
pub fn is_volume_hierarchic<S: Shape>(rule: &Rule<S>) -> bool {

    representatives(rule).iter().all(|t| {

        t.children().iter().all(|c| {
            c.shape().vertices().iter().all(|p| t.shape().contains_point(p))
        })

    })

}

// do the canonical tile's ancestors eventually contain viewports in
// every direction, near and far?
pub fn can_cover_arbitrary_viewport<S: Shape>(rule: &Rule<S>) -> bool {

    let tile = rule.tile();
    let max_depth = TilingOptions::default().max_stack_depth;

    let center = tile.shape().bounds().center();
    let e = tile.shape().extent();

    let directions = [Vec2d::new(1.0, 0.0), Vec2d::new(0.0, 1.0),
                      Vec2d::new(-1.0, 0.0), Vec2d::new(0.0, -1.0)];

    for &distance in &[0.0, 3.0, 30.0] {

        for &dir in &directions {

            let c = center + distance * e * dir;
            let target = Region::rect(c.x - e, c.y - e, c.x + e, c.y + e);

            let mut ancestor = tile.clone();
            let mut depth = 0;

            while !ancestor.contains(&target) {

                if depth >= max_depth {
                    debug!("{:}: no ancestor within {:} generations contains {:?}",
                           rule.name(), max_depth, target);
                    return false;
                }

                ancestor = ancestor.parent();
                depth += 1;

            }

        }

    }

    true

}

// log what the rule looks like before trusting it with a viewport. the
// walks above are skipped unless debug output is on; returns whether
// they ran.
pub fn report<S: Shape>(rule: &Rule<S>) -> bool {

    if !tracing::enabled!(Level::DEBUG) {
        return false;
    }

    for t in &representatives(rule) {
        debug!("{:}: {:} inverts children: {:}, {:} similar children",
               rule.name(), t.proto().name(),
               inverts_children(t),
               similar_children(t).len());
    }

    debug!("{:}: volume hierarchic: {:}, covers arbitrary viewports: {:}",
           rule.name(),
           is_volume_hierarchic(rule),
           can_cover_arbitrary_viewport(rule));

    true

}

//////////////////////////////////////////////////////////////////////
