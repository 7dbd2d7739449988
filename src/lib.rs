//! Lazy region covers for aperiodic substitution tilings.
//!
//! A substitution tiling is described by a small set of prototiles,
//! each of which knows how to compute the parent of a tile and how to
//! split a tile into children. Starting from a single seed tile, a
//! [`Tiling`] walks up the (infinite) hierarchy until some ancestor
//! contains the query region, and then back down, yielding every tile
//! that meets the region without ever building the whole tiling.
//!
//! ```no_run
//! use ptiling_rs::geometry::{Region, Vec2d};
//! use ptiling_rs::rules::penrose;
//! use ptiling_rs::TilingOptions;
//!
//! let rule = penrose::rule()?;
//! let seed = rule.tile_from_edge(&Vec2d::new(11.0, 17.0), &Vec2d::new(1500.0, 1500.0));
//! let tiling = rule.tiling(seed, TilingOptions::default());
//!
//! for tile in tiling.cover(&Region::rect(0.0, 0.0, 1920.0, 1080.0)) {
//!     let tile = tile?;
//!     println!("{:?}", tile.shape());
//! }
//! # Ok::<(), ptiling_rs::errors::Error>(())
//! ```

//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

#[macro_use]
extern crate error_chain;

pub mod errors {

    error_chain!{

        foreign_links {
            Fmt(::std::fmt::Error);
            Io(::std::io::Error) #[cfg(unix)];
            Cairo(::cairo::Error);
            CairoIo(::cairo::IoError);
        }

        errors {

            NoSeedPrototile {
                description("no prototile has a seed")
                display("rule has no prototile with a seed constructor")
            }

            DescendUnderflow {
                description("descend with depth 0")
                display("internal error: asked to descend with depth 0")
            }

            StackDepthExceeded(distance: usize, max: usize) {
                description("maximum stack depth exceeded")
                display("ascended {:} generations, more than the maximum of {:}",
                        distance, max)
            }

        }

    }

}

//////////////////////////////////////////////////////////////////////

pub mod geometry;
pub mod prototile;
pub mod tile;
pub mod rule;
pub mod tiling;
pub mod rules;
pub mod sanity;
pub mod colorer;
pub mod render;
pub mod config;

pub use crate::prototile::{Offspring, Prototile};
pub use crate::tile::Tile;
pub use crate::rule::Rule;
pub use crate::tiling::{Cover, Tiling, TilingOptions, VIEWPORT_PADDING};
pub use crate::rules::{Family, RuleOptions};
