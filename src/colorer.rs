//////////////////////////////////////////////////////////////////////
// fill colors for tiles

use std::fmt;

use crate::geometry::{theta, Shape, PI};
use crate::tile::Tile;

//////////////////////////////////////////////////////////////////////
// color in HSL space: hue in degrees, everything else in [0, 1]

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64
}

impl Color {

    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Color { h: h, s: s, l: l, a: a }
    }

    pub fn black(a: f64) -> Self {
        Color::new(0.0, 0.0, 0.0, a)
    }

    pub fn rgb(&self) -> (f64, f64, f64) {

        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = self.s.max(0.0).min(1.0);
        let l = self.l.max(0.0).min(1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - 0.5 * c;

        let (r, g, b) = match h as usize {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x)
        };

        (r + m, g + m, b + m)

    }

}

impl fmt::Display for Color {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "hsla({:}, {:}%, {:}%, {:})",
               self.h, self.s * 100.0, self.l * 100.0, self.a)
    }

}

//////////////////////////////////////////////////////////////////////

pub trait Colorer<S: Shape> {
    fn color(&self, tile: &Tile<S>) -> Color;
}

// same color for every tile
#[derive(Debug, Clone)]
pub struct StaticColorer {
    color: Color
}

impl StaticColorer {
    pub fn new(color: Color) -> Self {
        StaticColorer { color: color }
    }
}

impl<S: Shape> Colorer<S> for StaticColorer {
    fn color(&self, _tile: &Tile<S>) -> Color {
        self.color
    }
}

//////////////////////////////////////////////////////////////////////
// one hue slot for each prototile and reflection; the tile's
// orientation (modulo its symmetry) shifts hue and lightness within
// the slot

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationOptions {
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
    pub hue_span: f64,
    pub hue_offset: f64
}

impl Default for RotationOptions {

    fn default() -> Self {
        RotationOptions {
            saturation: 0.5,
            lightness: 0.5,
            alpha: 1.0,
            hue_span: 0.0,
            hue_offset: 0.05
        }
    }

}

#[derive(Debug, Clone)]
pub struct RotationColorer {
    options: RotationOptions,
    hue_variation: f64,
    hues: Vec<f64>
}

impl RotationColorer {

    pub fn new(options: RotationOptions, nprotos: usize) -> Self {

        let nparts = 2 * nprotos.max(1);
        let slot = 360.0 / nparts as f64;

        RotationColorer {
            options: options,
            hue_variation: slot * options.hue_span,
            hues: base_hues(nparts, options.hue_offset * 360.0)
        }

    }

}

impl<S: Shape> Colorer<S> for RotationColorer {

    fn color(&self, tile: &Tile<S>) -> Color {

        let v = tile.shape().vertices();
        let th = theta(&(v[1] - v[0]));

        // fraction of a turn, modulo the symmetry
        let order = tile.proto().rotational_symmetry() as f64;
        let angle = ((th / (2.0 * PI)) % (1.0 / order)) * order;

        let hue_var = (angle - 0.5).abs() * self.hue_variation * 2.0;
        let light_var = (((angle + 0.25) % 1.0) - 0.5).abs() * self.options.hue_span;

        let variant = 2 * tile.proto_index() + if tile.reflected() { 1 } else { 0 };
        let base = self.hues[variant % self.hues.len()];

        Color::new(ryb_to_rgb((hue_var + base) % 360.0),
                   self.options.saturation,
                   self.options.lightness - light_var,
                   self.options.alpha)

    }

}

// rough piecewise linear map from the RYB color wheel to RGB hues
fn ryb_to_rgb(hue: f64) -> f64 {

    if hue < 120.0 {
        hue / 2.0
    } else if hue < 180.0 {
        hue - 60.0
    } else if hue < 240.0 {
        hue * 2.0 - 240.0
    } else if hue < 300.0 {
        hue * 0.75 + 60.0
    } else {
        hue * 1.25 - 90.0
    }

}

// complementary, split complementary and tetradic schemes for small
// counts, evenly spaced hues otherwise
fn base_hues(n: usize, offset: f64) -> Vec<f64> {

    let shifted = |deltas: &[f64]| -> Vec<f64> {
        deltas.iter().map(|d| (offset + d) % 360.0).collect()
    };

    match n {
        2 => shifted(&[0.0, 180.0]),
        3 => shifted(&[0.0, 150.0, 210.0]),
        4 => shifted(&[330.0, 30.0, 150.0, 210.0]),
        5 => shifted(&[0.0, 330.0, 30.0, 150.0, 210.0]),
        _ => (0..n).map(|i| (i as f64) * 360.0 / (n as f64)).collect()
    }

}

//////////////////////////////////////////////////////////////////////
