//////////////////////////////////////////////////////////////////////
// line oriented tiling files. one keyword per line, # starts a
// comment:
//
//   rule Pinwheel
//   pinwheel 2 3
//   edge 11 17
//   position 1500 1500
//   viewport 0 0 1920 1080
//   include_ancestors yes
//   color hue_span 0.25
//   output pdf
//
// bad edge or position vectors and unknown rule names are not fatal:
// they fall back to the defaults with a warning.

use std::io::BufRead;

use phf::phf_map;
use tracing::warn;

use crate::colorer::RotationOptions;
use crate::errors::*;
use crate::geometry::{Point2d, Rect2d, Vec2d};
use crate::render::VFlip;
use crate::rules::RuleOptions;
use crate::tiling::TilingOptions;

pub const DEFAULT_EDGE: (f64, f64) = (11.0, 17.0);
pub const DEFAULT_POSITION: (f64, f64) = (1500.0, 1500.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Png,
    Pdf
}

impl OutputFormat {

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf"
        }
    }

}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColorField {
    Saturation,
    Lightness,
    HueSpan,
    HueOffset,
    Alpha
}

//////////////////////////////////////////////////////////////////////
// define some statically allocated maps for
// lookups during parsing

static OUTPUT_LOOKUP: phf::Map<&'static str, OutputFormat> = phf_map! {
    "png" => OutputFormat::Png,
    "pdf" => OutputFormat::Pdf,
};

static COLOR_LOOKUP: phf::Map<&'static str, ColorField> = phf_map! {
    "saturation" => ColorField::Saturation,
    "lightness" => ColorField::Lightness,
    "hue_span" => ColorField::HueSpan,
    "hue_offset" => ColorField::HueOffset,
    "alpha" => ColorField::Alpha,
};

const TRUE_STRINGS: [&str; 7] = ["true", "True", "yes", "Yes", "y", "Y", "1"];
const FALSE_STRINGS: [&str; 7] = ["false", "False", "no", "No", "n", "N", "0"];

pub fn parse_bool(s: &str) -> Option<bool> {

    if TRUE_STRINGS.contains(&s) {
        Some(true)
    } else if FALSE_STRINGS.contains(&s) {
        Some(false)
    } else {
        None
    }

}

//////////////////////////////////////////////////////////////////////
// macro for parsing the tokens after a keyword into a tuple

macro_rules! parse_tokens {

    // finalizer - no more input to match, just error if remaining
    // input or return collected outputs
    ($it:ident { } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            Some(value) => Err(format!("found extra token(s) starting with \"{:}\"", value)),
            None => Ok(($($tuple),*))
        }
    );

    // name, String pair
    ($it:ident { $name:ident : String, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(format!("missing token for {:}", stringify!($name)) ),
            Some(value) => {
                let $name = value.to_string();
                parse_tokens!( $it { $($ts)* } -> { $($tuple,)* $name, } )
            }
        }
    );

    // string map
    ($it:ident { $name:ident from $map:expr, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(format!("missing token for {:}", stringify!($name)) ),
            Some(&value) => {
                if let Some(&k) = $map.get(value) {
                    let $name = k;
                    parse_tokens!( $it { $($ts)* } -> { $($tuple,)* $name, } )
                } else {
                    let mut extended: Vec<&str> = Vec::new();
                    extended.extend($map.keys());
                    extended.sort();
                    Err(format!("unexpected value \"{:}\" for {:}, expected one of: {{\"{:}\"}}",
                                value, stringify!($name), extended.join("\", \"") ))
                }
            }
        }
    );

    // name, type pair
    ($it:ident { $name:ident : $type:ident, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(format!("missing token for {:}", stringify!($name)) ),
            Some(value) => if let Ok($name) = value.parse::<$type>() {
                parse_tokens!( $it { $($ts)* } -> { $($tuple,)* $name, } )
            } else {
                Err(format!("error parsing {:} as type {:}",
                            value, stringify!($type)))
            }
        }
    );

    // Entry point
    ($a:expr, { $($ts:tt)+ }) => (
        {
            let mut it = $a.iter();
            parse_tokens!( it { $($ts)* , } -> { } )
        }
    );

}

//////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct TilingSpec {

    pub rule: Option<String>,
    pub rule_options: RuleOptions,
    pub edge: Vec2d,
    pub position: Vec2d,
    pub viewport: Rect2d,
    pub tiling: TilingOptions,
    pub colors: RotationOptions,
    pub stroke_width: f64,
    pub stroke_alpha: f64,
    pub vflip: VFlip,
    pub output: OutputFormat

}

// a vector that falls back to its default when malformed
fn parse_vector(keyword: &str, rest: &[&str], default: (f64, f64)) -> Vec2d {

    let parsed: std::result::Result<(f64, f64), String> = parse_tokens!(rest, { x: f64, y: f64 });

    match parsed {
        Ok((x, y)) if x.is_finite() && y.is_finite() => Vec2d::new(x, y),
        Ok((x, y)) => {
            warn!("{:} ({:}, {:}) is not finite, using default ({:}, {:})",
                  keyword, x, y, default.0, default.1);
            Vec2d::new(default.0, default.1)
        },
        Err(e) => {
            warn!("bad {:} vector ({:}), using default ({:}, {:})",
                  keyword, e, default.0, default.1);
            Vec2d::new(default.0, default.1)
        }
    }

}

impl TilingSpec {

    pub fn new() -> TilingSpec {
        TilingSpec {
            rule: None,
            rule_options: RuleOptions::default(),
            edge: Vec2d::new(DEFAULT_EDGE.0, DEFAULT_EDGE.1),
            position: Vec2d::new(DEFAULT_POSITION.0, DEFAULT_POSITION.1),
            viewport: Rect2d::empty(),
            tiling: TilingOptions::default(),
            colors: RotationOptions::default(),
            stroke_width: 1.0,
            stroke_alpha: 1.0,
            vflip: VFlip::No,
            output: OutputFormat::Png
        }
    }

    fn parse_keyword(&mut self, keyword: &str, rest: &[&str]) -> Result<()> {

        match keyword {

            "rule" => {

                let name = parse_tokens!(rest, { name: String })?;

                self.rule = Some(name);

            },

            "pinwheel" => {

                let (p, q) = parse_tokens!(rest, { p: i64, q: i64 })?;

                self.rule_options.pinwheel = Some((p, q));

            },

            "edge" => {
                self.edge = parse_vector(keyword, rest, DEFAULT_EDGE);
            },

            "position" => {
                self.position = parse_vector(keyword, rest, DEFAULT_POSITION);
            },

            "viewport" => {

                let (x0, y0, x1, y1) = parse_tokens!(rest, {
                    x0: f64, y0: f64, x1: f64, y1: f64
                })?;

                if !(x1 > x0 && y1 > y0) {
                    bail!("viewport must have x0 < x1 and y0 < y1");
                }

                self.viewport = Rect2d::new(Point2d::new(x0, y0), Point2d::new(x1, y1));

            },

            "include_ancestors" => {

                let value = parse_tokens!(rest, { value: String })?;

                self.tiling.include_ancestors = match parse_bool(&value) {
                    Some(b) => b,
                    None => { bail!("expected a boolean, got \"{:}\"", value); }
                };

            },

            "max_stack_depth" => {

                let depth = parse_tokens!(rest, { depth: usize })?;

                self.tiling.max_stack_depth = depth;

            },

            "color" => {

                let (field, value) = parse_tokens!(rest, {
                    field from COLOR_LOOKUP,
                    value: f64
                })?;

                match field {
                    ColorField::Saturation => self.colors.saturation = value,
                    ColorField::Lightness => self.colors.lightness = value,
                    ColorField::HueSpan => self.colors.hue_span = value,
                    ColorField::HueOffset => self.colors.hue_offset = value,
                    ColorField::Alpha => self.colors.alpha = value
                }

            },

            "stroke" => {

                let width = parse_tokens!(rest, { width: f64 })?;

                if width < 0.0 {
                    bail!("stroke width must not be negative");
                }

                self.stroke_width = width;

            },

            "stroke_alpha" => {

                let alpha = parse_tokens!(rest, { alpha: f64 })?;

                self.stroke_alpha = alpha;

            },

            "flip_y" => {

                let value = parse_tokens!(rest, { value: String })?;

                self.vflip = match parse_bool(&value) {
                    Some(true) => VFlip::Yes,
                    Some(false) => VFlip::No,
                    None => { bail!("expected a boolean, got \"{:}\"", value); }
                };

            },

            "output" => {

                let format = parse_tokens!(rest, { format from OUTPUT_LOOKUP })?;

                self.output = format;

            },

            _ => {
                bail!("unrecognized keyword");
            }

        };

        Ok(())

    }

    fn update_from(&mut self, line: &str) -> Result<()> {

        let mut trimmed = line.trim();

        if let Some(pos) = trimmed.find('#') {
            trimmed = &trimmed[0..pos];
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if tokens.is_empty() {
            return Ok(());
        }

        let keyword = tokens[0];
        let rest = &tokens[1..];

        self.parse_keyword(keyword, rest).chain_err(
            || format!("while parsing keyword {:}", keyword))

    }

    pub fn parse<R: BufRead>(filename: &str, reader: &mut R) -> Result<TilingSpec> {

        let mut spec = TilingSpec::new();

        let mut lineno = 0;

        loop {

            let mut line = String::new();
            lineno += 1;

            let len = reader.read_line(&mut line).chain_err(
                || format!("{:}:{:}: read error", filename, lineno))?;

            if len == 0 {
                break;
            }

            spec.update_from(&line).chain_err(
                || format!("{:}:{:}", filename, lineno))?;

        }

        if spec.viewport.is_empty() {
            bail!("{:}: missing viewport", filename);
        }

        Ok(spec)

    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    fn parse(text: &str) -> Result<TilingSpec> {
        TilingSpec::parse("test.tiling", &mut text.as_bytes())
    }

    #[test]
    fn full_file() {

        let spec = parse("
            # everything
            rule Pinwheel
            pinwheel 2 3
            edge 5 0        # short side
            position -10 20
            viewport 0 0 640 480
            include_ancestors no
            max_stack_depth 50
            color saturation 0.75
            color hue_span 0.25
            stroke 0.5
            stroke_alpha 0.8
            flip_y yes
            output pdf
        ").unwrap();

        assert_eq!(spec.rule.as_deref(), Some("Pinwheel"));
        assert_eq!(spec.rule_options.pinwheel, Some((2, 3)));
        assert_eq!(spec.edge, Vec2d::new(5.0, 0.0));
        assert_eq!(spec.position, Vec2d::new(-10.0, 20.0));
        assert_eq!(spec.viewport.p1, Point2d::new(640.0, 480.0));
        assert!(!spec.tiling.include_ancestors);
        assert_eq!(spec.tiling.max_stack_depth, 50);
        assert_eq!(spec.colors.saturation, 0.75);
        assert_eq!(spec.colors.hue_span, 0.25);
        assert_eq!(spec.colors.lightness, 0.5);
        assert_eq!(spec.stroke_width, 0.5);
        assert_eq!(spec.stroke_alpha, 0.8);
        assert_eq!(spec.vflip, VFlip::Yes);
        assert_eq!(spec.output, OutputFormat::Pdf);

    }

    #[test]
    fn defaults() {

        let spec = parse("viewport 0 0 100 100").unwrap();

        assert_eq!(spec.rule, None);
        assert_eq!(spec.edge, Vec2d::new(11.0, 17.0));
        assert_eq!(spec.position, Vec2d::new(1500.0, 1500.0));
        assert_eq!(spec.tiling, TilingOptions::default());
        assert_eq!(spec.output, OutputFormat::Png);

    }

    #[test]
    fn bad_vectors_fall_back() {

        let spec = parse("
            viewport 0 0 100 100
            edge 3
            position 1 2 3
        ").unwrap();

        assert_eq!(spec.edge, Vec2d::new(11.0, 17.0));
        assert_eq!(spec.position, Vec2d::new(1500.0, 1500.0));

        let spec = parse("viewport 0 0 100 100\nedge nan 4").unwrap();
        assert_eq!(spec.edge, Vec2d::new(11.0, 17.0));

    }

    #[test]
    fn errors_carry_line_numbers() {

        let err = parse("viewport 0 0 100 100\n\nbogus 1\n").unwrap_err();
        assert!(err.to_string().starts_with("test.tiling:3"));

        let err = parse("viewport 0 0 100 100\ncolor sparkle 0.5\n").unwrap_err();
        assert!(err.to_string().starts_with("test.tiling:2"));

        let err = parse("viewport 0 0 100 100\ninclude_ancestors maybe\n").unwrap_err();
        assert!(err.to_string().starts_with("test.tiling:2"));

        let err = parse("viewport 0 0 -1 100\n").unwrap_err();
        assert!(err.to_string().starts_with("test.tiling:1"));

        assert!(parse("rule Pinwheel\n").is_err());

    }

    #[test]
    fn string_tokens() {

        let tokens = vec!["Penrose"];
        let name: std::result::Result<String, String> = parse_tokens!(tokens, { name: String });
        assert_eq!(name, Ok("Penrose".to_string()));

        let tokens = vec!["Penrose", "Pinwheel"];
        let name: std::result::Result<String, String> = parse_tokens!(tokens, { name: String });
        assert_eq!(name, Err("found extra token(s) starting with \"Pinwheel\"".to_string()));

        let tokens: Vec<&str> = vec![];
        let name: std::result::Result<String, String> = parse_tokens!(tokens, { name: String });
        assert_eq!(name, Err("missing token for name".to_string()));

        let spec = parse("viewport 0 0 100 100\nrule Penrose\n").unwrap();
        assert_eq!(spec.rule.as_deref(), Some("Penrose"));

        let err = parse("viewport 0 0 100 100\nrule Penrose Pinwheel\n").unwrap_err();
        assert!(err.to_string().starts_with("test.tiling:2"));

    }

    #[test]
    fn booleans() {

        for s in &["true", "Yes", "y", "1"] {
            assert_eq!(parse_bool(s), Some(true));
        }

        for s in &["false", "No", "n", "0"] {
            assert_eq!(parse_bool(s), Some(false));
        }

        assert_eq!(parse_bool("maybe"), None);

    }

}
