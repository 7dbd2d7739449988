// bunch of standard library stuff
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[macro_use]
extern crate error_chain;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ptiling_rs::colorer::{Color, RotationColorer, StaticColorer};
use ptiling_rs::config::{OutputFormat, TilingSpec};
use ptiling_rs::errors::*;
use ptiling_rs::geometry::Shape;
use ptiling_rs::render::{render_pdf, render_png, RenderSettings};
use ptiling_rs::rules::{self, Family};
use ptiling_rs::{sanity, Rule};

//////////////////////////////////////////////////////////////////////

fn init_logging() {

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

}

fn render<S: Shape>(rule: &Rule<S>, spec: &TilingSpec, output: &Path) -> Result<usize> {

    sanity::report(rule);

    let tile = rule.tile_from_edge(&spec.edge, &spec.position);

    info!("seed {:} at {:?}", tile, spec.position);

    let tiling = rule.tiling(tile, spec.tiling);

    let fill = RotationColorer::new(spec.colors, rule.protos().len());
    let stroke = StaticColorer::new(Color::black(spec.stroke_alpha));

    let settings = RenderSettings {
        stroke_width: spec.stroke_width,
        vflip: spec.vflip
    };

    match spec.output {
        OutputFormat::Png => render_png(&tiling, &spec.viewport, &fill, &stroke, &settings, output),
        OutputFormat::Pdf => render_pdf(&tiling, &spec.viewport, &fill, &stroke, &settings, output)
    }

}

//////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {

    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: {:?} TILINGFILE", args[0]);
        eprintln!("rules: {:}", rules::names().join(", "));
        std::process::exit(1);
    }

    init_logging();

    let filename = Path::new(&args[1]);

    let basename = match filename.file_stem() {
        None => "output",
        Some(os_str) => os_str.to_str().unwrap_or("output")
    };

    let f = File::open(filename).chain_err(
        || format!("opening {:}", filename.display()))?;

    let mut reader = BufReader::new(f);

    let spec = TilingSpec::parse(&args[1], &mut reader)?;

    let output = basename.to_owned() + "." + spec.output.extension();

    let family = rules::lookup(spec.rule.as_deref(), &spec.rule_options)?;

    info!("using rule {:}", family.name());

    let count = match &family {
        Family::Rhomb(rule) => render(rule, &spec, Path::new(&output))?,
        Family::Triangle(rule) => render(rule, &spec, Path::new(&output))?
    };

    println!("wrote {:} tiles to {:}", count, output);

    Ok(())

}

quick_main!(run);
