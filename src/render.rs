//////////////////////////////////////////////////////////////////////
// draw the tiles of a cover with cairo, either to a PNG the size of
// the viewport or to a single PDF page

use std::fs::File;
use std::path::Path;

use tracing::{debug, info};

use crate::colorer::{Color, Colorer};
use crate::errors::*;
use crate::geometry::{Matrix3d, Point2d, Rect2d, Region, Shape, Transform2d, Translation2d, Vec2d};
use crate::tiling::Tiling;

//////////////////////////////////////////////////////////////////////
// constants for pdf layout

const INCH: f64 = 72.0;

const PAGE_SHORT_EDGE: f64 = 8.5 * INCH;
const PAGE_LONG_EDGE: f64 = 11.0 * INCH;

const MARGIN: f64 = 0.5 * INCH;

//////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VFlip {
    Yes,
    No
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub stroke_width: f64,
    pub vflip: VFlip
}

impl Default for RenderSettings {

    fn default() -> Self {
        RenderSettings {
            stroke_width: 1.0,
            vflip: VFlip::No
        }
    }

}

//////////////////////////////////////////////////////////////////////
//
// make a Transform2d that will translate and scale the given
// contents_rect (input) to the given page_rect (output), keeping the
// aspect ratio.
//
// tiling coordinates are normally screen coordinates already (y
// increases going down); vflip is for contents with y going up
//

pub fn get_page_transform(contents_rect: &Rect2d,
                          page_rect: &Rect2d,
                          vflip: VFlip) -> (Transform2d, f64) {

    let cdims = contents_rect.dims();
    let pdims = page_rect.dims();

    let scl = (pdims.component_div(&cdims)).min();

    let vmid = contents_rect.center();
    let pmid = page_rect.center();

    let translate_page = Translation2d::new(pmid[0], pmid[1]);

    let vsign = if vflip == VFlip::Yes { -1.0 } else { 1.0 };

    let scale = Transform2d::from_matrix_unchecked(
        Matrix3d::new(
            scl, 0.0, 0.0,
            0.0, scl*vsign, 0.0,
            0.0, 0.0, 1.0
        )
    );

    let translate_points = Translation2d::new(-vmid[0], -vmid[1]);

    let transform = translate_page * scale * translate_points;

    (transform, scl)

}

//////////////////////////////////////////////////////////////////////

trait CairoVecOps {

    fn moveto(&self, p: &Point2d);
    fn lineto(&self, p: &Point2d);
    fn setcolor(&self, c: &Color);
    fn drawpoly(&self, poly: &[Point2d]);

}

impl CairoVecOps for cairo::Context {

    fn moveto(&self, p: &Point2d) {
        self.move_to(p.x, p.y);
    }

    fn lineto(&self, p: &Point2d) {
        self.line_to(p.x, p.y);
    }

    fn setcolor(&self, c: &Color) {
        let (r, g, b) = c.rgb();
        self.set_source_rgba(r, g, b, c.a);
    }

    fn drawpoly(&self, poly: &[Point2d]) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.moveto(p);
            } else {
                self.lineto(p);
            }
        }
        self.close_path();
    }

}

macro_rules! with_save_restore {

    ($ctx:ident, { $($tree:tt)* }) => {

        $ctx.save();

        {

            $($tree)*

        }

        $ctx.restore();

    }

}

//////////////////////////////////////////////////////////////////////
// pull every tile covering the viewport and draw it. stops at the
// first cover error.

pub fn draw_tiles<S: Shape>(ctx: &cairo::Context,
                            tiling: &Tiling<S>,
                            viewport: &Rect2d,
                            transform: &Transform2d,
                            fill: &dyn Colorer<S>,
                            stroke: &dyn Colorer<S>,
                            line_width: f64) -> Result<usize> {

    let mut count = 0;

    with_save_restore!(ctx, {

        ctx.set_line_width(line_width);
        ctx.set_line_join(cairo::LineJoin::Round);

        for tile in tiling.cover(&Region::Rect(viewport.clone())) {

            let tile = tile.chain_err(|| format!("after drawing {:} tiles", count))?;

            let points: Vec<Point2d> = tile.shape().vertices()
                .iter()
                .map(|p| transform * p)
                .collect();

            ctx.drawpoly(&points);

            ctx.setcolor(&fill.color(&tile));
            ctx.fill_preserve();

            if line_width > 0.0 {
                ctx.setcolor(&stroke.color(&tile));
                ctx.stroke();
            } else {
                ctx.new_path();
            }

            count += 1;

        }

    });

    debug!("drew {:} tiles in {:?}", count, viewport);

    Ok(count)

}

// png the size of the viewport, one pixel per unit
pub fn render_png<S: Shape>(tiling: &Tiling<S>,
                            viewport: &Rect2d,
                            fill: &dyn Colorer<S>,
                            stroke: &dyn Colorer<S>,
                            settings: &RenderSettings,
                            filename: &Path) -> Result<usize> {

    if viewport.is_empty() {
        bail!("empty viewport");
    }

    let dims = viewport.dims();
    let width = dims.x.ceil().max(1.0);
    let height = dims.y.ceil().max(1.0);

    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32, width as i32, height as i32)?;

    let ctx = cairo::Context::new(&surface);

    let page_rect = Rect2d::new(Point2d::origin(), Point2d::new(width, height));
    let (transform, _) = get_page_transform(viewport, &page_rect, settings.vflip);

    let count = draw_tiles(&ctx, tiling, viewport, &transform,
                           fill, stroke, settings.stroke_width)?;

    let mut file = File::create(filename).chain_err(
        || format!("creating {:}", filename.display()))?;

    surface.write_to_png(&mut file)?;

    info!("wrote {:} tiles to {:}", count, filename.display());

    Ok(count)

}

// one letter size page, in whichever orientation fits the viewport.
// the page is written next to the output and only renamed into place
// once every tile is drawn.
pub fn render_pdf<S: Shape>(tiling: &Tiling<S>,
                            viewport: &Rect2d,
                            fill: &dyn Colorer<S>,
                            stroke: &dyn Colorer<S>,
                            settings: &RenderSettings,
                            filename: &Path) -> Result<usize> {

    if viewport.is_empty() {
        bail!("empty viewport");
    }

    let partial = filename.with_extension("part");

    let count = match write_pdf(tiling, viewport, fill, stroke, settings, &partial) {
        Ok(count) => count,
        Err(e) => {
            if partial.exists() {
                let _ = std::fs::remove_file(&partial);
            }
            return Err(e);
        }
    };

    std::fs::rename(&partial, filename).chain_err(
        || format!("moving {:} to {:}", partial.display(), filename.display()))?;

    info!("wrote {:} tiles to {:}", count, filename.display());

    Ok(count)

}

fn write_pdf<S: Shape>(tiling: &Tiling<S>,
                       viewport: &Rect2d,
                       fill: &dyn Colorer<S>,
                       stroke: &dyn Colorer<S>,
                       settings: &RenderSettings,
                       filename: &Path) -> Result<usize> {

    let vdims = viewport.dims();

    let page_dims = if vdims.x >= vdims.y {
        Vec2d::new(PAGE_LONG_EDGE, PAGE_SHORT_EDGE)
    } else {
        Vec2d::new(PAGE_SHORT_EDGE, PAGE_LONG_EDGE)
    };

    let mm = Vec2d::repeat(MARGIN);

    let page_rect = Rect2d::new(Point2d::origin() + mm,
                                Point2d::origin() + page_dims - mm);

    let (transform, scl) = get_page_transform(viewport, &page_rect, settings.vflip);

    let surface = cairo::PdfSurface::new(page_dims[0], page_dims[1], filename)?;

    let ctx = cairo::Context::new(&surface);

    // clip to the viewport so the page looks like the png
    let clip: Vec<Point2d> = viewport.corners().iter().map(|p| transform * p).collect();
    ctx.drawpoly(&clip);
    ctx.clip();

    let count = draw_tiles(&ctx, tiling, viewport, &transform,
                           fill, stroke, settings.stroke_width * scl);

    ctx.show_page();
    surface.finish();

    count

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::colorer::{RotationColorer, RotationOptions, StaticColorer};
    use crate::rules::penrose;
    use crate::tiling::TilingOptions;

    #[test]
    fn page_transform_centers_and_scales() {

        let contents = Rect2d::new(Point2d::new(0.0, 0.0), Point2d::new(200.0, 100.0));
        let page = Rect2d::new(Point2d::new(10.0, 10.0), Point2d::new(110.0, 110.0));

        let (transform, scl) = get_page_transform(&contents, &page, VFlip::No);

        assert!((scl - 0.5).abs() < 1e-12);

        let p = transform * Point2d::new(0.0, 0.0);
        assert!((p - Point2d::new(10.0, 35.0)).norm() < 1e-12);

        let (transform, _) = get_page_transform(&contents, &page, VFlip::Yes);

        let p = transform * Point2d::new(0.0, 0.0);
        assert!((p - Point2d::new(10.0, 85.0)).norm() < 1e-12);

    }

    #[test]
    fn png_output() {

        let rule = penrose::rule().unwrap();
        let tile = rule.tile_from_edge(&Vec2d::new(11.0, 17.0), &Vec2d::new(150.0, 150.0));
        let tiling = rule.tiling(tile, TilingOptions::default());

        let fill = RotationColorer::new(RotationOptions::default(), rule.protos().len());
        let stroke = StaticColorer::new(Color::black(1.0));

        let viewport = Rect2d::new(Point2d::new(0.0, 0.0), Point2d::new(320.0, 240.0));

        let filename = std::env::temp_dir().join("ptiling_rs_render_test.png");

        let count = render_png(&tiling, &viewport, &fill, &stroke,
                               &RenderSettings::default(), &filename).unwrap();

        assert!(count > 100);
        assert!(filename.exists());

        let _ = std::fs::remove_file(&filename);

    }

    #[test]
    fn cover_errors_abort_rendering() {

        let rule = penrose::rule().unwrap();
        let tile = rule.tile_from_edge(&Vec2d::new(11.0, 17.0), &Vec2d::zeros());

        let options = TilingOptions { include_ancestors: true, max_stack_depth: 2 };
        let tiling = rule.tiling(tile, options);

        let fill = StaticColorer::new(Color::new(120.0, 0.5, 0.5, 1.0));
        let stroke = StaticColorer::new(Color::black(1.0));

        let viewport = Rect2d::new(Point2d::new(5e4, 5e4), Point2d::new(5.1e4, 5.1e4));

        let filename = std::env::temp_dir().join("ptiling_rs_render_error.png");

        let result = render_png(&tiling, &viewport, &fill, &stroke,
                                &RenderSettings::default(), &filename);

        assert!(result.is_err());
        assert!(!filename.exists());

    }

    #[test]
    fn failed_pdf_leaves_nothing_behind() {

        let rule = penrose::rule().unwrap();
        let tile = rule.tile_from_edge(&Vec2d::new(11.0, 17.0), &Vec2d::zeros());

        let options = TilingOptions { include_ancestors: true, max_stack_depth: 2 };
        let tiling = rule.tiling(tile, options);

        let fill = StaticColorer::new(Color::new(120.0, 0.5, 0.5, 1.0));
        let stroke = StaticColorer::new(Color::black(1.0));

        let viewport = Rect2d::new(Point2d::new(5e4, 5e4), Point2d::new(5.1e4, 5.1e4));

        let filename = std::env::temp_dir().join("ptiling_rs_render_error.pdf");
        let _ = std::fs::remove_file(&filename);

        let result = render_pdf(&tiling, &viewport, &fill, &stroke,
                                &RenderSettings::default(), &filename);

        assert!(result.is_err());
        assert!(!filename.exists());
        assert!(!filename.with_extension("part").exists());

    }

    #[test]
    fn pdf_output() {

        let rule = penrose::rule().unwrap();
        let tile = rule.tile_from_edge(&Vec2d::new(11.0, 17.0), &Vec2d::new(150.0, 150.0));
        let tiling = rule.tiling(tile, TilingOptions::default());

        let fill = RotationColorer::new(RotationOptions::default(), rule.protos().len());
        let stroke = StaticColorer::new(Color::black(1.0));

        let viewport = Rect2d::new(Point2d::new(0.0, 0.0), Point2d::new(320.0, 240.0));

        let filename = std::env::temp_dir().join("ptiling_rs_render_test.pdf");

        let count = render_pdf(&tiling, &viewport, &fill, &stroke,
                               &RenderSettings::default(), &filename).unwrap();

        assert!(count > 100);
        assert!(filename.exists());
        assert!(!filename.with_extension("part").exists());

        let _ = std::fs::remove_file(&filename);

    }

}
