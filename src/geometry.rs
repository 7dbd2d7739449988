//////////////////////////////////////////////////////////////////////
// 2D geometry for substitution tilings: points & vectors from
// nalgebra, axis-aligned rects, query regions, and the convex shapes
// that tiles are made of

use std::fmt;

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

pub type Vec2d = nalgebra::Vector2<f64>;
pub type Vec3d = nalgebra::Vector3<f64>;
pub type Point2d = nalgebra::geometry::Point2<f64>;
pub type Rotation2d = nalgebra::Rotation2<f64>;
pub type Translation2d = nalgebra::Translation2<f64>;
pub type Transform2d = nalgebra::Transform2<f64>;
pub type Matrix3d = nalgebra::Matrix3<f64>;

//////////////////////////////////////////////////////////////////////
// constants

pub const PHI: f64 = 1.618033988749895;
pub const PI: f64 = std::f64::consts::PI;
pub const DEG: f64 = PI / 180.0;

// relative tolerance for comparing coordinates
pub const EPSILON: f64 = 1e-9;

//////////////////////////////////////////////////////////////////////
// small vector helpers

// rotate v counterclockwise by 90 degrees
pub fn perp(v: &Vec2d) -> Vec2d {
    Vec2d::new(-v.y, v.x)
}

// rotate v counterclockwise by angle (radians)
pub fn rotate(v: &Vec2d, angle: f64) -> Vec2d {
    Rotation2d::new(angle) * v
}

// angle of v in radians, in [0, 2pi)
pub fn theta(v: &Vec2d) -> f64 {
    let t = v.y.atan2(v.x);
    if t < 0.0 { t + 2.0 * PI } else { t }
}

// tolerance scaled to the magnitude of the coordinates involved
fn tolerance(p: &Point2d, q: &Point2d) -> f64 {
    EPSILON * (1.0 + p.coords.norm().max(q.coords.norm()))
}

pub fn points_equal(p: &Point2d, q: &Point2d) -> bool {
    (p - q).norm() <= tolerance(p, q)
}

//////////////////////////////////////////////////////////////////////
// get homogeneous coordinates (a, b, c) of line from two points
// line is normalized so that a^2 + b^2 = 1

pub fn line_from_points(p1: &Point2d, p2: &Point2d) -> Vec3d {

    let p1 = p1.to_homogeneous();
    let p2 = p2.to_homogeneous();

    let l = p1.cross(&p2);

    let p = (l[0]*l[0] + l[1]*l[1]).sqrt();

    l / p

}

// twice the signed area of the polygon, positive for counterclockwise
fn doubled_signed_area(points: &[Point2d]) -> f64 {

    let n = points.len();

    (0..n).map(|i| {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        p.x * q.y - q.x * p.y
    }).sum()

}

//////////////////////////////////////////////////////////////////////
// does point p lie inside (or on) the convex polygon?

fn convex_contains_point(points: &[Point2d], p: &Point2d) -> bool {

    let n = points.len();

    if n < 3 {
        return false;
    }

    let s = if doubled_signed_area(points) < 0.0 { -1.0 } else { 1.0 };

    let ph = p.to_homogeneous();

    points.iter().enumerate().all(|(idx, p0)| {

        let p1 = &points[(idx + 1) % n];

        // degenerate edges don't constrain anything
        if points_equal(p0, p1) {
            return true;
        }

        s * line_from_points(p0, p1).dot(&ph) >= -tolerance(p0, p)

    })

}

//////////////////////////////////////////////////////////////////////
// separating axis test for two convex polygons. touching counts as
// intersecting.

fn project(points: &[Point2d], axis: &Vec2d) -> (f64, f64) {

    points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        let d = axis.dot(&p.coords);
        (lo.min(d), hi.max(d))
    })

}

fn has_separating_edge(a: &[Point2d], b: &[Point2d]) -> bool {

    let n = a.len();

    for (idx, p0) in a.iter().enumerate() {

        let p1 = &a[(idx + 1) % n];
        let axis = perp(&(p1 - p0));

        if axis.norm() == 0.0 {
            continue;
        }

        let (alo, ahi) = project(a, &axis);
        let (blo, bhi) = project(b, &axis);

        let slack = EPSILON * axis.norm() * (1.0 + ahi.abs().max(bhi.abs()));

        if ahi < blo - slack || bhi < alo - slack {
            return true;
        }

    }

    false

}

fn convex_intersect(a: &[Point2d], b: &[Point2d]) -> bool {

    if a.len() < 3 || b.len() < 3 {
        return false;
    }

    !has_separating_edge(a, b) && !has_separating_edge(b, a)

}

//////////////////////////////////////////////////////////////////////
// Rect2d type has lower-left p0 and upper-right p1

#[derive(Debug, Clone, PartialEq)]
pub struct Rect2d {

    pub p0: Point2d,
    pub p1: Point2d

}

impl Rect2d {

    // empty rectangle has p0 > p1
    pub fn empty() -> Self {

        let p0 = Point2d::new(f64::MAX, f64::MAX);
        let p1 = -p0;

        Rect2d { p0: p0, p1: p1 }

    }

    // new rect from points
    pub fn new(p0: Point2d, p1: Point2d) -> Self {
        Rect2d { p0: p0, p1: p1 }
    }

    // bounding rect of some points
    pub fn from_points(points: &[Point2d]) -> Self {

        let mut rect = Rect2d::empty();

        for p in points {
            rect.expand(p);
        }

        rect

    }

    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }

    // expand this rect to include the given point
    pub fn expand(&mut self, p: &Point2d) {
        self.p0 = self.p0.inf(p);
        self.p1 = self.p1.sup(p);
    }

    // grow by d on every side
    pub fn pad(&self, d: f64) -> Self {

        if self.is_empty() {
            return self.clone();
        }

        let dv = Vec2d::repeat(d);

        Rect2d { p0: self.p0 - dv, p1: self.p1 + dv }

    }

    // dimensions of this rect
    pub fn dims(&self) -> Vec2d {
        self.p1 - self.p0
    }

    // center of this rect
    pub fn center(&self) -> Point2d {
        self.p0 + 0.5*(self.p1 - self.p0)
    }

    // counterclockwise corners starting at p0
    pub fn corners(&self) -> Vec<Point2d> {
        vec![
            self.p0,
            Point2d::new(self.p1.x, self.p0.y),
            self.p1,
            Point2d::new(self.p0.x, self.p1.y)
        ]
    }

    pub fn overlaps(&self, other: &Rect2d) -> bool {

        !self.is_empty() && !other.is_empty() &&
            self.p0.x <= other.p1.x && other.p0.x <= self.p1.x &&
            self.p0.y <= other.p1.y && other.p0.y <= self.p1.y

    }

}

//////////////////////////////////////////////////////////////////////
// a query region (mask): usually the viewport rect, but any convex
// polygon works

#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Rect(Rect2d),
    Polygon(Vec<Point2d>)
}

impl Region {

    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Region::Rect(Rect2d::new(Point2d::new(x0.min(x1), y0.min(y1)),
                                 Point2d::new(x0.max(x1), y0.max(y1))))
    }

    pub fn empty() -> Self {
        Region::Rect(Rect2d::empty())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Region::Rect(r) => r.is_empty(),
            Region::Polygon(points) => {
                points.len() < 3 || doubled_signed_area(points) == 0.0
            }
        }
    }

    pub fn is_rect(&self) -> bool {
        matches!(self, Region::Rect(_))
    }

    // only rects get padded; other polygons are used as given
    pub fn pad(&self, d: f64) -> Self {
        match self {
            Region::Rect(r) => Region::Rect(r.pad(d)),
            Region::Polygon(_) => self.clone()
        }
    }

    pub fn vertices(&self) -> Vec<Point2d> {
        match self {
            Region::Rect(r) => r.corners(),
            Region::Polygon(points) => points.clone()
        }
    }

    pub fn bounds(&self) -> Rect2d {
        match self {
            Region::Rect(r) => r.clone(),
            Region::Polygon(points) => Rect2d::from_points(points)
        }
    }

    // does the region overlap the convex polygon?
    pub fn intersects_polygon(&self, points: &[Point2d]) -> bool {

        if self.is_empty() {
            return false;
        }

        convex_intersect(&self.vertices(), points)

    }

    // does the region overlap the rect?
    pub fn intersects_rect(&self, rect: &Rect2d) -> bool {
        match self {
            Region::Rect(r) => r.overlaps(rect),
            Region::Polygon(_) => {
                !rect.is_empty() && self.intersects_polygon(&rect.corners())
            }
        }
    }

    // does the convex polygon contain the whole region? the empty
    // region is contained by anything.
    pub fn inside_polygon(&self, points: &[Point2d]) -> bool {

        if self.is_empty() {
            return true;
        }

        self.vertices().iter().all(|p| convex_contains_point(points, p))

    }

}

//////////////////////////////////////////////////////////////////////
// the shape capability that tiles are generic over. shapes are
// convex polygons given by their vertices in order.

pub trait Shape: Clone + fmt::Debug + Send + Sync + 'static {

    fn vertices(&self) -> &[Point2d];

    // apply f to every vertex
    fn map<F: Fn(&Point2d) -> Point2d>(&self, f: F) -> Self;

    fn translate(&self, v: &Vec2d) -> Self {
        self.map(|p| p + v)
    }

    // scale about the origin
    fn scale(&self, s: f64) -> Self {
        self.map(|p| Point2d::from(p.coords * s))
    }

    // mirror across the x axis
    fn reflect(&self) -> Self {
        self.map(|p| Point2d::new(p.x, -p.y))
    }

    fn approx_eq(&self, other: &Self) -> bool {

        let a = self.vertices();
        let b = other.vertices();

        a.len() == b.len() &&
            a.iter().zip(b.iter()).all(|(p, q)| points_equal(p, q))

    }

    fn bounds(&self) -> Rect2d {
        Rect2d::from_points(self.vertices())
    }

    // larger side of the bounding box
    fn extent(&self) -> f64 {
        let dims = self.bounds().dims();
        dims.x.max(dims.y)
    }

    fn signed_area(&self) -> f64 {
        0.5 * doubled_signed_area(self.vertices())
    }

    fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    // true for clockwise vertex order (mirror image of the usual
    // counterclockwise orientation)
    fn chirality(&self) -> bool {
        self.signed_area() < 0.0
    }

    fn contains_point(&self, p: &Point2d) -> bool {
        convex_contains_point(self.vertices(), p)
    }

    fn intersects(&self, region: &Region) -> bool {
        region.intersects_polygon(self.vertices())
    }

    fn contains(&self, region: &Region) -> bool {
        region.inside_polygon(self.vertices())
    }

}

//////////////////////////////////////////////////////////////////////
// triangle shape

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pts: [Point2d; 3]
}

impl Triangle {

    pub fn new(a: Point2d, b: Point2d, c: Point2d) -> Self {
        Triangle { pts: [a, b, c] }
    }

    pub fn a(&self) -> &Point2d { &self.pts[0] }
    pub fn b(&self) -> &Point2d { &self.pts[1] }
    pub fn c(&self) -> &Point2d { &self.pts[2] }

}

impl Shape for Triangle {

    fn vertices(&self) -> &[Point2d] {
        &self.pts
    }

    fn map<F: Fn(&Point2d) -> Point2d>(&self, f: F) -> Self {
        Triangle { pts: [f(&self.pts[0]), f(&self.pts[1]), f(&self.pts[2])] }
    }

}

//////////////////////////////////////////////////////////////////////
// rhomb shape, vertices a, b, c, d in order (a opposite c)

#[derive(Debug, Clone, PartialEq)]
pub struct Rhomb {
    pts: [Point2d; 4]
}

impl Rhomb {

    pub fn new(a: Point2d, b: Point2d, c: Point2d, d: Point2d) -> Self {
        Rhomb { pts: [a, b, c, d] }
    }

    pub fn a(&self) -> &Point2d { &self.pts[0] }
    pub fn b(&self) -> &Point2d { &self.pts[1] }
    pub fn c(&self) -> &Point2d { &self.pts[2] }
    pub fn d(&self) -> &Point2d { &self.pts[3] }

    pub fn edge_length(&self) -> f64 {
        (self.pts[1] - self.pts[0]).norm()
    }

}

impl Shape for Rhomb {

    fn vertices(&self) -> &[Point2d] {
        &self.pts
    }

    fn map<F: Fn(&Point2d) -> Point2d>(&self, f: F) -> Self {
        Rhomb { pts: [f(&self.pts[0]), f(&self.pts[1]),
                      f(&self.pts[2]), f(&self.pts[3])] }
    }

}

//////////////////////////////////////////////////////////////////////
