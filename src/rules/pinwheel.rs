//////////////////////////////////////////////////////////////////////
// pinwheel tilings.
//
// the classic one is Conway's: a 1-2-sqrt(5) right triangle split
// into five copies scaled by 1/sqrt(5), three of them mirrored.
// triangles are (a, b, c) with a->b the short side, b->c the medium
// side and c->a the long side, so the right angle is at b.
//
// the (p, q) family generalizes this to right triangles with legs in
// ratio p:q. dropping the altitude from b splits the triangle into
// two mirrored copies of itself, scaled by p and q over the
// hypotenuse, which are cut into p^2 and q^2 congruent pieces. every
// child is mirrored relative to its parent.

use tracing::{debug, warn};

use crate::errors::*;
use crate::geometry::{perp, Matrix3d, Point2d, Shape, Triangle, Vec2d, Vec3d, EPSILON};
use crate::prototile::{Offspring, Prototile};
use crate::rule::Rule;

pub const NAME: &str = "Pinwheel";

pub const DEFAULT_P: i64 = 1;
pub const DEFAULT_Q: i64 = 2;

//////////////////////////////////////////////////////////////////////
// classic pinwheel

pub fn parent(t: &Triangle) -> Offspring<Triangle> {

    let (a, b, c) = (t.a(), t.b(), t.c());

    let m = b - c;
    let s = b - a;

    Offspring::new(0, Triangle::new(a + 0.5 * m, b + s, a - 2.0 * m))

}

pub fn children(t: &Triangle) -> Vec<Offspring<Triangle>> {

    let l = t.a() - t.c();
    let m = t.b() - t.c();

    let c0 = *t.c();

    // corner triangle on the long side
    let ta = Triangle::new(c0 + 0.5 * m, c0 + 0.4 * l, c0);

    // the rest are laid out edge to edge from there
    let tb = Triangle::new(*ta.a(), *ta.b(), ta.b() + (ta.b() - ta.c()));
    let tc = Triangle::new(*tb.c(), tb.c() + (tb.a() - tb.b()), *tb.a());
    let td = Triangle::new(tc.b() + (tc.b() - tc.a()), *tc.b(), *tc.c());

    let te = {
        let l = td.b() - td.a();
        let eb = td.b() + l;
        let ea = td.b() + 0.5 * (td.b() - td.c()) + l;
        Triangle::new(ea, eb, *td.a())
    };

    vec![
        Offspring::new(0, tc),
        Offspring::mirrored(0, ta),
        Offspring::new(0, tb),
        Offspring::mirrored(0, td),
        Offspring::mirrored(0, te)
    ]

}

// triangle with short side u, translated by v
pub fn seed(u: &Vec2d, v: &Vec2d) -> Triangle {

    let o = Point2d::from(*v);

    Triangle::new(o + u, o, o + 2.0 * perp(u))

}

pub fn prototiles() -> Vec<Prototile<Triangle>> {

    let triangle = Prototile::new("triangle", parent, children)
        .with_rotational_symmetry(1)
        .with_reflected_variant(true)
        .with_seed(seed);

    vec![triangle]

}

pub fn rule() -> Result<Rule<Triangle>> {
    Rule::new(NAME, prototiles())
}

//////////////////////////////////////////////////////////////////////
// (p, q) pinwheel

// split triangle (x, y, z) into n^2 copies scaled by 1/n: upright
// ones first, then the point-reflected ones in between
fn subdivide(x: &Point2d, y: &Point2d, z: &Point2d, n: usize) -> Vec<Triangle> {

    let nf = n as f64;
    let dy = (y - x) / nf;
    let dz = (z - x) / nf;

    let grid = |i: usize, j: usize| x + (i as f64) * dy + (j as f64) * dz;

    let mut rval = Vec::with_capacity(n * n);

    for i in 0..n {
        for j in 0..(n - i) {
            rval.push(Triangle::new(grid(i, j), grid(i + 1, j), grid(i, j + 1)));
        }
    }

    for i in 0..n {
        for j in 0..(n - 1 - i) {
            rval.push(Triangle::new(grid(i + 1, j + 1), grid(i, j + 1), grid(i + 1, j)));
        }
    }

    rval

}

pub fn normalize(p: i64, q: i64) -> (usize, usize) {

    if p == 1 && q == 1 {
        // no child of the (1, 1) split has an interior fixed point, so
        // its ancestors only grow into a wedge. (2, 2) is the same
        // triangle split one level finer.
        warn!("pinwheel parameters (1, 1) cannot cover the plane, using (2, 2)");
        (2, 2)
    } else if p > 0 && q > 0 {
        (p as usize, q as usize)
    } else {
        warn!("invalid pinwheel parameters ({:}, {:}), using ({:}, {:})",
              p, q, DEFAULT_P, DEFAULT_Q);
        (DEFAULT_P as usize, DEFAULT_Q as usize)
    }

}

fn pq_children(t: &Triangle, p: usize, q: usize) -> Vec<Triangle> {

    let (a, b, c) = (t.a(), t.b(), t.c());

    let pf = p as f64;
    let qf = q as f64;

    // foot of the altitude from b
    let h = a + (pf * pf / (pf * pf + qf * qf)) * (c - a);

    let mut rval = subdivide(a, &h, b, p);
    rval.extend(subdivide(b, &h, c, q));

    rval

}

// children are affine combinations of the parent's vertices. row i of
// the result holds the weights of the parent's vertices for vertex i
// of child k.
fn child_weights(k: usize, p: usize, q: usize) -> Matrix3d {

    let mut m = Matrix3d::zeros();

    for j in 0..3 {

        // x coordinates pick out the weight of parent vertex j
        let mut basis = [Point2d::origin(); 3];
        basis[j].x = 1.0;

        let children = pq_children(&Triangle::new(basis[0], basis[1], basis[2]), p, q);

        for (i, v) in children[k].vertices().iter().enumerate() {
            m[(i, j)] = v.x;
        }

    }

    m

}

// barycentric coordinates of the point that sits at the same spot in
// the parent and in child k. ancestors grow around this point, so it
// has to be inside the triangle for them to cover the whole plane.
fn fixed_point_depth(weights: &Matrix3d) -> f64 {

    let mut system = weights.transpose() - Matrix3d::identity();
    system.set_row(2, &nalgebra::RowVector3::new(1.0, 1.0, 1.0));

    match system.try_inverse() {
        Some(inv) => (inv * Vec3d::new(0.0, 0.0, 1.0)).min(),
        None => f64::MIN
    }

}

// choose which child a tile is taken to be when computing its parent
fn chain_child(p: usize, q: usize) -> Result<(usize, Matrix3d)> {

    let mut best: Option<(usize, f64, Matrix3d)> = None;

    for k in 0..(p * p + q * q) {

        let weights = child_weights(k, p, q);

        let inv = match weights.try_inverse() {
            Some(inv) => inv,
            None => { continue; }
        };

        let depth = fixed_point_depth(&weights);

        if best.as_ref().map_or(true, |&(_, d, _)| depth > d + EPSILON) {
            best = Some((k, depth, inv));
        }

    }

    match best {
        Some((k, depth, inv)) => {
            debug!("pinwheel({:},{:}) parents invert child {:} (depth {:.3})",
                   p, q, k, depth);
            Ok((k, inv))
        },
        None => bail!("pinwheel({:},{:}) has no invertible child", p, q)
    }

}

pub fn pq_prototiles(p: usize, q: usize) -> Result<Vec<Prototile<Triangle>>> {

    let (_, inv) = chain_child(p, q)?;

    let parent = move |t: &Triangle| {

        let v = t.vertices();

        let vertex = |j: usize| {
            Point2d::from((0..3).fold(Vec2d::zeros(), |acc, i| acc + inv[(j, i)] * v[i].coords))
        };

        Offspring::mirrored(0, Triangle::new(vertex(0), vertex(1), vertex(2)))

    };

    let children = move |t: &Triangle| {
        pq_children(t, p, q).into_iter()
            .map(|s| Offspring::mirrored(0, s))
            .collect::<Vec<_>>()
    };

    let ratio = q as f64 / p as f64;

    let seed = move |u: &Vec2d, v: &Vec2d| {
        let o = Point2d::from(*v);
        Triangle::new(o + u, o, o + ratio * perp(u))
    };

    let triangle = Prototile::new("triangle", parent, children)
        .with_rotational_symmetry(1)
        .with_reflected_variant(true)
        .with_seed(seed);

    Ok(vec![triangle])

}

pub fn pinwheel_pq(p: i64, q: i64) -> Result<Rule<Triangle>> {

    let (p, q) = normalize(p, q);

    Rule::new(&format!("{:}({:},{:})", NAME, p, q), pq_prototiles(p, q)?)

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::Shape;

    fn sides(t: &Triangle) -> (f64, f64, f64) {
        ((t.b() - t.a()).norm(), (t.c() - t.b()).norm(), (t.a() - t.c()).norm())
    }

    #[test]
    fn seed_has_pinwheel_sides() {

        let t = seed(&Vec2d::new(3.0, 4.0), &Vec2d::new(-1.0, 2.0));
        let (s, m, l) = sides(&t);

        assert!((s - 5.0).abs() < 1e-12);
        assert!((m - 10.0).abs() < 1e-12);
        assert!((l - 125f64.sqrt()).abs() < 1e-12);
        assert_eq!(*t.b(), Point2d::new(-1.0, 2.0));

    }

    #[test]
    fn five_similar_children() {

        let t = seed(&Vec2d::new(3.0, 1.0), &Vec2d::new(5.0, 7.0));
        let kids = children(&t);

        assert_eq!(kids.len(), 5);

        let total: f64 = kids.iter().map(|c| c.shape.area()).sum();
        assert!((total - t.area()).abs() < 1e-9);

        for c in &kids {
            let (s, m, l) = sides(&c.shape);
            assert!((m / s - 2.0).abs() < 1e-9);
            assert!((l / s - 5f64.sqrt()).abs() < 1e-9);
            assert_eq!(c.shape.chirality() != t.chirality(), c.reflected);
        }

        let up = parent(&t);
        assert!(!up.reflected);
        assert!(children(&up.shape)[0].shape.approx_eq(&t));

    }

    #[test]
    fn invalid_parameters_fall_back() {

        assert_eq!(normalize(2, 3), (2, 3));
        assert_eq!(normalize(0, 3), (1, 2));
        assert_eq!(normalize(2, -1), (1, 2));
        assert_eq!(normalize(1, 1), (2, 2));
        assert_eq!(normalize(3, 3), (3, 3));

    }

    #[test]
    fn pq_subdivision() {

        let protos = pq_prototiles(2, 3).unwrap();
        let t = protos[0].seed().map(|f| f(&Vec2d::new(2.0, 0.0), &Vec2d::zeros()));

        let t = match t {
            Some(t) => t,
            None => panic!("pq prototile has no seed")
        };

        let (s, m, _) = sides(&t);
        assert!((m / s - 1.5).abs() < 1e-12);

        let children = protos[0].compute_children(&t);
        assert_eq!(children.len(), 13);

        let total: f64 = children.iter().map(|c| c.shape.area()).sum();
        assert!((total - t.area()).abs() < 1e-9);

        for c in &children {
            assert!(c.reflected);
            assert!(c.shape.chirality() != t.chirality());
            assert!((c.shape.area() * 13.0 - t.area()).abs() < 1e-9);
        }

        let up = protos[0].compute_parent(&t);
        assert!(up.reflected);

        let found = protos[0].compute_children(&up.shape).iter()
            .filter(|c| c.shape.approx_eq(&t))
            .count();
        assert_eq!(found, 1);

    }

    #[test]
    fn pq_ancestors_surround_seed() {

        for &(p, q) in &[(1, 2), (2, 3), (3, 1)] {

            let (k, _) = chain_child(p, q).unwrap();
            assert!(k > 0);

            let protos = pq_prototiles(p, q).unwrap();
            let t = protos[0].seed().map(|f| f(&Vec2d::new(1.0, 0.0), &Vec2d::zeros()));

            let mut t = match t {
                Some(t) => t,
                None => panic!("pq prototile has no seed")
            };

            // a point on the far side of the corner at a
            let behind = t.a() + (t.a() - t.c());

            for _ in 0..12 {
                t = protos[0].compute_parent(&t).shape;
            }

            assert!(t.contains_point(&behind));

        }

    }

}
