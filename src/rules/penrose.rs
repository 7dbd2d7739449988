//////////////////////////////////////////////////////////////////////
// Penrose rhomb tiling: fat rhombs (72/108 degrees) and thin rhombs
// (36/144 degrees), both with vertices a, b, c, d in counterclockwise
// order. fat rhombs are acute at a and c, thin ones at b and d.
//
// the fat rhomb splits into two fat rhombs and a thin one, and the
// thin rhomb into one of each. the children overlap the edges of the
// parent (the tiling is not volume hierarchic), so covers need to
// scan a few generations past the first containing ancestor.

use crate::errors::*;
use crate::geometry::{rotate, Point2d, Rhomb, Vec2d, DEG, PHI};
use crate::prototile::{Offspring, Prototile};
use crate::rule::Rule;

pub const NAME: &str = "Penrose-Rhomb";

// indices into the prototile list
pub const FAT: usize = 0;
pub const THIN: usize = 1;

const ROTATIONAL_SYMMETRY: u32 = 2;
const COVERING_GENERATIONS: usize = 3;

// descendants stay within about 1.54 edge lengths of a rhomb, and a
// rhomb's bounding box is at least 1.14 edge lengths wide
const OVERHANG: f64 = 1.5;

//////////////////////////////////////////////////////////////////////

// point a fraction 1/phi of the way from p0 to p1
fn golden(p0: &Point2d, p1: &Point2d) -> Point2d {
    p0 + (p1 - p0) / PHI
}

// fourth vertex of the parallelogram p0, p1, p2, x
fn complete(p0: &Point2d, p1: &Point2d, p2: &Point2d) -> Point2d {
    p2 + (p0 - p1)
}

pub fn fat_children(p: &Rhomb) -> Vec<Offspring<Rhomb>> {

    let (a, b, c, d) = (p.a(), p.b(), p.c(), p.d());

    let r = golden(c, a);
    let q = golden(c, d);
    let qq = golden(c, b);

    vec![
        Offspring::new(FAT, Rhomb::new(*c, q, r, qq)),
        Offspring::new(FAT, Rhomb::new(*d, complete(d, &r, a), *a, r)),
        Offspring::new(THIN, Rhomb::new(*b, complete(b, &r, &qq), qq, r))
    ]

}

pub fn thin_children(t: &Rhomb) -> Vec<Offspring<Rhomb>> {

    let (a, c, d) = (t.a(), t.c(), t.d());

    let x = golden(d, c);

    vec![
        Offspring::new(FAT, Rhomb::new(*d, complete(d, &x, a), *a, x)),
        Offspring::new(THIN, Rhomb::new(*c, complete(c, a, &x), x, *a))
    ]

}

// a fat rhomb is the first child of its parent
pub fn fat_parent(f: &Rhomb) -> Offspring<Rhomb> {

    let a = f.a();
    let grow = |p: &Point2d| a + PHI * (p - a);

    Offspring::new(FAT, Rhomb::new(grow(f.c()), grow(f.d()), *a, grow(f.b())))

}

// a thin rhomb is the last child of a fat parent
pub fn thin_parent(t: &Rhomb) -> Offspring<Rhomb> {

    let pb = *t.a();
    let pc = Point2d::from(PHI * PHI * t.c().coords - PHI * t.a().coords);
    let pa = pc + PHI * (t.d() - pc);
    let pd = pa + (pc - pb);

    Offspring::new(FAT, Rhomb::new(pa, pb, pc, pd))

}

// fat rhomb with edge u starting at v
pub fn seed(u: &Vec2d, v: &Vec2d) -> Rhomb {

    let a = Point2d::from(*v);
    let b = a + u;
    let d = a + rotate(u, 72.0 * DEG);

    Rhomb::new(a, b, b + (d - a), d)

}

pub fn prototiles() -> Vec<Prototile<Rhomb>> {

    let fat = Prototile::new("fat", fat_parent, fat_children)
        .with_rotational_symmetry(ROTATIONAL_SYMMETRY)
        .with_covering_generations(COVERING_GENERATIONS)
        .with_overhang(OVERHANG)
        .with_seed(seed);

    let thin = Prototile::new("thin", thin_parent, thin_children)
        .with_rotational_symmetry(ROTATIONAL_SYMMETRY)
        .with_covering_generations(COVERING_GENERATIONS)
        .with_overhang(OVERHANG);

    vec![fat, thin]

}

pub fn rule() -> Result<Rule<Rhomb>> {
    Rule::new(NAME, prototiles())
}

//////////////////////////////////////////////////////////////////////
