//////////////////////////////////////////////////////////////////////
// a prototile is one shape class of a substitution tiling: it knows
// how to find the parent of a shape and how to split a shape into
// children. prototiles of one family refer to each other by their
// index in the family's prototile list.

use std::fmt;
use std::sync::Arc;

use crate::geometry::{Shape, Vec2d};

//////////////////////////////////////////////////////////////////////
// a shape produced by a substitution step, along with the index of
// its prototile and whether it is mirrored relative to the shape it
// was computed from

#[derive(Debug, Clone, PartialEq)]
pub struct Offspring<S> {
    pub proto: usize,
    pub shape: S,
    pub reflected: bool
}

impl<S> Offspring<S> {

    pub fn new(proto: usize, shape: S) -> Self {
        Offspring { proto: proto, shape: shape, reflected: false }
    }

    pub fn mirrored(proto: usize, shape: S) -> Self {
        Offspring { proto: proto, shape: shape, reflected: true }
    }

}

pub type ParentFunc<S> = Box<dyn Fn(&S) -> Offspring<S> + Send + Sync>;
pub type ChildrenFunc<S> = Box<dyn Fn(&S) -> Vec<Offspring<S>> + Send + Sync>;
pub type SeedFunc<S> = Arc<dyn Fn(&Vec2d, &Vec2d) -> S + Send + Sync>;

//////////////////////////////////////////////////////////////////////

pub struct Prototile<S> {

    name: String,
    parent: ParentFunc<S>,
    children: ChildrenFunc<S>,
    seed: Option<SeedFunc<S>>,

    rotational_symmetry: u32,
    has_reflected_variant: bool,
    covering_generations: usize,
    overhang: f64

}

impl<S: Shape> Prototile<S> {

    pub fn new<P, C>(name: &str, parent: P, children: C) -> Self
    where P: Fn(&S) -> Offspring<S> + Send + Sync + 'static,
          C: Fn(&S) -> Vec<Offspring<S>> + Send + Sync + 'static {

        Prototile {
            name: name.to_string(),
            parent: Box::new(parent),
            children: Box::new(children),
            seed: None,
            rotational_symmetry: 1,
            has_reflected_variant: false,
            covering_generations: 0,
            overhang: 0.0
        }

    }

    pub fn with_rotational_symmetry(mut self, order: u32) -> Self {
        self.rotational_symmetry = order.max(1);
        self
    }

    pub fn with_reflected_variant(mut self, has_reflected_variant: bool) -> Self {
        self.has_reflected_variant = has_reflected_variant;
        self
    }

    pub fn with_covering_generations(mut self, generations: usize) -> Self {
        self.covering_generations = generations;
        self
    }

    pub fn with_overhang(mut self, overhang: f64) -> Self {
        self.overhang = overhang.max(0.0);
        self
    }

    pub fn with_seed<F>(mut self, seed: F) -> Self
    where F: Fn(&Vec2d, &Vec2d) -> S + Send + Sync + 'static {
        self.seed = Some(Arc::new(seed));
        self
    }

    pub fn compute_parent(&self, shape: &S) -> Offspring<S> {
        (self.parent)(shape)
    }

    pub fn compute_children(&self, shape: &S) -> Vec<Offspring<S>> {
        (self.children)(shape)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> Option<&SeedFunc<S>> {
        self.seed.as_ref()
    }

    pub fn has_seed(&self) -> bool {
        self.seed.is_some()
    }

    pub fn rotational_symmetry(&self) -> u32 {
        self.rotational_symmetry
    }

    pub fn has_reflected_variant(&self) -> bool {
        self.has_reflected_variant
    }

    pub fn covering_generations(&self) -> usize {
        self.covering_generations
    }

    pub fn overhang(&self) -> f64 {
        self.overhang
    }

}

impl<S> fmt::Debug for Prototile<S> {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        f.debug_struct("Prototile")
            .field("name", &self.name)
            .field("seed", &self.seed.is_some())
            .field("rotational_symmetry", &self.rotational_symmetry)
            .field("has_reflected_variant", &self.has_reflected_variant)
            .field("covering_generations", &self.covering_generations)
            .field("overhang", &self.overhang)
            .finish()

    }

}

impl<S> fmt::Display for Prototile<S> {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:}", self.name)
    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::{Point2d, Triangle};

    // toy family: a triangle whose parent is twice as big
    fn doubling() -> Prototile<Triangle> {

        Prototile::new(
            "doubling",
            |t: &Triangle| Offspring::new(0, t.scale(2.0)),
            |t: &Triangle| vec![Offspring::mirrored(0, t.scale(0.5))])

    }

    #[test]
    fn defaults_and_builders() {

        let p = doubling();

        assert_eq!(p.rotational_symmetry(), 1);
        assert!(!p.has_reflected_variant());
        assert_eq!(p.covering_generations(), 0);
        assert!(!p.has_seed());

        let p = p.with_rotational_symmetry(0)
            .with_covering_generations(2)
            .with_overhang(-1.0)
            .with_seed(|u: &Vec2d, v: &Vec2d| {
                Triangle::new(Point2d::from(*v), Point2d::from(u + v), Point2d::origin())
            });

        assert_eq!(p.rotational_symmetry(), 1);
        assert_eq!(p.covering_generations(), 2);
        assert_eq!(p.overhang(), 0.0);
        assert!(p.has_seed());
        assert_eq!(format!("{:}", p), "doubling");

    }

    #[test]
    fn functions_are_applied() {

        let p = doubling();

        let t = Triangle::new(Point2d::new(0.0, 0.0),
                              Point2d::new(1.0, 0.0),
                              Point2d::new(0.0, 1.0));

        let parent = p.compute_parent(&t);
        assert_eq!(parent.proto, 0);
        assert!(!parent.reflected);
        assert!((parent.shape.area() - 2.0).abs() < 1e-12);

        let children = p.compute_children(&t);
        assert_eq!(children.len(), 1);
        assert!(children[0].reflected);

    }

}
