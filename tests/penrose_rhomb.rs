use ptiling_rs::geometry::{points_equal, Point2d, Rhomb, Shape, Vec2d, PHI};
use ptiling_rs::rules::penrose;
use ptiling_rs::{sanity, Tile};

fn generations(start: &Tile<Rhomb>, depth: usize) -> Vec<Tile<Rhomb>> {

    let mut all = vec![start.clone()];
    let mut current = vec![start.clone()];

    for _ in 0..depth {
        current = current.iter().flat_map(|t| t.children()).collect();
        all.extend(current.iter().cloned());
    }

    all

}

fn same(p: &Point2d, q: &Point2d) -> bool {
    points_equal(p, q)
}

#[test]
fn parents_invert_children() {

    let rule = penrose::rule().unwrap();
    let seed = rule.tile_from_edge(&Vec2d::new(31.0, 17.0), &Vec2d::new(-40.0, 250.0));

    let tiles = generations(&seed, 4);

    assert!(tiles.iter().any(|t| t.proto_index() == penrose::THIN));

    for t in &tiles {
        assert!(sanity::inverts_children(t), "{:} is not its parent's child", t);
    }

    // going up and back down lands on the same tile
    let mut ancestor = seed.clone();

    for _ in 0..6 {
        ancestor = ancestor.parent();
        assert!(sanity::inverts_children(&ancestor));
    }

}

#[test]
fn shared_vertices_three_generations_down() {

    let rule = penrose::rule().unwrap();
    let seed = rule.tile_from_edge(&Vec2d::new(400.0, 0.0), &Vec2d::new(900.0, 200.0));

    let mut checked_fat = 0;
    let mut checked_thin = 0;

    for p in generations(&seed, 2) {

        let s = p.shape();
        let c = p.children();

        if p.proto_index() == penrose::FAT {

            assert_eq!(c.len(), 3);
            assert_eq!(c.iter().map(|t| t.proto_index()).collect::<Vec<_>>(),
                       vec![penrose::FAT, penrose::FAT, penrose::THIN]);

            assert!(same(s.c(), c[0].shape().a()));
            assert!(same(s.d(), c[1].shape().a()));
            assert!(same(s.a(), c[1].shape().c()));
            assert!(same(s.b(), c[2].shape().a()));

            checked_fat += 1;

        } else {

            assert_eq!(c.len(), 2);
            assert_eq!(c.iter().map(|t| t.proto_index()).collect::<Vec<_>>(),
                       vec![penrose::FAT, penrose::THIN]);

            assert!(same(s.a(), c[0].shape().c()));
            assert!(same(s.d(), c[0].shape().a()));
            assert!(same(s.c(), c[1].shape().a()));

            checked_thin += 1;

        }

    }

    // 1 + 3 + 8 parents: (1 + 2 + 5) fat and (0 + 1 + 3) thin
    assert_eq!(checked_fat, 8);
    assert_eq!(checked_thin, 4);

}

#[test]
fn similar_children_scale_by_phi() {

    let rule = penrose::rule().unwrap();
    let seed = rule.tile_from_edge(&Vec2d::new(7.0, 3.0), &Vec2d::zeros());

    let thin = seed.children()[2].clone();
    assert_eq!(thin.proto_index(), penrose::THIN);

    let fat_kids = sanity::similar_children(&seed);
    assert_eq!(fat_kids.len(), 2);

    for c in &fat_kids {
        assert!((sanity::inflation_factor(&seed, c) - PHI).abs() < 1e-7);
        assert!((seed.shape().edge_length() / c.shape().edge_length() - PHI).abs() < 1e-7);
    }

    let thin_kids = sanity::similar_children(&thin);
    assert_eq!(thin_kids.len(), 1);
    assert!((sanity::inflation_factor(&thin, &thin_kids[0]) - PHI).abs() < 1e-7);

}

#[test]
fn descendants_stay_counterclockwise() {

    let rule = penrose::rule().unwrap();
    let seed = rule.tile_from_edge(&Vec2d::new(-13.0, 29.0), &Vec2d::new(5.0, 5.0));

    assert!(!seed.shape().chirality());

    for t in generations(&seed, 3) {
        assert!(!t.shape().chirality());
        assert!(!t.reflected());
    }

}

#[test]
fn rule_properties() {

    let rule = penrose::rule().unwrap();

    assert_eq!(rule.name(), penrose::NAME);
    assert_eq!(rule.protos().len(), 2);
    assert_eq!(rule.seed_index(), penrose::FAT);

    assert!(!sanity::is_volume_hierarchic(&rule));
    assert!(sanity::can_cover_arbitrary_viewport(&rule));

    for p in rule.protos().iter() {
        assert_eq!(p.rotational_symmetry(), 2);
        assert!(p.covering_generations() > 0);
        assert!(!p.has_reflected_variant());
    }

}
