use kokaton::geometry::*;

#[test]
fn in_bounds_reports_each_axis() {
    assert_eq!(in_bounds(&Rect::new(0.0, 0.0, 100.0, 100.0), 1600.0, 900.0), (true, true));
    assert_eq!(in_bounds(&Rect::new(-1.0, 10.0, 50.0, 50.0), 1600.0, 900.0), (false, true));
    assert_eq!(in_bounds(&Rect::new(10.0, 860.0, 50.0, 50.0), 1600.0, 900.0), (true, false));
    assert_eq!(in_bounds(&Rect::new(1560.0, -5.0, 50.0, 50.0), 1600.0, 900.0), (false, false));
}

#[test]
fn touching_the_far_edge_is_still_inside() {
    let r = Rect::new(1550.0, 850.0, 50.0, 50.0);
    assert!(fully_inside(&r, 1600.0, 900.0));
}

#[test]
fn rectangles_sharing_an_edge_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&b));
    let c = Rect::new(9.0, 9.0, 10.0, 10.0);
    assert!(a.intersects(&c));
    assert!(c.intersects(&a));
}

#[test]
fn centered_rect_has_requested_centre() {
    let r = Rect::centered(Vec2::new(50.0, 40.0), 20.0, 10.0);
    assert_eq!(r, Rect::new(40.0, 35.0, 20.0, 10.0));
    assert_eq!(r.center(), Vec2::new(50.0, 40.0));
}

#[test]
fn direction_is_a_unit_vector() {
    let from = Rect::new(0.0, 0.0, 10.0, 10.0);
    let to = Rect::new(30.0, 40.0, 10.0, 10.0);
    let d = direction(&from, &to).expect("distinct centres");
    assert!((d.x - 0.6).abs() < 1e-6);
    assert!((d.y - 0.8).abs() < 1e-6);
    assert!((d.length() - 1.0).abs() < 1e-6);
}

#[test]
fn direction_between_coincident_centres_is_none() {
    let a = Rect::new(5.0, 5.0, 10.0, 10.0);
    let b = Rect::new(0.0, 0.0, 20.0, 20.0);
    assert_eq!(direction(&a, &b), None);
}

fn viewport() -> Viewport {
    Viewport {
        width: 1600.0,
        height: 900.0,
        origin_col: 1,
        origin_row: 2,
        cols: 80,
        rows: 20,
    }
}

#[test]
fn viewport_maps_corners_inside_the_border() {
    let vp = viewport();
    assert_eq!(vp.to_cell(Vec2::new(0.0, 0.0)), Some((1, 2)));
    assert_eq!(vp.to_cell(Vec2::new(1599.9, 899.9)), Some((80, 21)));
    assert_eq!(vp.to_cell(Vec2::new(800.0, 450.0)), Some((41, 12)));
}

#[test]
fn viewport_rejects_points_off_the_playfield() {
    let vp = viewport();
    assert_eq!(vp.to_cell(Vec2::new(-1.0, 10.0)), None);
    assert_eq!(vp.to_cell(Vec2::new(1600.0, 10.0)), None);
    let collapsed = Viewport { cols: 0, ..vp };
    assert_eq!(collapsed.to_cell(Vec2::new(10.0, 10.0)), None);
}
