use invaders_mvc::coord::Coord;

#[test]
fn add_is_componentwise() {
    let a = Coord::new(1.0, 2.0, 3.0);
    let b = Coord::new(-4.0, 0.5, 0.0);
    assert_eq!(a + b, Coord::new(-3.0, 2.5, 3.0));
    assert_eq!(a.add(b), a + b);
}

#[test]
fn scale_multiplies_every_axis() {
    let a = Coord::new(1.0, -2.0, 0.5);
    assert_eq!(a * 2.0, Coord::new(2.0, -4.0, 1.0));
    assert_eq!(a.scale(0.0), Coord::ZERO);
}

#[test]
fn directional_constructors() {
    assert_eq!(Coord::up(3.0), Coord::new(0.0, 3.0, 0.0));
    assert_eq!(Coord::down(), Coord::new(0.0, -1.0, 0.0));
    assert_eq!(Coord::down_by(2.5), Coord::new(0.0, -2.5, 0.0));
    assert_eq!(Coord::left(), Coord::new(-1.0, 0.0, 0.0));
    assert_eq!(Coord::right(), Coord::new(1.0, 0.0, 0.0));
    assert_eq!(Coord::right() * 4.0 + Coord::left() * 4.0, Coord::ZERO);
}

#[test]
fn clamp_limits_to_range() {
    assert_eq!(Coord::clamp(-20.0, -14.0, 14.0), -14.0);
    assert_eq!(Coord::clamp(20.0, -14.0, 14.0), 14.0);
    assert_eq!(Coord::clamp(3.5, -14.0, 14.0), 3.5);
    assert_eq!(Coord::clamp(14.0, -14.0, 14.0), 14.0);
}

#[test]
fn coord_is_a_value() {
    let original = Coord::new(0.0, -13.5, 0.0);
    let mut copy = original;
    copy.x = 9.0;
    assert_eq!(original.x, 0.0);
    assert_ne!(original, copy);
}
