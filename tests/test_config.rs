use invaders_mvc::config::{FormationLayout, GameConfig, HitBox};
use invaders_mvc::coord::Coord;

#[test]
fn defaults_validate() {
    assert!(GameConfig::default().validate().is_ok());
}

#[test]
fn default_formation_is_three_by_five() {
    let layout = FormationLayout::default();
    let positions = layout.positions();
    assert_eq!(layout.size(), 15);
    assert_eq!(positions.len(), 15);
    // Row-major from the top-left anchor.
    assert_eq!(positions[0], Coord::new(-8.0, 14.0, 0.0));
    assert_eq!(positions[1], Coord::new(-4.0, 14.0, 0.0));
    assert_eq!(positions[5], Coord::new(-8.0, 12.0, 0.0));
    assert!(positions.iter().all(|p| p.z == 0.0));
}

#[test]
fn inverted_bounds_are_rejected() {
    let config = GameConfig {
        max_left: 3.0,
        max_right: -3.0,
        ..GameConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("max_left"));
}

#[test]
fn negative_or_nan_speed_is_rejected() {
    let negative = GameConfig {
        bullet_speed: -1.0,
        ..GameConfig::default()
    };
    assert!(negative.validate().is_err());

    let nan = GameConfig {
        enemy_speed: f32::NAN,
        ..GameConfig::default()
    };
    assert!(nan.validate().is_err());
}

#[test]
fn player_start_outside_bounds_is_rejected() {
    let config = GameConfig {
        player_start: Coord::new(20.0, -13.5, 0.0),
        ..GameConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn empty_formation_is_rejected() {
    let config = GameConfig {
        formation: FormationLayout {
            rows: 0,
            ..FormationLayout::default()
        },
        ..GameConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn zero_sized_hit_box_is_rejected() {
    let config = GameConfig {
        enemy_contact: HitBox::new(0.0, 2.0),
        ..GameConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn hit_box_uses_strict_inequality() {
    let hit = HitBox::new(1.0, 0.5);
    let origin = Coord::ZERO;
    assert!(hit.touches(origin, Coord::new(0.99, 0.49, 0.0)));
    assert!(!hit.touches(origin, Coord::new(1.0, 0.0, 0.0)));
    assert!(!hit.touches(origin, Coord::new(0.0, -0.5, 0.0)));
    // z plays no part.
    assert!(hit.touches(origin, Coord::new(0.0, 0.0, 100.0)));
}
