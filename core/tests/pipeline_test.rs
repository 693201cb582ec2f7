use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrain_core::{
    ConfigError, GenerationConfig, HeightField, Point, PoissonSampler, SampleError, generate,
};

fn assert_separated(points: &[Point], min_distance: u32) {
    let min_sq = i64::from(min_distance) * i64::from(min_distance);
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            assert!(a.distance_squared_to(*b) >= min_sq, "{:?} / {:?}", a, b);
        }
    }
}

#[test]
fn test_default_world() {
    // seed 12345, 512×512, reference parameters
    let config = GenerationConfig::default();
    let world = generate(&config).expect("default config is valid");

    assert_eq!(world.heights.width(), 512);
    assert_eq!(world.heights.height(), 512);
    for &v in world.heights.as_slice() {
        assert!((0.0..=1.0).contains(&v));
    }

    let points = world.points.as_ref().expect("default world has land");
    assert!(!points.is_empty());
    assert_separated(points, config.min_distance);
    for p in points {
        let h = world.heights.get_point(*p).expect("point inside raster");
        assert!(f64::from(h) >= config.land_threshold);
    }
}

#[test]
fn test_generation_is_reproducible() {
    let config = GenerationConfig::default().with_size(200, 150).with_seed(2025);
    let a = generate(&config).unwrap();
    let b = generate(&config).unwrap();
    assert_eq!(a.heights.as_slice(), b.heights.as_slice());
    assert_eq!(a.points, b.points);
}

#[test]
fn test_seeds_differ() {
    let base = GenerationConfig::default().with_size(64, 64);
    let a = generate(&base.clone().with_seed(1)).unwrap();
    let b = generate(&base.with_seed(2)).unwrap();
    assert_ne!(a.heights, b.heights);
}

#[test]
fn test_flat_land_separation() {
    let field = HeightField::filled(512, 512, 1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let points = PoissonSampler::new(25, 0.5)
        .sample(&field, &mut rng)
        .expect("flat land always has a start point");
    assert!(points.len() > 100, "only {} points", points.len());
    assert_separated(&points, 25);
}

#[test]
fn test_submerged_world_keeps_height_field() {
    // Raise the threshold above anything the falloff leaves standing
    let config = GenerationConfig {
        land_threshold: 1.0,
        falloff_weight: 1.0,
        falloff_exponent: 0.0,
        ..GenerationConfig::default().with_size(64, 64)
    };
    let world = generate(&config).unwrap();
    assert_eq!(world.heights.len(), 64 * 64);
    assert!(matches!(
        world.points,
        Err(SampleError::ExhaustedSearch { .. })
    ));
    assert!(world.points().is_empty());
}

#[test]
fn test_all_ocean_field_errors() {
    let field = HeightField::filled(256, 256, 0.2);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let err = PoissonSampler::new(10, 0.5)
        .sample(&field, &mut rng)
        .unwrap_err();
    assert!(matches!(err, SampleError::ExhaustedSearch { .. }));
}

#[test]
fn test_invalid_config_produces_nothing() {
    let config = GenerationConfig {
        continent_octaves: 0,
        ..GenerationConfig::default()
    };
    assert_eq!(
        generate(&config),
        Err(ConfigError::ZeroOctaves {
            field: "continent_octaves"
        })
    );
}
