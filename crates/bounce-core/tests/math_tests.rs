use bounce_core::math::*;

#[test]
fn test_rand01_range() {
    for seed in [0u32, 1, 42, u32::MAX] {
        for i in 0..1000 {
            let r = rand01(seed, i);
            assert!(r >= 0.0 && r < 1.0, "rand01({}, {}) = {} out of range", seed, i, r);
        }
    }
}

#[test]
fn test_rand01_deterministic() {
    for i in 0..100 {
        assert_eq!(rand01(7, i), rand01(7, i));
    }
}

#[test]
fn test_rand01_varies_with_seed_and_index() {
    let a: Vec<f32> = (0..32).map(|i| rand01(1, i)).collect();
    let b: Vec<f32> = (0..32).map(|i| rand01(2, i)).collect();
    assert_ne!(a, b, "different seeds should give different sequences");

    let distinct = a.iter().filter(|&&v| v != a[0]).count();
    assert!(distinct > 0, "sequence should not be constant");
}

#[test]
fn test_rand01_roughly_uniform() {
    let n = 10_000;
    let mean: f32 = (0..n).map(|i| rand01(99, i)).sum::<f32>() / n as f32;
    assert!((mean - 0.5).abs() < 0.02, "mean {} too far from 0.5", mean);
}

#[test]
fn test_rand_range_bounds() {
    for i in 0..500 {
        let v = rand_range(3, i, -0.8, 0.8);
        assert!(v >= -0.8 && v < 0.8, "rand_range out of bounds: {}", v);
    }
}

#[test]
fn test_lerp_basic() {
    assert!((lerp(0.0, 1.0, 0.0) - 0.0).abs() < 1e-6);
    assert!((lerp(0.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
    assert!((lerp(2.0, 4.0, 0.25) - 2.5).abs() < 1e-6);
}

#[test]
fn test_lerp_extrapolates() {
    assert!((lerp(0.0, 10.0, 1.5) - 15.0).abs() < 1e-5);
    assert!((lerp(0.0, 10.0, -0.5) + 5.0).abs() < 1e-5);
}

#[test]
fn test_random_stream_matches_rand01() {
    let mut stream = RandomStream::new(5);
    for i in 0..10 {
        assert_eq!(stream.next_f32(), rand01(5, i));
    }
}

#[test]
fn test_random_stream_fork_is_reproducible() {
    let mut a = RandomStream::new(11);
    let mut b = RandomStream::new(11);
    let mut fa = a.fork();
    let mut fb = b.fork();
    for _ in 0..10 {
        assert_eq!(fa.next_f32(), fb.next_f32());
    }
    // Parent streams advanced in lockstep too.
    assert_eq!(a.next_f32(), b.next_f32());
}
