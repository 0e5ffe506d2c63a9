/// Integer hash (PCG output permutation).
pub fn hash_u32(x: u32) -> u32 {
    let state = x.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277_803_737);
    (word >> 22) ^ word
}

/// Hash `(seed, index)` to [0,1).
pub fn rand01(seed: u32, index: u32) -> f32 {
    let h = hash_u32(seed ^ hash_u32(index));
    // 24 bits fit exactly in the f32 mantissa
    (h >> 8) as f32 / (1u32 << 24) as f32
}

/// Hash `(seed, index)` to [min, max).
pub fn rand_range(seed: u32, index: u32, min: f32, max: f32) -> f32 {
    lerp(min, max, rand01(seed, index))
}

/// Unclamped linear interpolation; `t` outside [0,1] extrapolates.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sequential draws from a seed. Each call advances the index, so two
/// streams built from the same seed yield the same values in the same order.
#[derive(Clone, Debug)]
pub struct RandomStream {
    seed: u32,
    index: u32,
}

impl RandomStream {
    pub fn new(seed: u32) -> Self {
        Self { seed, index: 0 }
    }

    /// Next value in [0,1).
    pub fn next_f32(&mut self) -> f32 {
        let v = rand01(self.seed, self.index);
        self.index = self.index.wrapping_add(1);
        v
    }

    /// Next value in [min, max).
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        lerp(min, max, self.next_f32())
    }

    /// Derive an independent stream, e.g. one per logo.
    pub fn fork(&mut self) -> Self {
        let seed = hash_u32(self.seed.wrapping_add(hash_u32(self.index)));
        self.index = self.index.wrapping_add(1);
        Self::new(seed)
    }
}
