//! Smooth 1D noise for hazard drift
//!
//! Value noise over a random lattice, smoothstep-interpolated and summed over
//! a few octaves. Output stays in [0, 1]; nearby inputs give nearby outputs.

use rand::Rng;

const LATTICE_SIZE: usize = 256;
const OCTAVES: u32 = 4;
const FALLOFF: f32 = 0.5;

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Seeded noise table, built once per session
#[derive(Debug, Clone)]
pub struct Noise {
    lattice: Vec<f32>,
}

impl Noise {
    pub fn new(rng: &mut impl Rng) -> Self {
        let lattice = (0..LATTICE_SIZE).map(|_| rng.random::<f32>()).collect();
        Self { lattice }
    }

    #[inline]
    fn at(&self, i: i64) -> f32 {
        self.lattice[i.rem_euclid(LATTICE_SIZE as i64) as usize]
    }

    fn single(&self, x: f32) -> f32 {
        let x0 = x.floor();
        let t = smoothstep(x - x0);
        let i = x0 as i64;
        let a = self.at(i);
        let b = self.at(i + 1);
        a + (b - a) * t
    }

    /// Sample the noise at `x`, in [0, 1]
    pub fn sample(&self, x: f32) -> f32 {
        let mut sum = 0.0;
        let mut total = 0.0;
        let mut amp = 1.0;
        let mut freq = 1.0;
        for _ in 0..OCTAVES {
            sum += self.single(x * freq) * amp;
            total += amp;
            amp *= FALLOFF;
            freq *= 2.0;
        }
        (sum / total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_noise_in_unit_range() {
        let noise = Noise::new(&mut Pcg32::seed_from_u64(7));
        for i in 0..2000 {
            let v = noise.sample(i as f32 * 0.37 - 200.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_noise_is_smooth() {
        let noise = Noise::new(&mut Pcg32::seed_from_u64(7));
        let mut x = 10.0;
        let mut prev = noise.sample(x);
        for _ in 0..500 {
            x += 0.01;
            let v = noise.sample(x);
            assert!((v - prev).abs() < 0.1);
            prev = v;
        }
    }

    #[test]
    fn test_same_seed_same_noise() {
        let a = Noise::new(&mut Pcg32::seed_from_u64(3));
        let b = Noise::new(&mut Pcg32::seed_from_u64(3));
        assert_eq!(a.sample(12.34), b.sample(12.34));
    }
}
