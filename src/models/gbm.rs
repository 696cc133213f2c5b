// src/models/gbm.rs

/// Geometric Brownian motion `dS = μ S dt + σ S dW`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    /// Exact log-normal step over `dt` with a standard normal draw.
    #[inline]
    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }

    /// Writes a path into `out`, one point per slot spaced `dt` apart,
    /// starting at `s0`.
    pub fn fill_path<'a, O, N>(&self, out: O, dt: f64, mut normals: N)
    where
        O: IntoIterator<Item = &'a mut f64>,
        N: FnMut() -> f64,
    {
        let mut current = self.s0;
        for (i, slot) in out.into_iter().enumerate() {
            if i > 0 {
                current = self.exact_step(current, dt, normals());
            }
            *slot = current;
        }
    }
}
