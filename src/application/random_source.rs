// Random source abstraction injected into every generator

/// A seeded pseudo-random source. Generators only ever advance it; they never
/// reseed or share it behind a global.
pub trait UniformSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in the half-open range `[low, high)`. Callers guarantee `low < high`.
    fn next_int(&mut self, low: i64, high: i64) -> i64;
}
