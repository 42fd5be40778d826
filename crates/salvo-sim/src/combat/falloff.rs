//! Damage falloff: a cheap piecewise-linear approximation of `e^-x`.

/// `e^-x` sampled at x = 0..7. Values are part of the simulation and
/// must not change, or clients will desync.
const FALLOFF: [f32; 8] = [
    1.0,
    0.367_879_5,
    0.135_335_3,
    0.049_787_07,
    0.018_315_64,
    0.006_737_947,
    0.002_478_752,
    0.000_911_882,
];

/// Damage multiplier for a distance normalised by the warhead's spread.
/// Interpolates linearly between samples and cuts off to 0 from x = 7.
pub fn damage_falloff(x: f32) -> f32 {
    let x = x.max(0.0);
    let u = x as usize;
    if u >= FALLOFF.len() - 1 {
        return 0.0;
    }
    let t = x - u as f32;
    FALLOFF[u] * (1.0 - t) + FALLOFF[u + 1] * t
}
