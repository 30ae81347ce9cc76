//! Spectrum sampler
//!
//! Reduces a raw frequency capture (interleaved signed re/im bytes) to one
//! normalized magnitude per display bar. Pure and stateless; the animation
//! smoothing lives in the engine.

/// Per-bar magnitudes in `[0, 1]` for the first `bar_count` frequency bins.
///
/// The capture holds interleaved `(re, im)` pairs. An odd-length capture is
/// malformed and yields silence rather than a skewed frame. Bins beyond the
/// capture are zero.
pub fn sample(capture: &[i8], bar_count: usize) -> Vec<f32> {
    let mut magnitudes = vec![0.0f32; bar_count];
    if capture.len() % 2 != 0 {
        return magnitudes;
    }

    let bins = capture.len() / 2;
    for (i, magnitude) in magnitudes.iter_mut().enumerate().take(bins) {
        let re = capture[i * 2] as f32;
        let im = capture[i * 2 + 1] as f32;
        // i8 components bound the raw magnitude by 128*sqrt(2), so the
        // normalized value can slightly exceed 1 before the clamp.
        let raw = (re * re + im * im).sqrt() / 128.0;
        *magnitude = (raw * 9.0 + 1.0).log10().min(1.0);
    }
    magnitudes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_length_capture_yields_silence() {
        let out = sample(&[10, 20, 30], 4);
        assert_eq!(out, vec![0.0; 4]);
    }

    #[test]
    fn zero_capture_yields_zero_bars() {
        let out = sample(&[0; 16], 8);
        assert_eq!(out, vec![0.0; 8]);
    }

    #[test]
    fn bins_beyond_capture_are_zero() {
        let out = sample(&[127, 0], 4);
        assert!(out[0] > 0.0);
        assert_eq!(&out[1..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn magnitudes_stay_in_unit_range() {
        // (-128, -128) maximizes sqrt(re^2+im^2)/128 at sqrt(2) > 1
        let out = sample(&[-128, -128], 1);
        assert_eq!(out[0], 1.0);

        for &(re, im) in &[(1i8, 1i8), (64, -64), (127, 127), (-1, 0)] {
            let out = sample(&[re, im], 1);
            assert!(out[0] >= 0.0 && out[0] <= 1.0, "out of range: {}", out[0]);
        }
    }

    #[test]
    fn log_compression_lifts_quiet_bins() {
        // Compression maps linear magnitude m to log10(9m+1), which is
        // above m everywhere in (0, 1).
        let quiet = sample(&[8, 0], 1)[0];
        let linear = 8.0f32 / 128.0;
        assert!(quiet > linear);

        // and stays monotone
        let louder = sample(&[32, 0], 1)[0];
        assert!(louder > quiet);
    }
}
