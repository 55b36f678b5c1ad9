//! Conversions between centisecond offsets, sample indices, and
//! display timestamps.
//!
//! Internal time offsets are counted in centiseconds (1/100 s) since the
//! start of the audio. These helpers are pure functions; they carry no
//! state and never fail.

/// Format a centisecond offset as `HH:MM:SS.mmm`, or `HH:MM:SS,mmm`
/// when `comma` is set (SRT subtitle convention).
///
/// The hours field is always present, so `to_timestamp(500, false)` is
/// `"00:00:05.000"`.
pub fn to_timestamp(t: i64, comma: bool) -> String {
    let mut msec = t * 10;
    let hr = msec / (1000 * 60 * 60);
    msec -= hr * (1000 * 60 * 60);
    let min = msec / (1000 * 60);
    msec -= min * (1000 * 60);
    let sec = msec / 1000;
    msec -= sec * 1000;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hr,
        min,
        sec,
        if comma { "," } else { "." },
        msec
    )
}

/// Map a centisecond offset to a sample index in a buffer of `n_samples`
/// samples at `sample_rate` Hz.
///
/// The result is clamped to the valid index range; an empty buffer maps
/// every offset to 0.
pub fn timestamp_to_sample(t: i64, n_samples: usize, sample_rate: u32) -> usize {
    let sample = t * sample_rate as i64 / 100;
    sample.clamp(0, (n_samples as i64 - 1).max(0)) as usize
}

/// Duration of `n_samples` samples at `sample_rate` Hz, in centiseconds
pub fn samples_to_centiseconds(n_samples: usize, sample_rate: u32) -> i64 {
    if sample_rate == 0 {
        return 0;
    }
    n_samples as i64 * 100 / sample_rate as i64
}
