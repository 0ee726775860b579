use std::time::Duration;

const NANOS_PER_MINUTE: u64 = 60_000_000_000;

/// Time each word stays on screen. `None` means the reader never advances on its own.
pub fn wpm_to_period(wpm: i64) -> Option<Duration> {
    match wpm {
        positive if positive > 0 => Some(Duration::from_nanos(NANOS_PER_MINUTE / positive as u64)),
        _ => None,
    }
}

/// Percentage through the text: 0 on the first word, 100 on the last.
pub fn calc_progress(current_index: usize, total_words: usize) -> f64 {
    if total_words <= 1 {
        return 100.0;
    }
    current_index as f64 / (total_words - 1) as f64 * 100.0
}

/// Clamp a possibly out-of-range index into `0..total_words`.
pub fn clamp_index(index: i64, total_words: usize) -> usize {
    let last = total_words.saturating_sub(1) as i64;
    index.clamp(0, last) as usize
}

/// Map a position along a progress track (0..=1) to a word index.
pub fn fraction_to_index(fraction: f64, total_words: usize) -> usize {
    if !fraction.is_finite() {
        return 0;
    }
    // float to int casts saturate
    clamp_index((fraction * total_words as f64).floor() as i64, total_words)
}

/// 1-based "position / total" counter
pub fn counter_text(current_index: usize, total_words: usize) -> String {
    format!("{} / {}", current_index + 1, total_words)
}
