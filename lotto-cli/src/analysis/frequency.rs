use lotto_db::models::{Draw, FrequencyEntry};

/// The newest `recent_count` draws, or the whole history when the count is
/// absent, zero, or larger than the history.
pub fn window(history: &[Draw], recent_count: Option<usize>) -> &[Draw] {
    match recent_count {
        Some(n) if n > 0 && n < history.len() => &history[..n],
        _ => history,
    }
}

/// Most frequent main numbers over the window, highest count first.
///
/// Equal counts keep the order in which numbers were first met while scanning
/// newest to oldest. The bonus number is never counted.
pub fn analyze(history: &[Draw], top_n: usize, recent_count: Option<usize>) -> Vec<FrequencyEntry> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut counts = [0u32; 256];
    let mut first_seen: Vec<u8> = Vec::new();

    for draw in window(history, recent_count) {
        for &n in &draw.numbers {
            let slot = &mut counts[usize::from(n)];
            if *slot == 0 {
                first_seen.push(n);
            }
            *slot += 1;
        }
    }

    let mut entries: Vec<FrequencyEntry> = first_seen
        .into_iter()
        .map(|number| FrequencyEntry {
            number,
            count: counts[usize::from(number)],
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);
    entries
}
