use crate::analysis::Candidate;
use crate::error::LineError;

/// Splits free text into picks, one per non-blank line.
///
/// Commas count as whitespace. Lines are numbered by their position in the
/// input, blank ones included. The first bad line rejects the whole input.
pub fn parse_lines(input: &str) -> Result<Vec<Candidate>, LineError> {
    let mut candidates = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        let normalized = raw.replace(',', " ");
        if normalized.trim().is_empty() {
            continue;
        }

        let mut numbers = Vec::new();
        for token in normalized.split_whitespace() {
            let n = token.parse::<u32>().map_err(|_| LineError::InvalidToken {
                line,
                token: token.to_string(),
            })?;
            numbers.push(n);
        }

        let candidate = Candidate::from_numbers(line, numbers);
        if !candidate.is_complete() {
            return Err(LineError::TooFewNumbers {
                line,
                found: candidate.numbers.len(),
            });
        }
        candidates.push(candidate);
    }

    Ok(candidates)
}

/// Turns command-line arguments into parser input.
///
/// When every argument is a single number (`lotto check 1 2 3 4 5 6`) they
/// form one pick; otherwise each argument is its own line.
pub fn join_args(args: &[String]) -> String {
    let one_pick = args
        .iter()
        .all(|a| !a.trim().is_empty() && a.trim().chars().all(|c| c.is_ascii_digit()));
    if one_pick {
        args.join(" ")
    } else {
        args.join("\n")
    }
}
