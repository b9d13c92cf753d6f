use std::cmp::Reverse;
use std::collections::BTreeSet;

use lotto_db::models::{Draw, LineResult, MatchResult, Rank, MIN_MATCH, PICK_COUNT};

use crate::error::LineError;

/// A user's pick, tagged with the input line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub line: usize,
    pub numbers: BTreeSet<u32>,
}

impl Candidate {
    pub fn from_numbers(line: usize, numbers: impl IntoIterator<Item = u32>) -> Self {
        Candidate {
            line,
            numbers: numbers.into_iter().collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.numbers.len() >= PICK_COUNT
    }
}

/// Compares one pick with one draw. `None` below three matches.
pub fn match_draw(candidate: &Candidate, draw: &Draw) -> Option<MatchResult> {
    let mut matched: Vec<u8> = draw
        .numbers
        .iter()
        .copied()
        .filter(|&n| candidate.numbers.contains(&u32::from(n)))
        .collect();
    let matched_count = matched.len();
    if matched_count < MIN_MATCH {
        return None;
    }

    let bonus_matched = matched_count == 5 && candidate.numbers.contains(&u32::from(draw.bonus));
    let rank = Rank::from_match(matched_count, bonus_matched)?;
    matched.sort_unstable();

    Some(MatchResult {
        round: draw.round,
        date: draw.date.clone(),
        matched,
        matched_count,
        bonus_matched,
        bonus: draw.bonus,
        rank,
    })
}

/// Every winning match of a pick, best rank first, newest round first within a rank.
pub fn evaluate_line(history: &[Draw], candidate: &Candidate) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = history
        .iter()
        .filter_map(|draw| match_draw(candidate, draw))
        .collect();
    matches.sort_by_key(|m| (m.rank, Reverse(m.round)));
    matches
}

/// Checks every pick against the history.
///
/// Refuses the whole batch if any pick has fewer than six numbers. Picks
/// without a single winning match are left out; the rest keep input order and
/// their original line numbers.
pub fn evaluate(history: &[Draw], candidates: &[Candidate]) -> Result<Vec<LineResult>, LineError> {
    if let Some(short) = candidates.iter().find(|c| !c.is_complete()) {
        return Err(LineError::TooFewNumbers {
            line: short.line,
            found: short.numbers.len(),
        });
    }

    let results = candidates
        .iter()
        .filter_map(|candidate| {
            let matches = evaluate_line(history, candidate);
            if matches.is_empty() {
                return None;
            }
            Some(LineResult {
                line: candidate.line,
                numbers: candidate.numbers.iter().copied().collect(),
                matches,
            })
        })
        .collect();

    tracing::debug!(candidates = candidates.len(), draws = history.len(), "번호 비교 완료");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(round: u32, numbers: [u8; 6], bonus: u8) -> Draw {
        Draw {
            round,
            numbers,
            bonus,
            date: format!("round-{round}"),
        }
    }

    fn single_history() -> Vec<Draw> {
        vec![draw(10, [1, 2, 3, 4, 5, 6], 7)]
    }

    fn pick(line: usize, numbers: &[u32]) -> Candidate {
        Candidate::from_numbers(line, numbers.iter().copied())
    }

    #[test]
    fn test_all_six_is_first_prize() {
        let results = evaluate(&single_history(), &[pick(1, &[1, 2, 3, 4, 5, 6])]).unwrap();
        assert_eq!(results.len(), 1);
        let m = &results[0].matches[0];
        assert_eq!(results[0].matches.len(), 1);
        assert_eq!(m.round, 10);
        assert_eq!(m.matched_count, 6);
        assert!(!m.bonus_matched);
        assert_eq!(m.rank, Rank::First);
    }

    #[test]
    fn test_five_plus_bonus_is_second_prize() {
        let results = evaluate(&single_history(), &[pick(1, &[1, 2, 3, 4, 5, 7])]).unwrap();
        let m = &results[0].matches[0];
        assert_eq!(m.matched_count, 5);
        assert!(m.bonus_matched);
        assert_eq!(m.rank, Rank::Second);
        assert_eq!(m.matched, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_five_without_bonus_is_third_prize() {
        let results = evaluate(&single_history(), &[pick(1, &[1, 2, 3, 4, 5, 8])]).unwrap();
        let m = &results[0].matches[0];
        assert_eq!(m.matched_count, 5);
        assert!(!m.bonus_matched);
        assert_eq!(m.rank, Rank::Third);
    }

    #[test]
    fn test_two_matches_are_dropped() {
        let results = evaluate(&single_history(), &[pick(1, &[1, 2, 9, 10, 11, 12])]).unwrap();
        assert!(results.is_empty());
        assert!(match_draw(&pick(1, &[1, 2, 9, 10, 11, 12]), &single_history()[0]).is_none());
    }

    #[test]
    fn test_bonus_ignored_outside_five() {
        let history = single_history();
        // 6 matches plus the bonus in a 7-number pick
        let m = match_draw(&pick(1, &[1, 2, 3, 4, 5, 6, 7]), &history[0]).unwrap();
        assert_eq!(m.rank, Rank::First);
        assert!(!m.bonus_matched);

        let m = match_draw(&pick(1, &[1, 2, 3, 4, 7, 20]), &history[0]).unwrap();
        assert_eq!(m.matched_count, 4);
        assert!(!m.bonus_matched);
        assert_eq!(m.rank, Rank::Fourth);

        let m = match_draw(&pick(1, &[1, 2, 3, 7, 20, 21]), &history[0]).unwrap();
        assert_eq!(m.matched_count, 3);
        assert!(!m.bonus_matched);
        assert_eq!(m.rank, Rank::Fifth);
    }

    #[test]
    fn test_short_line_aborts_batch() {
        let candidates = [pick(1, &[1, 2, 3, 4, 5, 6]), pick(2, &[1, 2, 3, 4])];
        let err = evaluate(&single_history(), &candidates).unwrap_err();
        assert_eq!(err, LineError::TooFewNumbers { line: 2, found: 4 });
    }

    #[test]
    fn test_sorted_by_rank_then_newest_round() {
        let history = vec![
            draw(40, [1, 2, 3, 30, 31, 32], 33),
            draw(30, [1, 2, 3, 4, 30, 31], 33),
            draw(20, [1, 2, 3, 4, 5, 6], 7),
            draw(10, [1, 2, 3, 31, 32, 33], 34),
            draw(5, [1, 2, 3, 4, 32, 33], 34),
        ];
        let results = evaluate(&history, &[pick(1, &[1, 2, 3, 4, 5, 6])]).unwrap();
        let order: Vec<(u32, Rank)> = results[0].matches.iter().map(|m| (m.round, m.rank)).collect();
        assert_eq!(
            order,
            vec![
                (20, Rank::First),
                (30, Rank::Fourth),
                (5, Rank::Fourth),
                (40, Rank::Fifth),
                (10, Rank::Fifth),
            ]
        );
    }

    #[test]
    fn test_newest_round_first_whatever_history_order() {
        let history = vec![
            draw(5, [1, 2, 3, 30, 31, 32], 33),
            draw(30, [4, 5, 6, 40, 41, 42], 43),
            draw(12, [2, 4, 6, 20, 21, 22], 23),
        ];
        let matches = evaluate_line(&history, &pick(1, &[1, 2, 3, 4, 5, 6]));
        let rounds: Vec<u32> = matches.iter().map(|m| m.round).collect();
        assert_eq!(rounds, vec![30, 12, 5]);
        assert!(matches.iter().all(|m| m.rank == Rank::Fifth));
    }

    #[test]
    fn test_unmatched_lines_omitted_keep_numbering() {
        let candidates = [
            pick(1, &[40, 41, 42, 43, 44, 45]),
            pick(2, &[6, 5, 4, 3, 2, 1]),
            pick(3, &[10, 11, 12, 13, 14, 15]),
            pick(4, &[1, 2, 3, 20, 21, 22]),
        ];
        let results = evaluate(&single_history(), &candidates).unwrap();
        let lines: Vec<usize> = results.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 4]);
        assert_eq!(results[0].numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_out_of_range_numbers_tolerated() {
        let results = evaluate(&single_history(), &[pick(1, &[1, 2, 3, 100, 200, 0])]).unwrap();
        assert_eq!(results[0].matches[0].rank, Rank::Fifth);
        assert_eq!(results[0].numbers, vec![0, 1, 2, 3, 100, 200]);
    }

    #[test]
    fn test_matched_count_is_intersection_size() {
        let history = vec![
            draw(3, [1, 9, 17, 25, 33, 41], 2),
            draw(2, [2, 10, 18, 26, 34, 42], 3),
            draw(1, [3, 11, 19, 27, 35, 43], 4),
        ];
        let candidate = pick(1, &[1, 9, 17, 25, 10, 18, 26, 3, 11, 19]);
        for d in &history {
            let expected = d.numbers.iter().filter(|&&n| candidate.numbers.contains(&u32::from(n))).count();
            match match_draw(&candidate, d) {
                Some(m) => assert_eq!(m.matched_count, expected),
                None => assert!(expected < MIN_MATCH),
            }
        }
    }

    #[test]
    fn test_empty_history_and_repeatable() {
        assert!(evaluate(&[], &[pick(1, &[1, 2, 3, 4, 5, 6])]).unwrap().is_empty());

        let history = vec![draw(2, [1, 2, 3, 4, 5, 6], 7), draw(1, [1, 2, 3, 4, 8, 9], 5)];
        let candidates = [pick(1, &[1, 2, 3, 4, 5, 7]), pick(2, &[1, 2, 3, 8, 9, 10])];
        assert_eq!(
            evaluate(&history, &candidates).unwrap(),
            evaluate(&history, &candidates).unwrap()
        );
    }
}
