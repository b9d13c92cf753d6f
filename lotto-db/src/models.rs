use anyhow::{bail, Result};

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 45;
pub const PICK_COUNT: usize = 6;
/// Fewest main-number matches that still earns a prize.
pub const MIN_MATCH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub round: u32,
    pub numbers: [u8; 6],
    pub bonus: u8,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl Rank {
    /// Prize tier for a match. The bonus only separates 2nd from 3rd place.
    pub fn from_match(matched_count: usize, bonus_matched: bool) -> Option<Rank> {
        match matched_count {
            6 => Some(Rank::First),
            5 if bonus_matched => Some(Rank::Second),
            5 => Some(Rank::Third),
            4 => Some(Rank::Fourth),
            3 => Some(Rank::Fifth),
            _ => None,
        }
    }

    pub fn tier(&self) -> u8 {
        match self {
            Rank::First => 1,
            Rank::Second => 2,
            Rank::Third => 3,
            Rank::Fourth => 4,
            Rank::Fifth => 5,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}등", self.tier())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub round: u32,
    pub date: String,
    pub matched: Vec<u8>,
    pub matched_count: usize,
    pub bonus_matched: bool,
    pub bonus: u8,
    pub rank: Rank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResult {
    /// 1-based position of the line in the user's input.
    pub line: usize,
    pub numbers: Vec<u32>,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub number: u8,
    pub count: u32,
}

pub fn validate_draw(draw: &Draw) -> Result<()> {
    if draw.round == 0 {
        bail!("회차 번호가 0입니다");
    }
    for &n in &draw.numbers {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            bail!("{}회: 번호 {} 범위 초과 (1-45)", draw.round, n);
        }
    }
    for i in 0..draw.numbers.len() {
        for j in (i + 1)..draw.numbers.len() {
            if draw.numbers[i] == draw.numbers[j] {
                bail!("{}회: 중복 번호 {}", draw.round, draw.numbers[i]);
            }
        }
    }
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&draw.bonus) {
        bail!("{}회: 보너스 번호 {} 범위 초과 (1-45)", draw.round, draw.bonus);
    }
    if draw.numbers.contains(&draw.bonus) {
        bail!("{}회: 보너스 번호 {}가 당첨 번호와 중복", draw.round, draw.bonus);
    }
    Ok(())
}
