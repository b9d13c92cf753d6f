use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::models::{validate_draw, Draw};

/// One CSV row: `round,n1,n2,n3,n4,n5,n6,bonus,dates`.
#[derive(Debug, Serialize, Deserialize)]
struct DrawRow {
    round: u32,
    n1: u8,
    n2: u8,
    n3: u8,
    n4: u8,
    n5: u8,
    n6: u8,
    bonus: u8,
    #[serde(rename = "dates", alias = "date", default)]
    date: String,
}

impl From<DrawRow> for Draw {
    fn from(row: DrawRow) -> Self {
        Draw {
            round: row.round,
            numbers: [row.n1, row.n2, row.n3, row.n4, row.n5, row.n6],
            bonus: row.bonus,
            date: row.date,
        }
    }
}

impl From<&Draw> for DrawRow {
    fn from(draw: &Draw) -> Self {
        DrawRow {
            round: draw.round,
            n1: draw.numbers[0],
            n2: draw.numbers[1],
            n3: draw.numbers[2],
            n4: draw.numbers[3],
            n5: draw.numbers[4],
            n6: draw.numbers[5],
            bonus: draw.bonus,
            date: draw.date.clone(),
        }
    }
}

pub fn history_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotto_numbers.csv");
    path
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("{:?} 파일을 열 수 없습니다", path))
}

/// Loads the full history, newest round first.
///
/// A malformed or invalid row aborts the load: persisted history is expected
/// to be clean, so a bad row means the file is damaged. A missing file is an
/// empty history.
pub fn load_history(path: &Path) -> Result<Vec<Draw>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "이력 파일 없음, 빈 이력으로 시작");
        return Ok(Vec::new());
    }

    let mut reader = open_reader(path)?;
    let mut draws = Vec::new();
    for (i, row) in reader.deserialize::<DrawRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let draw: Draw = row
            .with_context(|| format!("{:?} {}행: 레코드를 읽을 수 없습니다", path, line))?
            .into();
        validate_draw(&draw).with_context(|| format!("{:?} {}행", path, line))?;
        draws.push(draw);
    }

    sort_newest_first(&mut draws);
    if let Some(pair) = draws.windows(2).find(|w| w[0].round == w[1].round) {
        bail!("{:?}: {}회가 중복되어 있습니다", path, pair[0].round);
    }

    tracing::debug!(path = %path.display(), draws = draws.len(), "이력 로드 완료");
    Ok(draws)
}

/// Writes the history through a sibling temp file so a failed write leaves
/// the previous file untouched.
pub fn save_history(path: &Path, draws: &[Draw]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("{:?} 디렉터리를 만들 수 없습니다", parent))?;
        }
    }

    let tmp = path.with_extension("csv.tmp");
    let written = write_rows(&tmp, draws).and_then(|()| {
        std::fs::rename(&tmp, path)
            .with_context(|| format!("{:?} → {:?} 이동 실패", tmp, path))
    });
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    tracing::info!(path = %path.display(), draws = draws.len(), "이력 저장 완료");
    Ok(())
}

fn write_rows(path: &Path, draws: &[Draw]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("{:?} 파일을 쓸 수 없습니다", path))?;
    for draw in draws {
        writer.serialize(DrawRow::from(draw))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn last_round(draws: &[Draw]) -> u32 {
    draws.iter().map(|d| d.round).max().unwrap_or(0)
}

fn sort_newest_first(draws: &mut [Draw]) {
    draws.sort_by(|a, b| b.round.cmp(&a.round));
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub draws: Vec<Draw>,
    pub added: u32,
    pub skipped: u32,
}

/// Adds draws whose round is not known yet; the result stays newest first.
pub fn merge_draws(existing: Vec<Draw>, incoming: Vec<Draw>) -> MergeOutcome {
    let mut known: BTreeSet<u32> = existing.iter().map(|d| d.round).collect();
    let mut draws = existing;
    let mut added = 0;
    let mut skipped = 0;

    for draw in incoming {
        if known.insert(draw.round) {
            draws.push(draw);
            added += 1;
        } else {
            skipped += 1;
        }
    }

    sort_newest_first(&mut draws);
    MergeOutcome {
        draws,
        added,
        skipped,
    }
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
    pub last_round: u32,
}

/// Merges newly published draws from `path` into `history`.
///
/// Unlike [`load_history`], bad rows in the import file are logged and
/// counted rather than fatal; the caller decides whether to persist.
pub fn import_csv(history: Vec<Draw>, path: &Path) -> Result<(Vec<Draw>, ImportResult)> {
    let mut reader = open_reader(path)?;

    let mut total_records = 0;
    let mut errors = 0;
    let mut incoming = Vec::new();

    for row in reader.deserialize::<DrawRow>() {
        total_records += 1;
        match row {
            Ok(row) => {
                let draw: Draw = row.into();
                match validate_draw(&draw) {
                    Ok(()) => incoming.push(draw),
                    Err(e) => {
                        tracing::warn!(record = total_records, error = %e, "잘못된 회차 건너뜀");
                        errors += 1;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(record = total_records, error = %e, "읽을 수 없는 레코드 건너뜀");
                errors += 1;
            }
        }
    }

    let outcome = merge_draws(history, incoming);
    tracing::info!(added = outcome.added, skipped = outcome.skipped, errors, "가져오기 병합 완료");

    let result = ImportResult {
        total_records,
        inserted: outcome.added,
        skipped: outcome.skipped,
        errors,
        last_round: last_round(&outcome.draws),
    };
    Ok((outcome.draws, result))
}
