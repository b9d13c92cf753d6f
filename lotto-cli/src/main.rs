use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lotto_cli::analysis::frequency::window;
use lotto_cli::analysis::{analyze, evaluate};
use lotto_cli::display::{
    display_draws, display_frequencies, display_import_summary, display_results,
};
use lotto_cli::parse::{join_args, parse_lines};
use lotto_db::store::{history_path, import_csv, last_round, load_history, save_history};

#[derive(Parser)]
#[command(name = "lotto", about = "로또 6/45 당첨 이력 조회 및 번호 통계")]
struct Cli {
    /// 당첨 이력 CSV 경로 (기본: data/lotto_numbers.csv)
    #[arg(long, global = true, env = "LOTTO_HISTORY")]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 내 번호를 역대 당첨 번호와 비교
    Check {
        /// 번호 6개 (예: 1 2 3 4 5 6) 또는 따옴표로 묶은 조합 여러 개.
        /// 생략하면 표준 입력에서 한 줄에 한 조합씩 읽음
        lines: Vec<String>,
    },

    /// 가장 많이 나온 번호
    Stats {
        /// 표시할 번호 개수
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// 최근 N회 분석 (0 = 전체)
        #[arg(short, long, default_value = "20")]
        recent: usize,
    },

    /// 최근 회차 목록
    List {
        /// 표시할 회차 수
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// 새 회차 CSV를 이력에 병합
    Import {
        /// 새 회차가 담긴 CSV 파일
        #[arg(short, long)]
        file: PathBuf,
    },

    /// 저장된 마지막 회차 출력
    LastRound,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.history.unwrap_or_else(history_path);

    match cli.command {
        Command::Check { lines } => cmd_check(&path, lines),
        Command::Stats { top, recent } => cmd_stats(&path, top, recent),
        Command::List { last } => cmd_list(&path, last),
        Command::Import { file } => cmd_import(&path, &file),
        Command::LastRound => {
            let draws = load_history(&path)?;
            println!("{}", last_round(&draws));
            Ok(())
        }
    }
}

fn cmd_check(path: &Path, lines: Vec<String>) -> Result<()> {
    let input = if lines.is_empty() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("표준 입력을 읽을 수 없습니다")?;
        buf
    } else {
        join_args(&lines)
    };

    let candidates = parse_lines(&input).map_err(|e| {
        tracing::debug!(line = e.line(), "입력 거부");
        e
    })?;
    if candidates.is_empty() {
        println!("확인할 번호가 없습니다.");
        return Ok(());
    }

    let draws = load_history(path)?;
    if draws.is_empty() {
        println!("이력이 비어 있습니다. 먼저 실행하세요 : lotto import --file <CSV>");
        return Ok(());
    }

    let results = evaluate(&draws, &candidates)?;
    display_results(&results);
    Ok(())
}

fn cmd_stats(path: &Path, top: usize, recent: usize) -> Result<()> {
    let draws = load_history(path)?;
    if draws.is_empty() {
        println!("이력이 비어 있습니다. 먼저 실행하세요 : lotto import --file <CSV>");
        return Ok(());
    }

    display_frequencies("역대 최다 출현 번호", &analyze(&draws, top, None), draws.len());

    let recent = Some(recent);
    display_frequencies(
        "최근 최다 출현 번호",
        &analyze(&draws, top, recent),
        window(&draws, recent).len(),
    );
    Ok(())
}

fn cmd_list(path: &Path, last: usize) -> Result<()> {
    let draws = load_history(path)?;
    if draws.is_empty() {
        println!("이력이 비어 있습니다. 먼저 실행하세요 : lotto import --file <CSV>");
        return Ok(());
    }
    display_draws(&draws[..last.min(draws.len())]);
    Ok(())
}

fn cmd_import(path: &Path, file: &Path) -> Result<()> {
    let history = load_history(path)?;
    let (merged, result) = import_csv(history, file)?;
    if result.inserted > 0 {
        save_history(path, &merged)?;
    }
    display_import_summary(&result);
    Ok(())
}
