use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use lotto_db::models::{Draw, FrequencyEntry, LineResult, Rank};
use lotto_db::store::ImportResult;

fn join_numbers<T: std::fmt::Display>(numbers: &[T]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("표시할 회차가 없습니다.");
        return;
    }

    let mut table = new_table(vec!["회차", "추첨일", "당첨 번호", "보너스"]);
    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort();
        table.add_row(vec![
            draw.round.to_string(),
            draw.date.clone(),
            join_numbers(&sorted),
            format!("{:2}", draw.bonus),
        ]);
    }
    println!("{table}");
}

pub fn display_frequencies(title: &str, entries: &[FrequencyEntry], window: usize) {
    println!("\n── {} ({}회 분석) ──", title, window);
    if entries.is_empty() {
        println!("데이터가 없습니다.");
        return;
    }

    let mut table = new_table(vec!["순위", "번호", "출현 횟수"]);
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            format!("{:2}", entry.number),
            entry.count.to_string(),
        ]);
    }
    println!("{table}");
}

fn rank_color(rank: Rank) -> Color {
    match rank {
        Rank::First | Rank::Second => Color::Green,
        Rank::Third => Color::Yellow,
        Rank::Fourth | Rank::Fifth => Color::White,
    }
}

pub fn display_results(results: &[LineResult]) {
    if results.is_empty() {
        println!("3개 이상 일치한 회차가 없습니다.");
        return;
    }

    for result in results {
        println!(
            "\n── {}번째 줄: {} ──",
            result.line,
            join_numbers(&result.numbers)
        );

        let mut table = new_table(vec!["회차", "추첨일", "일치 번호", "보너스", "개수", "등수"]);
        for m in &result.matches {
            let bonus = if m.bonus_matched {
                format!("+ 보너스({})", m.bonus)
            } else {
                String::new()
            };
            table.add_row(vec![
                Cell::new(m.round),
                Cell::new(&m.date),
                Cell::new(join_numbers(&m.matched)),
                Cell::new(bonus),
                Cell::new(m.matched_count),
                Cell::new(m.rank.to_string()).fg(rank_color(m.rank)),
            ]);
        }
        println!("{table}");
    }
}

pub fn display_import_summary(result: &ImportResult) {
    println!("가져오기 완료 :");
    println!("  읽은 레코드     : {}", result.total_records);
    println!("  추가된 회차     : {}", result.inserted);
    println!("  중복 (무시)     : {}", result.skipped);
    if result.errors > 0 {
        println!("  오류            : {}", result.errors);
    }
    println!("  마지막 회차     : {}", result.last_round);
}
