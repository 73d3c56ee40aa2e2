//! 一覧のテキスト表示

use opportunity_common::{Opportunity, UserLocation, ViewState};

const NAME_WIDTH: usize = 32;
const ORG_WIDTH: usize = 24;
const LOCATION_WIDTH: usize = 20;

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        format!("{:<width$}", text, width = width)
    } else {
        let clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", clipped)
    }
}

/// 1行分（お気に入り・名称・団体名・所在地・日付・距離・タグ・バッジ）
pub fn format_row(opp: &Opportunity, state: &ViewState) -> String {
    let heart = if state.favorites.contains(&opp.id) { "♥" } else { "·" };
    let mut line = format!(
        "{} {} {} {} {:<10}",
        heart,
        clip(&opp.name, NAME_WIDTH),
        clip(&opp.organization, ORG_WIDTH),
        clip(&opp.location, LOCATION_WIDTH),
        opp.date,
    );

    if state.user_location.is_some() {
        match state.distance_to(opp) {
            Some(miles) => line.push_str(&format!(" {:>7.1} mi", miles)),
            None => line.push_str(&format!(" {:>10}", "-")),
        }
    }

    if !opp.tags.is_empty() {
        line.push_str(&format!("  [{}]", opp.tags.join(", ")));
    }
    if opp.is_remote() {
        line.push_str("  (Remote)");
    }
    if opp.recurrence.is_recurring() {
        line.push_str("  (Recurring)");
    }
    line
}

pub fn format_header(state: &ViewState) -> String {
    let mut line = format!(
        "  {} {} {} {:<10}",
        clip("OPPORTUNITY NAME", NAME_WIDTH),
        clip("ORGANIZATION", ORG_WIDTH),
        clip("LOCATION", LOCATION_WIDTH),
        "DATE",
    );
    if state.user_location.is_some() {
        line.push_str(&format!(" {:>10}", "DISTANCE"));
    }
    line
}

/// `location set` の完了表示
///
/// 保存しただけではソートは変わらないので、距離順の指定方法も添える。
pub fn location_saved_message(location: &UserLocation) -> String {
    format!(
        "✔ 現在地を設定しました: {} ({:.4}, {:.4})\n  `list --sort distance` で近い順に表示できます",
        location.label, location.coords.lat, location.coords.lng
    )
}
