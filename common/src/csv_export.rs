//! お気に入りのCSV出力
//!
//! 全フィールドをダブルクォートで囲み、埋め込みのクォートは二重化する（RFC 4180）。

use crate::error::Result;
use crate::favorites::Favorites;
use crate::types::Opportunity;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const FAVORITES_FILE_NAME: &str = "favorites.csv";
pub const CSV_HEADER: &str = "Name,Organization,Location,Tags";
pub const NOTHING_TO_EXPORT_MESSAGE: &str = "No favorites to export!";

/// 生成したCSVファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    pub file_name: String,
    pub content: String,
    pub row_count: usize,
}

/// 表示中（絞り込み済み）のレコードのうち、お気に入りだけを出力
///
/// 対象が0件の場合は None（ファイルを作らない）。
pub fn export_favorites(visible: &[&Opportunity], favorites: &Favorites) -> Result<Option<CsvFile>> {
    let rows: Vec<&Opportunity> = visible
        .iter()
        .copied()
        .filter(|opp| favorites.contains(&opp.id))
        .collect();

    if rows.is_empty() {
        return Ok(None);
    }

    let content = to_csv(&rows)?;
    Ok(Some(CsvFile {
        file_name: FAVORITES_FILE_NAME.to_string(),
        content,
        row_count: rows.len(),
    }))
}

/// ヘッダー + 1レコード1行
pub fn to_csv(rows: &[&Opportunity]) -> Result<String> {
    let mut buffer = format!("{}\n", CSV_HEADER).into_bytes();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buffer);

        for opp in rows {
            let tags = opp.tags.join(", ");
            writer.write_record([
                opp.name.as_str(),
                opp.organization.as_str(),
                opp.location.as_str(),
                tags.as_str(),
            ])?;
        }
        writer.flush()?;
    }

    // 入力はすべてUTF-8の文字列
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::ReaderBuilder;

    fn opp(id: &str, name: &str) -> Opportunity {
        Opportunity {
            id: id.to_string(),
            name: name.to_string(),
            organization: "Org".to_string(),
            location: "Detroit, MI".to_string(),
            tags: vec!["Tech".to_string(), "STEM".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_export_nothing_selected() {
        let records = vec![opp("1", "A")];
        let visible: Vec<&Opportunity> = records.iter().collect();
        let result = export_favorites(&visible, &Favorites::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_export_only_visible_favorites() {
        let records = vec![opp("1", "A"), opp("2", "B"), opp("3", "C")];
        // 3 はお気に入りだが絞り込みで非表示
        let visible: Vec<&Opportunity> = records.iter().take(2).collect();
        let favorites: Favorites = ["2", "3"].into_iter().collect();

        let file = export_favorites(&visible, &favorites).unwrap().expect("CSVが生成されない");
        assert_eq!(file.file_name, "favorites.csv");
        assert_eq!(file.row_count, 1);

        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Name,Organization,Location,Tags");
        assert_eq!(lines[1], r#""B","Org","Detroit, MI","Tech, STEM""#);
    }

    #[test]
    fn test_export_n_plus_one_lines() {
        let records: Vec<Opportunity> = (0..5).map(|i| opp(&i.to_string(), "X")).collect();
        let visible: Vec<&Opportunity> = records.iter().collect();
        let favorites: Favorites = (0..5).map(|i| i.to_string()).collect();

        let file = export_favorites(&visible, &favorites).unwrap().unwrap();
        assert_eq!(file.content.lines().count(), 6);
    }

    #[test]
    fn test_embedded_quotes_and_newlines_roundtrip() {
        let tricky = Opportunity {
            id: "t".into(),
            name: "The \"Best\" Camp".into(),
            organization: "Smith, Jones & Co".into(),
            location: "Line one\nLine two".into(),
            tags: vec!["Law/Legal".into(), "Business".into()],
            ..Default::default()
        };
        let csv = to_csv(&[&tricky]).unwrap();
        assert!(csv.contains(r#""The ""Best"" Camp""#));

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Name", "Organization", "Location", "Tags"]);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "The \"Best\" Camp");
        assert_eq!(&records[0][1], "Smith, Jones & Co");
        assert_eq!(&records[0][2], "Line one\nLine two");
        assert_eq!(&records[0][3], "Law/Legal, Business");
    }

    #[test]
    fn test_empty_fields_are_quoted() {
        let blank = Opportunity { id: "b".into(), ..Default::default() };
        let csv = to_csv(&[&blank]).unwrap();
        assert_eq!(csv, "Name,Organization,Location,Tags\n\"\",\"\",\"\",\"\"\n");
    }
}
