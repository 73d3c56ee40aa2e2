//! 選択肢とタグの色

/// 業界（タグ）の選択肢
pub const INDUSTRY_OPTIONS: &[&str] = &[
    "Business",
    "Community",
    "Education",
    "Environment",
    "Health/Med",
    "Journalism",
    "Law/Legal",
    "Tech",
    "STEM",
];

/// 対象年齢の選択肢
pub const AGE_GROUP_OPTIONS: &[&str] = &[
    "Elementary School",
    "Middle School",
    "High School",
    "College",
    "18+",
    "All Ages",
];

/// 種類の選択肢
pub const OPPORTUNITY_TYPE_OPTIONS: &[&str] = &["Internship", "Workshop", "Event", "Volunteering"];

const DEFAULT_TAG_CLASS: &str = "bg-gray-200 text-gray-800";

/// タグ表示用のCSSクラス
pub fn tag_class(tag: &str) -> &'static str {
    match tag {
        "Health/Med" => "bg-red-200 text-red-800",
        "Journalism" => "bg-purple-200 text-purple-800",
        "Business" => "bg-blue-200 text-blue-800",
        "Law/Legal" => "bg-yellow-200 text-yellow-800",
        "Tech" => "bg-cyan-200 text-cyan-800",
        "Environment" => "bg-green-600 text-white",
        "Community" => "bg-orange-200 text-orange-800",
        "STEM" | "Education" => "bg-teal-200 text-teal-800",
        _ => DEFAULT_TAG_CLASS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_industry_has_color() {
        for tag in INDUSTRY_OPTIONS {
            assert_ne!(tag_class(tag), DEFAULT_TAG_CLASS, "tag={}", tag);
        }
    }

    #[test]
    fn test_unknown_tag_default_color() {
        assert_eq!(tag_class("Arts"), DEFAULT_TAG_CLASS);
        // 大文字小文字は区別する
        assert_eq!(tag_class("tech"), DEFAULT_TAG_CLASS);
    }
}
