use crate::domain::model::{is_blank, scalar_text};
use chrono::Weekday;
use serde_json::Value;

/// 沒有任何營業時間時的輸出
pub const NOT_SPECIFIED: &str = "Neuvedené";

/// 固定由週一排到週日
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// API 的欄位鍵
fn day_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Pondelok",
        Weekday::Tue => "Utorok",
        Weekday::Wed => "Streda",
        Weekday::Thu => "Štvrtok",
        Weekday::Fri => "Piatok",
        Weekday::Sat => "Sobota",
        Weekday::Sun => "Nedeľa",
    }
}

/// 空字串、0、null、false 都算「沒有營業時間」
fn hours_text(value: &Value) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        scalar_text(value)
    }
}

/// 把每週營業時間合併成一行文字，例如 `Pondelok: 9-18; Utorok: 9-18`。
///
/// 非物件的輸入（null、陣列、字串）一律視為空，回傳 [`NOT_SPECIFIED`]。
pub fn normalize(hours: &Value) -> String {
    let Some(map) = hours.as_object() else {
        return NOT_SPECIFIED.to_string();
    };

    let entries: Vec<String> = WEEK
        .iter()
        .filter_map(|&day| {
            map.get(day_key(day))
                .and_then(hours_text)
                .map(|text| format!("{}: {}", day_label(day), text))
        })
        .collect();

    if entries.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        entries.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_day_is_skipped() {
        let hours = json!({"monday": "9-18", "wednesday": ""});
        assert_eq!(normalize(&hours), "Pondelok: 9-18");
    }

    #[test]
    fn test_days_follow_week_order() {
        let hours = json!({
            "sunday": "zavřeno",
            "friday": "10-16",
            "monday": "9-18",
            "thursday": "9-20"
        });
        assert_eq!(
            normalize(&hours),
            "Pondelok: 9-18; Štvrtok: 9-20; Piatok: 10-16; Nedeľa: zavřeno"
        );
    }

    #[test]
    fn test_empty_inputs_give_sentinel() {
        assert_eq!(normalize(&json!({})), NOT_SPECIFIED);
        assert_eq!(normalize(&Value::Null), NOT_SPECIFIED);
        assert_eq!(normalize(&json!([])), NOT_SPECIFIED);

        let all_empty = json!({
            "monday": "", "tuesday": "", "wednesday": "", "thursday": "",
            "friday": "", "saturday": null, "sunday": ""
        });
        assert_eq!(normalize(&all_empty), NOT_SPECIFIED);
    }

    #[test]
    fn test_zero_and_non_scalar_values_are_empty() {
        let hours = json!({"monday": 0, "tuesday": false, "wednesday": ["9-18"], "friday": 8});
        assert_eq!(normalize(&hours), "Piatok: 8");

        let hours = json!({"monday": 0, "tuesday": true});
        assert_eq!(normalize(&hours), NOT_SPECIFIED);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let hours = json!({"holiday": "closed", "saturday": "10-14"});
        assert_eq!(normalize(&hours), "Sobota: 10-14");
    }

    #[test]
    fn test_full_week_has_seven_segments() {
        let hours = json!({
            "monday": "a", "tuesday": "b", "wednesday": "c", "thursday": "d",
            "friday": "e", "saturday": "f", "sunday": "g"
        });
        let result = normalize(&hours);
        assert_eq!(result.split("; ").count(), 7);
        assert_eq!(result, normalize(&hours));
    }
}
