//! 时间展示格式化
//!
//! 票据时间戳在卡片上的短格式渲染；解析由 chrono 的 serde 支持完成。

use chrono::{DateTime, Utc};

/// 渲染为 "02 Jan 14:30" 的短格式；缺失时显示 "N/A"
pub fn format_short_datetime(dt: Option<DateTime<Utc>>) -> String {
    match dt {
        Some(dt) => dt.format("%d %b %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_known_timestamp() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 2, 14, 30, 0).unwrap();
        assert_eq!(format_short_datetime(Some(dt)), "02 Jan 14:30");
    }

    #[test]
    fn missing_timestamp_renders_placeholder() {
        assert_eq!(format_short_datetime(None), "N/A");
    }
}
