//! Rendering tests: storage and display output modes.

use crate::temporal::{DisplayStyle, TemporalNormalizer, TimePoint};
use chrono::FixedOffset;
use rstest::{fixture, rstest};

#[fixture]
fn normalizer() -> TemporalNormalizer {
    TemporalNormalizer::new(FixedOffset::west_opt(3 * 3600).expect("valid offset"))
}

fn parsed(normalizer: &TemporalNormalizer, raw: &str) -> TimePoint {
    normalizer
        .parse(Some(raw))
        .expect("input parses")
        .expect("input is a date")
}

#[rstest]
fn picker_and_legacy_inputs_share_storage_and_display(normalizer: TemporalNormalizer) {
    let legacy = parsed(&normalizer, "09/11/2025 14:30");
    let picker = parsed(&normalizer, "2025-11-09T14:30:00");

    assert_eq!(legacy, picker);
    assert_eq!(normalizer.storage_string(legacy), "2025-11-09 14:30:00");
    assert_eq!(
        normalizer.display_string(picker, DisplayStyle::DateTime),
        "09/11/2025 14:30"
    );
}

#[rstest]
#[case(DisplayStyle::Date, "09/11/2025")]
#[case(DisplayStyle::DateTime, "09/11/2025 14:30")]
#[case(DisplayStyle::Long, "domingo, 09 de novembro de 2025")]
fn display_styles_are_explicit_arguments(
    normalizer: TemporalNormalizer,
    #[case] style: DisplayStyle,
    #[case] expected: &str,
) {
    let instant = parsed(&normalizer, "2025-11-09T14:30:00");
    assert_eq!(normalizer.display_string(instant, style), expected);
}

#[rstest]
fn long_style_pads_single_digit_days(normalizer: TemporalNormalizer) {
    let instant = parsed(&normalizer, "2026-08-07");
    assert_eq!(
        normalizer.display_string(instant, DisplayStyle::Long),
        "sexta-feira, 07 de agosto de 2026"
    );
}

#[rstest]
fn display_is_rendered_in_the_application_zone(normalizer: TemporalNormalizer) {
    // Midnight UTC is still the previous evening at UTC-3.
    let instant = parsed(&normalizer, "2025-11-10T00:00:00Z");
    assert_eq!(
        normalizer.display_string(instant, DisplayStyle::DateTime),
        "09/11/2025 21:00"
    );
}

#[rstest]
#[case("2025-06-03", "2025-06-01", 2)]
#[case("2025-06-01", "2025-06-01", 0)]
#[case("2025-05-30", "2025-06-01", -2)]
fn days_until_counts_calendar_days(
    normalizer: TemporalNormalizer,
    #[case] target: &str,
    #[case] today: &str,
    #[case] expected: i64,
) {
    let target = parsed(&normalizer, target);
    let today = parsed(&normalizer, today);
    assert_eq!(normalizer.days_until(target, today), expected);
}

#[rstest]
fn days_until_compares_local_dates_not_raw_instants(normalizer: TemporalNormalizer) {
    // 23:00 today to 01:00 tomorrow is one calendar day even though only
    // two hours separate the instants.
    let now = parsed(&normalizer, "2025-06-01 23:00:00");
    let due = parsed(&normalizer, "2025-06-02 01:00:00");
    assert_eq!(normalizer.days_until(due, now), 1);
}

#[rstest]
fn time_points_serialize_as_rfc3339(normalizer: TemporalNormalizer) {
    let instant = parsed(&normalizer, "2025-11-09 14:30:00");
    let json = serde_json::to_string(&instant).expect("serializes");

    assert_eq!(json, "\"2025-11-09T14:30:00-03:00\"");
    let back: TimePoint = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, instant);
}
