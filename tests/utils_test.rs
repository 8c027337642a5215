use chrono::{Local, TimeZone};
use music_export::utils::*;

#[test]
fn test_clean_title_removes_brackets_and_parens() {
    assert_eq!(clean_title("Song [Remix] (feat. X)"), "Song");
    assert_eq!(clean_title("Song (Live) [2011 Remaster]"), "Song");
    assert_eq!(clean_title("Intro [Explicit] Outro"), "Intro Outro");
    assert_eq!(clean_title("A (b) C (d) E"), "A C E");
}

#[test]
fn test_clean_title_collapses_whitespace() {
    assert_eq!(clean_title("  Hello    World  "), "Hello World");
    assert_eq!(clean_title("Tab\tSeparated\n Title"), "Tab Separated Title");
}

#[test]
fn test_clean_title_keeps_plain_titles() {
    assert_eq!(clean_title("Bohemian Rhapsody"), "Bohemian Rhapsody");
    assert_eq!(clean_title("Mötley Crüe – Kickstart"), "Mötley Crüe – Kickstart");
}

#[test]
fn test_clean_title_empty_and_missing() {
    assert_eq!(clean_title(""), "");
    assert_eq!(clean_optional_title(None), None);
    assert_eq!(
        clean_optional_title(Some("Track (Demo)")),
        Some("Track".to_string())
    );
}

#[test]
fn test_clean_title_matches_shortest_span() {
    // the first `]` closes the span, the rest stays
    assert_eq!(clean_title("A [b] c] d"), "A c] d");
    // nested parens are not balanced, one pass only
    assert_eq!(clean_title("Song ((x))"), "Song )");
    // unmatched openers are kept
    assert_eq!(clean_title("Song (unfinished"), "Song (unfinished");
    // only annotations leaves nothing
    assert_eq!(clean_title("[Intro] (Skit)"), "");
}

#[test]
fn test_clean_title_is_idempotent() {
    let samples = [
        "Song [Remix] (feat. X)",
        "Song ((x))",
        "[a (b] c)",
        "(a [b) c]",
        "Multi\n[line\n] title",
        "x ( [ ] ) y",
        "   ",
        "Already Clean",
        "Song (Live",
        "] ) [ (",
        "Ünïcødé [Déluxe]   (Edición)",
    ];

    for sample in samples {
        let once = clean_title(sample);
        assert_eq!(clean_title(&once), once, "not idempotent for {:?}", sample);
    }
}

#[test]
fn test_year_from_release_date() {
    assert_eq!(year_from_release_date(Some("2019-05-01")), "2019");
    assert_eq!(year_from_release_date(Some("1999")), "1999");
    assert_eq!(year_from_release_date(Some("")), "");
    assert_eq!(year_from_release_date(None), "");
}

#[test]
fn test_duration_seconds() {
    assert_eq!(duration_seconds(Some(245000)), 245);
    assert_eq!(duration_seconds(Some(245999)), 245);
    assert_eq!(duration_seconds(Some(999)), 0);
    assert_eq!(duration_seconds(None), 0);
}

#[test]
fn test_resolve_next_url() {
    let base = "https://amp-api.music.apple.com";

    assert_eq!(
        resolve_next_url(base, "/v1/me/library/songs?offset=100").as_deref(),
        Some("https://amp-api.music.apple.com/v1/me/library/songs?offset=100")
    );
    assert_eq!(
        resolve_next_url(base, "https://other.example.com/v1/page?offset=200").as_deref(),
        Some("https://other.example.com/v1/page?offset=200")
    );
    assert_eq!(resolve_next_url("not a url", "/v1/page"), None);
}

#[test]
fn test_timestamps() {
    let now = Local.with_ymd_and_hms(2024, 1, 31, 23, 59, 58).unwrap();

    assert_eq!(export_timestamp(&now), "20240131_235958");
    assert_eq!(iso_timestamp(&now), "2024-01-31T23:59:58.000000");
}
