use account_profiler::posts::AccountDump;
use account_profiler::subreddits::SubredditTable;
use account_profiler::{ProfileConfig, ProfileError, profile};
use chrono::NaiveDate;

fn fixture() -> AccountDump {
    let bytes = include_bytes!("fixtures/account.json");
    AccountDump::from_slice(bytes).expect("Failed to parse dump")
}

fn config() -> ProfileConfig {
    ProfileConfig::default().with_today(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
}

#[test]
fn test_full_pipeline() {
    let dump = fixture();
    let table = SubredditTable::embedded().unwrap();

    let report = profile(&dump, &table, &config()).expect("Failed to build profile");

    assert_eq!(report.username, "switch_fan");
    assert_eq!(report.summary.comments.count, 3);
    assert_eq!(report.summary.submissions.count, 2);
    assert_eq!(report.summary.comments.gilded, 1);
    assert_eq!(report.summary.comments.computed_karma, 11);
    assert_eq!(report.summary.submissions.computed_karma, 40);
    assert_eq!(report.summary.first_post_date, 1704110400);

    assert_eq!(report.metadata.latest_comment_id.as_deref(), Some("c3"));
    assert_eq!(report.metadata.earliest_comment_id.as_deref(), Some("c1"));
    assert_eq!(report.metadata.latest_submission_id.as_deref(), Some("s2"));
    assert_eq!(report.metadata.earliest_submission_id.as_deref(), Some("s1"));

    // 2023-01 through 2024-06
    assert_eq!(report.metrics.date.len(), 18);
    assert_eq!(report.metrics.date[0].date, "2023-01-01");
    assert_eq!(report.metrics.hour.len(), 24);
    assert_eq!(report.metrics.weekday[3].weekday, "Thu");
    assert_eq!(report.metrics.weekday[3].activity.comments, 1);

    // c1 is the only post outside the trailing window
    assert_eq!(report.metrics.recent_posts.iter().sum::<u64>(), 4);
    assert_eq!(report.metrics.recent_activity_heatmap.len(), 1464);

    let lurk = report.summary.lurk_period;
    assert!(lurk.from < lurk.to);
}

#[test]
fn test_synopsis_from_fixture() {
    let dump = fixture();
    let table = SubredditTable::embedded().unwrap();

    let report = profile(&dump, &table, &config()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    let synopsis = &json["synopsis"];

    let possessions = &synopsis["possessions"]["data"][0];
    assert_eq!(possessions["value"], "switch");
    assert_eq!(possessions["count"], 2);
    assert_eq!(possessions["sources"][0], "/r/gaming/comments/s1/_/c3");

    assert_eq!(synopsis["relationship_partner"]["data"][0]["value"], "wife");
    assert_eq!(synopsis["places_lived"]["data"][0]["value"], "portland");

    // the wife implies a male author
    assert_eq!(synopsis["gender"]["data_derived"][0]["value"], "male");
    assert!(synopsis["gender"].get("data").is_none());

    // text from r/Jokes is not taken at face value
    assert!(synopsis.get("attributes").is_none());
}

#[test]
fn test_report_json_shape() {
    let dump = fixture();
    let table = SubredditTable::embedded().unwrap();

    let report = profile(&dump, &table, &config()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["version"], 8);
    assert_eq!(
        json["summary"]["comments"]["best"]["text"],
        "I love my Switch. The new Zelda is great!"
    );
    assert_eq!(json["summary"]["submissions"]["best"]["title"], "My setup");
    assert_eq!(json["summary"]["submissions"]["worst"]["title"], "Finally!");

    let types = &json["summary"]["submissions"]["type_domain_breakdown"];
    assert_eq!(types["name"], "All");
    assert_eq!(types["children"][0]["name"], "Self");
    assert_eq!(types["children"][0]["children"][0]["name"], "gaming");
    assert_eq!(types["children"][1]["children"][0]["name"], "i.imgur.com");

    assert_eq!(json["metrics"]["subreddit"]["name"], "All");
    assert_eq!(json["metrics"]["date"][0]["posts"], 0);
    assert!(json["anti_sociality"]["percentage_insults"].is_number());
}

#[test]
fn test_profile_is_deterministic() {
    let dump = fixture();
    let table = SubredditTable::embedded().unwrap();
    let config = config();

    let first = serde_json::to_string(&profile(&dump, &table, &config).unwrap()).unwrap();
    let second = serde_json::to_string(&profile(&dump, &table, &config).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_account_has_no_data() {
    let mut dump = fixture();
    dump.comments.clear();
    dump.submissions.clear();
    let table = SubredditTable::embedded().unwrap();

    let result = profile(&dump, &table, &config());

    assert!(matches!(result, Err(ProfileError::NoData)));
}
