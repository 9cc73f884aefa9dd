//! JSON list-page state decoded into checked queries.

use tableview::{
    ConfigurationError, Density, FieldDef, FieldKind, NullOrder, Number, QueryRequest, Record,
    Schema, Timestamp, Value, ViewSettings,
};
use time::macros::date;

#[derive(Debug, Clone)]
struct Alert {
    id: u32,
    title: &'static str,
    severity: &'static str,
    acknowledged: bool,
    raised: Timestamp,
    score: Option<i64>,
}

impl Record for Alert {
    fn schema() -> &'static Schema {
        static SCHEMA: Schema = Schema::new(
            "Alert",
            &[
                FieldDef::new("title", FieldKind::Text),
                FieldDef::new("severity", FieldKind::Text),
                FieldDef::new("acknowledged", FieldKind::Bool),
                FieldDef::new("raised", FieldKind::Timestamp),
                FieldDef::new("score", FieldKind::Number),
            ],
        );
        &SCHEMA
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "title" => Value::Text(self.title),
            "severity" => Value::Text(self.severity),
            "acknowledged" => Value::Bool(self.acknowledged),
            "raised" => Value::Timestamp(self.raised),
            "score" => self.score.map_or(Value::None, |s| Value::Number(Number::I64(s))),
            _ => Value::None,
        }
    }
}

fn alerts() -> Vec<Alert> {
    let day = |d: time::Date| Timestamp::from(d);
    vec![
        Alert {
            id: 1,
            title: "Disk almost full",
            severity: "high",
            acknowledged: false,
            raised: day(date!(2025 - 05 - 01)),
            score: Some(80),
        },
        Alert {
            id: 2,
            title: "Certificate expiring",
            severity: "medium",
            acknowledged: true,
            raised: day(date!(2025 - 05 - 03)),
            score: None,
        },
        Alert {
            id: 3,
            title: "Disk latency",
            severity: "high",
            acknowledged: true,
            raised: day(date!(2025 - 05 - 02)),
            score: Some(65),
        },
        Alert {
            id: 4,
            title: "Backup skipped",
            severity: "low",
            acknowledged: false,
            raised: day(date!(2025 - 04 - 28)),
            score: Some(20),
        },
    ]
}

fn ids(page: &[&Alert]) -> Vec<u32> {
    page.iter().map(|alert| alert.id).collect()
}

#[test]
fn full_request_runs() {
    let request = QueryRequest::from_json(
        r#"{
            "search": "disk",
            "search_fields": ["title"],
            "filters": {"severity": "high", "acknowledged": "all"},
            "sort": {"field": "raised", "dir": "desc"},
            "page": {"size": 10, "index": 0}
        }"#,
    )
    .unwrap();

    let rows = alerts();
    let page = request.into_query::<Alert>().unwrap().run(&rows);
    assert_eq!(ids(&page.records), vec![3, 1]);
    assert_eq!(page.summary(), "Showing 1 to 2 of 2");
}

#[test]
fn filter_strings_parse_by_field_kind() {
    let rows = alerts();

    let request = QueryRequest::from_json(r#"{"filters": {"acknowledged": "no"}}"#).unwrap();
    let page = request.into_query::<Alert>().unwrap().run(&rows);
    assert_eq!(ids(&page.records), vec![1, 4]);

    let request = QueryRequest::from_json(r#"{"filters": {"score": "65"}}"#).unwrap();
    let page = request.into_query::<Alert>().unwrap().run(&rows);
    assert_eq!(ids(&page.records), vec![3]);

    let request = QueryRequest::from_json(r#"{"filters": {"raised": "2025-05-03"}}"#).unwrap();
    let page = request.into_query::<Alert>().unwrap().run(&rows);
    assert_eq!(ids(&page.records), vec![2]);
}

#[test]
fn bad_filter_strings_rejected() {
    let request = QueryRequest::from_json(r#"{"filters": {"acknowledged": "maybe"}}"#).unwrap();
    let err = request.into_query::<Alert>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "filter value 'maybe' is not a valid bool for field 'acknowledged'"
    );

    let request = QueryRequest::from_json(r#"{"filters": {"raised": "yesterday"}}"#).unwrap();
    assert!(matches!(
        request.into_query::<Alert>().unwrap_err(),
        ConfigurationError::InvalidFilterValue { .. }
    ));
}

#[test]
fn missing_page_size_uses_settings() {
    let rows = alerts();
    let settings = ViewSettings::from_yaml_str("default_page_size: 3\n").unwrap();
    let request = QueryRequest::from_json(r#"{"page": {"index": 1}}"#).unwrap();
    let page = request.into_query_with::<Alert>(settings).unwrap().run(&rows);
    assert_eq!(ids(&page.records), vec![4]);
    assert_eq!(page.total_matched, 4);
}

#[test]
fn settings_change_sentinel_and_null_order() {
    let rows = alerts();
    let settings = ViewSettings::from_yaml_str(
        "all_sentinel: any\nnull_order: first\ndensity: compact\n",
    )
    .unwrap();
    assert_eq!(settings.density, Density::Compact);
    assert_eq!(settings.null_order, NullOrder::First);

    let request = QueryRequest::from_json(
        r#"{"filters": {"severity": "any"}, "sort": {"field": "score"}}"#,
    )
    .unwrap();
    let page = request.into_query_with::<Alert>(settings).unwrap().run(&rows);
    assert_eq!(ids(&page.records), vec![2, 4, 3, 1]);

    let request = QueryRequest::from_json(r#"{"filters": {"severity": "all"}}"#).unwrap();
    let page = request.into_query::<Alert>().unwrap().run(&rows);
    assert_eq!(page.total_matched, 4);
}

#[test]
fn schema_mismatches_rejected() {
    let err = QueryRequest::from_json(r#"{"sort": {"field": "priority"}}"#)
        .unwrap()
        .into_query::<Alert>()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownField { .. }));

    let err = QueryRequest::from_json(r#"{"search": "x", "search_fields": ["score"]}"#)
        .unwrap()
        .into_query::<Alert>()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::NotSearchable { .. }));

    let err = QueryRequest::from_json(r#"{"search": "x"}"#)
        .unwrap()
        .into_query::<Alert>()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptySearchFields));

    let err = QueryRequest::from_json(r#"{"page": {"size": 0, "index": 0}}"#)
        .unwrap()
        .into_query::<Alert>()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidPage { .. }));
}

#[test]
fn page_size_cap_only_when_configured() {
    let rows = alerts();
    let request = r#"{"page": {"size": 500, "index": 0}}"#;

    let page = QueryRequest::from_json(request)
        .unwrap()
        .into_query::<Alert>()
        .unwrap()
        .run(&rows);
    assert_eq!(page.len(), 4);

    let capped = ViewSettings::from_yaml_str("max_page_size: 100\n").unwrap();
    let err = QueryRequest::from_json(request)
        .unwrap()
        .into_query_with::<Alert>(capped)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid page: page size 500 exceeds the maximum of 100"
    );
}

#[test]
fn view_page_serializes() {
    let rows = alerts();
    let request = QueryRequest::from_json(r#"{"page": {"size": 2, "index": 1}}"#).unwrap();
    let page = request.into_query::<Alert>().unwrap().run(&rows);

    let ids: Vec<u32> = page.iter().map(|alert| alert.id).collect();
    let json = serde_json::json!({
        "ids": ids,
        "total_matched": page.total_matched,
        "page": page.page,
    });
    assert_eq!(json["ids"], serde_json::json!([3, 4]));
    assert_eq!(json["page"]["first_row"], 3);
    assert_eq!(json["page"]["last_row"], 4);
}
