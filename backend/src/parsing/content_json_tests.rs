use super::*;
use serde_json::json;

fn sample_documents() -> Vec<Value> {
    vec![
        json!({
            "_id": "modern",
            "_type": "macroMovement",
            "title": "Modernism",
            "startYear": 1900,
            "endYear": "1975",
            "color": { "hex": "#ff6600" }
        }),
        json!({
            "_id": "bauhaus",
            "_type": "movement",
            "name": "Bauhaus",
            "start": 1919,
            "end": 1933,
            "macro": { "_ref": "modern" },
            "description": [
                { "_type": "block", "children": [{ "text": "Art school " }, { "text": "in Weimar." }] },
                { "_type": "block", "children": [{ "text": "" }] }
            ],
            "mainImage": { "asset": { "url": "https://cdn.example/bauhaus.jpg" } }
        }),
        json!({
            "_id": "bauhaus-building",
            "_type": "work",
            "title": "Bauhaus Dessau",
            "year": "1926",
            "city": "Dessau",
            "country": "Germany",
            "movements": [{ "_ref": "bauhaus" }],
            "architects": ["gropius"]
        }),
        json!({
            "_id": "gropius",
            "_type": "architect",
            "name": "Walter Gropius",
            "birthYear": 1883,
            "deathYear": 1969,
            "movement": "bauhaus",
            "country": "Germany"
        }),
    ]
}

#[test]
fn test_normalize_sample_documents() {
    let out = normalize_documents(&sample_documents());
    let content = &out.content;

    assert_eq!(out.report.input_count, 4);
    assert!(out.report.skipped.is_empty());
    assert_eq!(
        out.report.accepted,
        ContentCounts {
            macros: 1,
            movements: 1,
            works: 1,
            figures: 1
        }
    );

    let era = &content.macros[0];
    assert_eq!(era.name, "Modernism");
    assert_eq!(era.span, YearSpan::new(1900, 1975));
    assert_eq!(era.color.as_deref(), Some("#ff6600"));

    let movement = &content.movements[0];
    assert_eq!(movement.macro_id.as_deref(), Some("modern"));
    assert_eq!(movement.span, YearSpan::new(1919, 1933));
    assert_eq!(movement.description.as_deref(), Some("Art school in Weimar."));
    assert_eq!(
        movement.image_url.as_deref(),
        Some("https://cdn.example/bauhaus.jpg")
    );

    let work = &content.works[0];
    assert_eq!(work.year, Some(1926));
    assert_eq!(work.location.as_deref(), Some("Dessau, Germany"));
    assert_eq!(work.movement_ids, vec!["bauhaus".to_string()]);
    assert_eq!(work.figure_ids, vec!["gropius".to_string()]);

    let figure = &content.figures[0];
    assert_eq!(figure.born, Some(1883));
    assert_eq!(figure.died, Some(1969));
    assert_eq!(figure.movement_ids, vec!["bauhaus".to_string()]);
    assert_eq!(figure.location.as_deref(), Some("Germany"));
}

#[test]
fn test_location_prefers_explicit_field() {
    let docs = vec![
        json!({ "_id": "w1", "_type": "work", "location": "Paris", "city": "Lyon" }),
        json!({ "_id": "w2", "_type": "work", "location": { "name": "Chicago" } }),
        json!({ "_id": "w3", "_type": "work", "location": "  ", "city": "Rome" }),
        json!({ "_id": "w4", "_type": "work" }),
    ];
    let works = normalize_documents(&docs).content.works;
    assert_eq!(works[0].location.as_deref(), Some("Paris"));
    assert_eq!(works[1].location.as_deref(), Some("Chicago"));
    assert_eq!(works[2].location.as_deref(), Some("Rome"));
    assert_eq!(works[3].location, None);
}

#[test]
fn test_missing_id_and_unknown_type_are_skipped() {
    let docs = vec![
        json!({ "_type": "work", "name": "Anonymous" }),
        json!({ "_id": "x", "_type": "siteSettings" }),
        json!("not a document"),
        json!({ "_id": "w", "_type": "work", "name": "Kept" }),
    ];
    let out = normalize_documents(&docs);

    assert_eq!(out.content.works.len(), 1);
    assert_eq!(out.report.skipped.len(), 3);
    assert_eq!(out.report.skipped[0].reason, "missing id");
    assert_eq!(out.report.skipped[1].reason, "unknown document type");
    assert_eq!(out.report.skipped[1].id.as_deref(), Some("x"));
    assert_eq!(out.report.skipped[2].reason, "not an object");
}

#[test]
fn test_movement_without_start_is_skipped() {
    let docs = vec![
        json!({ "_id": "m1", "_type": "movement", "name": "Undated" }),
        json!({ "_id": "m2", "_type": "movement", "name": "End only", "end": 1800 }),
    ];
    let out = normalize_documents(&docs);
    assert!(out.content.movements.is_empty());
    assert_eq!(out.report.skipped.len(), 2);
    assert!(out
        .report
        .skipped
        .iter()
        .all(|s| s.reason == "missing start year"));
}

#[test]
fn test_missing_end_uses_start() {
    let docs = vec![json!({ "_id": "m", "_type": "movement", "from": -800 })];
    let movement = &normalize_documents(&docs).content.movements[0];
    assert_eq!(movement.span, YearSpan::point(-800));
    assert_eq!(movement.name, "m");
}

#[test]
fn test_drafts_superseded_by_published() {
    let docs = vec![
        json!({ "_id": "drafts.w1", "_type": "work", "name": "Draft title" }),
        json!({ "_id": "w1", "_type": "work", "name": "Published title" }),
        json!({ "_id": "drafts.w2", "_type": "work", "name": "Only draft" }),
    ];
    let out = normalize_documents(&docs);

    assert_eq!(out.report.drafts_superseded, 1);
    assert_eq!(out.content.works.len(), 2);
    assert_eq!(out.content.works[0].name, "Published title");
    assert_eq!(out.content.works[1].id, "w2");
}

#[test]
fn test_duplicate_ids_keep_first() {
    let docs = vec![
        json!({ "_id": "w", "_type": "work", "name": "First" }),
        json!({ "_id": "w", "_type": "work", "name": "Second" }),
    ];
    let out = normalize_documents(&docs);
    assert_eq!(out.content.works.len(), 1);
    assert_eq!(out.content.works[0].name, "First");
    assert_eq!(out.report.skipped[0].reason, "duplicate id");
}

#[test]
fn test_slug_fallback_id() {
    let docs = vec![json!({ "_type": "figure", "slug": { "current": "aalto" }, "name": "Alvar Aalto" })];
    let out = normalize_documents(&docs);
    assert_eq!(out.content.figures[0].id, "aalto");
}

#[test]
fn test_out_of_range_years_are_rejected() {
    assert_eq!(parse_year(&json!("-2147483648 BCE")), None);
    assert_eq!(parse_year(&json!("-2147483648.0 BC")), None);
    assert_eq!(parse_year(&json!("2147483647 BCE")), Some(-2147483647));
    assert_eq!(parse_year(&json!("-2147483648-01-01")), None);

    let docs = vec![json!({
        "_id": "m",
        "_type": "movement",
        "name": "X",
        "startYear": "-2147483648 BCE"
    })];
    let out = normalize_documents(&docs);
    assert!(out.content.movements.is_empty());
    assert_eq!(out.report.skipped.len(), 1);
    assert_eq!(out.report.skipped[0].reason, "missing start year");
}

#[test]
fn test_snapshot_with_reversed_span_is_normalized() {
    let json = r#"{"movements":[{"id":"m","name":"M","span":{"start":1950,"end":1900}}]}"#;
    let content = load_snapshot_from_json_str(json).unwrap();
    let span = content.movements[0].span;
    assert_eq!((span.start, span.end), (1900, 1950));
}

#[test]
fn test_parse_year_variants() {
    assert_eq!(parse_year(&json!(1929)), Some(1929));
    assert_eq!(parse_year(&json!(1929.6)), Some(1930));
    assert_eq!(parse_year(&json!("-447")), Some(-447));
    assert_eq!(parse_year(&json!("447 BCE")), Some(-447));
    assert_eq!(parse_year(&json!("27 BC")), Some(-27));
    assert_eq!(parse_year(&json!("1200 AD")), Some(1200));
    assert_eq!(parse_year(&json!("AD 800")), Some(800));
    assert_eq!(parse_year(&json!("537 CE")), Some(537));
    assert_eq!(parse_year(&json!("1931-07-01")), Some(1931));
    assert_eq!(parse_year(&json!("1931-07-01T00:00:00Z")), Some(1931));
    assert_eq!(parse_year(&json!("circa")), None);
    assert_eq!(parse_year(&json!("")), None);
    assert_eq!(parse_year(&json!(null)), None);
    assert_eq!(parse_year(&json!(true)), None);
}

#[test]
fn test_work_span_fields() {
    let docs = vec![json!({
        "_id": "sagrada",
        "_type": "building",
        "startYear": 1882,
        "completed": 2026
    })];
    let work = &normalize_documents(&docs).content.works[0];
    assert_eq!(work.span, Some(YearSpan::point(1882)));
    assert_eq!(work.year, Some(2026));
}

#[test]
fn test_load_content_envelopes() {
    let array = r#"[{"_id":"w","_type":"work"}]"#;
    assert_eq!(load_content_from_json_str(array).unwrap().content.works.len(), 1);

    let documents = r#"{"documents":[{"_id":"w","_type":"work"}]}"#;
    assert_eq!(load_content_from_json_str(documents).unwrap().content.works.len(), 1);

    let result = r#"{"ms":12,"result":[{"_id":"w","_type":"work"}]}"#;
    assert_eq!(load_content_from_json_str(result).unwrap().content.works.len(), 1);
}

#[test]
fn test_load_content_bad_shapes() {
    assert!(matches!(
        load_content_from_json_str("{\"result\": 3}"),
        Err(ContentLoadError::Shape(_))
    ));
    assert!(matches!(
        load_content_from_json_str("42"),
        Err(ContentLoadError::Shape(_))
    ));
    assert!(matches!(
        load_content_from_json_str("[{"),
        Err(ContentLoadError::Json(_))
    ));
}

#[test]
fn test_snapshot_error_reports_path() {
    let json = r#"{"movements":[{"id":"m","name":"M","span":{"start":"x","end":1}}]}"#;
    match load_snapshot_from_json_str(json) {
        Err(ContentLoadError::Snapshot { path, .. }) => {
            assert_eq!(path, "movements[0].span.start");
        }
        other => panic!("expected snapshot error, got {:?}", other),
    }
}

#[test]
fn test_load_any_from_file_detects_format() {
    let dir = tempfile::tempdir().unwrap();

    let raw_path = dir.path().join("raw.json");
    std::fs::write(&raw_path, serde_json::to_string(&sample_documents()).unwrap()).unwrap();
    let raw = load_any_from_file(&raw_path).unwrap();
    assert_eq!(raw.content.movements.len(), 1);

    let snapshot_path = dir.path().join("snapshot.json");
    std::fs::write(&snapshot_path, serde_json::to_string(&raw.content).unwrap()).unwrap();
    let snapshot = load_any_from_file(&snapshot_path).unwrap();
    assert_eq!(snapshot.content, raw.content);
    assert_eq!(snapshot.report.input_count, 4);

    let missing = load_any_from_file(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ContentLoadError::Io { .. })));
}
