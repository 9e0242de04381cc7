//! End-to-end tests: sample export → repository → timeline, map and search.

mod support;

use std::sync::Arc;

use arch_timeline::api::{SearchKind, ViewAction, ViewState};
use arch_timeline::db::repositories::LocalRepository;
use arch_timeline::db::services::{get_dataset, ingest_documents, list_datasets};
use arch_timeline::geo::Gazetteer;
use arch_timeline::models::ContentSet;
use arch_timeline::parsing::load_content_from_file;
use arch_timeline::services::{
    compute_map_data, compute_timeline_layout, search, LayoutSettings, UNASSIGNED_BAND_ID,
};
use arch_timeline::state::reduce;

async fn sample_dataset() -> (LocalRepository, Arc<ContentSet>) {
    let json = std::fs::read_to_string(support::sample_content_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let documents = value["documents"].as_array().unwrap().clone();

    let repo = LocalRepository::new();
    let outcome = ingest_documents(&repo, "Sample", &documents).await.unwrap();
    let content = get_dataset(&repo, outcome.dataset.dataset_id).await.unwrap();
    (repo, content)
}

#[test]
fn test_sample_normalization_report() {
    let normalized = load_content_from_file(support::sample_content_path()).unwrap();
    let report = &normalized.report;

    assert_eq!(report.input_count, 30);
    assert_eq!(report.drafts_superseded, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id.as_deref(), Some("untyped-note"));

    let greek = normalized
        .content
        .movement_by_id("greek")
        .expect("greek movement");
    assert_eq!((greek.span.start, greek.span.end), (-800, -146));
}

#[tokio::test]
async fn test_ingest_twice_keeps_one_dataset() {
    let (repo, _) = sample_dataset().await;
    let json = std::fs::read_to_string(support::sample_content_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let again = ingest_documents(&repo, "Again", value["documents"].as_array().unwrap())
        .await
        .unwrap();

    assert!(!again.created);
    assert_eq!(list_datasets(&repo).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_timeline_over_sample() {
    let (_, content) = sample_dataset().await;
    let settings = LayoutSettings::default();
    let layout = compute_timeline_layout(&content, &ViewState::default(), &settings);

    let ids: Vec<&str> = layout.bands.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["classical", "medieval", "modern", UNASSIGNED_BAND_ID]);

    // 8 px at 2 px/year keeps 4 years between chips on a row
    let modern = &layout.bands[2];
    assert_eq!(modern.row_count, 2);
    let row = |id: &str| modern.chips.iter().find(|c| c.id == id).unwrap().row;
    assert_eq!(row("art-nouveau"), 0);
    assert_eq!(row("bauhaus"), 0);
    assert_eq!(row("international"), 1);
    assert_eq!(row("brutalism"), 0);

    assert_eq!(layout.diagnostics.chip_count, 9);
    assert!(layout.diagnostics.max_band_rows <= layout.diagnostics.max_overlap);
}

#[tokio::test]
async fn test_expanding_a_movement_through_the_reducer() {
    let (_, content) = sample_dataset().await;
    let view = reduce(
        ViewState::default(),
        ViewAction::ToggleExpanded {
            movement_id: "bauhaus".to_string(),
        },
    );
    let layout = compute_timeline_layout(&content, &view, &LayoutSettings::default());

    let lane = layout
        .bands
        .iter()
        .find_map(|b| b.markers.as_ref())
        .expect("expanded lane");
    let ids: Vec<&str> = lane.markers.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["fagus", "bauhaus-dessau", "barcelona-pavilion", "lost-pavilion", "gropius", "mies"]
    );

    // undated work sits at the movement start
    let lost = &lane.markers[3];
    assert_eq!((lost.start, lost.end), (1919.0, 1919.0));
}

#[tokio::test]
async fn test_map_over_sample() {
    let (_, content) = sample_dataset().await;
    let data = compute_map_data(&content, &ViewState::default(), Gazetteer::shared());

    assert_eq!(data.summary.input_count, 12);
    assert_eq!(data.summary.matched_count, 11);
    assert_eq!(data.summary.unmatched_ids, vec!["lost-pavilion".to_string()]);
    assert_eq!(data.heat.len(), 10);
    assert_eq!(data.heat.iter().map(|p| p.intensity).sum::<usize>(), 11);

    let barcelona = Gazetteer::shared().resolve("Barcelona").unwrap();
    let hot = data
        .heat
        .iter()
        .find(|p| p.lat == barcelona.lat && p.lng == barcelona.lng)
        .unwrap();
    assert_eq!(hot.intensity, 2);
}

#[tokio::test]
async fn test_macro_filter_narrows_map() {
    let (_, content) = sample_dataset().await;
    let view = reduce(
        ViewState::default(),
        ViewAction::ToggleMacroFilter {
            macro_id: "medieval".to_string(),
        },
    );
    let data = compute_map_data(&content, &view, Gazetteer::shared());

    let mut ids: Vec<&str> = data.markers.iter().map(|m| m.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["chartres", "notre-dame"]);
    assert_eq!(data.heat.len(), 2);
}

#[tokio::test]
async fn test_search_over_sample() {
    let (_, content) = sample_dataset().await;
    let hits = search(&content, "Bauhaus", 10);

    assert_eq!(hits.len(), 2);
    assert_eq!((hits[0].kind, hits[0].id.as_str(), hits[0].score), (SearchKind::Movement, "bauhaus", 3));
    assert_eq!((hits[1].kind, hits[1].id.as_str(), hits[1].score), (SearchKind::Work, "bauhaus-dessau", 2));

    assert_eq!(search(&content, "bauhaus", 1).len(), 1);
    assert!(search(&content, "  ", 10).is_empty());
}
