//! Map view data: heat overlay, work markers and coverage.

use crate::algorithms::{aggregate_heat_buckets, HeatPoint, LocatedItem};
use crate::api::{BoundingBox, MapData, MapMarker};
use crate::geo::{Gazetteer, GeoPoint};
use crate::models::ContentSet;
use crate::services::search::{filter_content, ContentFilter};
use crate::state::ViewState;

/// Build map data for the works that survive the view's filters.
///
/// Works without a location count as unmatched in the summary.
pub fn compute_map_data(content: &ContentSet, view: &ViewState, gazetteer: &Gazetteer) -> MapData {
    let filtered = filter_content(content, &ContentFilter::from_view(view));

    let located: Vec<LocatedItem> = filtered
        .works
        .iter()
        .map(|w| LocatedItem::new(w.id.clone(), w.location.clone().unwrap_or_default()))
        .collect();
    let (buckets, summary) = aggregate_heat_buckets(&located, gazetteer);

    let markers: Vec<MapMarker> = filtered
        .works
        .iter()
        .filter_map(|w| {
            let location = w.location.as_deref()?;
            let point = gazetteer.resolve(location)?;
            Some(MapMarker {
                id: w.id.clone(),
                name: w.name.clone(),
                lat: point.lat,
                lng: point.lng,
                location: location.to_string(),
                movement_ids: w.movement_ids.clone(),
                span: w.time_span(),
                hovered: view.hovered.as_deref() == Some(w.id.as_str()),
                selected: view.selected.as_deref() == Some(w.id.as_str()),
            })
        })
        .collect();

    let bounds = BoundingBox::enclosing(buckets.iter().map(|b| GeoPoint::new(b.lat, b.lng)));
    if summary.input_count > 0 {
        log::debug!(
            "map data: {} of {} works located ({} buckets)",
            summary.matched_count,
            summary.input_count,
            summary.bucket_count
        );
    }

    MapData {
        heat: buckets.iter().map(HeatPoint::from).collect(),
        markers,
        summary,
        bounds,
    }
}
