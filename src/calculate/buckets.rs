//! UTC time bucketing for trends and heatmaps.
//!
//! All keys derive from UTC calendar fields, never server-local time, so
//! the same event stream buckets identically on any host.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;

use crate::models::UnifiedView;

/// Bucketing granularity for view trends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Hourly,
}

/// A count of views in one calendar bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewBucket {
    /// UTC calendar date.
    pub date: NaiveDate,
    /// UTC hour 0-23, present only for hourly granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    pub views: u64,
}

/// Group views into daily or hourly UTC buckets, sorted ascending by date
/// then hour.
pub fn bucket_views(views: &[UnifiedView], granularity: Granularity) -> Vec<ViewBucket> {
    let mut counts: HashMap<(NaiveDate, Option<u32>), u64> = HashMap::new();

    for view in views {
        let date = view.created_at.date_naive();
        let hour = match granularity {
            Granularity::Daily => None,
            Granularity::Hourly => Some(view.created_at.hour()),
        };
        *counts.entry((date, hour)).or_insert(0) += 1;
    }

    let mut buckets: Vec<ViewBucket> = counts
        .into_iter()
        .map(|((date, hour), views)| ViewBucket { date, hour, views })
        .collect();
    buckets.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.hour.cmp(&b.hour)));
    buckets
}

/// A count of views in one recurring weekday/hour slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    /// UTC day of week, 0 = Sunday through 6 = Saturday.
    pub weekday: u32,
    /// UTC hour 0-23.
    pub hour: u32,
    pub views: u64,
}

/// Group views by (UTC weekday, UTC hour) for recurring-pattern heatmaps.
/// Only occupied cells are emitted, sorted by weekday then hour.
pub fn view_heatmap(views: &[UnifiedView]) -> Vec<HeatmapCell> {
    let mut counts: HashMap<(u32, u32), u64> = HashMap::new();

    for view in views {
        let weekday = view.created_at.weekday().num_days_from_sunday();
        let hour = view.created_at.hour();
        *counts.entry((weekday, hour)).or_insert(0) += 1;
    }

    let mut cells: Vec<HeatmapCell> = counts
        .into_iter()
        .map(|((weekday, hour), views)| HeatmapCell {
            weekday,
            hour,
            views,
        })
        .collect();
    cells.sort_by(|a, b| a.weekday.cmp(&b.weekday).then_with(|| a.hour.cmp(&b.hour)));
    cells
}
