use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate};
use common::{catalog_item::CatalogItem, utils::locale_compare};

use super::traits::{Sort, Stage};

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

pub(crate) struct SortStage {
    sort: Sort,
}

impl SortStage {
    pub(crate) fn new(sort: Sort) -> Self {
        Self { sort }
    }

    pub(crate) fn compare(&self, left: &CatalogItem, right: &CatalogItem) -> Ordering {
        match self.sort {
            Sort::Alphabetical => locale_compare(&left.name, &right.name),
            Sort::New => compare_maybe_date_desc(&left.release_date, &right.release_date),
            Sort::Updated => compare_version_desc(&left.version, &right.version),
            Sort::Components => right
                .components_count
                .unwrap_or(0)
                .cmp(&left.components_count.unwrap_or(0)),
            Sort::Verified => right
                .is_verified()
                .cmp(&left.is_verified())
                .then_with(|| locale_compare(&left.name, &right.name)),
        }
    }
}

impl Stage for SortStage {
    fn apply<'a>(&self, mut items: Vec<&'a CatalogItem>) -> Vec<&'a CatalogItem> {
        // stable, so equal keys keep their catalog order
        items.sort_by(|left, right| self.compare(left, right));

        items
    }
}

/// Milliseconds since the epoch, or `None` for "Unknown", blanks and
/// anything no known format accepts.
pub(crate) fn parse_release_date(text: &str) -> Option<i64> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.timestamp_millis());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(datetime.timestamp_millis());
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|datetime| datetime.and_utc().timestamp_millis())
    })
}

/// Newest first; unparseable dates sink to the end.
fn compare_maybe_date_desc(left: &str, right: &str) -> Ordering {
    match (parse_release_date(left), parse_release_date(right)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => right.cmp(&left),
    }
}

fn version_numbers(version: &str) -> Vec<u64> {
    version
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

/// Highest version first, comparing digit runs pairwise and padding with 0.
fn compare_version_desc(left: &str, right: &str) -> Ordering {
    let left_numbers = version_numbers(left);
    let right_numbers = version_numbers(right);
    let len = left_numbers.len().max(right_numbers.len());

    for position in 0..len {
        let left_value = left_numbers.get(position).copied().unwrap_or(0);
        let right_value = right_numbers.get(position).copied().unwrap_or(0);

        if left_value != right_value {
            return right_value.cmp(&left_value);
        }
    }

    locale_compare(right, left)
}
