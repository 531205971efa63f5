//! Preferred icon selection
//!
//! Candidates are ordered by a single comparator under a stable sort:
//!
//! | Case | Order |
//! |------|-------|
//! | Preferred size given, both candidates sized | ascending product of width and height deltas |
//! | Both candidates sized | descending area |
//! | Only one candidate sized | sized one first |
//! | Neither sized | ascending [`IconType`](super::IconType) declaration order |
//!
//! The distance is a product of deltas, so a candidate matching the preferred
//! width exactly scores zero whatever its height. A preferred size with only
//! one dimension never enables the distance rule.

use super::{DetectedIcon, IconSize};
use std::cmp::Ordering;

/// Chooses the best icon for the preferred size
///
/// Returns `None` when `icons` is empty. Ties keep input order.
///
/// # Example
///
/// ```
/// use favicon_scan::{choose_icon, DetectedIcon, IconSize, IconType};
/// use url::Url;
///
/// let small = DetectedIcon::sized(
///     Url::parse("https://example.com/16.png").unwrap(),
///     IconType::Classic,
///     IconSize::new(16, 16),
/// );
/// let large = DetectedIcon::sized(
///     Url::parse("https://example.com/192.png").unwrap(),
///     IconType::GoogleAndroidChrome,
///     IconSize::new(192, 192),
/// );
/// let icons = vec![small, large];
///
/// assert_eq!(choose_icon(&icons, Some(20), Some(20)).unwrap().width, Some(16));
/// assert_eq!(choose_icon(&icons, None, None).unwrap().width, Some(192));
/// ```
pub fn choose_icon(
    icons: &[DetectedIcon],
    width: Option<u32>,
    height: Option<u32>,
) -> Option<&DetectedIcon> {
    sort_icons(icons, width, height).into_iter().next()
}

/// Orders icons from most to least preferred for the given size
pub fn sort_icons(
    icons: &[DetectedIcon],
    width: Option<u32>,
    height: Option<u32>,
) -> Vec<&DetectedIcon> {
    let preferred = match (width, height) {
        (Some(width), Some(height)) => Some(IconSize::new(width, height)),
        _ => None,
    };

    let mut sorted: Vec<&DetectedIcon> = icons.iter().collect();
    sorted.sort_by(|left, right| compare(left, right, preferred));
    sorted
}

fn compare(left: &DetectedIcon, right: &DetectedIcon, preferred: Option<IconSize>) -> Ordering {
    match (left.size(), right.size(), preferred) {
        (Some(l), Some(r), Some(p)) => distance(l, p).cmp(&distance(r, p)),
        (Some(l), Some(r), None) => r.area().cmp(&l.area()),
        (Some(_), None, _) => Ordering::Less,
        (None, Some(_), _) => Ordering::Greater,
        (None, None, _) => left.icon_type.cmp(&right.icon_type),
    }
}

fn distance(size: IconSize, preferred: IconSize) -> u64 {
    u64::from(size.width.abs_diff(preferred.width)) * u64::from(size.height.abs_diff(preferred.height))
}
