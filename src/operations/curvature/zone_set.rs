use serde::Serialize;

/// A closed interval of stations, in metres, excluded from sampling.
///
/// Zones may extend below 0 or beyond the road length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForbiddenZone {
    pub start: f64,
    pub end: f64,
}

impl ForbiddenZone {
    /// Creates a zone; the bounds are reordered if given backwards.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates the zone `[center - margin, center + margin]`.
    #[must_use]
    pub fn around(center: f64, margin: f64) -> Self {
        Self::new(center - margin, center + margin)
    }

    /// Whether `station` lies inside the zone, bounds included.
    #[must_use]
    pub fn contains(&self, station: f64) -> bool {
        self.start <= station && station <= self.end
    }
}

/// A set of possibly overlapping forbidden zones.
///
/// Keeps the zones as emitted plus their merged union, sorted, which answers
/// membership with a binary search.
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    zones: Vec<ForbiddenZone>,
    merged: Vec<ForbiddenZone>,
}

impl ZoneSet {
    /// Builds a set from arbitrary zones.
    #[must_use]
    pub fn new(zones: Vec<ForbiddenZone>) -> Self {
        let merged = merge(&zones);
        Self { zones, merged }
    }

    /// Returns an empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zones as emitted, in emission order.
    #[must_use]
    pub fn zones(&self) -> &[ForbiddenZone] {
        &self.zones
    }

    /// Disjoint, ascending union of the zones.
    #[must_use]
    pub fn merged(&self) -> &[ForbiddenZone] {
        &self.merged
    }

    /// Number of zones as emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Whether `station` falls inside any zone, bounds included.
    #[must_use]
    pub fn contains(&self, station: f64) -> bool {
        let idx = self.merged.partition_point(|z| z.start <= station);
        idx > 0 && self.merged[idx - 1].end >= station
    }

    /// Length of `[0, length]` covered by the union of the zones.
    #[must_use]
    pub fn covered_length(&self, length: f64) -> f64 {
        self.merged
            .iter()
            .map(|z| (z.end.min(length) - z.start.max(0.0)).max(0.0))
            .sum()
    }
}

fn merge(zones: &[ForbiddenZone]) -> Vec<ForbiddenZone> {
    let mut sorted = zones.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<ForbiddenZone> = Vec::with_capacity(sorted.len());
    for zone in sorted {
        match merged.last_mut() {
            Some(last) if zone.start <= last.end => last.end = last.end.max(zone.end),
            _ => merged.push(zone),
        }
    }
    merged
}
