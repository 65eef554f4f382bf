use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::model::*;

/// In-memory slot collection. Slots are bucketed by date and kept sorted by
/// `span.start` inside each bucket.
#[derive(Debug, Default, Clone)]
pub struct SlotStore {
    by_date: BTreeMap<NaiveDate, Vec<TimeSlot>>,
    /// Reverse lookup: slot id → date bucket
    index: HashMap<SlotId, NaiveDate>,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &SlotId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &SlotId) -> Option<&TimeSlot> {
        let date = self.index.get(id)?;
        self.by_date.get(date)?.iter().find(|s| s.id == *id)
    }

    fn get_mut(&mut self, id: &SlotId) -> Option<&mut TimeSlot> {
        let date = self.index.get(id)?;
        self.by_date.get_mut(date)?.iter_mut().find(|s| s.id == *id)
    }

    /// Slots on `date`, sorted by start.
    pub fn on_date(&self, date: NaiveDate) -> &[TimeSlot] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every slot, ordered by date then start.
    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.by_date.values().flatten()
    }

    /// Slots on `date` whose span overlaps `query`.
    /// Uses binary search to skip slots starting at or after `query.end`.
    pub fn overlapping(&self, date: NaiveDate, query: &Span) -> impl Iterator<Item = &TimeSlot> {
        let slots = self.on_date(date);
        let right_bound = slots.partition_point(|s| s.span.start < query.end);
        slots[..right_bound]
            .iter()
            .filter(move |s| s.span.end > query.start)
    }

    /// Insert maintaining sort order by span.start.
    fn insert_slot(&mut self, slot: TimeSlot) {
        self.index.insert(slot.id, slot.date);
        let bucket = self.by_date.entry(slot.date).or_default();
        let pos = bucket
            .binary_search_by_key(&slot.span.start, |s| s.span.start)
            .unwrap_or_else(|e| e);
        bucket.insert(pos, slot);
    }

    fn remove_slot(&mut self, id: &SlotId) -> Option<TimeSlot> {
        let date = self.index.remove(id)?;
        let bucket = self.by_date.get_mut(&date)?;
        let pos = bucket.iter().position(|s| s.id == *id)?;
        let removed = bucket.remove(pos);
        if bucket.is_empty() {
            self.by_date.remove(&date);
        }
        Some(removed)
    }

    // ── Event application ────────────────────────────────────

    /// Apply a transition. Callers validate first; ids that are not present
    /// are ignored.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::SlotCreated { slot } => {
                self.insert_slot(slot.clone());
            }
            Event::SlotResized { id, span } => {
                if let Some(mut slot) = self.remove_slot(id) {
                    slot.span = *span;
                    self.insert_slot(slot);
                }
            }
            Event::ServicesChanged { id, services } => {
                if let Some(slot) = self.get_mut(id) {
                    slot.services = services.clone();
                }
            }
            Event::SlotRemoved { id } => {
                self.remove_slot(id);
            }
            Event::SeriesRemoved { ids } => {
                for id in ids {
                    self.remove_slot(id);
                }
            }
        }
    }

    /// First pair of slots sharing a date whose spans intersect, if any.
    /// Empty for every store the engine builds.
    pub fn find_overlap(&self) -> Option<(SlotId, SlotId)> {
        for bucket in self.by_date.values() {
            for pair in bucket.windows(2) {
                if pair[0].span.overlaps(&pair[1].span) {
                    return Some((pair[0].id, pair[1].id));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use ulid::Ulid;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn slot(date: NaiveDate, start: Minutes, end: Minutes) -> TimeSlot {
        TimeSlot {
            id: Ulid::new(),
            date,
            span: Span::new(start, end),
            services: BTreeSet::new(),
        }
    }

    fn store_with(slots: &[TimeSlot]) -> SlotStore {
        let mut store = SlotStore::new();
        for s in slots {
            store.apply(&Event::SlotCreated { slot: s.clone() });
        }
        store
    }

    #[test]
    fn slots_kept_sorted_by_start() {
        let d = monday();
        let store = store_with(&[slot(d, 900, 960), slot(d, 540, 600), slot(d, 660, 720)]);
        let starts: Vec<_> = store.on_date(d).iter().map(|s| s.span.start).collect();
        assert_eq!(starts, vec![540, 660, 900]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn iter_orders_by_date_then_start() {
        let d = monday();
        let next = d.succ_opt().unwrap();
        let store = store_with(&[slot(next, 480, 540), slot(d, 600, 660), slot(d, 420, 480)]);
        let order: Vec<_> = store.iter().map(|s| (s.date, s.span.start)).collect();
        assert_eq!(order, vec![(d, 420), (d, 600), (next, 480)]);
    }

    #[test]
    fn overlapping_respects_half_open_bounds() {
        let d = monday();
        let store = store_with(&[slot(d, 540, 600), slot(d, 660, 720), slot(d, 900, 960)]);
        let hits: Vec<_> = store.overlapping(d, &Span::new(600, 690)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span, Span::new(660, 720));

        let adjacent: Vec<_> = store.overlapping(d, &Span::new(720, 900)).collect();
        assert!(adjacent.is_empty());
    }

    #[test]
    fn overlapping_other_date_ignored() {
        let d = monday();
        let store = store_with(&[slot(d, 540, 720)]);
        let other = d.succ_opt().unwrap();
        assert_eq!(store.overlapping(other, &Span::new(540, 720)).count(), 0);
    }

    #[test]
    fn resize_reorders_bucket() {
        let d = monday();
        let a = slot(d, 540, 600);
        let b = slot(d, 660, 720);
        let mut store = store_with(&[a.clone(), b.clone()]);
        store.apply(&Event::SlotResized {
            id: b.id,
            span: Span::new(450, 510),
        });
        let ids: Vec<_> = store.on_date(d).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
        assert_eq!(store.get(&b.id).unwrap().span, Span::new(450, 510));
    }

    #[test]
    fn services_changed_replaces_set() {
        let d = monday();
        let a = slot(d, 540, 600);
        let mut store = store_with(&[a.clone()]);
        let services: BTreeSet<ServiceId> = ["consult".to_string()].into();
        store.apply(&Event::ServicesChanged {
            id: a.id,
            services: services.clone(),
        });
        assert_eq!(store.get(&a.id).unwrap().services, services);
    }

    #[test]
    fn remove_drops_empty_bucket() {
        let d = monday();
        let a = slot(d, 540, 600);
        let mut store = store_with(&[a.clone()]);
        store.apply(&Event::SlotRemoved { id: a.id });
        assert!(store.is_empty());
        assert!(!store.contains(&a.id));
        assert!(store.on_date(d).is_empty());
        assert_eq!(store.iter().count(), 0);
    }

    #[test]
    fn remove_nonexistent_is_noop() {
        let d = monday();
        let mut store = store_with(&[slot(d, 540, 600)]);
        store.apply(&Event::SlotRemoved { id: Ulid::new() });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn series_removed_drops_every_id() {
        let d = monday();
        let week = d + chrono::Duration::days(7);
        let a = slot(d, 540, 720);
        let b = slot(week, 540, 720);
        let keep = slot(week, 780, 840);
        let mut store = store_with(&[a.clone(), b.clone(), keep.clone()]);
        store.apply(&Event::SeriesRemoved { ids: vec![a.id, b.id] });
        assert_eq!(store.len(), 1);
        assert!(store.contains(&keep.id));
    }

    #[test]
    fn find_overlap_detects_corruption() {
        let d = monday();
        let store = store_with(&[slot(d, 540, 600), slot(d, 600, 660)]);
        assert!(store.find_overlap().is_none());

        let bad = store_with(&[slot(d, 540, 660), slot(d, 600, 720)]);
        assert!(bad.find_overlap().is_some());
    }
}
