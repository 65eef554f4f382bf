use crate::model::*;

// ── Capacity estimate ─────────────────────────────────────────────

/// How many sessions of each enabled service fit in the slot's window, in
/// catalog order.
///
/// Each service is counted on its own: `floor(window / duration)`. This is
/// not a joint packing of mixed services into one window, so the lines
/// overstate what can be offered at the same time. A 180-minute window with
/// a 60- and a 90-minute service reports 3 and 2, not "3 or 2".
///
/// Services whose duration exceeds the window are still listed with a zero
/// count. Enabled ids the catalog does not know are skipped.
pub fn capacity_lines(slot: &TimeSlot, catalog: &[ServiceType]) -> Vec<CapacityLine> {
    let window = slot.span.duration();
    catalog
        .iter()
        .filter(|service| slot.services.contains(&service.id))
        .map(|service| CapacityLine {
            service: service.clone(),
            count: fit_count(window, service.duration),
        })
        .collect()
}

/// `floor(window / duration)`; zero for a non-positive duration.
pub fn fit_count(window: Minutes, duration: Minutes) -> u32 {
    if duration <= 0 || window <= 0 {
        return 0;
    }
    (window / duration) as u32
}

/// Enabled ids with no catalog entry.
pub fn stale_services<'a>(slot: &'a TimeSlot, catalog: &[ServiceType]) -> Vec<&'a ServiceId> {
    slot.services
        .iter()
        .filter(|id| !catalog.iter().any(|s| &s.id == *id))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use ulid::Ulid;

    use super::*;

    fn service(id: &str, duration: Minutes) -> ServiceType {
        ServiceType {
            id: id.to_string(),
            title: id.to_uppercase(),
            duration,
            modality: Modality::Online,
            price: 5000,
        }
    }

    fn slot(start: Minutes, end: Minutes, services: &[&str]) -> TimeSlot {
        TimeSlot {
            id: Ulid::new(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            span: Span::new(start, end),
            services: services.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn three_hour_window_counts() {
        let catalog = vec![service("short", 50), service("long", 90), service("marathon", 200)];
        let s = slot(540, 720, &["short", "long", "marathon"]);
        let counts: Vec<_> = capacity_lines(&s, &catalog)
            .into_iter()
            .map(|l| (l.service.id, l.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("short".to_string(), 3),
                ("long".to_string(), 2),
                ("marathon".to_string(), 0),
            ]
        );
    }

    #[test]
    fn follows_catalog_order_not_enabled_order() {
        let catalog = vec![service("b", 30), service("a", 60)];
        let s = slot(540, 600, &["a", "b"]);
        let ids: Vec<_> = capacity_lines(&s, &catalog)
            .into_iter()
            .map(|l| l.service.id)
            .collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn disabled_services_omitted() {
        let catalog = vec![service("a", 30), service("b", 60)];
        let s = slot(540, 600, &["b"]);
        let lines = capacity_lines(&s, &catalog);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].service.id, "b");
        assert_eq!(lines[0].count, 1);
    }

    #[test]
    fn stale_ids_skipped() {
        let catalog = vec![service("a", 30)];
        let s = slot(540, 600, &["a", "deleted"]);
        assert_eq!(capacity_lines(&s, &catalog).len(), 1);
        assert_eq!(stale_services(&s, &catalog), vec![&"deleted".to_string()]);
    }

    #[test]
    fn zero_duration_counts_nothing() {
        assert_eq!(fit_count(180, 0), 0);
        assert_eq!(fit_count(180, -10), 0);
        assert_eq!(fit_count(180, 60), 3);
    }
}
