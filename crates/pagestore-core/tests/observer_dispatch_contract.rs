//! Contract Test: Observer Dispatch
//!
//! Verifies the notification protocol of both observer contracts.
//!
//! Constraints verified:
//! - Raw announcement, skips, data announcement, loaded batch: in that order
//! - `skip` fires exactly once per rejected line, in line order
//! - Observers are notified in registration order
//! - Registration is idempotent and detaching an unknown observer is a no-op
//! - Dropped observers are never resurrected

mod common;

use common::*;

#[test]
fn load_notifies_in_protocol_order() {
    let journal = journal();
    let observer = RecordingObserver::new("rec", &journal);

    let mut container = container();
    container.attach_data(&observer);
    container.attach_batch(&observer);

    container
        .load(source(&numbered_lines(1..=13)).as_bytes(), 3.0)
        .unwrap();

    let accepted: Vec<String> = (4..=13).map(|n| format!("id{n}")).collect();
    assert_eq!(
        events(&journal),
        vec![
            Event::RawDataLoad {
                observer: "rec",
                old: 0,
                new: 13
            },
            Event::Skip {
                observer: "rec",
                id: "id1".to_string()
            },
            Event::Skip {
                observer: "rec",
                id: "id2".to_string()
            },
            Event::Skip {
                observer: "rec",
                id: "id3".to_string()
            },
            Event::DataLoad {
                observer: "rec",
                old: vec![],
                new: accepted.clone()
            },
            Event::Loaded {
                observer: "rec",
                ids: accepted
            },
        ]
    );
}

#[test]
fn skips_follow_line_order_not_score_order() {
    let journal = journal();
    let observer = RecordingObserver::new("rec", &journal);

    let mut container = container();
    container.attach_batch(&observer);

    let mut lines = numbered_lines(20..=29);
    lines.insert(3, "low3 name 3.0".to_string());
    lines.insert(0, "low9 name 9.0".to_string());
    lines.push("low1 name 1.0".to_string());

    container.load(source(&lines).as_bytes(), 10.0).unwrap();

    let events = events(&journal);
    assert_eq!(skipped_ids(&events), vec!["low9", "low3", "low1"]);
    assert!(matches!(events.last(), Some(Event::Loaded { .. })));
}

#[test]
fn observers_are_notified_in_registration_order() {
    let journal = journal();
    let first = RecordingObserver::new("first", &journal);
    let second = RecordingObserver::new("second", &journal);

    let mut container = container();
    container.attach_batch(&second);
    container.attach_batch(&first);

    container
        .load(source(&numbered_lines(1..=11)).as_bytes(), 1.0)
        .unwrap();

    let order: Vec<&'static str> = events(&journal)
        .iter()
        .map(|event| match event {
            Event::Skip { observer, .. } | Event::Loaded { observer, .. } => *observer,
            _ => unreachable!("no data observer attached"),
        })
        .collect();
    assert_eq!(order, vec!["second", "first", "second", "first"]);
}

#[test]
fn attach_is_idempotent_and_detach_is_safe() {
    let journal = journal();
    let observer = RecordingObserver::new("rec", &journal);
    let stranger = RecordingObserver::new("stranger", &journal);

    let mut container = container();
    assert!(container.attach_batch(&observer));
    assert!(!container.attach_batch(&observer));
    assert_eq!(container.batch_observer_count(), 1);

    assert!(!container.detach_batch(&stranger));
    assert!(!container.detach_data(&observer));

    container
        .load(source(&numbered_lines(1..=10)).as_bytes(), 0.0)
        .unwrap();
    assert_eq!(
        events(&journal).len(),
        1,
        "a doubly attached observer is notified once"
    );

    assert!(container.detach_batch(&observer));
    container.reload(0.0).unwrap();
    assert_eq!(events(&journal).len(), 1);
}

#[test]
fn dropped_observers_are_not_resurrected() {
    let journal = journal();
    let kept = RecordingObserver::new("kept", &journal);
    let dropped = RecordingObserver::new("dropped", &journal);

    let mut container = container();
    container.attach_data(&dropped);
    container.attach_data(&kept);
    assert_eq!(container.data_observer_count(), 2);

    drop(dropped);
    assert_eq!(container.data_observer_count(), 1);

    container
        .load(source(&numbered_lines(1..=10)).as_bytes(), 0.0)
        .unwrap();

    assert!(events(&journal).iter().all(|event| match event {
        Event::RawDataLoad { observer, .. } | Event::DataLoad { observer, .. } =>
            *observer == "kept",
        _ => false,
    }));
    assert_eq!(events(&journal).len(), 2);
}

#[test]
fn data_observers_see_previous_collections() {
    let journal = journal();
    let observer = RecordingObserver::new("rec", &journal);

    let mut container = container();
    container
        .load(source(&numbered_lines(1..=10)).as_bytes(), 0.0)
        .unwrap();
    container.attach_data(&observer);

    container
        .load(source(&numbered_lines(1..=12)).as_bytes(), 0.0)
        .unwrap();

    let events = events(&journal);
    assert_eq!(
        events[0],
        Event::RawDataLoad {
            observer: "rec",
            old: 10,
            new: 12
        }
    );
    match &events[1] {
        Event::DataLoad { old, new, .. } => {
            assert_eq!(old.len(), 10);
            assert_eq!(new.len(), 12);
        }
        other => panic!("expected DataLoad, got {:?}", other),
    }
}
