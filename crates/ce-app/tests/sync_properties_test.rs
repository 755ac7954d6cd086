//! Mirroring guarantees of the sync controller, checked end to end against
//! fake ports.

mod support;

use ce_app::Propagation;
use ce_core::{ExternalClip, Field, LocalState, MimeType, SyncConfig, SyncPhase, TextPair};
use support::{local, Harness};

fn delayed(push_delay_ms: u64) -> SyncConfig {
    SyncConfig {
        push_delay_ms,
        ..SyncConfig::default()
    }
}

#[test]
fn second_pull_without_external_change_mutates_nothing() {
    let h = Harness::new(
        SyncConfig::default(),
        Some(ExternalClip::plain_text(TextPair::new("title", "body"))),
        LocalState::default(),
    );

    let first = h.controller.manual_pull();
    let sets_after_first = h.fields.sets();
    let second = h.controller.manual_pull();

    match (first, second) {
        (Propagation::Pulled(first), Propagation::Pulled(second)) => {
            assert_eq!(first.changed, vec![Field::Label, Field::Content]);
            assert!(second.changed.is_empty());
        }
        other => panic!("unexpected propagations: {other:?}"),
    }
    assert_eq!(h.fields.sets(), sets_after_first);
}

#[test]
fn pull_into_fields_never_pushes_back() {
    let h = Harness::started(SyncConfig::default(), None, LocalState::default());

    h.store
        .external_set(Some(ExternalClip::plain_text(TextPair::plain("from elsewhere"))));

    assert_eq!(h.fields.pair(), TextPair::plain("from elsewhere"));
    assert_eq!(h.fields.sets(), vec![(Field::Content, "from elsewhere".to_string())]);
    assert!(h.store.writes().is_empty());
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn pull_never_schedules_a_deferred_push() {
    let h = Harness::started(delayed(250), None, LocalState::default());

    h.store
        .external_set(Some(ExternalClip::plain_text(TextPair::new("t", "c"))));
    assert_eq!(h.scheduler.pending(), 0);
    h.scheduler.advance_ms(1_000);

    assert!(h.store.writes().is_empty());
}

#[test]
fn pull_supersedes_a_push_scheduled_before_it() {
    let h = Harness::started(delayed(250), None, LocalState::default());

    h.fields.user_types(Field::Content, "draft!");
    h.scheduler.advance_ms(100);
    let image = ExternalClip::new(TextPair::default(), vec![MimeType::from("image/png")], 1);
    h.store.external_set(Some(image.clone()));
    assert_eq!(h.fields.pair(), TextPair::default());

    h.scheduler.advance_ms(200);

    assert_eq!(h.scheduler.fired(), 1);
    assert!(h.store.writes().is_empty(), "the blanked fields must not overwrite the image");
    assert_eq!(h.store.value(), Some(image));
}

#[test]
fn push_echo_from_store_is_dropped() {
    let h = Harness::started(SyncConfig::default(), None, local("X", "Y"));
    let reads_before = h.store.reads();

    h.fields.user_types(Field::Content, "YZ");

    assert_eq!(h.store.writes().len(), 1);
    // the echoed notification arrived while the push held the guard
    assert_eq!(h.store.reads(), reads_before);
    assert!(h.fields.sets().is_empty());
}

#[test]
fn debounce_coalesces_edits_into_the_latest_value() {
    let h = Harness::started(delayed(250), None, LocalState::default());

    h.fields.user_types(Field::Content, "a");
    h.scheduler.advance_ms(50);
    h.fields.user_types(Field::Content, "ab");
    h.scheduler.advance_ms(50);
    h.fields.user_types(Field::Content, "abc");

    h.scheduler.advance_ms(200);
    assert!(h.store.writes().is_empty(), "first two checks are stale");

    h.scheduler.advance_ms(50);
    assert_eq!(h.store.writes(), vec![TextPair::plain("abc")]);
    assert_eq!(h.scheduler.fired(), 3);
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn disabled_local_edit_keeps_external_direction_alive() {
    let h = Harness::started(
        SyncConfig {
            sync_on_local_edit: false,
            sync_on_external_change: true,
            ..SyncConfig::default()
        },
        None,
        LocalState::default(),
    );

    h.fields.user_types(Field::Content, "typed");
    assert!(h.store.writes().is_empty());

    h.store
        .external_set(Some(ExternalClip::plain_text(TextPair::plain("copied"))));
    assert_eq!(h.fields.pair(), TextPair::plain("copied"));
}

#[test]
fn disabled_external_change_keeps_local_direction_alive() {
    let h = Harness::started(
        SyncConfig {
            sync_on_external_change: false,
            ..SyncConfig::default()
        },
        None,
        local("", "mine"),
    );

    h.store
        .external_set(Some(ExternalClip::plain_text(TextPair::plain("theirs"))));
    assert_eq!(h.fields.pair(), TextPair::plain("mine"));

    h.fields.user_types(Field::Content, "mine!");
    assert_eq!(h.store.writes(), vec![TextPair::plain("mine!")]);
}

#[test]
fn absent_store_blanks_both_fields() {
    let h = Harness::new(SyncConfig::default(), None, local("X", "Y"));

    let outcome = h.controller.manual_pull();

    assert_eq!(h.fields.pair(), TextPair::default());
    assert_eq!(h.fields.info().as_deref(), Some("[empty]"));
    match outcome {
        Propagation::Pulled(pulled) => assert_eq!(pulled.pair, None),
        other => panic!("unexpected propagation: {other:?}"),
    }
}

#[test]
fn plain_text_clip_fills_content_and_shows_mime() {
    let h = Harness::new(
        SyncConfig::default(),
        Some(ExternalClip::new(
            TextPair::new("", "hello"),
            vec![MimeType::text_plain()],
            1,
        )),
        LocalState::default(),
    );

    h.controller.manual_pull();

    assert_eq!(h.fields.pair(), TextPair::new("", "hello"));
    assert_eq!(h.fields.info().as_deref(), Some("text/plain"));
    // the label already matched and was left alone
    assert_eq!(h.fields.sets(), vec![(Field::Content, "hello".to_string())]);
}

#[test]
fn immediate_edit_writes_the_pair_exactly_once() {
    let h = Harness::started(SyncConfig::default(), None, local("X", "Y"));

    h.fields.user_types(Field::Content, "YZ");

    assert_eq!(h.store.writes(), vec![TextPair::new("X", "YZ")]);
    assert_eq!(
        h.store.value().map(|clip| clip.pair),
        Some(TextPair::new("X", "YZ"))
    );
}

#[test]
fn events_during_a_propagation_are_dropped_not_queued() {
    let h = Harness::started(SyncConfig::default(), None, LocalState::default());

    h.store
        .external_set(Some(ExternalClip::plain_text(TextPair::new("a", "b"))));

    // both field writes re-entered on_local_edit while the pull held the guard
    assert_eq!(h.fields.sets().len(), 2);
    assert!(h.store.writes().is_empty());
    assert!(matches!(
        h.controller.on_external_change(),
        Propagation::Pulled(ref pulled) if pulled.changed.is_empty()
    ));
    assert_eq!(h.controller.phase(), SyncPhase::Idle);
}

#[test]
fn stale_token_check_is_a_no_op_after_immediate_push() {
    let h = Harness::started(delayed(100), None, LocalState::default());

    h.fields.user_types(Field::Content, "draft");
    assert_eq!(h.controller.manual_push(), Propagation::Pushed(TextPair::plain("draft")));

    h.scheduler.advance_ms(100);
    assert_eq!(h.store.writes().len(), 1, "manual push superseded the pending one");
}
