//! Adapter behavior against the reference engine.

use std::cell::RefCell;
use std::rc::Rc;

use reel_core::config::EngineOptions;
use reel_core::engine::EngineEvent;
use reel_harness::{Command, EventRecorder, SimEngine};
use reel_runtime::{DisposerBag, EngineApi, EngineOwner};

fn owner(slides: usize, options: &EngineOptions) -> (EngineOwner, reel_harness::SimControl) {
    let (engine, control) = SimEngine::new(slides, options);
    (EngineOwner::new(Box::new(engine)), control)
}

#[test]
fn subscribing_before_first_pump_sees_init() {
    let (owner, _) = owner(3, &EngineOptions::default());
    let api = owner.api().clone();
    let recorder = EventRecorder::new();
    let _init = api.on(EngineEvent::Init, recorder.hook::<EngineApi>("init"));
    assert_eq!(recorder.count("init"), 0);
    api.pump();
    assert_eq!(recorder.count("init"), 1);
    api.pump();
    assert_eq!(recorder.count("init"), 1);
}

#[test]
fn handlers_receive_the_adapter_itself() {
    let (owner, _) = owner(4, &EngineOptions::default());
    let api = owner.api().clone();
    api.pump();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let expected = api.clone();
    let _d = api.on(EngineEvent::Select, move |handle| {
        assert_eq!(*handle, expected);
        s.borrow_mut().push(handle.selected_scroll_snap());
    });
    api.scroll_to(3);
    api.scroll_prev();
    assert_eq!(*seen.borrow(), vec![3, 2]);
}

#[test]
fn boundary_moves_are_no_ops_without_loop() {
    let (owner, control) = owner(2, &EngineOptions::default());
    let api = owner.api().clone();
    api.pump();
    let recorder = EventRecorder::new();
    let _d = api.on(EngineEvent::Select, recorder.hook::<EngineApi>("select"));
    api.scroll_prev();
    assert_eq!(api.selected_scroll_snap(), 0);
    assert_eq!(recorder.count("select"), 0);
    assert_eq!(control.commands(), vec![Command::Prev]);
}

#[test]
fn loop_wraps_both_ways() {
    let (owner, _) = owner(3, &EngineOptions::default().loop_around(true));
    let api = owner.api().clone();
    api.pump();
    api.scroll_prev();
    assert_eq!(api.selected_scroll_snap(), 2);
    api.scroll_next();
    assert_eq!(api.selected_scroll_snap(), 0);
}

#[test]
fn reinit_emits_reinit_only() {
    let (owner, control) = owner(5, &EngineOptions::default());
    let api = owner.api().clone();
    api.pump();
    api.scroll_to(4);
    let recorder = EventRecorder::new();
    let mut bag = DisposerBag::new();
    bag.push(api.on(EngineEvent::ReInit, recorder.hook::<EngineApi>("reinit")));
    bag.push(api.on(EngineEvent::Select, recorder.hook::<EngineApi>("select")));

    control.set_slides(2);
    api.reinit(&EngineOptions::default());
    assert_eq!(recorder.entries(), vec!["reinit"]);
    assert_eq!(api.selected_scroll_snap(), 1);
    assert_eq!(api.scroll_snap_list(), vec![0, 1]);

    assert_eq!(bag.dispose_all(), 2);
    assert_eq!(api.listener_count(EngineEvent::ReInit), 0);
}

#[test]
fn dropping_owner_destroys_engine_once() {
    let (owner, control) = owner(3, &EngineOptions::default());
    let api = owner.api().clone();
    let disposer = api.on(EngineEvent::Select, |_| {});
    drop(owner);
    assert!(control.is_destroyed());
    assert!(api.is_destroyed());
    assert!(!disposer.dispose());
    api.scroll_next();
    assert!(control.commands().is_empty());
}
