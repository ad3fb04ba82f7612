//! Owner lifetime interactions: cycles, re-resolution, nesting.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use weakify::prelude::*;

type Listener = Box<dyn Fn(u32)>;

/// Minimal callback registry standing in for a notification source.
#[derive(Default)]
struct Notifier {
    listeners: RefCell<Vec<Listener>>,
}

impl Notifier {
    fn listen(&self, listener: impl Fn(u32) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn notify(&self, value: u32) {
        for listener in self.listeners.borrow().iter() {
            listener(value);
        }
    }
}

struct Model {
    total: Cell<u32>,
    notifier: Notifier,
    dropped: Rc<Cell<bool>>,
}

impl Model {
    fn add(&self, n: u32) {
        self.total.set(self.total.get() + n);
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

fn model(dropped: &Rc<Cell<bool>>) -> Rc<Model> {
    Rc::new(Model {
        total: Cell::new(0),
        notifier: Notifier::default(),
        dropped: Rc::clone(dropped),
    })
}

#[test]
fn self_registration_does_not_leak() {
    let dropped = Rc::new(Cell::new(false));
    let model = model(&dropped);

    // The model's own notifier holds a callback into the model.
    model.notifier.listen(weakify_with(&model, Model::add));
    model.notifier.notify(3);
    model.notifier.notify(4);
    assert_eq!(model.total.get(), 7);
    assert_eq!(Rc::strong_count(&model), 1);

    drop(model);
    assert!(dropped.get());
}

#[test]
fn strong_capture_would_leak_for_contrast() {
    let dropped = Rc::new(Cell::new(false));
    let model = model(&dropped);

    let strong = Rc::clone(&model);
    model.notifier.listen(move |n| strong.add(n));
    assert_eq!(Rc::strong_count(&model), 2);

    let weak: Weak<Model> = Rc::downgrade(&model);
    drop(model);
    assert!(!dropped.get());
    assert!(weak.upgrade().is_some());

    // Break the cycle by hand so the test itself does not leak.
    if let Some(model) = weak.upgrade() {
        model.notifier.listeners.borrow_mut().clear();
    }
    assert!(dropped.get());
}

#[test]
fn concrete_release_scenario() {
    struct Thing;
    let owner = Rc::new(Thing);
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);

    let g = weakify_map(&owner, move |_: &Thing, n: i32| {
        seen.set(seen.get() + 1);
        n.to_string()
    });

    assert_eq!(g(123), Some("123".to_string()));
    assert_eq!(calls.get(), 1);

    drop(owner);
    assert_eq!(g(123), None);
    assert_eq!(calls.get(), 1);
}

#[test]
fn every_call_resolves_again() {
    let owner = Rc::new(RefCell::new(Vec::new()));
    let extra = Rc::clone(&owner);
    let push = weakify_with(&owner, |log: &RefCell<Vec<u32>>, n: u32| log.borrow_mut().push(n));

    push(1);
    drop(owner);
    // `extra` is still a strong owner.
    push(2);
    assert_eq!(*extra.borrow(), vec![1, 2]);

    let weak = Rc::downgrade(&extra);
    drop(extra);
    push(3);
    assert!(weak.upgrade().is_none());
}

#[test]
fn owner_released_before_first_call() {
    let owner = Rc::new(Cell::new(0));
    let bump = weakify(&owner, |c: &Cell<i32>| c.set(c.get() + 1));
    let weak = Rc::downgrade(&owner);
    drop(owner);
    for _ in 0..10 {
        bump();
    }
    assert!(weak.upgrade().is_none());
}

#[test]
fn clones_of_bound_share_owner_view() {
    let owner = Rc::new(Cell::new(0));
    let bound = owner.bind::<Unit, _>(|c: &Cell<i32>, n: i32| c.set(c.get() + n));
    let other = bound.clone();

    bound.call(1);
    other.call(2);
    assert_eq!(owner.get(), 3);

    drop(owner);
    assert!(!bound.is_live());
    assert!(!other.is_live());
}

#[test]
fn nested_binding_inside_bound_call() {
    let outer = Rc::new(Cell::new(0));
    let inner = Rc::new(Cell::new(0));
    let inner_for_f = Rc::clone(&inner);

    let make_inner = weakify_returning(&outer, move |o: &Cell<i32>| {
        o.set(o.get() + 1);
        weakify(&inner_for_f, |i: &Cell<i32>| i.set(i.get() + 10))
    });

    let bump_inner = make_inner().expect("outer owner alive");
    bump_inner();
    assert_eq!(outer.get(), 1);
    assert_eq!(inner.get(), 10);

    // The nested function only holds `inner` weakly as well.
    drop(make_inner);
    assert_eq!(Rc::strong_count(&inner), 1);
    drop(inner);
    bump_inner();
}

#[test]
fn call_live_separates_release_from_no_value() {
    let owner = Rc::new(());
    let bound = owner.bind::<Maybe, _>(|_: &(), n: i32| (n != 0).then_some(n));

    assert_eq!(bound.call(0), Some(None));
    assert_eq!(bound.call_live(0), Ok(None));

    drop(owner);
    assert_eq!(bound.call(0), None);
    assert!(bound.call_live(0).is_err());
}

#[test]
fn named_bound_reports_label() {
    let owner = Rc::new(0u8);
    let bound = owner.bind::<Unit, _>(|_: &u8, (): ()| {}).named("on_tick");
    drop(owner);

    let err = bound.owner().unwrap_err();
    assert_eq!(err, Expired::labeled("on_tick"));
    assert!(err.to_string().contains("on_tick"));
}
