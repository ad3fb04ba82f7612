//! Property-based invariants for bound functions over arbitrary call and
//! release schedules:
//!
//! 1. `f` runs exactly once per call made while the owner is alive.
//! 2. `f` never runs after the last strong owner is dropped.
//! 3. Live calls return `Some(f(x))`; released calls return `None`.
//! 4. Errors from `f` reach the caller unchanged; a released owner never
//!    produces an error.
//! 5. Cast arguments arrive present exactly when their type matches.
//! 6. Holding any number of bound functions never changes the owner's
//!    strong count.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use proptest::prelude::*;
use weakify::prelude::*;

struct Owner {
    calls: Cell<usize>,
}

fn owner() -> Rc<Owner> {
    Rc::new(Owner {
        calls: Cell::new(0),
    })
}

/// One step of a schedule: call with a value, or release one strong owner.
#[derive(Debug, Clone)]
enum Step {
    Call(i64),
    Release,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => any::<i64>().prop_map(Step::Call),
        1 => Just(Step::Release),
    ]
}

fn schedule_strategy(max_len: usize) -> impl Strategy<Value = Vec<Step>> {
    proptest::collection::vec(step_strategy(), 0..=max_len)
}

#[derive(Debug, Clone)]
enum Payload {
    Int(i32),
    Text(String),
    Float(f64),
}

fn payload_strategy() -> impl Strategy<Value = Payload> {
    prop_oneof![
        any::<i32>().prop_map(Payload::Int),
        ".{0,8}".prop_map(Payload::Text),
        any::<f64>().prop_map(Payload::Float),
    ]
}

proptest! {
    #[test]
    fn calls_delegate_until_release(
        schedule in schedule_strategy(64),
        extra_owners in 0usize..3,
    ) {
        let first = owner();
        let mut strong: Vec<Rc<Owner>> = (0..extra_owners).map(|_| Rc::clone(&first)).collect();
        strong.push(first);
        let watch = Rc::downgrade(&strong[0]);

        let g = weakify_map(&strong[0], |o: &Owner, x: i64| {
            o.calls.set(o.calls.get() + 1);
            x.wrapping_mul(2)
        });

        let mut expected_calls = 0usize;
        for step in schedule {
            match step {
                Step::Call(x) => {
                    let alive = !strong.is_empty();
                    let result = g(x);
                    if alive {
                        expected_calls += 1;
                        prop_assert_eq!(result, Some(x.wrapping_mul(2)));
                    } else {
                        prop_assert_eq!(result, None);
                    }
                }
                Step::Release => {
                    strong.pop();
                }
            }
            if let Some(live) = watch.upgrade() {
                prop_assert_eq!(live.calls.get(), expected_calls);
            }
        }
    }

    #[test]
    fn released_owner_never_runs_f(calls in 1usize..32) {
        let runs = Rc::new(Cell::new(0usize));
        let seen = Rc::clone(&runs);
        let o = owner();
        let g = weakify_ignoring(&o, move |_: &Owner| seen.set(seen.get() + 1));
        drop(o);
        for i in 0..calls {
            g(i);
        }
        prop_assert_eq!(runs.get(), 0);
    }

    #[test]
    fn errors_pass_through_unchanged(codes in proptest::collection::vec(any::<u16>(), 1..16)) {
        let o = owner();
        let g = try_weakify_map(&o, |_: &Owner, code: u16| {
            if code.is_multiple_of(2) { Ok(code) } else { Err(format!("odd {code}")) }
        });
        for &code in &codes {
            let expected = if code.is_multiple_of(2) { Ok(Some(code)) } else { Err(format!("odd {code}")) };
            prop_assert_eq!(g(code), expected);
        }
        drop(o);
        for &code in &codes {
            prop_assert_eq!(g(code), Ok(None));
        }
    }

    #[test]
    fn cast_presence_matches_type(payloads in proptest::collection::vec(payload_strategy(), 0..24)) {
        let o = owner();
        let received = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&received);
        let g = weakify_cast::<dyn Any, _, _, _>(&o, move |_: &Owner, n: Option<i32>| {
            log.borrow_mut().push(n);
        });

        for payload in &payloads {
            match payload {
                Payload::Int(n) => g(n as &dyn Any),
                Payload::Text(s) => g(s as &dyn Any),
                Payload::Float(f) => g(f as &dyn Any),
            }
        }

        let expected: Vec<Option<i32>> = payloads
            .iter()
            .map(|p| match p {
                Payload::Int(n) => Some(*n),
                Payload::Text(_) | Payload::Float(_) => None,
            })
            .collect();
        prop_assert_eq!(&*received.borrow(), &expected);
    }

    #[test]
    fn bound_functions_never_hold_owner(count in 0usize..16) {
        let o = owner();
        let bound: Vec<_> = (0..count)
            .map(|i| o.bind::<Maybe, _>(move |_: &Owner, x: usize| x + i))
            .collect();
        prop_assert_eq!(Rc::strong_count(&o), 1);
        prop_assert_eq!(Rc::weak_count(&o), count);
        drop(o);
        for b in &bound {
            prop_assert!(!b.is_live());
            prop_assert_eq!(b.call(1), None);
        }
    }
}
