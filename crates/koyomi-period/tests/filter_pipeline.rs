//! Filter-chain behavior: memoization, labels, named predicates, failure.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use chrono::NaiveDate;

use koyomi_period::{
    CalendarStep, FilterEntry, FilterQuery, Period, PeriodError, PredicateArg, PredicateSpec,
    TemporalError, Verdict,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test_log::test]
fn stateful_filter_sees_each_position_exactly_once() -> Result<()> {
    let calls = Rc::new(Cell::new(0_u32));
    let reject_next = Rc::new(Cell::new(false));

    let mut period = Period::between(date(2018, 4, 16), date(2018, 4, 20), CalendarStep::days(1));
    period.add_filter(PredicateSpec::callable({
        let calls = Rc::clone(&calls);
        let reject_next = Rc::clone(&reject_next);
        move |_, _, _| {
            calls.set(calls.get() + 1);
            let reject = reject_next.get();
            reject_next.set(!reject);
            if reject { Verdict::Reject } else { Verdict::Accept }
        }
    }));

    let mut iter = period.iter();
    let mut emitted = Vec::new();
    while iter.has_next() {
        // Repeated probes at the same position must reuse the cached verdict.
        assert!(iter.has_next());
        if let Some(value) = iter.next() {
            emitted.push(value?);
        }
    }

    assert_eq!(
        emitted,
        [date(2018, 4, 16), date(2018, 4, 18), date(2018, 4, 20)],
    );
    // One call per candidate within the bound: 3 accepted + 2 rejected. The
    // candidate past the bound never reaches the user filter.
    assert_eq!(calls.get(), 5);
    Ok(())
}

#[test_log::test]
fn terminate_at_first_candidate_yields_empty_sequence() -> Result<()> {
    let mut period = Period::new(date(2018, 4, 16), CalendarStep::days(1));
    period.add_filter(PredicateSpec::TerminateNow);

    let emitted: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
    assert!(emitted.is_empty());
    Ok(())
}

#[test_log::test]
fn always_rejecting_filter_fails_instead_of_looping() {
    let mut period = Period::between(date(2018, 4, 16), date(2018, 7, 15), CalendarStep::days(1));
    period
        .set_max_search_attempts(32)
        .add_filter(PredicateSpec::callable(|_, _, _| Verdict::Reject));

    let mut iter = period.iter();
    // A pending failure still reports true; the error surfaces on the pull.
    assert!(iter.has_next());
    let err = iter.next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        PeriodError::NoValidCandidate { attempts: 32 }
    ));
    assert!(iter.next().is_none());
}

#[test_log::test]
fn remove_by_label_removes_all_matches_in_order() -> Result<()> {
    let keep = PredicateSpec::callable(|_, _, _| Verdict::Accept);
    let mut period = Period::recurring(date(2018, 4, 16), CalendarStep::days(1), 2);
    period
        .add_labeled_filter(PredicateSpec::callable(|_, _, _| Verdict::Reject), "noisy")
        .add_filter(keep.clone())
        .add_labeled_filter(PredicateSpec::TerminateNow, "noisy");

    assert!(period.has_filter("noisy"));
    period.remove_filter("noisy");
    assert!(!period.has_filter("noisy"));

    // Remaining entries keep their relative order: recurrence, then keep.
    assert_eq!(period.filters().len(), 2);
    assert!(period.filters()[0].is_builtin());
    assert_eq!(period.filters()[1].spec(), &keep);

    let emitted: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
    assert_eq!(emitted, [date(2018, 4, 16), date(2018, 4, 17)]);
    Ok(())
}

#[test_log::test]
fn remove_by_spec_uses_structural_equality() {
    let mut period = Period::new(date(2018, 4, 16), CalendarStep::days(1));
    period
        .add_filter(PredicateSpec::named("is_weekend", vec![]))
        .add_filter(PredicateSpec::named("is_weekend", vec![]));

    let query = PredicateSpec::named("is_weekend", vec![]);
    assert!(period.has_filter(&query));
    period.remove_filter(&query);
    assert!(!period.has_filter(&query));
    assert!(period.filters().is_empty());
}

#[test_log::test]
fn reset_filters_reconstructs_builtins_only() -> Result<()> {
    let mut period = Period::between(date(2018, 4, 16), date(2018, 4, 18), CalendarStep::days(1));
    period
        .set_recurrence_count(Some(2))
        .add_filter(PredicateSpec::callable(|_, _, _| Verdict::Reject))
        .add_labeled_filter(PredicateSpec::TerminateNow, "stop");

    period.reset_filters();
    period.reset_filters();

    assert_eq!(period.filters().len(), 2);
    assert_eq!(period.end_bound(), Some(&date(2018, 4, 18)));
    assert_eq!(period.recurrence_count(), Some(2));

    let emitted: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
    assert_eq!(emitted, [date(2018, 4, 16), date(2018, 4, 17)]);
    Ok(())
}

#[test_log::test]
fn named_predicates_gate_candidates() -> Result<()> {
    // 2018-04-14 was a Saturday.
    let mut period = Period::between(date(2018, 4, 14), date(2018, 4, 22), CalendarStep::days(1));
    period.add_filter(PredicateSpec::named("is_weekend", vec![]));

    let emitted: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
    assert_eq!(
        emitted,
        [
            date(2018, 4, 14),
            date(2018, 4, 15),
            date(2018, 4, 21),
            date(2018, 4, 22),
        ],
    );
    Ok(())
}

#[test_log::test]
fn named_predicates_accept_bound_arguments() -> Result<()> {
    // Every Wednesday (day 3) in a two-week window.
    let mut period = Period::between(date(2018, 4, 16), date(2018, 4, 29), CalendarStep::days(1));
    period.add_filter(PredicateSpec::named(
        "is_day_of_week",
        vec![PredicateArg::Int(3)],
    ));

    let emitted: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
    assert_eq!(emitted, [date(2018, 4, 18), date(2018, 4, 25)]);
    Ok(())
}

#[test_log::test]
fn unknown_resolved_predicate_ends_the_traversal() {
    let mut period = Period::between(date(2018, 4, 16), date(2018, 4, 20), CalendarStep::days(1));
    period.add_filter(PredicateSpec::named("is_blue_moon", vec![]));

    let err = period.iter().next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        PeriodError::Temporal(TemporalError::UnknownPredicate(name)) if name == "is_blue_moon"
    ));
}

#[test_log::test]
fn non_predicate_names_are_inert_but_tracked() -> Result<()> {
    let opaque = PredicateSpec::named("favorites", vec![PredicateArg::from("mine")]);
    let mut period = Period::recurring(date(2018, 4, 16), CalendarStep::days(1), 2);
    period.add_filter(opaque.clone());

    assert!(period.has_filter(&opaque));
    assert!(matches!(
        period.filters().last().map(FilterEntry::spec),
        Some(PredicateSpec::Opaque { .. })
    ));

    // Present in the chain, but never gates anything.
    let emitted: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
    assert_eq!(emitted, [date(2018, 4, 16), date(2018, 4, 17)]);

    period.remove_filter(FilterQuery::from(&opaque));
    assert!(period.filters().iter().all(FilterEntry::is_builtin));
    Ok(())
}

#[test_log::test]
fn prepended_filter_runs_before_builtins() -> Result<()> {
    let order = Rc::new(Cell::new(0_u32));
    let mut period = Period::between(date(2018, 4, 16), date(2018, 4, 18), CalendarStep::days(1));
    period.prepend_filter(PredicateSpec::callable({
        let order = Rc::clone(&order);
        move |_, _, _| {
            order.set(order.get() + 1);
            Verdict::Accept
        }
    }));

    assert!(!period.filters()[0].is_builtin());
    let emitted: Vec<NaiveDate> = period.iter().collect::<Result<_, _>>()?;
    assert_eq!(emitted.len(), 3);
    // Called for every candidate the chain saw, including the terminating one.
    assert_eq!(order.get(), 4);
    Ok(())
}
