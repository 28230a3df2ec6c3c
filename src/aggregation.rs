//! Read-only aggregations over a ledger's transactions.
//!
//! Every function here is a plain reduction over
//! [TransactionStore::get_query] results: nothing is cached, every call
//! recomputes from the store and therefore always reflects the latest
//! committed state. That trades query cost for perfect consistency, which
//! is fine at personal-finance data volumes.
//!
//! Aggregation trusts the store and never re-validates records: unknown or
//! removed tags still contribute to breakdowns, and amounts are summed
//! as-is even if a legacy record holds a non-positive value.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    ops::RangeInclusive,
};

use time::{Date, Duration, Month, PrimitiveDateTime, Time};

use crate::{
    Error,
    stores::{TransactionQuery, TransactionStore},
};

/// The inclusive date-time bounds of a calendar month.
///
/// The end bound is the first instant of the following month minus one
/// second, so a record stamped at the month's last second falls inside the
/// range and one at the next month's first second falls outside it.
/// December rolls over into January of the following year.
pub fn month_bounds(
    year: i32,
    month: Month,
) -> Result<(PrimitiveDateTime, PrimitiveDateTime), Error> {
    let start = PrimitiveDateTime::new(Date::from_calendar_date(year, month, 1)?, Time::MIDNIGHT);

    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        month => (year, month.next()),
    };
    let next_month_start = PrimitiveDateTime::new(
        Date::from_calendar_date(next_year, next_month, 1)?,
        Time::MIDNIGHT,
    );

    Ok((start, next_month_start - Duration::seconds(1)))
}

/// The sum of amounts for records dated within the given month.
pub fn monthly_total<S: TransactionStore>(
    store: &S,
    year: i32,
    month: Month,
) -> Result<f64, Error> {
    let (start, end) = month_bounds(year, month)?;

    period_total(store, Some(start..=end))
}

/// The sum of amounts for records dated within the month containing `now`.
pub fn current_month_total<S: TransactionStore>(
    store: &S,
    now: PrimitiveDateTime,
) -> Result<f64, Error> {
    monthly_total(store, now.year(), now.month())
}

/// The sum of amounts for records within an optional inclusive date range.
///
/// `None` means all time. An empty window sums to zero, never an error.
pub fn period_total<S: TransactionStore>(
    store: &S,
    date_range: Option<RangeInclusive<PrimitiveDateTime>>,
) -> Result<f64, Error> {
    let transactions = store.get_query(TransactionQuery {
        date_range,
        ..TransactionQuery::default()
    })?;

    Ok(transactions.iter().map(|transaction| transaction.amount).sum())
}

/// Monthly totals for every month of `year`.
///
/// Always returns exactly 12 entries in calendar order, with zero for
/// months that have no records.
pub fn yearly_monthly_totals<S: TransactionStore>(
    store: &S,
    year: i32,
) -> Result<Vec<(Month, f64)>, Error> {
    (1..=12u8)
        .map(|number| {
            let month = Month::try_from(number)?;
            let total = monthly_total(store, year, month)?;

            Ok((month, total))
        })
        .collect()
}

/// Per-tag totals for records dated within `[start, end]`.
///
/// Every tag in `seed_tags` (the current effective lookup list) appears in
/// the result, at zero if unused. Records whose tag is no longer in the
/// list still contribute under their own key: removing a category must
/// never make its historical spend vanish from breakdowns.
pub fn tag_breakdown<S: TransactionStore>(
    store: &S,
    seed_tags: &[String],
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> Result<HashMap<String, f64>, Error> {
    let mut breakdown: HashMap<String, f64> =
        seed_tags.iter().map(|tag| (tag.clone(), 0.0)).collect();

    let transactions = store.get_query(TransactionQuery {
        date_range: Some(start..=end),
        ..TransactionQuery::default()
    })?;

    for transaction in transactions {
        *breakdown.entry(transaction.tag).or_insert(0.0) += transaction.amount;
    }

    Ok(breakdown)
}

/// Per-day totals for records dated within `[start, end]`, sorted by day
/// ascending.
///
/// Records are grouped by calendar date with the time component discarded.
/// An empty window yields an empty vector; callers distinguish "no data"
/// from an error.
pub fn daily_totals<S: TransactionStore>(
    store: &S,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> Result<Vec<(Date, f64)>, Error> {
    let transactions = store.get_query(TransactionQuery {
        date_range: Some(start..=end),
        ..TransactionQuery::default()
    })?;

    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.date.date()).or_insert(0.0) += transaction.amount;
    }

    Ok(totals.into_iter().collect())
}

/// The distinct years present in the store, newest first.
///
/// An empty store yields `[today.year()]` so the caller always has at
/// least one selectable year.
pub fn available_years<S: TransactionStore>(store: &S, today: Date) -> Result<Vec<i32>, Error> {
    let transactions = store.get_query(TransactionQuery::default())?;

    let years: BTreeSet<i32> = transactions
        .iter()
        .map(|transaction| transaction.date.year())
        .collect();

    if years.is_empty() {
        return Ok(vec![today.year()]);
    }

    Ok(years.into_iter().rev().collect())
}

/// The distinct (year, month) pairs present in the store, newest first.
///
/// An empty store yields the pair for `today`, never an empty result.
pub fn available_year_months<S: TransactionStore>(
    store: &S,
    today: Date,
) -> Result<Vec<(i32, u8)>, Error> {
    let transactions = store.get_query(TransactionQuery::default())?;

    let year_months: BTreeSet<(i32, u8)> = transactions
        .iter()
        .map(|transaction| {
            let date = transaction.date.date();
            (date.year(), u8::from(date.month()))
        })
        .collect();

    if year_months.is_empty() {
        return Ok(vec![(today.year(), u8::from(today.month()))]);
    }

    Ok(year_months.into_iter().rev().collect())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::{date, datetime};

    use crate::{
        Ledger,
        db::initialize,
        stores::sqlite::SqliteTransactionStore,
        transaction::Transaction,
    };

    use super::*;

    fn get_test_store() -> SqliteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");

        SqliteTransactionStore::new(Arc::new(Mutex::new(connection)), Ledger::Expense)
    }

    fn create(store: &mut SqliteTransactionStore, amount: f64, date: PrimitiveDateTime, tag: &str) {
        store
            .create(Transaction::build(amount, date, tag))
            .expect("Could not create transaction");
    }

    #[test]
    fn month_bounds_cover_the_whole_month() {
        let (start, end) = month_bounds(2024, Month::March).unwrap();

        assert_eq!(start, datetime!(2024-03-01 0:00:00));
        assert_eq!(end, datetime!(2024-03-31 23:59:59));
    }

    #[test]
    fn month_bounds_roll_december_into_next_year() {
        let (start, end) = month_bounds(2024, Month::December).unwrap();

        assert_eq!(start, datetime!(2024-12-01 0:00:00));
        assert_eq!(end, datetime!(2024-12-31 23:59:59));
    }

    #[test]
    fn monthly_total_sums_records_in_the_month() {
        let mut store = get_test_store();
        create(&mut store, 500.0, datetime!(2024-03-15 10:00:00), "Food");
        create(&mut store, 300.0, datetime!(2024-03-20 18:30:00), "Food");
        create(&mut store, 99.0, datetime!(2024-04-01 0:00:00), "Food");

        let total = monthly_total(&store, 2024, Month::March).unwrap();

        assert_eq!(total, 800.0);
    }

    #[test]
    fn monthly_total_includes_last_second_excludes_next_month() {
        let mut store = get_test_store();
        create(&mut store, 10.0, datetime!(2024-02-29 23:59:59), "Food");
        create(&mut store, 20.0, datetime!(2024-03-01 0:00:00), "Food");

        assert_eq!(monthly_total(&store, 2024, Month::February).unwrap(), 10.0);
        assert_eq!(monthly_total(&store, 2024, Month::March).unwrap(), 20.0);
    }

    #[test]
    fn monthly_total_is_zero_for_empty_months() {
        let store = get_test_store();

        assert_eq!(monthly_total(&store, 2024, Month::June).unwrap(), 0.0);
    }

    #[test]
    fn monthly_total_sums_non_positive_amounts_as_is() {
        // Validated writes never produce them, but aggregation trusts the
        // store rather than re-validating.
        let mut store = get_test_store();
        create(&mut store, 100.0, datetime!(2024-03-10 9:00:00), "Food");
        create(&mut store, -40.0, datetime!(2024-03-11 9:00:00), "Food");

        assert_eq!(monthly_total(&store, 2024, Month::March).unwrap(), 60.0);
    }

    #[test]
    fn current_month_total_uses_the_month_of_now() {
        let mut store = get_test_store();
        create(&mut store, 75.0, datetime!(2024-03-10 9:00:00), "Food");
        create(&mut store, 25.0, datetime!(2024-02-10 9:00:00), "Food");

        let total = current_month_total(&store, datetime!(2024-03-15 12:00:00)).unwrap();

        assert_eq!(total, 75.0);
    }

    #[test]
    fn yearly_monthly_totals_has_exactly_twelve_entries() {
        let mut store = get_test_store();
        create(&mut store, 100.0, datetime!(2024-01-15 9:00:00), "Food");
        create(&mut store, 50.0, datetime!(2024-12-31 23:59:59), "Food");

        let totals = yearly_monthly_totals(&store, 2024).unwrap();

        assert_eq!(totals.len(), 12);
        assert_eq!(totals[0], (Month::January, 100.0));
        assert_eq!(totals[11], (Month::December, 50.0));
        assert!(totals[1..11].iter().all(|(_, total)| *total == 0.0));
        let year_total: f64 = totals.iter().map(|(_, total)| total).sum();
        assert_eq!(year_total, 150.0);
    }

    #[test]
    fn period_total_without_range_sums_all_time() {
        let mut store = get_test_store();
        create(&mut store, 1.0, datetime!(2020-06-15 9:00:00), "Food");
        create(&mut store, 2.0, datetime!(2024-06-15 9:00:00), "Food");

        assert_eq!(period_total(&store, None).unwrap(), 3.0);
    }

    #[test]
    fn tag_breakdown_seeds_every_current_tag_at_zero() {
        let mut store = get_test_store();
        create(&mut store, 500.0, datetime!(2024-03-15 9:00:00), "Food");
        let seed = vec!["Food".to_owned(), "Transport".to_owned()];

        let breakdown = tag_breakdown(
            &store,
            &seed,
            datetime!(2024-03-01 0:00:00),
            datetime!(2024-03-31 23:59:59),
        )
        .unwrap();

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown["Food"], 500.0);
        assert_eq!(breakdown["Transport"], 0.0);
    }

    #[test]
    fn tag_breakdown_keeps_legacy_tags() {
        // "Gym" is not in the current list, e.g. a category removed after
        // the record was written. Its spend must not vanish.
        let mut store = get_test_store();
        create(&mut store, 45.0, datetime!(2024-03-02 9:00:00), "Gym");
        create(&mut store, 500.0, datetime!(2024-03-15 9:00:00), "Food");
        let seed = vec!["Food".to_owned()];

        let breakdown = tag_breakdown(
            &store,
            &seed,
            datetime!(2024-03-01 0:00:00),
            datetime!(2024-03-31 23:59:59),
        )
        .unwrap();

        assert_eq!(breakdown["Gym"], 45.0);
        assert_eq!(breakdown["Food"], 500.0);
    }

    #[test]
    fn daily_totals_groups_by_calendar_date_ascending() {
        let mut store = get_test_store();
        create(&mut store, 500.0, datetime!(2024-03-15 10:00:00), "Food");
        create(&mut store, 300.0, datetime!(2024-03-20 18:30:00), "Food");
        create(&mut store, 200.0, datetime!(2024-03-15 22:00:00), "Transport");

        let totals = daily_totals(
            &store,
            datetime!(2024-03-01 0:00:00),
            datetime!(2024-03-31 23:59:59),
        )
        .unwrap();

        assert_eq!(
            totals,
            vec![(date!(2024-03-15), 700.0), (date!(2024-03-20), 300.0)]
        );
    }

    #[test]
    fn daily_totals_over_empty_window_is_empty_not_an_error() {
        let store = get_test_store();

        let totals = daily_totals(
            &store,
            datetime!(2024-03-01 0:00:00),
            datetime!(2024-03-31 23:59:59),
        )
        .unwrap();

        assert!(totals.is_empty());
    }

    #[test]
    fn daily_totals_permits_a_future_end_date() {
        // Only write-time validation enforces the no-future-date rule.
        let mut store = get_test_store();
        create(&mut store, 500.0, datetime!(2024-03-15 10:00:00), "Food");

        let totals = daily_totals(
            &store,
            datetime!(2024-03-01 0:00:00),
            datetime!(2999-12-31 23:59:59),
        )
        .unwrap();

        assert_eq!(totals, vec![(date!(2024-03-15), 500.0)]);
    }

    #[test]
    fn available_years_are_distinct_and_newest_first() {
        let mut store = get_test_store();
        create(&mut store, 1.0, datetime!(2022-06-15 9:00:00), "Food");
        create(&mut store, 2.0, datetime!(2024-06-15 9:00:00), "Food");
        create(&mut store, 3.0, datetime!(2022-01-15 9:00:00), "Food");

        let years = available_years(&store, date!(2024-08-01)).unwrap();

        assert_eq!(years, vec![2024, 2022]);
    }

    #[test]
    fn available_years_fall_back_to_the_current_year() {
        let store = get_test_store();

        let years = available_years(&store, date!(2024-08-01)).unwrap();

        assert_eq!(years, vec![2024]);
    }

    #[test]
    fn available_year_months_are_distinct_and_newest_first() {
        let mut store = get_test_store();
        create(&mut store, 1.0, datetime!(2024-01-15 9:00:00), "Food");
        create(&mut store, 2.0, datetime!(2024-03-15 9:00:00), "Food");
        create(&mut store, 3.0, datetime!(2024-01-20 9:00:00), "Food");
        create(&mut store, 4.0, datetime!(2023-12-31 9:00:00), "Food");

        let year_months = available_year_months(&store, date!(2024-08-01)).unwrap();

        assert_eq!(year_months, vec![(2024, 3), (2024, 1), (2023, 12)]);
    }

    #[test]
    fn available_year_months_fall_back_to_the_current_pair() {
        let store = get_test_store();

        let year_months = available_year_months(&store, date!(2024-08-01)).unwrap();

        assert_eq!(year_months, vec![(2024, 8)]);
    }
}
