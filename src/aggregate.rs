//! Group-by aggregation over borrowed sales rows.
//!
//! Groups come back in ascending key order (`BTreeMap`), which is the order
//! charts plot them in. Groups with no rows are simply absent.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::domain::{Month, SalesRecord};

/// Reduction applied to each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Mean,
    Sum,
}

#[derive(Debug, Clone, Copy, Default)]
struct Accum {
    sum: f64,
    count: usize,
}

impl Accum {
    fn push(&mut self, value: f64) {
        // Non-finite cells are skipped, like a NaN-skipping dataframe reduction.
        if value.is_finite() {
            self.sum += value;
            self.count += 1;
        }
    }

    fn finish(self, agg: Agg) -> f64 {
        match agg {
            Agg::Sum => self.sum,
            Agg::Mean if self.count == 0 => f64::NAN,
            Agg::Mean => self.sum / self.count as f64,
        }
    }
}

/// Aggregate `value` per `key` over `rows`, ascending by key.
pub fn group_by<'a, K, I, FK, FV>(rows: I, key: FK, value: FV, agg: Agg) -> Vec<(K, f64)>
where
    K: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
    FK: Fn(&SalesRecord) -> K,
    FV: Fn(&SalesRecord) -> f64,
{
    let mut groups: BTreeMap<K, Accum> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(value(row));
    }
    groups
        .into_iter()
        .map(|(k, acc)| (k, acc.finish(agg)))
        .collect()
}

/// Mean `Automobile_Sales` per `Year`.
pub fn mean_sales_by_year<'a>(rows: impl IntoIterator<Item = &'a SalesRecord>) -> Vec<(i32, f64)> {
    group_by(rows, |r| r.year, |r| r.automobile_sales, Agg::Mean)
}

/// Total `Automobile_Sales` per `Month`.
pub fn total_sales_by_month<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
) -> Vec<(Month, f64)> {
    group_by(rows, |r| r.month, |r| r.automobile_sales, Agg::Sum)
}

/// Mean `Automobile_Sales` per `Vehicle_Type`.
pub fn mean_sales_by_vehicle<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
) -> Vec<(String, f64)> {
    group_by(rows, |r| r.vehicle_type.clone(), |r| r.automobile_sales, Agg::Mean)
}

/// Total `Advertising_Expenditure` per `Vehicle_Type`.
pub fn total_advertising_by_vehicle<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
) -> Vec<(String, f64)> {
    group_by(
        rows,
        |r| r.vehicle_type.clone(),
        |r| r.advertising_expenditure,
        Agg::Sum,
    )
}

/// Mean `Automobile_Sales` per (`unemployment_rate`, `Vehicle_Type`).
pub fn mean_sales_by_unemployment_and_vehicle<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
) -> Vec<((f64, String), f64)> {
    group_by(
        rows,
        |r| (OrderedFloat(r.unemployment_rate), r.vehicle_type.clone()),
        |r| r.automobile_sales,
        Agg::Mean,
    )
    .into_iter()
    .map(|((rate, vehicle), v)| ((rate.into_inner(), vehicle), v))
    .collect()
}
