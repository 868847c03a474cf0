use std::cmp::Ordering;

use super::domain::{InvestorRecord, Rank};
use super::normalizer::{parse_decorated_number, DecorationFormats};

struct Scored {
    record: InvestorRecord,
    rate: Option<u64>,
    amount: Option<u64>,
}

impl Scored {
    fn rankable(&self) -> bool {
        self.rate.is_some() && self.amount.is_some()
    }
}

/// Total-order the records and assign 1-based contiguous ranks.
///
/// A lower rate is the better offer; equal rates break toward the larger
/// amount. Records whose rate or amount fails to parse sort after every
/// rankable record, stay `Unranked`, and consume no numbered slot. The
/// returned order is the table's final row order.
pub(crate) fn rank_records(
    records: Vec<InvestorRecord>,
    formats: &DecorationFormats,
) -> Vec<InvestorRecord> {
    let mut scored: Vec<Scored> = records
        .into_iter()
        .map(|record| {
            let rate = parse_decorated_number(&record.rate);
            let amount = parse_decorated_number(&record.amount);
            Scored {
                record,
                rate,
                amount,
            }
        })
        .collect();

    scored.sort_by(compare);

    let mut next_rank = 0u32;
    scored
        .into_iter()
        .map(|mut entry| {
            entry.record.rank = if entry.rankable() {
                next_rank += 1;
                Rank::Assigned(next_rank)
            } else {
                Rank::Unranked
            };
            entry.record.rate = formats.render_rate(entry.rate);
            entry.record.amount = formats.render_amount(entry.amount);
            entry.record
        })
        .collect()
}

fn compare(a: &Scored, b: &Scored) -> Ordering {
    match (a.rankable(), b.rankable()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        // stable sort keeps unrankable records in input order
        (false, false) => Ordering::Equal,
        (true, true) => a.rate.cmp(&b.rate).then_with(|| b.amount.cmp(&a.amount)),
    }
}
