// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::PropertyRecord;

/// Gross-yield band used by the distribution chart. Upper bounds are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YieldBucket {
    UpTo3,
    From3To4,
    From4To5,
    From5To6,
    From6To7,
    Over7,
}

impl YieldBucket {
    pub const ALL: [Self; 6] = [
        Self::UpTo3,
        Self::From3To4,
        Self::From4To5,
        Self::From5To6,
        Self::From6To7,
        Self::Over7,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo3 => "<=3%",
            Self::From3To4 => "3–4%",
            Self::From4To5 => "4–5%",
            Self::From5To6 => "5–6%",
            Self::From6To7 => "6–7%",
            Self::Over7 => ">=7%",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::UpTo3 => 0,
            Self::From3To4 => 1,
            Self::From4To5 => 2,
            Self::From5To6 => 3,
            Self::From6To7 => 4,
            Self::Over7 => 5,
        }
    }

    /// Returns `None` for NaN and infinities; every finite value has a bucket.
    pub fn classify(pct: f64) -> Option<Self> {
        if !pct.is_finite() {
            return None;
        }
        let bucket = if pct <= 3.0 {
            Self::UpTo3
        } else if pct <= 4.0 {
            Self::From3To4
        } else if pct <= 5.0 {
            Self::From4To5
        } else if pct <= 6.0 {
            Self::From5To6
        } else if pct <= 7.0 {
            Self::From6To7
        } else {
            Self::Over7
        };
        Some(bucket)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YieldHistogram {
    counts: [u64; 6],
}

impl YieldHistogram {
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        Self::from_yields(records.iter().map(|record| record.gross_yield_pct))
    }

    pub fn from_yields<I>(yields: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut histogram = Self::default();
        for bucket in yields
            .into_iter()
            .flatten()
            .filter_map(YieldBucket::classify)
        {
            histogram.counts[bucket.index()] += 1;
        }
        histogram
    }

    pub const fn count(&self, bucket: YieldBucket) -> u64 {
        self.counts[bucket.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Label/count pairs in chart order, zero buckets included.
    pub fn entries(&self) -> [(&'static str, u64); 6] {
        YieldBucket::ALL.map(|bucket| (bucket.label(), self.count(bucket)))
    }
}

#[cfg(test)]
mod tests {
    use super::{YieldBucket, YieldHistogram};
    use crate::PropertyRecord;

    #[test]
    fn boundaries_close_on_the_upper_edge() {
        assert_eq!(YieldBucket::classify(3.0), Some(YieldBucket::UpTo3));
        assert_eq!(YieldBucket::classify(3.0001), Some(YieldBucket::From3To4));
        assert_eq!(YieldBucket::classify(4.0), Some(YieldBucket::From3To4));
        assert_eq!(YieldBucket::classify(5.0), Some(YieldBucket::From4To5));
        assert_eq!(YieldBucket::classify(6.0), Some(YieldBucket::From5To6));
        assert_eq!(YieldBucket::classify(7.0), Some(YieldBucket::From6To7));
        assert_eq!(YieldBucket::classify(7.0001), Some(YieldBucket::Over7));
    }

    #[test]
    fn extremes_and_zero_still_land_in_a_bucket() {
        assert_eq!(YieldBucket::classify(0.0), Some(YieldBucket::UpTo3));
        assert_eq!(YieldBucket::classify(-2.5), Some(YieldBucket::UpTo3));
        assert_eq!(YieldBucket::classify(1e9), Some(YieldBucket::Over7));
        assert_eq!(YieldBucket::classify(f64::NAN), None);
        assert_eq!(YieldBucket::classify(f64::INFINITY), None);
    }

    #[test]
    fn every_sampled_value_hits_exactly_one_bucket() {
        let mut value = -1.0;
        while value <= 9.0 {
            let bucket = YieldBucket::classify(value).expect("finite value has a bucket");
            let matches = YieldBucket::ALL
                .iter()
                .filter(|candidate| **candidate == bucket)
                .count();
            assert_eq!(matches, 1);
            value += 0.037;
        }
    }

    #[test]
    fn labels_keep_chart_order() {
        let labels = YieldBucket::ALL.map(YieldBucket::label);
        assert_eq!(labels, ["<=3%", "3–4%", "4–5%", "5–6%", "6–7%", ">=7%"]);
        for (position, bucket) in YieldBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), position);
        }
    }

    #[test]
    fn histogram_skips_missing_yields() {
        let histogram = YieldHistogram::from_yields([
            Some(2.1),
            None,
            Some(4.68),
            Some(4.9),
            Some(f64::NAN),
            Some(8.0),
        ]);
        assert_eq!(histogram.count(YieldBucket::UpTo3), 1);
        assert_eq!(histogram.count(YieldBucket::From4To5), 2);
        assert_eq!(histogram.count(YieldBucket::Over7), 1);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn histogram_total_matches_records_with_yield() {
        let records = (0_i64..40)
            .map(|index| {
                let mut record = PropertyRecord::new(index, format!("{index} Sample St"));
                if index % 3 != 0 {
                    record.gross_yield_pct = Some(f64::from(index as u32) * 0.25);
                }
                record
            })
            .collect::<Vec<_>>();
        let with_yield = records
            .iter()
            .filter(|record| record.gross_yield_pct.is_some())
            .count() as u64;

        let histogram = YieldHistogram::from_records(&records);
        assert_eq!(histogram.total(), with_yield);
    }

    #[test]
    fn empty_input_yields_six_zero_entries() {
        let histogram = YieldHistogram::from_records(&[]);
        let entries = histogram.entries();
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|(_, count)| *count == 0));
        assert_eq!(entries[0].0, "<=3%");
        assert_eq!(entries[5].0, ">=7%");
    }
}
