// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use propdash_app::{DomBand, DomMix, PropertyId, PropertyRecord, SummaryStats};

const SUBURBS: [(&str, &str, &str); 10] = [
    ("Richmond", "VIC", "3121"),
    ("Parramatta", "NSW", "2150"),
    ("Carindale", "QLD", "4152"),
    ("Fremantle", "WA", "6160"),
    ("Glenelg", "SA", "5045"),
    ("Sandy Bay", "TAS", "7005"),
    ("Braddon", "ACT", "2612"),
    ("Nightcliff", "NT", "0810"),
    ("Footscray", "VIC", "3011"),
    ("Newtown", "NSW", "2042"),
];

const STREET_NAMES: [&str; 12] = [
    "Smith", "George", "Jones", "High", "Church", "Station", "Victoria", "Albert", "King",
    "Queen", "Bridge", "Park",
];

const STREET_KINDS: [&str; 5] = ["St", "Ave", "Rd", "Pde", "Cres"];

/// The three listings the backend serves when no upstream sandbox is set.
/// Yield and DOM band are left for [`enrich`] to fill in.
pub fn demo_listings() -> Vec<PropertyRecord> {
    vec![
        listing(
            "prop_001",
            "12 Smith St, Richmond VIC 3121",
            (3, 2, 1),
            1_250_000.0,
            850.0,
            ("Richmond", "VIC"),
            21,
        ),
        listing(
            "prop_002",
            "8 George St, Parramatta NSW 2150",
            (2, 2, 1),
            780_000.0,
            650.0,
            ("Parramatta", "NSW"),
            55,
        ),
        listing(
            "prop_003",
            "5 Jones Ave, Carindale QLD 4152",
            (4, 2, 2),
            985_000.0,
            780.0,
            ("Carindale", "QLD"),
            33,
        ),
    ]
}

/// Demo listings with yield and band populated, as `/api/properties` returns them.
pub fn demo_properties() -> Vec<PropertyRecord> {
    demo_listings().into_iter().map(enrich).collect()
}

pub fn enrich(mut record: PropertyRecord) -> PropertyRecord {
    record.gross_yield_pct = gross_yield(record.weekly_rent_estimate, record.listed_price);
    record.dom_risk_band = dom_band(record.days_on_market).map(|band| band.as_str().to_owned());
    record
}

/// Annualised weekly rent as a percentage of price, rounded to 2 places.
/// Missing or zero inputs have no yield.
pub fn gross_yield(weekly_rent: Option<f64>, listed_price: Option<f64>) -> Option<f64> {
    let rent = weekly_rent.filter(|rent| *rent != 0.0)?;
    let price = listed_price.filter(|price| *price > 0.0)?;
    Some(round2(rent * 52.0 / price * 100.0))
}

pub fn dom_band(days_on_market: Option<u32>) -> Option<DomBand> {
    let days = days_on_market?;
    let band = if days < 21 {
        DomBand::Fast
    } else if days <= 45 {
        DomBand::Average
    } else {
        DomBand::Slow
    };
    Some(band)
}

/// Summary over enriched records, using the same percentile picks as
/// `/api/insights/summary`.
pub fn summarize(records: &[PropertyRecord]) -> SummaryStats {
    let mut yields = records
        .iter()
        .filter_map(|record| record.gross_yield_pct)
        .collect::<Vec<_>>();
    yields.sort_by(f64::total_cmp);

    let mut dom_mix = DomMix::default();
    for band in records.iter().filter_map(PropertyRecord::band) {
        dom_mix.increment(band);
    }

    let (yield_avg, yield_p25, yield_p75) = if yields.is_empty() {
        (None, None, None)
    } else {
        let len = yields.len();
        let avg = yields.iter().sum::<f64>() / len as f64;
        let p25_index = (len / 4).saturating_sub(1);
        let p75_index = (len * 3 / 4).min(len - 1);
        (
            Some(round2(avg)),
            Some(round2(yields[p25_index])),
            Some(round2(yields[p75_index])),
        )
    };

    SummaryStats {
        count: records.len() as u64,
        yield_avg,
        yield_p25,
        yield_p75,
        dom_mix,
    }
}

/// Rule-of-thumb coaching text, used when no advice backend is reachable.
pub fn heuristic_advice(record: &PropertyRecord) -> String {
    let yield_pct = record.gross_yield_pct.unwrap_or(0.0);
    let mut notes = Vec::new();
    if yield_pct >= 5.5 {
        notes.push("Strong cash flow (gross yield ≥ 5.5%).");
    } else if yield_pct >= 4.5 {
        notes.push("Balanced yield; negotiate or uplift rent via minor works.");
    } else {
        notes.push("Low gross yield; growth story must justify entry.");
    }
    match record.band() {
        Some(DomBand::Fast) => notes.push("Liquid market; lower resale risk."),
        Some(DomBand::Slow) => notes.push("Slower resale; price in longer selling time."),
        Some(DomBand::Average) | None => {}
    }
    if record.bedrooms.unwrap_or(0) >= 3 && record.car_spaces.unwrap_or(0) >= 2 {
        notes.push("Family spec; check school catchments for demand uplift.");
    }
    notes.join(" ")
}

/// Single-listing fixture with every field populated.
pub fn sample_record() -> PropertyRecord {
    let mut record = PropertyRecord::new(1_i64, "1 Test St");
    record.bedrooms = Some(3);
    record.bathrooms = Some(1);
    record.car_spaces = Some(1);
    record.listed_price = Some(500_000.0);
    record.weekly_rent_estimate = Some(450.0);
    record.gross_yield_pct = Some(4.68);
    record.days_on_market = Some(20);
    record.dom_risk_band = Some(DomBand::Average.as_str().to_owned());
    record
}

pub fn sample_summary() -> SummaryStats {
    SummaryStats {
        count: 1,
        yield_avg: Some(4.68),
        yield_p25: Some(4.68),
        yield_p75: Some(4.68),
        dom_mix: DomMix {
            fast: 0,
            average: 1,
            slow: 0,
        },
    }
}

fn listing(
    id: &str,
    address: &str,
    (bedrooms, bathrooms, car_spaces): (u32, u32, u32),
    listed_price: f64,
    weekly_rent: f64,
    (suburb, state): (&str, &str),
    days_on_market: u32,
) -> PropertyRecord {
    let mut record = PropertyRecord::new(PropertyId::from(id), address);
    record.bedrooms = Some(bedrooms);
    record.bathrooms = Some(bathrooms);
    record.car_spaces = Some(car_spaces);
    record.listed_price = Some(listed_price);
    record.weekly_rent_estimate = Some(weekly_rent);
    record.suburb = Some(suburb.to_owned());
    record.state = Some(state.to_owned());
    record.days_on_market = Some(days_on_market);
    record
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for larger listing sets.
#[derive(Debug, Clone)]
pub struct ListingFaker {
    rng: DeterministicRng,
}

impl ListingFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    /// An enriched listing; roughly one in eight has no rent estimate and
    /// therefore no yield.
    pub fn listing(&mut self, id: i64) -> PropertyRecord {
        let (suburb, state, postcode) = self.pick(&SUBURBS);
        let street = self.pick(&STREET_NAMES);
        let kind = self.pick(&STREET_KINDS);
        let number = self.int_range(1, 240);
        let mut record = PropertyRecord::new(
            id,
            format!("{number} {street} {kind}, {suburb} {state} {postcode}"),
        );

        let bedrooms = self.int_range(1, 5);
        record.bedrooms = Some(bedrooms);
        record.bathrooms = Some(self.int_range(1, bedrooms.max(1)));
        record.car_spaces = Some(self.int_range(0, 3));
        let price = f64::from(self.int_range(45, 250)) * 10_000.0;
        record.listed_price = Some(price);
        if self.rng.int_n(8) != 0 {
            record.weekly_rent_estimate = Some(f64::from(self.int_range(35, 140)) * 10.0);
        }
        record.suburb = Some(suburb.to_owned());
        record.state = Some(state.to_owned());
        record.days_on_market = Some(self.int_range(1, 90));
        enrich(record)
    }

    pub fn listings(&mut self, count: usize) -> Vec<PropertyRecord> {
        (1..=count as i64).map(|id| self.listing(id)).collect()
    }

    fn pick<T: Copy>(&mut self, values: &[T]) -> T {
        values[self.rng.int_n(values.len())]
    }

    fn int_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.rng.int_n((max - min + 1) as usize) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ListingFaker, demo_properties, dom_band, gross_yield, heuristic_advice, sample_record,
        sample_summary, summarize,
    };
    use propdash_app::{DomBand, PropertyId};

    #[test]
    fn gross_yield_matches_backend_rounding() {
        assert_eq!(gross_yield(Some(850.0), Some(1_250_000.0)), Some(3.54));
        assert_eq!(gross_yield(Some(650.0), Some(780_000.0)), Some(4.33));
        assert_eq!(gross_yield(Some(450.0), Some(500_000.0)), Some(4.68));
    }

    #[test]
    fn gross_yield_needs_rent_and_positive_price() {
        assert_eq!(gross_yield(None, Some(500_000.0)), None);
        assert_eq!(gross_yield(Some(0.0), Some(500_000.0)), None);
        assert_eq!(gross_yield(Some(450.0), Some(0.0)), None);
        assert_eq!(gross_yield(Some(450.0), None), None);
    }

    #[test]
    fn dom_band_thresholds() {
        assert_eq!(dom_band(None), None);
        assert_eq!(dom_band(Some(20)), Some(DomBand::Fast));
        assert_eq!(dom_band(Some(21)), Some(DomBand::Average));
        assert_eq!(dom_band(Some(45)), Some(DomBand::Average));
        assert_eq!(dom_band(Some(46)), Some(DomBand::Slow));
    }

    #[test]
    fn demo_properties_are_enriched() {
        let rows = demo_properties();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, PropertyId::text("prop_001"));
        assert_eq!(rows[0].gross_yield_pct, Some(3.54));
        assert_eq!(rows[1].band(), Some(DomBand::Slow));
        assert_eq!(rows[2].gross_yield_pct, Some(4.12));
        assert_eq!(rows[2].band(), Some(DomBand::Average));
    }

    #[test]
    fn demo_summary_uses_backend_percentile_picks() {
        let summary = summarize(&demo_properties());
        assert_eq!(summary.count, 3);
        assert_eq!(summary.yield_avg, Some(4.0));
        assert_eq!(summary.yield_p25, Some(3.54));
        assert_eq!(summary.yield_p75, Some(4.33));
        assert_eq!(summary.dom_mix.fast, 0);
        assert_eq!(summary.dom_mix.average, 2);
        assert_eq!(summary.dom_mix.slow, 1);
    }

    #[test]
    fn summary_of_nothing_has_no_yields() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.yield_avg, None);
        assert_eq!(summary.dom_mix.total(), 0);
    }

    #[test]
    fn single_record_summary_matches_fixture() {
        assert_eq!(summarize(&[sample_record()]), sample_summary());
    }

    #[test]
    fn heuristic_advice_combines_notes() {
        let rows = demo_properties();
        assert_eq!(
            heuristic_advice(&rows[1]),
            "Low gross yield; growth story must justify entry. Slower resale; price in longer selling time."
        );
        assert_eq!(
            heuristic_advice(&rows[2]),
            "Low gross yield; growth story must justify entry. Family spec; check school catchments for demand uplift."
        );

        let mut strong = sample_record();
        strong.gross_yield_pct = Some(6.0);
        strong.dom_risk_band = Some("Fast".to_owned());
        assert_eq!(
            heuristic_advice(&strong),
            "Strong cash flow (gross yield ≥ 5.5%). Liquid market; lower resale risk."
        );
        assert!(heuristic_advice(&sample_record()).starts_with("Balanced yield"));
    }

    #[test]
    fn faker_is_deterministic_per_seed() {
        let left = ListingFaker::new(42).listings(20);
        let right = ListingFaker::new(42).listings(20);
        assert_eq!(left, right);
        assert!(left.iter().all(|row| row.listed_price.is_some()));
        assert!(left.iter().all(|row| row.band().is_some()));
    }
}
