//! FILENAME: tests/common/mod.rs
//! Cellset fixtures for flatten-engine integration tests.

#![allow(dead_code)]

use cellset::{Cell, DimensionId, DimensionKind, LevelId, MemberId, MemoryCellset};

/// Builder holding the dimensions and levels every fixture shares.
pub struct Fixture {
    pub cs: MemoryCellset,
    pub measures: DimensionId,
    pub time: DimensionId,
    pub region: DimensionId,
    pub measure_level: LevelId,
    pub year: LevelId,
    pub quarter: LevelId,
    pub month: LevelId,
    pub country: LevelId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut cs = MemoryCellset::new();
        let measures = cs.add_dimension("[Measures]", "Measures", DimensionKind::Measures);
        let time = cs.add_dimension("[Time]", "Time", DimensionKind::Time);
        let region = cs.add_dimension("[Region]", "Region", DimensionKind::Regular);
        let measure_level = cs.add_level("[Measures].[MeasuresLevel]", "MeasuresLevel", 0);
        let year = cs.add_level("[Time].[Year]", "Year", 0);
        let quarter = cs.add_level("[Time].[Quarter]", "Quarter", 1);
        let month = cs.add_level("[Time].[Month]", "Month", 2);
        let country = cs.add_level("[Region].[Country]", "Country", 0);
        Fixture {
            cs,
            measures,
            time,
            region,
            measure_level,
            year,
            quarter,
            month,
            country,
        }
    }

    pub fn measure(&mut self, name: &str) -> MemberId {
        self.cs
            .add_member(name, format!("[Measures].[{}]", name), self.measures, self.measure_level, None)
            .unwrap()
    }

    pub fn year(&mut self, name: &str) -> MemberId {
        self.cs
            .add_member(name, format!("[Time].[{}]", name), self.time, self.year, None)
            .unwrap()
    }

    pub fn quarter(&mut self, name: &str, parent: MemberId) -> MemberId {
        let unique = format!("{}.[{}]", self.cs_unique(parent), name);
        self.cs
            .add_member(name, unique, self.time, self.quarter, Some(parent))
            .unwrap()
    }

    pub fn month(&mut self, name: &str, parent: MemberId) -> MemberId {
        let unique = format!("{}.[{}]", self.cs_unique(parent), name);
        self.cs
            .add_member(name, unique, self.time, self.month, Some(parent))
            .unwrap()
    }

    pub fn country(&mut self, name: &str) -> MemberId {
        self.cs
            .add_member(name, format!("[Region].[{}]", name), self.region, self.country, None)
            .unwrap()
    }

    fn cs_unique(&self, id: MemberId) -> String {
        use cellset::Cellset;
        self.cs.member(id).map(|m| m.unique_name.clone()).unwrap_or_default()
    }
}

/// Sales amounts per year used by `sales_by_year`.
pub const YEARLY_SALES: [f64; 3] = [100.0, 150.0, 175.0];

/// axis0 = [Sales], axis1 = [2021], [2022], [2023]. No slicer.
pub fn sales_by_year() -> MemoryCellset {
    sales_by_year_fixture(false)
}

/// Same as `sales_by_year`, with `[Measures].[Sales]` on the slicer.
pub fn sales_by_year_sliced() -> MemoryCellset {
    sales_by_year_fixture(true)
}

fn sales_by_year_fixture(sliced: bool) -> MemoryCellset {
    let mut f = Fixture::new();
    let sales = f.measure("Sales");
    let years: Vec<MemberId> = ["2021", "2022", "2023"].iter().map(|y| f.year(y)).collect();
    f.cs.add_axis(vec![vec![sales]]).unwrap();
    f.cs.add_axis(years.iter().map(|&y| vec![y])).unwrap();
    if sliced {
        f.cs.set_slicer(vec![sales]).unwrap();
    }
    for (i, amount) in YEARLY_SALES.iter().enumerate() {
        f.cs.set_cell(&[0, i], Cell::new(*amount)).unwrap();
    }
    f.cs
}

/// axis0 = [Sales], axis1 has no positions.
pub fn empty_row_axis() -> MemoryCellset {
    let mut f = Fixture::new();
    let sales = f.measure("Sales");
    f.cs.add_axis(vec![vec![sales]]).unwrap();
    f.cs.add_axis(Vec::<Vec<MemberId>>::new()).unwrap();
    f.cs
}

/// The members placed on axis 1 of `ragged_time`, in order:
/// 2021 (Year), Jan (Year > Quarter > Month), 2023 (Year).
pub fn ragged_time_members(f: &mut Fixture) -> Vec<MemberId> {
    let y2021 = f.year("2021");
    let y2022 = f.year("2022");
    let q1 = f.quarter("Q1", y2022);
    let jan = f.month("Jan", q1);
    let y2023 = f.year("2023");
    vec![y2021, jan, y2023]
}

/// axis0 = [Sales]; axis1 positions in the order given by `order`
/// (indices into `ragged_time_members`). Cell value = 10 * member slot + 1.
pub fn ragged_time_ordered(order: &[usize]) -> MemoryCellset {
    let mut f = Fixture::new();
    let sales = f.measure("Sales");
    let members = ragged_time_members(&mut f);
    f.cs.add_axis(vec![vec![sales]]).unwrap();
    f.cs.add_axis(order.iter().map(|&i| vec![members[i]])).unwrap();
    for (position, &i) in order.iter().enumerate() {
        f.cs.set_cell(&[0, position], Cell::new(10.0 * i as f64 + 1.0)).unwrap();
    }
    f.cs
}

pub fn ragged_time() -> MemoryCellset {
    ragged_time_ordered(&[0, 1, 2])
}

/// Cell value stored at `coords` by `cross_join`.
pub fn cross_join_value(coords: &[usize]) -> f64 {
    (coords[0] * 100 + coords[1] * 10 + coords[2]) as f64
}

/// axis0 = [Sales], [Units]; axis1 = 2021, 2022; axis2 = North, South, West.
/// Every cell is populated with `cross_join_value`.
pub fn cross_join() -> MemoryCellset {
    let mut f = Fixture::new();
    let sales = f.measure("Sales");
    let units = f.measure("Units");
    let years: Vec<MemberId> = ["2021", "2022"].iter().map(|y| f.year(y)).collect();
    let regions: Vec<MemberId> = ["North", "South", "West"].iter().map(|r| f.country(r)).collect();
    f.cs.add_axis(vec![vec![sales], vec![units]]).unwrap();
    f.cs.add_axis(years.iter().map(|&y| vec![y])).unwrap();
    f.cs.add_axis(regions.iter().map(|&r| vec![r])).unwrap();
    f.cs.set_slicer(vec![sales]).unwrap();
    for a0 in 0..2 {
        for a1 in 0..2 {
            for a2 in 0..3 {
                let coords = [a0, a1, a2];
                f.cs.set_cell(&coords, Cell::new(cross_join_value(&coords))).unwrap();
            }
        }
    }
    f.cs
}

/// axis0 = [Sales]; axis1 positions each hold (year, country): a two-slot axis.
pub fn two_slot_axis() -> MemoryCellset {
    let mut f = Fixture::new();
    let sales = f.measure("Sales");
    let y2022 = f.year("2022");
    let q3 = f.quarter("Q3", y2022);
    let y2023 = f.year("2023");
    let north = f.country("North");
    let south = f.country("South");
    f.cs.add_axis(vec![vec![sales]]).unwrap();
    f.cs.add_axis(vec![vec![q3, north], vec![y2023, south]]).unwrap();
    f.cs.set_cell(&[0, 0], Cell::new(7.0)).unwrap();
    f.cs.set_cell(&[0, 1], Cell::new(9.0)).unwrap();
    f.cs
}
