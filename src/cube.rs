use log::{debug, trace};

use crate::input::{ParsedInput, TestCase};
use crate::operation::{Operation, Point};

/// A zero-initialized `size`³ grid, addressed with the 1-based coordinates
/// used by the input format.
#[derive(Clone, Debug)]
pub struct Cube {
    size: usize,
    data: Vec<i64>,
}

impl Cube {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0; size * size * size],
        }
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    fn calc_index(&self, (x, y, z): (usize, usize, usize)) -> usize {
        debug_assert!(x < self.size);
        debug_assert!(y < self.size);
        debug_assert!(z < self.size);
        x + (y * self.size) + z * (self.size * self.size)
    }

    /// 1-based to 0-based.
    fn zero_based(&self, p: Point) -> (usize, usize, usize) {
        ((p.x - 1) as usize, (p.y - 1) as usize, (p.z - 1) as usize)
    }

    /// Overwrites the cell at `at`.
    pub fn update(&mut self, at: Point, value: i64) {
        let idx = self.calc_index(self.zero_based(at));
        self.data[idx] = value;
    }

    pub fn get(&self, at: Point) -> i64 {
        self.data[self.calc_index(self.zero_based(at))]
    }

    /// Sums every cell in the inclusive box `from..=to` by visiting each one.
    pub fn sum(&self, from: Point, to: Point) -> i64 {
        let (x1, y1, z1) = self.zero_based(from);
        let (x2, y2, z2) = self.zero_based(to);
        let mut total = 0i64;
        for x in x1..=x2 {
            for y in y1..=y2 {
                for z in z1..=z2 {
                    total += self.data[self.calc_index((x, y, z))];
                }
            }
        }
        total
    }
}

/// Runs one test case on a fresh cube, returning one sum per QUERY in order.
pub fn run(test_case: &TestCase) -> Vec<i64> {
    let mut cube = Cube::new(test_case.cube_size);
    let queries = test_case.operations.iter().filter(|op| op.is_query()).count();
    let mut results = Vec::with_capacity(queries);
    for operation in &test_case.operations {
        match *operation {
            Operation::Update { at, value } => cube.update(at, value),
            Operation::Query { from, to } => {
                let total = cube.sum(from, to);
                trace!("{:?}..={:?} = {}", from, to, total);
                results.push(total);
            }
        }
    }
    results
}

pub fn run_all(input: &ParsedInput) -> Vec<i64> {
    input
        .test_cases
        .iter()
        .enumerate()
        .flat_map(|(i, test_case)| {
            debug!(
                "running test case {} (N = {}, {} operations)",
                i + 1,
                test_case.cube_size,
                test_case.operations.len()
            );
            run(test_case)
        })
        .collect()
}
