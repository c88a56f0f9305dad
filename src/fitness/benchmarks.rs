//! Benchmark objectives
//!
//! In-memory versions of the classical permutation benchmarks: quadratic
//! assignment, linear ordering and permutation flow shop scheduling.

use crate::error::ProblemError;
use crate::fitness::traits::{Objective, OptimizationDirection};

fn check_square(name: &str, matrix: &[Vec<f64>], n: usize) -> Result<(), ProblemError> {
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(ProblemError::Shape(format!(
            "{} matrix must be {}x{}",
            name, n, n
        )));
    }
    Ok(())
}

/// Quadratic Assignment Problem: `Σᵢ Σⱼ d[i][j] · f[p[i]][p[j]]`
///
/// Minimized.
#[derive(Clone, Debug)]
pub struct Qap {
    distances: Vec<Vec<f64>>,
    flows: Vec<Vec<f64>>,
}

impl Qap {
    /// Create a QAP instance from its distance and flow matrices
    pub fn new(distances: Vec<Vec<f64>>, flows: Vec<Vec<f64>>) -> Result<Self, ProblemError> {
        let n = distances.len();
        check_square("distance", &distances, n)?;
        check_square("flow", &flows, n)?;
        Ok(Self { distances, flows })
    }
}

impl Objective for Qap {
    fn name(&self) -> &'static str {
        "QAP"
    }

    fn size(&self) -> usize {
        self.distances.len()
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Minimize
    }

    fn evaluate(&self, permutation: &[usize]) -> f64 {
        let mut cost = 0.0;
        for (i, row) in self.distances.iter().enumerate() {
            let flow_row = &self.flows[permutation[i]];
            for (j, d) in row.iter().enumerate() {
                cost += d * flow_row[permutation[j]];
            }
        }
        cost
    }
}

/// Linear Ordering Problem: `Σ_{i<j} m[p[i]][p[j]]`
///
/// Maximized.
#[derive(Clone, Debug)]
pub struct Lop {
    matrix: Vec<Vec<f64>>,
}

impl Lop {
    /// Create a LOP instance from its square weight matrix
    pub fn new(matrix: Vec<Vec<f64>>) -> Result<Self, ProblemError> {
        check_square("weight", &matrix, matrix.len())?;
        Ok(Self { matrix })
    }
}

impl Objective for Lop {
    fn name(&self) -> &'static str {
        "LOP"
    }

    fn size(&self) -> usize {
        self.matrix.len()
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Maximize
    }

    fn evaluate(&self, permutation: &[usize]) -> f64 {
        let n = permutation.len();
        let mut score = 0.0;
        for i in 0..n {
            let row = &self.matrix[permutation[i]];
            for &later in &permutation[i + 1..] {
                score += row[later];
            }
        }
        score
    }
}

/// Permutation Flow Shop Scheduling Problem, total flow time criterion
///
/// `processing_times[machine][job]`; the permutation is the job order.
/// Minimized.
#[derive(Clone, Debug)]
pub struct Pfsp {
    processing_times: Vec<Vec<f64>>,
    jobs: usize,
}

impl Pfsp {
    /// Create a PFSP instance from a `machines × jobs` processing time matrix
    pub fn new(processing_times: Vec<Vec<f64>>) -> Result<Self, ProblemError> {
        let jobs = processing_times.first().map_or(0, Vec::len);
        if processing_times.is_empty() || processing_times.iter().any(|r| r.len() != jobs) {
            return Err(ProblemError::Shape(
                "processing times must be a non-empty machines x jobs matrix".to_string(),
            ));
        }
        Ok(Self {
            processing_times,
            jobs,
        })
    }

    /// Number of machines
    pub fn machines(&self) -> usize {
        self.processing_times.len()
    }

    fn completion_times(&self, permutation: &[usize]) -> Vec<f64> {
        let mut machine_free = vec![0.0f64; self.machines()];
        permutation
            .iter()
            .map(|&job| {
                let mut previous = 0.0f64;
                for (m, times) in self.processing_times.iter().enumerate() {
                    machine_free[m] = machine_free[m].max(previous) + times[job];
                    previous = machine_free[m];
                }
                previous
            })
            .collect()
    }

    /// Completion time of the last job on the last machine
    pub fn makespan(&self, permutation: &[usize]) -> f64 {
        self.completion_times(permutation)
            .last()
            .copied()
            .unwrap_or(0.0)
    }
}

impl Objective for Pfsp {
    fn name(&self) -> &'static str {
        "PFSP"
    }

    fn size(&self) -> usize {
        self.jobs
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Minimize
    }

    fn evaluate(&self, permutation: &[usize]) -> f64 {
        self.completion_times(permutation).iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qap_cost() {
        let d = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        let f = vec![vec![0.0, 3.0], vec![5.0, 0.0]];
        let qap = Qap::new(d, f).unwrap();
        assert_eq!(qap.size(), 2);
        // identity: 1*3 + 2*5
        assert_eq!(qap.evaluate(&[0, 1]), 13.0);
        // swapped: 1*f[1][0] + 2*f[0][1] = 5 + 6
        assert_eq!(qap.evaluate(&[1, 0]), 11.0);
    }

    #[test]
    fn test_qap_shape_error() {
        let d = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        let f = vec![vec![0.0]];
        assert!(matches!(Qap::new(d, f), Err(ProblemError::Shape(_))));
    }

    #[test]
    fn test_lop_score() {
        let m = vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ];
        let lop = Lop::new(m).unwrap();
        assert_eq!(lop.direction(), OptimizationDirection::Maximize);
        assert_eq!(lop.evaluate(&[0, 1, 2]), 1.0 + 2.0 + 4.0);
        assert_eq!(lop.evaluate(&[2, 1, 0]), 6.0 + 5.0 + 3.0);
    }

    #[test]
    fn test_pfsp_flow_time_and_makespan() {
        // 2 machines, 3 jobs
        let times = vec![vec![3.0, 2.0, 4.0], vec![2.0, 5.0, 1.0]];
        let pfsp = Pfsp::new(times).unwrap();
        assert_eq!(pfsp.size(), 3);
        assert_eq!(pfsp.machines(), 2);
        // job 0: m0 3, m1 5; job 1: m0 5, m1 10; job 2: m0 9, m1 11
        assert_eq!(pfsp.evaluate(&[0, 1, 2]), 5.0 + 10.0 + 11.0);
        assert_eq!(pfsp.makespan(&[0, 1, 2]), 11.0);
    }

    #[test]
    fn test_pfsp_rejects_ragged_matrix() {
        assert!(Pfsp::new(vec![]).is_err());
        assert!(Pfsp::new(vec![vec![1.0, 2.0], vec![1.0]]).is_err());
    }
}
