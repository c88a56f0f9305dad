//! Problem instance loading
//!
//! Text formats are whitespace separated numbers:
//! - QAP (`.dat`, QAPLIB): `n`, then the `n × n` distance matrix, then the
//!   `n × n` flow matrix.
//! - LOP (any other extension, LOLIB): `n`, then the `n × n` weight matrix.
//! - PFSP (`.fsp`, Taillard): a header line starting with `jobs machines`,
//!   then `machines` rows of `jobs` processing times.

use std::path::Path;

use crate::error::ProblemError;
use crate::fitness::benchmarks::{Lop, Pfsp, Qap};
use crate::fitness::traits::Objective;

/// Problem family, as inferred from an instance file name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    /// Quadratic assignment
    Qap,
    /// Linear ordering
    Lop,
    /// Permutation flow shop
    Pfsp,
}

impl ProblemKind {
    /// Infer the problem family from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("fsp") => Self::Pfsp,
            Some("dat") => Self::Qap,
            _ => Self::Lop,
        }
    }

    /// Parse an instance of this family from text
    pub fn parse(self, text: &str) -> Result<Box<dyn Objective>, ProblemError> {
        Ok(match self {
            Self::Qap => Box::new(parse_qap(text)?),
            Self::Lop => Box::new(parse_lop(text)?),
            Self::Pfsp => Box::new(parse_pfsp(text)?),
        })
    }
}

/// Read an instance file and build its objective
pub fn load_problem<P: AsRef<Path>>(path: P) -> Result<Box<dyn Objective>, ProblemError> {
    let path = path.as_ref();
    let kind = ProblemKind::from_path(path);
    let text = std::fs::read_to_string(path)?;
    let objective = kind.parse(&text)?;
    log::info!(
        "Loaded {} instance {} with size {}",
        objective.name(),
        path.display(),
        objective.size()
    );
    Ok(objective)
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next_f64(&mut self) -> Result<f64, ProblemError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| ProblemError::Parse("unexpected end of input".to_string()))?;
        token
            .parse::<f64>()
            .map_err(|e| ProblemError::Parse(format!("invalid number {:?}: {}", token, e)))
    }

    fn next_usize(&mut self) -> Result<usize, ProblemError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| ProblemError::Parse("unexpected end of input".to_string()))?;
        token
            .parse::<usize>()
            .map_err(|e| ProblemError::Parse(format!("invalid size {:?}: {}", token, e)))
    }

    fn matrix(&mut self, rows: usize, cols: usize) -> Result<Vec<Vec<f64>>, ProblemError> {
        (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| self.next_f64())
                    .collect::<Result<Vec<f64>, _>>()
            })
            .collect()
    }
}

/// Parse a QAPLIB instance
pub fn parse_qap(text: &str) -> Result<Qap, ProblemError> {
    let mut tokens = Tokens::new(text);
    let n = tokens.next_usize()?;
    let distances = tokens.matrix(n, n)?;
    let flows = tokens.matrix(n, n)?;
    Qap::new(distances, flows)
}

/// Parse a LOLIB instance
pub fn parse_lop(text: &str) -> Result<Lop, ProblemError> {
    let mut tokens = Tokens::new(text);
    let n = tokens.next_usize()?;
    Lop::new(tokens.matrix(n, n)?)
}

/// Parse a Taillard flow shop instance
pub fn parse_pfsp(text: &str) -> Result<Pfsp, ProblemError> {
    let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| ProblemError::Parse("missing header line".to_string()))?;
    let mut header_tokens = Tokens::new(header);
    let jobs = header_tokens.next_usize()?;
    let machines = header_tokens.next_usize()?;

    let body: Vec<&str> = lines.collect();
    let body = body.join("\n");
    let times = Tokens::new(&body).matrix(machines, jobs)?;
    Pfsp::new(times)
}

impl Qap {
    /// Parse a QAPLIB instance
    pub fn parse(text: &str) -> Result<Self, ProblemError> {
        parse_qap(text)
    }
}

impl Lop {
    /// Parse a LOLIB instance
    pub fn parse(text: &str) -> Result<Self, ProblemError> {
        parse_lop(text)
    }
}

impl Pfsp {
    /// Parse a Taillard flow shop instance
    pub fn parse(text: &str) -> Result<Self, ProblemError> {
        parse_pfsp(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::OptimizationDirection;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(ProblemKind::from_path(Path::new("ta001.fsp")), ProblemKind::Pfsp);
        assert_eq!(ProblemKind::from_path(Path::new("dir/tai12a.dat")), ProblemKind::Qap);
        assert_eq!(ProblemKind::from_path(Path::new("N-be75eec")), ProblemKind::Lop);
    }

    #[test]
    fn test_parse_qap() {
        let text = "2\n\n0 1\n2 0\n\n0 3\n5 0\n";
        let qap = parse_qap(text).unwrap();
        assert_eq!(qap.size(), 2);
        assert_eq!(qap.evaluate(&[0, 1]), 13.0);
        assert_eq!(Qap::parse(text).unwrap().evaluate(&[1, 0]), qap.evaluate(&[1, 0]));
    }

    #[test]
    fn test_parse_lop() {
        let lop = parse_lop("3\n0 1 2\n3 0 4\n5 6 0\n").unwrap();
        assert_eq!(lop.evaluate(&[0, 1, 2]), 7.0);
    }

    #[test]
    fn test_parse_pfsp_ignores_extra_header_fields() {
        let text = "3 2 873654221 11 7\n3 2 4\n2 5 1\n";
        let pfsp = parse_pfsp(text).unwrap();
        assert_eq!(pfsp.size(), 3);
        assert_eq!(pfsp.machines(), 2);
        assert_eq!(pfsp.makespan(&[0, 1, 2]), 11.0);
        assert_eq!(Pfsp::parse(text).unwrap().machines(), 2);
    }

    #[test]
    fn test_parse_truncated_input() {
        assert!(matches!(parse_lop("3\n0 1 2\n"), Err(ProblemError::Parse(_))));
        assert!(matches!(parse_qap("x"), Err(ProblemError::Parse(_))));
    }

    #[test]
    fn test_kind_parse_boxes_objective() {
        let objective = ProblemKind::Lop.parse("2\n0 1\n2 0\n").unwrap();
        assert_eq!(objective.name(), "LOP");
        assert_eq!(objective.direction(), OptimizationDirection::Maximize);
    }

    #[test]
    fn test_load_problem_missing_file() {
        let result = load_problem("/nonexistent/instance.dat");
        assert!(matches!(result, Err(ProblemError::Io(_))));
    }
}
