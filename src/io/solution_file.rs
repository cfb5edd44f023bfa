//! Writes and parses the solution text format: an improvement trace
//! followed by five `*`-separated assignment columns.

use std::path::Path;

use crate::domain::Assignment;
use crate::result::Result as SearchResult;

use super::error::InputFormatError;

const SEPARATOR: char = '*';

/// The five equal-length assignment columns, in commit order.
fn format_assignments(assignments: &[Assignment]) -> String {
    let join = |values: Vec<String>| values.join(&SEPARATOR.to_string());
    let patient_ids = join(assignments.iter().map(|a| a.patient.id.to_string()).collect());
    let or_ids = join(assignments.iter().map(|a| a.operating_room.id.to_string()).collect());
    let op_starts = join(assignments.iter().map(|a| a.operation_interval.lower().to_string()).collect());
    let uce_ids = join(assignments.iter().map(|a| a.uce_room.id.to_string()).collect());
    let uce_starts = join(assignments.iter().map(|a| a.uce_interval.lower().to_string()).collect());
    [patient_ids, or_ids, op_starts, uce_ids, uce_starts].join("\n")
}

/// Renders a complete solution file: the improvement trace followed by the
/// assignment columns of the best solution found.
pub fn render(result: &SearchResult) -> String {
    let best = result.best();
    let assignment_line = best.map(|b| format_assignments(&b.assignments)).unwrap_or_default();
    result.serialize(&assignment_line)
}

pub fn write(path: &Path, result: &SearchResult) -> Result<(), InputFormatError> {
    std::fs::write(path, render(result))?;
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ParsedSolutionFile {
    pub improvements: Vec<(i64, u64)>,
    pub patient_ids: Vec<u32>,
    pub or_ids: Vec<u32>,
    pub op_starts: Vec<u32>,
    pub uce_ids: Vec<u32>,
    pub uce_starts: Vec<u32>,
}

fn parse_ints(line: &str) -> Result<Vec<u32>, InputFormatError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.split(SEPARATOR)
        .map(|value| {
            value.parse::<u32>().map_err(|_| InputFormatError::NotAnInteger {
                line: 0,
                value: value.to_string(),
            })
        })
        .collect()
}

fn parse_improvement(line: &str, line_no: usize) -> Result<(i64, u64), InputFormatError> {
    let (of, cpu) = line.split_once(SEPARATOR).ok_or(InputFormatError::FieldCountMismatch {
        line: line_no,
        field: "improvement",
        found: 1,
        expected: 2,
    })?;
    let of = of.parse::<i64>().map_err(|_| InputFormatError::NotAnInteger {
        line: line_no,
        value: of.to_string(),
    })?;
    let cpu = cpu.parse::<u64>().map_err(|_| InputFormatError::NotAnInteger {
        line: line_no,
        value: cpu.to_string(),
    })?;
    Ok((of, cpu))
}

/// Parses a solution file independently of the `Result` type that wrote it,
/// for use by the tester.
pub fn parse(text: &str) -> Result<ParsedSolutionFile, InputFormatError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 7 {
        return Err(InputFormatError::WrongLineCount {
            expected: 7,
            found: lines.len(),
        });
    }
    let total = lines.len();
    let assignment_lines = &lines[total - 5..];
    let final_line = lines[total - 6];
    // lines[total - 7] is the redundant count line; not needed to reconstruct
    // the trace since the slice boundaries already locate every field.
    let leading_improvement_lines = &lines[..total - 7];

    let mut improvements = Vec::with_capacity(leading_improvement_lines.len() + 1);
    for (i, line) in leading_improvement_lines.iter().enumerate() {
        improvements.push(parse_improvement(line, i + 1)?);
    }
    improvements.push(parse_improvement(final_line, total - 6)?);

    Ok(ParsedSolutionFile {
        improvements,
        patient_ids: parse_ints(assignment_lines[0])?,
        or_ids: parse_ints(assignment_lines[1])?,
        op_starts: parse_ints(assignment_lines[2])?,
        uce_ids: parse_ints(assignment_lines[3])?,
        uce_starts: parse_ints(assignment_lines[4])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperatingRoom, Patient, SurgicalType, UceRoom};

    #[test]
    fn render_and_parse_round_trip_the_assignment_columns() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let p = Patient::new(1, 5, 1, st);
        let or_ = OperatingRoom::new(1, st);
        let uce = UceRoom::new(1);
        let assignment = Assignment::new(p, or_, 8, uce, 12);

        let mut result = SearchResult::new();
        result.consider(
            crate::result::SolutionRecord {
                assignments: vec![assignment],
                value: 1,
            },
            0,
        );
        result.consider(
            crate::result::SolutionRecord {
                assignments: vec![assignment],
                value: 2,
            },
            1,
        );

        let text = render(&result);
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed.patient_ids, vec![1]);
        assert_eq!(parsed.or_ids, vec![1]);
        assert_eq!(parsed.op_starts, vec![8]);
        assert_eq!(parsed.uce_ids, vec![1]);
        assert_eq!(parsed.uce_starts, vec![12]);
        assert_eq!(parsed.improvements.last(), Some(&(2, 1)));
    }
}
