//! Parses the flat `*`-delimited instance text format (see the module-level
//! format description in the crate documentation).

use crate::domain::{Instance, OperatingRoom, Patient, SurgicalType};

use super::error::InputFormatError;

const SEPARATOR: char = '*';

fn parse_ints(line: &str, line_no: usize) -> Result<Vec<u32>, InputFormatError> {
    line.trim()
        .split(SEPARATOR)
        .map(|value| {
            value.parse::<u32>().map_err(|_| InputFormatError::NotAnInteger {
                line: line_no,
                value: value.to_string(),
            })
        })
        .collect()
}

fn require_line<'a>(lines: &[&'a str], index: usize) -> Result<&'a str, InputFormatError> {
    lines.get(index).copied().ok_or(InputFormatError::WrongLineCount {
        expected: 8,
        found: lines.len(),
    })
}

/// Parses an instance from its eight-line textual form.
pub fn parse(text: &str) -> Result<Instance, InputFormatError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 8 {
        return Err(InputFormatError::WrongLineCount {
            expected: 8,
            found: lines.len(),
        });
    }

    // Line 1 (patient count) is redundant with the length of line 2 and is
    // only validated, never used to size anything.
    let declared_n = require_line(&lines, 0)?
        .trim()
        .parse::<u32>()
        .map_err(|_| InputFormatError::NotAnInteger {
            line: 1,
            value: require_line(&lines, 0).unwrap_or_default().to_string(),
        })?;

    let priorities = parse_ints(require_line(&lines, 1)?, 2)?;
    let sexes = parse_ints(require_line(&lines, 2)?, 3)?;
    let patient_types = parse_ints(require_line(&lines, 3)?, 4)?;
    let operation_times = parse_ints(require_line(&lines, 4)?, 5)?;
    let urpa_times = parse_ints(require_line(&lines, 5)?, 6)?;
    let uce_times = parse_ints(require_line(&lines, 6)?, 7)?;
    let room_types = parse_ints(require_line(&lines, 7)?, 8)?;

    if priorities.len() as u32 != declared_n {
        return Err(InputFormatError::FieldCountMismatch {
            line: 2,
            field: "priorities",
            found: priorities.len(),
            expected: declared_n as usize,
        });
    }
    if sexes.len() != priorities.len() {
        return Err(InputFormatError::FieldCountMismatch {
            line: 3,
            field: "sexes",
            found: sexes.len(),
            expected: priorities.len(),
        });
    }
    if patient_types.len() != priorities.len() {
        return Err(InputFormatError::FieldCountMismatch {
            line: 4,
            field: "patient surgical types",
            found: patient_types.len(),
            expected: priorities.len(),
        });
    }
    if urpa_times.len() != operation_times.len() {
        return Err(InputFormatError::FieldCountMismatch {
            line: 6,
            field: "urpa_time",
            found: urpa_times.len(),
            expected: operation_times.len(),
        });
    }
    if uce_times.len() != operation_times.len() {
        return Err(InputFormatError::FieldCountMismatch {
            line: 7,
            field: "uce_time",
            found: uce_times.len(),
            expected: operation_times.len(),
        });
    }

    let surgical_types: Vec<SurgicalType> = operation_times
        .iter()
        .zip(urpa_times.iter())
        .zip(uce_times.iter())
        .enumerate()
        .map(|(i, ((&op, &urpa), &uce))| SurgicalType::new(i as u32 + 1, op, urpa, uce))
        .collect();

    let lookup = |type_id: u32| surgical_types.iter().find(|st| st.id == type_id).copied();

    let patients = priorities
        .iter()
        .zip(sexes.iter())
        .zip(patient_types.iter())
        .enumerate()
        .map(|(i, ((&priority, &sex), &type_id))| {
            let surgical_type = lookup(type_id).ok_or(InputFormatError::UnknownSurgicalType { type_id })?;
            Ok(Patient::new(i as u32 + 1, priority, sex as u8, surgical_type))
        })
        .collect::<Result<Vec<Patient>, InputFormatError>>()?;

    let operating_rooms = room_types
        .iter()
        .enumerate()
        .map(|(i, &type_id)| {
            let surgical_type = lookup(type_id)
                .ok_or(InputFormatError::OperatingRoomUnknownSurgicalType { type_id })?;
            Ok(OperatingRoom::new(i as u32 + 1, surgical_type))
        })
        .collect::<Result<Vec<OperatingRoom>, InputFormatError>>()?;

    Ok(Instance::new(patients, operating_rooms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> String {
        [
            "2", "5*3", "1*2", "1*1", "2*3", "2*1", "24*36", "1*1",
        ]
        .join("\n")
    }

    #[test]
    fn parses_patients_types_and_rooms() {
        let instance = parse(&sample()).unwrap();
        assert_eq!(instance.patients.len(), 2);
        assert_eq!(instance.patients[0].priority, 5);
        assert_eq!(instance.patients[0].sex, 1);
        assert_eq!(instance.patients[1].sex, 2);
        assert_eq!(instance.operating_rooms.len(), 2);
        assert_eq!(instance.operating_rooms[0].surgical_type.operation_time, 2);
    }

    #[test]
    fn rejects_non_integer_fields() {
        let bad = ["2", "5*x", "1*2", "1*1", "2*3", "2*1", "24*36", "1*1"].join("\n");
        assert!(matches!(parse(&bad), Err(InputFormatError::NotAnInteger { line: 2, .. })));
    }

    #[test]
    fn rejects_unknown_surgical_type_reference() {
        let bad = ["2", "5*3", "1*2", "1*9", "2*3", "2*1", "24*36", "1*1"].join("\n");
        assert!(matches!(parse(&bad), Err(InputFormatError::UnknownSurgicalType { type_id: 9 })));
    }

    #[test]
    fn rejects_too_few_lines() {
        let bad = "2\n5*3";
        assert!(matches!(parse(bad), Err(InputFormatError::WrongLineCount { .. })));
    }
}
