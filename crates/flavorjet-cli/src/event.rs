//! Plain-text event reader.
//!
//! One particle per line, whitespace separated: `px py pz E label`.
//! Lines starting with `#` are comments; a line starting with `#END`
//! terminates the event early. This is a convenience reader, not a defined
//! interchange format.

use std::io::BufRead;

use flavorjet_core::flavor::is_valid_label;
use flavorjet_core::PseudoJet;

use crate::error::CliError;

/// Read an event from `reader`.
///
/// # Errors
///
/// `CliError::Parse` on malformed lines, `CliError::InvalidLabel` when a
/// particle carries a label outside the recognized set. Both carry the
/// 1-based line number.
pub fn read_event(reader: impl BufRead) -> Result<Vec<PseudoJet>, CliError> {
    let mut event = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();

        if trimmed.starts_with("#END") {
            break;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(CliError::Parse {
                line: line_no,
                msg: format!("expected 5 fields (px py pz E label), got {}", fields.len()),
            });
        }

        let parse_f64 = |field: &str, name: &str| -> Result<f64, CliError> {
            field.parse::<f64>().map_err(|_| CliError::Parse {
                line: line_no,
                msg: format!("cannot parse {name} from {field:?}"),
            })
        };

        let px = parse_f64(fields[0], "px")?;
        let py = parse_f64(fields[1], "py")?;
        let pz = parse_f64(fields[2], "pz")?;
        let e = parse_f64(fields[3], "E")?;
        let label: i32 = fields[4].parse().map_err(|_| CliError::Parse {
            line: line_no,
            msg: format!("cannot parse label from {:?}", fields[4]),
        })?;

        if !is_valid_label(label) {
            return Err(CliError::InvalidLabel {
                line: line_no,
                label,
            });
        }

        event.push(PseudoJet::new(px, py, pz, e, label));
    }

    Ok(event)
}
