//! Trace export.

use std::path::Path;

use tl_sim::SimRecord;

use crate::error::{CliError, CliResult};

const CSV_HEADER: &str = "t_s,source,temperature_c,code,heater_on,setpoint_c,error,output";

/// Render the trace as CSV, heater and controller rows merged in time order.
/// At equal times heater rows come first.
pub fn to_csv(record: &SimRecord) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    let mut heater = record.heater.iter().peekable();
    let mut controller = record.controller.iter().peekable();
    loop {
        let take_heater = match (heater.peek(), controller.peek()) {
            (Some(h), Some(c)) => h.t <= c.t,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if take_heater {
            if let Some(r) = heater.next() {
                out.push_str(&format!(
                    "{},heater,{:.4},{},{},,,\n",
                    r.t, r.sample.temperature, r.sample.code, r.sample.is_on
                ));
            }
        } else if let Some(r) = controller.next() {
            out.push_str(&format!(
                "{},controller,{:.4},,{},{:.4},{:.4},{:.4}\n",
                r.t,
                r.sample.temperature,
                r.sample.heater_on,
                r.sample.setpoint,
                r.sample.error,
                r.sample.output
            ));
        }
    }
    out
}

pub fn write_csv(path: &Path, record: &SimRecord) -> CliResult<()> {
    std::fs::write(path, to_csv(record)).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json(path: &Path, record: &SimRecord) -> CliResult<()> {
    let content = serde_json::to_string_pretty(record)?;
    std::fs::write(path, content).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_sim::{Bench, BenchSetup, SimOptions, run_sim};

    #[test]
    fn csv_merges_rows_in_time_order() {
        let mut bench = Bench::new(BenchSetup::default()).unwrap();
        let opts = SimOptions {
            t_end: 2.0,
            ..SimOptions::default()
        };
        let record = run_sim(&mut bench, &opts).unwrap();
        let csv = to_csv(&record);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        // 4 heater ticks + 2 controller ticks
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("0.5,heater,24.0000,546,false"));
        assert!(lines[2].starts_with("1,heater,"));
        assert!(lines[3].starts_with("1,controller,"));
        assert!(lines[3].contains(",true,37.0000,"));
    }
}
