use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    time::Duration,
};

use thiserror::Error;

use crate::bench::{BenchmarkResult, MixResult};

pub const BENCH_HEADER: [&str; 7] = [
    "solution",
    "inserts",
    "insert_ms",
    "search_ms",
    "sum_ms",
    "estimated",
    "estimate_src",
];

pub const MIX_HEADER: [&str; 5] = [
    "workload",
    "solution",
    "total_s",
    "avg_op_us",
    "throughput_ops_per_sec",
];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("no benchmark results to write")]
    Empty,
    #[error("failed to write results")]
    Io(#[from] io::Error),
}

#[inline]
pub fn fmt_ms(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64() * 1000.0)
}

/// Quotes a field when it would otherwise break the row.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn write_row<W: Write, S: AsRef<str>>(out: &mut W, fields: &[S]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{line}")
}

pub fn bench_row(res: &BenchmarkResult) -> [String; 7] {
    [
        res.solution.clone(),
        res.inserts.to_string(),
        fmt_ms(res.timings.insert),
        fmt_ms(res.timings.search),
        fmt_ms(res.timings.sum),
        res.estimated.to_string(),
        res.estimate_src.clone().unwrap_or_default(),
    ]
}

pub fn write_results_to<W: Write>(results: &[BenchmarkResult], out: W) -> Result<(), ReportError> {
    if results.is_empty() {
        return Err(ReportError::Empty);
    }
    let mut out = BufWriter::new(out);
    write_row(&mut out, &BENCH_HEADER)?;
    for res in results {
        write_row(&mut out, &bench_row(res))?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the benchmark CSV to `path`, replacing any existing file.
pub fn write_results(results: &[BenchmarkResult], path: impl AsRef<Path>) -> Result<(), ReportError> {
    if results.is_empty() {
        return Err(ReportError::Empty);
    }
    write_results_to(results, File::create(path)?)
}

pub fn write_mix_results_to<W: Write>(results: &[MixResult], out: W) -> Result<(), ReportError> {
    if results.is_empty() {
        return Err(ReportError::Empty);
    }
    let mut out = BufWriter::new(out);
    write_row(&mut out, &MIX_HEADER)?;
    for res in results {
        write_row(
            &mut out,
            &[
                res.workload.clone(),
                res.solution.clone(),
                format!("{:.6}", res.avg.as_secs_f64()),
                format!("{:.3}", res.avg_op_us()),
                format!("{:.0}", res.throughput()),
            ],
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_mix_results(results: &[MixResult], path: impl AsRef<Path>) -> Result<(), ReportError> {
    if results.is_empty() {
        return Err(ReportError::Empty);
    }
    write_mix_results_to(results, File::create(path)?)
}
