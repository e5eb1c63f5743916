//! Destinations for batch records.

use thiserror::Error;

use super::BatchRecord;

/// Failure while storing records.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Underlying writer failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed.
    #[cfg(feature = "csv-format")]
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Accepts batch records for storage or reporting.
pub trait ResultSink {
    /// Stores one record.
    fn record(&mut self, record: &BatchRecord) -> Result<(), SinkError>;

    /// Flushes anything buffered. Called once after the last record.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Feeds every record to `sink`, then finishes it.
pub fn write_records<S: ResultSink + ?Sized>(
    sink: &mut S,
    records: &[BatchRecord],
) -> Result<(), SinkError> {
    for record in records {
        sink.record(record)?;
    }
    sink.finish()
}

/// Keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<BatchRecord>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records received so far.
    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }
}

impl ResultSink for MemorySink {
    fn record(&mut self, record: &BatchRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[cfg(feature = "csv-format")]
pub use self::csv_sink::CsvSink;

#[cfg(feature = "csv-format")]
mod csv_sink {
    use std::io::Write;

    use super::{BatchRecord, ResultSink, SinkError};

    const HEADER: [&str; 7] = [
        "Instance Name",
        "Method",
        "Cost",
        "Iterations",
        "Running Time",
        "Solved",
        "Error",
    ];

    /// Writes one CSV row per record.
    ///
    /// Running time is in seconds. Failed runs leave the numeric columns
    /// empty and carry the error message.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_transport::batch::{solve_batch, write_records, BatchConfig, CsvSink};
    /// use u_transport::generator::InstanceGenerator;
    ///
    /// let instances = vec![InstanceGenerator::new(3).generate("small_0", 2, 3)];
    /// let records = solve_batch(&instances, &BatchConfig::default());
    ///
    /// let mut sink = CsvSink::new(Vec::new());
    /// write_records(&mut sink, &records).unwrap();
    /// let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    /// assert_eq!(text.lines().count(), 1 + 3);
    /// ```
    pub struct CsvSink<W: Write> {
        writer: csv::Writer<W>,
        header_written: bool,
    }

    impl<W: Write> CsvSink<W> {
        /// Creates a sink writing to `writer`.
        pub fn new(writer: W) -> Self {
            Self {
                writer: csv::Writer::from_writer(writer),
                header_written: false,
            }
        }

        /// Flushes and returns the underlying writer.
        pub fn into_inner(self) -> Result<W, SinkError> {
            self.writer
                .into_inner()
                .map_err(|err| SinkError::Io(err.into_error()))
        }

        fn ensure_header(&mut self) -> Result<(), SinkError> {
            if !self.header_written {
                self.writer.write_record(HEADER)?;
                self.header_written = true;
            }
            Ok(())
        }
    }

    impl<W: Write> ResultSink for CsvSink<W> {
        fn record(&mut self, record: &BatchRecord) -> Result<(), SinkError> {
            self.ensure_header()?;
            let method = record.method.to_string();
            let row = match &record.outcome {
                Ok(result) => [
                    record.instance_name.clone(),
                    method,
                    result.cost.to_string(),
                    result.iterations.to_string(),
                    format!("{:.6}", result.elapsed.as_secs_f64()),
                    result.feasible.to_string(),
                    String::new(),
                ],
                Err(err) => [
                    record.instance_name.clone(),
                    method,
                    String::new(),
                    String::new(),
                    String::new(),
                    false.to_string(),
                    err.to_string(),
                ],
            };
            self.writer.write_record(&row)?;
            Ok(())
        }

        fn finish(&mut self) -> Result<(), SinkError> {
            self.ensure_header()?;
            self.writer.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{solve_batch, BatchConfig};
    use crate::cost::CostMatrix;
    use crate::models::Instance;
    use crate::solver::Method;

    fn records() -> Vec<BatchRecord> {
        let good = crate::constructive::sample_instance();
        let cost = CostMatrix::from_data(2, 3, vec![1.0; 6]).expect("valid");
        let bad = Instance::new("bad", vec![5, 5], vec![3, 3, 3], cost);
        solve_batch(&[good, bad], &BatchConfig::new(vec![Method::Vogel]))
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        write_records(&mut sink, &records()).expect("in-memory");
        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.records()[1].instance_name, "bad");
    }

    #[cfg(feature = "csv-format")]
    #[test]
    fn test_csv_rows() {
        let mut sink = CsvSink::new(Vec::new());
        write_records(&mut sink, &records()).expect("in-memory");
        let text = String::from_utf8(sink.into_inner().expect("flush")).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Instance Name,Method,Cost,Iterations,Running Time,Solved,Error"
        );
        assert!(lines[1].starts_with("sample,vogel,775,4,"));
        assert!(lines[1].ends_with(",true,"));
        assert!(lines[2].starts_with("bad,vogel,,,,false,"));
        assert!(lines[2].contains("unbalanced instance"));
    }

    #[cfg(feature = "csv-format")]
    #[test]
    fn test_csv_empty_batch_has_header() {
        let mut sink = CsvSink::new(Vec::new());
        write_records(&mut sink, &[]).expect("in-memory");
        let text = String::from_utf8(sink.into_inner().expect("flush")).expect("utf8");
        assert_eq!(text.lines().count(), 1);
    }
}
