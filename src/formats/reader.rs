//! VCF reading
//!
//! [`VcfReader`] consumes the `#` lines into a [`HeaderModel`], then yields
//! records one line at a time. [`parse_records_parallel`] parses a batch of
//! data lines on a rayon pool, every worker sharing the same finalized header.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::core::error::{FastVcfError, LineError, Result};
use crate::core::io::{IoStrategy, LineIterator, InputSource};
use crate::formats::header::HeaderModel;
use crate::formats::vcf::VcfRecord;

/// Chunk size for parallel processing
pub const CHUNK_SIZE: usize = 10000;

/// Options for batch parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Worker threads; 1 parses on the calling thread
    pub threads: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Parsing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStats {
    pub total: usize,
    pub parsed: usize,
    pub failed: usize,
}

/// A data line with its 1-based line number
pub type NumberedLine = (usize, String);

/// Streaming reader over VCF text
pub struct VcfReader<R: BufRead> {
    lines: LineIterator<R>,
    header: Arc<HeaderModel>,
    /// First data line, read while scanning the header
    pending: Option<NumberedLine>,
}

impl VcfReader<InputSource> {
    /// Open a file (or `-` for stdin) and read its header
    pub fn open<P: AsRef<Path>>(path: P, strategy: IoStrategy) -> Result<Self> {
        let reader = InputSource::open(path, strategy)?;
        Self::new(reader)
    }
}

impl<R: BufRead> VcfReader<R> {
    /// Read header lines up to the first data line
    ///
    /// Malformed meta-lines are logged and skipped.
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = LineIterator::new(reader);
        let mut header = HeaderModel::new();
        let mut pending = None;

        while let Some(next) = lines.next_line() {
            let (line_number, line) = next?;
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                if let Err(e) = header.add_line(line) {
                    log::warn!("line {}: {}", line_number, e);
                }
                continue;
            }
            pending = Some((line_number, line.to_string()));
            break;
        }

        log::debug!(
            "header: {} meta-lines, {} samples",
            header.lines().len(),
            header.sample_count()
        );

        Ok(Self {
            lines,
            header: Arc::new(header),
            pending,
        })
    }

    pub fn header(&self) -> &Arc<HeaderModel> {
        &self.header
    }

    /// Next non-empty data line
    fn next_data_line(&mut self) -> Option<io::Result<NumberedLine>> {
        if let Some(pending) = self.pending.take() {
            return Some(Ok(pending));
        }
        loop {
            match self.lines.next_line()? {
                Ok((_, "")) => continue,
                Ok((line_number, line)) if line.starts_with('#') => {
                    log::warn!("line {}: header line after data ignored", line_number);
                }
                Ok((line_number, line)) => return Some(Ok((line_number, line.to_string()))),
                Err(e) => return Some(Err(e)),
            }
        }
    }

    /// Collect the remaining data lines for batch parsing
    pub fn read_data_lines(&mut self) -> io::Result<Vec<NumberedLine>> {
        let mut out = Vec::new();
        while let Some(line) = self.next_data_line() {
            out.push(line?);
        }
        Ok(out)
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<VcfRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.next_data_line()? {
            Ok((line_number, line)) => {
                VcfRecord::parse_at(&line, line_number, Arc::clone(&self.header)).map_err(FastVcfError::from)
            }
            Err(e) => Err(FastVcfError::Io(e)),
        };
        Some(item)
    }
}

/// Parse data lines, in parallel when `options.threads > 1`
///
/// Output keeps input order; a fatal error on one line does not stop the
/// others.
pub fn parse_records_parallel(
    lines: &[NumberedLine],
    header: Arc<HeaderModel>,
    options: &ParseOptions,
) -> Result<(Vec<std::result::Result<VcfRecord, LineError>>, ParseStats)> {
    let total = AtomicUsize::new(0);
    let parsed = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let parse_chunk = |chunk: &[NumberedLine]| -> Vec<std::result::Result<VcfRecord, LineError>> {
        chunk
            .iter()
            .map(|(line_number, line)| {
                total.fetch_add(1, Ordering::Relaxed);
                let result = VcfRecord::parse_at(line, *line_number, Arc::clone(&header));
                match &result {
                    Ok(_) => parsed.fetch_add(1, Ordering::Relaxed),
                    Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                };
                result
            })
            .collect()
    };

    let records: Vec<_> = if options.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()
            .map_err(|e| {
                FastVcfError::Io(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to create thread pool: {}", e),
                ))
            })?;
        log::debug!("parsing {} lines on {} threads", lines.len(), options.threads);
        pool.install(|| lines.par_chunks(CHUNK_SIZE).map(parse_chunk).collect::<Vec<_>>())
            .into_iter()
            .flatten()
            .collect()
    } else {
        parse_chunk(lines)
    };

    let stats = ParseStats {
        total: total.load(Ordering::Relaxed),
        parsed: parsed.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    };
    Ok((records, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VCF: &str = "##fileformat=VCFv4.1\n\
##INFO=<ID=AC,Number=A,Type=Integer,Description=\"Allele count\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\n\
1\t100\trs1\tA\tG\t30\tPASS\tAC=1\tGT\t0/1\t0/0\n\
\n\
1\t200\t.\tC\tT,G\t.\t.\tAC=1,1\tGT\t1/2\t./.\n";

    #[test]
    fn test_reader_header_and_records() {
        let mut reader = VcfReader::new(VCF.as_bytes()).unwrap();
        assert_eq!(reader.header().sample_names(), &["S1".to_string(), "S2".to_string()]);
        assert!(reader.header().lookup_info("AC").is_some());

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.pos(), 100);
        let second = reader.next().unwrap().unwrap();
        assert_eq!(second.alts().len(), 2);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reader_reports_line_number() {
        let text = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\t100\t.\tA\tG\n1\tbad\n";
        let records: Vec<_> = VcfReader::new(text.as_bytes()).unwrap().collect();
        assert!(records[0].is_ok());
        match &records[1] {
            Err(FastVcfError::Record(e)) => assert_eq!(e.line, 3),
            other => panic!("unexpected {:?}", other.as_ref().map(|r| r.pos())),
        }
    }

    #[test]
    fn test_malformed_meta_line_is_skipped() {
        let text = "##INFO=<ID=X,Number=1,Type=Blob,Description=\"x\">\n#CHROM\tPOS\tID\tREF\n1\t1\t.\tA\n";
        let mut reader = VcfReader::new(text.as_bytes()).unwrap();
        assert!(reader.header().lookup_info("X").is_none());
        assert!(reader.next().unwrap().is_ok());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut lines = Vec::new();
        for i in 0..25_000usize {
            if i % 1000 == 999 {
                lines.push((i + 1, "broken".to_string()));
            } else {
                lines.push((i + 1, format!("1\t{}\t.\tA\tG\t.\t.\t.", i + 1)));
            }
        }
        let header = Arc::new(HeaderModel::new());

        let (seq, seq_stats) = parse_records_parallel(&lines, Arc::clone(&header), &ParseOptions::default()).unwrap();
        let (par, par_stats) = parse_records_parallel(&lines, header, &ParseOptions { threads: 4 }).unwrap();

        assert_eq!(seq_stats, par_stats);
        assert_eq!(par_stats.total, 25_000);
        assert_eq!(par_stats.failed, 25);
        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(par.iter()) {
            match (a, b) {
                (Ok(a), Ok(b)) => assert_eq!(a.pos(), b.pos()),
                (Err(a), Err(b)) => assert_eq!(a, b),
                _ => panic!("sequential and parallel results differ"),
            }
        }
    }
}
