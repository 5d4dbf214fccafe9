//! FastVcf CLI entry point
//!
//! Validates, decomposes and (un)compresses VCF files.

use clap::{Parser, Subcommand, ValueEnum};
use fast_vcf::core::{IoStrategy, InputSource, LARGE_BUFFER_SIZE};
use fast_vcf::formats::{
    parse_records_parallel, GenotypeTagging, NumberedLine, ParseOptions, ParseStats, VcfReader, VcfRecord,
};
use fast_vcf::LineError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Input strategy (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum IoArg {
    /// Pick by file size
    #[default]
    #[value(name = "auto")]
    Auto,
    /// Buffered reads with a 1MB buffer
    #[value(name = "buffered")]
    Buffered,
    /// Memory-map the whole file
    #[value(name = "mmap")]
    Mmap,
}

impl From<IoArg> for IoStrategy {
    fn from(arg: IoArg) -> Self {
        match arg {
            IoArg::Auto => IoStrategy::Auto,
            IoArg::Buffered => IoStrategy::Buffered(LARGE_BUFFER_SIZE),
            IoArg::Mmap => IoStrategy::MemoryMapped,
        }
    }
}

/// Genotype tag attached to decomposed variants (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum TagArg {
    /// ALT index, 1-based
    #[default]
    #[value(name = "index")]
    Index,
    /// ALT allele text
    #[value(name = "allele")]
    Allele,
}

impl From<TagArg> for GenotypeTagging {
    fn from(arg: TagArg) -> Self {
        match arg {
            TagArg::Index => GenotypeTagging::Index,
            TagArg::Allele => GenotypeTagging::Allele,
        }
    }
}

#[derive(Parser)]
#[command(name = "fast-vcf")]
#[command(about = "Lazy VCF parsing, variant decomposition and genotype compression")]
#[command(version)]
#[command(author = "FastVcf Contributors")]
struct Cli {
    /// Input strategy: auto, buffered or mmap
    #[arg(long = "io", global = true, default_value = "auto")]
    io: IoArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every record and report problems
    Check {
        /// Input VCF file ('-' for stdin)
        input: PathBuf,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },

    /// Print the minimal variants of each record
    Variants {
        /// Input VCF file ('-' for stdin)
        input: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Genotype tag: index or allele
        #[arg(long = "tag", default_value = "index")]
        tag: TagArg,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },

    /// Replace sample columns with HOM/HET/MISSING INFO entries
    Compress {
        /// Input VCF file ('-' for stdin)
        input: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },

    /// Rebuild GT sample columns from HOM/HET/MISSING INFO entries
    Uncompress {
        /// Input VCF file ('-' for stdin)
        input: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
}

fn open_output(output: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::with_capacity(LARGE_BUFFER_SIZE, File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Parsed input: the header, every data line, and its parse result
struct Loaded {
    reader: VcfReader<InputSource>,
    lines: Vec<NumberedLine>,
    results: Vec<Result<VcfRecord, LineError>>,
    stats: ParseStats,
}

impl Loaded {
    /// Successfully parsed records; failures are logged
    fn records(&self) -> impl Iterator<Item = &VcfRecord> {
        self.results.iter().filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        })
    }
}

/// Read and parse every data line
fn load_records(input: &Path, io: IoArg, threads: usize) -> anyhow::Result<Loaded> {
    let start = Instant::now();
    eprintln!("Reading VCF file: {:?}", input);

    let mut reader = VcfReader::open(input, io.into())
        .map_err(|e| anyhow::anyhow!("Failed to open {:?}: {}", input, e))?;
    let lines = reader.read_data_lines()?;
    let (results, stats) = parse_records_parallel(&lines, Arc::clone(reader.header()), &ParseOptions { threads })?;

    eprintln!("Parsed {} records in {:.2}s", stats.parsed, start.elapsed().as_secs_f64());
    Ok(Loaded {
        reader,
        lines,
        results,
        stats,
    })
}

/// Rewrite every record with `rewrite`; lines that failed to parse are
/// written back unchanged. Returns how many rewrites succeeded.
fn rewrite_records<F>(
    out: &mut dyn Write,
    lines: &[NumberedLine],
    results: &mut [Result<VcfRecord, LineError>],
    mut rewrite: F,
) -> io::Result<usize>
where
    F: FnMut(&mut VcfRecord) -> bool,
{
    let mut rewritten = 0usize;
    for ((_, line), result) in lines.iter().zip(results.iter_mut()) {
        match result {
            Ok(record) => {
                if rewrite(record) {
                    rewritten += 1;
                }
                writeln!(out, "{}", record)?;
            }
            Err(e) => {
                log::warn!("{}; copied unchanged", e);
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(rewritten)
}

fn write_header(out: &mut dyn Write, reader: &VcfReader<InputSource>) -> io::Result<()> {
    let text = reader.header().to_string();
    if !text.is_empty() {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

fn print_stats(title: &str, stats: &ParseStats) {
    eprintln!("\n=== {} Statistics ===", title);
    eprintln!("Total records:   {}", stats.total);
    eprintln!("Parsed:          {}", stats.parsed);
    eprintln!("Failed:          {}", stats.failed);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Check { input, threads } => {
            let loaded = load_records(&input, cli.io, threads)?;

            let mut warnings = 0usize;
            let mut flagged = 0usize;
            let mut out = open_output(None)?;
            for record in loaded.records() {
                let diagnostics = record.check();
                if !diagnostics.is_empty() {
                    flagged += 1;
                }
                for diagnostic in diagnostics {
                    writeln!(out, "{}", diagnostic)?;
                    warnings += 1;
                }
            }
            out.flush()?;

            print_stats("Check", &loaded.stats);
            eprintln!("Flagged records: {}", flagged);
            eprintln!("Diagnostics:     {}", warnings);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Variants { input, output, tag, threads } => {
            let loaded = load_records(&input, cli.io, threads)?;
            let tagging = GenotypeTagging::from(tag);

            let mut out = open_output(output.as_ref())?;
            let mut emitted = 0usize;
            let mut failed = 0usize;
            for record in loaded.records() {
                match record.variants(tagging) {
                    Ok(variants) => {
                        for variant in variants {
                            writeln!(
                                out,
                                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                                variant.chrom,
                                variant.pos(),
                                variant.end,
                                if variant.reference.is_empty() { "." } else { &variant.reference },
                                if variant.alt.is_empty() { "." } else { &variant.alt },
                                variant.variant_type,
                                variant.genotype,
                            )?;
                            emitted += 1;
                        }
                    }
                    Err(e) => {
                        log::warn!("{}:{}: {}", record.chrom(), record.pos(), e);
                        failed += 1;
                    }
                }
            }
            out.flush()?;

            print_stats("Decomposition", &loaded.stats);
            eprintln!("Variants:        {}", emitted);
            eprintln!("Undecomposable:  {}", failed);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Compress { input, output, threads } => {
            let mut loaded = load_records(&input, cli.io, threads)?;

            let mut out = open_output(output.as_ref())?;
            write_header(&mut out, &loaded.reader)?;
            let compressed = rewrite_records(&mut out, &loaded.lines, &mut loaded.results, |record| match record.compress_genotypes() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("{}:{}: {}", record.chrom(), record.pos(), e);
                    false
                }
            })?;
            out.flush()?;

            print_stats("Compression", &loaded.stats);
            eprintln!("Compressed:      {}", compressed);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Uncompress { input, output, threads } => {
            let mut loaded = load_records(&input, cli.io, threads)?;

            let mut out = open_output(output.as_ref())?;
            write_header(&mut out, &loaded.reader)?;
            let restored = rewrite_records(&mut out, &loaded.lines, &mut loaded.results, |record| {
                record.uncompress_genotypes()
            })?;
            out.flush()?;

            print_stats("Uncompression", &loaded.stats);
            eprintln!("Uncompressed:    {}", restored);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
