//! Input layer
//!
//! Opens VCF text from a file or stdin. Files are read through a buffer
//! sized for the file, or memory-mapped once they pass [`MMAP_THRESHOLD`].
//! [`LineIterator`] then hands out lines with their 1-based numbers.

use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Stdin};
use std::path::Path;

/// Buffer for small inputs and stdin (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Buffer for inputs over 10MB (1MB)
pub const LARGE_BUFFER_SIZE: usize = 1024 * 1024;

/// Files at least this large are memory-mapped under [`IoStrategy::Auto`] (100MB)
pub const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

const LARGE_FILE: u64 = 10 * 1024 * 1024;

/// How a file is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoStrategy {
    /// Buffered reads with the given buffer size
    Buffered(usize),
    MemoryMapped,
    /// Pick one of the above from the file size
    #[default]
    Auto,
}

impl IoStrategy {
    /// Concrete strategy for a file of `file_size` bytes
    pub fn resolve(self, file_size: u64) -> IoStrategy {
        match self {
            IoStrategy::Auto if file_size >= MMAP_THRESHOLD => IoStrategy::MemoryMapped,
            IoStrategy::Auto if file_size > LARGE_FILE => IoStrategy::Buffered(LARGE_BUFFER_SIZE),
            IoStrategy::Auto => IoStrategy::Buffered(DEFAULT_BUFFER_SIZE),
            concrete => concrete,
        }
    }
}

/// Open VCF input: a buffered file, a mapped file, or stdin
pub enum InputSource {
    File(BufReader<File>),
    Mapped(Cursor<Mmap>),
    Stdin(BufReader<Stdin>),
}

impl InputSource {
    /// Open `path` (`-` for stdin)
    pub fn open<P: AsRef<Path>>(path: P, strategy: IoStrategy) -> io::Result<Self> {
        let path = path.as_ref();
        if path.as_os_str() == "-" {
            return Ok(InputSource::Stdin(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, io::stdin())));
        }

        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        match strategy.resolve(file_size) {
            IoStrategy::MemoryMapped => {
                log::debug!("memory mapping {} ({} bytes)", path.display(), file_size);
                // SAFETY: the file is opened read-only and is not expected to change while mapped
                let mmap = unsafe { Mmap::map(&file)? };
                Ok(InputSource::Mapped(Cursor::new(mmap)))
            }
            IoStrategy::Buffered(capacity) => Ok(InputSource::File(BufReader::with_capacity(capacity, file))),
            IoStrategy::Auto => Ok(InputSource::File(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))),
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, InputSource::Mapped(_))
    }

    fn inner(&mut self) -> &mut dyn BufRead {
        match self {
            InputSource::File(reader) => reader,
            InputSource::Mapped(reader) => reader,
            InputSource::Stdin(reader) => reader,
        }
    }
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner().read(buf)
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner().fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner().consume(amt)
    }
}

/// Numbered lines over a reader, reusing one buffer
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: String,
    line_number: usize,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
            line_number: 0,
        }
    }

    /// Read the next line without its terminator
    ///
    /// Returns None at EOF, otherwise the 1-based line number and text.
    pub fn next_line(&mut self) -> Option<io::Result<(usize, &str)>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = self.buffer.trim_end_matches('\n').trim_end_matches('\r').len();
                self.buffer.truncate(trimmed);
                self.line_number += 1;
                Some(Ok((self.line_number, &self.buffer)))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Lines read so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_auto_resolves_by_size() {
        assert_eq!(IoStrategy::default(), IoStrategy::Auto);
        assert_eq!(IoStrategy::Auto.resolve(1024), IoStrategy::Buffered(DEFAULT_BUFFER_SIZE));
        assert_eq!(IoStrategy::Auto.resolve(LARGE_FILE + 1), IoStrategy::Buffered(LARGE_BUFFER_SIZE));
        assert_eq!(IoStrategy::Auto.resolve(MMAP_THRESHOLD), IoStrategy::MemoryMapped);
        assert_eq!(IoStrategy::Buffered(64).resolve(MMAP_THRESHOLD), IoStrategy::Buffered(64));
    }

    #[test]
    fn test_small_vcf_is_buffered() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "##fileformat=VCFv4.1")?;

        let source = InputSource::open(temp.path(), IoStrategy::Auto)?;
        assert!(!source.is_mapped());
        Ok(())
    }

    #[test]
    fn test_mapped_vcf_reads_numbered_lines() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(b"#CHROM\tPOS\n1\t100\n")?;
        temp.flush()?;

        let source = InputSource::open(temp.path(), IoStrategy::MemoryMapped)?;
        assert!(source.is_mapped());
        let mut lines = LineIterator::new(source);
        assert_eq!(lines.next_line().unwrap()?, (1, "#CHROM\tPOS"));
        assert_eq!(lines.next_line().unwrap()?, (2, "1\t100"));
        assert!(lines.next_line().is_none());
        Ok(())
    }

    #[test]
    fn test_line_iterator_strips_crlf() -> io::Result<()> {
        let data: &[u8] = b"a\r\nb\n\nc";
        let mut lines = LineIterator::new(data);

        assert_eq!(lines.next_line().unwrap()?, (1, "a"));
        assert_eq!(lines.next_line().unwrap()?, (2, "b"));
        assert_eq!(lines.next_line().unwrap()?, (3, ""));
        assert_eq!(lines.next_line().unwrap()?, (4, "c"));
        assert!(lines.next_line().is_none());
        assert_eq!(lines.line_number(), 4);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = InputSource::open("/nonexistent/input.vcf", IoStrategy::Auto).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
