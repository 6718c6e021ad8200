//! FdWriter - writes rendered lines to a file descriptor

use contracts::{ContractError, InitArg, LogWriter};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, Write};
use tracing::{debug, instrument};

const WRITER: &str = "fd";

/// Writer bound to a raw file descriptor
///
/// `init` duplicates the descriptor and `destroy` closes the duplicate, so
/// the caller's descriptor (stdout for `"std"`) is never closed.
#[derive(Debug, Default)]
pub struct FdWriter {
    file: Mutex<Option<File>>,
}

impl FdWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.file.lock().is_some()
    }
}

impl LogWriter for FdWriter {
    #[instrument(name = "fd_writer_init", skip(self))]
    fn init(&self, arg: &InitArg) -> Result<(), ContractError> {
        let InitArg::Fd(fd) = arg else {
            return Err(ContractError::writer_init(
                WRITER,
                format!("expected a file descriptor argument, got {arg:?}"),
            ));
        };
        let file = dup_fd(*fd)
            .map_err(|e| ContractError::writer_init(WRITER, format!("dup({fd}) failed: {e}")))?;

        *self.file.lock() = Some(file);
        debug!(fd, "FdWriter opened");
        Ok(())
    }

    fn destroy(&self) {
        if self.file.lock().take().is_some() {
            debug!("FdWriter closed");
        }
    }

    fn write(&self, data: &[u8]) -> Result<(), ContractError> {
        let mut guard = self.file.lock();
        let file = guard
            .as_mut()
            .ok_or_else(|| ContractError::writer_write(WRITER, "descriptor not open"))?;
        file.write_all(data)
            .map_err(|e| ContractError::writer_write(WRITER, e.to_string()))
    }
}

#[cfg(unix)]
fn dup_fd(fd: i32) -> io::Result<File> {
    use std::os::fd::FromRawFd;

    if fd < 0 {
        return Err(io::Error::from_raw_os_error(libc::EBADF));
    }
    // SAFETY: fcntl only inspects the descriptor table; an invalid fd yields -1/EBADF.
    let dup = unsafe { libc::fcntl(fd, libc::F_DUPFD_CLOEXEC, 0) };
    if dup < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: `dup` is a freshly created descriptor nothing else owns.
    Ok(unsafe { File::from_raw_fd(dup) })
}

#[cfg(not(unix))]
fn dup_fd(_fd: i32) -> io::Result<File> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "raw descriptors are only supported on unix",
    ))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom};
    use std::os::fd::AsRawFd;

    #[test]
    fn test_fd_writer_writes_to_descriptor() {
        let mut file = tempfile::tempfile().unwrap();
        let writer = FdWriter::new();

        writer.init(&InitArg::Fd(file.as_raw_fd())).unwrap();
        writer.write(b"one\n").unwrap();
        writer.write(b"two\n").unwrap();
        writer.destroy();

        file.seek(SeekFrom::Start(0)).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn test_destroy_keeps_callers_descriptor_open() {
        let mut file = tempfile::tempfile().unwrap();
        let writer = FdWriter::new();

        writer.init(&InitArg::Fd(file.as_raw_fd())).unwrap();
        writer.destroy();
        assert!(!writer.is_open());

        // The original descriptor is still usable
        file.write_all(b"still open").unwrap();
    }

    #[test]
    fn test_init_rejects_bad_arguments() {
        let writer = FdWriter::new();
        assert!(writer.init(&InitArg::None).is_err());
        assert!(writer.init(&InitArg::Fd(-1)).is_err());
        assert!(!writer.is_open());
    }

    #[test]
    fn test_write_before_init_fails() {
        let writer = FdWriter::new();
        assert!(matches!(
            writer.write(b"x"),
            Err(ContractError::WriterWrite { .. })
        ));
        // destroy without init is harmless
        writer.destroy();
    }
}
