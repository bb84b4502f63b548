//! Raw directory entry reading
//!
//! This module wraps the Linux `getdents64` system call: a directory is
//! opened as a file descriptor, entries are read in fixed-size batches of
//! packed variable-length `linux_dirent64` records and decoded one by one
//! from the byte buffer. The fd is owned by the stream and closed when the
//! stream is dropped, on every exit path.

use std::ffi::{CString, OsStr, OsString};
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

/// Batch size for one getdents64 call. Large enough to amortize the syscall,
/// small enough to keep the per-recursion-frame footprint bounded.
pub(crate) const DIRENT_BUF_SIZE: usize = 4096;

/// Fixed-layout prefix of a linux_dirent64 record:
/// d_ino (u64) + d_off (u64) + d_reclen (u16) + d_type (u8).
const DIRENT_HEADER_LEN: usize = 19;

/// Entry classification from the d_type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    RegularFile,
    Directory,
    /// Symlinks, devices, sockets, pipes; never matched, never recursed
    Other,
    /// Filesystem did not report a type; treated like Other
    Unknown,
}

impl EntryKind {
    fn from_d_type(d_type: u8) -> Self {
        match d_type {
            libc::DT_REG => EntryKind::RegularFile,
            libc::DT_DIR => EntryKind::Directory,
            libc::DT_UNKNOWN => EntryKind::Unknown,
            _ => EntryKind::Other,
        }
    }
}

/// One decoded directory entry
#[derive(Debug)]
pub(crate) struct RawDirEntry {
    pub ino: u64,
    pub kind: EntryKind,
    pub name: OsString,
}

impl RawDirEntry {
    /// `.` and `..` are skipped before any filter evaluation
    pub fn is_dot(&self) -> bool {
        self.name == *"." || self.name == *".."
    }
}

fn read_u64(buf: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[..8]);
    u64::from_ne_bytes(bytes)
}

fn read_u16(buf: &[u8]) -> u16 {
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(&buf[..2]);
    u16::from_ne_bytes(bytes)
}

/// Decode one record from the front of `buf`, returning the entry and the
/// number of bytes consumed.
///
/// `buf` must be the filled, unconsumed portion of the batch buffer. The
/// record length is validated against it so a corrupt length can never move
/// the cursor out of bounds, and the name is only searched for its NUL
/// terminator inside the record boundary.
pub(crate) fn parse_record(buf: &[u8]) -> io::Result<(RawDirEntry, usize)> {
    if buf.len() < DIRENT_HEADER_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "truncated directory record header",
        ));
    }

    let ino = read_u64(&buf[0..8]);
    // d_off at 8..16 is an opaque seek cookie; not needed for batch parsing
    let reclen = read_u16(&buf[16..18]) as usize;
    let d_type = buf[18];

    if reclen <= DIRENT_HEADER_LEN || reclen > buf.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "directory record length out of bounds",
        ));
    }

    let name_field = &buf[DIRENT_HEADER_LEN..reclen];
    let name_len = name_field
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(name_field.len());
    let name = OsString::from_vec(name_field[..name_len].to_vec());

    Ok((
        RawDirEntry {
            ino,
            kind: EntryKind::from_d_type(d_type),
            name,
        },
        reclen,
    ))
}

/// A stream of raw entries for one open directory.
///
/// Holds the directory fd, the batch buffer and the read cursor. One stream
/// lives per recursion frame of the traversal; dropping it closes the fd.
pub(crate) struct DirStream {
    fd: OwnedFd,
    buf: [u8; DIRENT_BUF_SIZE],
    filled: usize,
    cursor: usize,
}

impl DirStream {
    /// Open `path` in read-only, directory-only mode.
    ///
    /// O_DIRECTORY makes the open fail with ENOTDIR for anything that is not
    /// a directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"))?;

        let fd = unsafe {
            libc::open(
                c_path.as_ptr(),
                libc::O_RDONLY | libc::O_DIRECTORY | libc::O_CLOEXEC,
            )
        };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(Self {
            // SAFETY: fd was just returned by open and is not owned elsewhere
            fd: unsafe { OwnedFd::from_raw_fd(fd) },
            buf: [0; DIRENT_BUF_SIZE],
            filled: 0,
            cursor: 0,
        })
    }

    /// Return the next entry, refilling the batch buffer from getdents64
    /// when it is exhausted. `Ok(None)` marks the end of the directory.
    pub fn next_entry(&mut self) -> io::Result<Option<RawDirEntry>> {
        if self.cursor >= self.filled {
            if self.fill()? == 0 {
                return Ok(None);
            }
        }

        let (entry, consumed) = parse_record(&self.buf[self.cursor..self.filled])?;
        self.cursor += consumed;
        Ok(Some(entry))
    }

    /// Issue one getdents64 call; returns the number of bytes now in the
    /// buffer, 0 at end of directory.
    fn fill(&mut self) -> io::Result<usize> {
        let nread = unsafe {
            libc::syscall(
                libc::SYS_getdents64,
                self.fd.as_raw_fd(),
                self.buf.as_mut_ptr(),
                DIRENT_BUF_SIZE,
            )
        };
        if nread < 0 {
            return Err(io::Error::last_os_error());
        }

        self.filled = nread as usize;
        self.cursor = 0;
        Ok(self.filled)
    }

    /// Metadata query scoped to this open directory handle plus an entry
    /// name: one fstatat call, no symlink following. Returns (size, nlinks).
    pub fn stat_entry(&self, name: &OsStr) -> io::Result<(u64, u64)> {
        let c_name = CString::new(name.as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "name contains a NUL byte"))?;

        let mut stat: libc::stat = unsafe { std::mem::zeroed() };
        let rc = unsafe {
            libc::fstatat(
                self.fd.as_raw_fd(),
                c_name.as_ptr(),
                &mut stat,
                libc::AT_SYMLINK_NOFOLLOW,
            )
        };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }

        #[allow(clippy::unnecessary_cast)] // st_nlink is u32 on some targets
        Ok((stat.st_size as u64, stat.st_nlink as u64))
    }
}
