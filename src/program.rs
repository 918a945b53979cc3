//! Program headers (segments): the `get_program_header` accessor and `copy_segment`.

use crate::header::ParsedHeader;
use crate::ident::ElfClass;
use crate::raw::{read_phdr32, read_phdr64, PHDR32_SIZE, PHDR64_SIZE};
use crate::Error;

/// Out-of-band sentinel returned by [`copy_segment`] on failure — kept as a
/// raw `u64` rather than folded into [`Error`] for bit-compatible interop
/// with callers bridging to the original C ABI, which used `UINT64_MAX` for
/// the same purpose.
pub const ERROR_SENTINEL: u64 = u64::MAX;

/// This enum represents the type of a segment (program header entry).
/// Unrecognized values (including the OS/processor reserved range) are
/// preserved verbatim in [`SegmentType::Unknown`].
///
/// ## See also
/// - [Program Header](https://www.sco.com/developers/gabi/latest/ch5.pheader.html) by SCO, Inc.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum SegmentType {
    Null,
    Load,
    Dynamic,
    Interp,
    Note,
    ShLib,
    Phdr,
    Tls,
    Unknown(u32),
}

impl From<u32> for SegmentType {
    fn from(value: u32) -> Self {
        match value {
            0x0 => Self::Null,
            0x1 => Self::Load,
            0x2 => Self::Dynamic,
            0x3 => Self::Interp,
            0x4 => Self::Note,
            0x5 => Self::ShLib,
            0x6 => Self::Phdr,
            0x7 => Self::Tls,
            value => Self::Unknown(value),
        }
    }
}

bitflags::bitflags! {
    /// Segment permission flags. Any bit combination is valid.
    #[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
    pub struct SegmentFlags: u32 {
        const EXECUTABLE = 0x1;
        const WRITABLE   = 0x2;
        const READABLE   = 0x4;
        const MASKOS     = 0x0ff0_0000;
        const MASKPROC   = 0xf000_0000;
    }
}

/// A single program header (segment) entry.
#[derive(Clone, Copy, Debug)]
pub struct ProgramHeaderRecord {
    pub p_type: SegmentType,
    pub p_offset: u64,
    pub p_vaddr: u64,
    pub p_paddr: u64,
    pub p_filesz: u64,
    pub p_memsz: u64,
    pub p_flags: SegmentFlags,
    pub p_align: u64,
    pub index: u64,
}

/// Reads the program header at `index`.
///
/// Fails with [`Error::Invalid`] if `index >= hdr.e_phnum` or the record
/// would read past the end of the buffer.
pub fn get_program_header(buffer: &[u8], hdr: &ParsedHeader, index: u64) -> Result<ProgramHeaderRecord, Error> {
    if index >= hdr.e_phnum as u64 {
        return Err(Error::Invalid);
    }

    let record_size: u64 = match hdr.ei_class {
        ElfClass::Class32 => PHDR32_SIZE as u64,
        ElfClass::Class64 => PHDR64_SIZE as u64,
    };
    let off = hdr
        .e_phoff
        .checked_add(hdr.e_phentsize as u64 * index)
        .ok_or(Error::Invalid)?;
    let end = off.checked_add(record_size).ok_or(Error::Invalid)?;
    if end > hdr.elf_size as u64 {
        return Err(Error::Invalid);
    }

    let slice = &buffer[off as usize..end as usize];
    let raw = match hdr.ei_class {
        ElfClass::Class32 => read_phdr32(slice, hdr.ei_data),
        ElfClass::Class64 => read_phdr64(slice, hdr.ei_data),
    }
    .ok_or(Error::Invalid)?;

    Ok(ProgramHeaderRecord {
        p_type: SegmentType::from(raw.p_type),
        p_offset: raw.p_offset,
        p_vaddr: raw.p_vaddr,
        p_paddr: raw.p_paddr,
        p_filesz: raw.p_filesz,
        p_memsz: raw.p_memsz,
        p_flags: SegmentFlags::from_bits_retain(raw.p_flags),
        p_align: raw.p_align,
        index,
    })
}

/// Copies up to `dest.len()` bytes of the segment's in-memory image,
/// starting `skip` bytes into it, including the implicit zero-fill tail
/// when `p_memsz > p_filesz`.
///
/// `dest = None` is query mode: returns `p_memsz` without touching `skip`.
/// Returns [`ERROR_SENTINEL`] if the segment cannot be read or its file
/// range runs past the end of the buffer. Otherwise returns how many bytes
/// of the segment remain unsatisfied after this call — callers can drain a
/// segment in chunks by advancing `skip` by the bytes consumed each call,
/// until this reaches 0.
pub fn copy_segment(
    buffer: &[u8],
    hdr: &ParsedHeader,
    segment_index: u64,
    dest: Option<&mut [u8]>,
    skip: u64,
) -> u64 {
    let Ok(program_header) = get_program_header(buffer, hdr, segment_index) else {
        return ERROR_SENTINEL;
    };

    let Some(dest) = dest else {
        return program_header.p_memsz;
    };

    match program_header.p_offset.checked_add(program_header.p_filesz) {
        Some(end) if end <= hdr.elf_size as u64 => {}
        _ => return ERROR_SENTINEL,
    }

    let remaining_capacity = program_header.p_memsz.saturating_sub(skip);
    let mut num_bytes = (dest.len() as u64).min(remaining_capacity);
    let mut dest_off = 0usize;
    let mut total_copied = 0u64;

    if skip < program_header.p_filesz {
        let num_file_bytes = num_bytes.min(program_header.p_filesz - skip);
        let src_start = program_header.p_offset + skip;
        let src = &buffer[src_start as usize..(src_start + num_file_bytes) as usize];
        dest[dest_off..dest_off + num_file_bytes as usize].copy_from_slice(src);
        dest_off += num_file_bytes as usize;
        num_bytes -= num_file_bytes;
        total_copied += num_file_bytes;
    }

    for byte in &mut dest[dest_off..dest_off + num_bytes as usize] {
        *byte = 0;
    }
    total_copied += num_bytes;

    program_header.p_memsz - skip - total_copied
}

/// [`Result`]-returning wrapper around [`copy_segment`] for callers that
/// would rather match on [`Error`] than compare against [`ERROR_SENTINEL`].
pub fn copy_segment_checked(
    buffer: &[u8],
    hdr: &ParsedHeader,
    segment_index: u64,
    dest: Option<&mut [u8]>,
    skip: u64,
) -> Result<u64, Error> {
    match copy_segment(buffer, hdr, segment_index, dest, skip) {
        ERROR_SENTINEL => Err(Error::Invalid),
        bytes_left => Ok(bytes_left),
    }
}
