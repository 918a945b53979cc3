//! Identification, the file header, and the derived-metadata resolver.
//!
//! [`parse`] is the library's single entry point: it validates the buffer,
//! picks class and endianness, reads the file header, then resolves the
//! `SHN_LORESERVE`/`SHN_XINDEX` escapes and locates `.symtab`/`.strtab` so
//! every later accessor can work from a flat, already-validated descriptor.

use crate::ident::{ElfClass, ElfEndian, ElfIdent, ElfOsAbi, ElfVersion, MIN_ELF_SIZE, SHN_XINDEX};
use crate::raw::{read_ehdr32, read_ehdr64, EHDR32_SIZE, EHDR64_SIZE};
use crate::section::{get_section_header, get_section_header_by_name, is_null_section};
use crate::Error;

/// This enum represents the `e_type` field of the file header: what kind of
/// object file this is. Unrecognized values (including the OS/processor
/// reserved ranges) are preserved verbatim in [`FileType::Unknown`].
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum FileType {
    None,
    Relocatable,
    Executable,
    SharedObject,
    Core,
    Unknown(u16),
}

impl From<u16> for FileType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Relocatable,
            2 => Self::Executable,
            3 => Self::SharedObject,
            4 => Self::Core,
            value => Self::Unknown(value),
        }
    }
}

/// The descriptor returned by [`parse`]. Every later accessor takes the
/// buffer and a reference to this struct; nothing here is mutated again
/// once `parse` returns.
#[derive(Clone, Copy, Debug)]
pub struct ParsedHeader {
    pub ei_class: ElfClass,
    pub ei_data: ElfEndian,
    pub ei_version: ElfVersion,
    pub ei_osabi: ElfOsAbi,
    pub ei_abiversion: u8,

    pub e_type: FileType,
    pub e_machine: u16,
    pub e_version: u32,
    pub e_entry: u64,
    pub e_phoff: u64,
    pub e_shoff: u64,
    pub e_flags: u32,
    pub e_ehsize: u16,
    pub e_phentsize: u16,
    pub e_phnum: u16,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,

    /// Total size in bytes of the buffer this header was parsed from.
    pub elf_size: usize,

    /// Real section count, resolved from the `SHN_LORESERVE` escape.
    pub true_shnum: u64,
    /// Real section-header string-table index, resolved from the `SHN_XINDEX` escape.
    pub true_shstrndx: u64,
    /// Byte offset of the section-name string table's payload, or 0 if absent.
    pub string_table_offset: u64,

    /// Byte offset of `.symtab`'s payload, or 0 if there is no `.symtab`.
    pub symbol_table_offset: u64,
    /// Per-entry stride of `.symtab`, or 0 if there is no `.symtab`.
    pub symbol_entry_size: u64,
    /// Number of entries in `.symtab`, or 0 if there is no `.symtab`.
    pub symbol_num: u64,
    /// Byte offset of the string table `.symtab` links to, or 0 if absent.
    pub symbol_string_table_offset: u64,
}

/// Parses the ELF identification prefix and file header out of `buffer`,
/// then resolves every derived field described in the module doc.
///
/// Fails with [`Error::Invalid`] if the buffer is too short, the magic bytes
/// or identification fields are invalid, `e_version` is unrecognized, or the
/// section-header string table is indicated but unreadable.
pub fn parse(buffer: &[u8]) -> Result<ParsedHeader, Error> {
    if buffer.len() < MIN_ELF_SIZE {
        return Err(Error::Invalid);
    }

    let ident = ElfIdent::parse(buffer).ok_or(Error::Invalid)?;
    let elf_size = buffer.len();

    let (ehdr_size, raw) = match ident.class {
        ElfClass::Class32 => (EHDR32_SIZE, read_ehdr32(buffer, ident.data)),
        ElfClass::Class64 => (EHDR64_SIZE, read_ehdr64(buffer, ident.data)),
    };
    if buffer.len() < ehdr_size {
        return Err(Error::Invalid);
    }
    let raw = raw.ok_or(Error::Invalid)?;

    if raw.e_version != 1 {
        return Err(Error::Invalid);
    }

    let mut hdr = ParsedHeader {
        ei_class: ident.class,
        ei_data: ident.data,
        ei_version: ident.version,
        ei_osabi: ident.osabi,
        ei_abiversion: ident.abiversion,

        e_type: FileType::from(raw.e_type),
        e_machine: raw.e_machine,
        e_version: raw.e_version,
        e_entry: raw.e_entry,
        e_phoff: raw.e_phoff,
        e_shoff: raw.e_shoff,
        e_flags: raw.e_flags,
        e_ehsize: raw.e_ehsize,
        e_phentsize: raw.e_phentsize,
        e_phnum: raw.e_phnum,
        e_shentsize: raw.e_shentsize,
        e_shnum: raw.e_shnum,
        e_shstrndx: raw.e_shstrndx,

        elf_size,

        true_shnum: 0,
        true_shstrndx: 0,
        string_table_offset: 0,

        symbol_table_offset: 0,
        symbol_entry_size: 0,
        symbol_num: 0,
        symbol_string_table_offset: 0,
    };

    hdr.true_shnum = resolve_true_shnum(buffer, &hdr);
    hdr.true_shstrndx = resolve_true_shstrndx(buffer, &hdr);

    if hdr.true_shstrndx != 0 {
        let section = get_section_header(buffer, &hdr, hdr.true_shstrndx).map_err(|_| Error::Invalid)?;
        hdr.string_table_offset = section.sh_offset;
    }

    if let Ok(symtab) = get_section_header_by_name(buffer, &hdr, ".symtab") {
        hdr.symbol_table_offset = symtab.sh_offset;
        hdr.symbol_entry_size = symtab.sh_entsize;
        hdr.symbol_num = if symtab.sh_entsize == 0 {
            0
        } else {
            symtab.sh_size / symtab.sh_entsize
        };
        if let Ok(strtab) = get_section_header(buffer, &hdr, symtab.sh_link as u64) {
            hdr.symbol_string_table_offset = strtab.sh_offset;
        }
    }

    Ok(hdr)
}

/// Resolves the true section count, handling the `SHN_LORESERVE` overflow
/// encoding: if `e_shnum == 0`, section 0's `sh_size` holds the real count,
/// provided section 0 reads as the canonical null section.
fn resolve_true_shnum(buffer: &[u8], hdr: &ParsedHeader) -> u64 {
    if hdr.e_shnum != 0 {
        return hdr.e_shnum as u64;
    }

    // Tentatively trust there is one section (the null one at index 0) so
    // the read below can succeed at all.
    let mut probe = *hdr;
    probe.true_shnum = 1;
    match get_section_header(buffer, &probe, 0) {
        Ok(section) if is_null_section(&section) => section.sh_size,
        _ => 0,
    }
}

/// Resolves the true section-header string-table index, handling the
/// `SHN_XINDEX` overflow encoding: if `e_shstrndx == SHN_XINDEX`, section 0's
/// `sh_link` holds the real index.
fn resolve_true_shstrndx(buffer: &[u8], hdr: &ParsedHeader) -> u64 {
    if hdr.true_shnum == 0 {
        return 0;
    }
    if hdr.e_shstrndx == SHN_XINDEX {
        return match get_section_header(buffer, hdr, 0) {
            Ok(section) => section.sh_link as u64,
            Err(_) => 0,
        };
    }
    hdr.e_shstrndx as u64
}
