//! Section headers: the `get_section_header*` accessors and section-name resolution.

use bitflags::bitflags;

use crate::header::ParsedHeader;
use crate::ident::ElfClass;
use crate::raw::{read_shdr32, read_shdr64, SHDR32_SIZE, SHDR64_SIZE};
use crate::strtab::resolve_name;
use crate::Error;

/// This enum represents the type of an ELF section. Unrecognized values
/// (including the OS/processor/user reserved ranges) are preserved verbatim
/// in [`SectionType::Unknown`].
///
/// ## See also
/// - [Sections](https://www.sco.com/developers/gabi/latest/ch4.sheader.html) by SCO, Inc.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum SectionType {
    Null,
    ProgBits,
    SymTab,
    StrTab,
    Rela,
    Hash,
    Dynamic,
    Note,
    NoBits,
    Rel,
    ShLib,
    DynSym,
    InitArray,
    FiniArray,
    PreInitArray,
    Group,
    SymTabShndx,
    Unknown(u32),
}

impl From<u32> for SectionType {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Null,
            1 => Self::ProgBits,
            2 => Self::SymTab,
            3 => Self::StrTab,
            4 => Self::Rela,
            5 => Self::Hash,
            6 => Self::Dynamic,
            7 => Self::Note,
            8 => Self::NoBits,
            9 => Self::Rel,
            10 => Self::ShLib,
            11 => Self::DynSym,
            14 => Self::InitArray,
            15 => Self::FiniArray,
            16 => Self::PreInitArray,
            17 => Self::Group,
            18 => Self::SymTabShndx,
            value => Self::Unknown(value),
        }
    }
}

impl SectionType {
    pub fn raw(&self) -> u32 {
        match *self {
            Self::Null => 0,
            Self::ProgBits => 1,
            Self::SymTab => 2,
            Self::StrTab => 3,
            Self::Rela => 4,
            Self::Hash => 5,
            Self::Dynamic => 6,
            Self::Note => 7,
            Self::NoBits => 8,
            Self::Rel => 9,
            Self::ShLib => 10,
            Self::DynSym => 11,
            Self::InitArray => 14,
            Self::FiniArray => 15,
            Self::PreInitArray => 16,
            Self::Group => 17,
            Self::SymTabShndx => 18,
            Self::Unknown(value) => value,
        }
    }
}

bitflags! {
    /// Section attribute flags. Any bit combination is valid — these are a
    /// mask, not an enumeration.
    #[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
    pub struct SectionFlags: u64 {
        const WRITE             = 0x001;
        const ALLOC             = 0x002;
        const EXECINSTR         = 0x004;
        const MERGE             = 0x010;
        const STRINGS           = 0x020;
        const INFO_LINK         = 0x040;
        const LINK_ORDER        = 0x080;
        const OS_NONCONFORMING  = 0x100;
        const GROUP             = 0x200;
        const TLS               = 0x400;
        const MASKOS            = 0x0ff0_0000;
        const MASKPROC          = 0xf000_0000;
    }
}

/// A single section header, with its name already resolved through the
/// section-header string table.
#[derive(Clone, Copy, Debug)]
pub struct SectionRecord<'a> {
    pub sh_name: u32,
    pub sh_type: SectionType,
    pub sh_flags: SectionFlags,
    pub sh_addr: u64,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u64,
    pub sh_entsize: u64,
    /// Resolved section name, or `""` if it could not be resolved. Never an error.
    pub name: &'a str,
    pub index: u64,
}

/// Checks whether `section` is the canonical null section (all fields zero,
/// except `sh_size` and `sh_link` which may legitimately carry the
/// `SHN_LORESERVE` overflow encoding).
pub(crate) fn is_null_section(section: &SectionRecord) -> bool {
    section.sh_name == 0
        && section.sh_type.raw() == 0
        && section.sh_flags.bits() == 0
        && section.sh_addr == 0
        && section.sh_offset == 0
        && section.sh_info == 0
        && section.sh_addralign == 0
        && section.sh_entsize == 0
}

/// Reads the section header at `index`.
///
/// Fails with [`Error::Invalid`] if `index >= hdr.true_shnum` or the record
/// would read past the end of the buffer.
pub fn get_section_header<'a>(
    buffer: &'a [u8],
    hdr: &ParsedHeader,
    index: u64,
) -> Result<SectionRecord<'a>, Error> {
    if index >= hdr.true_shnum {
        return Err(Error::Invalid);
    }

    let record_size: u64 = match hdr.ei_class {
        ElfClass::Class32 => SHDR32_SIZE as u64,
        ElfClass::Class64 => SHDR64_SIZE as u64,
    };
    let stride = (hdr.e_shentsize as u64).checked_mul(index).ok_or(Error::Invalid)?;
    let off = hdr.e_shoff.checked_add(stride).ok_or(Error::Invalid)?;
    let end = off.checked_add(record_size).ok_or(Error::Invalid)?;
    if end > hdr.elf_size as u64 {
        return Err(Error::Invalid);
    }

    let slice = &buffer[off as usize..end as usize];
    let raw = match hdr.ei_class {
        ElfClass::Class32 => read_shdr32(slice, hdr.ei_data),
        ElfClass::Class64 => read_shdr64(slice, hdr.ei_data),
    }
    .ok_or(Error::Invalid)?;

    let mut section = SectionRecord {
        sh_name: raw.sh_name,
        sh_type: SectionType::from(raw.sh_type),
        sh_flags: SectionFlags::from_bits_retain(raw.sh_flags),
        sh_addr: raw.sh_addr,
        sh_offset: raw.sh_offset,
        sh_size: raw.sh_size,
        sh_link: raw.sh_link,
        sh_info: raw.sh_info,
        sh_addralign: raw.sh_addralign,
        sh_entsize: raw.sh_entsize,
        name: "",
        index,
    };
    section.name = resolve_section_name(buffer, hdr, &section);
    Ok(section)
}

/// Resolves a section's name through the section-header string table.
///
/// Returns `""` (never an error) if there is no string table, this is the
/// null section, or the name offset is out of bounds / not null-terminated.
fn resolve_section_name<'a>(buffer: &'a [u8], hdr: &ParsedHeader, section: &SectionRecord) -> &'a str {
    if hdr.true_shstrndx == 0 || section.index == 0 {
        return "";
    }

    // If this section *is* the string table, its own name is resolved
    // relative to its own offset rather than `hdr.string_table_offset` —
    // the two are equal once the header is fully parsed, but this path
    // also works mid-parse, before `string_table_offset` is set.
    let base = if section.index == hdr.true_shstrndx {
        section.sh_offset
    } else {
        hdr.string_table_offset
    };

    let Some(name_off) = base.checked_add(section.sh_name as u64) else {
        return "";
    };
    resolve_name(buffer, hdr.elf_size, name_off)
}

/// Looks up a section by its resolved name.
///
/// Iterates `0..true_shnum`, skipping indices that fail to read, and returns
/// the first (lowest-index) section whose name matches byte-exactly.
/// Returns [`Error::NotFound`] if no section matches.
pub fn get_section_header_by_name<'a>(
    buffer: &'a [u8],
    hdr: &ParsedHeader,
    name: &str,
) -> Result<SectionRecord<'a>, Error> {
    for index in 0..hdr.true_shnum {
        if let Ok(section) = get_section_header(buffer, hdr, index) {
            if section.name == name {
                return Ok(section);
            }
        }
    }
    Err(Error::NotFound)
}
