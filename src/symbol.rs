//! Symbol table entries: the `get_symbol*` accessors and symbol-name resolution.

use crate::header::ParsedHeader;
use crate::ident::ElfClass;
use crate::raw::{read_sym32, read_sym64, SYM32_SIZE, SYM64_SIZE};
use crate::strtab::resolve_name;
use crate::Error;

/// `st_info >> 4`: the symbol's binding.
///
/// ## See also
/// - [Symbol Table](https://www.sco.com/developers/gabi/latest/ch4.symtab.html) by SCO, Inc.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum SymbolBind {
    Local,
    Global,
    Weak,
    Unknown(u8),
}

impl From<u8> for SymbolBind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Local,
            1 => Self::Global,
            2 => Self::Weak,
            value => Self::Unknown(value),
        }
    }
}

/// `st_info & 0xF`: the symbol's type.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum SymbolType {
    NoType,
    Object,
    Func,
    Section,
    File,
    Common,
    Tls,
    Unknown(u8),
}

impl From<u8> for SymbolType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::NoType,
            1 => Self::Object,
            2 => Self::Func,
            3 => Self::Section,
            4 => Self::File,
            5 => Self::Common,
            6 => Self::Tls,
            value => Self::Unknown(value),
        }
    }
}

/// `st_other & 0x3`: the symbol's visibility.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum SymbolVisibility {
    Default,
    Internal,
    Hidden,
    Protected,
}

impl From<u8> for SymbolVisibility {
    fn from(value: u8) -> Self {
        match value & 0x3 {
            0 => Self::Default,
            1 => Self::Internal,
            2 => Self::Hidden,
            _ => Self::Protected,
        }
    }
}

/// A single symbol table entry, with its name already resolved through the
/// linked string table.
#[derive(Clone, Copy, Debug)]
pub struct SymbolRecord<'a> {
    pub st_name: u32,
    pub st_value: u64,
    pub st_size: u64,
    pub st_info: u8,
    pub st_other: u8,
    pub st_shndx: u16,
    pub st_bind: SymbolBind,
    pub st_type: SymbolType,
    pub st_visibility: SymbolVisibility,
    /// Resolved symbol name, or `""` if it could not be resolved. Never an error.
    pub name: &'a str,
    pub index: u64,
}

/// Reads the symbol at `index` in `.symtab`.
///
/// Fails with [`Error::Invalid`] if `index >= hdr.symbol_num` or the record
/// would read past the end of the buffer.
pub fn get_symbol<'a>(buffer: &'a [u8], hdr: &ParsedHeader, index: u64) -> Result<SymbolRecord<'a>, Error> {
    if index >= hdr.symbol_num {
        return Err(Error::Invalid);
    }

    let record_size: u64 = match hdr.ei_class {
        ElfClass::Class32 => SYM32_SIZE as u64,
        ElfClass::Class64 => SYM64_SIZE as u64,
    };
    let off = hdr
        .symbol_table_offset
        .checked_add(hdr.symbol_entry_size * index)
        .ok_or(Error::Invalid)?;
    let end = off.checked_add(record_size).ok_or(Error::Invalid)?;
    if end > hdr.elf_size as u64 {
        return Err(Error::Invalid);
    }

    let slice = &buffer[off as usize..end as usize];
    let raw = match hdr.ei_class {
        ElfClass::Class32 => read_sym32(slice, hdr.ei_data),
        ElfClass::Class64 => read_sym64(slice, hdr.ei_data),
    }
    .ok_or(Error::Invalid)?;

    let name_off = hdr.symbol_string_table_offset.checked_add(raw.st_name as u64);
    let name = if hdr.symbol_string_table_offset == 0 || index == 0 {
        ""
    } else {
        match name_off {
            Some(off) => resolve_name(buffer, hdr.elf_size, off),
            None => "",
        }
    };

    Ok(SymbolRecord {
        st_name: raw.st_name,
        st_value: raw.st_value,
        st_size: raw.st_size,
        st_info: raw.st_info,
        st_other: raw.st_other,
        st_shndx: raw.st_shndx,
        st_bind: SymbolBind::from(raw.st_info >> 4),
        st_type: SymbolType::from(raw.st_info & 0xF),
        st_visibility: SymbolVisibility::from(raw.st_other),
        name,
        index,
    })
}

/// Looks up a symbol by its resolved name.
///
/// Iterates `0..symbol_num`, skipping indices that fail to read, and returns
/// the first (lowest-index) symbol whose name matches byte-exactly. Returns
/// [`Error::NotFound`] if no symbol matches.
pub fn get_symbol_by_name<'a>(buffer: &'a [u8], hdr: &ParsedHeader, name: &str) -> Result<SymbolRecord<'a>, Error> {
    for index in 0..hdr.symbol_num {
        if let Ok(symbol) = get_symbol(buffer, hdr, index) {
            if symbol.name == name {
                return Ok(symbol);
            }
        }
    }
    Err(Error::NotFound)
}
