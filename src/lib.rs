//! A read-only parser for ELF object files that operates directly on
//! caller-owned byte buffers.
//!
//! Every accessor takes the whole file as a `&[u8]` plus a [`ParsedHeader`]
//! produced by [`parse`], and returns either a borrowed record or one of the
//! two [`Error`] variants. Nothing here allocates, performs I/O, or assumes
//! anything about the host's endianness: malformed or truncated input is
//! rejected rather than panicked on.

#![no_std]

#[cfg(test)]
extern crate std;

mod endian;
mod header;
mod ident;
mod program;
mod raw;
mod section;
mod strtab;
mod symbol;
mod validate;

#[cfg(test)]
pub(crate) mod tests;

pub use header::{parse, FileType, ParsedHeader};
pub use ident::{ElfClass, ElfEndian, ElfIdent, ElfOsAbi, ElfVersion, MAGIC, MIN_ELF_SIZE, SHN_XINDEX};
pub use program::{
    copy_segment, copy_segment_checked, get_program_header, ProgramHeaderRecord, SegmentFlags, SegmentType,
    ERROR_SENTINEL,
};
pub use section::{get_section_header, get_section_header_by_name, SectionFlags, SectionRecord, SectionType};
pub use symbol::{get_symbol, get_symbol_by_name, SymbolBind, SymbolRecord, SymbolType, SymbolVisibility};
pub use validate::{
    is_valid_e_machine, is_valid_e_type, is_valid_e_version, is_valid_ei_class, is_valid_ei_data,
    is_valid_ei_osabi, is_valid_ei_version, is_valid_p_flags, is_valid_p_type, is_valid_sh_flags, is_valid_sh_type,
    is_valid_st_bind, is_valid_st_type, is_valid_st_visibility,
};

/// Every way a parse or lookup can fail.
///
/// There is deliberately no variant carrying a byte offset or a message:
/// every caller-visible failure is either "this input is malformed or
/// truncated" or "this lookup had no match".
#[derive(thiserror_no_std::Error, Clone, Copy, Eq, PartialEq, Debug)]
pub enum Error {
    /// The buffer is too short, malformed, or a computed offset/size runs
    /// past the end of it.
    #[error("malformed or truncated ELF input")]
    Invalid,
    /// The lookup was well-formed but no matching record exists.
    #[error("no matching record found")]
    NotFound,
}
