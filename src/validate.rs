//! Pure range predicates for every enum-like field domain.
//!
//! Each predicate reports whether a raw numeric value lies in a defined
//! range: the base range, or an OS-/processor-specific reserved range, but
//! never the gap between them. `e_machine` and the two `*_flags` domains
//! accept every value, per §4.5 of the design.

/// `ei_class`: 32-bit or 64-bit, nothing else.
pub fn is_valid_ei_class(value: u8) -> bool {
    value == 1 || value == 2
}

/// `ei_data`: little-endian or big-endian, nothing else.
pub fn is_valid_ei_data(value: u8) -> bool {
    value == 1 || value == 2
}

/// `ei_version`: only one version of the format has ever existed.
pub fn is_valid_ei_version(value: u8) -> bool {
    value == 1
}

/// `e_version`: same domain as `ei_version`, carried in a wider field.
pub fn is_valid_e_version(value: u32) -> bool {
    value == 1
}

/// `ei_osabi`: base range through GNU/Linux, or the Solaris..NSK run, or the
/// processor-reserved tail starting at `LOARCH`.
pub fn is_valid_ei_osabi(value: u8) -> bool {
    value <= 0x03 || (0x06..=0x0E).contains(&value) || value >= 0x40
}

/// `e_type`: base range through `ET_CORE`, or the OS-specific range starting
/// at `ET_LOOS`.
pub fn is_valid_e_type(value: u16) -> bool {
    value <= 0x0004 || value >= 0xFE00
}

/// `e_machine`: new architectures are assigned over time, so every value is accepted.
pub fn is_valid_e_machine(_value: u16) -> bool {
    true
}

/// `sh_type`: base range through `SHT_DYNSYM`, the array-section run through
/// `SHT_SYMTAB_SHNDX`, or the OS/processor/user reserved tail.
pub fn is_valid_sh_type(value: u32) -> bool {
    (0x0000_0000..=0x0000_000B).contains(&value)
        || (0x0000_000E..=0x0000_0012).contains(&value)
        || value >= 0x6000_0000
}

/// `sh_flags`: a bit mask; any combination is valid.
pub fn is_valid_sh_flags(_value: u64) -> bool {
    true
}

/// `st_bind`: base range through `STB_WEAK`, or the OS/processor reserved tail.
pub fn is_valid_st_bind(value: u8) -> bool {
    value <= 0x02 || value >= 0x0A
}

/// `st_type`: base range through `STT_TLS`, or the OS/processor reserved tail.
pub fn is_valid_st_type(value: u8) -> bool {
    value <= 0x06 || value >= 0x0A
}

/// `st_visibility`: only two bits wide, and all four combinations are defined.
pub fn is_valid_st_visibility(_value: u8) -> bool {
    true
}

/// `p_type`: base range through `PT_TLS`, or the OS/processor reserved range.
pub fn is_valid_p_type(value: u32) -> bool {
    value <= 0x0000_0007 || (0x6000_0000..=0x7FFF_FFFF).contains(&value)
}

/// `p_flags`: a bit mask; any combination is valid.
pub fn is_valid_p_flags(_value: u32) -> bool {
    true
}
