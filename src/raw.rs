//! Class-specialised raw readers.
//!
//! One pair of readers (32-bit, 64-bit) per record kind, translating the
//! on-disk packed layout into a record whose fields are already widened to
//! 64 bits. These readers do not bounds-check `bytes`; callers (the
//! accessors in [`crate::section`], [`crate::symbol`], [`crate::program`])
//! guarantee the slice they pass in is long enough for the class in use.

use crate::endian::read_advance;
use crate::ident::ElfEndian;

/// Total size in bytes of a 32-bit file header, `e_ident` included.
pub const EHDR32_SIZE: usize = 16 + 36;
/// Total size in bytes of a 64-bit file header, `e_ident` included.
pub const EHDR64_SIZE: usize = 16 + 48;

pub const SHDR32_SIZE: usize = 40;
pub const SHDR64_SIZE: usize = 64;

pub const SYM32_SIZE: usize = 16;
pub const SYM64_SIZE: usize = 24;

pub const PHDR32_SIZE: usize = 32;
pub const PHDR64_SIZE: usize = 56;

/// Widened, class-agnostic view of the fixed-size tail of an ELF file header
/// (everything after `e_ident`).
#[derive(Clone, Copy, Debug, Default)]
pub struct RawEhdr {
    pub e_type: u16,
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
}

/// Reads the fixed-size tail of a 32-bit file header, starting right after
/// `e_ident` (i.e. `bytes` is the whole header, offset 16 onward is consumed).
pub fn read_ehdr32(bytes: &[u8], endian: ElfEndian) -> Option<RawEhdr> {
    let mut off = 16usize;
    Some(RawEhdr {
        e_type: read_advance(bytes, &mut off, endian)?,
        e_machine: read_advance(bytes, &mut off, endian)?,
        e_version: read_advance(bytes, &mut off, endian)?,
        e_entry: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        e_phoff: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        e_shoff: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        e_flags: read_advance(bytes, &mut off, endian)?,
        e_ehsize: read_advance(bytes, &mut off, endian)?,
        e_phentsize: read_advance(bytes, &mut off, endian)?,
        e_phnum: read_advance(bytes, &mut off, endian)?,
        e_shentsize: read_advance(bytes, &mut off, endian)?,
        e_shnum: read_advance(bytes, &mut off, endian)?,
        e_shstrndx: read_advance(bytes, &mut off, endian)?,
    })
}

/// Reads the fixed-size tail of a 64-bit file header. `e_entry`/`e_phoff`/`e_shoff`
/// are full 64-bit fields here, unlike the 32-bit layout.
pub fn read_ehdr64(bytes: &[u8], endian: ElfEndian) -> Option<RawEhdr> {
    let mut off = 16usize;
    Some(RawEhdr {
        e_type: read_advance(bytes, &mut off, endian)?,
        e_machine: read_advance(bytes, &mut off, endian)?,
        e_version: read_advance(bytes, &mut off, endian)?,
        e_entry: read_advance(bytes, &mut off, endian)?,
        e_phoff: read_advance(bytes, &mut off, endian)?,
        e_shoff: read_advance(bytes, &mut off, endian)?,
        e_flags: read_advance(bytes, &mut off, endian)?,
        e_ehsize: read_advance(bytes, &mut off, endian)?,
        e_phentsize: read_advance(bytes, &mut off, endian)?,
        e_phnum: read_advance(bytes, &mut off, endian)?,
        e_shentsize: read_advance(bytes, &mut off, endian)?,
        e_shnum: read_advance(bytes, &mut off, endian)?,
        e_shstrndx: read_advance(bytes, &mut off, endian)?,
    })
}

/// Widened, class-agnostic view of a section header.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawShdr {
    pub sh_name: u32,
    pub sh_type: u32,
    pub sh_flags: u64,
    pub sh_addr: u64,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u64,
    pub sh_entsize: u64,
}

pub fn read_shdr32(bytes: &[u8], endian: ElfEndian) -> Option<RawShdr> {
    let mut off = 0usize;
    Some(RawShdr {
        sh_name: read_advance(bytes, &mut off, endian)?,
        sh_type: read_advance(bytes, &mut off, endian)?,
        sh_flags: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        sh_addr: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        sh_offset: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        sh_size: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        sh_link: read_advance(bytes, &mut off, endian)?,
        sh_info: read_advance(bytes, &mut off, endian)?,
        sh_addralign: read_advance::<u32>(bytes, &mut off, endian)? as u64,
        sh_entsize: read_advance::<u32>(bytes, &mut off, endian)? as u64,
    })
}

pub fn read_shdr64(bytes: &[u8], endian: ElfEndian) -> Option<RawShdr> {
    let mut off = 0usize;
    Some(RawShdr {
        sh_name: read_advance(bytes, &mut off, endian)?,
        sh_type: read_advance(bytes, &mut off, endian)?,
        sh_flags: read_advance(bytes, &mut off, endian)?,
        sh_addr: read_advance(bytes, &mut off, endian)?,
        sh_offset: read_advance(bytes, &mut off, endian)?,
        sh_size: read_advance(bytes, &mut off, endian)?,
        sh_link: read_advance(bytes, &mut off, endian)?,
        sh_info: read_advance(bytes, &mut off, endian)?,
        sh_addralign: read_advance(bytes, &mut off, endian)?,
        sh_entsize: read_advance(bytes, &mut off, endian)?,
    })
}

/// Widened, class-agnostic view of a symbol table entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawSym {
    pub st_name: u32,
    pub st_value: u64,
    pub st_size: u64,
    pub st_info: u8,
    pub st_other: u8,
    pub st_shndx: u16,
}

/// 32-bit field order is `name, value, size, info, other, shndx`.
pub fn read_sym32(bytes: &[u8], endian: ElfEndian) -> Option<RawSym> {
    let mut off = 0usize;
    let st_name = read_advance(bytes, &mut off, endian)?;
    let st_value: u32 = read_advance(bytes, &mut off, endian)?;
    let st_size: u32 = read_advance(bytes, &mut off, endian)?;
    let st_info = *bytes.get(off)?;
    off += 1;
    let st_other = *bytes.get(off)?;
    off += 1;
    let st_shndx = read_advance(bytes, &mut off, endian)?;
    Some(RawSym {
        st_name,
        st_value: st_value as u64,
        st_size: st_size as u64,
        st_info,
        st_other,
        st_shndx,
    })
}

/// 64-bit field order is `name, info, other, shndx, value, size` — note this
/// differs from the 32-bit layout, with `info`/`other`/`shndx` moved earlier.
pub fn read_sym64(bytes: &[u8], endian: ElfEndian) -> Option<RawSym> {
    let mut off = 0usize;
    let st_name = read_advance(bytes, &mut off, endian)?;
    let st_info = *bytes.get(off)?;
    off += 1;
    let st_other = *bytes.get(off)?;
    off += 1;
    let st_shndx = read_advance(bytes, &mut off, endian)?;
    let st_value = read_advance(bytes, &mut off, endian)?;
    let st_size = read_advance(bytes, &mut off, endian)?;
    Some(RawSym {
        st_name,
        st_value,
        st_size,
        st_info,
        st_other,
        st_shndx,
    })
}

/// Widened, class-agnostic view of a program (segment) header.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawPhdr {
    pub p_type: u32,
    pub p_offset: u64,
    pub p_vaddr: u64,
    pub p_paddr: u64,
    pub p_filesz: u64,
    pub p_memsz: u64,
    pub p_flags: u32,
    pub p_align: u64,
}

/// 32-bit field order is `type, offset, vaddr, paddr, filesz, memsz, flags, align`.
pub fn read_phdr32(bytes: &[u8], endian: ElfEndian) -> Option<RawPhdr> {
    let mut off = 0usize;
    let p_type = read_advance(bytes, &mut off, endian)?;
    let p_offset: u32 = read_advance(bytes, &mut off, endian)?;
    let p_vaddr: u32 = read_advance(bytes, &mut off, endian)?;
    let p_paddr: u32 = read_advance(bytes, &mut off, endian)?;
    let p_filesz: u32 = read_advance(bytes, &mut off, endian)?;
    let p_memsz: u32 = read_advance(bytes, &mut off, endian)?;
    let p_flags = read_advance(bytes, &mut off, endian)?;
    let p_align: u32 = read_advance(bytes, &mut off, endian)?;
    Some(RawPhdr {
        p_type,
        p_offset: p_offset as u64,
        p_vaddr: p_vaddr as u64,
        p_paddr: p_paddr as u64,
        p_filesz: p_filesz as u64,
        p_memsz: p_memsz as u64,
        p_flags,
        p_align: p_align as u64,
    })
}

/// 64-bit field order is `type, flags, offset, vaddr, paddr, filesz, memsz, align`
/// — `flags` moves up right after `type`, unlike the 32-bit layout.
pub fn read_phdr64(bytes: &[u8], endian: ElfEndian) -> Option<RawPhdr> {
    let mut off = 0usize;
    let p_type = read_advance(bytes, &mut off, endian)?;
    let p_flags = read_advance(bytes, &mut off, endian)?;
    let p_offset = read_advance(bytes, &mut off, endian)?;
    let p_vaddr = read_advance(bytes, &mut off, endian)?;
    let p_paddr = read_advance(bytes, &mut off, endian)?;
    let p_filesz = read_advance(bytes, &mut off, endian)?;
    let p_memsz = read_advance(bytes, &mut off, endian)?;
    let p_align = read_advance(bytes, &mut off, endian)?;
    Some(RawPhdr {
        p_type,
        p_offset,
        p_vaddr,
        p_paddr,
        p_filesz,
        p_memsz,
        p_flags,
        p_align,
    })
}
