//! Synthetic ELF byte-buffer construction for tests.
//!
//! There is no fixture binary in this tree, so every test builds its own
//! buffer from scratch: one `LOAD` segment backed by 8 bytes of file content
//! and zero-filled out to a 16-byte memory image, a `.text` section covering
//! those same 8 bytes, and (optionally) a `.symtab`/`.strtab` pair defining a
//! single global `main` function symbol.

use std::vec::Vec;

use crate::ident::{ElfClass, SHN_XINDEX};
use crate::raw::{EHDR32_SIZE, EHDR64_SIZE, PHDR32_SIZE, PHDR64_SIZE, SHDR32_SIZE, SHDR64_SIZE, SYM32_SIZE, SYM64_SIZE};

#[derive(Clone, Copy)]
pub(crate) struct SynthOptions {
    pub big_endian: bool,
    /// Signal `e_shnum == 0` and stash the real count in section 0's `sh_size`.
    pub shnum_escape: bool,
    /// Signal `e_shstrndx == SHN_XINDEX` and stash the real index in section 0's `sh_link`.
    pub shstrndx_escape: bool,
    /// Add a `.symtab`/`.strtab` pair defining a single `main` symbol.
    pub with_symtab: bool,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            big_endian: false,
            shnum_escape: false,
            shstrndx_escape: false,
            with_symtab: false,
        }
    }
}

fn push16(buf: &mut Vec<u8>, v: u16, be: bool) {
    buf.extend_from_slice(&if be { v.to_be_bytes() } else { v.to_le_bytes() });
}

fn push32(buf: &mut Vec<u8>, v: u32, be: bool) {
    buf.extend_from_slice(&if be { v.to_be_bytes() } else { v.to_le_bytes() });
}

fn push64(buf: &mut Vec<u8>, v: u64, be: bool) {
    buf.extend_from_slice(&if be { v.to_be_bytes() } else { v.to_le_bytes() });
}

struct ShdrFields {
    sh_name: u32,
    sh_type: u32,
    sh_flags: u64,
    sh_addr: u64,
    sh_offset: u64,
    sh_size: u64,
    sh_link: u32,
    sh_info: u32,
    sh_addralign: u64,
    sh_entsize: u64,
}

fn push_shdr(buf: &mut Vec<u8>, is64: bool, be: bool, f: &ShdrFields) {
    push32(buf, f.sh_name, be);
    push32(buf, f.sh_type, be);
    if is64 {
        push64(buf, f.sh_flags, be);
        push64(buf, f.sh_addr, be);
        push64(buf, f.sh_offset, be);
        push64(buf, f.sh_size, be);
    } else {
        push32(buf, f.sh_flags as u32, be);
        push32(buf, f.sh_addr as u32, be);
        push32(buf, f.sh_offset as u32, be);
        push32(buf, f.sh_size as u32, be);
    }
    push32(buf, f.sh_link, be);
    push32(buf, f.sh_info, be);
    if is64 {
        push64(buf, f.sh_addralign, be);
        push64(buf, f.sh_entsize, be);
    } else {
        push32(buf, f.sh_addralign as u32, be);
        push32(buf, f.sh_entsize as u32, be);
    }
}

struct SymFields {
    st_name: u32,
    st_info: u8,
    st_other: u8,
    st_shndx: u16,
    st_value: u64,
    st_size: u64,
}

fn push_sym(buf: &mut Vec<u8>, is64: bool, be: bool, f: &SymFields) {
    if is64 {
        push32(buf, f.st_name, be);
        buf.push(f.st_info);
        buf.push(f.st_other);
        push16(buf, f.st_shndx, be);
        push64(buf, f.st_value, be);
        push64(buf, f.st_size, be);
    } else {
        push32(buf, f.st_name, be);
        push32(buf, f.st_value as u32, be);
        push32(buf, f.st_size as u32, be);
        buf.push(f.st_info);
        buf.push(f.st_other);
        push16(buf, f.st_shndx, be);
    }
}

pub(crate) fn synth_elf64(opts: &SynthOptions) -> Vec<u8> {
    build(opts, ElfClass::Class64)
}

pub(crate) fn synth_elf32(opts: &SynthOptions) -> Vec<u8> {
    build(opts, ElfClass::Class32)
}

fn build(opts: &SynthOptions, class: ElfClass) -> Vec<u8> {
    let be = opts.big_endian;
    let is64 = class == ElfClass::Class64;

    let segment_bytes: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

    let mut shstrtab = Vec::new();
    shstrtab.push(0u8);
    let shstrtab_name_off = shstrtab.len() as u32;
    shstrtab.extend_from_slice(b".shstrtab\0");
    let text_name_off = shstrtab.len() as u32;
    shstrtab.extend_from_slice(b".text\0");
    let (symtab_name_off, strtab_name_off) = if opts.with_symtab {
        let s = shstrtab.len() as u32;
        shstrtab.extend_from_slice(b".symtab\0");
        let t = shstrtab.len() as u32;
        shstrtab.extend_from_slice(b".strtab\0");
        (s, t)
    } else {
        (0, 0)
    };

    let mut strtab = Vec::new();
    let main_name_off = if opts.with_symtab {
        strtab.push(0u8);
        let off = strtab.len() as u32;
        strtab.extend_from_slice(b"main\0");
        off
    } else {
        0
    };

    let ehdr_size = if is64 { EHDR64_SIZE } else { EHDR32_SIZE };
    let phdr_size = if is64 { PHDR64_SIZE } else { PHDR32_SIZE };
    let shdr_size = if is64 { SHDR64_SIZE } else { SHDR32_SIZE };
    let sym_size = if is64 { SYM64_SIZE } else { SYM32_SIZE };

    let section_count: u64 = if opts.with_symtab { 5 } else { 3 };

    let phdr_off = ehdr_size as u64;
    let text_off = phdr_off + phdr_size as u64;
    let shstrtab_off = text_off + segment_bytes.len() as u64;
    let symtab_off = shstrtab_off + shstrtab.len() as u64;
    let strtab_off = symtab_off + if opts.with_symtab { 2 * sym_size as u64 } else { 0 };
    let shdr_off = strtab_off + strtab.len() as u64;

    let mut buf = Vec::new();

    buf.extend_from_slice(&[0x7F, b'E', b'L', b'F']);
    buf.push(if is64 { 2 } else { 1 });
    buf.push(if be { 2 } else { 1 });
    buf.push(1); // ei_version
    buf.push(0); // ei_osabi
    buf.push(0); // ei_abiversion
    buf.extend_from_slice(&[0u8; 7]); // padding

    push16(&mut buf, 1, be); // e_type = ET_REL
    push16(&mut buf, 0x3E, be); // e_machine = EM_X86_64
    push32(&mut buf, 1, be); // e_version

    let shstrndx_field = if opts.shstrndx_escape { SHN_XINDEX } else { 1 };
    let shnum_field = if opts.shnum_escape { 0 } else { section_count as u16 };

    if is64 {
        push64(&mut buf, 0, be); // e_entry
        push64(&mut buf, phdr_off, be); // e_phoff
        push64(&mut buf, shdr_off, be); // e_shoff
    } else {
        push32(&mut buf, 0, be);
        push32(&mut buf, phdr_off as u32, be);
        push32(&mut buf, shdr_off as u32, be);
    }
    push32(&mut buf, 0, be); // e_flags
    push16(&mut buf, ehdr_size as u16, be); // e_ehsize
    push16(&mut buf, phdr_size as u16, be); // e_phentsize
    push16(&mut buf, 1, be); // e_phnum
    push16(&mut buf, shdr_size as u16, be); // e_shentsize
    push16(&mut buf, shnum_field, be); // e_shnum
    push16(&mut buf, shstrndx_field, be); // e_shstrndx

    debug_assert_eq!(buf.len(), ehdr_size);

    if is64 {
        push32(&mut buf, 1, be); // p_type = PT_LOAD
        push32(&mut buf, 0x5, be); // p_flags = R|X
        push64(&mut buf, text_off, be); // p_offset
        push64(&mut buf, 0, be); // p_vaddr
        push64(&mut buf, 0, be); // p_paddr
        push64(&mut buf, segment_bytes.len() as u64, be); // p_filesz
        push64(&mut buf, 16, be); // p_memsz
        push64(&mut buf, 1, be); // p_align
    } else {
        push32(&mut buf, 1, be); // p_type
        push32(&mut buf, text_off as u32, be); // p_offset
        push32(&mut buf, 0, be); // p_vaddr
        push32(&mut buf, 0, be); // p_paddr
        push32(&mut buf, segment_bytes.len() as u32, be); // p_filesz
        push32(&mut buf, 16, be); // p_memsz
        push32(&mut buf, 0x5, be); // p_flags
        push32(&mut buf, 1, be); // p_align
    }
    debug_assert_eq!(buf.len() as u64, text_off);

    buf.extend_from_slice(&segment_bytes);
    debug_assert_eq!(buf.len() as u64, shstrtab_off);
    buf.extend_from_slice(&shstrtab);

    if opts.with_symtab {
        debug_assert_eq!(buf.len() as u64, symtab_off);
        push_sym(
            &mut buf,
            is64,
            be,
            &SymFields {
                st_name: 0,
                st_info: 0,
                st_other: 0,
                st_shndx: 0,
                st_value: 0,
                st_size: 0,
            },
        );
        push_sym(
            &mut buf,
            is64,
            be,
            &SymFields {
                st_name: main_name_off,
                st_info: (1 << 4) | 2, // STB_GLOBAL, STT_FUNC
                st_other: 0,
                st_shndx: 1,
                st_value: 0x1000,
                st_size: 32,
            },
        );
        debug_assert_eq!(buf.len() as u64, strtab_off);
        buf.extend_from_slice(&strtab);
    }
    debug_assert_eq!(buf.len() as u64, shdr_off);

    let (sh_size_0, sh_link_0) = (
        if opts.shnum_escape { section_count } else { 0 },
        if opts.shstrndx_escape { 1 } else { 0 },
    );
    push_shdr(
        &mut buf,
        is64,
        be,
        &ShdrFields {
            sh_name: 0,
            sh_type: 0,
            sh_flags: 0,
            sh_addr: 0,
            sh_offset: 0,
            sh_size: sh_size_0,
            sh_link: sh_link_0,
            sh_info: 0,
            sh_addralign: 0,
            sh_entsize: 0,
        },
    );
    push_shdr(
        &mut buf,
        is64,
        be,
        &ShdrFields {
            sh_name: shstrtab_name_off,
            sh_type: 3, // SHT_STRTAB
            sh_flags: 0,
            sh_addr: 0,
            sh_offset: shstrtab_off,
            sh_size: shstrtab.len() as u64,
            sh_link: 0,
            sh_info: 0,
            sh_addralign: 1,
            sh_entsize: 0,
        },
    );
    push_shdr(
        &mut buf,
        is64,
        be,
        &ShdrFields {
            sh_name: text_name_off,
            sh_type: 1, // SHT_PROGBITS
            sh_flags: 0x6, // ALLOC | EXECINSTR
            sh_addr: 0,
            sh_offset: text_off,
            sh_size: segment_bytes.len() as u64,
            sh_link: 0,
            sh_info: 0,
            sh_addralign: 1,
            sh_entsize: 0,
        },
    );
    if opts.with_symtab {
        push_shdr(
            &mut buf,
            is64,
            be,
            &ShdrFields {
                sh_name: symtab_name_off,
                sh_type: 2, // SHT_SYMTAB
                sh_flags: 0,
                sh_addr: 0,
                sh_offset: symtab_off,
                sh_size: 2 * sym_size as u64,
                sh_link: 4, // index of .strtab
                sh_info: 1,
                sh_addralign: 8,
                sh_entsize: sym_size as u64,
            },
        );
        push_shdr(
            &mut buf,
            is64,
            be,
            &ShdrFields {
                sh_name: strtab_name_off,
                sh_type: 3, // SHT_STRTAB
                sh_flags: 0,
                sh_addr: 0,
                sh_offset: strtab_off,
                sh_size: strtab.len() as u64,
                sh_link: 0,
                sh_info: 0,
                sh_addralign: 1,
                sh_entsize: 0,
            },
        );
    }

    buf
}
