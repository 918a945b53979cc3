//! Cross-cutting tests exercising whole-file scenarios that don't belong to
//! any single accessor module.

pub(crate) mod support;

use support::{synth_elf32, synth_elf64, SynthOptions};

use crate::{copy_segment, get_program_header, get_section_header_by_name, get_symbol_by_name, parse, Error};

#[test]
fn buffers_shorter_than_a_32_bit_header_are_rejected() {
    let bytes = [0u8; crate::MIN_ELF_SIZE - 1];
    assert!(matches!(parse(&bytes), Err(Error::Invalid)));
}

#[test]
fn class_and_endianness_are_independent_axes() {
    for big_endian in [false, true] {
        let mut opts = SynthOptions::default();
        opts.big_endian = big_endian;

        let hdr32 = parse(&synth_elf32(&opts)).unwrap();
        assert_eq!(hdr32.ei_class, crate::ElfClass::Class32);

        let hdr64 = parse(&synth_elf64(&opts)).unwrap();
        assert_eq!(hdr64.ei_class, crate::ElfClass::Class64);
    }
}

#[test]
fn full_pipeline_resolves_section_symbol_and_segment_together() {
    let mut opts = SynthOptions::default();
    opts.with_symtab = true;
    let bytes = synth_elf64(&opts);
    let hdr = parse(&bytes).unwrap();

    let text = get_section_header_by_name(&bytes, &hdr, ".text").unwrap();
    assert_eq!(text.sh_size, 8);

    let main = get_symbol_by_name(&bytes, &hdr, "main").unwrap();
    assert_eq!(main.st_shndx, 1);

    let segment = get_program_header(&bytes, &hdr, 0).unwrap();
    assert_eq!(segment.p_memsz, 16);

    let mut dest = [0u8; 16];
    let remaining = copy_segment(&bytes, &hdr, 0, Some(&mut dest), 0);
    assert_eq!(remaining, 0);
    assert_eq!(&dest[0..8], &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn shnum_and_shstrndx_escapes_combine() {
    let mut opts = SynthOptions::default();
    opts.shnum_escape = true;
    opts.shstrndx_escape = true;
    let bytes = synth_elf64(&opts);
    let hdr = parse(&bytes).unwrap();

    assert_eq!(hdr.true_shnum, 3);
    assert_eq!(hdr.true_shstrndx, 1);
    assert!(get_section_header_by_name(&bytes, &hdr, ".text").is_ok());
}
