//! Shared string-table lookup: resolving a byte offset into a borrowed,
//! null-terminated name.

/// Returns the null-terminated string starting at `name_off` in `buffer`, or
/// `""` if `name_off` is out of bounds, no terminator exists before the end
/// of the buffer, or the bytes are not valid UTF-8.
///
/// Never errors: an unresolvable name is a valid (empty) result, not a
/// failure of the record it belongs to.
pub(crate) fn resolve_name(buffer: &[u8], elf_size: usize, name_off: u64) -> &str {
    let Ok(name_off) = usize::try_from(name_off) else {
        return "";
    };
    if name_off >= elf_size {
        return "";
    }
    let Some(tail) = buffer.get(name_off..elf_size) else {
        return "";
    };
    let Some(nul) = tail.iter().position(|&b| b == 0) else {
        return "";
    };
    core::str::from_utf8(&tail[..nul]).unwrap_or("")
}
