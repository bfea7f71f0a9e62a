//! Address-range allocation inside a parent network.

use crate::models::{align_up, block_size, Ipv4, MAX_LENGTH};

/// Packs subnets one after another from the start of a parent network.
///
/// Each subnet starts on its own size boundary so it is a valid CIDR; any
/// alignment padding is left unused.
#[derive(Debug, Clone)]
pub struct SubnetAllocator {
    parent: Ipv4,
    next: u64,
}

impl SubnetAllocator {
    pub fn new(parent: Ipv4) -> SubnetAllocator {
        SubnetAllocator {
            parent: parent.network(),
            next: u32::from(parent.lo()) as u64,
        }
    }

    /// Take the next `/prefix` block, or `None` when it would pass the end
    /// of the parent network.
    pub fn allocate(&mut self, prefix: u8) -> Option<Ipv4> {
        if prefix < self.parent.prefix || prefix > MAX_LENGTH {
            return None;
        }
        let start = align_up(self.next, prefix);
        let end = start + block_size(prefix) - 1;
        if end > u32::from(self.parent.hi()) as u64 {
            log::debug!(
                "allocate(/{prefix}) in {}: {start:#x}-{end:#x} past the end",
                self.parent
            );
            return None;
        }
        self.next = end + 1;
        Ipv4::from_bits(start as u32, prefix).ok()
    }
}

/// Lowest `/prefix` range inside `block` that overlaps nothing in `taken`.
pub fn find_free_range(block: &Ipv4, prefix: u8, taken: &[Ipv4]) -> Option<Ipv4> {
    if prefix < block.prefix || prefix > MAX_LENGTH {
        return None;
    }
    let size = block_size(prefix);
    let last = u32::from(block.hi()) as u64;
    let mut start = u32::from(block.lo()) as u64;

    while start + size - 1 <= last {
        let candidate = Ipv4::from_bits(start as u32, prefix).ok()?;
        match taken.iter().find(|t| t.overlaps(&candidate)) {
            // Jump past the blocking range instead of stepping one block at a time.
            Some(blocker) => start = align_up(u32::from(blocker.hi()) as u64 + 1, prefix),
            None => return Some(candidate),
        }
    }
    None
}
