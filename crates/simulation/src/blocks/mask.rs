use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, BitXor, Not};

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A set of mutually-exclusive airport resources (runway, taxiway segment,
/// terminal, ...), one bit per resource. Two 64-bit words give room for
/// large layouts.
///
/// Bit 127 is reserved for [`BlockMask::NOTHING`], the sentinel meaning
/// "this position guards no resource". It is never granted.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode, Serialize, Deserialize,
)]
pub struct BlockMask {
    pub low: u64,
    pub high: u64,
}

impl BlockMask {
    pub const EMPTY: BlockMask = BlockMask { low: 0, high: 0 };
    pub const NOTHING: BlockMask = BlockMask {
        low: 0,
        high: 1 << 63,
    };
    /// Highest bit index usable for a real resource.
    pub const MAX_BIT: u8 = 126;

    /// Mask with a single resource bit set.
    pub const fn bit(index: u8) -> BlockMask {
        if index < 64 {
            BlockMask {
                low: 1 << index,
                high: 0,
            }
        } else {
            BlockMask {
                low: 0,
                high: 1 << (index - 64),
            }
        }
    }

    pub const fn union(self, other: BlockMask) -> BlockMask {
        BlockMask {
            low: self.low | other.low,
            high: self.high | other.high,
        }
    }

    pub fn is_empty(self) -> bool {
        self.low == 0 && self.high == 0
    }

    pub fn intersects(self, other: BlockMask) -> bool {
        !(self & other).is_empty()
    }

    /// True when every bit of `other` is also set in `self`.
    pub fn contains(self, other: BlockMask) -> bool {
        (self & other) == other
    }

    /// `self` with the bits of `other` cleared.
    pub fn without(self, other: BlockMask) -> BlockMask {
        self & !other
    }

    /// The grantable part of the mask, i.e. without the sentinel bit.
    pub fn resources(self) -> BlockMask {
        self.without(BlockMask::NOTHING)
    }

    pub fn is_nothing(self) -> bool {
        self == BlockMask::NOTHING
    }

    /// Indices of the resource bits set in this mask, ascending.
    pub fn bits(self) -> impl Iterator<Item = u8> {
        let m = self.resources();
        (0..=Self::MAX_BIT).filter(move |&i| m.intersects(BlockMask::bit(i)))
    }
}

impl BitOr for BlockMask {
    type Output = BlockMask;

    fn bitor(self, rhs: BlockMask) -> BlockMask {
        self.union(rhs)
    }
}

impl BitOrAssign for BlockMask {
    fn bitor_assign(&mut self, rhs: BlockMask) {
        *self = self.union(rhs);
    }
}

impl BitAnd for BlockMask {
    type Output = BlockMask;

    fn bitand(self, rhs: BlockMask) -> BlockMask {
        BlockMask {
            low: self.low & rhs.low,
            high: self.high & rhs.high,
        }
    }
}

impl BitXor for BlockMask {
    type Output = BlockMask;

    fn bitxor(self, rhs: BlockMask) -> BlockMask {
        BlockMask {
            low: self.low ^ rhs.low,
            high: self.high ^ rhs.high,
        }
    }
}

impl Not for BlockMask {
    type Output = BlockMask;

    fn not(self) -> BlockMask {
        BlockMask {
            low: !self.low,
            high: !self.high,
        }
    }
}

impl fmt::Debug for BlockMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nothing() {
            return write!(f, "BlockMask(NOTHING)");
        }
        write!(f, "BlockMask({:#x}:{:#018x})", self.high, self.low)
    }
}
