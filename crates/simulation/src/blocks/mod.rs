mod authority;
mod mask;


pub use mask::BlockMask;
