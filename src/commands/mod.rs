/// Command implementations, one per binary.
pub mod pkg;
pub mod rev;
