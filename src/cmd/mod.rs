/// Content hash command.
pub mod hash;
/// Document summary command.
pub mod info;
/// Re-emit with different formatting command.
pub mod repack;
/// Schema validation command.
pub mod validate;
