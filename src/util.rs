/// Numeric parsing and conversion helpers.
///
/// Number literals, `READ NUM` input and `EXIT` codes all go through these
/// functions so that every stage agrees on what counts as a number and which
/// numbers are valid exit codes.
pub mod num;
