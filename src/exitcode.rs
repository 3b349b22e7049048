//! Process exit codes, taken from BSD `sysexits.h`.

/// Bad arguments, missing subcommand, or `config init` over an existing file
pub const USAGE: i32 = 64;

/// Malformed outline document, or a node path that names no node
pub const DATAERR: i32 = 65;

/// Outline file could not be read or written
pub const NOINPUT: i32 = 66;

/// Tree invariant violated (stale node index)
pub const SOFTWARE: i32 = 70;

/// Filesystem failure outside a service
pub const IOERR: i32 = 74;

/// Unreadable or invalid settings
pub const CONFIG: i32 = 78;
