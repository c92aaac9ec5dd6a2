//! Unified exit codes. A FAIL verdict is data, not a process failure:
//! `analyze` exits 0 whenever it completes, whatever the verdicts say.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // missing input, credential, malformed artifact
