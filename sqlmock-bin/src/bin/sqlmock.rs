//! We use `bin/sqlmock.rs` instead of `main.rs` so that the installed binary
//! is named `sqlmock` instead of `sqlmock-bin`.

use anyhow::Result;

fn main() -> Result<()> {
    sqlmock_bin::main()
}
