use assert_cmd::{cargo::cargo_bin_cmd, Command};

pub fn braidmap() -> Command {
    cargo_bin_cmd!("braidmap")
}

/// A small valid document used across tests
#[allow(dead_code)]
pub const SAMPLE: &str = "# Geology\n%%map false;true;false;true;36500;0.9;0.1,0.2%%\n\n- Rocks:\n\t- Igneous\n\t- Sedimentary\n- Minerals\n";

/// Two notes with the same content each defining children
#[allow(dead_code)]
pub const CONFLICT: &str = "# Geology\n%%map false;true;false;true;36500;0.9;0.1,0.2%%\n\n- Dup\n\t- Child A\n- Dup\n\t- Child B\n";

/// Two notes bound to the same explicit id, each defining children
#[allow(dead_code)]
pub const BOUND_CONFLICT: &str = "# Geology\n%%map false;true;false;true;36500;0.9;0.1,0.2%%\n\n- Dup #x\n\t- Child A\n- Dup #x\n\t- Child B\n";
