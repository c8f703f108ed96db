//! Workspace tooling package. Hosts the rusty-hook pre-commit configuration;
//! the Talide crates live under `crates/`.
