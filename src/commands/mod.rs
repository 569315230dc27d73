//! Command implementations for braidmap

pub mod check;
pub mod dismiss;
pub mod dispatch;
pub mod graph;
pub mod init;
pub mod sync;
