//! Undo and restart.
//!
//! Snapshots are whole-store copies. The store's persistent maps make each
//! one O(1) to take and independent of later edits.

pub mod manager;

pub use manager::UndoManager;
