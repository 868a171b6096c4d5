// Utility helpers for the command line tool

pub mod file_ops;
