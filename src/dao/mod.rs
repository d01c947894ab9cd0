//! Persistence layer: the one-shot end-of-match log record.

pub mod match_log;
