/// Text and JSON rendering of per-statement verdicts.
pub mod report;
