

/// Data stalls and branch drain.
pub mod hazards;

/// Individual stage functions.
pub mod stages;
