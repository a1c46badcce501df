//! Cleaning stage table

/// One highlighted stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stage {
    /// Short name
    pub label: &'static str,
    /// One-line description
    pub description: &'static str,
}

/// The four stages of a ZBot cleaning cycle, in order
pub const CLEANING_STAGES: [Stage; 4] = [
    Stage {
        label: "Dose",
        description: "Precision fluid release",
    },
    Stage {
        label: "Scrub",
        description: "600 RPM rolling brush",
    },
    Stage {
        label: "Extract",
        description: "Powerful suction",
    },
    Stage {
        label: "Dry",
        description: "Instant dry finish",
    },
];
