// Preset values offered by the parameter fields. Free text is accepted too.

pub const FRAME_RATE_OPTIONS: &[&str] = &["1", "5", "10", "15", "24", "30"];

// CRF 18 (near lossless) to 40 (very small)
pub const QUALITY_OPTIONS: &[&str] = &[
    "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31", "32", "33",
    "34", "35", "36", "37", "38", "39", "40",
];

pub const AUDIO_BITRATE_OPTIONS: &[&str] = &["32k", "48k", "64k", "96k", "128k", "copy"];

/// Oldest log lines are dropped beyond this
pub const LOG_CAPACITY: usize = 5000;

/// Worker messages applied per frame
pub const WORKER_MESSAGES_PER_FRAME: usize = 512;
