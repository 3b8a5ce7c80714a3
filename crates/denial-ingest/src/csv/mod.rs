//! CSV reading and header-row detection.

mod detect;
mod reader;

pub use detect::{
    DetectionError, HEADER_OFFSETS, LoadedTable, OffsetAttempt, OffsetRejection, detect_header,
    load_claims_text,
};
pub use reader::{
    MISSING_VALUE_TOKENS, RawTable, build_frame, check_file_size, normalize_cell,
    parse_with_header_at,
};
