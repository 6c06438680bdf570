//! End-offset policies.

/// How the end of the extracted region is determined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// Copy up to the end of the dump.
    #[default]
    ToEof,
    /// Copy exactly this many bytes from the start offset.
    FixedSize(usize),
    /// Copy up to (not including) the first occurrence of these bytes
    /// after the magic marker.
    UntilMarker(Vec<u8>),
}

impl ExtractionPolicy {
    /// Selects a policy from the optional inputs.
    ///
    /// A size wins over an end marker when both are given.
    pub fn select(size: Option<usize>, end_marker: Option<Vec<u8>>) -> Self {
        match (size, end_marker) {
            (Some(size), _) => ExtractionPolicy::FixedSize(size),
            (None, Some(marker)) => ExtractionPolicy::UntilMarker(marker),
            (None, None) => ExtractionPolicy::ToEof,
        }
    }

    /// Short name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionPolicy::ToEof => "to-eof",
            ExtractionPolicy::FixedSize(_) => "fixed-size",
            ExtractionPolicy::UntilMarker(_) => "until-marker",
        }
    }
}
