/// Counters gathered while classifying a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    pub dynamic: usize,
    pub dynamic_plural: usize,
    pub unsupported: usize,
}

/// Totals for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Distinct keys after deduplication.
    pub keys: usize,
    /// Translation calls skipped because of a runtime key or params.
    pub dynamic: usize,
    /// Plural calls skipped because of a runtime key, params or options.
    pub dynamic_plural: usize,
    /// Source files the parser rejected.
    pub unparsed_files: usize,
    /// Call sites whose key argument has an unsupported shape.
    pub unsupported: usize,
}

impl ExtractStats {
    /// Fold the counters of one file into the totals.
    pub fn add_file(&mut self, file: &FileStats) {
        self.dynamic += file.dynamic;
        self.dynamic_plural += file.dynamic_plural;
        self.unsupported += file.unsupported;
    }
}
